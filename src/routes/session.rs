use axum::{routing::post, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    omni_error::OmniError,
    users::{
        navigation::NavItem,
        session::{LoginUser, SessionUser},
    },
};

pub fn route() -> Router {
    Router::new().route("/session", post(establish_session))
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub user: SessionUser,
    pub navigation: Vec<NavItem>,
    pub landing_path: Option<&'static str>,
}

/// Establish a session for a signed-in user
///
/// Takes the user record returned by the backend on login and derives
/// what the admin panel should show for the lifetime of the session.
/// Any permissions in the record are ignored in favour of the ones
/// the user's role grants.
#[utoipa::path(post, path = "/session",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Session established", body = SessionView),
        (status = 400, description = "The user record carries an unknown role"),
        (status = 422, description = "Malformed user record"),
    ),
    tag = "session"
)]
pub async fn establish_session(Json(login): Json<LoginUser>) -> Result<Json<SessionView>, OmniError> {
    let user = SessionUser::establish(login)?;
    Ok(Json(SessionView {
        navigation: user.navigation(),
        landing_path: user.landing_path(),
        user,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::testing::post;

    #[tokio::test]
    async fn session_carries_derived_permissions() {
        let (status, body) = post(
            "/session",
            json!({
                "id": "6650aa",
                "name": "Ngozi",
                "email": "ngozi@example.org",
                "role": "ADMIN",
                "permissions": ["USERS"]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["role"], "ADMIN");
        assert_eq!(
            body["user"]["permissions"],
            json!(["SCHOLARS", "SPONSORS", "DOC_VERIFICATIONS", "PAYMENTS", "SETTINGS"])
        );
        assert_eq!(body["navigation"].as_array().unwrap().len(), 5);
        assert_eq!(body["landingPath"], "/scholars");
        assert!(body["user"]["sessionId"].is_string());
    }

    #[tokio::test]
    async fn unknown_role_refuses_session() {
        let (status, _) = post(
            "/session",
            json!({"id": "1", "name": "X", "email": "x@example.org", "role": "superadmin"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_record_is_unprocessable() {
        let (status, _) = post("/session", json!({"role": "LSO"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
