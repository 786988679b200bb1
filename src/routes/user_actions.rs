use axum::{routing::post, Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::users::rules::{AccountRef, UserActions};

pub fn route() -> Router {
    Router::new().route("/user-actions", post(evaluate_user_actions))
}

#[derive(Deserialize, ToSchema)]
pub struct UserActionsRequest {
    /// The signed-in account
    pub actor: AccountRef,
    /// The account shown in the users table
    pub target: AccountRef,
}

/// Decide which row actions the users screen may offer
///
/// Nothing is offered without the USERS permission. Status changes are
/// never offered on one's own account or on Super Admin accounts; role
/// changes are only offered to Super Admins.
#[utoipa::path(post, path = "/user-actions",
    request_body = UserActionsRequest,
    responses(
        (status = 200, description = "Ok", body = UserActions),
        (status = 422, description = "Malformed request, including unknown roles"),
    ),
    tag = "users"
)]
pub async fn evaluate_user_actions(Json(request): Json<UserActionsRequest>) -> Json<UserActions> {
    Json(UserActions::evaluate(&request.actor, &request.target))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::testing::post;

    #[tokio::test]
    async fn super_admin_viewing_admin() {
        let (status, body) = post(
            "/user-actions",
            json!({
                "actor": {"id": "a", "role": "SUPER_ADMIN"},
                "target": {"id": "b", "role": "ADMIN"}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"can_toggle_status": true, "can_change_role": true}));
    }

    #[tokio::test]
    async fn nothing_to_do_on_own_row() {
        let (_, body) = post(
            "/user-actions",
            json!({
                "actor": {"id": "a", "role": "ADMIN"},
                "target": {"id": "a", "role": "ADMIN"}
            }),
        )
        .await;
        assert_eq!(body, json!({"can_toggle_status": false, "can_change_role": false}));
    }

    #[tokio::test]
    async fn admin_without_users_permission_gets_no_actions() {
        let (status, body) = post(
            "/user-actions",
            json!({
                "actor": {"id": "a", "role": "ADMIN"},
                "target": {"id": "b", "role": "LSO"}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"can_toggle_status": false, "can_change_role": false}));
    }

    #[tokio::test]
    async fn unknown_roles_are_rejected() {
        let (status, body) = post(
            "/user-actions",
            json!({
                "actor": {"id": "a", "role": "GOD"},
                "target": {"id": "b", "role": "LSO"}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.as_str().unwrap().contains("GOD"));
    }
}
