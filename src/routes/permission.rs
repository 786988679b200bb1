use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::users::permissions::{all_permissions, Permission};

pub fn route() -> Router {
    Router::new().route("/permissions", get(get_permissions))
}

#[derive(Serialize, ToSchema)]
pub struct PermissionInfo {
    pub permission: Permission,
    pub label: &'static str,
}

/// List every permission
///
/// Permissions are listed in a fixed order, which is also the
/// order in which the admin panel displays them.
#[utoipa::path(get, path = "/permissions",
    responses((status = 200, description = "Ok", body = Vec<PermissionInfo>)),
    tag = "permissions"
)]
pub async fn get_permissions() -> Json<Vec<PermissionInfo>> {
    let permissions = all_permissions()
        .iter()
        .map(|permission| PermissionInfo {
            permission,
            label: permission.label(),
        })
        .collect();
    Json(permissions)
}

#[tokio::test]
async fn permissions_are_listed_in_display_order() {
    use super::testing::get;

    let (status, body) = get("/permissions").await;
    assert_eq!(status, axum::http::StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|info| info["permission"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "SCHOLARS",
            "SPONSORS",
            "DOC_VERIFICATIONS",
            "PAYMENTS",
            "USERS",
            "ROLES_PERMISSIONS",
            "SETTINGS"
        ]
    );
    assert_eq!(body[4]["label"], "Users");
}
