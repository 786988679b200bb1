use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use strum::VariantArray;
use utoipa::{IntoParams, ToSchema};

use crate::{
    omni_error::OmniError,
    users::{
        drafts::{PermissionOption, RoleDraft},
        navigation::{check_route, navigation_for, NavItem, RouteAccess},
        permissions::{Permission, PermissionSet},
        roles::Role,
    },
};

static ROLES_TAG: &str = "roles";

pub fn route() -> Router {
    Router::new()
        .route("/roles", get(get_roles))
        .route("/roles/{role}/permissions", get(get_role_permissions))
        .route(
            "/roles/{role}/permissions/{permission}",
            get(get_role_permission),
        )
        .route("/roles/{role}/navigation", get(get_role_navigation))
        .route("/roles/{role}/access", get(get_role_access))
        .route("/roles/{role}/draft", get(get_role_draft))
}

#[derive(Serialize, ToSchema)]
pub struct RoleInfo {
    pub role: Role,
    pub label: &'static str,
    #[schema(value_type = Vec<Permission>)]
    pub permissions: PermissionSet,
}

#[derive(Serialize, ToSchema)]
pub struct PermissionCheck {
    pub role: Role,
    pub permission: Permission,
    pub granted: bool,
}

#[derive(Deserialize, IntoParams)]
pub struct AccessQuery {
    /// Front-end path, e.g. `/sponsors/42`
    pub path: String,
}

#[derive(Serialize, ToSchema)]
pub struct RouteDecision {
    pub path: String,
    pub allowed: bool,
    pub access: RouteAccess,
}

#[derive(Serialize, ToSchema)]
pub struct RoleDraftView {
    pub draft: RoleDraft,
    pub options: Vec<PermissionOption>,
}

/// List all roles together with their permissions
#[utoipa::path(get, path = "/roles",
    responses((status = 200, description = "Ok", body = Vec<RoleInfo>,
        example = json!(get_roles_example())
    )),
    tag = ROLES_TAG
)]
pub async fn get_roles() -> Json<Vec<RoleInfo>> {
    let roles = Role::VARIANTS
        .iter()
        .map(|role| RoleInfo {
            role: *role,
            label: role.label(),
            permissions: role.permissions(),
        })
        .collect();
    Json(roles)
}

/// List permissions granted to a role
#[utoipa::path(get, path = "/roles/{role}/permissions",
    params(("role" = String, Path, description = "SUPER_ADMIN, ADMIN or LSO")),
    responses(
        (status = 200, description = "Ok", body = Vec<Permission>),
        (status = 400, description = "No such role"),
    ),
    tag = ROLES_TAG
)]
pub async fn get_role_permissions(Path(role): Path<String>) -> Result<Json<PermissionSet>, OmniError> {
    let role = Role::try_from(role)?;
    Ok(Json(role.permissions()))
}

/// Check whether a role holds a permission
#[utoipa::path(get, path = "/roles/{role}/permissions/{permission}",
    params(
        ("role" = String, Path, description = "SUPER_ADMIN, ADMIN or LSO"),
        ("permission" = String, Path, description = "e.g. SCHOLARS"),
    ),
    responses(
        (status = 200, description = "Ok", body = PermissionCheck),
        (status = 400, description = "No such role or permission"),
    ),
    tag = ROLES_TAG
)]
pub async fn get_role_permission(
    Path((role, permission)): Path<(String, String)>,
) -> Result<Json<PermissionCheck>, OmniError> {
    let role = Role::try_from(role)?;
    let permission = Permission::try_from(permission)?;
    Ok(Json(PermissionCheck {
        role,
        permission,
        granted: role.has_permission(permission),
    }))
}

/// Sidebar entries visible to a role
#[utoipa::path(get, path = "/roles/{role}/navigation",
    params(("role" = String, Path, description = "SUPER_ADMIN, ADMIN or LSO")),
    responses(
        (status = 200, description = "Ok", body = Vec<NavItem>),
        (status = 400, description = "No such role"),
    ),
    tag = ROLES_TAG
)]
pub async fn get_role_navigation(Path(role): Path<String>) -> Result<Json<Vec<NavItem>>, OmniError> {
    let role = Role::try_from(role)?;
    Ok(Json(navigation_for(role)))
}

/// Decide whether a role may open a front-end path
#[utoipa::path(get, path = "/roles/{role}/access",
    params(("role" = String, Path, description = "SUPER_ADMIN, ADMIN or LSO"), AccessQuery),
    responses(
        (status = 200, description = "Ok", body = RouteDecision),
        (status = 400, description = "No such role"),
    ),
    tag = ROLES_TAG
)]
pub async fn get_role_access(
    Path(role): Path<String>,
    Query(query): Query<AccessQuery>,
) -> Result<Json<RouteDecision>, OmniError> {
    let role = Role::try_from(role)?;
    let access = check_route(role, &query.path);
    Ok(Json(RouteDecision {
        path: query.path,
        allowed: access.is_allowed(),
        access,
    }))
}

/// Default permissions for a new role based on an existing one
///
/// Super Admin cannot serve as a base.
#[utoipa::path(get, path = "/roles/{role}/draft",
    params(("role" = String, Path, description = "ADMIN or LSO")),
    responses(
        (status = 200, description = "Ok", body = RoleDraftView),
        (status = 400, description = "No such role"),
        (status = 403, description = "The role cannot serve as a base"),
    ),
    tag = ROLES_TAG
)]
pub async fn get_role_draft(Path(role): Path<String>) -> Result<Json<RoleDraftView>, OmniError> {
    let role = Role::try_from(role)?;
    let draft = RoleDraft::from_base(role)?;
    Ok(Json(RoleDraftView {
        options: draft.options(),
        draft,
    }))
}

fn get_roles_example() -> serde_json::Value {
    serde_json::json!([
        {
            "role": "LSO",
            "label": "LSO",
            "permissions": ["SCHOLARS", "DOC_VERIFICATIONS", "SETTINGS"]
        }
    ])
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::testing::get;

    #[tokio::test]
    async fn roles_are_listed_with_permissions() {
        let (status, body) = get("/roles").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["role"], "SUPER_ADMIN");
        assert_eq!(body[0]["permissions"].as_array().unwrap().len(), 7);
        assert_eq!(body[2], super::get_roles_example()[0]);
    }

    #[tokio::test]
    async fn role_permissions_by_name() {
        let (status, body) = get("/roles/ADMIN/permissions").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!(["SCHOLARS", "SPONSORS", "DOC_VERIFICATIONS", "PAYMENTS", "SETTINGS"])
        );
    }

    #[tokio::test]
    async fn unknown_role_is_a_bad_request() {
        let (status, body) = get("/roles/ROOT/permissions").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.as_str().unwrap().contains("ROOT"));
    }

    #[tokio::test]
    async fn single_permission_check() {
        let (status, body) = get("/roles/LSO/permissions/SPONSORS").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"role": "LSO", "permission": "SPONSORS", "granted": false})
        );
        let (status, _) = get("/roles/LSO/permissions/BILLING").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn navigation_for_lso() {
        let (_, body) = get("/roles/LSO/navigation").await;
        let paths: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["path"].as_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["/scholars", "/verifications", "/settings"]);
    }

    #[tokio::test]
    async fn access_decisions() {
        let (status, body) = get("/roles/ADMIN/access?path=/users/12").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "path": "/users/12",
                "allowed": false,
                "access": {"access": "forbidden", "permission": "USERS"}
            })
        );
        let (_, body) = get("/roles/LSO/access?path=/forgot-password").await;
        assert_eq!(body["allowed"], true);
        assert_eq!(body["access"]["access"], "unguarded");
    }

    #[tokio::test]
    async fn access_ignores_case_and_rejects_unknown_paths() {
        let (_, body) = get("/roles/LSO/access?path=/USERS").await;
        assert_eq!(body["allowed"], false);
        assert_eq!(
            body["access"],
            json!({"access": "forbidden", "permission": "USERS"})
        );
        let (status, body) = get("/roles/SUPER_ADMIN/access?path=/nowhere").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["allowed"], false);
        assert_eq!(body["access"], json!({"access": "not_found"}));
    }

    #[tokio::test]
    async fn drafts_start_from_base_role() {
        let (status, body) = get("/roles/LSO/draft").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["draft"]["base"], "LSO");
        assert_eq!(body["options"].as_array().unwrap().len(), 7);
        assert_eq!(body["options"][1]["selected"], false);

        let (status, _) = get("/roles/SUPER_ADMIN/draft").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
