use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::users::{
    drafts::{PermissionOption, RoleDraft},
    navigation::{NavItem, RouteAccess},
    permissions::Permission,
    roles::Role,
    rules::{AccountRef, UserActions},
    session::{AccountStatus, LoginUser, SessionUser},
};

use super::{health_check, permission, role, session, user_actions, version};

pub fn route() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/openapi.json", ApiDoc::openapi()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check::live,
        health_check::health,
        version::version,
        version::version_details,
        permission::get_permissions,
        role::get_roles,
        role::get_role_permissions,
        role::get_role_permission,
        role::get_role_navigation,
        role::get_role_access,
        role::get_role_draft,
        session::establish_session,
        user_actions::evaluate_user_actions,
    ),
    components(schemas(
        version::VersionDetails,
        version::VersionBits,
        Permission,
        Role,
        NavItem,
        RouteAccess,
        RoleDraft,
        PermissionOption,
        AccountRef,
        UserActions,
        AccountStatus,
        LoginUser,
        SessionUser,
        permission::PermissionInfo,
        role::RoleInfo,
        role::PermissionCheck,
        role::RouteDecision,
        role::RoleDraftView,
        session::SessionView,
        user_actions::UserActionsRequest,
    ))
)]
pub struct ApiDoc;

#[test]
fn openapi_lists_every_route() {
    let doc = ApiDoc::openapi();
    for path in [
        "/permissions",
        "/roles",
        "/roles/{role}/permissions",
        "/roles/{role}/permissions/{permission}",
        "/roles/{role}/navigation",
        "/roles/{role}/access",
        "/roles/{role}/draft",
        "/session",
        "/user-actions",
    ] {
        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }
}
