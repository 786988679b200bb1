use serde::Serialize;
use strum::VariantArray;
use utoipa::ToSchema;

use super::{permissions::Permission, roles::Role};

/// A sidebar entry. Every permission owns exactly one section of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavItem {
    pub permission: Permission,
    pub label: &'static str,
    pub path: &'static str,
}

impl NavItem {
    const fn of(permission: Permission) -> NavItem {
        NavItem {
            permission,
            label: permission.label(),
            path: section_path(permission),
        }
    }
}

const fn section_path(permission: Permission) -> &'static str {
    match permission {
        Permission::ManageScholars => "/scholars",
        Permission::ManageSponsors => "/sponsors",
        Permission::ManageDocumentVerifications => "/verifications",
        Permission::ManagePayments => "/payments",
        Permission::ManageUsers => "/users",
        Permission::ManageRolesAndPermissions => "/roles",
        Permission::ManageSettings => "/settings",
    }
}

pub const NAVIGATION: [NavItem; 7] = [
    NavItem::of(Permission::ManageScholars),
    NavItem::of(Permission::ManageSponsors),
    NavItem::of(Permission::ManageDocumentVerifications),
    NavItem::of(Permission::ManagePayments),
    NavItem::of(Permission::ManageUsers),
    NavItem::of(Permission::ManageRolesAndPermissions),
    NavItem::of(Permission::ManageSettings),
];

const _: () = assert!(NAVIGATION.len() == Permission::VARIANTS.len());

/// Sidebar entries visible to a role, in display order.
pub fn navigation_for(role: Role) -> Vec<NavItem> {
    let granted = role.permissions();
    NAVIGATION
        .iter()
        .copied()
        .filter(|item| granted.contains(item.permission))
        .collect()
}

/// Where a freshly signed-in user lands.
pub fn landing_path(role: Role) -> Option<&'static str> {
    navigation_for(role).first().map(|item| item.path)
}

/// Pages reachable without signing in.
pub const PUBLIC_PATHS: [&str; 4] = [
    "/",
    "/forgot-password",
    "/reset-password",
    "/setup-super-admin",
];

/// Strips query, fragment and trailing slashes; the empty path is the root.
fn route_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

pub fn is_public_path(path: &str) -> bool {
    let path = route_path(path);
    PUBLIC_PATHS
        .iter()
        .any(|public| public.eq_ignore_ascii_case(path))
}

/// The permission guarding a front-end path, if any.
/// Detail pages share the guard of their section, so only the
/// first path segment matters. Paths match regardless of case,
/// the way the front-end router matches them.
pub fn required_permission(path: &str) -> Option<Permission> {
    let section = route_path(path).trim_start_matches('/').split('/').next()?;
    if section.is_empty() {
        return None;
    }
    NAVIGATION
        .iter()
        .find(|item| item.path.trim_start_matches('/').eq_ignore_ascii_case(section))
        .map(|item| item.permission)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "access", content = "permission", rename_all = "snake_case")]
pub enum RouteAccess {
    /// Public pages such as login or password reset.
    Unguarded,
    Allowed(Permission),
    Forbidden(Permission),
    /// Neither public nor part of any section.
    NotFound,
}

impl RouteAccess {
    pub fn is_allowed(self) -> bool {
        matches!(self, RouteAccess::Unguarded | RouteAccess::Allowed(_))
    }
}

pub fn check_route(role: Role, path: &str) -> RouteAccess {
    if is_public_path(path) {
        return RouteAccess::Unguarded;
    }
    match required_permission(path) {
        None => RouteAccess::NotFound,
        Some(permission) if role.has_permission(permission) => RouteAccess::Allowed(permission),
        Some(permission) => RouteAccess::Forbidden(permission),
    }
}
