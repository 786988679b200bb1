use std::fmt;

use serde::{Deserialize, Serialize};
use strum::VariantArray;
use utoipa::ToSchema;

use crate::omni_error::OmniError;

use super::permissions::{Permission, PermissionSet};

#[derive(Debug, Default, VariantArray, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String")]
/// Every account of the admin panel is assigned exactly one role.
/// Each role comes with a predefined set of permissions, compiled in;
/// changing what a role may do means changing this table.
pub enum Role {
    /// This role grants all possible permissions.
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,
    /// Admins run the day-to-day programme, but cannot manage accounts or redefine roles.
    #[serde(rename = "ADMIN")]
    Admin,
    /// Limited Scope Operators work through scholars and their documents.
    /// Newly created accounts get this role unless told otherwise.
    #[default]
    #[serde(rename = "LSO")]
    LimitedScopeOperator,
}

const ADMIN_PERMISSIONS: PermissionSet = PermissionSet::from_slice(&[
    Permission::ManageScholars,
    Permission::ManageSponsors,
    Permission::ManageDocumentVerifications,
    Permission::ManagePayments,
    Permission::ManageSettings,
]);

const LSO_PERMISSIONS: PermissionSet = PermissionSet::from_slice(&[
    Permission::ManageScholars,
    Permission::ManageDocumentVerifications,
    Permission::ManageSettings,
]);

impl Role {
    pub const fn permissions(self) -> PermissionSet {
        match self {
            Role::SuperAdmin => PermissionSet::ALL,
            Role::Admin => ADMIN_PERMISSIONS,
            Role::LimitedScopeOperator => LSO_PERMISSIONS,
        }
    }

    pub const fn has_permission(self, permission: Permission) -> bool {
        self.permissions().contains(permission)
    }

    /// Name used by the backend and the front-end.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::LimitedScopeOperator => "LSO",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Admin => "Admin",
            Role::LimitedScopeOperator => "LSO",
        }
    }
}

/// Permissions granted to a role.
pub fn permissions_for(role: Role) -> PermissionSet {
    role.permissions()
}

pub fn has_permission(role: Role, permission: Permission) -> bool {
    role.has_permission(permission)
}

impl TryFrom<&str> for Role {
    type Error = OmniError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            "ADMIN" => Ok(Role::Admin),
            "LSO" => Ok(Role::LimitedScopeOperator),
            _ => Err(OmniError::InvalidRole(value.to_owned())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = OmniError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Role::try_from(value.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
