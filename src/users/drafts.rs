use serde::Serialize;
use utoipa::ToSchema;

use super::{
    permissions::{all_permissions, Permission, PermissionSet},
    roles::Role,
    rules::{check_new_account_role, RuleViolation},
};

/// A role record being composed on the role management screen.
/// Picking a base role pre-populates its default permissions,
/// which can then be adjusted one by one before submitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct RoleDraft {
    base: Role,
    #[schema(value_type = Vec<Permission>)]
    permissions: PermissionSet,
}

/// One checkbox of the permission picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PermissionOption {
    pub permission: Permission,
    pub label: &'static str,
    pub selected: bool,
}

impl RoleDraft {
    pub fn from_base(base: Role) -> Result<Self, RuleViolation> {
        check_new_account_role(base)?;
        Ok(RoleDraft {
            base,
            permissions: base.permissions(),
        })
    }

    /// Switches the base role, discarding any adjustments.
    pub fn rebase(&mut self, base: Role) -> Result<(), RuleViolation> {
        *self = RoleDraft::from_base(base)?;
        Ok(())
    }

    pub fn toggle(&mut self, permission: Permission) {
        self.permissions = self.permissions.toggled(permission);
    }

    pub fn base(&self) -> Role {
        self.base
    }

    pub fn permissions(&self) -> PermissionSet {
        self.permissions
    }

    pub fn is_default(&self) -> bool {
        self.permissions == self.base.permissions()
    }

    pub fn options(&self) -> Vec<PermissionOption> {
        all_permissions()
            .iter()
            .map(|permission| PermissionOption {
                permission,
                label: permission.label(),
                selected: self.permissions.contains(permission),
            })
            .collect()
    }
}

impl Default for RoleDraft {
    fn default() -> Self {
        let base = Role::default();
        RoleDraft {
            base,
            permissions: base.permissions(),
        }
    }
}

#[test]
fn draft_starts_from_base_defaults() {
    let draft = RoleDraft::from_base(Role::Admin).unwrap();
    assert_eq!(draft.permissions(), Role::Admin.permissions());
    assert!(draft.is_default());
    assert_eq!(RoleDraft::default().base(), Role::LimitedScopeOperator);
}

#[test]
fn super_admin_cannot_be_a_base() {
    assert_eq!(
        RoleDraft::from_base(Role::SuperAdmin),
        Err(RuleViolation::SuperAdminNotAssignable)
    );
    let mut draft = RoleDraft::default();
    assert!(draft.rebase(Role::SuperAdmin).is_err());
    assert_eq!(draft, RoleDraft::default());
}

#[test]
fn rebasing_discards_adjustments() {
    let mut draft = RoleDraft::default();
    draft.toggle(Permission::ManagePayments);
    assert!(!draft.is_default());
    draft.rebase(Role::Admin).unwrap();
    assert_eq!(draft.permissions(), Role::Admin.permissions());
}

#[test]
fn options_list_every_permission_in_order() {
    let mut draft = RoleDraft::default();
    draft.toggle(Permission::ManageScholars);
    let options = draft.options();
    assert_eq!(options.len(), 7);
    assert_eq!(options[0].permission, Permission::ManageScholars);
    assert!(!options[0].selected);
    assert!(options[2].selected);
    assert_eq!(options[2].label, "Document Verifications");
    assert!(!options[1].selected);
}
