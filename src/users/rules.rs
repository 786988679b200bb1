//! Account management rules.
//!
//! Holding `ManageUsers` gets an account onto the users screen and is
//! required for every action there; what it may do to a particular
//! account is decided here.

use serde::{Deserialize, Serialize};
use strum::VariantArray;
use tracing::debug;
use utoipa::ToSchema;

use super::{permissions::Permission, roles::Role};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("Managing accounts requires the USERS permission.")]
    CannotManageUsers,
    #[error("Only a Super Admin can change user roles.")]
    OnlySuperAdminChangesRoles,
    #[error("You cannot change the status of your own account.")]
    CannotToggleOwnStatus,
    #[error("Super Admin accounts cannot be deactivated.")]
    CannotToggleSuperAdmin,
    #[error("The Super Admin role cannot be handed out here.")]
    SuperAdminNotAssignable,
}

/// The parts of an account the rules look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AccountRef {
    pub id: String,
    pub role: Role,
}

fn check_manages_users(actor: &AccountRef) -> Result<(), RuleViolation> {
    if actor.role.has_permission(Permission::ManageUsers) {
        return Ok(());
    }
    debug!("Account {} ({}) lacks {}", actor.id, actor.role, Permission::ManageUsers);
    Err(RuleViolation::CannotManageUsers)
}

pub fn check_role_change(actor: &AccountRef) -> Result<(), RuleViolation> {
    check_manages_users(actor)?;
    if actor.role == Role::SuperAdmin {
        return Ok(());
    }
    debug!("Account {} ({}) attempted to change a role", actor.id, actor.role);
    Err(RuleViolation::OnlySuperAdminChangesRoles)
}

pub fn can_change_roles(actor: &AccountRef) -> bool {
    check_role_change(actor).is_ok()
}

pub fn check_status_toggle(actor: &AccountRef, target: &AccountRef) -> Result<(), RuleViolation> {
    check_manages_users(actor)?;
    if actor.id == target.id {
        debug!("Account {} attempted to toggle its own status", actor.id);
        return Err(RuleViolation::CannotToggleOwnStatus);
    }
    if target.role == Role::SuperAdmin {
        debug!("Account {} attempted to toggle Super Admin {}", actor.id, target.id);
        return Err(RuleViolation::CannotToggleSuperAdmin);
    }
    Ok(())
}

pub fn can_toggle_status(actor: &AccountRef, target: &AccountRef) -> bool {
    check_status_toggle(actor, target).is_ok()
}

/// Roles offered when creating an account or composing a role.
/// Super Admins only come from the initial setup flow.
pub fn assignable_roles() -> impl Iterator<Item = Role> {
    Role::VARIANTS
        .iter()
        .copied()
        .filter(|role| *role != Role::SuperAdmin)
}

pub fn check_new_account_role(role: Role) -> Result<(), RuleViolation> {
    match role {
        Role::SuperAdmin => Err(RuleViolation::SuperAdminNotAssignable),
        Role::Admin | Role::LimitedScopeOperator => Ok(()),
    }
}

/// What the users screen may offer for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserActions {
    pub can_toggle_status: bool,
    pub can_change_role: bool,
}

impl UserActions {
    pub fn evaluate(actor: &AccountRef, target: &AccountRef) -> Self {
        UserActions {
            can_toggle_status: can_toggle_status(actor, target),
            can_change_role: can_change_roles(actor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, role: Role) -> AccountRef {
        AccountRef {
            id: id.to_owned(),
            role,
        }
    }

    #[test]
    fn only_super_admin_changes_roles() {
        assert!(check_role_change(&account("s", Role::SuperAdmin)).is_ok());
        assert_eq!(
            check_role_change(&account("a", Role::Admin)),
            Err(RuleViolation::CannotManageUsers)
        );
        assert_eq!(
            check_role_change(&account("l", Role::LimitedScopeOperator)),
            Err(RuleViolation::CannotManageUsers)
        );
    }

    #[test]
    fn accounts_without_users_permission_cannot_toggle() {
        let target = account("b1", Role::LimitedScopeOperator);
        for role in [Role::Admin, Role::LimitedScopeOperator] {
            assert!(!role.has_permission(Permission::ManageUsers));
            assert_eq!(
                check_status_toggle(&account("a1", role), &target),
                Err(RuleViolation::CannotManageUsers)
            );
        }
    }

    #[test]
    fn nobody_toggles_themselves() {
        let me = account("a1", Role::SuperAdmin);
        assert_eq!(
            check_status_toggle(&me, &me),
            Err(RuleViolation::CannotToggleOwnStatus)
        );
    }

    #[test]
    fn super_admins_cannot_be_deactivated() {
        let actor = account("a1", Role::SuperAdmin);
        let other_super = account("a2", Role::SuperAdmin);
        assert_eq!(
            check_status_toggle(&actor, &other_super),
            Err(RuleViolation::CannotToggleSuperAdmin)
        );
    }

    #[test]
    fn other_accounts_can_be_toggled() {
        let actor = account("a1", Role::SuperAdmin);
        assert!(can_toggle_status(&actor, &account("b", Role::Admin)));
        assert!(can_toggle_status(&actor, &account("c", Role::LimitedScopeOperator)));
    }

    #[test]
    fn super_admin_is_never_offered() {
        let offered: Vec<Role> = assignable_roles().collect();
        assert_eq!(offered, vec![Role::Admin, Role::LimitedScopeOperator]);
        assert!(check_new_account_role(Role::SuperAdmin).is_err());
        assert!(check_new_account_role(Role::default()).is_ok());
    }

    #[test]
    fn user_actions_follow_users_permission() {
        let target = account("b1", Role::LimitedScopeOperator);
        for role in [Role::Admin, Role::LimitedScopeOperator] {
            assert_eq!(
                UserActions::evaluate(&account("a1", role), &target),
                UserActions {
                    can_toggle_status: false,
                    can_change_role: false
                },
                "{role}"
            );
        }
        assert_eq!(
            UserActions::evaluate(&account("s1", Role::SuperAdmin), &target),
            UserActions {
                can_toggle_status: true,
                can_change_role: true
            }
        );
    }
}
