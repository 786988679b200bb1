pub mod drafts;
pub mod navigation;
pub mod permissions;
pub mod roles;
pub mod rules;
pub mod session;

pub use permissions::{all_permissions, Permission, PermissionSet};
pub use roles::{has_permission, permissions_for, Role};
pub use session::{LoginUser, SessionUser};
