use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::omni_error::OmniError;

use super::{
    navigation::{landing_path, navigation_for, NavItem},
    permissions::{Permission, PermissionSet},
    roles::Role,
    rules::AccountRef,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// The user record as the backend returns it on login.
/// The role arrives as a plain string and is only trusted after parsing.
/// Permissions the backend may send along are ignored; they are always
/// derived from the role.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar_url: Option<Url>,
    pub role: String,
    pub status: Option<AccountStatus>,
    pub created_at: Option<DateTime<Utc>>,
}

/// The signed-in user for the lifetime of one session.
///
/// The permission set is looked up once, when the session is
/// established, and never changes afterwards. An account whose role
/// was changed picks up its new permissions on its next session.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    session_id: Uuid,
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    avatar_url: Option<Url>,
    role: Role,
    #[schema(value_type = Vec<Permission>)]
    permissions: PermissionSet,
    status: Option<AccountStatus>,
    created_at: Option<DateTime<Utc>>,
    established_at: DateTime<Utc>,
}

impl SessionUser {
    pub fn establish(login: LoginUser) -> Result<SessionUser, OmniError> {
        let role = match Role::try_from(login.role.as_str()) {
            Ok(role) => role,
            Err(e) => {
                warn!("Refusing session for user {}: {e}", login.id);
                return Err(e);
            }
        };
        let session = SessionUser {
            session_id: Uuid::now_v7(),
            id: login.id,
            name: login.name,
            email: login.email,
            phone: login.phone,
            avatar_url: login.avatar_url,
            role,
            permissions: role.permissions(),
            status: login.status,
            created_at: login.created_at,
            established_at: Utc::now(),
        };
        info!(
            "Session {} established for user {} as {}",
            session.session_id, session.id, session.role
        );
        Ok(session)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn avatar_url(&self) -> Option<&Url> {
        self.avatar_url.as_ref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn permissions(&self) -> PermissionSet {
        self.permissions
    }

    pub fn established_at(&self) -> DateTime<Utc> {
        self.established_at
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(permission)
    }

    pub fn navigation(&self) -> Vec<NavItem> {
        navigation_for(self.role)
    }

    pub fn landing_path(&self) -> Option<&'static str> {
        landing_path(self.role)
    }

    pub fn as_account(&self) -> AccountRef {
        AccountRef {
            id: self.id.clone(),
            role: self.role,
        }
    }
}

#[cfg(test)]
pub(crate) fn login_user(role: &str) -> LoginUser {
    LoginUser {
        id: String::from("66f1c0ffee"),
        name: String::from("Ada Obi"),
        email: String::from("ada@example.org"),
        phone: None,
        avatar_url: None,
        role: role.to_owned(),
        status: Some(AccountStatus::Active),
        created_at: None,
    }
}
