use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::VariantArray;
use utoipa::ToSchema;

use crate::omni_error::OmniError;

/// A capability gating one section of the admin panel.
/// Each permission corresponds to exactly one navigable section.
/// The declaration order below is the display order everywhere
/// permissions are listed.
#[derive(Debug, VariantArray, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String")]
#[repr(u8)]
pub enum Permission {
    #[serde(rename = "SCHOLARS")]
    ManageScholars,
    #[serde(rename = "SPONSORS")]
    ManageSponsors,
    #[serde(rename = "DOC_VERIFICATIONS")]
    ManageDocumentVerifications,
    #[serde(rename = "PAYMENTS")]
    ManagePayments,
    #[serde(rename = "USERS")]
    ManageUsers,
    #[serde(rename = "ROLES_PERMISSIONS")]
    ManageRolesAndPermissions,
    #[serde(rename = "SETTINGS")]
    ManageSettings,
}

// every permission needs its own bit in PermissionSet
const _: () = assert!(Permission::VARIANTS.len() <= u8::BITS as usize);

impl Permission {
    /// Name used by the backend and the front-end.
    pub const fn as_str(self) -> &'static str {
        match self {
            Permission::ManageScholars => "SCHOLARS",
            Permission::ManageSponsors => "SPONSORS",
            Permission::ManageDocumentVerifications => "DOC_VERIFICATIONS",
            Permission::ManagePayments => "PAYMENTS",
            Permission::ManageUsers => "USERS",
            Permission::ManageRolesAndPermissions => "ROLES_PERMISSIONS",
            Permission::ManageSettings => "SETTINGS",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Permission::ManageScholars => "Scholars",
            Permission::ManageSponsors => "Sponsors",
            Permission::ManageDocumentVerifications => "Document Verifications",
            Permission::ManagePayments => "Payments",
            Permission::ManageUsers => "Users",
            // singular, as the admin panel spells it
            Permission::ManageRolesAndPermissions => "Roles & Permission",
            Permission::ManageSettings => "Settings",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl TryFrom<&str> for Permission {
    type Error = OmniError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Permission::VARIANTS
            .iter()
            .copied()
            .find(|permission| permission.as_str() == value)
            .ok_or_else(|| OmniError::InvalidPermission(value.to_owned()))
    }
}

impl TryFrom<String> for Permission {
    type Error = OmniError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Permission::try_from(value.as_str())
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered set of permissions.
///
/// Iteration always follows the declaration order of [`Permission`],
/// no matter in which order the permissions were added, so that
/// anything rendered from a set is deterministic.
/// Sets are plain values: "modifying" one yields a new set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PermissionSet {
    bits: u8,
}

impl PermissionSet {
    /// Every declared permission.
    pub const ALL: PermissionSet = PermissionSet::from_slice(Permission::VARIANTS);

    pub const fn empty() -> Self {
        PermissionSet { bits: 0 }
    }

    pub const fn from_slice(permissions: &[Permission]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < permissions.len() {
            bits |= permissions[i].bit();
            i += 1;
        }
        PermissionSet { bits }
    }

    pub const fn contains(self, permission: Permission) -> bool {
        self.bits & permission.bit() != 0
    }

    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub const fn is_subset(self, other: PermissionSet) -> bool {
        self.bits & other.bits == self.bits
    }

    pub const fn is_strict_subset(self, other: PermissionSet) -> bool {
        self.is_subset(other) && self.bits != other.bits
    }

    #[must_use]
    pub const fn with(self, permission: Permission) -> Self {
        PermissionSet {
            bits: self.bits | permission.bit(),
        }
    }

    #[must_use]
    pub const fn without(self, permission: Permission) -> Self {
        PermissionSet {
            bits: self.bits & !permission.bit(),
        }
    }

    #[must_use]
    pub const fn toggled(self, permission: Permission) -> Self {
        PermissionSet {
            bits: self.bits ^ permission.bit(),
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Permission> {
        Permission::VARIANTS
            .iter()
            .copied()
            .filter(move |permission| self.contains(*permission))
    }

    pub fn to_vec(self) -> Vec<Permission> {
        self.iter().collect()
    }
}

/// The full closed set of permissions.
pub fn all_permissions() -> PermissionSet {
    PermissionSet::ALL
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter()
            .fold(PermissionSet::empty(), |set, permission| set.with(permission))
    }
}

impl fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let permissions = Vec::<Permission>::deserialize(deserializer)?;
        Ok(permissions.into_iter().collect())
    }
}

#[test]
fn all_permissions_follow_declaration_order() {
    let listed: Vec<Permission> = all_permissions().iter().collect();
    assert_eq!(listed, Permission::VARIANTS.to_vec());
    assert_eq!(all_permissions().len(), 7);
    assert_eq!(listed.first(), Some(&Permission::ManageScholars));
    assert_eq!(listed.last(), Some(&Permission::ManageSettings));
}

#[test]
fn labels_match_admin_panel() {
    let labels: Vec<&str> = all_permissions().iter().map(Permission::label).collect();
    assert_eq!(
        labels,
        vec![
            "Scholars",
            "Sponsors",
            "Document Verifications",
            "Payments",
            "Users",
            "Roles & Permission",
            "Settings"
        ]
    );
}

#[test]
fn iteration_order_is_stable() {
    let first: Vec<Permission> = all_permissions().iter().collect();
    let second: Vec<Permission> = all_permissions().iter().collect();
    assert_eq!(first, second);
}

#[test]
fn insertion_order_does_not_leak_into_iteration() {
    let set: PermissionSet = [
        Permission::ManageSettings,
        Permission::ManageScholars,
        Permission::ManagePayments,
    ]
    .into_iter()
    .collect();
    assert_eq!(
        set.to_vec(),
        vec![
            Permission::ManageScholars,
            Permission::ManagePayments,
            Permission::ManageSettings
        ]
    );
}

#[test]
fn toggling_twice_restores_the_set() {
    let set = PermissionSet::from_slice(&[Permission::ManageUsers]);
    let toggled = set.toggled(Permission::ManageSponsors);
    assert!(toggled.contains(Permission::ManageSponsors));
    assert_eq!(toggled.toggled(Permission::ManageSponsors), set);
    assert!(set.without(Permission::ManageUsers).is_empty());
}

#[test]
fn subset_relations() {
    let small = PermissionSet::from_slice(&[Permission::ManageScholars]);
    assert!(small.is_subset(PermissionSet::ALL));
    assert!(small.is_strict_subset(PermissionSet::ALL));
    assert!(PermissionSet::ALL.is_subset(PermissionSet::ALL));
    assert!(!PermissionSet::ALL.is_strict_subset(PermissionSet::ALL));
    assert!(PermissionSet::empty().is_subset(small));
}

#[test]
fn string_to_permissions() {
    for permission in Permission::VARIANTS {
        assert_eq!(Permission::try_from(permission.as_str()).unwrap(), *permission);
        assert_eq!(permission.to_string(), permission.as_str());
    }
    assert!(Permission::try_from("scholars").is_err());
    assert!(Permission::try_from("BILLING").is_err());
}

#[test]
fn permission_sets_serialize_as_wire_names() {
    let set = PermissionSet::from_slice(&[
        Permission::ManageSettings,
        Permission::ManageDocumentVerifications,
    ]);
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, r#"["DOC_VERIFICATIONS","SETTINGS"]"#);
    let parsed: PermissionSet = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, set);
    assert!(serde_json::from_str::<PermissionSet>(r#"["NUKE"]"#).is_err());
}
