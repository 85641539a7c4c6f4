//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Account role, fixed at creation.
///
/// Wire format: lowercase string (`"customer"`, `"employee"`, `"admin"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Employee,
    Admin,
}

impl UserRole {
    pub const ALL: [Self; 3] = [Self::Customer, Self::Employee, Self::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Employee => "employee",
            Self::Admin => "admin",
        }
    }

    /// Capabilities granted to this role. Roles do not form a hierarchy.
    pub fn capabilities(self) -> Capabilities {
        Capabilities {
            is_admin: matches!(self, Self::Admin),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                UnknownVariant::new("role", s, &Self::ALL.map(UserRole::as_str))
            })
    }
}

/// What an authenticated caller is allowed to do beyond their own data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Read and write data belonging to any user; manage the catalog and claim status.
    pub is_admin: bool,
}

/// A capability that an endpoint can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Admin,
}

impl Capabilities {
    pub fn grants(self, required: Capability) -> bool {
        match required {
            Capability::Admin => self.is_admin,
        }
    }
}
