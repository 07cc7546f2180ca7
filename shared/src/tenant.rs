//! Tenant discriminators
//!
//! Every tenant-owned record carries a `business_id` plus a [`BusinessType`].
//! On the wire (JSON, session cookie, database) the kind is lowercase
//! (`"hotel"`), in GraphQL it is an enum (`HOTEL`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of business a tenant is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Hotel,
    Restaurant,
    Salon,
}

impl BusinessType {
    pub const ALL: [BusinessType; 3] = [Self::Hotel, Self::Restaurant, Self::Salon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Restaurant => "restaurant",
            Self::Salon => "salon",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known business type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown business type: {0}")]
pub struct UnknownBusinessType(pub String);

impl FromStr for BusinessType {
    type Err = UnknownBusinessType;

    /// Case-insensitive: accepts `hotel`, `Hotel` and `HOTEL`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hotel" => Ok(Self::Hotel),
            "restaurant" => Ok(Self::Restaurant),
            "salon" => Ok(Self::Salon),
            _ => Err(UnknownBusinessType(s.to_string())),
        }
    }
}

/// Platform role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "graphql", derive(async_graphql::Enum))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Staff,
    Customer,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Staff => "staff",
            Self::Customer => "customer",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
