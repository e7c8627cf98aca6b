//! User entity - an account that uploads resources or moderates them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::Viewer;
use crate::value_objects::Snowflake;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Storage representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Parse the storage representation, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "USER" => Some(Self::User),
            "ADMIN" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// A registered account
///
/// The password hash is not part of the entity; only the auth service and
/// the user repository handle it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    /// Stored lower-cased; unique
    pub username: String,
    /// Stored lower-cased; unique
    pub email: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a fresh, unverified, non-admin account
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            role: UserRole::User,
            email_verified: false,
            is_banned: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Identity handed to the access policy
    pub fn viewer(&self) -> Viewer {
        Viewer::new(self.id, self.role)
    }
}

/// User row for the admin listing
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub user: User,
    pub resource_count: i64,
}
