//! User accounts and privilege levels.
//!
//! Passwords are stored in plaintext. This mirrors the stored layout and is
//! only acceptable for a single-device toy deployment.

use super::new_entity_id;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

pub type UserId = String;

/// Privilege level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// May manage user accounts in addition to roster data.
    Admin,
    Coach,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Coach => "coach",
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

impl User {
    /// Creates a user with a freshly generated id.
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: new_entity_id("user"),
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// Keeps passwords out of `{:?}` output and therefore out of logs.
impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}
