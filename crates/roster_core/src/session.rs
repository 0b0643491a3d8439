//! Login session and admin gating.
//!
//! # Responsibility
//! - Match credentials against the user list.
//! - Track the logged-in user for one process.
//!
//! # Invariants
//! - Matching is exact and case-sensitive on both username and password.
//! - Failed logins never reveal whether the username exists.
//! - Gating is advisory: it guards the service entry point, not the store.

use crate::model::user::User;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Returns the first user whose username and password both match.
pub fn authenticate<'a>(users: &'a [User], username: &str, password: &str) -> Option<&'a User> {
    users
        .iter()
        .find(|user| user.username == username && user.password == password)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Unknown username or wrong password; deliberately indistinguishable.
    InvalidCredentials,
    NotAuthenticated,
    AdminRequired,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid username or password"),
            Self::NotAuthenticated => write!(f, "no user is logged in"),
            Self::AdminRequired => write!(f, "operation requires an admin account"),
        }
    }
}

impl Error for SessionError {}

/// Current login state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs in on an exact credential match; a failed attempt keeps the
    /// previous session untouched.
    pub fn login(
        &mut self,
        users: &[User],
        username: &str,
        password: &str,
    ) -> Result<&User, SessionError> {
        let Some(user) = authenticate(users, username, password) else {
            warn!("event=login module=session status=denied");
            return Err(SessionError::InvalidCredentials);
        };
        info!(
            "event=login module=session status=ok user_id={} role={}",
            user.id,
            user.role.as_str()
        );
        Ok(self.current_user.insert(user.clone()))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!("event=logout module=session status=ok user_id={}", user.id);
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current_user.as_ref().is_some_and(User::is_admin)
    }

    pub fn require_user(&self) -> Result<&User, SessionError> {
        self.current_user
            .as_ref()
            .ok_or(SessionError::NotAuthenticated)
    }

    pub fn require_admin(&self) -> Result<&User, SessionError> {
        let user = self.require_user()?;
        if !user.is_admin() {
            return Err(SessionError::AdminRequired);
        }
        Ok(user)
    }

    /// Drops the session when its user no longer exists in `users`, and
    /// refreshes it when the stored account changed.
    pub fn refresh(&mut self, users: &[User]) {
        let Some(current) = self.current_user.as_ref() else {
            return;
        };
        match users.iter().find(|user| user.id == current.id) {
            Some(user) => self.current_user = Some(user.clone()),
            None => self.logout(),
        }
    }
}
