//! User account commands.
//!
//! Usernames are not required to be unique; a duplicate is accepted and
//! reported through a `warn` event. `authenticate` returns the first match.

use super::{require_text, Applied, MutationError, MutationResult};
use crate::model::state::RosterState;
use crate::model::user::{User, UserRole};
use crate::store::{ChangeSet, RecordKey};
use log::warn;

pub(super) fn add_user(
    state: &RosterState,
    username: &str,
    password: &str,
    role: UserRole,
) -> MutationResult<Applied> {
    require_text(username, MutationError::EmptyUsername)?;
    require_text(password, MutationError::EmptyPassword)?;

    let user = User::new(username, password, role);
    warn_on_duplicate(state, &user);
    let user_id = user.id.clone();
    let mut next = state.clone();
    next.users.push(user);
    Ok(Applied::created(
        next,
        ChangeSet::only(RecordKey::Users),
        user_id,
    ))
}

/// Replaces username and role; a blank `password` keeps the stored password.
pub(super) fn update_user(
    state: &RosterState,
    user_id: &str,
    username: &str,
    password: &str,
    role: UserRole,
) -> MutationResult<Applied> {
    require_text(username, MutationError::EmptyUsername)?;

    let Some(index) = state.users.iter().position(|user| user.id == user_id) else {
        return Ok(Applied::unchanged(state));
    };

    let current = &state.users[index];
    let updated = User {
        id: current.id.clone(),
        username: username.to_string(),
        password: if password.trim().is_empty() {
            current.password.clone()
        } else {
            password.to_string()
        },
        role,
    };
    if &updated == current {
        return Ok(Applied::unchanged(state));
    }
    if updated.username != current.username {
        warn_on_duplicate(state, &updated);
    }

    let mut next = state.clone();
    next.users[index] = updated;
    Ok(Applied::changed(next, ChangeSet::only(RecordKey::Users)))
}

pub(super) fn delete_user(state: &RosterState, user_id: &str) -> Applied {
    let Some(index) = state.users.iter().position(|user| user.id == user_id) else {
        return Applied::unchanged(state);
    };

    let mut next = state.clone();
    next.users.remove(index);
    Applied::changed(next, ChangeSet::only(RecordKey::Users))
}

fn warn_on_duplicate(state: &RosterState, candidate: &User) {
    let duplicate = state
        .users
        .iter()
        .any(|user| user.id != candidate.id && user.username == candidate.username);
    if duplicate {
        warn!(
            "event=user_duplicate module=mutation status=accepted user_id={}",
            candidate.id
        );
    }
}
