//! Club roster domain model.
//!
//! # Responsibility
//! - Define the season/team/person hierarchy, user accounts and attendance
//!   marks shared by every core layer.
//! - Hold the whole application state in one explicit `RosterState` value.
//!
//! # Invariants
//! - Seasons own teams and teams own people; there are no shared children.
//! - Collection order is insertion order and is never re-sorted implicitly.
//! - Identifiers are opaque strings and never reused for another entity.

pub mod attendance;
pub mod season;
pub mod state;
pub mod user;

use uuid::Uuid;

/// Generates a fresh opaque identifier of shape `<prefix>-<uuid v4>`.
///
/// The prefix only aids readability of stored data; callers must not parse it.
pub fn new_entity_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}
