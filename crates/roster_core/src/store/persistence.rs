//! State <-> record conversion with default fallbacks.
//!
//! # Invariants
//! - A record that is missing, unreadable or corrupt loads as its default:
//!   seed seasons, seed users, empty attendance, no active season.
//! - Fallbacks never propagate errors to callers; they are logged instead.
//! - `persist_changes` writes each flagged record exactly once.

use super::{ChangeSet, RecordKey, RecordStore, StoreError, StoreResult};
use crate::model::attendance::AttendanceRecord;
use crate::model::state::RosterState;
use crate::seed::{seed_seasons, seed_users};
use log::{debug, warn};
use serde::de::DeserializeOwned;

/// Result of the startup load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedState {
    /// Normalized state ready for use.
    pub state: RosterState,
    /// Records absent from the store (first run for that record).
    pub missing: ChangeSet,
    /// Records present but unreadable; their defaults are in `state`.
    pub corrupt: ChangeSet,
    /// Whether the active season pointer was repaired during load.
    pub active_season_repaired: bool,
}

impl LoadedState {
    /// Records that should be written back so the store matches `state`.
    ///
    /// Corrupt records are left untouched until a later change overwrites them.
    /// A repaired active pointer is only written back when both it and the
    /// seasons it was checked against were read intact.
    pub fn records_to_persist(&self) -> ChangeSet {
        let mut changes = self.missing;
        let pointer_trusted = !self.corrupt.contains(RecordKey::Seasons)
            && !self.corrupt.contains(RecordKey::ActiveSeasonId);
        if self.active_season_repaired && pointer_trusted {
            changes.mark(RecordKey::ActiveSeasonId);
        }
        changes
    }
}

enum Fallback {
    None,
    Missing,
    Corrupt,
}

/// Loads all four records and normalizes the active season pointer.
pub fn load_state<S: RecordStore + ?Sized>(store: &S) -> LoadedState {
    let mut missing = ChangeSet::none();
    let mut corrupt = ChangeSet::none();
    let mut track = |key: RecordKey, fallback: Fallback| match fallback {
        Fallback::None => {}
        Fallback::Missing => missing.mark(key),
        Fallback::Corrupt => corrupt.mark(key),
    };

    let (seasons, fallback) = load_record(store, RecordKey::Seasons, seed_seasons);
    track(RecordKey::Seasons, fallback);
    let (attendance, fallback) = load_record(store, RecordKey::Attendance, AttendanceRecord::new);
    track(RecordKey::Attendance, fallback);
    let (users, fallback) = load_record(store, RecordKey::Users, seed_users);
    track(RecordKey::Users, fallback);
    let (active_season_id, fallback) =
        load_record::<Option<String>, _>(store, RecordKey::ActiveSeasonId, || None);
    track(RecordKey::ActiveSeasonId, fallback);

    let mut state = RosterState {
        seasons,
        attendance,
        users,
        active_season_id,
    };
    let active_season_repaired = state.normalize_active_season();

    LoadedState {
        state,
        missing,
        corrupt,
        active_season_repaired,
    }
}

fn load_record<T, S>(store: &S, key: RecordKey, default: impl FnOnce() -> T) -> (T, Fallback)
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    match store.read_record(key) {
        Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
            Ok(value) => (value, Fallback::None),
            Err(err) => {
                warn!(
                    "event=record_load module=store status=fallback record={} reason=corrupt error={}",
                    key, err
                );
                (default(), Fallback::Corrupt)
            }
        },
        Ok(None) => {
            debug!(
                "event=record_load module=store status=fallback record={} reason=missing",
                key
            );
            (default(), Fallback::Missing)
        }
        Err(err) => {
            warn!(
                "event=record_load module=store status=fallback record={} reason=unavailable error={}",
                key, err
            );
            (default(), Fallback::Corrupt)
        }
    }
}

/// Serializes one record from `state` and overwrites it in `store`.
pub fn save_record<S: RecordStore + ?Sized>(
    store: &S,
    key: RecordKey,
    state: &RosterState,
) -> StoreResult<()> {
    let json = match key {
        RecordKey::Seasons => serde_json::to_string(&state.seasons),
        RecordKey::Attendance => serde_json::to_string(&state.attendance),
        RecordKey::Users => serde_json::to_string(&state.users),
        RecordKey::ActiveSeasonId => serde_json::to_string(&state.active_season_id),
    }
    .map_err(|source| StoreError::Serialize { key, source })?;

    store.write_record(key, &json)
}

/// Writes every record flagged in `changes`.
///
/// All flagged records are attempted; the first failure is returned.
pub fn persist_changes<S: RecordStore + ?Sized>(
    store: &S,
    state: &RosterState,
    changes: ChangeSet,
) -> StoreResult<()> {
    let mut first_error = None;
    for key in changes.keys() {
        if let Err(err) = save_record(store, key, state) {
            warn!(
                "event=record_save module=store status=error record={} error={}",
                key, err
            );
            first_error.get_or_insert(err);
        }
    }
    first_error.map_or(Ok(()), Err)
}
