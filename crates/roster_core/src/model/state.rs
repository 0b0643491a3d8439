//! Whole application state.
//!
//! # Responsibility
//! - Carry the four persisted records through mutation and persistence layers
//!   as one explicit value instead of ambient globals.
//!
//! # Invariants
//! - `active_season_id`, when set, names a season in `seasons`.
//! - `active_season_id` is `None` only when `seasons` is empty.

use super::attendance::AttendanceRecord;
use super::season::{Season, SeasonId};
use super::user::User;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterState {
    pub seasons: Vec<Season>,
    pub attendance: AttendanceRecord,
    pub users: Vec<User>,
    pub active_season_id: Option<SeasonId>,
}

impl RosterState {
    pub fn find_season(&self, season_id: &str) -> Option<&Season> {
        self.seasons.iter().find(|season| season.id == season_id)
    }

    /// Season currently selected for attendance entry and statistics.
    pub fn active_season(&self) -> Option<&Season> {
        self.active_season_id
            .as_deref()
            .and_then(|season_id| self.find_season(season_id))
    }

    pub fn find_user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == user_id)
    }

    /// Repairs the active pointer after load or deletion.
    ///
    /// A missing or dangling pointer falls back to the first season, or to
    /// `None` when no season remains. Returns whether the pointer changed.
    pub fn normalize_active_season(&mut self) -> bool {
        let is_valid = self
            .active_season_id
            .as_deref()
            .is_some_and(|season_id| self.find_season(season_id).is_some());
        if is_valid {
            return false;
        }

        let fallback = self.seasons.first().map(|season| season.id.clone());
        if fallback == self.active_season_id {
            return false;
        }
        self.active_season_id = fallback;
        true
    }
}
