//! Roster use-case service.
//!
//! # Responsibility
//! - Load state once from a `RecordStore` and keep it in memory.
//! - Apply commands through the mutation layer and persist each change.
//! - Hold the login session and gate admin-only commands.
//!
//! # Invariants
//! - Every applied command writes exactly the records it changed.
//! - A failed write keeps the new in-memory state and reports the error.
//! - Commands rejected by validation or gating leave state untouched.

use crate::model::season::Season;
use crate::model::state::RosterState;
use crate::model::user::User;
use crate::mutation::{apply, MutationError, RosterCommand};
use crate::session::{Session, SessionError};
use crate::stats::{season_attendance, DateRange, TeamAttendance};
use crate::store::{load_state, persist_changes, ChangeSet, RecordStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

#[derive(Debug)]
pub enum ServiceError {
    Mutation(MutationError),
    Session(SessionError),
    /// State changed in memory but could not be persisted.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mutation(err) => write!(f, "{err}"),
            Self::Session(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "change applied but not saved: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Mutation(err) => Some(err),
            Self::Session(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<MutationError> for ServiceError {
    fn from(value: MutationError) -> Self {
        Self::Mutation(value)
    }
}

impl From<SessionError> for ServiceError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// What one executed command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub changes: ChangeSet,
    pub created_id: Option<String>,
}

/// Controller-facing facade over state, store and session.
pub struct RosterService<S: RecordStore> {
    store: S,
    state: RosterState,
    session: Session,
}

impl<S: RecordStore> RosterService<S> {
    /// Loads state from `store`, writing back defaults for records that were
    /// missing and a repaired active season pointer.
    ///
    /// Never fails: unreadable records degrade to defaults.
    pub fn open(store: S) -> Self {
        let started_at = Instant::now();
        let loaded = load_state(&store);
        let writeback = loaded.records_to_persist();
        if let Err(err) = persist_changes(&store, &loaded.state, writeback) {
            warn!(
                "event=state_load module=service status=degraded writeback={} error={}",
                writeback, err
            );
        }
        info!(
            "event=state_load module=service status=ok seasons={} users={} missing={} corrupt={} duration_ms={}",
            loaded.state.seasons.len(),
            loaded.state.users.len(),
            loaded.missing,
            loaded.corrupt,
            started_at.elapsed().as_millis()
        );

        Self {
            store,
            state: loaded.state,
            session: Session::new(),
        }
    }

    pub fn state(&self) -> &RosterState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<&User, ServiceError> {
        Ok(self.session.login(&self.state.users, username, password)?)
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    pub fn active_season(&self) -> Option<&Season> {
        self.state.active_season()
    }

    /// Applies `command` without checking the session.
    pub fn execute(&mut self, command: RosterCommand) -> Result<CommandOutcome, ServiceError> {
        let applied = match apply(&self.state, &command) {
            Ok(applied) => applied,
            Err(err) => {
                info!(
                    "event=command_apply module=service status=rejected command={} reason={}",
                    command.name(),
                    err
                );
                return Err(err.into());
            }
        };

        let outcome = CommandOutcome {
            changes: applied.changes,
            created_id: applied.created_id,
        };
        if outcome.changes.is_empty() {
            info!(
                "event=command_apply module=service status=noop command={}",
                command.name()
            );
            return Ok(outcome);
        }

        self.state = applied.state;
        if outcome.changes.users {
            self.session.refresh(&self.state.users);
        }
        let saved = persist_changes(&self.store, &self.state, outcome.changes);
        info!(
            "event=command_apply module=service status={} command={} changes={}",
            if saved.is_ok() { "ok" } else { "unsaved" },
            command.name(),
            outcome.changes
        );
        saved?;
        Ok(outcome)
    }

    /// Applies `command` on behalf of the logged-in user.
    ///
    /// # Errors
    /// - `SessionError::NotAuthenticated` when nobody is logged in.
    /// - `SessionError::AdminRequired` for user management by a coach.
    pub fn execute_authorized(
        &mut self,
        command: RosterCommand,
    ) -> Result<CommandOutcome, ServiceError> {
        let gate = if command.requires_admin() {
            self.session.require_admin()
        } else {
            self.session.require_user()
        };
        if let Err(err) = gate {
            warn!(
                "event=command_apply module=service status=denied command={} reason={:?}",
                command.name(),
                err
            );
            return Err(err.into());
        }
        self.execute(command)
    }

    /// Attendance statistics for `season_id`, or the active season when `None`.
    pub fn season_attendance(
        &self,
        season_id: Option<&str>,
        range: &DateRange,
    ) -> Option<Vec<TeamAttendance>> {
        let season = match season_id {
            Some(season_id) => self.state.find_season(season_id),
            None => self.state.active_season(),
        }?;
        Some(season_attendance(season, &self.state.attendance, range))
    }
}
