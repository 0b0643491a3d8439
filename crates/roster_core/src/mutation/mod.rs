//! Pure state transitions for roster editing.
//!
//! # Responsibility
//! - Turn one `RosterCommand` into a new `RosterState`.
//! - Report which persisted records the command changed.
//!
//! # Invariants
//! - `apply` never mutates its input; the caller's state is left as is.
//! - Lookup misses are no-ops: the returned state equals the input and the
//!   change set is empty.
//! - Validation failures return `MutationError` and produce no state.
//! - Deleting a season cascades to its teams and people and keeps the active
//!   season pointer valid. Attendance marks are never cleaned up.

mod attendance;
mod seasons;
mod teams;
mod users;

use crate::model::attendance::AttendanceStatus;
use crate::model::season::{PersonId, PersonRole, SeasonId, TeamId};
use crate::model::state::RosterState;
use crate::model::user::{UserId, UserRole};
use crate::store::ChangeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MutationResult<T> = Result<T, MutationError>;

/// One logical edit requested by a controller.
#[derive(Clone, PartialEq, Eq)]
pub enum RosterCommand {
    AddSeason {
        name: String,
    },
    UpdateSeason {
        season_id: SeasonId,
        name: String,
    },
    DeleteSeason {
        season_id: SeasonId,
    },
    SetActiveSeason {
        season_id: SeasonId,
    },
    AddTeam {
        season_id: SeasonId,
        name: String,
    },
    DeleteTeam {
        season_id: SeasonId,
        team_id: TeamId,
    },
    AddPerson {
        season_id: SeasonId,
        team_id: TeamId,
        name: String,
        role: PersonRole,
    },
    DeletePerson {
        season_id: SeasonId,
        team_id: TeamId,
        person_id: PersonId,
    },
    AddUser {
        username: String,
        password: String,
        role: UserRole,
    },
    /// A blank `password` keeps the stored one.
    UpdateUser {
        user_id: UserId,
        username: String,
        password: String,
        role: UserRole,
    },
    DeleteUser {
        user_id: UserId,
    },
    SetAttendance {
        date: String,
        person_id: PersonId,
        status: AttendanceStatus,
    },
}

impl RosterCommand {
    /// Stable command name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddSeason { .. } => "add_season",
            Self::UpdateSeason { .. } => "update_season",
            Self::DeleteSeason { .. } => "delete_season",
            Self::SetActiveSeason { .. } => "set_active_season",
            Self::AddTeam { .. } => "add_team",
            Self::DeleteTeam { .. } => "delete_team",
            Self::AddPerson { .. } => "add_person",
            Self::DeletePerson { .. } => "delete_person",
            Self::AddUser { .. } => "add_user",
            Self::UpdateUser { .. } => "update_user",
            Self::DeleteUser { .. } => "delete_user",
            Self::SetAttendance { .. } => "set_attendance",
        }
    }

    /// User management is reserved for admin sessions.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::AddUser { .. } | Self::UpdateUser { .. } | Self::DeleteUser { .. }
        )
    }
}

// Hand-written so passwords never reach `{:?}` output.
impl std::fmt::Debug for RosterCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddUser { username, role, .. } => f
                .debug_struct("AddUser")
                .field("username", username)
                .field("role", role)
                .finish_non_exhaustive(),
            Self::UpdateUser {
                user_id,
                username,
                role,
                ..
            } => f
                .debug_struct("UpdateUser")
                .field("user_id", user_id)
                .field("username", username)
                .field("role", role)
                .finish_non_exhaustive(),
            other => write!(f, "RosterCommand::{}", other.name()),
        }
    }
}

/// Rejected input. Nothing was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationError {
    EmptySeasonName,
    EmptyTeamName,
    EmptyPersonName,
    EmptyUsername,
    /// New accounts need a non-blank password.
    EmptyPassword,
}

impl Display for MutationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySeasonName => write!(f, "season name must not be blank"),
            Self::EmptyTeamName => write!(f, "team name must not be blank"),
            Self::EmptyPersonName => write!(f, "person name must not be blank"),
            Self::EmptyUsername => write!(f, "username must not be blank"),
            Self::EmptyPassword => write!(f, "password must not be blank for a new user"),
        }
    }
}

impl Error for MutationError {}

/// Outcome of one applied command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub state: RosterState,
    pub changes: ChangeSet,
    /// Id of the entity created by an `Add*` command.
    pub created_id: Option<String>,
}

impl Applied {
    fn unchanged(state: &RosterState) -> Self {
        Self {
            state: state.clone(),
            changes: ChangeSet::none(),
            created_id: None,
        }
    }

    fn changed(state: RosterState, changes: ChangeSet) -> Self {
        Self {
            state,
            changes,
            created_id: None,
        }
    }

    fn created(state: RosterState, changes: ChangeSet, created_id: String) -> Self {
        Self {
            state,
            changes,
            created_id: Some(created_id),
        }
    }
}

/// Applies one command to `state` and returns the resulting state.
pub fn apply(state: &RosterState, command: &RosterCommand) -> MutationResult<Applied> {
    match command {
        RosterCommand::AddSeason { name } => seasons::add_season(state, name),
        RosterCommand::UpdateSeason { season_id, name } => {
            seasons::update_season(state, season_id, name)
        }
        RosterCommand::DeleteSeason { season_id } => Ok(seasons::delete_season(state, season_id)),
        RosterCommand::SetActiveSeason { season_id } => {
            Ok(seasons::set_active_season(state, season_id))
        }
        RosterCommand::AddTeam { season_id, name } => teams::add_team(state, season_id, name),
        RosterCommand::DeleteTeam { season_id, team_id } => {
            Ok(teams::delete_team(state, season_id, team_id))
        }
        RosterCommand::AddPerson {
            season_id,
            team_id,
            name,
            role,
        } => teams::add_person(state, season_id, team_id, name, *role),
        RosterCommand::DeletePerson {
            season_id,
            team_id,
            person_id,
        } => Ok(teams::delete_person(state, season_id, team_id, person_id)),
        RosterCommand::AddUser {
            username,
            password,
            role,
        } => users::add_user(state, username, password, *role),
        RosterCommand::UpdateUser {
            user_id,
            username,
            password,
            role,
        } => users::update_user(state, user_id, username, password, *role),
        RosterCommand::DeleteUser { user_id } => Ok(users::delete_user(state, user_id)),
        RosterCommand::SetAttendance {
            date,
            person_id,
            status,
        } => Ok(attendance::set_attendance(state, date, person_id, *status)),
    }
}

fn require_text(value: &str, error: MutationError) -> MutationResult<()> {
    if value.trim().is_empty() {
        return Err(error);
    }
    Ok(())
}
