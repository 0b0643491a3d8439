//! Core domain logic for the club roster and attendance tracker.
//! This crate is the single source of truth for roster invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod mutation;
pub mod seed;
pub mod service;
pub mod session;
pub mod stats;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::attendance::{AttendanceRecord, AttendanceStatus};
pub use model::season::{Person, PersonId, PersonRole, Season, SeasonId, Team, TeamId};
pub use model::state::RosterState;
pub use model::user::{User, UserId, UserRole};
pub use mutation::{apply, Applied, MutationError, MutationResult, RosterCommand};
pub use service::roster_service::{CommandOutcome, RosterService, ServiceError};
pub use session::{authenticate, Session, SessionError};
pub use stats::{
    dates_recorded, season_attendance, AttendanceTally, DateRange, PersonAttendance, StatsError,
    TeamAttendance,
};
pub use store::{
    ChangeSet, MemoryRecordStore, RecordKey, RecordStore, SqliteRecordStore, StoreError,
    StoreResult,
};

/// Minimal health check used by `roster ping`.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
