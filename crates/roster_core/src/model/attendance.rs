//! Per-date attendance marks.
//!
//! # Invariants
//! - Keys are `date -> person_id -> status`; there is at most one status per
//!   `(date, person_id)` cell.
//! - Person ids are not checked against the roster. Entries for deleted people
//!   stay until cleaned up separately.

use super::season::PersonId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attendance mark for one person on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[serde(alias = "Presente")]
    Present,
    #[serde(alias = "Ausente")]
    Absent,
    /// Absent with a valid excuse.
    #[serde(alias = "Justificado")]
    Justified,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Justified => "justified",
        }
    }
}

/// Marks recorded on one date, keyed by person id.
pub type DayAttendance = BTreeMap<PersonId, AttendanceStatus>;

/// Two-level attendance mapping persisted as one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttendanceRecord {
    days: BTreeMap<String, DayAttendance>,
}

impl AttendanceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Reads one cell.
    pub fn status(&self, date: &str, person_id: &str) -> Option<AttendanceStatus> {
        self.days
            .get(date)
            .and_then(|day| day.get(person_id))
            .copied()
    }

    /// Writes one cell, creating the date entry when absent.
    ///
    /// Returns `false` when the cell already held `status`.
    pub fn set_status(
        &mut self,
        date: impl Into<String>,
        person_id: impl Into<PersonId>,
        status: AttendanceStatus,
    ) -> bool {
        let day = self.days.entry(date.into()).or_default();
        day.insert(person_id.into(), status) != Some(status)
    }

    pub fn day(&self, date: &str) -> Option<&DayAttendance> {
        self.days.get(date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DayAttendance)> {
        self.days.iter().map(|(date, day)| (date.as_str(), day))
    }

    /// Returns whether any date holds a mark for `person_id`.
    pub fn mentions_person(&self, person_id: &str) -> bool {
        self.days.values().any(|day| day.contains_key(person_id))
    }
}
