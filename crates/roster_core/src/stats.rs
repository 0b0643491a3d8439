//! Attendance statistics for one season.
//!
//! # Responsibility
//! - Aggregate attendance marks per person and per team.
//! - Restrict aggregation to an optional inclusive date range.
//!
//! # Invariants
//! - Only people currently on the season roster are counted; marks left
//!   behind by deleted people are ignored.
//! - Output follows roster display order.

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::season::{PersonId, PersonRole, Season, TeamId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});

/// Returns whether `value` has the `YYYY-MM-DD` shape used for date keys.
pub fn is_iso_date(value: &str) -> bool {
    ISO_DATE_RE.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    InvalidDate(String),
    /// `from` is later than `to`.
    EmptyRange { from: String, to: String },
}

impl Display for StatsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`; expected YYYY-MM-DD"),
            Self::EmptyRange { from, to } => write!(f, "date range {from}..{to} is empty"),
        }
    }
}

impl Error for StatsError {}

/// Inclusive date range; open ends are unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<String>,
    to: Option<String>,
}

impl DateRange {
    /// Range covering every date key.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(from: Option<&str>, to: Option<&str>) -> Result<Self, StatsError> {
        for bound in [from, to].into_iter().flatten() {
            if !is_iso_date(bound) {
                return Err(StatsError::InvalidDate(bound.to_string()));
            }
        }
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(StatsError::EmptyRange {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }
        Ok(Self {
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// ISO dates compare correctly as strings.
    pub fn contains(&self, date: &str) -> bool {
        if self.is_unbounded() {
            return true;
        }
        if !is_iso_date(date) {
            return false;
        }
        self.from.as_deref().map_or(true, |from| date >= from)
            && self.to.as_deref().map_or(true, |to| date <= to)
    }
}

/// Status counts for one person or one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceTally {
    pub present: u32,
    pub absent: u32,
    pub justified: u32,
}

impl AttendanceTally {
    fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Justified => self.justified += 1,
        }
    }

    fn add(&mut self, other: &Self) {
        self.present += other.present;
        self.absent += other.absent;
        self.justified += other.justified;
    }

    pub fn total(&self) -> u32 {
        self.present + self.absent + self.justified
    }

    /// Share of marks that are `Present`, in `0.0..=1.0`; `None` without marks.
    pub fn attendance_rate(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(f64::from(self.present) / f64::from(total)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonAttendance {
    pub person_id: PersonId,
    pub name: String,
    pub role: PersonRole,
    pub tally: AttendanceTally,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamAttendance {
    pub team_id: TeamId,
    pub name: String,
    pub people: Vec<PersonAttendance>,
    pub totals: AttendanceTally,
}

/// Aggregates `attendance` for every team of `season` within `range`.
pub fn season_attendance(
    season: &Season,
    attendance: &AttendanceRecord,
    range: &DateRange,
) -> Vec<TeamAttendance> {
    let mut tallies: HashMap<&str, AttendanceTally> = HashMap::new();
    for (date, day) in attendance.iter() {
        if !range.contains(date) {
            continue;
        }
        for (person_id, status) in day {
            tallies.entry(person_id.as_str()).or_default().record(*status);
        }
    }

    season
        .teams
        .iter()
        .map(|team| {
            let mut totals = AttendanceTally::default();
            let people = team
                .people
                .iter()
                .map(|person| {
                    let tally = tallies.get(person.id.as_str()).copied().unwrap_or_default();
                    totals.add(&tally);
                    PersonAttendance {
                        person_id: person.id.clone(),
                        name: person.name.clone(),
                        role: person.role,
                        tally,
                    }
                })
                .collect();
            TeamAttendance {
                team_id: team.id.clone(),
                name: team.name.clone(),
                people,
                totals,
            }
        })
        .collect()
}

/// Date keys holding at least one mark, ascending.
pub fn dates_recorded(attendance: &AttendanceRecord) -> Vec<String> {
    attendance
        .iter()
        .filter(|(_, day)| !day.is_empty())
        .map(|(date, _)| date.to_string())
        .collect()
}
