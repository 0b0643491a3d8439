//! Season, team and person records.
//!
//! # Invariants
//! - A `Team` lives in exactly one `Season::teams`.
//! - A `Person` lives in exactly one `Team::people`.

use super::new_entity_id;
use serde::{Deserialize, Serialize};

pub type SeasonId = String;
pub type TeamId = String;
pub type PersonId = String;

/// Role a person plays inside a team roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    #[serde(alias = "Jugador")]
    Player,
    #[serde(alias = "Entrenador")]
    Coach,
}

impl PersonRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Coach => "coach",
        }
    }
}

/// One player or coach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub role: PersonRole,
}

impl Person {
    /// Creates a person with a freshly generated id.
    pub fn new(name: impl Into<String>, role: PersonRole) -> Self {
        Self {
            id: new_entity_id("person"),
            name: name.into(),
            role,
        }
    }
}

/// Roster grouping inside one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Display order is insertion order.
    #[serde(default)]
    pub people: Vec<Person>,
}

impl Team {
    /// Creates an empty team with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id("team"),
            name: name.into(),
            people: Vec::new(),
        }
    }

    /// Counts people holding `role`.
    pub fn count_role(&self, role: PersonRole) -> usize {
        self.people.iter().filter(|person| person.role == role).count()
    }
}

/// Competitive period owning its teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub name: String,
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl Season {
    /// Creates an empty season with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id("season"),
            name: name.into(),
            teams: Vec::new(),
        }
    }

    pub fn find_team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == team_id)
    }

    /// Iterates every person of every team, in display order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.teams.iter().flat_map(|team| team.people.iter())
    }
}
