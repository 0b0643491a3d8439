//! First-run seed data.
//!
//! Used by the persistence layer when the store holds no `seasons` or `users`
//! record yet. Seed ids are fixed so repeated first runs produce identical
//! state.

use crate::model::season::{Person, PersonRole, Season, Team};
use crate::model::user::{User, UserRole};

const SEED_SEASON_ID: &str = "season-2023-2024";
const SEED_SEASON_NAME: &str = "Temporada 2023-2024";

/// `(team id, team name, person id prefix, coach, players)`
const SEED_TEAMS: &[(&str, &str, &str, &str, [&str; 5])] = &[
    (
        "s2324-u11",
        "Mini M U11",
        "p-u11",
        "Coach Alex",
        ["Pau López", "Marc Soler", "Jordi Puig", "Leo Vidal", "Biel Roca"],
    ),
    (
        "s2324-u12",
        "Mini M U12",
        "p-u12",
        "Coach Sara",
        ["Nil Garcia", "Adrià Font", "Sergi Martí", "Hugo Costa", "Izan Romero"],
    ),
    (
        "s2324-u16",
        "Cadet F U16",
        "p-u16",
        "Coach Laura",
        ["Aina Pérez", "Martina Ruiz", "Carla Giménez", "Júlia Moreno", "Ona Castillo"],
    ),
    (
        "s2324-u25",
        "U25 F",
        "p-u25",
        "Coach David",
        ["Sofia Navarro", "Paula Ramos", "Elena Torres", "Lucía Sanz", "Marta Vicente"],
    ),
];

/// Seed roster: one season with four teams of one coach and five players.
pub fn seed_seasons() -> Vec<Season> {
    let teams = SEED_TEAMS
        .iter()
        .map(|(team_id, team_name, prefix, coach, players)| {
            let mut people = Vec::with_capacity(players.len() + 1);
            people.push(Person {
                id: format!("{prefix}-c1"),
                name: (*coach).to_string(),
                role: PersonRole::Coach,
            });
            people.extend(players.iter().enumerate().map(|(index, name)| Person {
                id: format!("{prefix}-p{}", index + 1),
                name: (*name).to_string(),
                role: PersonRole::Player,
            }));
            Team {
                id: (*team_id).to_string(),
                name: (*team_name).to_string(),
                people,
            }
        })
        .collect();

    vec![Season {
        id: SEED_SEASON_ID.to_string(),
        name: SEED_SEASON_NAME.to_string(),
        teams,
    }]
}

/// Seed accounts: one admin and one coach.
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: "user-admin".to_string(),
            username: "admin".to_string(),
            password: "password".to_string(),
            role: UserRole::Admin,
        },
        User {
            id: "user-coach".to_string(),
            username: "coach".to_string(),
            password: "password".to_string(),
            role: UserRole::Coach,
        },
    ]
}
