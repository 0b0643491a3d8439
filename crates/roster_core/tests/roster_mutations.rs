use roster_core::{
    apply, AttendanceStatus, MutationError, Person, PersonRole, RecordKey, RosterCommand,
    RosterState, Season, Team, UserRole,
};

fn add_season(state: &RosterState, name: &str) -> (RosterState, String) {
    let applied = apply(
        state,
        &RosterCommand::AddSeason {
            name: name.to_string(),
        },
    )
    .unwrap();
    (applied.state, applied.created_id.unwrap())
}

fn delete_season(state: &RosterState, season_id: &str) -> RosterState {
    apply(
        state,
        &RosterCommand::DeleteSeason {
            season_id: season_id.to_string(),
        },
    )
    .unwrap()
    .state
}

fn assert_active_pointer_valid(state: &RosterState) {
    match state.active_season_id.as_deref() {
        None => assert!(state.seasons.is_empty()),
        Some(season_id) => assert!(state.find_season(season_id).is_some()),
    }
}

/// One season "2023-2024" with team "U11": one coach and five players.
fn u11_fixture() -> (RosterState, String, String, Vec<String>) {
    let mut team = Team::new("U11");
    team.people.push(Person::new("Coach Alex", PersonRole::Coach));
    for name in ["Pau", "Marc", "Jordi", "Leo", "Biel"] {
        team.people.push(Person::new(name, PersonRole::Player));
    }
    let player_ids: Vec<String> = team.people[1..].iter().map(|p| p.id.clone()).collect();
    let team_id = team.id.clone();

    let mut season = Season::new("2023-2024");
    season.teams.push(team);
    let season_id = season.id.clone();

    let mut state = RosterState {
        seasons: vec![season],
        active_season_id: Some(season_id.clone()),
        ..RosterState::default()
    };
    for player_id in &player_ids {
        state
            .attendance
            .set_status("2024-01-15", player_id.clone(), AttendanceStatus::Present);
    }
    (state, season_id, team_id, player_ids)
}

#[test]
fn first_season_becomes_active() {
    let (state, season_id) = add_season(&RosterState::default(), "2024-2025");

    assert_eq!(state.seasons.len(), 1);
    assert_eq!(state.seasons[0].name, "2024-2025");
    assert!(state.seasons[0].teams.is_empty());
    assert_eq!(state.active_season_id.as_deref(), Some(season_id.as_str()));
}

#[test]
fn later_seasons_do_not_steal_active_pointer() {
    let (state, first_id) = add_season(&RosterState::default(), "A");
    let applied = apply(
        &state,
        &RosterCommand::AddSeason {
            name: "B".to_string(),
        },
    )
    .unwrap();

    assert_eq!(applied.state.active_season_id.as_deref(), Some(first_id.as_str()));
    assert!(applied.changes.contains(RecordKey::Seasons));
    assert!(!applied.changes.contains(RecordKey::ActiveSeasonId));
}

#[test]
fn active_pointer_stays_valid_across_add_delete_sequences() {
    let mut state = RosterState::default();
    let mut ids = Vec::new();
    for name in ["A", "B", "C", "D"] {
        let (next, id) = add_season(&state, name);
        state = next;
        ids.push(id);
        assert_active_pointer_valid(&state);
    }

    for id in [&ids[0], &ids[2], &ids[3], &ids[1]] {
        state = delete_season(&state, id);
        assert_active_pointer_valid(&state);
    }
    assert!(state.seasons.is_empty());
    assert!(state.active_season_id.is_none());

    let (state, id) = add_season(&state, "E");
    assert_eq!(state.active_season_id.as_deref(), Some(id.as_str()));
}

#[test]
fn deleting_active_season_moves_pointer_to_first_remaining() {
    let (state, a) = add_season(&RosterState::default(), "A");
    let (state, b) = add_season(&state, "B");
    let (state, c) = add_season(&state, "C");
    let state = apply(&state, &RosterCommand::SetActiveSeason { season_id: c.clone() })
        .unwrap()
        .state;

    let applied = apply(&state, &RosterCommand::DeleteSeason { season_id: c }).unwrap();
    assert_eq!(applied.state.active_season_id.as_deref(), Some(a.as_str()));
    assert!(applied.changes.contains(RecordKey::ActiveSeasonId));

    let applied = apply(&applied.state, &RosterCommand::DeleteSeason { season_id: b }).unwrap();
    assert_eq!(applied.state.active_season_id.as_deref(), Some(a.as_str()));
    assert!(!applied.changes.contains(RecordKey::ActiveSeasonId));
}

#[test]
fn deleting_season_leaves_other_seasons_identical() {
    let (state, keep_id) = add_season(&RosterState::default(), "Keep");
    let (state, drop_id) = add_season(&state, "Drop");
    let state = apply(
        &state,
        &RosterCommand::AddTeam {
            season_id: keep_id.clone(),
            name: "U12".to_string(),
        },
    )
    .unwrap()
    .state;
    let state = apply(
        &state,
        &RosterCommand::AddTeam {
            season_id: drop_id.clone(),
            name: "U14".to_string(),
        },
    )
    .unwrap()
    .state;
    let kept_before = state.find_season(&keep_id).unwrap().clone();
    let kept_json = serde_json::to_string(&kept_before).unwrap();

    let next = delete_season(&state, &drop_id);
    assert!(next.find_season(&drop_id).is_none());
    let kept_after = next.find_season(&keep_id).unwrap();
    assert_eq!(serde_json::to_string(kept_after).unwrap(), kept_json);
}

#[test]
fn delete_team_keeps_season_and_stale_attendance() {
    let (state, season_id, team_id, player_ids) = u11_fixture();

    let applied = apply(
        &state,
        &RosterCommand::DeleteTeam {
            season_id: season_id.clone(),
            team_id,
        },
    )
    .unwrap();

    let season = applied.state.find_season(&season_id).unwrap();
    assert!(season.teams.is_empty());
    assert_eq!(applied.state.attendance, state.attendance);
    for player_id in &player_ids {
        assert!(applied.state.attendance.mentions_person(player_id));
    }
    assert!(!applied.changes.contains(RecordKey::Attendance));
}

#[test]
fn delete_team_removes_only_its_own_people() {
    let (state, season_id, u11_id, _) = u11_fixture();
    let applied = apply(
        &state,
        &RosterCommand::AddTeam {
            season_id: season_id.clone(),
            name: "U12".to_string(),
        },
    )
    .unwrap();
    let u12_id = applied.created_id.unwrap();
    let state = apply(
        &applied.state,
        &RosterCommand::AddPerson {
            season_id: season_id.clone(),
            team_id: u12_id.clone(),
            name: "Nil".to_string(),
            role: PersonRole::Player,
        },
    )
    .unwrap()
    .state;
    let u12_before = state.find_season(&season_id).unwrap().find_team(&u12_id).unwrap().clone();

    let next = apply(
        &state,
        &RosterCommand::DeleteTeam {
            season_id: season_id.clone(),
            team_id: u11_id.clone(),
        },
    )
    .unwrap()
    .state;

    let season = next.find_season(&season_id).unwrap();
    assert!(season.find_team(&u11_id).is_none());
    assert_eq!(season.find_team(&u12_id).unwrap(), &u12_before);
}

#[test]
fn add_and_delete_person_keep_roster_order() {
    let (state, season_id, team_id, player_ids) = u11_fixture();

    let applied = apply(
        &state,
        &RosterCommand::AddPerson {
            season_id: season_id.clone(),
            team_id: team_id.clone(),
            name: "Nou".to_string(),
            role: PersonRole::Player,
        },
    )
    .unwrap();
    let new_id = applied.created_id.clone().unwrap();
    let team = applied.state.seasons[0].find_team(&team_id).unwrap();
    assert_eq!(team.people.len(), 7);
    assert_eq!(team.people.last().unwrap().id, new_id);
    assert!(!player_ids.contains(&new_id));

    let next = apply(
        &applied.state,
        &RosterCommand::DeletePerson {
            season_id,
            team_id: team_id.clone(),
            person_id: player_ids[2].clone(),
        },
    )
    .unwrap()
    .state;
    let names: Vec<&str> = next.seasons[0]
        .find_team(&team_id)
        .unwrap()
        .people
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Coach Alex", "Pau", "Marc", "Leo", "Biel", "Nou"]);
    assert!(next.attendance.mentions_person(&player_ids[2]));
}

#[test]
fn lookup_misses_are_silent_noops() {
    let (state, season_id, team_id, _) = u11_fixture();
    let commands = [
        RosterCommand::UpdateSeason {
            season_id: "season-missing".to_string(),
            name: "X".to_string(),
        },
        RosterCommand::DeleteSeason {
            season_id: "season-missing".to_string(),
        },
        RosterCommand::SetActiveSeason {
            season_id: "season-missing".to_string(),
        },
        RosterCommand::AddTeam {
            season_id: "season-missing".to_string(),
            name: "U9".to_string(),
        },
        RosterCommand::DeleteTeam {
            season_id: season_id.clone(),
            team_id: "team-missing".to_string(),
        },
        RosterCommand::AddPerson {
            season_id: season_id.clone(),
            team_id: "team-missing".to_string(),
            name: "Ghost".to_string(),
            role: PersonRole::Player,
        },
        RosterCommand::DeletePerson {
            season_id,
            team_id,
            person_id: "person-missing".to_string(),
        },
        RosterCommand::UpdateUser {
            user_id: "user-missing".to_string(),
            username: "x".to_string(),
            password: String::new(),
            role: UserRole::Coach,
        },
        RosterCommand::DeleteUser {
            user_id: "user-missing".to_string(),
        },
    ];

    for command in &commands {
        let applied = apply(&state, command).unwrap();
        assert_eq!(applied.state, state, "{command:?} changed state");
        assert!(applied.changes.is_empty(), "{command:?} reported changes");
        assert!(applied.created_id.is_none());
    }
}

#[test]
fn blank_names_are_rejected() {
    let (state, season_id, team_id, _) = u11_fixture();

    let cases = [
        (
            RosterCommand::AddSeason {
                name: "   ".to_string(),
            },
            MutationError::EmptySeasonName,
        ),
        (
            RosterCommand::UpdateSeason {
                season_id: season_id.clone(),
                name: String::new(),
            },
            MutationError::EmptySeasonName,
        ),
        (
            RosterCommand::AddTeam {
                season_id: season_id.clone(),
                name: "\t".to_string(),
            },
            MutationError::EmptyTeamName,
        ),
        (
            RosterCommand::AddPerson {
                season_id,
                team_id,
                name: " ".to_string(),
                role: PersonRole::Coach,
            },
            MutationError::EmptyPersonName,
        ),
        (
            RosterCommand::AddUser {
                username: " ".to_string(),
                password: "pw".to_string(),
                role: UserRole::Coach,
            },
            MutationError::EmptyUsername,
        ),
        (
            RosterCommand::AddUser {
                username: "new".to_string(),
                password: "  ".to_string(),
                role: UserRole::Coach,
            },
            MutationError::EmptyPassword,
        ),
    ];

    for (command, expected) in &cases {
        assert_eq!(apply(&state, command).unwrap_err(), *expected);
    }
}

#[test]
fn update_season_renames_without_touching_teams() {
    let (state, season_id, _, _) = u11_fixture();
    let applied = apply(
        &state,
        &RosterCommand::UpdateSeason {
            season_id: season_id.clone(),
            name: "Temporada 2023-2024".to_string(),
        },
    )
    .unwrap();

    let season = applied.state.find_season(&season_id).unwrap();
    assert_eq!(season.name, "Temporada 2023-2024");
    assert_eq!(season.teams, state.seasons[0].teams);
    assert_eq!(applied.changes.keys().collect::<Vec<_>>(), vec![RecordKey::Seasons]);
}

#[test]
fn set_attendance_reads_back_and_is_idempotent() {
    let state = RosterState::default();
    let command = RosterCommand::SetAttendance {
        date: "2024-03-01".to_string(),
        person_id: "p-1".to_string(),
        status: AttendanceStatus::Absent,
    };

    let once = apply(&state, &command).unwrap();
    assert_eq!(
        once.state.attendance.status("2024-03-01", "p-1"),
        Some(AttendanceStatus::Absent)
    );
    assert_eq!(once.changes.keys().collect::<Vec<_>>(), vec![RecordKey::Attendance]);

    let twice = apply(&once.state, &command).unwrap();
    assert_eq!(twice.state, once.state);
    assert!(twice.changes.is_empty());
}

#[test]
fn set_attendance_overwrites_single_cell_only() {
    let (state, _, _, player_ids) = u11_fixture();
    let applied = apply(
        &state,
        &RosterCommand::SetAttendance {
            date: "2024-01-15".to_string(),
            person_id: player_ids[0].clone(),
            status: AttendanceStatus::Justified,
        },
    )
    .unwrap();

    let day = applied.state.attendance.day("2024-01-15").unwrap();
    assert_eq!(day.get(&player_ids[0]), Some(&AttendanceStatus::Justified));
    for player_id in &player_ids[1..] {
        assert_eq!(day.get(player_id), Some(&AttendanceStatus::Present));
    }
}

#[test]
fn apply_leaves_input_state_untouched() {
    let (state, season_id, _, _) = u11_fixture();
    let snapshot = state.clone();

    let _ = apply(&state, &RosterCommand::DeleteSeason { season_id }).unwrap();
    assert_eq!(state, snapshot);
}
