use roster_core::seed::seed_users;
use roster_core::{
    apply, authenticate, MemoryRecordStore, RecordKey, RosterCommand, RosterService, RosterState,
    ServiceError, SessionError, UserRole,
};

fn seeded_state() -> RosterState {
    RosterState {
        users: seed_users(),
        ..RosterState::default()
    }
}

fn update_coach(state: &RosterState, password: &str) -> RosterState {
    apply(
        state,
        &RosterCommand::UpdateUser {
            user_id: "user-coach".to_string(),
            username: "coach".to_string(),
            password: password.to_string(),
            role: UserRole::Coach,
        },
    )
    .unwrap()
    .state
}

#[test]
fn update_user_with_blank_password_keeps_stored_password() {
    let state = seeded_state();
    let next = update_coach(&state, "");
    assert_eq!(next.find_user("user-coach").unwrap().password, "password");

    let next = update_coach(&state, "   ");
    assert_eq!(next.find_user("user-coach").unwrap().password, "password");
}

#[test]
fn update_user_with_new_password_replaces_it() {
    let state = seeded_state();
    let next = update_coach(&state, "n3w-pass");

    assert_eq!(next.find_user("user-coach").unwrap().password, "n3w-pass");
    assert!(authenticate(&next.users, "coach", "password").is_none());
    assert!(authenticate(&next.users, "coach", "n3w-pass").is_some());
}

#[test]
fn update_user_can_promote_and_rename() {
    let state = seeded_state();
    let applied = apply(
        &state,
        &RosterCommand::UpdateUser {
            user_id: "user-coach".to_string(),
            username: "head-coach".to_string(),
            password: String::new(),
            role: UserRole::Admin,
        },
    )
    .unwrap();

    let user = applied.state.find_user("user-coach").unwrap();
    assert_eq!(user.username, "head-coach");
    assert!(user.is_admin());
    assert_eq!(applied.changes.keys().collect::<Vec<_>>(), vec![RecordKey::Users]);
}

#[test]
fn add_and_delete_user_keep_list_order() {
    let state = seeded_state();
    let applied = apply(
        &state,
        &RosterCommand::AddUser {
            username: "assistant".to_string(),
            password: "pw".to_string(),
            role: UserRole::Coach,
        },
    )
    .unwrap();
    let new_id = applied.created_id.unwrap();
    let usernames: Vec<&str> = applied.state.users.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(usernames, vec!["admin", "coach", "assistant"]);

    let next = apply(&applied.state, &RosterCommand::DeleteUser { user_id: new_id }).unwrap();
    assert_eq!(next.state.users, state.users);
}

#[test]
fn duplicate_usernames_are_accepted_and_first_match_wins() {
    let state = seeded_state();
    let next = apply(
        &state,
        &RosterCommand::AddUser {
            username: "coach".to_string(),
            password: "password".to_string(),
            role: UserRole::Admin,
        },
    )
    .unwrap()
    .state;

    assert_eq!(next.users.len(), 3);
    let user = authenticate(&next.users, "coach", "password").unwrap();
    assert_eq!(user.id, "user-coach");
}

#[test]
fn authenticate_matches_both_fields_exactly() {
    let users = seed_users();
    assert_eq!(
        authenticate(&users, "admin", "password").map(|u| u.id.as_str()),
        Some("user-admin")
    );
    assert!(authenticate(&users, "admin", "wrong").is_none());
    assert!(authenticate(&users, "ghost", "password").is_none());
    assert!(authenticate(&users, "admin ", "password").is_none());
}

#[test]
fn service_denies_user_management_to_coaches() {
    let store = MemoryRecordStore::new();
    let mut service = RosterService::open(&store);
    service.login("coach", "password").unwrap();
    store.clear_write_log();

    let err = service
        .execute_authorized(RosterCommand::DeleteUser {
            user_id: "user-admin".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Session(SessionError::AdminRequired)));
    assert_eq!(service.state().users.len(), 2);
    assert!(store.write_log().is_empty());

    service
        .execute_authorized(RosterCommand::AddSeason {
            name: "2025-2026".to_string(),
        })
        .unwrap();
    assert_eq!(store.write_log(), vec![RecordKey::Seasons]);
}

#[test]
fn service_requires_login_for_every_command() {
    let store = MemoryRecordStore::new();
    let mut service = RosterService::open(&store);

    let err = service
        .execute_authorized(RosterCommand::AddSeason {
            name: "2025-2026".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ServiceError::Session(SessionError::NotAuthenticated)));

    let err = service.login("admin", "nope").unwrap_err();
    assert!(matches!(err, ServiceError::Session(SessionError::InvalidCredentials)));
}

#[test]
fn admin_can_manage_users_and_session_tracks_changes() {
    let store = MemoryRecordStore::new();
    let mut service = RosterService::open(&store);
    service.login("admin", "password").unwrap();

    service
        .execute_authorized(RosterCommand::UpdateUser {
            user_id: "user-admin".to_string(),
            username: "root".to_string(),
            password: String::new(),
            role: UserRole::Admin,
        })
        .unwrap();
    assert_eq!(service.current_user().unwrap().username, "root");

    service
        .execute_authorized(RosterCommand::DeleteUser {
            user_id: "user-admin".to_string(),
        })
        .unwrap();
    assert!(service.current_user().is_none());
    assert!(store.raw(RecordKey::Users).unwrap().contains("user-coach"));
}
