//! Team and person commands.
//!
//! Both only touch the `seasons` record; attendance marks of removed people
//! are kept.

use super::{require_text, Applied, MutationError, MutationResult};
use crate::model::season::{Person, PersonRole, Team};
use crate::model::state::RosterState;
use crate::store::{ChangeSet, RecordKey};

pub(super) fn add_team(state: &RosterState, season_id: &str, name: &str) -> MutationResult<Applied> {
    require_text(name, MutationError::EmptyTeamName)?;

    let Some(season_index) = state.seasons.iter().position(|s| s.id == season_id) else {
        return Ok(Applied::unchanged(state));
    };

    let team = Team::new(name);
    let team_id = team.id.clone();
    let mut next = state.clone();
    next.seasons[season_index].teams.push(team);
    Ok(Applied::created(
        next,
        ChangeSet::only(RecordKey::Seasons),
        team_id,
    ))
}

/// Removes a team and its people from one season.
pub(super) fn delete_team(state: &RosterState, season_id: &str, team_id: &str) -> Applied {
    let Some((season_index, team_index)) = team_position(state, season_id, team_id) else {
        return Applied::unchanged(state);
    };

    let mut next = state.clone();
    next.seasons[season_index].teams.remove(team_index);
    Applied::changed(next, ChangeSet::only(RecordKey::Seasons))
}

pub(super) fn add_person(
    state: &RosterState,
    season_id: &str,
    team_id: &str,
    name: &str,
    role: PersonRole,
) -> MutationResult<Applied> {
    require_text(name, MutationError::EmptyPersonName)?;

    let Some((season_index, team_index)) = team_position(state, season_id, team_id) else {
        return Ok(Applied::unchanged(state));
    };

    let person = Person::new(name, role);
    let person_id = person.id.clone();
    let mut next = state.clone();
    next.seasons[season_index].teams[team_index]
        .people
        .push(person);
    Ok(Applied::created(
        next,
        ChangeSet::only(RecordKey::Seasons),
        person_id,
    ))
}

pub(super) fn delete_person(
    state: &RosterState,
    season_id: &str,
    team_id: &str,
    person_id: &str,
) -> Applied {
    let Some((season_index, team_index)) = team_position(state, season_id, team_id) else {
        return Applied::unchanged(state);
    };
    let Some(person_index) = state.seasons[season_index].teams[team_index]
        .people
        .iter()
        .position(|person| person.id == person_id)
    else {
        return Applied::unchanged(state);
    };

    let mut next = state.clone();
    next.seasons[season_index].teams[team_index]
        .people
        .remove(person_index);
    Applied::changed(next, ChangeSet::only(RecordKey::Seasons))
}

fn team_position(state: &RosterState, season_id: &str, team_id: &str) -> Option<(usize, usize)> {
    let season_index = state.seasons.iter().position(|s| s.id == season_id)?;
    let team_index = state.seasons[season_index]
        .teams
        .iter()
        .position(|team| team.id == team_id)?;
    Some((season_index, team_index))
}
