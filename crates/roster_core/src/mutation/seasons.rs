//! Season commands.

use super::{require_text, Applied, MutationError, MutationResult};
use crate::model::season::Season;
use crate::model::state::RosterState;
use crate::store::{ChangeSet, RecordKey};

/// Appends a new empty season; it becomes active when none is.
pub(super) fn add_season(state: &RosterState, name: &str) -> MutationResult<Applied> {
    require_text(name, MutationError::EmptySeasonName)?;

    let season = Season::new(name);
    let season_id = season.id.clone();
    let mut next = state.clone();
    next.seasons.push(season);

    let mut changes = ChangeSet::only(RecordKey::Seasons);
    if next.active_season_id.is_none() {
        next.active_season_id = Some(season_id.clone());
        changes.mark(RecordKey::ActiveSeasonId);
    }
    Ok(Applied::created(next, changes, season_id))
}

pub(super) fn update_season(
    state: &RosterState,
    season_id: &str,
    name: &str,
) -> MutationResult<Applied> {
    require_text(name, MutationError::EmptySeasonName)?;

    let Some(index) = season_index(state, season_id) else {
        return Ok(Applied::unchanged(state));
    };
    if state.seasons[index].name == name {
        return Ok(Applied::unchanged(state));
    }

    let mut next = state.clone();
    next.seasons[index].name = name.to_string();
    Ok(Applied::changed(next, ChangeSet::only(RecordKey::Seasons)))
}

/// Removes a season with all of its teams and people.
pub(super) fn delete_season(state: &RosterState, season_id: &str) -> Applied {
    let Some(index) = season_index(state, season_id) else {
        return Applied::unchanged(state);
    };

    let mut next = state.clone();
    next.seasons.remove(index);
    let mut changes = ChangeSet::only(RecordKey::Seasons);
    if next.active_season_id.as_deref() == Some(season_id) {
        next.active_season_id = next.seasons.first().map(|season| season.id.clone());
        changes.mark(RecordKey::ActiveSeasonId);
    }
    Applied::changed(next, changes)
}

pub(super) fn set_active_season(state: &RosterState, season_id: &str) -> Applied {
    if season_index(state, season_id).is_none()
        || state.active_season_id.as_deref() == Some(season_id)
    {
        return Applied::unchanged(state);
    }

    let mut next = state.clone();
    next.active_season_id = Some(season_id.to_string());
    Applied::changed(next, ChangeSet::only(RecordKey::ActiveSeasonId))
}

fn season_index(state: &RosterState, season_id: &str) -> Option<usize> {
    state.seasons.iter().position(|season| season.id == season_id)
}
