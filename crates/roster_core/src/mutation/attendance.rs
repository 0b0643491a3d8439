//! Attendance cell command.

use super::Applied;
use crate::model::attendance::AttendanceStatus;
use crate::model::state::RosterState;
use crate::store::{ChangeSet, RecordKey};

/// Sets one `(date, person)` cell. Re-setting the same status is a no-op.
pub(super) fn set_attendance(
    state: &RosterState,
    date: &str,
    person_id: &str,
    status: AttendanceStatus,
) -> Applied {
    if state.attendance.status(date, person_id) == Some(status) {
        return Applied::unchanged(state);
    }

    let mut next = state.clone();
    next.attendance.set_status(date, person_id, status);
    Applied::changed(next, ChangeSet::only(RecordKey::Attendance))
}
