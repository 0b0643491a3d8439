use roster_core::seed::seed_seasons;
use roster_core::{
    dates_recorded, season_attendance, AttendanceRecord, AttendanceStatus, DateRange, PersonRole,
};

fn sample_attendance() -> AttendanceRecord {
    let mut attendance = AttendanceRecord::new();
    attendance.set_status("2024-01-08", "p-u11-c1", AttendanceStatus::Present);
    attendance.set_status("2024-01-08", "p-u11-p1", AttendanceStatus::Present);
    attendance.set_status("2024-01-08", "p-u11-p2", AttendanceStatus::Absent);
    attendance.set_status("2024-01-15", "p-u11-p1", AttendanceStatus::Justified);
    attendance.set_status("2024-02-05", "p-u11-p1", AttendanceStatus::Present);
    attendance.set_status("2024-02-05", "p-u12-p1", AttendanceStatus::Present);
    // Left behind by a person who no longer exists.
    attendance.set_status("2024-02-05", "person-removed", AttendanceStatus::Absent);
    attendance
}

#[test]
fn totals_follow_roster_order_and_ignore_stale_marks() {
    let seasons = seed_seasons();
    let teams = season_attendance(&seasons[0], &sample_attendance(), &DateRange::all());

    let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Mini M U11", "Mini M U12", "Cadet F U16", "U25 F"]);

    let u11 = &teams[0];
    assert_eq!(u11.people.len(), 6);
    assert_eq!(u11.people[0].role, PersonRole::Coach);
    assert_eq!(u11.totals.present, 3);
    assert_eq!(u11.totals.absent, 1);
    assert_eq!(u11.totals.justified, 1);

    let pau = &u11.people[1];
    assert_eq!(pau.person_id, "p-u11-p1");
    assert_eq!(pau.tally.total(), 3);

    let grand_total: u32 = teams.iter().map(|t| t.totals.total()).sum();
    assert_eq!(grand_total, 6);
    assert_eq!(teams[2].totals.attendance_rate(), None);
}

#[test]
fn date_range_limits_counted_marks() {
    let seasons = seed_seasons();
    let january = DateRange::new(Some("2024-01-01"), Some("2024-01-31")).unwrap();
    let teams = season_attendance(&seasons[0], &sample_attendance(), &january);

    let pau = &teams[0].people[1];
    assert_eq!(pau.tally.present, 1);
    assert_eq!(pau.tally.justified, 1);
    assert_eq!(teams[1].totals.total(), 0);

    let from_february = DateRange::new(Some("2024-02-01"), None).unwrap();
    let teams = season_attendance(&seasons[0], &sample_attendance(), &from_february);
    assert_eq!(teams[0].totals.present, 1);
    assert_eq!(teams[1].totals.present, 1);
}

#[test]
fn dates_recorded_are_sorted() {
    let mut attendance = sample_attendance();
    attendance.set_status("2023-12-20", "p-u11-p1", AttendanceStatus::Absent);

    assert_eq!(
        dates_recorded(&attendance),
        vec!["2023-12-20", "2024-01-08", "2024-01-15", "2024-02-05"]
    );
}
