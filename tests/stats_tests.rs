use chrono::NaiveDate;
use yoga_log::stats::{LocationHours, MonthlyBreakdown, by_date_desc, location_breakdown, month_options, total_hours};
use yoga_log::{CourseLog, CourseRecord, NewCourse, YearMonth};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn record(id: u64, date: NaiveDate, location: &str, name: &str) -> CourseRecord {
    CourseRecord {
        id,
        date,
        start_time: "09:00".into(),
        end_time: "10:00".into(),
        location: location.into(),
        course_name: name.into(),
        duration: 1.0,
        remarks: String::new(),
    }
}

#[test]
fn list_view_sorts_by_date_descending() {
    let records = vec![
        record(1, d(2024, 5, 10), "Studio A", "Vinyasa"),
        record(2, d(2024, 5, 20), "Studio A", "Yin"),
        record(3, d(2024, 4, 1), "Studio B", "Hatha"),
    ];
    let sorted = by_date_desc(&records);
    let dates: Vec<NaiveDate> = sorted.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![d(2024, 5, 20), d(2024, 5, 10), d(2024, 4, 1)]);
}

#[test]
fn total_hours_sums_all_months() {
    let mut records = vec![
        record(1, d(2024, 5, 10), "Studio A", "Vinyasa"),
        record(2, d(2023, 12, 1), "Studio B", "Yin"),
    ];
    records[1].duration = 2.5;
    assert_eq!(total_hours(&records), 3.5);
}

#[test]
fn single_may_record_scenario() {
    let mut log = CourseLog::in_memory();
    let fields = NewCourse {
        date: d(2024, 5, 10),
        start_time: "09:00".into(),
        end_time: "10:00".into(),
        location: "Studio A".into(),
        course_name: "Vinyasa".into(),
        remarks: String::new(),
    };
    log.add(fields).unwrap();

    assert_eq!(log.total_hours(), 1.0);
    let listed = log.by_date_desc();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].date, d(2024, 5, 10));
}

#[test]
fn breakdown_groups_hours_per_location() {
    let records = vec![
        record(1, d(2024, 5, 10), "Studio A", "Vinyasa"),
        record(2, d(2024, 5, 12), "Studio B", "Yin"),
        record(3, d(2024, 6, 1), "Studio A", "Vinyasa"),
    ];
    let breakdown = location_breakdown(&records, YearMonth::new(2024, 5));
    assert_eq!(
        breakdown,
        MonthlyBreakdown::Locations(vec![
            LocationHours {
                location: "Studio A".into(),
                total_hours: 1.0,
            },
            LocationHours {
                location: "Studio B".into(),
                total_hours: 1.0,
            },
        ])
    );
}

#[test]
fn breakdown_sums_repeat_locations() {
    let records = vec![
        record(1, d(2024, 5, 10), "Studio A", "Vinyasa"),
        record(2, d(2024, 5, 17), "Studio A", "Vinyasa"),
    ];
    let breakdown = location_breakdown(&records, YearMonth::new(2024, 5));
    assert_eq!(
        breakdown,
        MonthlyBreakdown::Locations(vec![LocationHours {
            location: "Studio A".into(),
            total_hours: 2.0,
        }])
    );
}

#[test]
fn empty_month_yields_explicit_no_data() {
    let records = vec![record(1, d(2024, 5, 10), "Studio A", "Vinyasa")];
    let breakdown = location_breakdown(&records, YearMonth::new(2024, 7));
    assert_eq!(breakdown, MonthlyBreakdown::NoData);
}

#[test]
fn month_options_contain_current_month_for_empty_collection() {
    let today = d(2024, 8, 15);
    let options = month_options(&[], today);
    assert_eq!(options, vec![YearMonth::new(2024, 8)]);
}

#[test]
fn month_options_sort_most_recent_first() {
    let records = vec![
        record(1, d(2024, 3, 1), "Studio A", "Vinyasa"),
        record(2, d(2024, 8, 2), "Studio A", "Vinyasa"),
        record(3, d(2023, 11, 5), "Studio B", "Yin"),
        record(4, d(2024, 3, 20), "Studio B", "Yin"),
    ];
    let today = d(2024, 8, 15);
    let options = month_options(&records, today);
    assert_eq!(
        options,
        vec![
            YearMonth::new(2024, 8),
            YearMonth::new(2024, 3),
            YearMonth::new(2023, 11),
        ]
    );
}

#[test]
fn missing_current_month_is_inserted_at_the_front() {
    // Records only in months newer than "today": the current month still
    // goes first rather than sorting into place.
    let records = vec![record(1, d(2024, 12, 1), "Studio A", "Vinyasa")];
    let today = d(2024, 8, 15);
    let options = month_options(&records, today);
    assert_eq!(options, vec![YearMonth::new(2024, 8), YearMonth::new(2024, 12)]);
}
