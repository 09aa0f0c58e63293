use chrono::NaiveDate;
use tempfile::tempdir;
use yoga_log::{CourseLog, CourseRecord, FileCourseStore, NewCourse};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn sample_course(date: NaiveDate, location: &str, name: &str) -> NewCourse {
    NewCourse {
        date,
        start_time: "09:00".into(),
        end_time: "10:00".into(),
        location: location.into(),
        course_name: name.into(),
        remarks: String::new(),
    }
}

#[test]
fn n_adds_yield_n_records_with_unique_ids() {
    let mut log = CourseLog::in_memory();
    for day in 1..=10 {
        log.add(sample_course(d(2024, 5, day), "Studio A", "Vinyasa"))
            .unwrap();
    }
    assert_eq!(log.len(), 10);

    let mut ids: Vec<u64> = log.records().iter().map(|r| r.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[test]
fn empty_fields_are_accepted() {
    let mut log = CourseLog::in_memory();
    let record = log.add(NewCourse::new(d(2024, 5, 10))).unwrap();
    assert_eq!(record.location, "");
    assert_eq!(record.course_name, "");
    assert_eq!(record.duration, 1.0);
    assert_eq!(log.len(), 1);
}

#[test]
fn second_remove_of_same_id_reports_not_found() {
    let mut log = CourseLog::in_memory();
    let record = log
        .add(sample_course(d(2024, 5, 10), "Studio A", "Vinyasa"))
        .unwrap();
    assert_eq!(log.total_hours(), 1.0);

    assert!(log.remove(record.id).unwrap());
    assert_eq!(log.total_hours(), 0.0);
    assert!(!log.remove(record.id).unwrap());
}

#[test]
fn remove_decreases_total_hours_by_record_duration() {
    let mut log = CourseLog::in_memory();
    let keep = log
        .add(sample_course(d(2024, 5, 10), "Studio A", "Vinyasa"))
        .unwrap();
    let mut imported: Vec<CourseRecord> = vec![keep];
    imported.push(CourseRecord {
        id: 99,
        date: d(2024, 5, 11),
        start_time: "18:00".into(),
        end_time: "20:00".into(),
        location: "Studio B".into(),
        course_name: "Yin".into(),
        duration: 2.0,
        remarks: String::new(),
    });
    log.replace_all(imported).unwrap();
    assert_eq!(log.total_hours(), 3.0);

    assert!(log.remove(99).unwrap());
    assert_eq!(log.total_hours(), 1.0);
}

#[test]
fn mutations_persist_to_the_store_and_survive_reopen() {
    let dir = tempdir().unwrap();
    let slot = dir.path().join("courses.json");

    {
        let mut log = CourseLog::open(Box::new(FileCourseStore::new(&slot)));
        assert!(log.is_empty());
        log.add(sample_course(d(2024, 5, 10), "Studio A", "Vinyasa"))
            .unwrap();
        log.add(sample_course(d(2024, 5, 12), "Studio B", "Yin"))
            .unwrap();
    }

    let reopened = CourseLog::open(Box::new(FileCourseStore::new(&slot)));
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.total_hours(), 2.0);

    {
        let mut log = CourseLog::open(Box::new(FileCourseStore::new(&slot)));
        let first_id = log.records()[0].id;
        assert!(log.remove(first_id).unwrap());
    }

    let after_delete = CourseLog::open(Box::new(FileCourseStore::new(&slot)));
    assert_eq!(after_delete.len(), 1);
}

#[test]
fn corrupt_slot_opens_as_empty_collection() {
    let dir = tempdir().unwrap();
    let slot = dir.path().join("courses.json");
    std::fs::write(&slot, "not json at all {{{").unwrap();

    let log = CourseLog::open(Box::new(FileCourseStore::new(&slot)));
    assert!(log.is_empty());
}

#[test]
fn absent_slot_opens_as_empty_collection() {
    let dir = tempdir().unwrap();
    let slot = dir.path().join("never_written.json");

    let log = CourseLog::open(Box::new(FileCourseStore::new(&slot)));
    assert!(log.is_empty());
}
