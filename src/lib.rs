pub mod course;
pub mod course_log;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod month;
pub mod persistence;
pub mod stats;

pub use course::{CourseRecord, NewCourse};
pub use course_log::CourseLog;
pub use month::YearMonth;
pub use persistence::{
    CourseStore, FileCourseStore, PersistenceError, csv_export_filename, export_courses_to_csv,
    export_courses_to_json, import_courses_from_json, json_export_filename,
    load_courses_from_json, save_courses_to_csv, save_courses_to_json,
};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteCourseStore;
pub use stats::{LocationHours, MonthlyBreakdown};
