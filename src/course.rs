use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged class session.
///
/// Field names in the JSON interchange format are camelCase; imports are
/// lenient, so every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub remarks: String,
}

/// The six user-editable fields collected by the entry form. Everything is
/// accepted as-is, empty strings included; `duration` is not part of the
/// form and is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub date: NaiveDate,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub remarks: String,
}

impl NewCourse {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            start_time: String::new(),
            end_time: String::new(),
            location: String::new(),
            course_name: String::new(),
            remarks: String::new(),
        }
    }

    pub fn into_record(self, id: u64) -> CourseRecord {
        CourseRecord {
            id,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            course_name: self.course_name,
            duration: CourseRecord::DEFAULT_DURATION,
            remarks: self.remarks,
        }
    }
}

impl CourseRecord {
    /// Every session entered through the form counts as one hour.
    pub const DEFAULT_DURATION: f64 = 1.0;
}
