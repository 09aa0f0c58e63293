use super::{CourseStore, PersistenceResult};
use crate::course::CourseRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// UTF-8 byte-order mark prefixed to CSV exports for spreadsheet
/// compatibility.
const UTF8_BOM: &[u8] = "\u{feff}".as_bytes();

const CSV_HEADER: [&str; 7] = [
    "date",
    "start_time",
    "end_time",
    "location",
    "course_name",
    "duration",
    "remarks",
];

/// Slot store backed by a single JSON file holding the whole collection.
pub struct FileCourseStore {
    path: PathBuf,
}

impl FileCourseStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CourseStore for FileCourseStore {
    fn save(&self, records: &[CourseRecord]) -> PersistenceResult<()> {
        let file = File::create(&self.path)?;
        serde_json::to_writer(file, records)?;
        Ok(())
    }

    fn load(&self) -> PersistenceResult<Option<Vec<CourseRecord>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read(&self.path)?;
        let records: Vec<CourseRecord> = serde_json::from_slice(&contents)?;
        Ok(Some(records))
    }
}

#[derive(Serialize, Deserialize)]
struct CourseCsvRecord {
    date: String,
    start_time: String,
    end_time: String,
    location: String,
    course_name: String,
    duration: f64,
    remarks: String,
}

impl From<&CourseRecord> for CourseCsvRecord {
    fn from(record: &CourseRecord) -> Self {
        Self {
            date: record.date.format("%Y-%m-%d").to_string(),
            start_time: record.start_time.clone(),
            end_time: record.end_time.clone(),
            location: record.location.clone(),
            course_name: record.course_name.clone(),
            duration: record.duration,
            remarks: record.remarks.clone(),
        }
    }
}

/// CSV document for the collection in its current (unsorted) order: BOM,
/// fixed header row, one row per record. Embedded commas and quotes are
/// quoted by the writer.
pub fn export_courses_to_csv(records: &[CourseRecord]) -> PersistenceResult<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer.extend_from_slice(UTF8_BOM);
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut buffer);
        writer.write_record(CSV_HEADER)?;
        for record in records {
            writer.serialize(CourseCsvRecord::from(record))?;
        }
        writer.flush()?;
    }
    Ok(buffer)
}

pub fn save_courses_to_csv<P: AsRef<Path>>(
    records: &[CourseRecord],
    path: P,
) -> PersistenceResult<()> {
    let bytes = export_courses_to_csv(records)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// JSON document for the collection, pretty-printed.
pub fn export_courses_to_json(records: &[CourseRecord]) -> PersistenceResult<Vec<u8>> {
    let bytes = serde_json::to_vec_pretty(records)?;
    Ok(bytes)
}

pub fn save_courses_to_json<P: AsRef<Path>>(
    records: &[CourseRecord],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    Ok(())
}

/// Parses an imported JSON document as a list of records. Field-level
/// leniency comes from the record's serde defaults; anything that is not a
/// well-formed list of records is rejected without touching caller state.
pub fn import_courses_from_json(bytes: &[u8]) -> PersistenceResult<Vec<CourseRecord>> {
    let records: Vec<CourseRecord> = serde_json::from_slice(bytes)?;
    Ok(records)
}

pub fn load_courses_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<CourseRecord>> {
    let contents = fs::read(path)?;
    import_courses_from_json(&contents)
}

pub fn csv_export_filename(today: NaiveDate) -> String {
    format!("yoga_log_{}.csv", today.format("%Y-%m-%d"))
}

pub fn json_export_filename(today: NaiveDate) -> String {
    format!("yoga_log_{}.json", today.format("%Y-%m-%d"))
}
