use chrono::NaiveDate;

use crate::course::{CourseRecord, NewCourse};
use crate::month::YearMonth;
use crate::persistence::{self, CourseStore, PersistenceResult};
use crate::stats::{self, MonthlyBreakdown};

/// The owned course collection. The in-memory list is the sole source of
/// truth during a session; every mutation flushes the whole collection to
/// the attached store before returning.
pub struct CourseLog {
    records: Vec<CourseRecord>,
    store: Option<Box<dyn CourseStore + Send + Sync>>,
}

impl CourseLog {
    /// Log with no durable backing. Mutations skip the persist step.
    pub fn in_memory() -> Self {
        Self {
            records: Vec::new(),
            store: None,
        }
    }

    pub fn with_records(records: Vec<CourseRecord>) -> Self {
        Self {
            records,
            store: None,
        }
    }

    /// Restores the collection from `store`. An empty or unreadable slot
    /// yields an empty collection; startup never fails on stored data.
    pub fn open(store: Box<dyn CourseStore + Send + Sync>) -> Self {
        let records = store.load().ok().flatten().unwrap_or_default();
        Self {
            records,
            store: Some(store),
        }
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: u64) -> Option<&CourseRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    fn next_id(&self) -> u64 {
        self.records
            .iter()
            .map(|record| record.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    fn persist(&self) -> PersistenceResult<()> {
        if let Some(store) = &self.store {
            store.save(&self.records)?;
        }
        Ok(())
    }

    /// Appends a record built from the form fields. Field contents are not
    /// validated; the id is fresh and the duration fixed at one hour.
    pub fn add(&mut self, fields: NewCourse) -> PersistenceResult<CourseRecord> {
        let record = fields.into_record(self.next_id());
        self.records.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Removes the record with `id` if present. A missing id is signaled by
    /// the returned `false`, not an error.
    pub fn remove(&mut self, id: u64) -> PersistenceResult<bool> {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Replaces the collection wholesale, then persists. Used by import.
    pub fn replace_all(&mut self, records: Vec<CourseRecord>) -> PersistenceResult<()> {
        self.records = records;
        self.persist()?;
        Ok(())
    }

    /// Parses an imported JSON document and replaces the collection on
    /// success. Parse failure leaves the current contents untouched.
    pub fn import_json(&mut self, bytes: &[u8]) -> PersistenceResult<usize> {
        let records = persistence::import_courses_from_json(bytes)?;
        let count = records.len();
        self.replace_all(records)?;
        Ok(count)
    }

    pub fn by_date_desc(&self) -> Vec<CourseRecord> {
        stats::by_date_desc(&self.records)
    }

    pub fn total_hours(&self) -> f64 {
        stats::total_hours(&self.records)
    }

    pub fn location_breakdown(&self, month: YearMonth) -> MonthlyBreakdown {
        stats::location_breakdown(&self.records, month)
    }

    pub fn month_options(&self, today: NaiveDate) -> Vec<YearMonth> {
        stats::month_options(&self.records, today)
    }

    pub fn export_csv(&self) -> PersistenceResult<Vec<u8>> {
        persistence::export_courses_to_csv(&self.records)
    }

    pub fn export_json(&self) -> PersistenceResult<Vec<u8>> {
        persistence::export_courses_to_json(&self.records)
    }
}

impl Default for CourseLog {
    fn default() -> Self {
        Self::in_memory()
    }
}
