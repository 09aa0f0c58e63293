use super::{CourseStore, PersistenceResult};
use crate::course::CourseRecord;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

/// Slot store backed by sqlite: the whole serialized collection lives in a
/// single checked row, replaced wholesale on every save.
pub struct SqliteCourseStore {
    connection: Mutex<Connection>,
}

impl SqliteCourseStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS course_log (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                courses_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }
}

impl CourseStore for SqliteCourseStore {
    fn save(&self, records: &[CourseRecord]) -> PersistenceResult<()> {
        let json = serde_json::to_string(records)?;
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        conn.execute(
            "INSERT INTO course_log (id, courses_json) VALUES (1, ?1)
             ON CONFLICT (id) DO UPDATE SET courses_json = excluded.courses_json",
            params![json],
        )?;
        Ok(())
    }

    fn load(&self) -> PersistenceResult<Option<Vec<CourseRecord>>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare("SELECT courses_json FROM course_log WHERE id = 1")?;
        let json_opt: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;

        let Some(json) = json_opt else {
            return Ok(None);
        };
        let records: Vec<CourseRecord> = serde_json::from_str(&json)?;
        Ok(Some(records))
    }
}
