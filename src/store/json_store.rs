use std::path::PathBuf;

use crate::model::task::Task;
use crate::parse::TaskRecord;
use crate::store::{StoreError, TaskStore, atomic_write, read_if_exists};

/// File-backed store: a JSON array of flat task records.
///
/// A missing file and unparseable content both load as the empty list —
/// garbage is "no data", not a hard failure.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: PathBuf) -> Self {
        JsonStore { path }
    }
}

impl TaskStore for JsonStore {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let Some(text) = read_if_exists(&self.path)? else {
            return Ok(Vec::new());
        };
        let records: Vec<TaskRecord> = serde_json::from_str(&text).unwrap_or_default();
        Ok(records.into_iter().filter_map(TaskRecord::into_task).collect())
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from_task).collect();
        // Serializing a vec of string-field records cannot fail
        let text = serde_json::to_string_pretty(&records).unwrap_or_default();
        atomic_write(&self.path, text.as_bytes())
    }
}
