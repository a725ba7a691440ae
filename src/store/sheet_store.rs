use std::path::PathBuf;

use crate::model::task::Task;
use crate::parse::{TaskRecord, header_line, parse_sheet, serialize_sheet};
use crate::store::{StoreError, TaskStore, atomic_write, read_if_exists};

/// Tabular store: a tab-separated grid file with a fixed 8-column header.
///
/// Mirrors a spreadsheet worksheet: the header row is part of the contract
/// and is created (or repaired) when missing, and loading coerces rather
/// than rejects — missing priority defaults to medium, boolean-ish done
/// tokens are accepted, rows without an id are skipped.
pub struct SheetStore {
    path: PathBuf,
}

impl SheetStore {
    pub fn new(path: PathBuf) -> Self {
        SheetStore { path }
    }

    /// Make sure the file exists and starts with the header row, creating
    /// or repairing it if not. Returns the file's current text.
    fn ensure_header(&self) -> Result<String, StoreError> {
        let text = read_if_exists(&self.path)?.unwrap_or_default();
        if text.lines().next() == Some(header_line().as_str()) {
            return Ok(text);
        }
        let mut repaired = header_line();
        repaired.push('\n');
        match text.lines().next() {
            // Empty file: header only
            None => {}
            // First line is not the header: replace it, keep the rest
            Some(_) => {
                for line in text.lines().skip(1) {
                    repaired.push_str(line);
                    repaired.push('\n');
                }
            }
        }
        atomic_write(&self.path, repaired.as_bytes())?;
        Ok(repaired)
    }
}

impl TaskStore for SheetStore {
    fn load(&self) -> Result<Vec<Task>, StoreError> {
        let text = self.ensure_header()?;
        Ok(parse_sheet(&text)
            .into_iter()
            .filter_map(TaskRecord::into_task)
            .collect())
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from_task).collect();
        atomic_write(&self.path, serialize_sheet(&records).as_bytes())
    }
}
