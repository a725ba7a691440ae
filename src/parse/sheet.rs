use serde::{Deserialize, Serialize};

use crate::model::task::{Priority, Task};
use crate::parse::date::{parse_date, parse_done_token};

/// The fixed column set shared by every backend. Order is part of the
/// persistence contract.
pub const SHEET_HEADERS: [&str; 8] = [
    "id",
    "name",
    "start",
    "plan_end",
    "priority",
    "notes",
    "done",
    "done_date",
];

/// The flat persisted shape of a task: one string per column, dates as
/// ISO-8601 calendar-date strings, `done` as a boolean-ish token, empty
/// string meaning "unset" for `notes` and `done_date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub plan_end: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub done: String,
    #[serde(default)]
    pub done_date: String,
}

impl TaskRecord {
    pub fn from_task(task: &Task) -> TaskRecord {
        TaskRecord {
            id: task.id.clone(),
            name: task.name.clone(),
            start: task.start.to_string(),
            plan_end: task.plan_end.to_string(),
            priority: task.priority.to_string(),
            notes: task.notes.clone(),
            done: if task.done { "TRUE" } else { "FALSE" }.to_string(),
            done_date: task
                .done_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        }
    }

    /// Coerce a persisted record into a task.
    ///
    /// Missing or unknown priority defaults to medium; an unparseable
    /// `done_date` is treated as unset. Returns `None` when the record is
    /// unusable: empty id, or a start/plan_end that is not a date.
    pub fn into_task(self) -> Option<Task> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return None;
        }
        let start = parse_date(&self.start)?;
        let plan_end = parse_date(&self.plan_end)?;
        Some(Task {
            id,
            name: self.name.trim().to_string(),
            start,
            plan_end,
            priority: Priority::parse(&self.priority).unwrap_or_default(),
            notes: self.notes.trim().to_string(),
            done: parse_done_token(&self.done),
            done_date: parse_date(&self.done_date),
        })
    }
}

// ---------------------------------------------------------------------------
// Grid format: one record per line, tab-separated, fixed header row
// ---------------------------------------------------------------------------

/// Escape a field for the tab-separated grid.
fn escape_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

fn unescape_field(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// The header line of a sheet file.
pub fn header_line() -> String {
    SHEET_HEADERS.join("\t")
}

/// Parse sheet text into records.
///
/// A leading header row matching [`SHEET_HEADERS`] is skipped. Short rows
/// are padded with empty fields; extra columns are ignored; blank lines are
/// skipped. No row is rejected here — coercion happens in
/// [`TaskRecord::into_task`].
pub fn parse_sheet(text: &str) -> Vec<TaskRecord> {
    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if i == 0 && line == header_line() {
            continue;
        }
        let mut fields: Vec<String> = line.split('\t').map(unescape_field).collect();
        fields.resize(SHEET_HEADERS.len(), String::new());
        records.push(TaskRecord {
            id: fields[0].clone(),
            name: fields[1].clone(),
            start: fields[2].clone(),
            plan_end: fields[3].clone(),
            priority: fields[4].clone(),
            notes: fields[5].clone(),
            done: fields[6].clone(),
            done_date: fields[7].clone(),
        });
    }
    records
}

/// Serialize records to sheet text, header row first.
pub fn serialize_sheet(records: &[TaskRecord]) -> String {
    let mut out = header_line();
    out.push('\n');
    for r in records {
        let fields = [
            &r.id,
            &r.name,
            &r.start,
            &r.plan_end,
            &r.priority,
            &r.notes,
            &r.done,
            &r.done_date,
        ];
        let line: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        out.push_str(&line.join("\t"));
        out.push('\n');
    }
    out
}
