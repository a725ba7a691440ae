use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::model::task::{Priority, Task};

/// One row of an edited task table, as submitted by a table editor.
///
/// Dates are already normalized to calendar dates — the parse layer discards
/// any time-of-day before rows get here. `done_date` is the editor's explicit
/// value, if any; the reconciler decides what actually lands on the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditedRow {
    pub id: String,
    pub name: String,
    pub start: NaiveDate,
    pub plan_end: NaiveDate,
    pub priority: Priority,
    pub notes: String,
    pub done: bool,
    pub done_date: Option<NaiveDate>,
}

impl EditedRow {
    /// A row that reproduces the task unchanged, with no explicit
    /// completion date. Reconciling it is a no-op for `done_date`.
    pub fn from_task(task: &Task) -> EditedRow {
        EditedRow {
            id: task.id.clone(),
            name: task.name.clone(),
            start: task.start,
            plan_end: task.plan_end,
            priority: task.priority,
            notes: task.notes.clone(),
            done: task.done,
            done_date: None,
        }
    }
}

/// Merge edited rows with the previous task list, inferring completion
/// dates from `done` transitions.
///
/// For each row, in input order, the `done_date` of the emitted task is:
/// - `today` when `done` flipped false → true;
/// - unset when `done` flipped true → false;
/// - otherwise the row's explicit value if present, else whatever the
///   previous record held.
///
/// A row with no previous match is treated as previously not done, and so
/// is a row whose id already appeared earlier in the same batch. Ids pass
/// through verbatim; the output has exactly one task per row. Date ordering
/// (`plan_end >= start`) is NOT checked here — callers validate before
/// invoking this.
pub fn reconcile(rows: &[EditedRow], prev: &[Task], today: NaiveDate) -> Vec<Task> {
    let prev_by_id: HashMap<&str, &Task> = prev.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let prev_task = if seen.insert(row.id.as_str()) {
            prev_by_id.get(row.id.as_str()).copied()
        } else {
            // Duplicate id within this batch: no prior record
            None
        };
        let prev_done = prev_task.map(|t| t.done).unwrap_or(false);
        let prev_done_date = prev_task.and_then(|t| t.done_date);

        let done_date = if row.done && !prev_done {
            Some(today)
        } else if !row.done && prev_done {
            None
        } else {
            row.done_date.or(prev_done_date)
        };

        out.push(Task {
            id: row.id.clone(),
            name: row.name.clone(),
            start: row.start,
            plan_end: row.plan_end,
            priority: row.priority,
            notes: row.notes.clone(),
            done: row.done,
            done_date,
        });
    }
    out
}
