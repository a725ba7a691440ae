use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::{Priority, Task};
use crate::ops::timeline::TimelineBar;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub name: String,
    pub start: NaiveDate,
    pub plan_end: NaiveDate,
    pub priority: Priority,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct BarJson {
    pub section: String,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub priority: Priority,
    pub color: String,
    pub plan_end: NaiveDate,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

#[derive(Serialize)]
pub struct ChartJson {
    pub bars: Vec<BarJson>,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        name: task.name.clone(),
        start: task.start,
        plan_end: task.plan_end,
        priority: task.priority,
        notes: task.notes.clone(),
        done: task.done,
        done_date: task.done_date,
    }
}

pub fn bar_to_json(bar: &TimelineBar) -> BarJson {
    BarJson {
        section: bar.section.label().to_string(),
        label: bar.label.clone(),
        start: bar.start,
        end: bar.end,
        priority: bar.priority,
        color: bar.priority.color().to_string(),
        plan_end: bar.plan_end,
        done: bar.done,
        done_date: bar.done_date,
        notes: bar.notes.clone(),
    }
}
