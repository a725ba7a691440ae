use std::collections::HashSet;

use chrono::NaiveDate;

use crate::model::task::{Priority, Task};

/// Which band of the chart a bar belongs to. Active always renders first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Active,
    Done,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::Active => "Active",
            Section::Done => "Done",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Section::Active => 0,
            Section::Done => 1,
        }
    }
}

/// Display filters for the timeline.
#[derive(Debug, Clone)]
pub struct TimelineFilter {
    /// Include the Done section.
    pub show_done: bool,
    /// Priorities to keep.
    pub priorities: HashSet<Priority>,
    /// Case-insensitive substring match on the task name, if set.
    pub name_contains: Option<String>,
}

impl Default for TimelineFilter {
    fn default() -> Self {
        TimelineFilter {
            show_done: true,
            priorities: Priority::ALL.into_iter().collect(),
            name_contains: None,
        }
    }
}

impl TimelineFilter {
    fn keeps(&self, task: &Task) -> bool {
        if !self.priorities.contains(&task.priority) {
            return false;
        }
        if !self.show_done && task.done {
            return false;
        }
        match &self.name_contains {
            Some(needle) if !needle.trim().is_empty() => task
                .name
                .to_lowercase()
                .contains(&needle.trim().to_lowercase()),
            _ => true,
        }
    }
}

/// One render-ready bar. Rows are keyed by `(section, label)`; distinct
/// tasks sharing a name keep separate bars, they just sort adjacently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineBar {
    pub section: Section,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub priority: Priority,
    // Hover fields
    pub plan_end: NaiveDate,
    pub done: bool,
    pub done_date: Option<NaiveDate>,
    pub notes: String,
}

/// Filter, sort, and shape a task list into timeline bars.
///
/// Kept tasks are partitioned into Active-then-Done sections; within a
/// section they sort by priority rank then start date, ascending, with ties
/// keeping input order. A done task's bar ends on its completion date when
/// one is set, on its deadline otherwise. An empty result is valid output.
pub fn project(tasks: &[Task], filter: &TimelineFilter) -> Vec<TimelineBar> {
    let mut bars: Vec<TimelineBar> = tasks
        .iter()
        .filter(|t| filter.keeps(t))
        .map(|t| TimelineBar {
            section: if t.done { Section::Done } else { Section::Active },
            label: t.name.clone(),
            start: t.start,
            end: t.display_end(),
            priority: t.priority,
            plan_end: t.plan_end,
            done: t.done,
            done_date: t.done_date,
            notes: t.notes.clone(),
        })
        .collect();

    bars.sort_by_key(|b| (b.section.rank(), b.priority.rank(), b.start));
    bars
}
