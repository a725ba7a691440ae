use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priorities, most urgent first.
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    /// Sort rank: 0 = most urgent.
    pub fn rank(self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    /// Display color for timeline bars (hex RGB).
    pub fn color(self) -> &'static str {
        match self {
            Priority::Critical => "#e63946",
            Priority::High => "#ff7a59",
            Priority::Medium => "#f2c14e",
            Priority::Low => "#7aa6ff",
        }
    }

    /// The token used in persisted records and on the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Parse a priority token, case-insensitively.
    pub fn parse(s: &str) -> Option<Priority> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Some(Priority::Critical),
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single unit of work with a date range, priority, and completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique ID, assigned at creation, never reused.
    pub id: String,
    /// Display name (non-empty).
    pub name: String,
    /// Start date.
    pub start: NaiveDate,
    /// Planned end date (deadline). Invariant: `plan_end >= start`,
    /// enforced by the validation layer before any write.
    pub plan_end: NaiveDate,
    /// Priority bucket.
    pub priority: Priority,
    /// Free-form notes, may be empty.
    #[serde(default)]
    pub notes: String,
    /// Completion flag.
    #[serde(default)]
    pub done: bool,
    /// Completion date, managed by the reconciler: stamped when `done`
    /// flips to true, cleared when it flips back.
    #[serde(default)]
    pub done_date: Option<NaiveDate>,
}

impl Task {
    /// Create a new task with a freshly generated ID and `done = false`.
    pub fn new(
        name: String,
        start: NaiveDate,
        plan_end: NaiveDate,
        priority: Priority,
        notes: String,
    ) -> Self {
        Task {
            id: generate_id(),
            name,
            start,
            plan_end,
            priority,
            notes,
            done: false,
            done_date: None,
        }
    }

    /// The date a timeline bar for this task should end on: the real
    /// completion date when known, the deadline otherwise.
    pub fn display_end(&self) -> NaiveDate {
        if self.done {
            self.done_date.unwrap_or(self.plan_end)
        } else {
            self.plan_end
        }
    }
}

/// Generate a timestamp-derived task ID (microsecond resolution).
pub fn generate_id() -> String {
    Local::now().format("%Y%m%d%H%M%S%6f").to_string()
}
