use chrono::NaiveDate;

use crate::ops::reconcile::EditedRow;

/// Error type for user-input validation. Checked before any reconcile or
/// store write; a failure means no state mutation happened.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("task name must not be empty")]
    EmptyName,
    #[error("deadline {plan_end} is earlier than start {start}")]
    DeadlineBeforeStart {
        start: NaiveDate,
        plan_end: NaiveDate,
    },
    #[error("row {row} ({name}): {source}")]
    BadRow {
        row: usize,
        name: String,
        source: Box<ValidateError>,
    },
}

/// Reject an empty (or all-whitespace) task name.
pub fn validate_name(name: &str) -> Result<(), ValidateError> {
    if name.trim().is_empty() {
        return Err(ValidateError::EmptyName);
    }
    Ok(())
}

/// Reject a deadline earlier than the start date.
pub fn validate_dates(start: NaiveDate, plan_end: NaiveDate) -> Result<(), ValidateError> {
    if plan_end < start {
        return Err(ValidateError::DeadlineBeforeStart { start, plan_end });
    }
    Ok(())
}

/// Validate an edited batch before reconciling. Any bad row rejects the
/// whole batch; the error names the first offending row (1-based).
pub fn validate_rows(rows: &[EditedRow]) -> Result<(), ValidateError> {
    for (i, row) in rows.iter().enumerate() {
        let check = validate_name(&row.name).and_then(|_| validate_dates(row.start, row.plan_end));
        if let Err(e) = check {
            return Err(ValidateError::BadRow {
                row: i + 1,
                name: row.name.clone(),
                source: Box::new(e),
            });
        }
    }
    Ok(())
}
