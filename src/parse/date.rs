use chrono::{NaiveDate, NaiveDateTime};

/// Parse a calendar date, discarding any time-of-day component.
///
/// Accepts `YYYY-MM-DD`, or a datetime with a `T` or space separator and an
/// optional fractional-seconds part. Returns `None` for anything else,
/// including the empty string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Parse a boolean-ish token as written by spreadsheet-style backends.
pub fn parse_done_token(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}
