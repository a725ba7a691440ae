pub mod date;
pub mod sheet;

pub use date::{parse_date, parse_done_token};
pub use sheet::{SHEET_HEADERS, TaskRecord, header_line, parse_sheet, serialize_sheet};
