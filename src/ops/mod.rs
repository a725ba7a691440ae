pub mod reconcile;
pub mod timeline;
pub mod validate;

pub use reconcile::{EditedRow, reconcile};
pub use timeline::{Section, TimelineBar, TimelineFilter, project};
pub use validate::{ValidateError, validate_dates, validate_name, validate_rows};
