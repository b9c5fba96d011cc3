//! HTTP handlers for students, courses, and enrollments.

pub mod course;
pub mod enrollment;
pub mod student;

pub use course::*;
pub use enrollment::*;
pub use student::*;

use crate::error::AppError;

/// Canonical decimal id: ASCII digits only, no sign, no leading zero.
pub(crate) fn parse_path_id(id_str: &str) -> Option<i64> {
    let canonical = !id_str.is_empty()
        && id_str.bytes().all(|b| b.is_ascii_digit())
        && (id_str == "0" || !id_str.starts_with('0'));
    if canonical {
        id_str.parse().ok()
    } else {
        None
    }
}

/// Parse an integer path id. Anything that is not a canonical id cannot name a record,
/// so it is reported as not found.
pub(crate) fn parse_id(id_str: &str, what: &str) -> Result<i64, AppError> {
    parse_path_id(id_str).ok_or_else(|| AppError::NotFound(format!("{} not found", what)))
}

pub(crate) fn not_found(what: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} {} not found", what, id))
}
