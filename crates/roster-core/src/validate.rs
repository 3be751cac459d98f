//! Shape checks shared by the entity constructors.

use crate::{Error, Result};

/// Reject empty or whitespace-only text fields.
pub(crate) fn non_empty(field: &str, value: impl Into<String>) -> Result<String> {
  let value = value.into();
  if value.trim().is_empty() {
    return Err(Error::validation(format!("{field} must not be empty")));
  }
  Ok(value)
}

pub(crate) fn non_negative(field: &str, value: i64) -> Result<i64> {
  if value < 0 {
    return Err(Error::validation(format!(
      "{field} must be a non-negative integer, got {value}"
    )));
  }
  Ok(value)
}

/// Ratings are stored as SQL `REAL`; NaN and infinities are not ratings.
pub(crate) fn finite(field: &str, value: f64) -> Result<f64> {
  if !value.is_finite() {
    return Err(Error::validation(format!("{field} must be a finite number")));
  }
  Ok(value)
}
