//! Member: a person in the organisation, keyed by IST ID.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Result, validate};

/// The date stored for members who never set an availability date.
///
/// Using the epoch rather than `NULL` keeps availability comparisons total.
pub const UNSET_AVAILABLE_DATE: NaiveDate = NaiveDate::from_ymd_opt(1970, 1, 1)
  .expect("1970-01-01 is a valid date");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
  ist_id:         i64,
  name:           String,
  available_date: NaiveDate,
}

impl Member {
  /// Validate and build a member. `available_date` defaults to
  /// [`UNSET_AVAILABLE_DATE`].
  pub fn new(
    ist_id: i64,
    name: impl Into<String>,
    available_date: Option<NaiveDate>,
  ) -> Result<Self> {
    Ok(Self {
      ist_id:         validate::non_negative("istId", ist_id)?,
      name:           validate::non_empty("name", name)?,
      available_date: available_date.unwrap_or(UNSET_AVAILABLE_DATE),
    })
  }

  /// Immutable once the member exists.
  pub fn ist_id(&self) -> i64 { self.ist_id }

  pub fn name(&self) -> &str { &self.name }

  pub fn available_date(&self) -> NaiveDate { self.available_date }

  /// In-memory only; persist with
  /// [`RosterStore::update_member`](crate::store::RosterStore::update_member).
  pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
    self.name = validate::non_empty("name", name)?;
    Ok(())
  }

  /// In-memory only; persist with
  /// [`RosterStore::update_member`](crate::store::RosterStore::update_member).
  pub fn set_available_date(&mut self, date: NaiveDate) {
    self.available_date = date;
  }
}
