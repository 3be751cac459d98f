//! Error type for `roster-store-sqlite`.
//!
//! These errors never leave the crate on their own: the [`RosterStore`]
//! implementation wraps them as the cause of a
//! [`roster_core::Error::Storage`] fault.
//!
//! [`RosterStore`]: roster_core::store::RosterStore

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// A persisted row no longer satisfies the entity invariants.
  #[error("invalid persisted row: {0}")]
  Corrupt(#[from] roster_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
