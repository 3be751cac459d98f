//! Error types for `roster-core`.
//!
//! Every fallible operation in the workspace reports one of three faults.
//! The HTTP layer reads [`Error::kind`] (or [`Error::status_code`]) and
//! [`Error::message`] to build a response; the optional cause is for logs
//! only.

use thiserror::Error;

type Cause = Box<dyn std::error::Error + Send + Sync>;

/// Classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Malformed input, rejected before any store access.
  Validation,
  /// A keyed lookup matched no row.
  NotFound,
  /// Any unexpected failure from the store.
  Storage,
}

impl ErrorKind {
  /// The HTTP status code this kind maps to.
  pub fn status_code(self) -> u16 {
    match self {
      Self::Validation => 400,
      Self::NotFound => 404,
      Self::Storage => 500,
    }
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("{message}")]
  Validation { message: String },

  #[error("{message}")]
  NotFound { message: String },

  #[error("{message}")]
  Storage {
    message: String,
    #[source]
    cause:   Option<Cause>,
  },
}

impl Error {
  pub fn validation(message: impl Into<String>) -> Self {
    Self::Validation { message: message.into() }
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::NotFound { message: message.into() }
  }

  /// A storage fault wrapping the underlying store error.
  pub fn storage(
    message: impl Into<String>,
    cause: impl Into<Cause>,
  ) -> Self {
    Self::Storage { message: message.into(), cause: Some(cause.into()) }
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation { .. } => ErrorKind::Validation,
      Self::NotFound { .. } => ErrorKind::NotFound,
      Self::Storage { .. } => ErrorKind::Storage,
    }
  }

  pub fn status_code(&self) -> u16 { self.kind().status_code() }

  pub fn message(&self) -> &str {
    match self {
      Self::Validation { message }
      | Self::NotFound { message }
      | Self::Storage { message, .. } => message,
    }
  }

  /// Re-raise validation and not-found faults unchanged; wrap anything else
  /// as a storage fault with `message`.
  ///
  /// Used by lookups that compose several store round-trips.
  pub fn or_storage(self, message: impl Into<String>) -> Self {
    match self {
      Self::Storage { .. } => Self::storage(message, self),
      specific => specific,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
