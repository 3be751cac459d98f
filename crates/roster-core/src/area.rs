//! Area: a named grouping that owns competences.

use serde::Serialize;

use crate::{Result, validate};

/// A knowledge area, keyed by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
  area: String,
}

impl Area {
  pub fn new(name: impl Into<String>) -> Result<Self> {
    Ok(Self { area: validate::non_empty("area", name)? })
  }

  pub fn name(&self) -> &str { &self.area }
}
