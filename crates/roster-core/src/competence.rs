//! Competence: a skill that belongs to exactly one [`Area`].

use serde::{Serialize, Serializer};

use crate::{Result, area::Area, validate};

/// A competence, keyed by its unique name.
///
/// Serialises as `{"competence": "...", "area": "<area name>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Competence {
  competence: String,
  #[serde(serialize_with = "area_name")]
  area:       Area,
}

fn area_name<S: Serializer>(area: &Area, s: S) -> Result<S::Ok, S::Error> {
  s.serialize_str(area.name())
}

impl Competence {
  pub fn new(name: impl Into<String>, area: Area) -> Result<Self> {
    Ok(Self {
      competence: validate::non_empty("competence", name)?,
      area,
    })
  }

  pub fn name(&self) -> &str { &self.competence }

  pub fn area(&self) -> &Area { &self.area }
}
