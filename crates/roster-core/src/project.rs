//! Project: keyed by a store-assigned id and by a unique name.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Result, validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
  project_id: i64,
  name:       String,
  begin_date: Option<NaiveDate>,
}

impl Project {
  /// Build a project from persisted fields. New projects are created through
  /// [`RosterStore::create_project`](crate::store::RosterStore::create_project),
  /// which obtains the id from the store.
  pub fn new(
    project_id: i64,
    name: impl Into<String>,
    begin_date: Option<NaiveDate>,
  ) -> Result<Self> {
    Ok(Self {
      project_id: validate::non_negative("projectId", project_id)?,
      name: validate::non_empty("name", name)?,
      begin_date,
    })
  }

  pub fn project_id(&self) -> i64 { self.project_id }

  pub fn name(&self) -> &str { &self.name }

  pub fn begin_date(&self) -> Option<NaiveDate> { self.begin_date }

  /// The same project under `name`; used once a rename has been persisted.
  pub fn renamed(&self, name: impl Into<String>) -> Result<Self> {
    Self::new(self.project_id, name, self.begin_date)
  }
}

// ─── NewProject ──────────────────────────────────────────────────────────────

/// Validated input to
/// [`RosterStore::create_project`](crate::store::RosterStore::create_project).
/// `project_id` is always assigned by the store; it is not accepted from
/// callers.
#[derive(Debug, Clone)]
pub struct NewProject {
  name:       String,
  begin_date: Option<NaiveDate>,
}

impl NewProject {
  pub fn new(name: impl Into<String>, begin_date: Option<NaiveDate>) -> Result<Self> {
    Ok(Self { name: validate::non_empty("name", name)?, begin_date })
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn begin_date(&self) -> Option<NaiveDate> { self.begin_date }

  /// Attach the id the store assigned on insert.
  pub fn with_id(self, project_id: i64) -> Result<Project> {
    Project::new(project_id, self.name, self.begin_date)
  }
}
