//! Encoding and decoding helpers between Rust domain types and the values
//! stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` text. Rows are first read into `Raw*`
//! structs of plain column values and only then validated into entities, so
//! rusqlite never sees a domain error.

use chrono::NaiveDate;
use roster_core::{
  area::Area,
  competence::Competence,
  member::Member,
  project::Project,
};
use rusqlite::Row;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Area ────────────────────────────────────────────────────────────────────

pub fn decode_area(name: String) -> Result<Area> { Ok(Area::new(name)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values read directly from a `member` row.
pub struct RawMember {
  pub ist_id:         i64,
  pub name:           String,
  pub available_date: String,
}

impl RawMember {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      ist_id:         row.get(0)?,
      name:           row.get(1)?,
      available_date: row.get(2)?,
    })
  }

  pub fn into_member(self) -> Result<Member> {
    let date = decode_date(&self.available_date)?;
    Ok(Member::new(self.ist_id, self.name, Some(date))?)
  }
}

/// Column values read directly from a `project` row.
pub struct RawProject {
  pub project_id: i64,
  pub name:       String,
  pub begin_date: Option<String>,
}

impl RawProject {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      project_id: row.get(0)?,
      name:       row.get(1)?,
      begin_date: row.get(2)?,
    })
  }

  pub fn into_project(self) -> Result<Project> {
    let begin_date = self.begin_date.as_deref().map(decode_date).transpose()?;
    Ok(Project::new(self.project_id, self.name, begin_date)?)
  }
}

/// Column values read directly from a `competence` row. The owning area is
/// resolved separately.
pub struct RawCompetence {
  pub competence: String,
  pub area:       String,
}

impl RawCompetence {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { competence: row.get(0)?, area: row.get(1)? })
  }

  pub fn into_competence(self, area: Area) -> Result<Competence> {
    Ok(Competence::new(self.competence, area)?)
  }
}
