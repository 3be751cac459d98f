//! Association types: join-table rows linking the simple entities.
//!
//! An association holds copies of the entities it links. It never owns their
//! lifecycle: deleting a member removes its join rows through the store's
//! foreign-key cascade, not through these values.

use serde::Serialize;

use crate::{
  Error, Result, competence::Competence, member::Member, project::Project,
  validate,
};

// ─── MemberCompetence ────────────────────────────────────────────────────────

/// A member's rating in a competence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberCompetence {
  member:     Member,
  competence: Competence,
  rating:     f64,
}

impl MemberCompetence {
  pub fn new(member: Member, competence: Competence, rating: f64) -> Result<Self> {
    Ok(Self { member, competence, rating: validate::finite("rating", rating)? })
  }

  pub fn member(&self) -> &Member { &self.member }

  pub fn competence(&self) -> &Competence { &self.competence }

  pub fn rating(&self) -> f64 { self.rating }
}

// ─── ProjectCompetence ───────────────────────────────────────────────────────

/// A competence a project calls for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCompetence {
  project:    Project,
  competence: Competence,
}

impl ProjectCompetence {
  pub fn new(project: Project, competence: Competence) -> Self {
    Self { project, competence }
  }

  pub fn project(&self) -> &Project { &self.project }

  pub fn competence(&self) -> &Competence { &self.competence }
}

// ─── MemberProject ───────────────────────────────────────────────────────────

/// A member's assignment to a project, with the competences they bring to it.
/// Stored as one join row per competence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberProject {
  member:      Member,
  project:     Project,
  competences: Vec<Competence>,
}

impl MemberProject {
  /// Fails when `competences` is empty: an assignment needs at least one.
  pub fn new(
    member: Member,
    project: Project,
    competences: Vec<Competence>,
  ) -> Result<Self> {
    if competences.is_empty() {
      return Err(Error::validation(
        "a member must join a project with at least one competence",
      ));
    }
    Ok(Self { member, project, competences })
  }

  pub fn member(&self) -> &Member { &self.member }

  pub fn project(&self) -> &Project { &self.project }

  pub fn competences(&self) -> &[Competence] { &self.competences }
}
