//! The `RosterStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers (`roster-api`, `roster-server`) receive a store handle
//! explicitly and depend on this abstraction, not on any concrete backend.
//!
//! Every method reports failures with the [`Error`](crate::Error) taxonomy:
//! argument checks fail with `Validation` before the store is touched, keyed
//! lookups that match nothing fail with `NotFound`, and everything the store
//! itself rejects is `Storage`. Deletes are idempotent: removing a row that is
//! already gone succeeds.

use std::future::Future;

use chrono::NaiveDate;

use crate::{
  Result,
  area::Area,
  association::{MemberCompetence, MemberProject, ProjectCompetence},
  competence::Competence,
  member::Member,
  project::Project,
};

/// Abstraction over a roster store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  // ── Areas ─────────────────────────────────────────────────────────────

  fn create_area<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Area>> + Send + 'a;

  fn get_area<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Area>> + Send + 'a;

  fn delete_area<'a>(
    &'a self,
    area: &'a Area,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  // ── Competences ───────────────────────────────────────────────────────

  /// Create a competence owned by `area`.
  ///
  /// The area is re-resolved by name first, so a stale or never-persisted
  /// [`Area`] fails with `NotFound` before any competence row is written.
  fn create_competence<'a>(
    &'a self,
    name: &'a str,
    area: &'a Area,
  ) -> impl Future<Output = Result<Competence>> + Send + 'a;

  /// Look up a competence and its owning area (two round-trips).
  fn get_competence<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Competence>> + Send + 'a;

  fn list_competences_by_area<'a>(
    &'a self,
    area: &'a Area,
  ) -> impl Future<Output = Result<Vec<Competence>>> + Send + 'a;

  fn delete_competence<'a>(
    &'a self,
    competence: &'a Competence,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  // ── Members ───────────────────────────────────────────────────────────

  /// Create a member; a missing `available_date` is stored as
  /// [`UNSET_AVAILABLE_DATE`](crate::member::UNSET_AVAILABLE_DATE).
  fn create_member<'a>(
    &'a self,
    ist_id: i64,
    name: &'a str,
    available_date: Option<NaiveDate>,
  ) -> impl Future<Output = Result<Member>> + Send + 'a;

  fn get_member(
    &self,
    ist_id: i64,
  ) -> impl Future<Output = Result<Member>> + Send + '_;

  /// Members whose name contains `term` literally, in store order. Case
  /// sensitivity follows the store's collation.
  fn search_members<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<Member>>> + Send + 'a;

  fn list_members(&self) -> impl Future<Output = Result<Vec<Member>>> + Send + '_;

  /// Persist `member`'s name and available date, keyed by its IST ID.
  fn update_member<'a>(
    &'a self,
    member: &'a Member,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  fn delete_member<'a>(
    &'a self,
    member: &'a Member,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  // ── Projects ──────────────────────────────────────────────────────────

  /// Create a project; the returned value carries the store-assigned id.
  fn create_project<'a>(
    &'a self,
    name: &'a str,
    begin_date: Option<NaiveDate>,
  ) -> impl Future<Output = Result<Project>> + Send + 'a;

  fn get_project_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Project>> + Send + 'a;

  fn get_project_by_id(
    &self,
    project_id: i64,
  ) -> impl Future<Output = Result<Project>> + Send + '_;

  fn list_projects(&self) -> impl Future<Output = Result<Vec<Project>>> + Send + '_;

  /// Rename `project`, keyed by its current name.
  ///
  /// Renaming to the current name succeeds without touching the store. A
  /// project whose current name no longer matches a row is not detected:
  /// the update touches nothing and the renamed value is still returned.
  fn rename_project<'a>(
    &'a self,
    project: &'a Project,
    new_name: &'a str,
  ) -> impl Future<Output = Result<Project>> + Send + 'a;

  fn delete_project<'a>(
    &'a self,
    project: &'a Project,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  // ── Member ↔ Competence ───────────────────────────────────────────────

  fn add_member_competence<'a>(
    &'a self,
    member: &'a Member,
    competence: &'a Competence,
    rating: f64,
  ) -> impl Future<Output = Result<MemberCompetence>> + Send + 'a;

  /// Look up the rating link between `member` and `competence`.
  fn get_member_competence<'a>(
    &'a self,
    member: &'a Member,
    competence: &'a Competence,
  ) -> impl Future<Output = Result<MemberCompetence>> + Send + 'a;

  fn delete_member_competence<'a>(
    &'a self,
    link: &'a MemberCompetence,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  // ── Project ↔ Competence ──────────────────────────────────────────────

  fn add_project_competence<'a>(
    &'a self,
    project: &'a Project,
    competence: &'a Competence,
  ) -> impl Future<Output = Result<ProjectCompetence>> + Send + 'a;

  fn delete_project_competence<'a>(
    &'a self,
    link: &'a ProjectCompetence,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  // ── Member ↔ Project ──────────────────────────────────────────────────

  /// Assign `member` to `project`, one join row per competence, written as a
  /// single multi-row statement. Fails with `Validation` when `competences`
  /// is empty.
  fn add_member_to_project<'a>(
    &'a self,
    member: &'a Member,
    project: &'a Project,
    competences: &'a [Competence],
  ) -> impl Future<Output = Result<MemberProject>> + Send + 'a;

  /// Resolve a member's assignment to the project called `project_name`.
  ///
  /// Returns `None` when both exist but are not linked.
  fn get_member_with_project<'a>(
    &'a self,
    ist_id: i64,
    project_name: &'a str,
  ) -> impl Future<Output = Result<Option<MemberProject>>> + Send + 'a;

  /// Drop every join row between the assignment's member and project.
  fn remove_member_from_project<'a>(
    &'a self,
    link: &'a MemberProject,
  ) -> impl Future<Output = Result<()>> + Send + 'a;
}
