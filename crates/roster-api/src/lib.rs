//! JSON REST API for the roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::RosterStore`].
//! Transport concerns (binding, TLS, request logging) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = roster_api::api_router(Arc::new(store));
//! ```

pub mod areas;
pub mod competences;
pub mod error;
pub mod extract;
pub mod members;
pub mod projects;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use roster_core::store::RosterStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RosterStore + 'static,
{
  Router::new()
    // Members
    .route("/members", get(members::list::<S>).post(members::create::<S>))
    .route("/members/search/{name}", get(members::search::<S>))
    .route(
      "/members/{ist_id}",
      get(members::get_one::<S>)
        .put(members::update_one::<S>)
        .delete(members::delete_one::<S>),
    )
    .route("/members/{ist_id}/competences", post(members::add_competence::<S>))
    .route(
      "/members/{ist_id}/competences/{competence}",
      delete(members::delete_competence::<S>),
    )
    .route(
      "/members/{ist_id}/projects/{project_name}",
      get(members::get_project::<S>)
        .post(members::assign_project::<S>)
        .delete(members::unassign_project::<S>),
    )
    // Projects
    .route("/projects", get(projects::list::<S>).post(projects::create::<S>))
    .route(
      "/projects/{project_name}",
      get(projects::get_one::<S>)
        .put(projects::update_one::<S>)
        .delete(projects::delete_one::<S>),
    )
    .route(
      "/projects/{project_name}/competences",
      post(projects::add_competence::<S>),
    )
    .route(
      "/projects/{project_name}/competences/{competence}",
      delete(projects::delete_competence::<S>),
    )
    // Competences
    .route("/competences", post(competences::create::<S>))
    .route(
      "/competences/{name}",
      get(competences::get_one::<S>).delete(competences::delete_one::<S>),
    )
    // Areas
    .route("/areas", post(areas::create::<S>))
    .route(
      "/areas/{area}",
      get(areas::get_one::<S>).delete(areas::delete_one::<S>),
    )
    .route("/areas/{area}/competences", get(areas::competences::<S>))
    .with_state(store)
}
