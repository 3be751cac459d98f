//! Handlers for `/members` endpoints, including a member's competence ratings
//! and project assignments.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/members` | All members |
//! | `POST`   | `/members` | Body: `{"istId":1,"name":"..","availableDate":"2024-01-01"}` |
//! | `GET`    | `/members/search/:name` | Substring match on the name |
//! | `GET`    | `/members/:ist_id` | 404 if not found |
//! | `PUT`    | `/members/:ist_id` | Body: `{"name":"..","availableDate":".."}`, both optional |
//! | `DELETE` | `/members/:ist_id` | 204 |
//! | `POST`   | `/members/:ist_id/competences` | Body: `{"competence":"..","rating":4.5}` |
//! | `DELETE` | `/members/:ist_id/competences/:competence` | 404 if unrated |
//! | `GET`    | `/members/:ist_id/projects/:project_name` | 404 if unassigned |
//! | `POST`   | `/members/:ist_id/projects/:project_name` | Body: `{"competences":[".."]}` |
//! | `DELETE` | `/members/:ist_id/projects/:project_name` | 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use roster_core::{association::MemberProject, member::Member, store::RosterStore};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{JsonBody, Param},
};

// ─── List / search ────────────────────────────────────────────────────────────

/// `GET /members`
pub async fn list<S: RosterStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Member>>, ApiError> {
  Ok(Json(store.list_members().await?))
}

/// `GET /members/search/:name`
pub async fn search<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(term): Param<String>,
) -> Result<Json<Vec<Member>>, ApiError> {
  Ok(Json(store.search_members(&term).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub ist_id:         i64,
  pub name:           String,
  #[serde(default)]
  pub available_date: Option<NaiveDate>,
}

/// `POST /members`
pub async fn create<S: RosterStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let member = store
    .create_member(body.ist_id, &body.name, body.available_date)
    .await?;
  Ok((StatusCode::CREATED, Json(member)))
}

// ─── Get / update / delete ────────────────────────────────────────────────────

/// `GET /members/:ist_id`
pub async fn get_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(ist_id): Param<i64>,
) -> Result<Json<Member>, ApiError> {
  Ok(Json(store.get_member(ist_id).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  #[serde(default)]
  pub name:           Option<String>,
  #[serde(default)]
  pub available_date: Option<NaiveDate>,
}

/// `PUT /members/:ist_id`: fields left out keep their stored value.
pub async fn update_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(ist_id): Param<i64>,
  JsonBody(body): JsonBody<UpdateBody>,
) -> Result<Json<Member>, ApiError> {
  let mut member = store.get_member(ist_id).await?;
  if let Some(name) = body.name {
    member.set_name(name)?;
  }
  if let Some(date) = body.available_date {
    member.set_available_date(date);
  }
  store.update_member(&member).await?;
  Ok(Json(member))
}

/// `DELETE /members/:ist_id`
pub async fn delete_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(ist_id): Param<i64>,
) -> Result<StatusCode, ApiError> {
  let member = store.get_member(ist_id).await?;
  store.delete_member(&member).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Competences ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RateBody {
  pub competence: String,
  pub rating:     f64,
}

/// `POST /members/:ist_id/competences`
pub async fn add_competence<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(ist_id): Param<i64>,
  JsonBody(body): JsonBody<RateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let member = store.get_member(ist_id).await?;
  let competence = store.get_competence(&body.competence).await?;
  let link = store
    .add_member_competence(&member, &competence, body.rating)
    .await?;
  Ok((StatusCode::CREATED, Json(link)))
}

/// `DELETE /members/:ist_id/competences/:competence`
pub async fn delete_competence<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param((ist_id, name)): Param<(i64, String)>,
) -> Result<StatusCode, ApiError> {
  let member = store.get_member(ist_id).await?;
  let competence = store.get_competence(&name).await?;
  let link = store.get_member_competence(&member, &competence).await?;
  store.delete_member_competence(&link).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Projects ─────────────────────────────────────────────────────────────────

/// `GET /members/:ist_id/projects/:project_name`
pub async fn get_project<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param((ist_id, project_name)): Param<(i64, String)>,
) -> Result<Json<MemberProject>, ApiError> {
  store
    .get_member_with_project(ist_id, &project_name)
    .await?
    .map(Json)
    .ok_or_else(|| {
      ApiError::NotFound(format!(
        "member {ist_id} is not assigned to project {project_name}"
      ))
    })
}

#[derive(Debug, Deserialize)]
pub struct AssignBody {
  pub competences: Vec<String>,
}

/// `POST /members/:ist_id/projects/:project_name`
///
/// Every competence name is resolved before anything is written, so an
/// unknown name fails with 404 and leaves the assignment untouched.
pub async fn assign_project<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param((ist_id, project_name)): Param<(i64, String)>,
  JsonBody(body): JsonBody<AssignBody>,
) -> Result<impl IntoResponse, ApiError> {
  let member = store.get_member(ist_id).await?;
  let project = store.get_project_by_name(&project_name).await?;

  let mut competences = Vec::with_capacity(body.competences.len());
  for name in &body.competences {
    competences.push(store.get_competence(name).await?);
  }

  let link = store
    .add_member_to_project(&member, &project, &competences)
    .await?;
  Ok((StatusCode::CREATED, Json(link)))
}

/// `DELETE /members/:ist_id/projects/:project_name`
pub async fn unassign_project<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param((ist_id, project_name)): Param<(i64, String)>,
) -> Result<StatusCode, ApiError> {
  if let Some(link) = store.get_member_with_project(ist_id, &project_name).await? {
    store.remove_member_from_project(&link).await?;
  }
  Ok(StatusCode::NO_CONTENT)
}
