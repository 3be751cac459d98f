//! Handlers for `/projects` endpoints.
//!
//! Projects are addressed by name; the numeric id is store-assigned and only
//! appears in responses.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use roster_core::{
  association::ProjectCompetence,
  project::Project,
  store::RosterStore,
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{JsonBody, Param},
};

/// `GET /projects`
pub async fn list<S: RosterStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Project>>, ApiError> {
  Ok(Json(store.list_projects().await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBody {
  pub project_name: String,
  #[serde(default)]
  pub begin_date:   Option<NaiveDate>,
}

/// `POST /projects`, body: `{"projectName":"Apollo","beginDate":"2024-01-01"}`
pub async fn create<S: RosterStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let project = store
    .create_project(&body.project_name, body.begin_date)
    .await?;
  Ok((StatusCode::CREATED, Json(project)))
}

/// `GET /projects/:project_name`
pub async fn get_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(name): Param<String>,
) -> Result<Json<Project>, ApiError> {
  Ok(Json(store.get_project_by_name(&name).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  #[serde(default)]
  pub new_name: Option<String>,
}

/// `PUT /projects/:project_name`, body: `{"newName":"Artemis"}`
pub async fn update_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(name): Param<String>,
  JsonBody(body): JsonBody<UpdateBody>,
) -> Result<Json<Project>, ApiError> {
  let project = store.get_project_by_name(&name).await?;
  let project = match body.new_name {
    Some(new_name) => store.rename_project(&project, &new_name).await?,
    None => project,
  };
  Ok(Json(project))
}

/// `DELETE /projects/:project_name`
pub async fn delete_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(name): Param<String>,
) -> Result<StatusCode, ApiError> {
  let project = store.get_project_by_name(&name).await?;
  store.delete_project(&project).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct CompetenceBody {
  pub competence: String,
}

/// `POST /projects/:project_name/competences`
pub async fn add_competence<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(name): Param<String>,
  JsonBody(body): JsonBody<CompetenceBody>,
) -> Result<impl IntoResponse, ApiError> {
  let project = store.get_project_by_name(&name).await?;
  let competence = store.get_competence(&body.competence).await?;
  let link = store.add_project_competence(&project, &competence).await?;
  Ok((StatusCode::CREATED, Json(link)))
}

/// `DELETE /projects/:project_name/competences/:competence`
pub async fn delete_competence<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param((name, competence)): Param<(String, String)>,
) -> Result<StatusCode, ApiError> {
  let project = store.get_project_by_name(&name).await?;
  let competence = store.get_competence(&competence).await?;
  store
    .delete_project_competence(&ProjectCompetence::new(project, competence))
    .await?;
  Ok(StatusCode::NO_CONTENT)
}
