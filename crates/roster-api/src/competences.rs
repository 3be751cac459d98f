//! Handlers for `/competences` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{area::Area, competence::Competence, store::RosterStore};
use serde::Deserialize;

use crate::{
  error::ApiError,
  extract::{JsonBody, Param},
};

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub competence: String,
  /// Name of an existing area; 404 if it does not exist.
  pub area:       String,
}

/// `POST /competences`, body: `{"competence":"Rust","area":"Engineering"}`
pub async fn create<S: RosterStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let area = Area::new(body.area)?;
  let competence = store.create_competence(&body.competence, &area).await?;
  Ok((StatusCode::CREATED, Json(competence)))
}

/// `GET /competences/:name`
pub async fn get_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(name): Param<String>,
) -> Result<Json<Competence>, ApiError> {
  Ok(Json(store.get_competence(&name).await?))
}

/// `DELETE /competences/:name`
pub async fn delete_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(name): Param<String>,
) -> Result<StatusCode, ApiError> {
  let competence = store.get_competence(&name).await?;
  store.delete_competence(&competence).await?;
  Ok(StatusCode::NO_CONTENT)
}
