//! Handlers for `/areas` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/areas` | Body: `{"area":"..."}`; returns 201 |
//! | `GET`    | `/areas/:area` | 404 if not found |
//! | `DELETE` | `/areas/:area` | 204; cascades to the area's competences |
//! | `GET`    | `/areas/:area/competences` | Competences owned by the area |

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
  pub area: String,
}

/// `POST /areas`, body: `{"area":"Engineering"}`
pub async fn create<S: RosterStore>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError> {
  let area = store.create_area(&body.area).await?;
  Ok((StatusCode::CREATED, Json(area)))
}

/// `GET /areas/:area`
pub async fn get_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(name): Param<String>,
) -> Result<Json<Area>, ApiError> {
  Ok(Json(store.get_area(&name).await?))
}

/// `DELETE /areas/:area`
pub async fn delete_one<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(name): Param<String>,
) -> Result<StatusCode, ApiError> {
  let area = store.get_area(&name).await?;
  store.delete_area(&area).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /areas/:area/competences`
pub async fn competences<S: RosterStore>(
  State(store): State<Arc<S>>,
  Param(name): Param<String>,
) -> Result<Json<Vec<Competence>>, ApiError> {
  let area = store.get_area(&name).await?;
  Ok(Json(store.list_competences_by_area(&area).await?))
}
