//! Handlers for stat-line CRUD under `/stats`.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/stats/` | Ordered by game date |
//! | `POST`  | `/stats/` | Body: [`NewStatLine`] |
//! | `GET`   | `/stats/:id` | 404 if not found |
//! | `PATCH` | `/stats/:id` | Body: [`StatLineUpdate`]; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use courtside_core::{
  stat_line::{NewStatLine, StatLine, StatLineUpdate},
  store::StatsStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /stats/`
pub async fn list<S: StatsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<StatLine>>, ApiError> {
  let lines = store.list_stat_lines().await.map_err(ApiError::store)?;
  Ok(Json(lines))
}

/// `GET /stats/:id`
pub async fn get_one<S: StatsStore>(
  State(store): State<Arc<S>>,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<StatLine>, ApiError> {
  let Path(id) = id?;
  let line = store
    .get_stat_line(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Stat line not found".into()))?;
  Ok(Json(line))
}

/// `POST /stats/`
pub async fn create<S: StatsStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewStatLine>, JsonRejection>,
) -> Result<Json<StatLine>, ApiError> {
  let Json(body) = body?;
  let line = store.create_stat_line(body).await.map_err(ApiError::store)?;
  Ok(Json(line))
}

/// `PATCH /stats/:id`
pub async fn update<S: StatsStore>(
  State(store): State<Arc<S>>,
  id: Result<Path<Uuid>, PathRejection>,
  body: Result<Json<StatLineUpdate>, JsonRejection>,
) -> Result<Json<StatLine>, ApiError> {
  let Path(id) = id?;
  let Json(body) = body?;
  let line = store
    .update_stat_line(id, body)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Stat line not found".into()))?;
  Ok(Json(line))
}
