//! Handlers for `/gamestats` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/gamestats/` | Ordered by date |
//! | `POST` | `/gamestats/` | Body: [`GameStatLine`]; 409 if the date already has a record |
//! | `GET`  | `/gamestats/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use courtside_core::{
  game_stat::{GameStat, GameStatLine},
  store::StatsStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /gamestats/`
pub async fn list<S: StatsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<GameStat>>, ApiError> {
  let stats = store.list_game_stats().await.map_err(ApiError::store)?;
  Ok(Json(stats))
}

/// `GET /gamestats/:id`
pub async fn get_one<S: StatsStore>(
  State(store): State<Arc<S>>,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<GameStat>, ApiError> {
  let Path(id) = id?;
  let stat = store
    .get_game_stat(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Game Stat not found".into()))?;
  Ok(Json(stat))
}

/// `POST /gamestats/`
pub async fn create<S: StatsStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<GameStatLine>, JsonRejection>,
) -> Result<Json<GameStat>, ApiError> {
  let Json(body) = body?;
  let stat = store.create_game_stat(body).await.map_err(ApiError::store)?;
  Ok(Json(stat))
}
