//! Handlers for `/players` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/players/` | Ordered by `full_name` |
//! | `POST`  | `/players/` | Body: [`NewPlayer`]; 409 on duplicate name + hometown |
//! | `GET`   | `/players/:id` | 404 if not found |
//! | `PATCH` | `/players/:id` | Body: [`PlayerUpdate`]; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use courtside_core::{
  player::{NewPlayer, Player, PlayerUpdate},
  store::StatsStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /players/`
pub async fn list<S: StatsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Player>>, ApiError> {
  let players = store.list_players().await.map_err(ApiError::store)?;
  Ok(Json(players))
}

/// `GET /players/:id`
pub async fn get_one<S: StatsStore>(
  State(store): State<Arc<S>>,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Player>, ApiError> {
  let Path(id) = id?;
  let player = store
    .get_player(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Player not found".into()))?;
  Ok(Json(player))
}

/// `POST /players/`
pub async fn create<S: StatsStore>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewPlayer>, JsonRejection>,
) -> Result<Json<Player>, ApiError> {
  let Json(body) = body?;
  let player = store.create_player(body).await.map_err(ApiError::store)?;
  Ok(Json(player))
}

/// `PATCH /players/:id`: only the supplied fields change.
pub async fn update<S: StatsStore>(
  State(store): State<Arc<S>>,
  id: Result<Path<Uuid>, PathRejection>,
  body: Result<Json<PlayerUpdate>, JsonRejection>,
) -> Result<Json<Player>, ApiError> {
  let Path(id) = id?;
  let Json(body) = body?;
  let player = store
    .update_player(id, body)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Player not found".into()))?;
  Ok(Json(player))
}
