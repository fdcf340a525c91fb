//! Handlers for grouped stat-line totals under `/stats`.
//!
//! Every grouped list is ordered by its grouping key. The single-group
//! variants return 404 when no stat line falls into the group.
//!
//! | Method | Path | Grouped by |
//! |--------|------|------------|
//! | `GET`  | `/stats/player`, `/stats/players/:id` | player name |
//! | `GET`  | `/stats/teams`, `/stats/teams/:name` | opponent |
//! | `GET`  | `/stats/season`, `/stats/season/:season` | season label |
//! | `GET`  | `/stats/games`, `/stats/games/:date` | game date (`YYYY-MM-DD`) |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::PathRejection},
};
use chrono::NaiveDate;
use courtside_core::{
  store::StatsStore,
  summary::{GameSummary, OpponentSummary, PlayerSummary, SeasonSummary},
};
use uuid::Uuid;

use crate::error::ApiError;

// ─── By player ────────────────────────────────────────────────────────────────

/// `GET /stats/player`
pub async fn by_player<S: StatsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<PlayerSummary>>, ApiError> {
  let rows = store.totals_by_player().await.map_err(ApiError::store)?;
  Ok(Json(rows))
}

/// `GET /stats/players/:id`
pub async fn player<S: StatsStore>(
  State(store): State<Arc<S>>,
  id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PlayerSummary>, ApiError> {
  let Path(id) = id?;
  let row = store
    .player_totals(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("no stats for player {id}")))?;
  Ok(Json(row))
}

// ─── By opponent ──────────────────────────────────────────────────────────────

/// `GET /stats/teams`
pub async fn by_opponent<S: StatsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<OpponentSummary>>, ApiError> {
  let rows = store.totals_by_opponent().await.map_err(ApiError::store)?;
  Ok(Json(rows))
}

/// `GET /stats/teams/:name`
pub async fn opponent<S: StatsStore>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
) -> Result<Json<OpponentSummary>, ApiError> {
  let row = store
    .opponent_totals(&name)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("no stats against {name:?}")))?;
  Ok(Json(row))
}

// ─── By season ────────────────────────────────────────────────────────────────

/// `GET /stats/season`
pub async fn by_season<S: StatsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<SeasonSummary>>, ApiError> {
  let rows = store.totals_by_season().await.map_err(ApiError::store)?;
  Ok(Json(rows))
}

/// `GET /stats/season/:season`
pub async fn season<S: StatsStore>(
  State(store): State<Arc<S>>,
  Path(season): Path<String>,
) -> Result<Json<SeasonSummary>, ApiError> {
  let row = store
    .season_totals(&season)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("no stats for season {season:?}")))?;
  Ok(Json(row))
}

// ─── By game date ─────────────────────────────────────────────────────────────

/// `GET /stats/games`
pub async fn by_game<S: StatsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<GameSummary>>, ApiError> {
  let rows = store.totals_by_game().await.map_err(ApiError::store)?;
  Ok(Json(rows))
}

/// `GET /stats/games/:date`
pub async fn game<S: StatsStore>(
  State(store): State<Arc<S>>,
  date: Result<Path<NaiveDate>, PathRejection>,
) -> Result<Json<GameSummary>, ApiError> {
  let Path(date) = date?;
  let row = store
    .game_totals(date)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("no stats for {date}")))?;
  Ok(Json(row))
}
