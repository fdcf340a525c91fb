//! Distinct values drawn from recorded stat lines.
//!
//! | Method | Path | Returns |
//! |--------|------|---------|
//! | `GET`  | `/teams/` | opponent names, ordered |
//! | `GET`  | `/games/` | `(date, team, opponent)` triples, ordered by date |
//! | `GET`  | `/seasons/` | season labels, ordered |

use std::sync::Arc;

use axum::{Json, extract::State};
use courtside_core::{store::StatsStore, summary::GameRef};

use crate::error::ApiError;

/// `GET /teams/`
pub async fn opponents<S: StatsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<String>>, ApiError> {
  Ok(Json(store.list_opponents().await.map_err(ApiError::store)?))
}

/// `GET /games/`
pub async fn games<S: StatsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<GameRef>>, ApiError> {
  Ok(Json(store.list_games().await.map_err(ApiError::store)?))
}

/// `GET /seasons/`
pub async fn seasons<S: StatsStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<String>>, ApiError> {
  Ok(Json(store.list_seasons().await.map_err(ApiError::store)?))
}
