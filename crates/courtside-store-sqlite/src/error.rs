//! Error type for `courtside-store-sqlite`.

use courtside_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] courtside_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl StoreError for Error {
  fn is_conflict(&self) -> bool {
    matches!(self, Self::Core(e) if e.is_conflict())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
