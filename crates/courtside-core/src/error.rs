//! Error types for `courtside-core`.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown class standing: {0:?}")]
  UnknownClassStanding(String),

  #[error("unknown position: {0:?}")]
  UnknownPosition(String),

  #[error("player {full_name:?} from {hometown_hs:?} already exists")]
  DuplicatePlayer {
    full_name:   String,
    hometown_hs: String,
  },

  #[error("a game stat record for {0} already exists")]
  DuplicateGameStat(NaiveDate),
}

impl Error {
  /// Whether this error is a uniqueness violation caused by the caller's
  /// input rather than a storage failure.
  pub fn is_conflict(&self) -> bool {
    matches!(self, Self::DuplicatePlayer { .. } | Self::DuplicateGameStat(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
