//! Aggregate read models over stat lines.
//!
//! Each summary reduces every stat line sharing a grouping key (player,
//! opponent, season, or game date) to one row. Counting stats are summed.
//! Shooting percentages are the arithmetic mean of the stored per-game
//! values, not makes over attempts recomputed from the sums; the two differ
//! whenever attempt volume varies between games.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summed counting stats and averaged percentages for one group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatTotals {
  /// Number of stat lines in the group.
  pub games:        i64,
  pub fgm:          i64,
  pub fga:          i64,
  pub fg_pct:       f64,
  pub three_fgm:    i64,
  pub three_fga:    i64,
  pub three_pt_pct: f64,
  pub ftm:          i64,
  pub fta:          i64,
  pub ft_pct:       f64,
  pub off_reb:      i64,
  pub def_reb:      i64,
  pub tot_reb:      i64,
  pub pf:           i64,
  pub ast:          i64,
  pub to:           i64,
  pub blk:          i64,
  pub stl:          i64,
  pub pts:          i64,
}

/// Totals for every stat line owned by players sharing `full_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
  pub full_name: String,
  #[serde(flatten)]
  pub totals:    StatTotals,
}

/// Totals for every stat line against one opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentSummary {
  pub opponent: String,
  #[serde(flatten)]
  pub totals:   StatTotals,
}

/// Totals for every stat line in one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSummary {
  pub season: String,
  #[serde(flatten)]
  pub totals: StatTotals,
}

/// Totals for one game date. A date is expected to hold exactly one game, so
/// the team and opponent are surfaced alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
  pub date:     NaiveDate,
  pub team:     String,
  pub opponent: String,
  #[serde(flatten)]
  pub totals:   StatTotals,
}

/// A distinct game as seen through the stat lines recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRef {
  pub date:     NaiveDate,
  pub team:     String,
  pub opponent: String,
}
