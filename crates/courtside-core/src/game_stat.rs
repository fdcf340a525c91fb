//! Game stats: team-level snapshots of a single game.
//!
//! Each record combines CNU's team totals with the opponent's totals, the
//! pre-computed differentials between them, and calendar/context flags. At
//! most one record exists per calendar date; records are never updated.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every caller-supplied field of a game stat. All fields are required.
///
/// Integer flags (`home`, `overtime`, `ranked`, `win`) are `0`/`1` on the
/// wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStatLine {
  // ── Context ─────────────────────────────────────────────────────────────
  pub date:     NaiveDate,
  pub opponent: String,
  pub season:   String,
  pub day:      i32,
  pub weekday:  i32,
  pub month:    i32,
  pub year:     i32,
  pub home:     i32,
  pub overtime: i32,
  pub ranked:   i32,
  pub win:      i32,

  // ── CNU ─────────────────────────────────────────────────────────────────
  pub fgm:              i32,
  pub fga:              i32,
  pub fg_percent:       f64,
  pub three_fgm:        i32,
  pub three_fga:        i32,
  pub three_pt_percent: f64,
  pub ftm:              i32,
  pub fta:              i32,
  pub ft_percent:       f64,
  pub off_reb:          i32,
  pub def_reb:          i32,
  pub tot_reb:          i32,
  pub pf:               i32,
  pub ast:              i32,
  pub turnover:         i32,
  pub blk:              i32,
  pub stl:              i32,
  pub pts:              i32,
  pub cnu_score:        i32,
  pub ppg_avg:          f64,
  pub rb_avg:           f64,

  // ── Opponent ────────────────────────────────────────────────────────────
  pub opp_fgm:              i32,
  pub opp_fga:              i32,
  pub opp_fg_percent:       f64,
  pub opp_three_fgm:        i32,
  pub opp_three_fga:        i32,
  pub opp_three_pt_percent: f64,
  pub opp_ftm:              i32,
  pub opp_fta:              i32,
  pub opp_ft_percent:       f64,
  pub opp_off_reb:          i32,
  pub opp_def:              i32,
  pub opp_tot_reb:          i32,
  pub opp_pf:               i32,
  pub opp_ast:              i32,
  pub opp_turnover:         i32,
  pub opp_blk:              i32,
  pub opp_stl:              i32,
  pub opp_pts:              i32,
  pub opp_score:            i32,
  pub opp_ppg_avg:          f64,
  pub opp_rb_avg:           f64,

  // ── Differentials (CNU minus opponent) ──────────────────────────────────
  pub fgm_diff:              i32,
  pub fga_diff:              i32,
  pub fg_percent_diff:       f64,
  pub three_fgm_diff:        f64,
  pub three_fga_diff:        i32,
  pub three_pt_percent_diff: f64,
  pub ftm_diff:              i32,
  pub fta_diff:              i32,
  pub ft_percent_diff:       f64,
  pub off_diff:              i32,
  pub def_diff:              i32,
  pub tot_diff:              i32,
  pub pf_diff:               i32,
  pub ast_diff:              i32,
  pub turnover_diff:         i32,
  pub blk_diff:              i32,
  pub stl_diff:              i32,
}

/// A stored game stat: the submitted line plus server-assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStat {
  pub id:            Uuid,
  pub created_on:    DateTime<Utc>,
  pub last_modified: DateTime<Utc>,
  #[serde(flatten)]
  pub line:          GameStatLine,
}

impl GameStat {
  pub fn new(id: Uuid, line: GameStatLine, now: DateTime<Utc>) -> Self {
    Self { id, created_on: now, last_modified: now, line }
  }
}
