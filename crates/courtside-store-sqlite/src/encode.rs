//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`
//! (so lexical order is chronological), UUIDs as hyphenated lowercase strings,
//! and roster vocabularies as their printed abbreviations.

use chrono::{DateTime, NaiveDate, Utc};
use courtside_core::{
  game_stat::{GameStat, GameStatLine},
  player::Player,
  stat_line::StatLine,
  summary::{GameRef, GameSummary, StatTotals},
};
use rusqlite::Row;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Players ─────────────────────────────────────────────────────────────────

pub const PLAYER_COLUMNS: &str = "id, full_name, class_name, position, height, weight, \
   hometown_hs, jersey_num, created_on, last_modified";

/// Raw values read directly from a `players` row.
pub struct RawPlayer {
  pub id:            String,
  pub full_name:     String,
  pub class_name:    String,
  pub position:      String,
  pub height:        String,
  pub weight:        String,
  pub hometown_hs:   String,
  pub jersey_num:    u16,
  pub created_on:    String,
  pub last_modified: String,
}

impl RawPlayer {
  /// Read a row selected with [`PLAYER_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      full_name:     row.get(1)?,
      class_name:    row.get(2)?,
      position:      row.get(3)?,
      height:        row.get(4)?,
      weight:        row.get(5)?,
      hometown_hs:   row.get(6)?,
      jersey_num:    row.get(7)?,
      created_on:    row.get(8)?,
      last_modified: row.get(9)?,
    })
  }

  pub fn into_player(self) -> Result<Player> {
    Ok(Player {
      id:            decode_uuid(&self.id)?,
      full_name:     self.full_name,
      class_name:    self.class_name.parse()?,
      position:      self.position.parse()?,
      height:        self.height,
      weight:        self.weight,
      hometown_hs:   self.hometown_hs,
      jersey_num:    self.jersey_num,
      created_on:    decode_dt(&self.created_on)?,
      last_modified: decode_dt(&self.last_modified)?,
    })
  }
}

// ─── Stat lines ──────────────────────────────────────────────────────────────

pub const STAT_LINE_COLUMNS: &str = "id, date, team, opponent, season, \
   fgm, fga, fg_pct, three_fgm, three_fga, three_pt_pct, ftm, fta, ft_pct, \
   off_reb, def_reb, tot_reb, pf, ast, \"to\", blk, stl, pts, \
   player_id, created_on, last_modified";

/// Raw values read directly from a `stat_lines` row. Counting stats need no
/// decoding and are read straight into their domain types.
pub struct RawStatLine {
  pub id:            String,
  pub date:          String,
  pub team:          String,
  pub opponent:      String,
  pub season:        String,
  pub fgm:           u32,
  pub fga:           u32,
  pub fg_pct:        f64,
  pub three_fgm:     u32,
  pub three_fga:     u32,
  pub three_pt_pct:  f64,
  pub ftm:           u32,
  pub fta:           u32,
  pub ft_pct:        f64,
  pub off_reb:       u32,
  pub def_reb:       u32,
  pub tot_reb:       u32,
  pub pf:            u32,
  pub ast:           u32,
  pub to:            u32,
  pub blk:           u32,
  pub stl:           u32,
  pub pts:           u32,
  pub player_id:     Option<String>,
  pub created_on:    String,
  pub last_modified: String,
}

impl RawStatLine {
  /// Read a row selected with [`STAT_LINE_COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      date:          row.get(1)?,
      team:          row.get(2)?,
      opponent:      row.get(3)?,
      season:        row.get(4)?,
      fgm:           row.get(5)?,
      fga:           row.get(6)?,
      fg_pct:        row.get(7)?,
      three_fgm:     row.get(8)?,
      three_fga:     row.get(9)?,
      three_pt_pct:  row.get(10)?,
      ftm:           row.get(11)?,
      fta:           row.get(12)?,
      ft_pct:        row.get(13)?,
      off_reb:       row.get(14)?,
      def_reb:       row.get(15)?,
      tot_reb:       row.get(16)?,
      pf:            row.get(17)?,
      ast:           row.get(18)?,
      to:            row.get(19)?,
      blk:           row.get(20)?,
      stl:           row.get(21)?,
      pts:           row.get(22)?,
      player_id:     row.get(23)?,
      created_on:    row.get(24)?,
      last_modified: row.get(25)?,
    })
  }

  pub fn into_stat_line(self) -> Result<StatLine> {
    Ok(StatLine {
      id:            decode_uuid(&self.id)?,
      date:          decode_date(&self.date)?,
      team:          self.team,
      opponent:      self.opponent,
      season:        self.season,
      fgm:           self.fgm,
      fga:           self.fga,
      fg_pct:        self.fg_pct,
      three_fgm:     self.three_fgm,
      three_fga:     self.three_fga,
      three_pt_pct:  self.three_pt_pct,
      ftm:           self.ftm,
      fta:           self.fta,
      ft_pct:        self.ft_pct,
      off_reb:       self.off_reb,
      def_reb:       self.def_reb,
      tot_reb:       self.tot_reb,
      pf:            self.pf,
      ast:           self.ast,
      to:            self.to,
      blk:           self.blk,
      stl:           self.stl,
      pts:           self.pts,
      player_id:     self.player_id.as_deref().map(decode_uuid).transpose()?,
      created_on:    decode_dt(&self.created_on)?,
      last_modified: decode_dt(&self.last_modified)?,
    })
  }
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Select list producing a [`StatTotals`] over stat lines aliased as `s`.
/// Counting stats are summed; percentages are averaged.
pub const TOTALS_COLUMNS: &str = "COUNT(*), \
   SUM(s.fgm), SUM(s.fga), AVG(s.fg_pct), \
   SUM(s.three_fgm), SUM(s.three_fga), AVG(s.three_pt_pct), \
   SUM(s.ftm), SUM(s.fta), AVG(s.ft_pct), \
   SUM(s.off_reb), SUM(s.def_reb), SUM(s.tot_reb), \
   SUM(s.pf), SUM(s.ast), SUM(s.\"to\"), SUM(s.blk), SUM(s.stl), SUM(s.pts)";

/// Read [`TOTALS_COLUMNS`] starting at column `at`.
pub fn totals_from_row(row: &Row<'_>, at: usize) -> rusqlite::Result<StatTotals> {
  Ok(StatTotals {
    games:        row.get(at)?,
    fgm:          row.get(at + 1)?,
    fga:          row.get(at + 2)?,
    fg_pct:       row.get(at + 3)?,
    three_fgm:    row.get(at + 4)?,
    three_fga:    row.get(at + 5)?,
    three_pt_pct: row.get(at + 6)?,
    ftm:          row.get(at + 7)?,
    fta:          row.get(at + 8)?,
    ft_pct:       row.get(at + 9)?,
    off_reb:      row.get(at + 10)?,
    def_reb:      row.get(at + 11)?,
    tot_reb:      row.get(at + 12)?,
    pf:           row.get(at + 13)?,
    ast:          row.get(at + 14)?,
    to:           row.get(at + 15)?,
    blk:          row.get(at + 16)?,
    stl:          row.get(at + 17)?,
    pts:          row.get(at + 18)?,
  })
}

/// A `GROUP BY date` row before the date string is decoded.
pub struct RawGameSummary {
  pub date:     String,
  pub team:     String,
  pub opponent: String,
  pub totals:   StatTotals,
}

impl RawGameSummary {
  pub fn into_summary(self) -> Result<GameSummary> {
    Ok(GameSummary {
      date:     decode_date(&self.date)?,
      team:     self.team,
      opponent: self.opponent,
      totals:   self.totals,
    })
  }
}

pub struct RawGameRef {
  pub date:     String,
  pub team:     String,
  pub opponent: String,
}

impl RawGameRef {
  pub fn into_game_ref(self) -> Result<GameRef> {
    Ok(GameRef {
      date:     decode_date(&self.date)?,
      team:     self.team,
      opponent: self.opponent,
    })
  }
}

// ─── Game stats ──────────────────────────────────────────────────────────────

pub fn encode_game_stat_line(line: &GameStatLine) -> Result<String> {
  Ok(serde_json::to_string(line)?)
}

/// Raw values read directly from a `game_stats` row.
pub struct RawGameStat {
  pub id:            String,
  pub stats_json:    String,
  pub created_on:    String,
  pub last_modified: String,
}

impl RawGameStat {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      stats_json:    row.get(1)?,
      created_on:    row.get(2)?,
      last_modified: row.get(3)?,
    })
  }

  pub fn into_game_stat(self) -> Result<GameStat> {
    Ok(GameStat {
      id:            decode_uuid(&self.id)?,
      created_on:    decode_dt(&self.created_on)?,
      last_modified: decode_dt(&self.last_modified)?,
      line:          serde_json::from_str(&self.stats_json)?,
    })
  }
}
