//! Stat lines: one player's box-score line for one game.
//!
//! Shooting percentages are stored exactly as supplied. The store never
//! recomputes them from makes and attempts; keeping them consistent is the
//! caller's job.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::next_modified;

/// A stored stat line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
  pub id:            Uuid,
  pub date:          NaiveDate,
  pub team:          String,
  pub opponent:      String,
  /// Free text, conventionally `"YYYY-YYYY"`.
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
  /// The player this line belongs to, if resolved.
  pub player_id:     Option<Uuid>,
  pub created_on:    DateTime<Utc>,
  pub last_modified: DateTime<Utc>,
}

impl StatLine {
  /// Whether attempts are at least makes in every shooting category.
  pub fn attempts_cover_makes(&self) -> bool {
    self.fga >= self.fgm && self.three_fga >= self.three_fgm && self.fta >= self.ftm
  }
}

// ─── NewStatLine ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::StatsStore::create_stat_line`].
///
/// Game identity (`date`, `team`, `opponent`, `season`) is required; every
/// counting stat and percentage defaults to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStatLine {
  pub date:         NaiveDate,
  pub team:         String,
  pub opponent:     String,
  pub season:       String,
  #[serde(default)]
  pub fgm:          u32,
  #[serde(default)]
  pub fga:          u32,
  #[serde(default)]
  pub fg_pct:       f64,
  #[serde(default)]
  pub three_fgm:    u32,
  #[serde(default)]
  pub three_fga:    u32,
  #[serde(default)]
  pub three_pt_pct: f64,
  #[serde(default)]
  pub ftm:          u32,
  #[serde(default)]
  pub fta:          u32,
  #[serde(default)]
  pub ft_pct:       f64,
  #[serde(default)]
  pub off_reb:      u32,
  #[serde(default)]
  pub def_reb:      u32,
  #[serde(default)]
  pub tot_reb:      u32,
  #[serde(default)]
  pub pf:           u32,
  #[serde(default)]
  pub ast:          u32,
  #[serde(default)]
  pub to:           u32,
  #[serde(default)]
  pub blk:          u32,
  #[serde(default)]
  pub stl:          u32,
  #[serde(default)]
  pub pts:          u32,
  #[serde(default)]
  pub player_id:    Option<Uuid>,
}

impl NewStatLine {
  /// A line for the given game with every stat zeroed.
  pub fn new(
    date: NaiveDate,
    team: impl Into<String>,
    opponent: impl Into<String>,
    season: impl Into<String>,
  ) -> Self {
    Self {
      date,
      team: team.into(),
      opponent: opponent.into(),
      season: season.into(),
      fgm: 0,
      fga: 0,
      fg_pct: 0.0,
      three_fgm: 0,
      three_fga: 0,
      three_pt_pct: 0.0,
      ftm: 0,
      fta: 0,
      ft_pct: 0.0,
      off_reb: 0,
      def_reb: 0,
      tot_reb: 0,
      pf: 0,
      ast: 0,
      to: 0,
      blk: 0,
      stl: 0,
      pts: 0,
      player_id: None,
    }
  }

  pub fn into_stat_line(self, id: Uuid, now: DateTime<Utc>) -> StatLine {
    StatLine {
      id,
      date: self.date,
      team: self.team,
      opponent: self.opponent,
      season: self.season,
      fgm: self.fgm,
      fga: self.fga,
      fg_pct: self.fg_pct,
      three_fgm: self.three_fgm,
      three_fga: self.three_fga,
      three_pt_pct: self.three_pt_pct,
      ftm: self.ftm,
      fta: self.fta,
      ft_pct: self.ft_pct,
      off_reb: self.off_reb,
      def_reb: self.def_reb,
      tot_reb: self.tot_reb,
      pf: self.pf,
      ast: self.ast,
      to: self.to,
      blk: self.blk,
      stl: self.stl,
      pts: self.pts,
      player_id: self.player_id,
      created_on: now,
      last_modified: now,
    }
  }
}

// ─── StatLineUpdate ──────────────────────────────────────────────────────────

/// A partial update. Absent fields leave the stored value untouched.
///
/// `player_id` can be set or changed but not cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatLineUpdate {
  pub date:         Option<NaiveDate>,
  pub team:         Option<String>,
  pub opponent:     Option<String>,
  pub season:       Option<String>,
  pub fgm:          Option<u32>,
  pub fga:          Option<u32>,
  pub fg_pct:       Option<f64>,
  pub three_fgm:    Option<u32>,
  pub three_fga:    Option<u32>,
  pub three_pt_pct: Option<f64>,
  pub ftm:          Option<u32>,
  pub fta:          Option<u32>,
  pub ft_pct:       Option<f64>,
  pub off_reb:      Option<u32>,
  pub def_reb:      Option<u32>,
  pub tot_reb:      Option<u32>,
  pub pf:           Option<u32>,
  pub ast:          Option<u32>,
  pub to:           Option<u32>,
  pub blk:          Option<u32>,
  pub stl:          Option<u32>,
  pub pts:          Option<u32>,
  pub player_id:    Option<Uuid>,
}

/// Assign `$src.$field` into `$dst.$field` for each listed field that is
/// present.
macro_rules! merge_present {
  ($src:ident => $dst:ident: $($field:ident),+ $(,)?) => {
    $(
      if let Some(v) = $src.$field {
        $dst.$field = v;
      }
    )+
  };
}

impl StatLineUpdate {
  /// Merge the supplied fields into `line` and refresh `last_modified`.
  pub fn apply(self, line: &mut StatLine, now: DateTime<Utc>) {
    let update = self;
    merge_present!(update => line:
      date, team, opponent, season,
      fgm, fga, fg_pct,
      three_fgm, three_fga, three_pt_pct,
      ftm, fta, ft_pct,
      off_reb, def_reb, tot_reb,
      pf, ast, to, blk, stl, pts,
    );
    if let Some(id) = update.player_id {
      line.player_id = Some(id);
    }
    line.last_modified = next_modified(line.last_modified, now);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn game_day() -> NaiveDate { NaiveDate::from_ymd_opt(2022, 1, 15).unwrap() }

  #[test]
  fn create_payload_defaults_counting_stats_to_zero() {
    let body = r#"{
      "date": "2022-01-15",
      "team": "Christopher Newport University",
      "opponent": "Salisbury University",
      "season": "2021-2022",
      "pts": 17
    }"#;
    let new: NewStatLine = serde_json::from_str(body).unwrap();
    assert_eq!(new.date, game_day());
    assert_eq!(new.pts, 17);
    assert_eq!(new.fga, 0);
    assert_eq!(new.ft_pct, 0.0);
    assert!(new.player_id.is_none());
  }

  #[test]
  fn create_payload_requires_game_identity() {
    let body = r#"{"date": "2022-01-15", "team": "CNU", "pts": 17}"#;
    assert!(serde_json::from_str::<NewStatLine>(body).is_err());
  }

  #[test]
  fn update_merges_present_fields() {
    let now = Utc::now();
    let mut line = NewStatLine::new(game_day(), "CNU", "Salisbury University", "2021-2022")
      .into_stat_line(Uuid::new_v4(), now);
    let player = Uuid::new_v4();

    StatLineUpdate {
      pts: Some(22),
      opponent: Some("York College (PA)".into()),
      player_id: Some(player),
      ..Default::default()
    }
    .apply(&mut line, now);

    assert_eq!(line.pts, 22);
    assert_eq!(line.opponent, "York College (PA)");
    assert_eq!(line.player_id, Some(player));
    assert_eq!(line.team, "CNU");
    assert!(line.last_modified > line.created_on);
  }

  #[test]
  fn attempts_cover_makes_checks_each_category() {
    let mut line = NewStatLine::new(game_day(), "CNU", "Marymount University", "2021-2022")
      .into_stat_line(Uuid::new_v4(), Utc::now());
    line.fgm = 4;
    line.fga = 9;
    assert!(line.attempts_cover_makes());
    line.ftm = 3;
    line.fta = 2;
    assert!(!line.attempts_cover_makes());
  }
}
