//! Player types: the team roster.
//!
//! A player is identified by a server-assigned UUID. The pair
//! (`full_name`, `hometown_hs`) is unique across the roster, which keeps two
//! same-named players from different towns apart while rejecting duplicate
//! entries for the same person.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, next_modified};

// ─── Vocabularies ────────────────────────────────────────────────────────────

/// Academic class standing, as printed on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassStanding {
  #[serde(rename = "Fr.")]
  Freshman,
  #[serde(rename = "So.")]
  Sophomore,
  #[serde(rename = "Jr.")]
  Junior,
  #[serde(rename = "Sr.")]
  Senior,
  #[serde(rename = "Gr.")]
  Graduate,
}

impl ClassStanding {
  /// Roster abbreviation; must match the serde renames above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Freshman => "Fr.",
      Self::Sophomore => "So.",
      Self::Junior => "Jr.",
      Self::Senior => "Sr.",
      Self::Graduate => "Gr.",
    }
  }
}

impl FromStr for ClassStanding {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Fr." => Ok(Self::Freshman),
      "So." => Ok(Self::Sophomore),
      "Jr." => Ok(Self::Junior),
      "Sr." => Ok(Self::Senior),
      "Gr." => Ok(Self::Graduate),
      other => Err(Error::UnknownClassStanding(other.to_owned())),
    }
  }
}

impl fmt::Display for ClassStanding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Playing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
  #[serde(rename = "PG")]
  PointGuard,
  #[serde(rename = "SG")]
  ShootingGuard,
  #[serde(rename = "SF")]
  SmallForward,
  #[serde(rename = "PF")]
  PowerForward,
  #[serde(rename = "C")]
  Center,
}

impl Position {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::PointGuard => "PG",
      Self::ShootingGuard => "SG",
      Self::SmallForward => "SF",
      Self::PowerForward => "PF",
      Self::Center => "C",
    }
  }
}

impl FromStr for Position {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "PG" => Ok(Self::PointGuard),
      "SG" => Ok(Self::ShootingGuard),
      "SF" => Ok(Self::SmallForward),
      "PF" => Ok(Self::PowerForward),
      "C" => Ok(Self::Center),
      other => Err(Error::UnknownPosition(other.to_owned())),
    }
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Player ──────────────────────────────────────────────────────────────────

/// A roster member as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
  pub id:            Uuid,
  pub full_name:     String,
  pub class_name:    ClassStanding,
  pub position:      Position,
  pub height:        String,
  pub weight:        String,
  pub hometown_hs:   String,
  pub jersey_num:    u16,
  pub created_on:    DateTime<Utc>,
  pub last_modified: DateTime<Utc>,
}

// ─── NewPlayer ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::StatsStore::create_player`]. Every field is
/// required; the id and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlayer {
  pub full_name:   String,
  pub class_name:  ClassStanding,
  pub position:    Position,
  pub height:      String,
  pub weight:      String,
  pub hometown_hs: String,
  pub jersey_num:  u16,
}

impl NewPlayer {
  /// Build the stored row, stamping both timestamps with `now`.
  pub fn into_player(self, id: Uuid, now: DateTime<Utc>) -> Player {
    Player {
      id,
      full_name: self.full_name,
      class_name: self.class_name,
      position: self.position,
      height: self.height,
      weight: self.weight,
      hometown_hs: self.hometown_hs,
      jersey_num: self.jersey_num,
      created_on: now,
      last_modified: now,
    }
  }
}

// ─── PlayerUpdate ────────────────────────────────────────────────────────────

/// A partial update. Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerUpdate {
  pub full_name:   Option<String>,
  pub class_name:  Option<ClassStanding>,
  pub position:    Option<Position>,
  pub height:      Option<String>,
  pub weight:      Option<String>,
  pub hometown_hs: Option<String>,
  pub jersey_num:  Option<u16>,
}

impl PlayerUpdate {
  /// Merge the supplied fields into `player` and refresh `last_modified`.
  pub fn apply(self, player: &mut Player, now: DateTime<Utc>) {
    if let Some(v) = self.full_name {
      player.full_name = v;
    }
    if let Some(v) = self.class_name {
      player.class_name = v;
    }
    if let Some(v) = self.position {
      player.position = v;
    }
    if let Some(v) = self.height {
      player.height = v;
    }
    if let Some(v) = self.weight {
      player.weight = v;
    }
    if let Some(v) = self.hometown_hs {
      player.hometown_hs = v;
    }
    if let Some(v) = self.jersey_num {
      player.jersey_num = v;
    }
    player.last_modified = next_modified(player.last_modified, now);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn roster_entry() -> NewPlayer {
    NewPlayer {
      full_name:   "Nathan Roberts".into(),
      class_name:  ClassStanding::Senior,
      position:    Position::PointGuard,
      height:      "6-1".into(),
      weight:      "180".into(),
      hometown_hs: "Newport News, Va. / Warwick".into(),
      jersey_num:  3,
    }
  }

  #[test]
  fn class_standing_uses_roster_abbreviations() {
    let json = serde_json::to_string(&ClassStanding::Graduate).unwrap();
    assert_eq!(json, "\"Gr.\"");
    assert_eq!("Fr.".parse::<ClassStanding>().unwrap(), ClassStanding::Freshman);
  }

  #[test]
  fn out_of_vocabulary_values_are_rejected() {
    assert!(serde_json::from_str::<ClassStanding>("\"freshman\"").is_err());
    assert!(serde_json::from_str::<Position>("\"G\"").is_err());
    assert!(matches!(
      "Center".parse::<Position>(),
      Err(Error::UnknownPosition(s)) if s == "Center"
    ));
  }

  #[test]
  fn every_position_round_trips_through_its_abbreviation() {
    for p in [
      Position::PointGuard,
      Position::ShootingGuard,
      Position::SmallForward,
      Position::PowerForward,
      Position::Center,
    ] {
      assert_eq!(p.as_str().parse::<Position>().unwrap(), p);
      assert_eq!(serde_json::to_value(p).unwrap(), p.as_str());
    }
  }

  #[test]
  fn update_touches_only_supplied_fields() {
    let now = Utc::now();
    let mut player = roster_entry().into_player(Uuid::new_v4(), now);
    let before = player.clone();

    let update: PlayerUpdate =
      serde_json::from_str(r#"{"jersey_num": 24, "position": "SG"}"#).unwrap();
    update.apply(&mut player, now);

    assert_eq!(player.jersey_num, 24);
    assert_eq!(player.position, Position::ShootingGuard);
    assert_eq!(player.full_name, before.full_name);
    assert_eq!(player.hometown_hs, before.hometown_hs);
    assert_eq!(player.created_on, before.created_on);
    assert!(player.last_modified > before.last_modified);
  }

  #[test]
  fn empty_update_only_refreshes_last_modified() {
    let now = Utc::now();
    let mut player = roster_entry().into_player(Uuid::new_v4(), now);
    let before = player.clone();

    PlayerUpdate::default().apply(&mut player, now);

    assert!(player.last_modified > before.last_modified);
    player.last_modified = before.last_modified;
    assert_eq!(player, before);
  }

  #[test]
  fn update_rejects_bad_class_standing() {
    let err = serde_json::from_str::<PlayerUpdate>(r#"{"class_name": "Senior"}"#);
    assert!(err.is_err());
  }
}
