//! Synthetic development data.
//!
//! Never run implicitly: the server only calls
//! [`SqliteStore::seed_development_data`] when seeding is switched on in its
//! configuration or on the command line.

use chrono::{NaiveDate, TimeDelta, Utc};
use courtside_core::{
  player::{ClassStanding, NewPlayer, Position},
  stat_line::NewStatLine,
};
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::{
  store::{insert_player_row, insert_stat_line_row},
  Result, SqliteStore,
};

const TEAM: &str = "Christopher Newport University";
const SEASON: &str = "2021-2022";

const OPPONENTS: [&str; 8] = [
  "Mary Washington",
  "Marymount University",
  "Virginia Wesleyan University",
  "University of Mount Union",
  "Swarthmore",
  "Salisbury University",
  "York College (PA)",
  "Lynchburg University",
];

/// Number of games seeded; each game gets one line per roster player.
const GAMES: i64 = 10;

fn roster() -> Vec<NewPlayer> {
  let entry = |full_name: &str,
               class_name,
               position,
               height: &str,
               weight: &str,
               hometown_hs: &str,
               jersey_num| NewPlayer {
    full_name: full_name.into(),
    class_name,
    position,
    height: height.into(),
    weight: weight.into(),
    hometown_hs: hometown_hs.into(),
    jersey_num,
  };

  vec![
    entry("Nathan Roberts", ClassStanding::Senior, Position::PointGuard, "6-0", "175", "Newport News, Va. / Menchville", 3),
    entry("Marcus Hill", ClassStanding::Junior, Position::ShootingGuard, "6-3", "190", "Richmond, Va. / Hermitage", 11),
    entry("Evan Carter", ClassStanding::Sophomore, Position::SmallForward, "6-5", "200", "Virginia Beach, Va. / Cox", 21),
    entry("Darius Lane", ClassStanding::Graduate, Position::PowerForward, "6-7", "225", "Chesapeake, Va. / Grassfield", 33),
    entry("Owen Fletcher", ClassStanding::Freshman, Position::Center, "6-9", "240", "Fairfax, Va. / Robinson", 50),
  ]
}

fn pct(made: u32, attempted: u32) -> f64 {
  if attempted == 0 { 0.0 } else { f64::from(made) / f64::from(attempted) }
}

/// A random but internally consistent box-score line: makes never exceed
/// attempts, threes are a subset of field goals, and points add up.
fn random_line(rng: &mut impl Rng, date: NaiveDate, opponent: &str, player_id: Uuid) -> NewStatLine {
  let mut line = NewStatLine::new(date, TEAM, opponent, SEASON);

  line.fga = rng.gen_range(1..=20);
  line.fgm = rng.gen_range(0..=line.fga);
  line.three_fga = rng.gen_range(0..=line.fga.min(10));
  line.three_fgm = rng.gen_range(0..=line.three_fga.min(line.fgm));
  line.fta = rng.gen_range(0..=10);
  line.ftm = rng.gen_range(0..=line.fta);

  line.fg_pct = pct(line.fgm, line.fga);
  line.three_pt_pct = pct(line.three_fgm, line.three_fga);
  line.ft_pct = pct(line.ftm, line.fta);

  line.off_reb = rng.gen_range(0..=7);
  line.def_reb = rng.gen_range(0..=7);
  line.tot_reb = line.off_reb + line.def_reb;
  line.pf = rng.gen_range(0..=5);
  line.ast = rng.gen_range(0..=7);
  line.to = rng.gen_range(0..=7);
  line.blk = rng.gen_range(0..=7);
  line.stl = rng.gen_range(0..=7);
  line.pts = 2 * line.fgm + line.three_fgm + line.ftm;

  line.player_id = Some(player_id);
  line
}

impl SqliteStore {
  /// Populate an empty store with a synthetic roster and a season's worth of
  /// stat lines for local development.
  ///
  /// Returns `false` without writing anything if any player or stat line
  /// already exists. Everything is written in a single transaction.
  pub async fn seed_development_data(&self) -> Result<bool> {
    let now = Utc::now();
    let players: Vec<_> = roster()
      .into_iter()
      .map(|p| p.into_player(Uuid::new_v4(), now))
      .collect();

    let seeded = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let populated: bool = tx.query_row(
          "SELECT EXISTS (SELECT 1 FROM players) OR EXISTS (SELECT 1 FROM stat_lines)",
          [],
          |row| row.get(0),
        )?;
        if populated {
          return Ok(None);
        }

        for player in &players {
          insert_player_row(&tx, player)?;
        }

        let mut rng = rand::thread_rng();
        let opening_night = NaiveDate::from_ymd_opt(2021, 11, 13).unwrap_or_default();
        let mut lines = 0usize;
        for game in 0..GAMES {
          let date = opening_night + TimeDelta::weeks(game);
          let opponent = OPPONENTS[game as usize % OPPONENTS.len()];
          for player in &players {
            let line = random_line(&mut rng, date, opponent, player.id)
              .into_stat_line(Uuid::new_v4(), now);
            insert_stat_line_row(&tx, &line)?;
            lines += 1;
          }
        }

        tx.commit()?;
        Ok(Some((players.len(), lines)))
      })
      .await?;

    match seeded {
      Some((players, lines)) => {
        info!(players, lines, "seeded development data");
        Ok(true)
      }
      None => {
        info!("store already has data; skipping development seed");
        Ok(false)
      }
    }
  }
}
