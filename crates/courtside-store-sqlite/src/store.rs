//! [`SqliteStore`], the SQLite implementation of [`StatsStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::{OptionalExtension as _, Row};
use tracing::debug;
use uuid::Uuid;

use courtside_core::{
  game_stat::{GameStat, GameStatLine},
  player::{NewPlayer, Player, PlayerUpdate},
  stat_line::{NewStatLine, StatLine, StatLineUpdate},
  store::StatsStore,
  summary::{GameRef, GameSummary, OpponentSummary, PlayerSummary, SeasonSummary},
};

use crate::{
  encode::{
    encode_date, encode_dt, encode_game_stat_line, encode_uuid, totals_from_row, RawGameRef,
    RawGameStat, RawGameSummary, RawPlayer, RawStatLine, PLAYER_COLUMNS, STAT_LINE_COLUMNS,
    TOTALS_COLUMNS,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Courtside statistics store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every
/// operation runs as one scoped closure on the connection thread; nothing is
/// held between calls.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.initialize().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.initialize().await?;
    Ok(store)
  }

  /// Ensure every table and index exists. Idempotent; safe to call on every
  /// process start.
  pub async fn initialize(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `sql` with positional text `args` and map every resulting row.
  async fn query_rows<T, F>(&self, sql: String, args: Vec<String>, map: F) -> Result<Vec<T>>
  where
    T: Send + 'static,
    F: Fn(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(args.iter()), |row| map(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  /// Run `sql` with positional text `args` and map the first row, if any.
  async fn query_opt<T, F>(&self, sql: String, args: Vec<String>, map: F) -> Result<Option<T>>
  where
    T: Send + 'static,
    F: FnOnce(&Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params_from_iter(args.iter()), map)
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }
}

// ─── Row writers ─────────────────────────────────────────────────────────────
//
// Synchronous helpers run inside `conn.call` closures, shared with seeding.

/// Whether a player other than `exclude_id` already holds this name/hometown.
pub(crate) fn player_name_taken(
  conn:        &rusqlite::Connection,
  full_name:   &str,
  hometown_hs: &str,
  exclude_id:  Option<&str>,
) -> rusqlite::Result<bool> {
  Ok(
    conn
      .query_row(
        "SELECT 1 FROM players
         WHERE full_name = ?1 AND hometown_hs = ?2 AND id IS NOT ?3",
        rusqlite::params![full_name, hometown_hs, exclude_id],
        |_| Ok(()),
      )
      .optional()?
      .is_some(),
  )
}

pub(crate) fn insert_player_row(conn: &rusqlite::Connection, p: &Player) -> rusqlite::Result<()> {
  conn.execute(
    &format!("INSERT INTO players ({PLAYER_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"),
    rusqlite::params![
      encode_uuid(p.id),
      p.full_name,
      p.class_name.as_str(),
      p.position.as_str(),
      p.height,
      p.weight,
      p.hometown_hs,
      p.jersey_num,
      encode_dt(p.created_on),
      encode_dt(p.last_modified),
    ],
  )?;
  Ok(())
}

fn update_player_row(conn: &rusqlite::Connection, p: &Player) -> rusqlite::Result<()> {
  conn.execute(
    "UPDATE players SET
       full_name = ?2, class_name = ?3, position = ?4, height = ?5, weight = ?6,
       hometown_hs = ?7, jersey_num = ?8, last_modified = ?9
     WHERE id = ?1",
    rusqlite::params![
      encode_uuid(p.id),
      p.full_name,
      p.class_name.as_str(),
      p.position.as_str(),
      p.height,
      p.weight,
      p.hometown_hs,
      p.jersey_num,
      encode_dt(p.last_modified),
    ],
  )?;
  Ok(())
}

pub(crate) fn insert_stat_line_row(
  conn: &rusqlite::Connection,
  s:    &StatLine,
) -> rusqlite::Result<()> {
  conn.execute(
    &format!(
      "INSERT INTO stat_lines ({STAT_LINE_COLUMNS}) VALUES (
         ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13,
         ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26
       )"
    ),
    rusqlite::params![
      encode_uuid(s.id),
      encode_date(s.date),
      s.team,
      s.opponent,
      s.season,
      s.fgm,
      s.fga,
      s.fg_pct,
      s.three_fgm,
      s.three_fga,
      s.three_pt_pct,
      s.ftm,
      s.fta,
      s.ft_pct,
      s.off_reb,
      s.def_reb,
      s.tot_reb,
      s.pf,
      s.ast,
      s.to,
      s.blk,
      s.stl,
      s.pts,
      s.player_id.map(encode_uuid),
      encode_dt(s.created_on),
      encode_dt(s.last_modified),
    ],
  )?;
  Ok(())
}

fn update_stat_line_row(conn: &rusqlite::Connection, s: &StatLine) -> rusqlite::Result<()> {
  conn.execute(
    "UPDATE stat_lines SET
       date = ?2, team = ?3, opponent = ?4, season = ?5,
       fgm = ?6, fga = ?7, fg_pct = ?8,
       three_fgm = ?9, three_fga = ?10, three_pt_pct = ?11,
       ftm = ?12, fta = ?13, ft_pct = ?14,
       off_reb = ?15, def_reb = ?16, tot_reb = ?17,
       pf = ?18, ast = ?19, \"to\" = ?20, blk = ?21, stl = ?22, pts = ?23,
       player_id = ?24, last_modified = ?25
     WHERE id = ?1",
    rusqlite::params![
      encode_uuid(s.id),
      encode_date(s.date),
      s.team,
      s.opponent,
      s.season,
      s.fgm,
      s.fga,
      s.fg_pct,
      s.three_fgm,
      s.three_fga,
      s.three_pt_pct,
      s.ftm,
      s.fta,
      s.ft_pct,
      s.off_reb,
      s.def_reb,
      s.tot_reb,
      s.pf,
      s.ast,
      s.to,
      s.blk,
      s.stl,
      s.pts,
      s.player_id.map(encode_uuid),
      encode_dt(s.last_modified),
    ],
  )?;
  Ok(())
}

// ─── Aggregate row mappers ───────────────────────────────────────────────────

fn player_summary(row: &Row<'_>) -> rusqlite::Result<PlayerSummary> {
  Ok(PlayerSummary { full_name: row.get(0)?, totals: totals_from_row(row, 1)? })
}

fn opponent_summary(row: &Row<'_>) -> rusqlite::Result<OpponentSummary> {
  Ok(OpponentSummary { opponent: row.get(0)?, totals: totals_from_row(row, 1)? })
}

fn season_summary(row: &Row<'_>) -> rusqlite::Result<SeasonSummary> {
  Ok(SeasonSummary { season: row.get(0)?, totals: totals_from_row(row, 1)? })
}

fn raw_game_summary(row: &Row<'_>) -> rusqlite::Result<RawGameSummary> {
  Ok(RawGameSummary {
    date:     row.get(0)?,
    team:     row.get(1)?,
    opponent: row.get(2)?,
    totals:   totals_from_row(row, 3)?,
  })
}

/// `SELECT` prefix for per-player aggregation. Stat lines without a resolved
/// player drop out of the inner join.
fn by_player_sql(filter: &str) -> String {
  format!(
    "SELECT p.full_name, {TOTALS_COLUMNS}
     FROM stat_lines s
     JOIN players p ON p.id = s.player_id
     {filter}
     GROUP BY p.full_name
     ORDER BY p.full_name"
  )
}

fn by_column_sql(column: &str, filter: &str) -> String {
  format!(
    "SELECT s.{column}, {TOTALS_COLUMNS}
     FROM stat_lines s
     {filter}
     GROUP BY s.{column}
     ORDER BY s.{column}"
  )
}

fn by_game_sql(filter: &str) -> String {
  format!(
    "SELECT s.date, MIN(s.team), MIN(s.opponent), {TOTALS_COLUMNS}
     FROM stat_lines s
     {filter}
     GROUP BY s.date
     ORDER BY s.date"
  )
}

// ─── StatsStore impl ─────────────────────────────────────────────────────────

impl StatsStore for SqliteStore {
  type Error = Error;

  // ── Players ───────────────────────────────────────────────────────────────

  async fn list_players(&self) -> Result<Vec<Player>> {
    let raws = self
      .query_rows(
        format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY full_name"),
        vec![],
        RawPlayer::from_row,
      )
      .await?;
    raws.into_iter().map(RawPlayer::into_player).collect()
  }

  async fn get_player(&self, id: Uuid) -> Result<Option<Player>> {
    let raw = self
      .query_opt(
        format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1"),
        vec![encode_uuid(id)],
        RawPlayer::from_row,
      )
      .await?;
    raw.map(RawPlayer::into_player).transpose()
  }

  async fn create_player(&self, input: NewPlayer) -> Result<Player> {
    let player = input.into_player(Uuid::new_v4(), Utc::now());
    let row = player.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        if player_name_taken(&tx, &row.full_name, &row.hometown_hs, None)? {
          return Ok(false);
        }
        insert_player_row(&tx, &row)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      debug!(full_name = %player.full_name, "rejected duplicate player");
      return Err(Error::Core(courtside_core::Error::DuplicatePlayer {
        full_name:   player.full_name,
        hometown_hs: player.hometown_hs,
      }));
    }

    debug!(id = %player.id, full_name = %player.full_name, "created player");
    Ok(player)
  }

  async fn update_player(&self, id: Uuid, update: PlayerUpdate) -> Result<Option<Player>> {
    let Some(mut player) = self.get_player(id).await? else {
      return Ok(None);
    };
    update.apply(&mut player, Utc::now());

    let row = player.clone();
    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let id_str = encode_uuid(row.id);
        if player_name_taken(&tx, &row.full_name, &row.hometown_hs, Some(&id_str))? {
          return Ok(false);
        }
        update_player_row(&tx, &row)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !written {
      debug!(%id, "rejected player update colliding with another roster entry");
      return Err(Error::Core(courtside_core::Error::DuplicatePlayer {
        full_name:   player.full_name,
        hometown_hs: player.hometown_hs,
      }));
    }

    debug!(%id, "updated player");
    Ok(Some(player))
  }

  // ── Stat lines ────────────────────────────────────────────────────────────

  async fn list_stat_lines(&self) -> Result<Vec<StatLine>> {
    let raws = self
      .query_rows(
        format!("SELECT {STAT_LINE_COLUMNS} FROM stat_lines ORDER BY date, created_on"),
        vec![],
        RawStatLine::from_row,
      )
      .await?;
    raws.into_iter().map(RawStatLine::into_stat_line).collect()
  }

  async fn get_stat_line(&self, id: Uuid) -> Result<Option<StatLine>> {
    let raw = self
      .query_opt(
        format!("SELECT {STAT_LINE_COLUMNS} FROM stat_lines WHERE id = ?1"),
        vec![encode_uuid(id)],
        RawStatLine::from_row,
      )
      .await?;
    raw.map(RawStatLine::into_stat_line).transpose()
  }

  async fn create_stat_line(&self, input: NewStatLine) -> Result<StatLine> {
    let line = input.into_stat_line(Uuid::new_v4(), Utc::now());
    let row = line.clone();

    self
      .conn
      .call(move |conn| {
        insert_stat_line_row(conn, &row)?;
        Ok(())
      })
      .await?;

    debug!(id = %line.id, date = %line.date, opponent = %line.opponent, "created stat line");
    Ok(line)
  }

  async fn update_stat_line(&self, id: Uuid, update: StatLineUpdate) -> Result<Option<StatLine>> {
    let Some(mut line) = self.get_stat_line(id).await? else {
      return Ok(None);
    };
    update.apply(&mut line, Utc::now());

    let row = line.clone();
    self
      .conn
      .call(move |conn| {
        update_stat_line_row(conn, &row)?;
        Ok(())
      })
      .await?;

    debug!(%id, "updated stat line");
    Ok(Some(line))
  }

  // ── Distinct values ───────────────────────────────────────────────────────

  async fn list_opponents(&self) -> Result<Vec<String>> {
    self
      .query_rows(
        "SELECT DISTINCT opponent FROM stat_lines ORDER BY opponent".into(),
        vec![],
        |row| row.get(0),
      )
      .await
  }

  async fn list_games(&self) -> Result<Vec<GameRef>> {
    let raws = self
      .query_rows(
        "SELECT DISTINCT date, team, opponent FROM stat_lines
         ORDER BY date, team, opponent"
          .into(),
        vec![],
        |row| {
          Ok(RawGameRef {
            date:     row.get(0)?,
            team:     row.get(1)?,
            opponent: row.get(2)?,
          })
        },
      )
      .await?;
    raws.into_iter().map(RawGameRef::into_game_ref).collect()
  }

  async fn list_seasons(&self) -> Result<Vec<String>> {
    self
      .query_rows(
        "SELECT DISTINCT season FROM stat_lines ORDER BY season".into(),
        vec![],
        |row| row.get(0),
      )
      .await
  }

  // ── Aggregates ────────────────────────────────────────────────────────────

  async fn totals_by_player(&self) -> Result<Vec<PlayerSummary>> {
    self.query_rows(by_player_sql(""), vec![], player_summary).await
  }

  async fn player_totals(&self, player_id: Uuid) -> Result<Option<PlayerSummary>> {
    self
      .query_opt(
        by_player_sql("WHERE p.id = ?1"),
        vec![encode_uuid(player_id)],
        player_summary,
      )
      .await
  }

  async fn totals_by_opponent(&self) -> Result<Vec<OpponentSummary>> {
    self
      .query_rows(by_column_sql("opponent", ""), vec![], opponent_summary)
      .await
  }

  async fn opponent_totals<'a>(&'a self, opponent: &'a str) -> Result<Option<OpponentSummary>> {
    self
      .query_opt(
        by_column_sql("opponent", "WHERE s.opponent = ?1"),
        vec![opponent.to_owned()],
        opponent_summary,
      )
      .await
  }

  async fn totals_by_season(&self) -> Result<Vec<SeasonSummary>> {
    self
      .query_rows(by_column_sql("season", ""), vec![], season_summary)
      .await
  }

  async fn season_totals<'a>(&'a self, season: &'a str) -> Result<Option<SeasonSummary>> {
    self
      .query_opt(
        by_column_sql("season", "WHERE s.season = ?1"),
        vec![season.to_owned()],
        season_summary,
      )
      .await
  }

  async fn totals_by_game(&self) -> Result<Vec<GameSummary>> {
    let raws = self.query_rows(by_game_sql(""), vec![], raw_game_summary).await?;
    raws.into_iter().map(RawGameSummary::into_summary).collect()
  }

  async fn game_totals(&self, date: NaiveDate) -> Result<Option<GameSummary>> {
    let raw = self
      .query_opt(
        by_game_sql("WHERE s.date = ?1"),
        vec![encode_date(date)],
        raw_game_summary,
      )
      .await?;
    raw.map(RawGameSummary::into_summary).transpose()
  }

  // ── Game stats ────────────────────────────────────────────────────────────

  async fn list_game_stats(&self) -> Result<Vec<GameStat>> {
    let raws = self
      .query_rows(
        "SELECT id, stats_json, created_on, last_modified FROM game_stats ORDER BY date".into(),
        vec![],
        RawGameStat::from_row,
      )
      .await?;
    raws.into_iter().map(RawGameStat::into_game_stat).collect()
  }

  async fn get_game_stat(&self, id: Uuid) -> Result<Option<GameStat>> {
    let raw = self
      .query_opt(
        "SELECT id, stats_json, created_on, last_modified FROM game_stats WHERE id = ?1".into(),
        vec![encode_uuid(id)],
        RawGameStat::from_row,
      )
      .await?;
    raw.map(RawGameStat::into_game_stat).transpose()
  }

  async fn create_game_stat(&self, input: GameStatLine) -> Result<GameStat> {
    let game_stat = GameStat::new(Uuid::new_v4(), input, Utc::now());
    let date = game_stat.line.date;

    let id_str     = encode_uuid(game_stat.id);
    let date_str   = encode_date(date);
    let opponent   = game_stat.line.opponent.clone();
    let season     = game_stat.line.season.clone();
    let stats_json = encode_game_stat_line(&game_stat.line)?;
    let created    = encode_dt(game_stat.created_on);
    let modified   = encode_dt(game_stat.last_modified);

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let exists = tx
          .query_row(
            "SELECT 1 FROM game_stats WHERE date = ?1",
            rusqlite::params![date_str],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if exists {
          return Ok(false);
        }
        tx.execute(
          "INSERT INTO game_stats (
             id, date, opponent, season, stats_json, created_on, last_modified
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![id_str, date_str, opponent, season, stats_json, created, modified],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      debug!(%date, "rejected duplicate game stat");
      return Err(Error::Core(courtside_core::Error::DuplicateGameStat(date)));
    }

    debug!(id = %game_stat.id, %date, "created game stat");
    Ok(game_stat)
  }
}
