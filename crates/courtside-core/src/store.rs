//! The `StatsStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `courtside-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.
//!
//! "Not found" is expressed as `Ok(None)`. Uniqueness violations come back as
//! errors whose [`StoreError::is_conflict`] returns `true`.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  game_stat::{GameStat, GameStatLine},
  player::{NewPlayer, Player, PlayerUpdate},
  stat_line::{NewStatLine, StatLine, StatLineUpdate},
  summary::{GameRef, GameSummary, OpponentSummary, PlayerSummary, SeasonSummary},
};

/// Error bound for store backends.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// Whether the operation was rejected because it would break a uniqueness
  /// rule (duplicate player, duplicate game-stat date).
  fn is_conflict(&self) -> bool;
}

/// Abstraction over a Courtside statistics store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait StatsStore: Send + Sync {
  type Error: StoreError;

  // ── Players ───────────────────────────────────────────────────────────

  /// All players, ordered by `full_name`.
  fn list_players(
    &self,
  ) -> impl Future<Output = Result<Vec<Player>, Self::Error>> + Send + '_;

  fn get_player(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Player>, Self::Error>> + Send + '_;

  /// Persist a new roster entry. Fails with a conflict if a player with the
  /// same `full_name` and `hometown_hs` already exists.
  fn create_player(
    &self,
    input: NewPlayer,
  ) -> impl Future<Output = Result<Player, Self::Error>> + Send + '_;

  /// Apply a partial update. Returns `None` if the player does not exist.
  fn update_player(
    &self,
    id: Uuid,
    update: PlayerUpdate,
  ) -> impl Future<Output = Result<Option<Player>, Self::Error>> + Send + '_;

  // ── Stat lines ────────────────────────────────────────────────────────

  /// All stat lines, ordered by game date.
  fn list_stat_lines(
    &self,
  ) -> impl Future<Output = Result<Vec<StatLine>, Self::Error>> + Send + '_;

  fn get_stat_line(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<StatLine>, Self::Error>> + Send + '_;

  fn create_stat_line(
    &self,
    input: NewStatLine,
  ) -> impl Future<Output = Result<StatLine, Self::Error>> + Send + '_;

  /// Apply a partial update. Returns `None` if the stat line does not exist.
  fn update_stat_line(
    &self,
    id: Uuid,
    update: StatLineUpdate,
  ) -> impl Future<Output = Result<Option<StatLine>, Self::Error>> + Send + '_;

  // ── Distinct values ───────────────────────────────────────────────────

  /// Distinct opponent names, ordered.
  fn list_opponents(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Distinct `(date, team, opponent)` triples, ordered by date.
  fn list_games(
    &self,
  ) -> impl Future<Output = Result<Vec<GameRef>, Self::Error>> + Send + '_;

  /// Distinct season labels, ordered.
  fn list_seasons(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Aggregates ────────────────────────────────────────────────────────

  /// One row per player name. Stat lines without a resolved player are
  /// excluded.
  fn totals_by_player(
    &self,
  ) -> impl Future<Output = Result<Vec<PlayerSummary>, Self::Error>> + Send + '_;

  /// The summary for one player, or `None` if they have no stat lines.
  fn player_totals(
    &self,
    player_id: Uuid,
  ) -> impl Future<Output = Result<Option<PlayerSummary>, Self::Error>> + Send + '_;

  fn totals_by_opponent(
    &self,
  ) -> impl Future<Output = Result<Vec<OpponentSummary>, Self::Error>> + Send + '_;

  fn opponent_totals<'a>(
    &'a self,
    opponent: &'a str,
  ) -> impl Future<Output = Result<Option<OpponentSummary>, Self::Error>> + Send + 'a;

  fn totals_by_season(
    &self,
  ) -> impl Future<Output = Result<Vec<SeasonSummary>, Self::Error>> + Send + '_;

  fn season_totals<'a>(
    &'a self,
    season: &'a str,
  ) -> impl Future<Output = Result<Option<SeasonSummary>, Self::Error>> + Send + 'a;

  fn totals_by_game(
    &self,
  ) -> impl Future<Output = Result<Vec<GameSummary>, Self::Error>> + Send + '_;

  fn game_totals(
    &self,
    date: NaiveDate,
  ) -> impl Future<Output = Result<Option<GameSummary>, Self::Error>> + Send + '_;

  // ── Game stats ────────────────────────────────────────────────────────

  /// All game stats, ordered by date.
  fn list_game_stats(
    &self,
  ) -> impl Future<Output = Result<Vec<GameStat>, Self::Error>> + Send + '_;

  fn get_game_stat(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<GameStat>, Self::Error>> + Send + '_;

  /// Persist a game stat. Fails with a conflict, without writing anything,
  /// if a record for the same date already exists.
  fn create_game_stat(
    &self,
    input: GameStatLine,
  ) -> impl Future<Output = Result<GameStat, Self::Error>> + Send + '_;
}
