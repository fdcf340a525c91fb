//! SQL schema for the Courtside SQLite store.
//!
//! Executed at every connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS players (
    id            TEXT PRIMARY KEY,
    full_name     TEXT NOT NULL,
    class_name    TEXT NOT NULL,   -- 'Fr.' | 'So.' | 'Jr.' | 'Sr.' | 'Gr.'
    position      TEXT NOT NULL,   -- 'PG' | 'SG' | 'SF' | 'PF' | 'C'
    height        TEXT NOT NULL,
    weight        TEXT NOT NULL,
    hometown_hs   TEXT NOT NULL,
    jersey_num    INTEGER NOT NULL,
    created_on    TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    last_modified TEXT NOT NULL,
    UNIQUE (full_name, hometown_hs)
);

-- Percentages are stored as submitted and never recomputed. player_id is a
-- loose reference: a line may name a player that is not on the roster, and
-- such lines drop out of per-player totals.
CREATE TABLE IF NOT EXISTS stat_lines (
    id            TEXT PRIMARY KEY,
    date          TEXT NOT NULL,   -- YYYY-MM-DD
    team          TEXT NOT NULL,
    opponent      TEXT NOT NULL,
    season        TEXT NOT NULL,
    fgm           INTEGER NOT NULL DEFAULT 0,
    fga           INTEGER NOT NULL DEFAULT 0,
    fg_pct        REAL    NOT NULL DEFAULT 0.0,
    three_fgm     INTEGER NOT NULL DEFAULT 0,
    three_fga     INTEGER NOT NULL DEFAULT 0,
    three_pt_pct  REAL    NOT NULL DEFAULT 0.0,
    ftm           INTEGER NOT NULL DEFAULT 0,
    fta           INTEGER NOT NULL DEFAULT 0,
    ft_pct        REAL    NOT NULL DEFAULT 0.0,
    off_reb       INTEGER NOT NULL DEFAULT 0,
    def_reb       INTEGER NOT NULL DEFAULT 0,
    tot_reb       INTEGER NOT NULL DEFAULT 0,
    pf            INTEGER NOT NULL DEFAULT 0,
    ast           INTEGER NOT NULL DEFAULT 0,
    \"to\"          INTEGER NOT NULL DEFAULT 0,
    blk           INTEGER NOT NULL DEFAULT 0,
    stl           INTEGER NOT NULL DEFAULT 0,
    pts           INTEGER NOT NULL DEFAULT 0,
    player_id     TEXT,
    created_on    TEXT NOT NULL,
    last_modified TEXT NOT NULL
);

-- One row per calendar date. The full submitted record lives in stats_json;
-- the identifying columns are broken out for lookups and ordering.
CREATE TABLE IF NOT EXISTS game_stats (
    id            TEXT PRIMARY KEY,
    date          TEXT NOT NULL UNIQUE,
    opponent      TEXT NOT NULL,
    season        TEXT NOT NULL,
    stats_json    TEXT NOT NULL,
    created_on    TEXT NOT NULL,
    last_modified TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS stat_lines_player_idx   ON stat_lines(player_id);
CREATE INDEX IF NOT EXISTS stat_lines_opponent_idx ON stat_lines(opponent);
CREATE INDEX IF NOT EXISTS stat_lines_season_idx   ON stat_lines(season);
CREATE INDEX IF NOT EXISTS stat_lines_date_idx     ON stat_lines(date);

PRAGMA user_version = 1;
";
