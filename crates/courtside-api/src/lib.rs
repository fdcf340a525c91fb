#![recursion_limit = "256"]
//! JSON REST API for Courtside.
//!
//! Exposes an axum [`Router`] backed by any [`courtside_core::store::StatsStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! Collection paths answer with and without a trailing slash, so
//! `/players` and `/players/` reach the same handler.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = courtside_api::api_router(Arc::new(store));
//! axum::serve(listener, app).await?;
//! ```

pub mod aggregates;
pub mod error;
pub mod game_stats;
pub mod listings;
pub mod players;
pub mod stat_lines;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use courtside_core::store::StatsStore;
use serde_json::{Value, json};

pub use error::ApiError;

/// `GET /`: service name and version.
async fn info() -> Json<Value> {
  Json(json!({
    "name":    "courtside",
    "version": env!("CARGO_PKG_VERSION"),
  }))
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StatsStore + 'static,
{
  Router::new()
    .route("/", get(info))
    // Players
    .route("/players", get(players::list::<S>).post(players::create::<S>))
    .route("/players/", get(players::list::<S>).post(players::create::<S>))
    .route("/players/{id}", get(players::get_one::<S>).patch(players::update::<S>))
    // Distinct values
    .route("/teams", get(listings::opponents::<S>))
    .route("/teams/", get(listings::opponents::<S>))
    .route("/games", get(listings::games::<S>))
    .route("/games/", get(listings::games::<S>))
    .route("/seasons", get(listings::seasons::<S>))
    .route("/seasons/", get(listings::seasons::<S>))
    // Stat lines
    .route("/stats", get(stat_lines::list::<S>).post(stat_lines::create::<S>))
    .route("/stats/", get(stat_lines::list::<S>).post(stat_lines::create::<S>))
    .route("/stats/{id}", get(stat_lines::get_one::<S>).patch(stat_lines::update::<S>))
    // Aggregates; static segments win over `/stats/{id}`
    .route("/stats/player", get(aggregates::by_player::<S>))
    .route("/stats/player/", get(aggregates::by_player::<S>))
    .route("/stats/players/{id}", get(aggregates::player::<S>))
    .route("/stats/teams", get(aggregates::by_opponent::<S>))
    .route("/stats/teams/", get(aggregates::by_opponent::<S>))
    .route("/stats/teams/{name}", get(aggregates::opponent::<S>))
    .route("/stats/season", get(aggregates::by_season::<S>))
    .route("/stats/season/", get(aggregates::by_season::<S>))
    .route("/stats/season/{season}", get(aggregates::season::<S>))
    .route("/stats/games", get(aggregates::by_game::<S>))
    .route("/stats/games/", get(aggregates::by_game::<S>))
    .route("/stats/games/{date}", get(aggregates::game::<S>))
    // Game stats
    .route("/gamestats", get(game_stats::list::<S>).post(game_stats::create::<S>))
    .route("/gamestats/", get(game_stats::list::<S>).post(game_stats::create::<S>))
    .route("/gamestats/{id}", get(game_stats::get_one::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use courtside_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
  }

  fn nathan() -> Value {
    json!({
      "full_name": "Nathan Roberts",
      "class_name": "Sr.",
      "position": "PG",
      "height": "6-0",
      "weight": "175",
      "hometown_hs": "Newport News, Va. / Menchville",
      "jersey_num": 3,
    })
  }

  fn stat_line(date: &str, opponent: &str, pts: u32, player_id: &Value) -> Value {
    json!({
      "date": date,
      "team": "Christopher Newport University",
      "opponent": opponent,
      "season": "2021-2022",
      "fgm": 4, "fga": 9, "fg_pct": 0.444,
      "pts": pts,
      "player_id": player_id,
    })
  }

  fn game_stat(date: &str) -> Value {
    json!({
      "date": date, "opponent": "Salisbury University", "season": "2021-2022",
      "day": 15, "weekday": 5, "month": 1, "year": 2022,
      "home": 1, "overtime": 0, "ranked": 0, "win": 1,
      "fgm": 30, "fga": 62, "fg_percent": 0.484,
      "three_fgm": 9, "three_fga": 24, "three_pt_percent": 0.375,
      "ftm": 14, "fta": 18, "ft_percent": 0.778,
      "off_reb": 11, "def_reb": 27, "tot_reb": 38,
      "pf": 16, "ast": 18, "turnover": 10, "blk": 4, "stl": 8,
      "pts": 83, "cnu_score": 83, "ppg_avg": 79.5, "rb_avg": 37.2,
      "opp_fgm": 25, "opp_fga": 60, "opp_fg_percent": 0.417,
      "opp_three_fgm": 7, "opp_three_fga": 22, "opp_three_pt_percent": 0.318,
      "opp_ftm": 12, "opp_fta": 15, "opp_ft_percent": 0.8,
      "opp_off_reb": 9, "opp_def": 24, "opp_tot_reb": 33,
      "opp_pf": 17, "opp_ast": 12, "opp_turnover": 13, "opp_blk": 3, "opp_stl": 5,
      "opp_pts": 69, "opp_score": 69, "opp_ppg_avg": 71.0, "opp_rb_avg": 34.1,
      "fgm_diff": 5, "fga_diff": 2, "fg_percent_diff": 0.067,
      "three_fgm_diff": 2.0, "three_fga_diff": 2, "three_pt_percent_diff": 0.057,
      "ftm_diff": 2, "fta_diff": 3, "ft_percent_diff": -0.022,
      "off_diff": 2, "def_diff": 3, "tot_diff": 5,
      "pf_diff": -1, "ast_diff": 6, "turnover_diff": -3, "blk_diff": 1, "stl_diff": 3
    })
  }

  // ── Service info ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_reports_name_and_version() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "courtside");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
  }

  // ── Players ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn player_create_then_fetch() {
    let app = app().await;
    let (status, created) = send(&app, "POST", "/players/", Some(nathan())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["class_name"], "Sr.");

    let uri = format!("/players/{}", created["id"].as_str().unwrap());
    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
  }

  #[tokio::test]
  async fn collection_paths_accept_both_slash_forms() {
    let app = app().await;
    send(&app, "POST", "/players", Some(nathan())).await;

    let (with, a) = send(&app, "GET", "/players/", None).await;
    let (without, b) = send(&app, "GET", "/players", None).await;
    assert_eq!(with, StatusCode::OK);
    assert_eq!(without, StatusCode::OK);
    assert_eq!(a, b);
    assert_eq!(a.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn duplicate_player_is_409() {
    let app = app().await;
    send(&app, "POST", "/players/", Some(nathan())).await;
    let (status, body) = send(&app, "POST", "/players/", Some(nathan())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn unknown_position_is_422() {
    let app = app().await;
    let mut player = nathan();
    player["position"] = json!("Goalie");
    let (status, body) = send(&app, "POST", "/players/", Some(player)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
  }

  #[tokio::test]
  async fn missing_player_is_404() {
    let app = app().await;
    let uri = format!("/players/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PATCH", &uri, Some(json!({ "jersey_num": 4 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn patch_changes_only_supplied_fields() {
    let app = app().await;
    let (_, created) = send(&app, "POST", "/players/", Some(nathan())).await;
    let uri = format!("/players/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, "PATCH", &uri, Some(json!({ "jersey_num": 24 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["jersey_num"], 24);
    assert_eq!(updated["full_name"], created["full_name"]);
    assert_eq!(updated["created_on"], created["created_on"]);
    assert_ne!(updated["last_modified"], created["last_modified"]);
  }

  // ── Stat lines and aggregates ───────────────────────────────────────────────

  #[tokio::test]
  async fn player_aggregate_sums_points() {
    let app = app().await;
    let (_, player) = send(&app, "POST", "/players/", Some(nathan())).await;
    let id = &player["id"];

    for (date, opponent, pts) in [
      ("2021-11-13", "Mary Washington", 10),
      ("2021-11-20", "Swarthmore", 15),
      ("2021-11-27", "Salisbury University", 20),
    ] {
      let (status, _) = send(&app, "POST", "/stats/", Some(stat_line(date, opponent, pts, id))).await;
      assert_eq!(status, StatusCode::OK);
    }

    let uri = format!("/stats/players/{}", id.as_str().unwrap());
    let (status, row) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row["full_name"], "Nathan Roberts");
    assert_eq!(row["pts"], 45);
    assert_eq!(row["games"], 3);

    let (_, rows) = send(&app, "GET", "/stats/player", None).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn player_without_stats_is_404() {
    let app = app().await;
    let (_, player) = send(&app, "POST", "/players/", Some(nathan())).await;
    let uri = format!("/stats/players/{}", player["id"].as_str().unwrap());
    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn grouped_routes_do_not_collide_with_stat_line_ids() {
    let app = app().await;
    let (_, player) = send(&app, "POST", "/players/", Some(nathan())).await;
    send(&app, "POST", "/stats/", Some(stat_line("2021-11-13", "Swarthmore", 12, &player["id"]))).await;

    for uri in ["/stats/player", "/stats/teams", "/stats/season", "/stats/games"] {
      let (status, rows) = send(&app, "GET", uri, None).await;
      assert_eq!(status, StatusCode::OK, "{uri}");
      assert_eq!(rows.as_array().unwrap().len(), 1, "{uri}");
    }

    let (status, row) = send(&app, "GET", "/stats/teams/Swarthmore", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row["opponent"], "Swarthmore");

    let (status, row) = send(&app, "GET", "/stats/season/2021-2022", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row["pts"], 12);

    let (status, row) = send(&app, "GET", "/stats/games/2021-11-13", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row["opponent"], "Swarthmore");

    let (status, _) = send(&app, "GET", "/stats/teams/Nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn listings_return_distinct_values() {
    let app = app().await;
    let none = Value::Null;
    send(&app, "POST", "/stats/", Some(stat_line("2021-11-13", "Swarthmore", 8, &none))).await;
    send(&app, "POST", "/stats/", Some(stat_line("2021-11-13", "Swarthmore", 6, &none))).await;

    let (_, teams) = send(&app, "GET", "/teams/", None).await;
    assert_eq!(teams, json!(["Swarthmore"]));

    let (_, seasons) = send(&app, "GET", "/seasons", None).await;
    assert_eq!(seasons, json!(["2021-2022"]));

    let (_, games) = send(&app, "GET", "/games/", None).await;
    assert_eq!(games.as_array().unwrap().len(), 1);
    assert_eq!(games[0]["date"], "2021-11-13");
  }

  #[tokio::test]
  async fn stat_line_patch_and_missing() {
    let app = app().await;
    let none = Value::Null;
    let (_, line) = send(&app, "POST", "/stats/", Some(stat_line("2021-11-13", "Swarthmore", 8, &none))).await;
    let uri = format!("/stats/{}", line["id"].as_str().unwrap());

    let (status, updated) = send(&app, "PATCH", &uri, Some(json!({ "pts": 11 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["pts"], 11);
    assert_eq!(updated["fgm"], 4);

    let missing = format!("/stats/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, "GET", &missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn stat_line_naming_unrostered_player_is_accepted() {
    let app = app().await;
    let stranger = json!(uuid::Uuid::new_v4());
    let (status, line) =
      send(&app, "POST", "/stats/", Some(stat_line("2021-12-04", "Swarthmore", 9, &stranger))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(line["player_id"], stranger);

    let uri = format!("/stats/{}", line["id"].as_str().unwrap());
    let (status, _) = send(&app, "PATCH", &uri, Some(json!({ "player_id": uuid::Uuid::new_v4() }))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, rows) = send(&app, "GET", "/stats/player", None).await;
    assert_eq!(rows, json!([]));
  }

  // ── Path decoding ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn malformed_path_segments_are_422_json() {
    let app = app().await;
    for uri in [
      "/players/not-a-uuid",
      "/stats/not-a-uuid",
      "/gamestats/not-a-uuid",
      "/stats/players/not-a-uuid",
      "/stats/games/2021-13-45",
    ] {
      let (status, body) = send(&app, "GET", uri, None).await;
      assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
      assert!(body["error"].is_string(), "{uri}");
    }

    let (status, body) = send(&app, "PATCH", "/players/42", Some(json!({ "jersey_num": 4 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
  }

  // ── Game stats ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn duplicate_game_stat_date_is_409() {
    let app = app().await;
    let (status, first) = send(&app, "POST", "/gamestats/", Some(game_stat("2022-01-15"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "POST", "/gamestats/", Some(game_stat("2022-01-15"))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, all) = send(&app, "GET", "/gamestats/", None).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["id"], first["id"]);
  }

  #[tokio::test]
  async fn incomplete_game_stat_is_422() {
    let app = app().await;
    let (status, _) = send(&app, "POST", "/gamestats/", Some(json!({ "date": "2022-01-15" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
  }
}
