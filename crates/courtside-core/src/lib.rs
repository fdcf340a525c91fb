//! Core types and trait definitions for the Courtside statistics store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod game_stat;
pub mod player;
pub mod stat_line;
pub mod store;
pub mod summary;

mod modified;

pub use error::{Error, Result};
pub use modified::next_modified;
