//! EVPlus backend.
//!
//! A small HTTP service that proxies the PrizePicks projections API. Each
//! request fetches the live board for one league, flattens it into
//! [`props::PropRecord`]s and either returns them as JSON or renders them
//! into a PDF table.
//!
//! ```text
//! GET /api/props?league=nba
//!   -> PropsClient::fetch("nba")          one upstream GET, no retries
//!   -> [{player, stat, line, team, league}, ...]
//!
//! GET /api/generate-pdf?league=nba
//!   -> PropsClient::fetch("nba")
//!   -> pdf::render("nba", &records)       title, header row, one row per prop
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`props`]: League table, upstream client and normalization
//! - [`pdf`]: Table layout and PDF encoding
//! - [`api`]: HTTP routes
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pdf;
pub mod props;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServerError};
