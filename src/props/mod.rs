//! PrizePicks props.
//!
//! This module handles:
//! - The supported league table
//! - Upstream projections types and the normalized prop record
//! - Flattening a projections document into records
//! - The HTTP client for the projections endpoint

pub mod client;
pub mod league;
pub mod normalize;
pub mod types;

pub use client::PropsClient;
pub use league::League;
pub use normalize::normalize;
pub use types::{PropRecord, ProjectionResponse};
