//! PrizePicks projections API client.

use std::time::Instant;

use reqwest::header::{ACCEPT, REFERER, USER_AGENT};
use tracing::{debug, info, instrument, warn};

use crate::config::Config;
use crate::error::{FetchFailure, PropsError};
use crate::metrics;

use super::league::League;
use super::normalize::normalize;
use super::types::{ProjectionResponse, PropRecord};

/// Headers sent with every projections request.
///
/// The upstream blocks requests that do not look like they come from a
/// browser on the public site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamHeaders {
    /// `User-Agent` value.
    pub user_agent: String,
    /// `Accept` value.
    pub accept: String,
    /// `Referer` value.
    pub referer: String,
}

impl UpstreamHeaders {
    /// Header values from config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            user_agent: config.upstream_user_agent.clone(),
            accept: config.upstream_accept.clone(),
            referer: config.upstream_referer.clone(),
        }
    }
}

/// Client for the projections endpoint.
#[derive(Debug, Clone)]
pub struct PropsClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Projections endpoint URL.
    projections_url: String,
    /// Browser-like request headers.
    headers: UpstreamHeaders,
    /// Projections requested per call.
    per_page: u32,
}

impl PropsClient {
    /// Create a new client from config.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            http,
            projections_url: config.projections_url.clone(),
            headers: UpstreamHeaders::from_config(config),
            per_page: config.per_page,
        })
    }

    /// Get the projections endpoint URL.
    pub fn projections_url(&self) -> &str {
        &self.projections_url
    }

    /// Get the headers sent upstream.
    pub fn headers(&self) -> &UpstreamHeaders {
        &self.headers
    }

    /// Fetch and normalize the live props board for a league key.
    ///
    /// Unknown keys fail before any request is made. Exactly one request is
    /// sent otherwise, with no retries.
    #[instrument(skip_all, fields(league = %league_key))]
    pub async fn fetch(&self, league_key: &str) -> Result<Vec<PropRecord>, PropsError> {
        let league = League::parse(league_key)?;
        let start = Instant::now();

        let result = self.fetch_projections(league).await;
        metrics::record_fetch_latency(start, league);

        let response = result.map_err(|e| {
            metrics::inc_fetch_failures(league);
            if e.is_timeout() {
                warn!(timeout_ms = start.elapsed().as_millis() as u64, "Projections request timed out");
            } else {
                warn!(error = %e, "Projections request failed");
            }
            PropsError::FetchFailed(e)
        })?;

        let records = normalize(&league.label(), response);
        info!(count = records.len(), "Fetched props");

        Ok(records)
    }

    /// Issue the projections request and decode the body.
    async fn fetch_projections(&self, league: League) -> Result<ProjectionResponse, FetchFailure> {
        let league_id = league.id().to_string();
        let per_page = self.per_page.to_string();

        debug!(league_id = %league_id, url = %self.projections_url, "Requesting projections");

        let response = self
            .http
            .get(&self.projections_url)
            .query(&[
                ("league_id", league_id.as_str()),
                ("per_page", per_page.as_str()),
                ("single_stat", "true"),
            ])
            .header(USER_AGENT, &self.headers.user_agent)
            .header(ACCEPT, &self.headers.accept)
            .header(REFERER, &self.headers.referer)
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Received projections");

        Ok(serde_json::from_slice(&body)?)
    }
}
