//! HTTP API handlers.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use time::{macros::format_description, OffsetDateTime};
use tracing::info;

use crate::error::{ErrorBody, RenderError, Result};
use crate::metrics;
use crate::pdf;
use crate::props::{League, PropRecord, PropsClient};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream projections client.
    pub props: PropsClient,
    /// Prometheus handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(props: PropsClient) -> Self {
        Self {
            props,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` route.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("props", &self.props)
            .field("metrics_enabled", &self.metrics.is_some())
            .finish()
    }
}

/// Query string accepted by the props routes.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeagueQuery {
    /// League key (nba, mlb, nfl, nhl, tennis). Defaults to nba.
    pub league: Option<String>,
}

impl LeagueQuery {
    /// Requested league key, or the default.
    pub fn league(&self) -> &str {
        self.league.as_deref().unwrap_or(League::DEFAULT_KEY)
    }
}

/// Root handler - plain text liveness message.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is running", body = String, content_type = "text/plain"))
)]
pub async fn root() -> &'static str {
    "EVPlus Backend is running!"
}

/// Props handler - live props for a league as JSON.
#[utoipa::path(
    get,
    path = "/api/props",
    params(LeagueQuery),
    responses(
        (status = 200, description = "Props for the league", body = [PropRecord]),
        (status = 500, description = "Unsupported league or upstream failure", body = ErrorBody)
    )
)]
pub async fn props(
    State(state): State<AppState>,
    Query(query): Query<LeagueQuery>,
) -> Result<Json<Vec<PropRecord>>> {
    let records = state.props.fetch(query.league()).await?;
    metrics::add_props_served("props", records.len());

    Ok(Json(records))
}

/// PDF handler - live props for a league as a downloadable PDF.
#[utoipa::path(
    get,
    path = "/api/generate-pdf",
    params(LeagueQuery),
    responses(
        (status = 200, description = "PDF table of props", body = Vec<u8>, content_type = "application/pdf"),
        (status = 500, description = "Unsupported league, upstream or render failure", body = ErrorBody)
    )
)]
pub async fn generate_pdf(
    State(state): State<AppState>,
    Query(query): Query<LeagueQuery>,
) -> Result<impl IntoResponse> {
    let league = query.league();
    let records = state.props.fetch(league).await?;
    let bytes = pdf::render(league, &records)?;
    metrics::add_props_served("generate-pdf", records.len());

    let filename = pdf_filename(league, OffsetDateTime::now_utc())?;
    info!(filename = %filename, bytes = bytes.len(), "Serving PDF");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        bytes,
    ))
}

/// Metrics handler - Prometheus text exposition, 404 when disabled.
pub async fn metrics_text(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}

/// Download filename: `prizepicks_<league>_<YYYY-MM-DD>.pdf`, league as
/// requested, UTC date.
pub fn pdf_filename(league: &str, now: OffsetDateTime) -> std::result::Result<String, RenderError> {
    let date = now
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| RenderError::RenderFailed(format!("date format: {}", e)))?;

    Ok(format!("prizepicks_{}_{}.pdf", league, date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn league_query_defaults_to_nba() {
        let query = LeagueQuery { league: None };
        assert_eq!(query.league(), "nba");

        let query = LeagueQuery {
            league: Some("NHL".to_string()),
        };
        assert_eq!(query.league(), "NHL");
    }

    #[test]
    fn pdf_filename_uses_requested_key_and_utc_date() {
        let now = datetime!(2024-03-07 23:59:59 UTC);
        assert_eq!(pdf_filename("nba", now).unwrap(), "prizepicks_nba_2024-03-07.pdf");
        assert_eq!(pdf_filename("MLB", now).unwrap(), "prizepicks_MLB_2024-03-07.pdf");
    }

    #[tokio::test]
    async fn root_message() {
        assert_eq!(root().await, "EVPlus Backend is running!");
    }
}
