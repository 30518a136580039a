//! Props PDF rendering.
//!
//! - [`layout`] positions the title, header row and prop rows on pages
//! - [`writer`] encodes the positioned text into a PDF document
//! - [`font`] holds the Helvetica metrics and text encoding both rely on

pub mod font;
pub mod layout;
pub mod writer;

use std::time::Instant;

use tracing::{debug, instrument, warn};

use crate::error::RenderError;
use crate::metrics;
use crate::props::PropRecord;

pub use layout::{layout, PageLayout, TextRun};

/// Render the props table for a league into PDF bytes.
///
/// Rows appear in input order. An empty slice yields a one-page document
/// with the title and header row only.
#[instrument(skip(records), fields(records = records.len()))]
pub fn render(league: &str, records: &[PropRecord]) -> Result<Vec<u8>, RenderError> {
    let start = Instant::now();

    let pages = layout(league, records);
    let result = writer::write_document(&pages);
    metrics::record_render_latency(start);

    match &result {
        Ok(bytes) => debug!(pages = pages.len(), bytes = bytes.len(), "Rendered PDF"),
        Err(e) => {
            metrics::inc_render_failures();
            warn!(error = %e, "PDF render failed");
        }
    }

    result
}
