//! Table layout for the props PDF.
//!
//! Positions are computed top-down, like a text flow: a cursor measured from
//! the top edge advances one line per row and wraps to a new page when the
//! next line would cross the bottom margin. Each [`TextRun`] stores its
//! baseline in PDF user space (origin bottom-left).

use serde_json::Value;

use crate::props::PropRecord;

use super::font::{text_width, Font, ELLIPSIS};

/// US Letter width in points.
pub const PAGE_WIDTH: f32 = 612.0;
/// US Letter height in points.
pub const PAGE_HEIGHT: f32 = 792.0;
/// Margin on every side.
pub const MARGIN: f32 = 30.0;

/// Title font size.
pub const TITLE_SIZE: f32 = 18.0;
/// Header and row font size.
pub const BODY_SIZE: f32 = 12.0;

/// Column widths: Player, Stat, Line, Team.
pub const COLUMN_WIDTHS: [f32; 4] = [180.0, 90.0, 80.0, 80.0];
/// Header labels.
pub const HEADERS: [&str; 4] = ["Player", "Stat", "Line", "Team"];
/// Space kept clear at the right edge of each cell.
pub const CELL_PADDING: f32 = 4.0;

/// Extra space after the header row, in lines.
const HEADER_GAP: f32 = 0.3;
/// Extra space after each data row, in lines.
const ROW_GAP: f32 = 0.1;

/// A single positioned string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Text to draw.
    pub text: String,
    /// Typeface.
    pub font: Font,
    /// Font size in points.
    pub size: f32,
    /// Left edge in points.
    pub x: f32,
    /// Baseline, in points from the bottom edge.
    pub y: f32,
}

/// Text runs of one page, in drawing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Runs on this page.
    pub runs: Vec<TextRun>,
}

/// Title line for a league.
pub fn title(league: &str) -> String {
    format!("PrizePicks Props – {}", league.to_uppercase())
}

/// Left edge of each column.
pub fn column_offsets() -> [f32; 4] {
    let mut offsets = [MARGIN; 4];
    for i in 1..offsets.len() {
        offsets[i] = offsets[i - 1] + COLUMN_WIDTHS[i - 1];
    }
    offsets
}

/// Cell values of a record, in column order.
pub fn row_cells(record: &PropRecord) -> [String; 4] {
    [
        record.player.clone(),
        cell_text(record.stat.as_ref()),
        cell_text(record.line.as_ref()),
        record.team.clone(),
    ]
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        },
        Some(other) => other.to_string(),
    }
}

/// Shorten `text` with a trailing ellipsis until it is at most `max_width`
/// points wide at `size`.
pub fn fit_text(text: &str, max_width: f32, size: f32) -> String {
    if text_width(text, size) <= max_width {
        return text.to_string();
    }

    let mut kept: String = text.to_string();
    while kept.pop().is_some() {
        let candidate = format!("{}{}", kept.trim_end(), ELLIPSIS);
        if text_width(&candidate, size) <= max_width {
            return candidate;
        }
    }
    String::new()
}

/// Lay out the title, header row and one row per record.
///
/// Always yields at least one page.
pub fn layout(league: &str, records: &[PropRecord]) -> Vec<PageLayout> {
    let mut flow = Flow::new();

    let title = title(league);
    let title_x = MARGIN + (PAGE_WIDTH - 2.0 * MARGIN - text_width(&title, TITLE_SIZE)) / 2.0;
    flow.line(TITLE_SIZE, 0.0, |y| {
        vec![TextRun {
            text: title.clone(),
            font: Font::Regular,
            size: TITLE_SIZE,
            x: title_x.max(MARGIN),
            y,
        }]
    });
    // Blank line below the title.
    flow.advance(line_height(TITLE_SIZE));

    let headers = HEADERS.map(str::to_string);
    flow.table_row(Font::Bold, &headers, HEADER_GAP);

    for record in records {
        flow.table_row(Font::Regular, &row_cells(record), ROW_GAP);
    }

    flow.finish()
}

fn line_height(size: f32) -> f32 {
    Font::LINE_HEIGHT * size
}

/// Top-down text cursor over a sequence of pages.
struct Flow {
    pages: Vec<PageLayout>,
    current: PageLayout,
    /// Distance of the next line's top from the top edge.
    cursor: f32,
}

impl Flow {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: PageLayout::default(),
            cursor: MARGIN,
        }
    }

    fn advance(&mut self, amount: f32) {
        self.cursor += amount;
    }

    /// Place one line, breaking the page first if it would not fit.
    /// `gap` is extra space after the line, in multiples of its height.
    fn line<F>(&mut self, size: f32, gap: f32, runs: F)
    where
        F: FnOnce(f32) -> Vec<TextRun>,
    {
        let height = line_height(size);
        if self.cursor + height > PAGE_HEIGHT - MARGIN && !self.current.runs.is_empty() {
            self.break_page();
        }

        let baseline = PAGE_HEIGHT - self.cursor - Font::ASCENDER * size / 1000.0;
        self.current.runs.extend(runs(baseline));
        self.cursor += height * (1.0 + gap);
    }

    fn table_row(&mut self, font: Font, cells: &[String; 4], gap: f32) {
        let offsets = column_offsets();
        self.line(BODY_SIZE, gap, |y| {
            cells
                .iter()
                .zip(offsets)
                .zip(COLUMN_WIDTHS)
                .map(|((text, x), width)| TextRun {
                    text: fit_text(text, width - CELL_PADDING, BODY_SIZE),
                    font,
                    size: BODY_SIZE,
                    x,
                    y,
                })
                .collect()
        });
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.cursor = MARGIN;
    }

    fn finish(mut self) -> Vec<PageLayout> {
        self.pages.push(self.current);
        self.pages
    }
}
