//! Standard Type 1 fonts used by the props table.

/// Advance widths of Helvetica for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Width used for characters outside the ASCII table.
const FALLBACK_WIDTH: u16 = 556;

/// Horizontal ellipsis, used to shorten cells that overflow their column.
pub const ELLIPSIS: char = '\u{2026}';

/// Typeface of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
}

impl Font {
    /// All fonts, in resource order.
    pub const ALL: [Font; 2] = [Font::Regular, Font::Bold];

    /// Ascender height in 1/1000 em.
    pub const ASCENDER: f32 = 718.0;

    /// Line height as a multiple of the font size (ascender, descender
    /// and line gap).
    pub const LINE_HEIGHT: f32 = 1.156;

    /// PostScript base font name.
    pub fn base_name(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

}

/// Width of `text` set in Helvetica at `size` points.
pub fn text_width(text: &str, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| match c as u32 {
            code @ 32..=126 => HELVETICA_WIDTHS[(code - 32) as usize] as u32,
            _ if c == ELLIPSIS => 1000,
            _ => FALLBACK_WIDTH as u32,
        })
        .sum();

    units as f32 * size / 1000.0
}

/// Encode text as WinAnsiEncoding bytes. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\u{20ac}' => 0x80,
            ELLIPSIS => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        })
        .collect()
}
