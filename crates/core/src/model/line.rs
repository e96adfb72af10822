//! Recognized text lines and per-frame OCR results.

use serde::{Deserialize, Serialize};

use super::geometry::LinePositionWithPageOffset;
use crate::text::{char_len, retain_printable_ascii};

/// Lines shorter than this many characters are dropped by the recognizer
/// adapter; they are mostly page numbers, bullets and noise.
pub const DEFAULT_MIN_LINE_LENGTH: usize = 10;

/// One recognized line of text with its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapedLineBox {
    pub content: String,
    pub position: LinePositionWithPageOffset,
}

impl ShapedLineBox {
    pub fn new(content: impl Into<String>, position: LinePositionWithPageOffset) -> Self {
        Self {
            content: content.into(),
            position,
        }
    }

    /// Content length in characters.
    pub fn len(&self) -> usize {
        char_len(&self.content)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Raw line as reported by a recognizer, before filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedLine {
    pub words: Vec<String>,
    /// `(left, top, right, bottom)` in page-local pixels.
    pub bbox: (f64, f64, f64, f64),
}

/// Lines recognized in one image, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OcrResult {
    lines: Vec<ShapedLineBox>,
}

impl OcrResult {
    pub fn new(lines: Vec<ShapedLineBox>) -> Self {
        Self { lines }
    }

    /// Applies the content contract to raw recognizer output.
    ///
    /// Words are joined with a single space, non-printable and non-ASCII
    /// characters are removed, lines shorter than `min_len` characters are
    /// dropped, and surviving boxes are placed at the given page offset.
    pub fn from_recognized_lines<I>(
        lines: I,
        offset_left: f64,
        offset_top: f64,
        min_len: usize,
    ) -> Self
    where
        I: IntoIterator<Item = RecognizedLine>,
    {
        let lines = lines
            .into_iter()
            .filter_map(|line| {
                let content = retain_printable_ascii(&line.words.join(" "));
                if char_len(&content) < min_len {
                    return None;
                }
                let (left, top, right, bottom) = line.bbox;
                let position = LinePositionWithPageOffset::new(left, top, right, bottom)
                    .with_page_offset(offset_left, offset_top);
                Some(ShapedLineBox { content, position })
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[ShapedLineBox] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<ShapedLineBox> {
        self.lines
    }
}

impl From<Vec<ShapedLineBox>> for OcrResult {
    fn from(lines: Vec<ShapedLineBox>) -> Self {
        Self::new(lines)
    }
}
