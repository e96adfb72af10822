//! Data model shared by the index, the searches and the viewport estimator.

pub mod geometry;
pub mod id;
pub mod line;
pub mod metadata;

pub use geometry::{HasBBox, LinePositionWithPageOffset};
pub use id::DocumentId;
pub use line::{DEFAULT_MIN_LINE_LENGTH, OcrResult, RecognizedLine, ShapedLineBox};
pub use metadata::{DocumentMetadata, DocumentType, PageMetadata};

/// Pixel size of an incoming video frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameMetadata {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl FrameMetadata {
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            channels: 1,
        }
    }
}
