//! docsync - locate live video frames of a presentation inside its document.
//!
//! Given the recognized text of a frame and a pre-built line index of the
//! document, find the page or line on screen and back-project the camera
//! view into document coordinates.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod text;
pub mod viewport;

pub use analyzer::{
    AnalyzerResult, ContentMatch, FsIndexLoader, IndexCache, IndexLoader, MatchResponse,
    OcrEngine, SequenceAnalyzer,
};
pub use config::AnalyzerConfig;
pub use error::{MatchError, Result};
pub use index::{DocumentIndex, FoundRelatedLine, FoundRelatedPage, IndexBuilder, MatchParams};
pub use model::{
    DocumentId, DocumentMetadata, DocumentType, FrameMetadata, LinePositionWithPageOffset,
    OcrResult, PageMetadata, ShapedLineBox,
};
pub use viewport::{DocumentScaleViewport, ViewportEstimator, ViewportParams};
