//! Frame analysis: recognize a frame, find it in the document, locate the
//! viewport.

pub mod cache;
pub mod response;

pub use cache::{FsIndexLoader, INDEX_DIR, IndexCache, IndexLoader};
pub use response::MatchResponse;

use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::index::{DocumentIndex, FoundRelatedLine, FoundRelatedPage, MatchParams};
use crate::model::{DocumentId, DocumentType, FrameMetadata, OcrResult, ShapedLineBox};
use crate::viewport::{DocumentScaleViewport, ViewportEstimator, ViewportParams};

/// Text recognizer applied to incoming frames.
///
/// Implementations must return lines top to bottom, with content already
/// restricted to printable ASCII and short lines dropped (see
/// [`OcrResult::from_recognized_lines`]).
pub trait OcrEngine: Send + Sync {
    type Frame: ?Sized;

    fn recognize(&self, frame: &Self::Frame) -> Result<OcrResult>;
}

/// What the search found, depending on the document type.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentMatch {
    Page(FoundRelatedPage),
    Line(FoundRelatedLine),
}

impl ContentMatch {
    pub fn matched_frame_line(&self) -> &ShapedLineBox {
        match self {
            Self::Page(p) => &p.matched_frame_line,
            Self::Line(l) => &l.matched_frame_line,
        }
    }

    pub fn matched_index_line(&self) -> &ShapedLineBox {
        match self {
            Self::Page(p) => &p.matched_index_line,
            Self::Line(l) => &l.matched_index_line,
        }
    }

    pub fn ngram_score(&self) -> f64 {
        match self {
            Self::Page(p) => p.ngram_score,
            Self::Line(l) => l.ngram_score,
        }
    }

    pub fn sq_match_score(&self) -> f64 {
        match self {
            Self::Page(p) => p.sq_match_score,
            Self::Line(l) => l.sq_match_score,
        }
    }
}

/// Outcome of analyzing one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerResult {
    pub matched: bool,
    /// False when the document has no index to match against.
    pub document_available: bool,
    pub content_match: Option<ContentMatch>,
    pub viewport: Option<DocumentScaleViewport>,
}

impl AnalyzerResult {
    pub fn unavailable() -> Self {
        Self {
            matched: false,
            document_available: false,
            content_match: None,
            viewport: None,
        }
    }
}

/// Matches frames against cached document indexes.
pub struct SequenceAnalyzer<O, L> {
    ocr: O,
    cache: IndexCache<L>,
    params: MatchParams,
    estimator: ViewportEstimator,
}

impl<O: OcrEngine> SequenceAnalyzer<O, FsIndexLoader> {
    /// Analyzer reading indexes from the configured data root.
    pub fn from_config(ocr: O, config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(ocr, FsIndexLoader::new(&config.data_root))
            .with_params(config.matching.clone())
            .with_viewport_params(config.viewport.clone()))
    }
}

impl<O: OcrEngine, L: IndexLoader> SequenceAnalyzer<O, L> {
    pub fn new(ocr: O, loader: L) -> Self {
        Self {
            ocr,
            cache: IndexCache::new(loader),
            params: MatchParams::default(),
            estimator: ViewportEstimator::default(),
        }
    }

    pub fn with_params(mut self, params: MatchParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_viewport_params(mut self, params: ViewportParams) -> Self {
        self.estimator = ViewportEstimator::new(params);
        self
    }

    pub fn params(&self) -> &MatchParams {
        &self.params
    }

    pub fn cache(&self) -> &IndexCache<L> {
        &self.cache
    }

    /// Forgets the cached index of `id`; the next request reloads it.
    pub fn invalidate(&self, id: &DocumentId) -> bool {
        self.cache.invalidate(id)
    }

    /// Recognizes `frame` and matches it against the index of `id`.
    ///
    /// # Errors
    /// Index load failures (including an unrecognized document type),
    /// recognizer failures, and `InsufficientIndexData` from the line search.
    pub fn match_frame(
        &self,
        id: &DocumentId,
        frame: &O::Frame,
        frame_meta: FrameMetadata,
    ) -> Result<AnalyzerResult> {
        let Some(index) = self.cache.get(id)? else {
            info!(asset_id = %id, "no document index available");
            return Ok(AnalyzerResult::unavailable());
        };
        let ocr = self.ocr.recognize(frame)?;
        self.match_against(&index, &ocr, frame_meta)
    }

    /// Same as [`Self::match_frame`] for an already recognized frame.
    pub fn match_ocr_result(
        &self,
        id: &DocumentId,
        ocr: &OcrResult,
        frame_meta: FrameMetadata,
    ) -> Result<AnalyzerResult> {
        let Some(index) = self.cache.get(id)? else {
            info!(asset_id = %id, "no document index available");
            return Ok(AnalyzerResult::unavailable());
        };
        self.match_against(&index, ocr, frame_meta)
    }

    fn match_against(
        &self,
        index: &DocumentIndex,
        ocr: &OcrResult,
        frame_meta: FrameMetadata,
    ) -> Result<AnalyzerResult> {
        let meta = index.metadata();
        let (content_match, viewport) = match meta.doc_type {
            DocumentType::Slide => {
                let found = index.search_most_matching_page(ocr, &self.params);
                let viewport = found
                    .as_ref()
                    .map(|page| self.estimator.estimate_from_page(page, meta, frame_meta));
                (found.map(ContentMatch::Page), viewport)
            }
            DocumentType::Document => {
                let found = index.search_most_matching_line(ocr, &self.params)?;
                let viewport = found
                    .as_ref()
                    .and_then(|line| self.estimator.estimate_from_line(line, meta, frame_meta));
                (found.map(ContentMatch::Line), viewport)
            }
        };

        debug!(
            asset_id = %meta.asset_id,
            doc_type = %meta.doc_type,
            frame_lines = ocr.len(),
            matched = content_match.is_some(),
            "frame analyzed"
        );

        Ok(AnalyzerResult {
            matched: content_match.is_some(),
            document_available: true,
            content_match,
            viewport,
        })
    }
}
