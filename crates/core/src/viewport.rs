//! Viewport estimation: where in the document is the camera looking?
//!
//! A matched line is known in two coordinate spaces, the frame and the
//! stacked document. The ratio of its heights gives the scale between the
//! two, and the whole frame rectangle is back-projected into document space
//! anchored at that line. Line heights are used rather than widths because
//! they survive rendering and recognition artifacts better.

use serde::{Deserialize, Serialize};

use crate::index::{FoundRelatedLine, FoundRelatedPage};
use crate::model::{DocumentMetadata, FrameMetadata, HasBBox, LinePositionWithPageOffset};

/// Width and height of the document a viewport is relative to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentExtent {
    pub width: f64,
    pub height: f64,
}

impl From<&DocumentMetadata> for DocumentExtent {
    fn from(meta: &DocumentMetadata) -> Self {
        Self {
            width: meta.width as f64,
            height: meta.height as f64,
        }
    }
}

/// Region of the document, in document pixels, shown by a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentScaleViewport {
    document: DocumentExtent,
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl DocumentScaleViewport {
    pub const fn new(
        document: DocumentExtent,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    ) -> Self {
        Self {
            document,
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn document(&self) -> DocumentExtent {
        self.document
    }

    /// `((left, top), (right, bottom))` in document pixels.
    pub fn absolute_bbox(&self) -> ((f64, f64), (f64, f64)) {
        ((self.left, self.top), (self.right, self.bottom))
    }

    /// `((left, top), (right, bottom))` as fractions of the document size.
    pub fn normalized_bbox(&self) -> ((f64, f64), (f64, f64)) {
        let (w, h) = (self.document.width, self.document.height);
        (
            (self.left / w, self.top / h),
            (self.right / w, self.bottom / h),
        )
    }

    /// `(width, height)` as fractions of the document size.
    pub fn normalized_size(&self) -> (f64, f64) {
        (
            self.width() / self.document.width,
            self.height() / self.document.height,
        )
    }
}

impl HasBBox for DocumentScaleViewport {
    fn left(&self) -> f64 {
        self.left
    }
    fn top(&self) -> f64 {
        self.top
    }
    fn right(&self) -> f64 {
        self.right
    }
    fn bottom(&self) -> f64 {
        self.bottom
    }
}

/// Back-projects the frame rectangle into document space.
///
/// `frame_box` is the matched line in frame pixels, `doc_box` the same line
/// in the index. Returns `None` when the frame box has no height, since the
/// scale is undefined then.
pub fn project(
    frame_box: &LinePositionWithPageOffset,
    doc_box: &LinePositionWithPageOffset,
    frame: FrameMetadata,
    document: DocumentExtent,
) -> Option<DocumentScaleViewport> {
    let frame_height = frame_box.height();
    if frame_height <= 0.0 {
        return None;
    }
    // document pixels per frame pixel
    let r = doc_box.height() / frame_height;
    if !r.is_finite() {
        return None;
    }

    let left = doc_box.offset_left() + doc_box.left() - frame_box.left() * r;
    let top = doc_box.offset_top() + doc_box.top() - frame_box.top() * r;
    let right = left + frame.width as f64 * r;
    let bottom = top + frame.height as f64 * r;

    Some(DocumentScaleViewport::new(document, left, top, right, bottom))
}

/// Acceptance band for page-level estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportParams {
    /// Smallest accepted `projected area / page area`.
    pub min_area_ratio: f64,
    /// Largest accepted `projected area / page area`.
    pub max_area_ratio: f64,
}

impl Default for ViewportParams {
    fn default() -> Self {
        Self {
            min_area_ratio: 0.9,
            max_area_ratio: 1.2,
        }
    }
}

/// Turns search results into document viewports.
#[derive(Debug, Clone, Default)]
pub struct ViewportEstimator {
    params: ViewportParams,
}

impl ViewportEstimator {
    pub fn new(params: ViewportParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ViewportParams {
        &self.params
    }

    /// Projection anchored at the matched line. `None` when the frame line
    /// box is degenerate.
    pub fn estimate_from_line(
        &self,
        found: &FoundRelatedLine,
        doc: &DocumentMetadata,
        frame: FrameMetadata,
    ) -> Option<DocumentScaleViewport> {
        project(
            &found.matched_frame_line.position,
            &found.matched_index_line.position,
            frame,
            DocumentExtent::from(doc),
        )
    }

    /// Projection anchored at the matched line, checked against the size of
    /// one slide.
    ///
    /// The projected area must lie within the configured band around
    /// `doc width * doc height / n_pages`; otherwise (or when the projection
    /// is undefined) the full box of the matched page is returned instead.
    pub fn estimate_from_page(
        &self,
        found: &FoundRelatedPage,
        doc: &DocumentMetadata,
        frame: FrameMetadata,
    ) -> DocumentScaleViewport {
        let projected = project(
            &found.matched_frame_line.position,
            &found.matched_index_line.position,
            frame,
            DocumentExtent::from(doc),
        );

        let page_area = doc.width as f64 * doc.uniform_page_height();
        if let Some(viewport) = projected {
            let ratio = viewport.area() / page_area;
            if (self.params.min_area_ratio..=self.params.max_area_ratio).contains(&ratio) {
                return viewport;
            }
        }

        page_fallback(found.page_id, doc)
    }
}

/// Full box of page `page_id`, assuming every page has the same height.
pub fn page_fallback(page_id: usize, doc: &DocumentMetadata) -> DocumentScaleViewport {
    let n_pages = doc.n_pages.max(1) as f64;
    let slide_fraction = 1.0 / n_pages;
    let height = doc.height as f64;
    DocumentScaleViewport::new(
        DocumentExtent::from(doc),
        0.0,
        page_id as f64 * slide_fraction * height,
        doc.width as f64,
        (page_id + 1) as f64 * slide_fraction * height,
    )
}
