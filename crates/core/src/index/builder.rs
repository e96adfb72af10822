//! Builder for assembling a document index from recognized pages.
//!
//! Pages are stacked vertically into one tall coordinate space, the way the
//! renderer concatenates page images.
//!
//! # Example
//! ```ignore
//! use docsync_core::index::IndexBuilder;
//! use docsync_core::model::DocumentId;
//!
//! let index = IndexBuilder::new(DocumentId::parse("lecture-01")?)
//!     .page(1280, 720, first_page_lines)
//!     .page(1280, 720, second_page_lines)
//!     .build()?;
//! ```

use tracing::debug;

use super::DocumentIndex;
use crate::error::{MatchError, Result};
use crate::model::{DocumentId, DocumentMetadata, DocumentType, PageMetadata, ShapedLineBox};

#[derive(Debug, Clone)]
struct PageInput {
    width: u32,
    height: u32,
    lines: Vec<ShapedLineBox>,
}

/// A builder for [`DocumentIndex`].
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    asset_id: DocumentId,
    pages: Vec<PageInput>,
    page_margin: u32,
    doc_type: Option<DocumentType>,
}

impl IndexBuilder {
    pub fn new(asset_id: DocumentId) -> Self {
        Self {
            asset_id,
            pages: Vec::new(),
            page_margin: 0,
            doc_type: None,
        }
    }

    /// Vertical gap inserted after every page (default 0).
    pub fn page_margin(mut self, px: u32) -> Self {
        self.page_margin = px;
        self
    }

    /// Overrides the type otherwise detected from the first page's aspect.
    pub fn doc_type(mut self, doc_type: DocumentType) -> Self {
        self.doc_type = Some(doc_type);
        self
    }

    /// Appends a page. `lines` carry page-local boxes.
    pub fn page(
        mut self,
        width: u32,
        height: u32,
        lines: impl IntoIterator<Item = ShapedLineBox>,
    ) -> Self {
        self.push_page(width, height, lines);
        self
    }

    /// Appends a page without consuming the builder.
    pub fn push_page(
        &mut self,
        width: u32,
        height: u32,
        lines: impl IntoIterator<Item = ShapedLineBox>,
    ) {
        self.pages.push(PageInput {
            width,
            height,
            lines: lines.into_iter().collect(),
        });
    }

    pub fn build(self) -> Result<DocumentIndex> {
        let Some(first) = self.pages.first() else {
            return Err(MatchError::IndexFormat(format!(
                "document {} has no pages",
                self.asset_id
            )));
        };
        let width = first.width;
        let doc_type = self
            .doc_type
            .unwrap_or_else(|| DocumentType::from_page_aspect(first.width, first.height));

        let n_pages = self.pages.len();
        let mut offset_top: u32 = 0;
        let mut page_meta = Vec::with_capacity(n_pages);
        let mut page_lines = Vec::with_capacity(n_pages);

        for (page_id, page) in self.pages.into_iter().enumerate() {
            page_meta.push(PageMetadata {
                width: page.width,
                height: page.height,
                offset_top,
                page_id,
            });
            let top = offset_top as f64;
            page_lines.push(
                page.lines
                    .into_iter()
                    .map(|line| ShapedLineBox {
                        position: line.position.with_page_offset(0.0, top),
                        content: line.content,
                    })
                    .collect(),
            );
            offset_top += page.height + self.page_margin;
        }

        debug!(
            asset_id = %self.asset_id,
            n_pages,
            %doc_type,
            height = offset_top,
            "assembled document index"
        );

        DocumentIndex::new(
            DocumentMetadata {
                asset_id: self.asset_id,
                width,
                height: offset_top,
                n_pages,
                doc_type,
                pages: page_meta,
            },
            page_lines,
        )
    }
}
