//! Document and page geometry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::id::DocumentId;
use crate::error::MatchError;

/// How a document's content is laid out, which decides the search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Landscape pages revealed one at a time; matched page by page.
    Slide,
    /// Portrait pages read continuously; matched line by line.
    Document,
}

impl DocumentType {
    /// Landscape or square first pages are slides, portrait ones documents.
    pub fn from_page_aspect(width: u32, height: u32) -> Self {
        if width >= height {
            Self::Slide
        } else {
            Self::Document
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Slide => "slide",
            Self::Document => "document",
        }
    }
}

impl FromStr for DocumentType {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slide" => Ok(Self::Slide),
            "document" => Ok(Self::Document),
            _ => Err(MatchError::InvalidDocumentType(s.to_string())),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry of one page inside the stacked document image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub width: u32,
    pub height: u32,
    pub offset_top: u32,
    pub page_id: usize,
}

/// Geometry of the whole stacked document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMetadata {
    pub asset_id: DocumentId,
    pub width: u32,
    pub height: u32,
    pub n_pages: usize,
    pub doc_type: DocumentType,
    pub pages: Vec<PageMetadata>,
}

impl DocumentMetadata {
    /// Height of one page when all pages are assumed equally tall.
    pub fn uniform_page_height(&self) -> f64 {
        if self.n_pages == 0 {
            return self.height as f64;
        }
        self.height as f64 / self.n_pages as f64
    }

    pub fn page(&self, page_id: usize) -> Option<&PageMetadata> {
        self.pages.get(page_id)
    }
}
