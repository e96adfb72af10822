//! Per-document line index and the searches that run against it.
//!
//! A `DocumentIndex` holds every recognized line of a document, page by page,
//! together with the document geometry. It is built once (from a persisted
//! index file or from freshly recognized pages) and is read-only afterwards.
//!
//! Two searches are provided:
//! - [`DocumentIndex::search_most_matching_line`] for documents, which looks
//!   for runs of consecutive frame lines in the flattened line list;
//! - [`DocumentIndex::search_most_matching_page`] for slide decks, which
//!   narrows a candidate page set as it walks the frame top to bottom.

use std::ops::Range;

use crate::error::{MatchError, Result};
use crate::model::{DocumentMetadata, ShapedLineBox};
use crate::text::{SimilarityScores, char_len, length_ratio, similarity_with_ngram};

pub mod builder;
pub mod line_search;
pub mod page_search;
pub mod params;
pub mod store;

pub use builder::IndexBuilder;
pub use page_search::{Narrowing, PageNarrowing, PagePool};
pub use params::MatchParams;

/// Result of the line search.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundRelatedLine {
    /// Start of the matched window in the frame.
    pub frame_line_index: usize,
    /// Start of the matched window in the flattened index.
    pub index_line_index: usize,
    /// Last index line of the matched window.
    pub matched_index_line: ShapedLineBox,
    /// Last frame line of the matched window.
    pub matched_frame_line: ShapedLineBox,
    pub ngram_score: f64,
    pub sq_match_score: f64,
}

/// Result of the page search.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundRelatedPage {
    pub page_id: usize,
    pub matched_index_line: ShapedLineBox,
    pub matched_frame_line: ShapedLineBox,
    pub ngram_score: f64,
    pub sq_match_score: f64,
}

impl FoundRelatedPage {
    /// Ranking score used when several candidate pages survive.
    pub fn total_score(&self) -> f64 {
        self.ngram_score + self.sq_match_score
    }
}

/// Scores an (index line, frame line) pair, or `None` when it fails any of
/// the thresholds in `params`.
///
/// The checks run cheapest first: index line length, both length ratios,
/// then the two similarity scores. Argument order matters because the
/// n-gram overlap breaks window-count ties in favour of its first argument.
pub fn score_line_pair(
    index_line: &str,
    frame_line: &str,
    params: &MatchParams,
) -> Option<SimilarityScores> {
    if char_len(index_line) < params.min_line_length {
        return None;
    }

    let (r_index, r_frame) = length_ratio(index_line, frame_line)?;
    if r_index < params.min_length_ratio || r_frame < params.min_length_ratio {
        return None;
    }

    let scores = similarity_with_ngram(index_line, frame_line, params.ngram_size);
    if scores.ngram < params.ngram_threshold || scores.sequence < params.sequence_threshold {
        return None;
    }

    Some(scores)
}

/// Recognized lines of a whole document, partitioned by page.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentIndex {
    metadata: DocumentMetadata,
    /// Every line, page-major, in recognition order within a page.
    lines: Vec<ShapedLineBox>,
    /// `lines[pages[i].clone()]` are the lines of page `i`.
    pages: Vec<Range<usize>>,
}

impl DocumentIndex {
    /// Builds an index from per-page line lists.
    ///
    /// Fails with `IndexFormat` when the number of line lists or page
    /// metadata entries differs from `metadata.n_pages`.
    pub fn new(metadata: DocumentMetadata, pages: Vec<Vec<ShapedLineBox>>) -> Result<Self> {
        if pages.len() != metadata.n_pages {
            return Err(MatchError::IndexFormat(format!(
                "{} page line lists for a {}-page document",
                pages.len(),
                metadata.n_pages
            )));
        }
        if metadata.pages.len() != metadata.n_pages {
            return Err(MatchError::IndexFormat(format!(
                "{} page metadata entries for a {}-page document",
                metadata.pages.len(),
                metadata.n_pages
            )));
        }

        let total = pages.iter().map(Vec::len).sum();
        let mut lines = Vec::with_capacity(total);
        let mut ranges = Vec::with_capacity(pages.len());
        for page in pages {
            let start = lines.len();
            lines.extend(page);
            ranges.push(start..lines.len());
        }

        Ok(Self {
            metadata,
            lines,
            pages: ranges,
        })
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn n_pages(&self) -> usize {
        self.pages.len()
    }

    /// Lines of one page, or `None` past the last page.
    pub fn page_lines(&self, page_id: usize) -> Option<&[ShapedLineBox]> {
        self.pages.get(page_id).map(|r| &self.lines[r.clone()])
    }

    /// Iterates `(page_id, lines)` in page order.
    pub fn pages(&self) -> impl Iterator<Item = (usize, &[ShapedLineBox])> + '_ {
        self.pages
            .iter()
            .enumerate()
            .map(|(page_id, r)| (page_id, &self.lines[r.clone()]))
    }

    /// All lines of all pages, page-major.
    pub fn concatenated(&self) -> &[ShapedLineBox] {
        &self.lines
    }

    /// Page holding the `i`-th line of [`Self::concatenated`].
    pub fn page_of_line(&self, i: usize) -> Option<usize> {
        self.pages.iter().position(|r| r.contains(&i))
    }
}
