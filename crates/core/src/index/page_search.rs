//! Page-level search for slide decks.
//!
//! Slides tend to reveal their content top to bottom and keep their title
//! on screen, so the frame is read in order and each informative line
//! narrows the set of pages that can still be showing. Early lines, which
//! are usually titles, carry the most weight.

use std::collections::BTreeSet;

use tracing::debug;

use super::{DocumentIndex, FoundRelatedPage, MatchParams, score_line_pair};
use crate::model::{OcrResult, ShapedLineBox};
use crate::text::char_len;

/// Pages scanned for the next frame line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePool {
    /// No candidates yet: every page is scanned.
    All,
    /// Only the pages of the current candidates are scanned.
    Only(BTreeSet<usize>),
}

impl PagePool {
    pub fn contains(&self, page_id: usize) -> bool {
        match self {
            Self::All => true,
            Self::Only(pages) => pages.contains(&page_id),
        }
    }
}

/// Outcome of scanning one frame line against the active pool.
#[derive(Debug, Clone, PartialEq)]
pub enum Narrowing {
    /// A single (page, line) pair matched; the search can stop.
    ExactlyOne(FoundRelatedPage),
    /// Nothing matched this frame line.
    None,
    /// Several pairs matched; they become the new candidates.
    Multiple(Vec<FoundRelatedPage>),
}

impl Narrowing {
    pub fn classify(found: Vec<FoundRelatedPage>) -> Self {
        match <[FoundRelatedPage; 1]>::try_from(found) {
            Ok([one]) => Self::ExactlyOne(one),
            Err(found) if found.is_empty() => Self::None,
            Err(found) => Self::Multiple(found),
        }
    }
}

/// Incremental state of a page search.
///
/// Feed frame lines in order with [`PageNarrowing::feed`]; when it returns a
/// page the search is over. Otherwise call [`PageNarrowing::finish`] once the
/// frame is exhausted.
///
/// A frame line that matches nothing leaves the candidates untouched. A
/// stale multi-page candidate set is therefore carried to the end when no
/// later line manages to split it, and the final pick falls back to scores.
#[derive(Debug)]
pub struct PageNarrowing<'a> {
    index: &'a DocumentIndex,
    params: &'a MatchParams,
    candidates: Vec<FoundRelatedPage>,
}

impl<'a> PageNarrowing<'a> {
    pub fn new(index: &'a DocumentIndex, params: &'a MatchParams) -> Self {
        Self {
            index,
            params,
            candidates: Vec::new(),
        }
    }

    pub fn candidates(&self) -> &[FoundRelatedPage] {
        &self.candidates
    }

    /// Pages the next frame line will be compared against.
    pub fn active_pool(&self) -> PagePool {
        if self.candidates.is_empty() {
            PagePool::All
        } else {
            PagePool::Only(self.candidates.iter().map(|c| c.page_id).collect())
        }
    }

    /// Every (page, index line) pair in `pool` that matches `frame_line`, in
    /// page order then line order.
    pub fn related_pages(
        &self,
        frame_line: &ShapedLineBox,
        pool: &PagePool,
    ) -> Vec<FoundRelatedPage> {
        let mut found = Vec::new();
        for (page_id, lines) in self.index.pages() {
            if !pool.contains(page_id) {
                continue;
            }
            for index_line in lines {
                let Some(scores) =
                    score_line_pair(&index_line.content, &frame_line.content, self.params)
                else {
                    continue;
                };
                found.push(FoundRelatedPage {
                    page_id,
                    matched_index_line: index_line.clone(),
                    matched_frame_line: frame_line.clone(),
                    ngram_score: scores.ngram,
                    sq_match_score: scores.sequence,
                });
            }
        }
        found
    }

    /// Consumes one frame line. Returns the page when exactly one pair
    /// matched it.
    pub fn feed(&mut self, frame_line: &ShapedLineBox) -> Option<FoundRelatedPage> {
        if char_len(&frame_line.content) < self.params.min_line_length {
            return None;
        }

        let pool = self.active_pool();
        let found = self.related_pages(frame_line, &pool);

        match Narrowing::classify(found) {
            Narrowing::ExactlyOne(page) => {
                debug!(page_id = page.page_id, "page narrowed to a single match");
                Some(page)
            }
            Narrowing::None => {
                debug!(
                    kept = self.candidates.len(),
                    "frame line matched no page, keeping candidates"
                );
                None
            }
            Narrowing::Multiple(found) => {
                debug!(candidates = found.len(), "frame line matched several pages");
                self.candidates = found;
                None
            }
        }
    }

    /// Best remaining candidate by `ngram + sequence` score; the earliest
    /// candidate wins ties.
    pub fn finish(self) -> Option<FoundRelatedPage> {
        self.candidates.into_iter().reduce(|best, candidate| {
            if candidate.total_score() > best.total_score() {
                candidate
            } else {
                best
            }
        })
    }
}

impl DocumentIndex {
    /// Finds the page a slide frame is most likely showing.
    ///
    /// Returns `None` when no frame line ever matched any page.
    pub fn search_most_matching_page(
        &self,
        frame: &OcrResult,
        params: &MatchParams,
    ) -> Option<FoundRelatedPage> {
        let mut narrowing = PageNarrowing::new(self, params);
        for frame_line in frame.lines() {
            if let Some(page) = narrowing.feed(frame_line) {
                return Some(page);
            }
        }
        narrowing.finish()
    }
}
