//! Line-level search for continuously read documents.

use tracing::{debug, warn};

use super::{DocumentIndex, FoundRelatedLine, MatchParams, score_line_pair};
use crate::error::{MatchError, Result};
use crate::model::{OcrResult, ShapedLineBox};
use crate::text::SimilarityScores;

/// Scores a frame window against an index window of the same length, line
/// by line. Returns the last pair's scores when every pair matches.
fn match_window(
    frame_window: &[ShapedLineBox],
    index_window: &[ShapedLineBox],
    params: &MatchParams,
) -> Option<SimilarityScores> {
    let mut last = None;
    for (frame_line, index_line) in frame_window.iter().zip(index_window) {
        last = Some(score_line_pair(
            &index_line.content,
            &frame_line.content,
            params,
        )?);
    }
    last
}

impl DocumentIndex {
    /// Finds the first run of consecutive frame lines that matches a run of
    /// consecutive index lines.
    ///
    /// Window sizes go from `min(frame lines, max_window)` down to 1, so
    /// multi-line agreement is preferred. For each size, frame windows are
    /// scanned by ascending start, and for each of those index windows by
    /// ascending start; the first window pair where every line pair passes
    /// [`score_line_pair`] wins. The reported boxes and scores belong to the
    /// last line pair of that window.
    ///
    /// Returns `Ok(None)` when nothing matches or the frame has no lines.
    ///
    /// # Errors
    /// `InsufficientIndexData` when the flattened index has fewer lines than
    /// the frame or than the window size; such an index can never produce a
    /// reliable match and should be regenerated.
    pub fn search_most_matching_line(
        &self,
        frame: &OcrResult,
        params: &MatchParams,
    ) -> Result<Option<FoundRelatedLine>> {
        let frame_lines = frame.lines();
        let index_lines = self.concatenated();
        let max_window = frame_lines.len().min(params.max_window);

        if index_lines.len() < max_window || index_lines.len() < frame_lines.len() {
            return Err(MatchError::InsufficientIndexData {
                index_lines: index_lines.len(),
                frame_lines: frame_lines.len(),
                window: max_window,
            });
        }

        if frame_lines.is_empty() {
            warn!(
                asset_id = %self.metadata().asset_id,
                "no text lines detected in frame"
            );
            return Ok(None);
        }

        for window in (1..=max_window).rev() {
            for (frame_start, frame_window) in frame_lines.windows(window).enumerate() {
                for (index_start, index_window) in index_lines.windows(window).enumerate() {
                    let Some(scores) = match_window(frame_window, index_window, params) else {
                        continue;
                    };

                    debug!(
                        window,
                        frame_start,
                        index_start,
                        ngram = scores.ngram,
                        sequence = scores.sequence,
                        "line window matched"
                    );
                    return Ok(Some(FoundRelatedLine {
                        frame_line_index: frame_start,
                        index_line_index: index_start,
                        matched_index_line: index_window[window - 1].clone(),
                        matched_frame_line: frame_window[window - 1].clone(),
                        ngram_score: scores.ngram,
                        sq_match_score: scores.sequence,
                    }));
                }
            }
        }

        debug!(asset_id = %self.metadata().asset_id, "no line window matched");
        Ok(None)
    }
}
