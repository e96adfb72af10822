//! Serializable summary of an analysis, as handed to viewer clients.

use serde::{Deserialize, Serialize};

use super::AnalyzerResult;

/// `((left, top), (right, bottom))`, each coordinate in `[0, 1]` relative to
/// the document size when the viewport lies inside the document.
pub type NormalizedBBox = ((f64, f64), (f64, f64));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matched: bool,
    pub document_available: bool,
    /// Text of the matched frame line.
    pub matched_content_source: Option<String>,
    /// Text of the matched index line.
    pub matched_content_target: Option<String>,
    pub ngram_score: Option<f64>,
    pub sq_match_score: Option<f64>,
    pub viewport: Option<NormalizedBBox>,
}

impl From<&AnalyzerResult> for MatchResponse {
    fn from(result: &AnalyzerResult) -> Self {
        let found = result.content_match.as_ref();
        Self {
            matched: result.matched,
            document_available: result.document_available,
            matched_content_source: found.map(|m| m.matched_frame_line().content.clone()),
            matched_content_target: found.map(|m| m.matched_index_line().content.clone()),
            ngram_score: found.map(|m| m.ngram_score()),
            sq_match_score: found.map(|m| m.sq_match_score()),
            viewport: result.viewport.as_ref().map(|v| v.normalized_bbox()),
        }
    }
}

impl From<AnalyzerResult> for MatchResponse {
    fn from(result: AnalyzerResult) -> Self {
        Self::from(&result)
    }
}
