//! Matching thresholds.
//!
//! Contains MatchParams for controlling how strictly frame lines must agree
//! with indexed lines before a match is declared.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::model::DEFAULT_MIN_LINE_LENGTH;
use crate::text::DEFAULT_NGRAM_SIZE;

/// Parameters for the line and page searches.
///
/// A frame line and an index line form a matching pair only when all of the
/// length, length-ratio and similarity thresholds hold at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchParams {
    /// Largest number of consecutive lines compared as one window by the
    /// line search. Longer windows are tried first.
    pub max_window: usize,

    /// Minimum n-gram overlap for a pair to match.
    pub ngram_threshold: f64,

    /// Minimum matched-character ratio for a pair to match.
    pub sequence_threshold: f64,

    /// Index lines shorter than this (in characters) never match. The page
    /// search also skips frame lines shorter than this.
    pub min_line_length: usize,

    /// Both `len(index) / len(frame)` and `len(frame) / len(index)` must be
    /// at least this.
    pub min_length_ratio: f64,

    /// Window size of the n-gram overlap.
    pub ngram_size: usize,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            max_window: 3,
            ngram_threshold: 0.75,
            sequence_threshold: 0.70,
            min_line_length: DEFAULT_MIN_LINE_LENGTH,
            min_length_ratio: 0.80,
            ngram_size: DEFAULT_NGRAM_SIZE,
        }
    }
}

impl MatchParams {
    /// Checks that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_window == 0 {
            return Err(MatchError::InvalidParams(
                "max_window must be at least 1".to_string(),
            ));
        }
        if self.ngram_size == 0 {
            return Err(MatchError::InvalidParams(
                "ngram_size must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("ngram_threshold", self.ngram_threshold),
            ("sequence_threshold", self.sequence_threshold),
            ("min_length_ratio", self.min_length_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MatchError::InvalidParams(format!(
                    "{name} must be between 0 and 1, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(MatchParams::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let params = MatchParams {
            sequence_threshold: 1.5,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("sequence_threshold"));
    }

    #[test]
    fn zero_window_is_rejected() {
        let params = MatchParams {
            max_window: 0,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(MatchError::InvalidParams(_))));
    }
}
