//! Text utilities: similarity scoring and content filtering.

pub mod sanitize;
pub mod similarity;

pub use sanitize::retain_printable_ascii;
pub use similarity::{
    DEFAULT_NGRAM_SIZE, MatchingBlock, SimilarityScores, char_len, length_ratio, matching_blocks,
    ngram_overlap, sequence_ratio, similarity, similarity_with_ngram,
};
