//! Similarity measures between two OCR'd text snippets.
//!
//! Every measure works over `char` sequences, so lengths and windows count
//! Unicode scalar values rather than bytes. All functions are pure and total:
//! empty inputs produce `None` or a zero score instead of dividing by zero.

use std::collections::{HashMap, HashSet};

/// Window size used by [`similarity`] for the n-gram overlap.
pub const DEFAULT_NGRAM_SIZE: usize = 2;

/// Pair of scores produced by [`similarity`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityScores {
    /// Share of the longer text's n-grams found in the shorter text.
    pub ngram: f64,
    /// Ratcliff/Obershelp matched-character ratio.
    pub sequence: f64,
}

impl SimilarityScores {
    /// Sum of both scores, used to rank competing candidates.
    pub fn total(&self) -> f64 {
        self.ngram + self.sequence
    }
}

/// Number of characters in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Returns `(len(a) / len(b), len(b) / len(a))`.
///
/// `None` when either side is empty, since neither ratio is defined then.
pub fn length_ratio(a: &str, b: &str) -> Option<(f64, f64)> {
    let (la, lb) = (char_len(a), char_len(b));
    if la == 0 || lb == 0 {
        return None;
    }
    let (la, lb) = (la as f64, lb as f64);
    Some((la / lb, lb / la))
}

/// N-gram overlap between two texts, in `[0, 1]`.
///
/// Both texts are split into overlapping windows of `n` characters. The
/// window list with more entries is the base: each of its windows counts as a
/// hit when it equals any window of the other list, and the score is hits
/// divided by the base's window count.
///
/// The measure is deliberately asymmetric. A short text fully contained in a
/// long one scores low, because the long text's windows are the denominator.
/// This matters when tuning thresholds: a frame line that shows only half of
/// an indexed line cannot pass a high n-gram threshold.
///
/// Returns 0 when either text is empty or both are shorter than `n`.
pub fn ngram_overlap(a: &str, b: &str, n: usize) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let n = n.max(1);
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut base: Vec<&[char]> = a.windows(n).collect();
    let mut other: Vec<&[char]> = b.windows(n).collect();
    if other.len() > base.len() {
        std::mem::swap(&mut base, &mut other);
    }
    if base.is_empty() {
        return 0.0;
    }

    let lookup: HashSet<&[char]> = other.into_iter().collect();
    let hits = base.iter().filter(|w| lookup.contains(*w)).count();
    hits as f64 / base.len() as f64
}

/// A run of equal characters: `a[a_start..a_start + len] == b[b_start..b_start + len]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub len: usize,
}

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    b_positions: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b_positions.entry(*c).or_default().push(j);
        }
        Self { a, b, b_positions }
    }

    /// Longest common run inside `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Ties go to the run starting earliest in `a`, then earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchingBlock {
        let mut best = MatchingBlock {
            a_start: alo,
            b_start: blo,
            len: 0,
        };
        // run_len[j] = length of the run ending at a[i - 1] and b[j]
        let mut run_len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_run_len = HashMap::new();
            if let Some(positions) = self.b_positions.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = if j > 0 {
                        run_len.get(&(j - 1)).copied().unwrap_or(0)
                    } else {
                        0
                    };
                    let k = prev + 1;
                    next_run_len.insert(j, k);
                    if k > best.len {
                        best = MatchingBlock {
                            a_start: i + 1 - k,
                            b_start: j + 1 - k,
                            len: k,
                        };
                    }
                }
            }
            run_len = next_run_len;
        }

        best
    }

    fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let mut blocks = Vec::new();
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let m = self.longest_match(alo, ahi, blo, bhi);
            if m.len == 0 {
                continue;
            }
            if alo < m.a_start && blo < m.b_start {
                pending.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.len < ahi && m.b_start + m.len < bhi {
                pending.push((m.a_start + m.len, ahi, m.b_start + m.len, bhi));
            }
            blocks.push(m);
        }

        blocks.sort_unstable();
        blocks
    }
}

/// Matching blocks of `a` and `b` in ascending order.
///
/// Finds the longest common substring, then recurses on the parts to its
/// left and to its right.
pub fn matching_blocks(a: &str, b: &str) -> Vec<MatchingBlock> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    BlockMatcher::new(&a, &b).matching_blocks()
}

/// `2 * M / T` where `M` is the total length of the matching blocks and `T`
/// the combined length of both texts. In `[0, 1]`; 0 when either is empty.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let matched: usize = BlockMatcher::new(&a, &b)
        .matching_blocks()
        .iter()
        .map(|m| m.len)
        .sum();
    2.0 * matched as f64 / (a.len() + b.len()) as f64
}

/// Both scores with the default bigram window.
pub fn similarity(a: &str, b: &str) -> SimilarityScores {
    similarity_with_ngram(a, b, DEFAULT_NGRAM_SIZE)
}

/// Both scores with an explicit n-gram window.
pub fn similarity_with_ngram(a: &str, b: &str, n: usize) -> SimilarityScores {
    SimilarityScores {
        ngram: ngram_overlap(a, b, n),
        sequence: sequence_ratio(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_match_prefers_earliest_in_a() {
        let a: Vec<char> = "abxab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        let m = BlockMatcher::new(&a, &b).longest_match(0, a.len(), 0, b.len());
        assert_eq!(
            m,
            MatchingBlock {
                a_start: 0,
                b_start: 0,
                len: 2
            }
        );
    }

    #[test]
    fn longest_match_respects_bounds() {
        let a: Vec<char> = "abcdef".chars().collect();
        let b: Vec<char> = "abcdef".chars().collect();
        let m = BlockMatcher::new(&a, &b).longest_match(2, 4, 0, 6);
        assert_eq!(m.a_start, 2);
        assert_eq!(m.b_start, 2);
        assert_eq!(m.len, 2);
    }

    #[test]
    fn ngram_shorter_than_window_scores_zero() {
        assert_eq!(ngram_overlap("a", "a", 2), 0.0);
    }

    #[test]
    fn zero_window_is_treated_as_unigram() {
        assert_eq!(ngram_overlap("ab", "ba", 0), 1.0);
    }
}
