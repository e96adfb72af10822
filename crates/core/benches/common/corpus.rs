//! Synthetic documents and frames for the matching benchmarks.

use docsync_core::model::{DocumentId, LinePositionWithPageOffset};
use docsync_core::{DocumentIndex, IndexBuilder, OcrResult, ShapedLineBox};

use crate::rng::XorShift64;

const WORDS: &[&str] = &[
    "gradient", "descent", "learning", "rate", "schedule", "momentum", "batch", "normalization",
    "convolution", "kernel", "stride", "padding", "attention", "transformer", "encoder",
    "decoder", "embedding", "token", "vocabulary", "loss", "entropy", "softmax", "logits",
    "regularization", "dropout", "weight", "decay", "optimizer", "adaptive", "variance",
    "bias", "estimator", "sampling", "posterior", "prior", "likelihood", "inference",
    "training", "validation", "overfitting", "generalization", "benchmark", "dataset",
];

/// A line of 4 to 8 vocabulary words.
pub fn gen_line(rng: &mut XorShift64) -> String {
    let n_words = 4 + rng.gen_index(5);
    (0..n_words)
        .map(|_| WORDS[rng.gen_index(WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

fn line_box(content: String, slot: usize, line_height: f64) -> ShapedLineBox {
    let top = 40.0 + slot as f64 * line_height * 1.5;
    ShapedLineBox::new(
        content,
        LinePositionWithPageOffset::new(60.0, top, 900.0, top + line_height),
    )
}

/// Stacked document of `n_pages` pages with `lines_per_page` random lines.
/// Page size decides the type: `(1280, 720)` builds a deck, `(800, 1100)` a
/// paper.
pub fn gen_index(
    seed: u64,
    page_size: (u32, u32),
    n_pages: usize,
    lines_per_page: usize,
) -> DocumentIndex {
    let mut rng = XorShift64::new(seed);
    let mut builder = IndexBuilder::new(DocumentId::parse("bench").expect("valid id"));
    for _ in 0..n_pages {
        let lines = (0..lines_per_page).map(|slot| line_box(gen_line(&mut rng), slot, 24.0));
        builder.push_page(page_size.0, page_size.1, lines.collect::<Vec<_>>());
    }
    builder.build().expect("synthetic index")
}

/// Replaces one character per line, the way recognition noise would.
fn perturb(rng: &mut XorShift64, text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    let i = rng.gen_index(chars.len());
    chars[i] = if chars[i] == 'l' { '1' } else { 'l' };
    chars.into_iter().collect()
}

/// Frame showing `count` consecutive lines of `page`, slightly perturbed and
/// at half the document scale.
pub fn frame_of(seed: u64, index: &DocumentIndex, page: usize, count: usize) -> OcrResult {
    let mut rng = XorShift64::new(seed);
    let lines = index.page_lines(page).unwrap_or_default();
    lines
        .iter()
        .take(count)
        .enumerate()
        .map(|(slot, line)| line_box(perturb(&mut rng, &line.content), slot, 12.0))
        .collect::<Vec<_>>()
        .into()
}

/// Frame of lines that occur nowhere in the index.
pub fn unrelated_frame(seed: u64, count: usize) -> OcrResult {
    let mut rng = XorShift64::new(seed);
    (0..count)
        .map(|slot| {
            let content = format!("{} {}", "zzqx".repeat(3), rng.next_u64());
            line_box(content, slot, 12.0)
        })
        .collect::<Vec<_>>()
        .into()
}
