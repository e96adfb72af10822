//! indexdump - Inspect a persisted document index
//!
//! Prints the document geometry and per-page line counts of an
//! `<id>.index.json` file, and optionally the lines of selected pages.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use docsync_core::DocumentIndex;
use docsync_core::model::HasBBox;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Output format of the dump.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human readable summary (default)
    #[default]
    Text,
    /// JSON summary
    Json,
}

/// Inspect a persisted document index.
#[derive(Parser, Debug)]
#[command(name = "indexdump")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to an `<id>.index.json` file
    index: PathBuf,

    /// Also list the lines of these pages (0-indexed, repeatable)
    #[arg(short = 'p', long = "page")]
    pages: Vec<usize>,

    /// Output format
    #[arg(short = 't', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

#[derive(Debug, Serialize)]
struct PageSummary<'a> {
    page_id: usize,
    width: u32,
    height: u32,
    offset_top: u32,
    n_lines: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<Vec<LineSummary<'a>>>,
}

#[derive(Debug, Serialize)]
struct LineSummary<'a> {
    content: &'a str,
    /// `(left, top, right, bottom)` in document pixels.
    rect: (f64, f64, f64, f64),
}

#[derive(Debug, Serialize)]
struct IndexSummary<'a> {
    asset_id: &'a str,
    doc_type: &'a str,
    width: u32,
    height: u32,
    n_pages: usize,
    n_lines: usize,
    pages: Vec<PageSummary<'a>>,
}

fn summarize<'a>(index: &'a DocumentIndex, listed: &[usize]) -> IndexSummary<'a> {
    let meta = index.metadata();
    let pages = index
        .pages()
        .map(|(page_id, lines)| {
            // Metadata and line lists have equal lengths once loaded.
            let page = meta.page(page_id).copied().unwrap_or_default();
            let lines_out = listed.contains(&page_id).then(|| {
                lines
                    .iter()
                    .map(|line| LineSummary {
                        content: &line.content,
                        rect: line.position.document_rect(),
                    })
                    .collect()
            });
            PageSummary {
                page_id,
                width: page.width,
                height: page.height,
                offset_top: page.offset_top,
                n_lines: lines.len(),
                lines: lines_out,
            }
        })
        .collect();

    IndexSummary {
        asset_id: meta.asset_id.as_str(),
        doc_type: meta.doc_type.as_str(),
        width: meta.width,
        height: meta.height,
        n_pages: meta.n_pages,
        n_lines: index.concatenated().len(),
        pages,
    }
}

fn write_text<W: Write>(out: &mut W, summary: &IndexSummary<'_>) -> io::Result<()> {
    writeln!(out, "asset_id: {}", summary.asset_id)?;
    writeln!(out, "doc_type: {}", summary.doc_type)?;
    writeln!(out, "size:     {}x{}", summary.width, summary.height)?;
    writeln!(out, "pages:    {}", summary.n_pages)?;
    writeln!(out, "lines:    {}", summary.n_lines)?;
    for page in &summary.pages {
        writeln!(
            out,
            "page {:>4}  {}x{} @ {:<8} {} lines",
            page.page_id, page.width, page.height, page.offset_top, page.n_lines
        )?;
        for line in page.lines.iter().flatten() {
            let (left, top, right, bottom) = line.rect;
            writeln!(
                out,
                "    [{left:.0}, {top:.0}, {right:.0}, {bottom:.0}] {}",
                line.content
            )?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();

    let index = DocumentIndex::from_path(&args.index)?;
    if let Some(&page) = args.pages.iter().find(|&&p| p >= index.n_pages()) {
        bail!(
            "page {page} out of range, {} has {} pages",
            args.index.display(),
            index.n_pages()
        );
    }

    let summary = summarize(&index, &args.pages);
    let mut out = BufWriter::new(io::stdout().lock());
    match args.format {
        OutputFormat::Text => write_text(&mut out, &summary)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &summary)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    Ok(())
}
