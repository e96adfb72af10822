//! framematch - Match one recognized video frame against a document index
//!
//! Reads the recognizer output for a frame (a JSON array of
//! `{"words": [...], "bbox": [left, top, right, bottom]}` lines), looks the
//! frame up in the index of the given document and prints the match
//! response as JSON on stdout.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use docsync_core::error::MatchError;
use docsync_core::model::RecognizedLine;
use docsync_core::{
    AnalyzerConfig, DocumentId, FrameMetadata, MatchResponse, OcrEngine, OcrResult,
    SequenceAnalyzer,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Match a recognized frame against a document index.
#[derive(Parser, Debug)]
#[command(name = "framematch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Document (asset) id whose index is searched
    asset_id: String,

    /// JSON file holding the recognized lines of the frame
    frame: PathBuf,

    /// Frame width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Data root holding `document_index/` (overrides the configuration)
    #[arg(long = "data-root")]
    data_root: Option<PathBuf>,

    /// Print the response on a single line
    #[arg(long, action = ArgAction::SetTrue)]
    compact: bool,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,
}

/// Recognizer that replays lines recognized earlier and stored as JSON.
struct RecordedLines {
    min_line_length: usize,
}

impl OcrEngine for RecordedLines {
    type Frame = Path;

    fn recognize(&self, frame: &Path) -> docsync_core::Result<OcrResult> {
        let data = fs::read(frame)
            .map_err(|e| MatchError::Ocr(format!("{}: {e}", frame.display())))?;
        let lines: Vec<RecognizedLine> = serde_json::from_slice(&data)
            .map_err(|e| MatchError::Ocr(format!("{}: {e}", frame.display())))?;
        Ok(OcrResult::from_recognized_lines(
            lines,
            0.0,
            0.0,
            self.min_line_length,
        ))
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_path(path)
            .with_context(|| format!("failed to load configuration {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    if let Some(root) = &args.data_root {
        config.data_root = root.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let config = load_config(&args)?;
    let asset_id = DocumentId::parse(&args.asset_id)?;
    let ocr = RecordedLines {
        min_line_length: config.matching.min_line_length,
    };
    debug!(data_root = %config.data_root.display(), "configuration loaded");

    let analyzer = SequenceAnalyzer::from_config(ocr, &config)?;
    let result = analyzer
        .match_frame(&asset_id, args.frame.as_path(), FrameMetadata::new(args.width, args.height))
        .with_context(|| format!("failed to match frame {}", args.frame.display()))?;
    let response = MatchResponse::from(result);

    let mut out = BufWriter::new(io::stdout().lock());
    if args.compact {
        serde_json::to_writer(&mut out, &response)?;
    } else {
        serde_json::to_writer_pretty(&mut out, &response)?;
    }
    writeln!(out)?;
    out.flush()?;

    Ok(())
}
