//! Tests for the sequence analyzer and its response shape.

use std::collections::HashMap;
use std::fs;

use docsync_core::error::{MatchError, Result};
use docsync_core::model::{DocumentId, LinePositionWithPageOffset};
use docsync_core::{
    AnalyzerConfig, ContentMatch, DocumentIndex, FrameMetadata, IndexBuilder, IndexLoader,
    MatchResponse, OcrEngine, OcrResult, SequenceAnalyzer, ShapedLineBox,
};
use tempfile::TempDir;

const GRADIENT: &str = "Gradient descent fundamentals";
const COURSE: &str = "Course overview and logistics";
const REGULARIZATION: &str = "Regularization and overfitting";
const MOMENTUM: &str = "Momentum and adaptive optimizers";
const QUESTIONS: &str = "Questions from the audience welcome";

const FRAME: FrameMetadata = FrameMetadata::new(1280, 720);

fn title(text: &str) -> ShapedLineBox {
    ShapedLineBox::new(
        text,
        LinePositionWithPageOffset::new(100.0, 50.0, 500.0, 90.0),
    )
}

fn id(raw: &str) -> DocumentId {
    DocumentId::parse(raw).unwrap()
}

/// Four 16:9 slides, one title each.
fn deck() -> DocumentIndex {
    IndexBuilder::new(id("deck"))
        .page(1280, 720, vec![title(COURSE)])
        .page(1280, 720, vec![title(GRADIENT)])
        .page(1280, 720, vec![title(REGULARIZATION)])
        .page(1280, 720, vec![title(MOMENTUM)])
        .build()
        .unwrap()
}

/// Two portrait pages.
fn paper() -> DocumentIndex {
    IndexBuilder::new(id("paper"))
        .page(800, 1100, vec![title(COURSE), title(GRADIENT)])
        .page(800, 1100, vec![title(REGULARIZATION)])
        .build()
        .unwrap()
}

/// Recognizer handing back frames that were recognized upfront.
struct Replay;

impl OcrEngine for Replay {
    type Frame = OcrResult;

    fn recognize(&self, frame: &OcrResult) -> Result<OcrResult> {
        Ok(frame.clone())
    }
}

/// Recognizer that always fails.
struct Blind;

impl OcrEngine for Blind {
    type Frame = ();

    fn recognize(&self, _frame: &()) -> Result<OcrResult> {
        Err(MatchError::Ocr("camera disconnected".into()))
    }
}

struct MemoryLoader(HashMap<DocumentId, DocumentIndex>);

impl IndexLoader for MemoryLoader {
    fn load(&self, id: &DocumentId) -> Result<Option<DocumentIndex>> {
        Ok(self.0.get(id).cloned())
    }
}

fn memory() -> MemoryLoader {
    MemoryLoader(HashMap::from([(id("deck"), deck()), (id("paper"), paper())]))
}

fn frame(lines: &[&str]) -> OcrResult {
    lines.iter().map(|text| title(text)).collect::<Vec<_>>().into()
}

fn pretty(result: docsync_core::AnalyzerResult) -> String {
    serde_json::to_string_pretty(&MatchResponse::from(result)).unwrap()
}

// ============================================================================
// Dispatch on document type
// ============================================================================

#[test]
fn test_slides_are_matched_by_page() {
    let analyzer = SequenceAnalyzer::new(Replay, memory());
    let result = analyzer
        .match_frame(&id("deck"), &frame(&[GRADIENT]), FRAME)
        .unwrap();

    assert!(result.matched);
    assert!(result.document_available);
    match result.content_match {
        Some(ContentMatch::Page(ref page)) => assert_eq!(page.page_id, 1),
        ref other => panic!("expected a page match, got {other:?}"),
    }
    let viewport = result.viewport.unwrap();
    assert_eq!(viewport.normalized_bbox(), ((0.0, 0.25), (1.0, 0.5)));
}

#[test]
fn test_documents_are_matched_by_line() {
    let analyzer = SequenceAnalyzer::new(Replay, memory());
    let result = analyzer
        .match_ocr_result(&id("paper"), &frame(&[REGULARIZATION]), FRAME)
        .unwrap();

    assert!(result.matched);
    match &result.content_match {
        Some(ContentMatch::Line(line)) => {
            assert_eq!(line.index_line_index, 2);
            assert_eq!(line.matched_index_line.position.offset_top(), 1100.0);
        }
        other => panic!("expected a line match, got {other:?}"),
    }
    let ((_, top), _) = result.viewport.unwrap().absolute_bbox();
    assert_eq!(top, 1100.0);
}

#[test]
fn test_unmatched_frame_is_available_but_empty() {
    let analyzer = SequenceAnalyzer::new(Replay, memory());
    let result = analyzer
        .match_frame(&id("deck"), &frame(&[QUESTIONS]), FRAME)
        .unwrap();

    assert!(!result.matched);
    assert!(result.document_available);
    assert!(result.content_match.is_none());
    assert!(result.viewport.is_none());
}

#[test]
fn test_sparse_document_index_is_an_error() {
    let analyzer = SequenceAnalyzer::new(Replay, memory());
    let err = analyzer
        .match_frame(
            &id("paper"),
            &frame(&[COURSE, GRADIENT, REGULARIZATION, MOMENTUM]),
            FRAME,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        MatchError::InsufficientIndexData {
            index_lines: 3,
            frame_lines: 4,
            ..
        }
    ));
}

// ============================================================================
// Availability and collaborator failures
// ============================================================================

#[test]
fn test_unknown_document_is_unavailable() {
    let analyzer = SequenceAnalyzer::new(Replay, memory());
    let result = analyzer
        .match_frame(&id("missing"), &frame(&[GRADIENT]), FRAME)
        .unwrap();

    assert!(!result.matched);
    assert!(!result.document_available);
}

#[test]
fn test_recognizer_runs_only_for_available_documents() {
    let analyzer = SequenceAnalyzer::new(Blind, memory());

    let result = analyzer.match_frame(&id("missing"), &(), FRAME).unwrap();
    assert!(!result.document_available);

    let err = analyzer.match_frame(&id("deck"), &(), FRAME).unwrap_err();
    assert!(matches!(err, MatchError::Ocr(_)));
}

#[test]
fn test_unknown_document_type_fails_on_first_match() {
    let dir = TempDir::new().unwrap();
    let config = AnalyzerConfig {
        data_root: dir.path().to_path_buf(),
        ..AnalyzerConfig::default()
    };
    let analyzer = SequenceAnalyzer::from_config(Replay, &config).unwrap();
    let path = analyzer.cache().loader().index_path(&id("deck"));

    let mut file: serde_json::Value =
        serde_json::from_slice(&deck().to_json_vec().unwrap()).unwrap();
    file["metadata"]["doc_type"] = "poster".into();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, serde_json::to_vec(&file).unwrap()).unwrap();

    let err = analyzer
        .match_frame(&id("deck"), &frame(&[GRADIENT]), FRAME)
        .unwrap_err();
    assert!(matches!(err, MatchError::InvalidDocumentType(_)));

    // A fixed file is picked up by the next request.
    deck().write_to_path(&path).unwrap();
    let result = analyzer
        .match_frame(&id("deck"), &frame(&[GRADIENT]), FRAME)
        .unwrap();
    assert!(result.matched);
}

#[test]
fn test_invalidate_reloads_rewritten_index() {
    let dir = TempDir::new().unwrap();
    let config = AnalyzerConfig {
        data_root: dir.path().to_path_buf(),
        ..AnalyzerConfig::default()
    };
    let analyzer = SequenceAnalyzer::from_config(Replay, &config).unwrap();
    let path = analyzer.cache().loader().index_path(&id("deck"));
    deck().write_to_path(&path).unwrap();

    let result = analyzer
        .match_frame(&id("deck"), &frame(&[QUESTIONS]), FRAME)
        .unwrap();
    assert!(!result.matched);

    let revised = IndexBuilder::new(id("deck"))
        .page(1280, 720, vec![title(QUESTIONS)])
        .build()
        .unwrap();
    revised.write_to_path(&path).unwrap();

    // Still served from the cache until invalidated.
    let result = analyzer
        .match_frame(&id("deck"), &frame(&[QUESTIONS]), FRAME)
        .unwrap();
    assert!(!result.matched);

    assert!(analyzer.invalidate(&id("deck")));
    let result = analyzer
        .match_frame(&id("deck"), &frame(&[QUESTIONS]), FRAME)
        .unwrap();
    assert!(result.matched);
}

// ============================================================================
// Response shape
// ============================================================================

#[test]
fn test_matched_response_json() {
    let analyzer = SequenceAnalyzer::new(Replay, memory());
    let result = analyzer
        .match_frame(&id("deck"), &frame(&[GRADIENT]), FRAME)
        .unwrap();

    insta::assert_snapshot!(pretty(result), @r#"
    {
      "matched": true,
      "document_available": true,
      "matched_content_source": "Gradient descent fundamentals",
      "matched_content_target": "Gradient descent fundamentals",
      "ngram_score": 1.0,
      "sq_match_score": 1.0,
      "viewport": [
        [
          0.0,
          0.25
        ],
        [
          1.0,
          0.5
        ]
      ]
    }
    "#);
}

#[test]
fn test_unmatched_response_json() {
    let analyzer = SequenceAnalyzer::new(Replay, memory());
    let result = analyzer
        .match_frame(&id("missing"), &frame(&[GRADIENT]), FRAME)
        .unwrap();

    insta::assert_snapshot!(pretty(result), @r#"
    {
      "matched": false,
      "document_available": false,
      "matched_content_source": null,
      "matched_content_target": null,
      "ngram_score": null,
      "sq_match_score": null,
      "viewport": null
    }
    "#);
}

#[test]
fn test_response_round_trips_through_json() {
    let analyzer = SequenceAnalyzer::new(Replay, memory());
    let result = analyzer
        .match_frame(&id("paper"), &frame(&[GRADIENT]), FRAME)
        .unwrap();
    let response = MatchResponse::from(&result);

    let parsed: MatchResponse =
        serde_json::from_str(&serde_json::to_string(&response).unwrap()).unwrap();
    assert_eq!(parsed, response);
    assert_eq!(parsed.matched_content_target.as_deref(), Some(GRADIENT));
}
