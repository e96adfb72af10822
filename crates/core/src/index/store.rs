//! Reading and writing persisted index files.
//!
//! File shape:
//! ```json
//! {
//!   "index_data": [[{"content": "...", "position": [[l, t], [r, b], [offL, offT]]}]],
//!   "metadata": {
//!     "asset_id": "...", "width": 1280, "height": 7200, "n_pages": 10,
//!     "doc_type": "slide", "metadata_pages": [[1280, 720, 0], ...]
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::DocumentIndex;
use crate::error::{MatchError, Result};
use crate::model::{DocumentId, DocumentMetadata, PageMetadata, ShapedLineBox};

#[derive(Debug, Serialize, Deserialize)]
struct IndexFile {
    index_data: Vec<Vec<ShapedLineBox>>,
    metadata: MetadataFile,
}

#[derive(Debug, Serialize, Deserialize)]
struct MetadataFile {
    asset_id: String,
    width: u32,
    height: u32,
    n_pages: usize,
    doc_type: String,
    /// `(width, height, offset_top)` per page.
    metadata_pages: Vec<(u32, u32, u32)>,
}

impl TryFrom<MetadataFile> for DocumentMetadata {
    type Error = MatchError;

    fn try_from(raw: MetadataFile) -> Result<Self> {
        let asset_id = DocumentId::parse(&raw.asset_id)?;
        let doc_type = raw.doc_type.parse()?;
        let pages = raw
            .metadata_pages
            .into_iter()
            .enumerate()
            .map(|(page_id, (width, height, offset_top))| PageMetadata {
                width,
                height,
                offset_top,
                page_id,
            })
            .collect();

        Ok(Self {
            asset_id,
            width: raw.width,
            height: raw.height,
            n_pages: raw.n_pages,
            doc_type,
            pages,
        })
    }
}

impl From<&DocumentMetadata> for MetadataFile {
    fn from(meta: &DocumentMetadata) -> Self {
        Self {
            asset_id: meta.asset_id.to_string(),
            width: meta.width,
            height: meta.height,
            n_pages: meta.n_pages,
            doc_type: meta.doc_type.as_str().to_string(),
            metadata_pages: meta
                .pages
                .iter()
                .map(|p| (p.width, p.height, p.offset_top))
                .collect(),
        }
    }
}

impl DocumentIndex {
    /// Parses and validates an index file.
    ///
    /// # Errors
    /// `Json` for malformed JSON, `InvalidDocumentType` / `InvalidDocumentId`
    /// for unrecognized metadata values, and `IndexFormat` when the page
    /// counts disagree or the first page holds no lines.
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let file: IndexFile = serde_json::from_slice(data)?;
        let metadata = DocumentMetadata::try_from(file.metadata)?;

        if metadata.n_pages == 0 {
            return Err(MatchError::IndexFormat("index has no pages".to_string()));
        }
        if file.index_data.first().is_none_or(Vec::is_empty) {
            return Err(MatchError::IndexFormat(
                "first page of the index holds no lines".to_string(),
            ));
        }

        Self::new(metadata, file.index_data)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_json_slice(&data)
    }

    pub fn to_json_vec(&self) -> Result<Vec<u8>> {
        let file = IndexFile {
            index_data: self.pages().map(|(_, lines)| lines.to_vec()).collect(),
            metadata: MetadataFile::from(self.metadata()),
        };
        Ok(serde_json::to_vec(&file)?)
    }

    /// Writes the index, creating parent directories as needed.
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_vec()?)?;
        Ok(())
    }
}
