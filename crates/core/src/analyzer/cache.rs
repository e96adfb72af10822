//! Process-wide cache of loaded document indexes.
//!
//! Lifecycle: an index is loaded the first time its id is requested, then
//! shared read-only by every caller until [`IndexCache::invalidate`] drops
//! it. There is no other eviction.
//!
//! Concurrent requests for the same uncached id run the loader once: the
//! first caller loads while the others block on the same slot and then
//! receive the shared instance. Different ids load independently.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::error::{MatchError, Result};
use crate::index::DocumentIndex;
use crate::model::DocumentId;

/// Directory, under the data root, holding index files.
pub const INDEX_DIR: &str = "document_index";

/// Source of document indexes.
pub trait IndexLoader: Send + Sync {
    /// Loads the index of `id`, or `Ok(None)` when none exists.
    fn load(&self, id: &DocumentId) -> Result<Option<DocumentIndex>>;
}

/// Loads `<data_root>/document_index/<id>.index.json`.
#[derive(Debug, Clone)]
pub struct FsIndexLoader {
    data_root: PathBuf,
}

impl FsIndexLoader {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    pub fn index_path(&self, id: &DocumentId) -> PathBuf {
        self.data_root
            .join(INDEX_DIR)
            .join(format!("{id}.index.json"))
    }
}

impl IndexLoader for FsIndexLoader {
    fn load(&self, id: &DocumentId) -> Result<Option<DocumentIndex>> {
        let path = self.index_path(id);
        if !path.is_file() {
            warn!(asset_id = %id, path = %path.display(), "document index file does not exist");
            return Ok(None);
        }
        DocumentIndex::from_path(&path).map(Some)
    }
}

impl<L: IndexLoader + ?Sized> IndexLoader for Arc<L> {
    fn load(&self, id: &DocumentId) -> Result<Option<DocumentIndex>> {
        (**self).load(id)
    }
}

type Slot = Arc<OnceCell<Arc<DocumentIndex>>>;

enum LoadFailure {
    Missing,
    Failed(MatchError),
}

/// Cache of [`DocumentIndex`] instances keyed by document id.
pub struct IndexCache<L> {
    loader: L,
    slots: Mutex<HashMap<DocumentId, Slot>>,
}

impl<L: IndexLoader> IndexCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    fn slot(&self, id: &DocumentId) -> Slot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(id.clone()).or_default().clone()
    }

    /// Returns the cached index, loading it on first use.
    ///
    /// `Ok(None)` means the document has no index. Missing indexes and load
    /// errors are not cached, so a later call retries the loader.
    pub fn get(&self, id: &DocumentId) -> Result<Option<Arc<DocumentIndex>>> {
        let slot = self.slot(id);
        let loaded = slot.get_or_try_init(|| match self.loader.load(id) {
            Ok(Some(index)) => {
                info!(
                    asset_id = %id,
                    n_pages = index.n_pages(),
                    lines = index.concatenated().len(),
                    doc_type = %index.metadata().doc_type,
                    "document index loaded"
                );
                Ok(Arc::new(index))
            }
            Ok(None) => Err(LoadFailure::Missing),
            Err(e) => Err(LoadFailure::Failed(e)),
        });

        match loaded {
            Ok(index) => Ok(Some(Arc::clone(index))),
            Err(LoadFailure::Missing) => Ok(None),
            Err(LoadFailure::Failed(e)) => Err(e),
        }
    }

    /// Drops the cached index of `id`. Returns whether an entry existed.
    pub fn invalidate(&self, id: &DocumentId) -> bool {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.remove(id).is_some()
    }

    /// Number of ids holding a loaded index.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_cached(&self, id: &DocumentId) -> bool {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(id).is_some_and(|slot| slot.get().is_some())
    }
}
