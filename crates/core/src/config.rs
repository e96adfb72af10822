//! Analyzer configuration.
//!
//! Loaded from TOML; every key is optional:
//! ```toml
//! data_root = "/srv/docsync"
//!
//! [matching]
//! max_window = 3
//! ngram_threshold = 0.75
//! sequence_threshold = 0.70
//! min_line_length = 10
//! min_length_ratio = 0.80
//!
//! [viewport]
//! min_area_ratio = 0.9
//! max_area_ratio = 1.2
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::index::MatchParams;
use crate::viewport::ViewportParams;

/// Default data root, relative to the working directory.
pub const DEFAULT_DATA_ROOT: &str = ".data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Root of the data directory; index files live in `document_index/`.
    pub data_root: PathBuf,
    pub matching: MatchParams,
    pub viewport: ViewportParams,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from(DEFAULT_DATA_ROOT),
            matching: MatchParams::default(),
            viewport: ViewportParams::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| MatchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| match e {
            MatchError::Config(msg) => MatchError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.matching.validate()?;
        let band = &self.viewport;
        if !(band.min_area_ratio > 0.0 && band.min_area_ratio <= band.max_area_ratio) {
            return Err(MatchError::InvalidParams(format!(
                "viewport area band {}..={} is empty",
                band.min_area_ratio, band.max_area_ratio
            )));
        }
        Ok(())
    }
}
