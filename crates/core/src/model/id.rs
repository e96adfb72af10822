use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Identifier of an indexed document.
///
/// Ids name files on disk, so only ASCII alphanumerics, `-`, `_` and `.`
/// are accepted, and `.`/`..` are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    pub fn parse(raw: &str) -> Result<Self> {
        let valid = !raw.is_empty()
            && raw != "."
            && raw != ".."
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(MatchError::InvalidDocumentId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentId {
    type Error = MatchError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_file_safe_ids() {
        assert_eq!(DocumentId::parse("CHI2021-talk_v2.1").unwrap().as_str(), "CHI2021-talk_v2.1");
    }

    #[test]
    fn rejects_path_like_ids() {
        for raw in ["", ".", "..", "../secret", "a/b", "a b", "caf\u{e9}"] {
            assert!(
                matches!(DocumentId::parse(raw), Err(MatchError::InvalidDocumentId(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
