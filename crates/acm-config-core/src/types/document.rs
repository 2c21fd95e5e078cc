//! Per-key fetch result

use super::property::PropertyMap;

/// One remote document after fetch and decode
///
/// `content` is `None` when the document was missing or could not be
/// fetched/decoded; `Some` with an empty map means it was found but empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedDocument {
    pub key: String,
    pub content: Option<PropertyMap>,
}

impl FetchedDocument {
    pub fn found(key: impl Into<String>, content: PropertyMap) -> Self {
        Self {
            key: key.into(),
            content: Some(content),
        }
    }

    pub fn missing(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            content: None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.content.is_none()
    }

    /// Merge this document into `target`, overwriting conflicting keys
    pub fn merge_into(self, target: &mut PropertyMap) {
        if let Some(content) = self.content {
            target.extend(content);
        }
    }
}
