//! Reading position value type

use serde::{Deserialize, Serialize};

/// Where a reader left off: a document identifier and a zero-based page
/// index. Only the engine's navigation operations mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPosition {
    /// Identifier of the document the position belongs to
    pub document_id: String,

    /// Zero-based page index within that document
    pub page_index: usize,
}

impl ReadingPosition {
    /// Create a position.
    pub fn new(document_id: impl Into<String>, page_index: usize) -> Self {
        Self {
            document_id: document_id.into(),
            page_index,
        }
    }

    /// Highest reachable page index for a document, keeping `margin`
    /// trailing pages out of the navigable range.
    pub fn ceiling(page_count: usize, margin: usize) -> usize {
        page_count.saturating_sub(1).saturating_sub(margin)
    }

    /// Clamp the page index into the navigable range of a document.
    pub fn clamped_to(mut self, page_count: usize, margin: usize) -> Self {
        self.page_index = self.page_index.min(Self::ceiling(page_count, margin));
        self
    }
}
