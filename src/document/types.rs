//! Parsed document model

use std::collections::BTreeMap;

/// One addressable unit of document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Index parsed from the page's tag name (`p12` -> 12)
    pub index: usize,

    /// Text content of the page element
    pub text: String,
}

/// The full collection of pages parsed from one book file.
///
/// Pages are addressed by the literal index parsed from their tag name, not
/// by positional offset, so a source file with out-of-order or gapped page
/// tags still resolves "page N" the way the tag names say. Never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pages: BTreeMap<usize, Page>,
}

impl Document {
    pub(crate) fn new(pages: BTreeMap<usize, Page>) -> Self {
        Self { pages }
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Look up a page by its parsed index.
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(&index)
    }

    /// Iterate over pages in index order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }
}
