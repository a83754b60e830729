//! Paged XML parsing with a per-path cache

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lru::LruCache;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::error::{DocumentError, Result};
use super::types::{Document, Page};

/// Loads paged XML documents and caches parse results by path.
///
/// The cache is a performance layer only: repeated loads of an unchanged
/// file yield the same document content whether or not they hit it.
pub struct DocumentLoader {
    cache: LruCache<PathBuf, Arc<Document>>,
}

impl DocumentLoader {
    /// Create a loader keeping up to `cache_size` parsed documents.
    pub fn new(cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Load and parse the document at `path`.
    ///
    /// A missing file is [`DocumentError::NotFound`], ill-formed XML is
    /// [`DocumentError::Malformed`], and a well-formed file without any
    /// `p<integer>` element is [`DocumentError::Empty`].
    pub fn load(&mut self, path: &Path) -> Result<Arc<Document>> {
        if let Some(document) = self.cache.get(path) {
            tracing::debug!(path = %path.display(), "document cache hit");
            return Ok(Arc::clone(document));
        }

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DocumentError::NotFound(path.to_path_buf()),
            _ => DocumentError::Io(e),
        })?;

        let pages = parse_pages(&content)?;
        if pages.is_empty() {
            return Err(DocumentError::Empty(path.to_path_buf()));
        }

        let document = Arc::new(Document::new(pages));
        tracing::debug!(
            path = %path.display(),
            pages = document.page_count(),
            "parsed document"
        );
        self.cache.put(path.to_path_buf(), Arc::clone(&document));
        Ok(document)
    }
}

/// Scan the top-level children of the root element and collect every
/// `p<integer>` element as one page, keyed by its parsed index.
///
/// Text is gathered from the whole subtree of a page element, so markup
/// nested inside a page does not lose content. On a duplicate index the
/// first occurrence wins. All other elements are ignored.
fn parse_pages(content: &str) -> Result<BTreeMap<usize, Page>> {
    let mut reader = Reader::from_str(content);
    let mut pages = BTreeMap::new();

    // Depth 1 is the root element, depth 2 its direct children.
    let mut depth = 0usize;
    let mut current: Option<(usize, String)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                if depth == 2 && current.is_none() {
                    if let Some(index) = page_index_from_tag(e.name().as_ref()) {
                        current = Some((index, String::new()));
                    }
                }
            }
            Event::Empty(e) => {
                // Self-closing page tag: a present but empty page.
                if depth == 1 {
                    if let Some(index) = page_index_from_tag(e.name().as_ref()) {
                        insert_page(&mut pages, index, String::new());
                    }
                }
            }
            Event::Text(t) => {
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) => {
                // CDATA is literal text, never entity-escaped.
                if let Some((_, text)) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some((index, text)) = current.take() {
                        insert_page(&mut pages, index, text.trim().to_string());
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn insert_page(pages: &mut BTreeMap<usize, Page>, index: usize, text: String) {
    if let Entry::Vacant(slot) = pages.entry(index) {
        slot.insert(Page { index, text });
    }
}

/// Parse a tag name of the form `p<integer>`; anything else is not a page.
fn page_index_from_tag(name: &[u8]) -> Option<usize> {
    let digits = name.strip_prefix(b"p")?;
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(digits).ok()?.parse().ok()
}
