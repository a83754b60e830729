//! Pagination engine state machine
//!
//! Owns the active document's page sequence and current position, exposes
//! navigation and progress queries, and writes the position through to the
//! store on every change. Driven entirely by discrete synchronous calls
//! from the UI layer; no background work, no interior locking.

use std::sync::Arc;

use thiserror::Error;

use crate::config::EngineConfig;
use crate::document::{Document, DocumentError, DocumentLoader};
use crate::library::Library;
use crate::position::ReadingPosition;
use crate::store::{PositionStore, StoreError};

/// Query placeholder before any document is selected.
pub const NO_DOCUMENT_TEXT: &str = "No document selected.";

/// Query placeholder when the selected document failed to load.
pub const LOAD_FAILED_TEXT: &str = "Unable to load document.";

/// Query placeholder for a page index the document does not contain.
pub const MISSING_PAGE_TEXT: &str = "End of chapter.";

/// Errors from selecting a document.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The id is not in the catalog
    #[error("Unknown book: {0}")]
    UnknownBook(String),

    /// The catalog entry exists but its document failed to load
    #[error("Failed to load document: {0}")]
    Load(#[from] DocumentError),
}

enum EngineState {
    Unloaded,
    Loaded {
        document: Arc<Document>,
        position: ReadingPosition,
        title: String,
    },
    LoadFailed {
        book_id: String,
        title: String,
    },
}

/// Orchestrates loader, store and catalog for one reading session.
///
/// Navigation clamps at the range boundaries instead of erroring, and every
/// position change is persisted before the call returns. A persistence
/// failure never blocks the page change; it is logged and latched for
/// [`PaginationEngine::take_store_warning`].
pub struct PaginationEngine {
    library: Library,
    loader: DocumentLoader,
    store: Box<dyn PositionStore>,
    config: EngineConfig,
    state: EngineState,
    store_warning: Option<StoreError>,
}

impl PaginationEngine {
    /// Create an engine over a catalog and a position store.
    pub fn new(library: Library, store: Box<dyn PositionStore>, config: EngineConfig) -> Self {
        Self {
            library,
            loader: DocumentLoader::new(config.document_cache_size),
            store,
            config,
            state: EngineState::Unloaded,
            store_warning: None,
        }
    }

    /// The catalog this engine resolves ids through.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Select a book by id, restoring its saved position (page 0 when no
    /// record exists, clamped into the document's navigable range).
    ///
    /// On failure the engine transitions to a load-failed state in which
    /// the queries keep answering with placeholders; the previous book's
    /// position was already persisted by its own navigation calls.
    pub fn select_document(&mut self, id: &str) -> Result<(), EngineError> {
        let Some(book) = self.library.get(id).cloned() else {
            self.state = EngineState::LoadFailed {
                book_id: id.to_string(),
                title: id.to_string(),
            };
            return Err(EngineError::UnknownBook(id.to_string()));
        };

        let document = match self.loader.load(&book.path) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(book_id = %id, error = %err, "document load failed");
                self.state = EngineState::LoadFailed {
                    book_id: id.to_string(),
                    title: book.title,
                };
                return Err(err.into());
            }
        };

        let saved = match self.store.get(id) {
            Ok(saved) => saved,
            Err(err) => {
                tracing::warn!(book_id = %id, error = %err, "could not read saved position");
                self.store_warning = Some(err);
                None
            }
        };

        let page_count = document.page_count();
        let margin = self.config.trailing_margin;
        let (position, dirty) = match saved {
            Some(saved) => {
                let saved_index = saved.page_index;
                let clamped = saved.clamped_to(page_count, margin);
                let dirty = clamped.page_index != saved_index;
                (clamped, dirty)
            }
            None => (ReadingPosition::new(id, 0).clamped_to(page_count, margin), true),
        };
        if dirty {
            self.persist(&position);
        }

        tracing::info!(
            book_id = %id,
            page = position.page_index,
            pages = page_count,
            "document selected"
        );
        self.state = EngineState::Loaded {
            document,
            position,
            title: book.title,
        };
        Ok(())
    }

    /// Advance one page, clamped below the trailing margin.
    ///
    /// Returns whether the position changed; at the ceiling this is a no-op
    /// and issues no persistence write.
    pub fn next(&mut self) -> bool {
        let margin = self.config.trailing_margin;
        let EngineState::Loaded {
            document, position, ..
        } = &mut self.state
        else {
            return false;
        };

        let ceiling = ReadingPosition::ceiling(document.page_count(), margin);
        if position.page_index >= ceiling {
            return false;
        }
        position.page_index += 1;
        let position = position.clone();
        self.persist(&position);
        true
    }

    /// Go back one page, clamped at 0.
    ///
    /// Returns whether the position changed; at page 0 this is a no-op and
    /// issues no persistence write.
    pub fn previous(&mut self) -> bool {
        let EngineState::Loaded { position, .. } = &mut self.state else {
            return false;
        };

        if position.page_index == 0 {
            return false;
        }
        position.page_index -= 1;
        let position = position.clone();
        self.persist(&position);
        true
    }

    /// Text of the current page, or a fixed placeholder when no document is
    /// loaded, the load failed, or the index has no page in the document.
    pub fn current_page_text(&self) -> &str {
        match &self.state {
            EngineState::Unloaded => NO_DOCUMENT_TEXT,
            EngineState::LoadFailed { .. } => LOAD_FAILED_TEXT,
            EngineState::Loaded {
                document, position, ..
            } => document
                .page(position.page_index)
                .map(|page| page.text.as_str())
                .unwrap_or(MISSING_PAGE_TEXT),
        }
    }

    /// Progress through the navigable range as an integer percentage.
    ///
    /// Computed as `page_index / max(1, page_count - margin)`, clamped to
    /// `[0, 1]` and truncated. 0 whenever no document is loaded.
    pub fn progress_percent(&self) -> u8 {
        let EngineState::Loaded {
            document, position, ..
        } = &self.state
        else {
            return 0;
        };

        let denominator = document
            .page_count()
            .saturating_sub(self.config.trailing_margin)
            .max(1);
        let ratio = (position.page_index as f64 / denominator as f64).clamp(0.0, 1.0);
        (ratio * 100.0) as u8
    }

    /// Catalog title of the current book; empty when nothing was selected.
    /// After a failed load this is still the requested book's title.
    pub fn current_document_title(&self) -> &str {
        match &self.state {
            EngineState::Unloaded => "",
            EngineState::Loaded { title, .. } | EngineState::LoadFailed { title, .. } => title,
        }
    }

    /// Id of the current (or failed) book, if any.
    pub fn current_document_id(&self) -> Option<&str> {
        match &self.state {
            EngineState::Unloaded => None,
            EngineState::Loaded { position, .. } => Some(&position.document_id),
            EngineState::LoadFailed { book_id, .. } => Some(book_id),
        }
    }

    /// Zero-based index of the current page, when a document is loaded.
    pub fn current_page_index(&self) -> Option<usize> {
        match &self.state {
            EngineState::Loaded { position, .. } => Some(position.page_index),
            _ => None,
        }
    }

    /// Page count of the loaded document, if any.
    pub fn page_count(&self) -> Option<usize> {
        match &self.state {
            EngineState::Loaded { document, .. } => Some(document.page_count()),
            _ => None,
        }
    }

    /// Whether a document is currently loaded.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, EngineState::Loaded { .. })
    }

    /// Take the latest non-fatal persistence failure, if one occurred since
    /// the last call. The position change it belongs to was still applied
    /// in memory.
    pub fn take_store_warning(&mut self) -> Option<StoreError> {
        self.store_warning.take()
    }

    fn persist(&mut self, position: &ReadingPosition) {
        if let Err(err) = self.store.put(&position.document_id, position.page_index) {
            tracing::warn!(
                document_id = %position.document_id,
                page_index = position.page_index,
                error = %err,
                "failed to persist reading position"
            );
            self.store_warning = Some(err);
        }
    }
}
