//! Leitura - document pagination and resumable reading position engine
//!
//! Parses a paged XML book into addressable pages, tracks the reader's
//! current page, computes normalized progress, and durably persists the
//! position per book so reading resumes across sessions. Rendering, input
//! handling and theming are the embedding application's concern; it only
//! queries text/progress and invokes navigation.
//!
//! # Modules
//!
//! - `library`: book catalog (document id -> file path + display title)
//! - `document`: paged XML loading and the parsed `Document` model
//! - `position`: the `ReadingPosition` value type
//! - `store`: durable per-book position persistence
//! - `engine`: the pagination state machine tying the above together
//!
//! # Usage
//!
//! ```rust,no_run
//! use leitura::{BookEntry, EngineConfig, FilePositionStore, Library, PaginationEngine};
//!
//! let library = Library::new(vec![BookEntry::new(
//!     "book-1",
//!     "books/a-morgadinha.xml",
//!     "A Morgadinha dos Canaviais",
//! )]);
//! let store = FilePositionStore::new("positions");
//! let mut engine = PaginationEngine::new(library, Box::new(store), EngineConfig::default());
//!
//! engine.select_document("book-1")?;
//! println!("{} ({}%)", engine.current_page_text(), engine.progress_percent());
//! engine.next();
//! # Ok::<(), leitura::EngineError>(())
//! ```

pub mod config;
pub mod document;
pub mod engine;
pub mod library;
pub mod position;
pub mod store;

pub use config::EngineConfig;
pub use document::{Document, DocumentError, DocumentLoader, Page};
pub use engine::{EngineError, PaginationEngine};
pub use library::{BookEntry, Library};
pub use position::ReadingPosition;
pub use store::{FilePositionStore, PositionStore, StoreError};
