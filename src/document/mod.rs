//! Paged document loading
//!
//! A book is a flat XML file whose top-level `p<integer>` elements each hold
//! one page of text. The loader parses such files into an immutable
//! [`Document`] addressable by the literal page index and caches parsed
//! documents by path.

mod error;
mod loader;
mod types;

pub use error::{DocumentError, Result};
pub use loader::DocumentLoader;
pub use types::{Document, Page};
