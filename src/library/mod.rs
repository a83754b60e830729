//! Book catalog
//!
//! Maps stable document identifiers to on-disk paths and display titles.
//! The catalog is provided by the embedding application; the engine only
//! resolves ids through it.

use std::path::PathBuf;

/// One book known to the catalog.
#[derive(Debug, Clone)]
pub struct BookEntry {
    /// Stable identifier, also the persistence key for the reading position
    pub id: String,

    /// Path to the paged XML document
    pub path: PathBuf,

    /// Human-readable title shown by the UI
    pub title: String,
}

impl BookEntry {
    /// Create a catalog entry.
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            title: title.into(),
        }
    }
}

/// In-memory book catalog with lookup by id.
#[derive(Debug, Clone, Default)]
pub struct Library {
    books: Vec<BookEntry>,
}

impl Library {
    /// Create a library from a list of entries.
    pub fn new(books: Vec<BookEntry>) -> Self {
        Self { books }
    }

    /// Look up a book by its identifier.
    pub fn get(&self, id: &str) -> Option<&BookEntry> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Iterate over all entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &BookEntry> {
        self.books.iter()
    }

    /// Number of books in the catalog.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_library() -> Library {
        Library::new(vec![
            BookEntry::new("book-1", "xml/morgadinha.xml", "A Morgadinha dos Canaviais"),
            BookEntry::new("book-2", "xml/os_maias.xml", "Os Maias"),
        ])
    }

    #[test]
    fn lookup_by_id() {
        let library = sample_library();

        let book = library.get("book-2").unwrap();
        assert_eq!(book.title, "Os Maias");
        assert_eq!(book.path, PathBuf::from("xml/os_maias.xml"));
    }

    #[test]
    fn unknown_id_returns_none() {
        let library = sample_library();
        assert!(library.get("book-99").is_none());
    }

    #[test]
    fn iterates_in_catalog_order() {
        let library = sample_library();
        let ids: Vec<&str> = library.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["book-1", "book-2"]);
        assert_eq!(library.len(), 2);
        assert!(!library.is_empty());
    }
}
