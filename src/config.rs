//! Engine configuration

/// Tuning knobs for the pagination engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Trailing pages excluded from the navigable range and the progress
    /// denominator (closing metadata nodes at the end of a book).
    pub trailing_margin: usize,

    /// Maximum number of parsed documents kept in the loader cache.
    pub document_cache_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trailing_margin: 3,
            document_cache_size: 8,
        }
    }
}
