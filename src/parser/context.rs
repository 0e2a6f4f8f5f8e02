//! Per-run parse state threaded through the recursive renderers.

use super::registry::ImageRegistry;
use crate::model::ExtractionStats;

/// Mutable state for one conversion run.
#[derive(Debug, Default)]
pub struct ParseContext {
    /// Image identity and naming authority
    pub registry: ImageRegistry,

    /// Counters
    pub stats: ExtractionStats,
}

impl ParseContext {
    /// Create a fresh context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image source, returning its file name.
    pub fn register_image(&mut self, raw_url: &str) -> String {
        self.registry.register(raw_url)
    }
}
