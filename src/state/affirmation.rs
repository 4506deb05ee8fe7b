//! Affirmation rotation

use std::sync::Arc;

use crate::catalog::Catalog;

/// Cyclic cursor over the catalog's affirmations
#[derive(Debug, Clone)]
pub struct AffirmationRotator {
    catalog: Arc<Catalog>,
    index: usize,
}

impl AffirmationRotator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog, index: 0 }
    }

    /// Move to the next affirmation, wrapping after the last
    pub fn next(&mut self) {
        let len = self.catalog.affirmations.len();
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &str {
        self.catalog
            .affirmations
            .get(self.index)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
