//! In-memory facts provider for hand-built fixtures and embedding.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::FactsProviderError;
use crate::provider::FactsProvider;
use crate::types::TypeFacts;

/// Serves pre-built facts keyed by module path.
#[derive(Clone, Debug, Default)]
pub struct StaticFactsProvider {
    modules: HashMap<PathBuf, Vec<TypeFacts>>,
}

impl StaticFactsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the types of a module, replacing any previous entry.
    pub fn insert(&mut self, module: impl Into<PathBuf>, types: Vec<TypeFacts>) {
        self.modules.insert(module.into(), types);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_module(mut self, module: impl Into<PathBuf>, types: Vec<TypeFacts>) -> Self {
        self.insert(module, types);
        self
    }
}

impl FactsProvider for StaticFactsProvider {
    fn get_types(&self, module: &Path) -> Result<Vec<TypeFacts>, FactsProviderError> {
        self.modules
            .get(module)
            .cloned()
            .ok_or_else(|| FactsProviderError::NotFound {
                module: module.to_path_buf(),
            })
    }
}
