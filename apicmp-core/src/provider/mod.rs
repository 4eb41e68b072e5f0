//! Facts providers: the seam between binary-reading code and the diff engine.
//!
//! The engine never looks inside a binary. Anything that can turn a module
//! reference into [`TypeFacts`] with consistent keying on both sides can
//! drive a comparison.

use std::path::Path;

use crate::error::FactsProviderError;
use crate::types::TypeFacts;

pub mod json;
pub mod memory;

pub use json::JsonFactsProvider;
pub use memory::StaticFactsProvider;

/// Extracts the declared types of a compiled module.
///
/// Implementations must key types by fully qualified name and methods by
/// ordered parameter type names, identically for every module they read.
pub trait FactsProvider: Sync {
    fn get_types(&self, module: &Path) -> Result<Vec<TypeFacts>, FactsProviderError>;
}

impl<P: FactsProvider + ?Sized> FactsProvider for &P {
    fn get_types(&self, module: &Path) -> Result<Vec<TypeFacts>, FactsProviderError> {
        (**self).get_types(module)
    }
}
