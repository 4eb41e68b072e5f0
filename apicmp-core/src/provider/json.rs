//! Facts manifests: JSON dumps of a module's declared surface.
//!
//! A manifest is either a [`ModuleFacts`] object or a bare array of types:
//!
//! ```json
//! {
//!   "name": "Acme.Lib",
//!   "types": [
//!     {
//!       "key": "Acme.Lib.Widget",
//!       "is_public": true,
//!       "members": [
//!         { "kind": "method", "name": "Spin", "parameters": [], "is_public": true },
//!         { "kind": "property", "name": "Speed", "is_public": true }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::FactsProviderError;
use crate::provider::FactsProvider;
use crate::types::{ModuleFacts, TypeFacts};

/// Extension of facts manifest files.
pub const MANIFEST_EXTENSION: &str = "json";

#[derive(Deserialize)]
#[serde(untagged)]
enum Manifest {
    Module(ModuleFacts),
    Types(Vec<TypeFacts>),
}

/// Reads facts manifests from disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFactsProvider;

impl JsonFactsProvider {
    pub fn new() -> Self {
        Self
    }

    /// Parse manifest text. `module` is only used in errors.
    pub fn parse(module: &Path, text: &str) -> Result<Vec<TypeFacts>, FactsProviderError> {
        let manifest: Manifest =
            serde_json::from_str(text).map_err(|source| FactsProviderError::Malformed {
                module: module.to_path_buf(),
                source,
            })?;

        let types = match manifest {
            Manifest::Module(facts) => facts.types,
            Manifest::Types(types) => types,
        };

        Ok(types.into_iter().map(normalize).collect())
    }
}

fn normalize(mut ty: TypeFacts) -> TypeFacts {
    for member in &mut ty.members {
        member.key.normalize_for(member.kind);
    }
    ty
}

impl FactsProvider for JsonFactsProvider {
    fn get_types(&self, module: &Path) -> Result<Vec<TypeFacts>, FactsProviderError> {
        let text = std::fs::read_to_string(module).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                FactsProviderError::NotFound {
                    module: module.to_path_buf(),
                }
            } else {
                FactsProviderError::Io {
                    module: module.to_path_buf(),
                    source,
                }
            }
        })?;

        let types = Self::parse(module, &text)?;
        debug!(module = %module.display(), types = types.len(), "loaded facts manifest");
        Ok(types)
    }
}
