//! Error types for apicmp-core.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::types::{PackageDescription, Versions};

/// Which side of a comparison a value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Two items on the same side of a match share an identity key.
///
/// The input is malformed or ambiguous; the comparison it belongs to is aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("duplicate key `{key}` among {scope} on the {side} side")]
pub struct DuplicateKeyError {
    /// Display form of the offending key.
    pub key: String,
    pub side: Side,
    /// What was being matched, e.g. `types` or `methods of Acme.Lib.Widget`.
    pub scope: String,
}

/// A facts provider could not produce the declared surface of a module.
#[derive(Error, Debug)]
pub enum FactsProviderError {
    /// The module does not exist (or the provider does not know it).
    #[error("module not found: {module}")]
    NotFound {
        /// Module that was requested.
        module: PathBuf,
    },

    /// The module could not be read.
    #[error("failed to read module {module}: {source}")]
    Io {
        /// Module that was being read.
        module: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The module was read but its contents are not valid facts.
    #[error("malformed facts in module {module}: {source}")]
    Malformed {
        /// Module that was being parsed.
        module: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FactsProviderError {
    /// Module the failure relates to.
    pub fn module(&self) -> &std::path::Path {
        match self {
            FactsProviderError::NotFound { module }
            | FactsProviderError::Io { module, .. }
            | FactsProviderError::Malformed { module, .. } => module,
        }
    }
}

/// A package run could not be completed. No partial report exists.
#[derive(Error, Debug)]
#[error(
    "{package_id} comparison between {} and {} failed: {cause}",
    versions.left_version,
    versions.right_version
)]
pub struct ComparisonFailure {
    pub package_id: String,
    pub versions: Versions,
    #[source]
    pub cause: FactsProviderError,
}

impl ComparisonFailure {
    pub fn new(description: &PackageDescription, cause: FactsProviderError) -> Self {
        Self {
            package_id: description.package_id.clone(),
            versions: description.versions.clone(),
            cause,
        }
    }

    /// Underlying error message, without the package prefix.
    pub fn message(&self) -> String {
        self.cause.to_string()
    }

    /// Text of the user-visible failure artifact written in place of a report.
    pub fn report_text(&self) -> String {
        format!(
            "{} comparison between {} and {} has failed with the following error: {}",
            self.package_id,
            self.versions.left_version,
            self.versions.right_version,
            self.message()
        )
    }
}
