//! apicmp core - structural API comparison engine.
//!
//! This crate compares the declared API surface of two versions of a
//! package and reports what a consumer of the old version would lose by
//! upgrading.
//!
//! # Features
//!
//! - **Keyed set matching**: linear partition of declarations into removed,
//!   added and matched, with duplicate-key detection
//! - **Parallel diffing**: compare sets and types are diffed concurrently
//!   using Rayon
//! - **Pluggable facts providers**: the engine never reads binaries itself
//! - **Surface policy**: breaking-change filtering kept apart from the
//!   structural diff
//! - **Multiple export formats**: Markdown, HTML, JSON
//!
//! # Usage
//!
//! ```no_run
//! use apicmp_core::compare::{compare_package, CompareSet};
//! use apicmp_core::policy::PublicSurfacePolicy;
//! use apicmp_core::provider::JsonFactsProvider;
//! use apicmp_core::report::PackageReport;
//! use apicmp_core::types::PackageDescription;
//!
//! let description = PackageDescription::new("Acme.Lib", "1.0.0", "2.0.0");
//! let sets = vec![CompareSet::new(
//!     "Acme.Lib",
//!     "facts/1.0.0/Acme.Lib.json",
//!     "facts/2.0.0/Acme.Lib.json",
//! )];
//!
//! let comparison = compare_package(&description, &sets, &JsonFactsProvider::new())?;
//! let report = PackageReport::build(&comparison, &PublicSurfacePolicy::new());
//! println!("{}", apicmp_core::exporter::markdown::export(&report));
//! # Ok::<(), apicmp_core::error::ComparisonFailure>(())
//! ```

pub mod compare;
pub mod differ;
pub mod error;
pub mod exporter;
pub mod keys;
pub mod policy;
pub mod provider;
pub mod report;
pub mod types;

pub use compare::{compare_package, CompareSet, CompareSetOutcome, PackageComparison};
pub use error::{ComparisonFailure, DuplicateKeyError, FactsProviderError};
pub use keys::{MemberKey, TypeKey};
pub use policy::{PublicSurfacePolicy, SurfacePolicy};
pub use provider::FactsProvider;
pub use report::PackageReport;
pub use types::{MemberFacts, MemberKind, PackageDescription, TypeFacts};

/// Crate version, as reported by `apicmp --version`.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
