//! Package-level orchestration: one diff per compare set.
//!
//! Facts for every module are loaded before any diffing starts. A module
//! that cannot be read fails the whole package run with a
//! [`ComparisonFailure`]; a compare set whose facts contain duplicate keys
//! fails on its own and is reported next to the successful ones.

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::differ::{diff_types, DiffedCompareSet};
use crate::error::{ComparisonFailure, DuplicateKeyError, FactsProviderError};
use crate::provider::FactsProvider;
use crate::types::{PackageDescription, TypeFacts};

/// One distributable unit of a package, in both versions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompareSet {
    /// Usually the assembly name.
    pub identity: String,
    pub left: PathBuf,
    pub right: PathBuf,
}

impl CompareSet {
    pub fn new(
        identity: impl Into<String>,
        left: impl Into<PathBuf>,
        right: impl Into<PathBuf>,
    ) -> Self {
        Self {
            identity: identity.into(),
            left: left.into(),
            right: right.into(),
        }
    }
}

/// A compare set whose facts could not be matched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailedCompareSet {
    pub compare_set_identity: String,
    pub error: DuplicateKeyError,
}

/// Result for one compare set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CompareSetOutcome {
    Diffed(DiffedCompareSet),
    Failed(FailedCompareSet),
}

impl CompareSetOutcome {
    pub fn identity(&self) -> &str {
        match self {
            CompareSetOutcome::Diffed(set) => &set.compare_set_identity,
            CompareSetOutcome::Failed(set) => &set.compare_set_identity,
        }
    }
}

/// All compare set results of one package run, in input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PackageComparison {
    pub description: PackageDescription,
    pub outcomes: Vec<CompareSetOutcome>,
}

impl PackageComparison {
    /// Successfully diffed compare sets.
    pub fn diffed(&self) -> impl Iterator<Item = &DiffedCompareSet> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            CompareSetOutcome::Diffed(set) => Some(set),
            CompareSetOutcome::Failed(_) => None,
        })
    }

    /// Compare sets that failed on their own.
    pub fn failures(&self) -> impl Iterator<Item = &FailedCompareSet> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            CompareSetOutcome::Failed(set) => Some(set),
            CompareSetOutcome::Diffed(_) => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Diff one pair of already loaded modules.
pub fn compare_modules(
    identity: &str,
    left: Vec<TypeFacts>,
    right: Vec<TypeFacts>,
) -> CompareSetOutcome {
    match diff_types(left, right) {
        Ok(diff) => CompareSetOutcome::Diffed(DiffedCompareSet {
            compare_set_identity: identity.to_string(),
            diff,
        }),
        Err(error) => {
            warn!(compare_set = identity, %error, "compare set failed");
            CompareSetOutcome::Failed(FailedCompareSet {
                compare_set_identity: identity.to_string(),
                error,
            })
        }
    }
}

type LoadedSet = (Vec<TypeFacts>, Vec<TypeFacts>);

fn load_set<P: FactsProvider + ?Sized>(
    provider: &P,
    set: &CompareSet,
) -> Result<LoadedSet, FactsProviderError> {
    let left = provider.get_types(&set.left)?;
    let right = provider.get_types(&set.right)?;
    Ok((left, right))
}

/// Compare every set of a package.
///
/// Loading and diffing run on the rayon pool; outcomes keep the order of
/// `sets`. When several modules fail to load, the first one in input order
/// is reported.
pub fn compare_package<P: FactsProvider + ?Sized>(
    description: &PackageDescription,
    sets: &[CompareSet],
    provider: &P,
) -> Result<PackageComparison, ComparisonFailure> {
    let start = Instant::now();
    info!(
        package = %description.package_id,
        left = %description.versions.left_version,
        right = %description.versions.right_version,
        compare_sets = sets.len(),
        "comparing package"
    );

    let loaded: Vec<Result<LoadedSet, FactsProviderError>> =
        sets.par_iter().map(|set| load_set(provider, set)).collect();

    let mut facts = Vec::with_capacity(loaded.len());
    for result in loaded {
        facts.push(result.map_err(|cause| ComparisonFailure::new(description, cause))?);
    }

    let outcomes: Vec<CompareSetOutcome> = sets
        .par_iter()
        .zip(facts.into_par_iter())
        .map(|(set, (left, right))| {
            debug!(compare_set = %set.identity, "diffing compare set");
            compare_modules(&set.identity, left, right)
        })
        .collect();

    info!(
        package = %description.package_id,
        duration_ms = start.elapsed().as_millis() as u64,
        "package compared"
    );

    Ok(PackageComparison {
        description: description.clone(),
        outcomes,
    })
}
