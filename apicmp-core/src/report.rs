//! Report model: a [`PackageComparison`] with a policy applied.
//!
//! Exporters render this structure; they never look at the raw diff.

use serde::Serialize;

use crate::compare::{CompareSetOutcome, FailedCompareSet, PackageComparison};
use crate::differ::{DiffSummary, DiffedCompareSet};
use crate::policy::{missing_surface, newly_obsolete, Deprecations, MissingSurface, SurfacePolicy};
use crate::types::PackageDescription;

/// Filtered view of one diffed compare set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompareSetReport {
    pub identity: String,
    pub summary: DiffSummary,
    pub missing: MissingSurface,
    pub deprecations: Deprecations,
}

impl CompareSetReport {
    pub fn build(set: &DiffedCompareSet, policy: &dyn SurfacePolicy) -> Self {
        Self {
            identity: set.compare_set_identity.clone(),
            summary: set.diff.summary(),
            missing: missing_surface(&set.diff, policy),
            deprecations: newly_obsolete(&set.diff),
        }
    }
}

/// Everything a reporter needs for one package run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PackageReport {
    pub description: PackageDescription,
    /// In input order.
    pub compare_sets: Vec<CompareSetReport>,
    pub failures: Vec<FailedCompareSet>,
}

impl PackageReport {
    pub fn build(comparison: &PackageComparison, policy: &dyn SurfacePolicy) -> Self {
        let mut compare_sets = Vec::new();
        let mut failures = Vec::new();

        for outcome in &comparison.outcomes {
            match outcome {
                CompareSetOutcome::Diffed(set) => {
                    compare_sets.push(CompareSetReport::build(set, policy))
                }
                CompareSetOutcome::Failed(failed) => failures.push(failed.clone()),
            }
        }

        Self {
            description: comparison.description.clone(),
            compare_sets,
            failures,
        }
    }

    /// True when any compare set removes public surface.
    pub fn is_breaking(&self) -> bool {
        self.compare_sets.iter().any(|set| set.missing.is_breaking())
    }

    /// True when every compare set was diffed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Heading used by exporters, e.g. `Acme.Lib 1.0.0...2.0.0`.
    pub fn title(&self) -> String {
        format!(
            "{} {}...{}",
            self.description.package_id,
            self.description.versions.left_version,
            self.description.versions.right_version
        )
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::compare::{compare_package, CompareSet};
    use crate::policy::PublicSurfacePolicy;
    use crate::provider::StaticFactsProvider;
    use crate::types::{MemberFacts, TypeFacts};

    /// Two compare sets: `Acme.Lib` loses `Widget.Stop()` and `Gadget`,
    /// `Acme.Dup` has duplicate types on the left.
    pub fn acme_report() -> PackageReport {
        let provider = StaticFactsProvider::new()
            .with_module(
                "1.0.0/Acme.Lib.dll",
                vec![
                    TypeFacts::new("Acme.Lib.Widget").with_members([
                        MemberFacts::method("Spin", Vec::<String>::new()),
                        MemberFacts::method("Stop", Vec::<String>::new()),
                        MemberFacts::property("Speed"),
                    ]),
                    TypeFacts::new("Acme.Lib.Gadget"),
                ],
            )
            .with_module(
                "2.0.0/Acme.Lib.dll",
                vec![
                    TypeFacts::new("Acme.Lib.Widget").with_members([
                        MemberFacts::method("Spin", Vec::<String>::new()),
                        MemberFacts::property("Speed").obsolete(),
                    ]),
                    TypeFacts::new("Acme.Lib.WidgetFactory"),
                ],
            )
            .with_module(
                "1.0.0/Acme.Dup.dll",
                vec![TypeFacts::new("Acme.Dup.A"), TypeFacts::new("Acme.Dup.A")],
            )
            .with_module("2.0.0/Acme.Dup.dll", vec![]);

        let sets = vec![
            CompareSet::new("Acme.Lib", "1.0.0/Acme.Lib.dll", "2.0.0/Acme.Lib.dll"),
            CompareSet::new("Acme.Dup", "1.0.0/Acme.Dup.dll", "2.0.0/Acme.Dup.dll"),
        ];
        let description = PackageDescription::new("Acme.Lib", "1.0.0", "2.0.0");
        let comparison = compare_package(&description, &sets, &provider).unwrap();
        PackageReport::build(&comparison, &PublicSurfacePolicy::new())
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::acme_report;

    #[test]
    fn test_build_report() {
        let report = acme_report();

        assert_eq!(report.title(), "Acme.Lib 1.0.0...2.0.0");
        assert!(report.is_breaking());
        assert_eq!(report.compare_sets.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].compare_set_identity, "Acme.Dup");
        assert!(!report.is_complete());

        let lib = &report.compare_sets[0];
        assert_eq!(lib.missing.missing_types, vec!["Acme.Lib.Gadget"]);
        assert_eq!(lib.missing.types[0].methods, vec!["Stop()"]);
        assert_eq!(lib.deprecations.members, vec!["Acme.Lib.Widget.Speed"]);
        assert_eq!(lib.summary.types_added, 1);
    }
}
