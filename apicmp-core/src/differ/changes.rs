//! Structural diff results.
//!
//! Everything here is unfiltered: orphans and matches are recorded exactly as
//! the matcher classified them. Deciding which of them break the public
//! surface is left to a [`crate::policy::SurfacePolicy`].

use serde::Serialize;

use crate::differ::matcher::Matched;
use crate::types::{MemberFacts, MemberKind, TypeFacts};

/// Member-level diff of one type present on both sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeDiff {
    pub left_type: TypeFacts,
    pub right_type: TypeFacts,

    pub left_orphan_fields: Vec<MemberFacts>,
    pub left_orphan_methods: Vec<MemberFacts>,
    pub left_orphan_properties: Vec<MemberFacts>,

    /// Additions are not breaking, but are kept for consumers that want them.
    pub right_orphan_fields: Vec<MemberFacts>,
    pub right_orphan_methods: Vec<MemberFacts>,
    pub right_orphan_properties: Vec<MemberFacts>,

    pub matching_fields: Vec<Matched<MemberFacts>>,
    pub matching_methods: Vec<Matched<MemberFacts>>,
    pub matching_properties: Vec<Matched<MemberFacts>>,
}

impl TypeDiff {
    /// Fully qualified name of the compared type.
    pub fn full_name(&self) -> &str {
        self.left_type.full_name()
    }

    pub fn left_orphans(&self, kind: MemberKind) -> &[MemberFacts] {
        match kind {
            MemberKind::Field => &self.left_orphan_fields,
            MemberKind::Method => &self.left_orphan_methods,
            MemberKind::Property => &self.left_orphan_properties,
        }
    }

    pub fn right_orphans(&self, kind: MemberKind) -> &[MemberFacts] {
        match kind {
            MemberKind::Field => &self.right_orphan_fields,
            MemberKind::Method => &self.right_orphan_methods,
            MemberKind::Property => &self.right_orphan_properties,
        }
    }

    pub fn matching(&self, kind: MemberKind) -> &[Matched<MemberFacts>] {
        match kind {
            MemberKind::Field => &self.matching_fields,
            MemberKind::Method => &self.matching_methods,
            MemberKind::Property => &self.matching_properties,
        }
    }

    /// True when no member was added or removed.
    pub fn is_unchanged(&self) -> bool {
        MemberKind::ALL
            .iter()
            .all(|kind| self.left_orphans(*kind).is_empty() && self.right_orphans(*kind).is_empty())
    }
}

/// Type-level diff of one compared module.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Diff {
    pub left_orphan_types: Vec<TypeFacts>,
    pub right_orphan_types: Vec<TypeFacts>,
    /// In left input order.
    pub matching_type_diffs: Vec<TypeDiff>,
}

impl Diff {
    /// Aggregate counts over the raw structural diff.
    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary {
            types_removed: self.left_orphan_types.len() as u32,
            types_added: self.right_orphan_types.len() as u32,
            types_matched: self.matching_type_diffs.len() as u32,
            ..Default::default()
        };

        for type_diff in &self.matching_type_diffs {
            for kind in MemberKind::ALL {
                summary.record(
                    kind,
                    type_diff.left_orphans(kind).len() as u32,
                    type_diff.right_orphans(kind).len() as u32,
                );
            }
        }

        summary
    }
}

/// The diff of one compare set (one binary) within a package run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffedCompareSet {
    /// Usually the assembly name.
    pub compare_set_identity: String,
    pub diff: Diff,
}

/// Summary statistics for a diff.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub types_added: u32,
    pub types_removed: u32,
    pub types_matched: u32,

    pub fields_added: u32,
    pub fields_removed: u32,

    pub methods_added: u32,
    pub methods_removed: u32,

    pub properties_added: u32,
    pub properties_removed: u32,
}

impl DiffSummary {
    /// Add orphan counts for one member kind.
    pub fn record(&mut self, kind: MemberKind, removed: u32, added: u32) {
        match kind {
            MemberKind::Field => {
                self.fields_removed += removed;
                self.fields_added += added;
            }
            MemberKind::Method => {
                self.methods_removed += removed;
                self.methods_added += added;
            }
            MemberKind::Property => {
                self.properties_removed += removed;
                self.properties_added += added;
            }
        }
    }

    /// Generate human-readable summary string.
    pub fn text(&self) -> String {
        let groups = [
            ("types", self.types_added, self.types_removed),
            ("fields", self.fields_added, self.fields_removed),
            ("methods", self.methods_added, self.methods_removed),
            ("properties", self.properties_added, self.properties_removed),
        ];

        let parts: Vec<String> = groups
            .iter()
            .filter(|(_, added, removed)| *added > 0 || *removed > 0)
            .map(|(label, added, removed)| {
                let mut counts = Vec::new();
                if *added > 0 {
                    counts.push(format!("{} added", added));
                }
                if *removed > 0 {
                    counts.push(format!("{} removed", removed));
                }
                format!("{}: {}", label, counts.join(", "))
            })
            .collect();

        if parts.is_empty() {
            "No changes".to_string()
        } else {
            parts.join("; ")
        }
    }
}
