//! Breaking-change policy applied on top of a structural [`Diff`].
//!
//! The diff records every orphan and match. A policy decides which of them
//! remove something from the public surface; reporters call
//! [`missing_surface`] with the policy they want.

use serde::Serialize;

use crate::differ::{Diff, TypeDiff};
use crate::types::{MemberFacts, MemberKind, TypeFacts};

/// Decides whether a left-side declaration is gone from the public surface.
///
/// `right` is `None` for a left orphan and the matched counterpart otherwise.
pub trait SurfacePolicy: Sync {
    fn is_missing_type(&self, left: &TypeFacts, right: Option<&TypeFacts>) -> bool;

    fn is_missing_member(&self, left: &MemberFacts, right: Option<&MemberFacts>) -> bool;
}

/// Public, non-obsolete declarations that vanish or lose public visibility.
///
/// Constructors and overrides of an existing virtual slot are never counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PublicSurfacePolicy {
    /// Also ignore members flagged as compiler generated.
    pub skip_compiler_generated: bool,
}

impl PublicSurfacePolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

fn revoked(left_on_surface: bool, right_is_public: Option<bool>) -> bool {
    match right_is_public {
        None => left_on_surface,
        Some(public) => left_on_surface && !public,
    }
}

impl SurfacePolicy for PublicSurfacePolicy {
    fn is_missing_type(&self, left: &TypeFacts, right: Option<&TypeFacts>) -> bool {
        let on_surface = left.is_public && !left.is_obsolete;
        revoked(on_surface, right.map(|r| r.is_public))
    }

    fn is_missing_member(&self, left: &MemberFacts, right: Option<&MemberFacts>) -> bool {
        if left.kind == MemberKind::Method
            && (left.is_constructor || left.is_override_of_existing_virtual)
        {
            return false;
        }
        if self.skip_compiler_generated && left.is_compiler_generated {
            return false;
        }

        let on_surface = left.is_public && !left.is_obsolete;
        revoked(on_surface, right.map(|r| r.is_public))
    }
}

/// Members of one matched type that are missing from the new surface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MissingMembers {
    pub type_name: String,
    pub fields: Vec<String>,
    pub methods: Vec<String>,
    pub properties: Vec<String>,
}

impl MissingMembers {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.methods.is_empty() && self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len() + self.methods.len() + self.properties.len()
    }

    /// `Type.Member` names, fields first, then methods, then properties.
    pub fn qualified_names(&self) -> impl Iterator<Item = String> + '_ {
        self.fields
            .iter()
            .chain(&self.methods)
            .chain(&self.properties)
            .map(move |member| format!("{}.{}", self.type_name, member))
    }
}

/// What a diff removes from the public surface, sorted by full name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MissingSurface {
    pub missing_types: Vec<String>,
    /// Only types with at least one missing member.
    pub types: Vec<MissingMembers>,
}

impl MissingSurface {
    /// True when anything was removed.
    pub fn is_breaking(&self) -> bool {
        !self.missing_types.is_empty() || !self.types.is_empty()
    }

    pub fn missing_member_count(&self) -> usize {
        self.types.iter().map(MissingMembers::len).sum()
    }
}

fn missing_of_kind(
    type_diff: &TypeDiff,
    kind: MemberKind,
    policy: &dyn SurfacePolicy,
) -> Vec<String> {
    let orphans = type_diff
        .left_orphans(kind)
        .iter()
        .filter(|member| policy.is_missing_member(member, None));
    let revoked = type_diff
        .matching(kind)
        .iter()
        .filter(|pair| policy.is_missing_member(&pair.left, Some(&pair.right)))
        .map(|pair| &pair.left);

    let mut names: Vec<String> = orphans.chain(revoked).map(MemberFacts::display_name).collect();
    names.sort();
    names
}

/// Apply `policy` to `diff`.
pub fn missing_surface(diff: &Diff, policy: &dyn SurfacePolicy) -> MissingSurface {
    let orphan_types = diff
        .left_orphan_types
        .iter()
        .filter(|ty| policy.is_missing_type(ty, None));
    let revoked_types = diff
        .matching_type_diffs
        .iter()
        .filter(|td| policy.is_missing_type(&td.left_type, Some(&td.right_type)))
        .map(|td| &td.left_type);

    let mut missing_types: Vec<String> = orphan_types
        .chain(revoked_types)
        .map(|ty| ty.full_name().to_string())
        .collect();
    missing_types.sort();

    let mut types: Vec<MissingMembers> = diff
        .matching_type_diffs
        .iter()
        .map(|type_diff| MissingMembers {
            type_name: type_diff.full_name().to_string(),
            fields: missing_of_kind(type_diff, MemberKind::Field, policy),
            methods: missing_of_kind(type_diff, MemberKind::Method, policy),
            properties: missing_of_kind(type_diff, MemberKind::Property, policy),
        })
        .filter(|missing| !missing.is_empty())
        .collect();
    types.sort_by(|a, b| a.type_name.cmp(&b.type_name));

    MissingSurface {
        missing_types,
        types,
    }
}

/// Public declarations that became obsolete in the new version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Deprecations {
    pub types: Vec<String>,
    /// `Type.Member` names.
    pub members: Vec<String>,
}

impl Deprecations {
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.members.is_empty()
    }
}

/// Matched declarations public on both sides, not obsolete on the left but
/// obsolete on the right.
pub fn newly_obsolete(diff: &Diff) -> Deprecations {
    let mut types = Vec::new();
    let mut members = Vec::new();

    for type_diff in &diff.matching_type_diffs {
        let (left, right) = (&type_diff.left_type, &type_diff.right_type);
        if left.is_public && right.is_public && !left.is_obsolete && right.is_obsolete {
            types.push(left.full_name().to_string());
        }

        for kind in MemberKind::ALL {
            for pair in type_diff.matching(kind) {
                if pair.left.is_public
                    && pair.right.is_public
                    && !pair.left.is_obsolete
                    && pair.right.is_obsolete
                {
                    members.push(format!("{}.{}", left.full_name(), pair.left.display_name()));
                }
            }
        }
    }

    types.sort();
    members.sort();
    Deprecations { types, members }
}
