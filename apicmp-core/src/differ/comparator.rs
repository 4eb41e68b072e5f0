//! Comparator logic: type-level matching and per-type member diffs.

use rayon::prelude::*;
use tracing::debug;

use crate::differ::changes::{Diff, TypeDiff};
use crate::differ::matcher::{match_by_key, Matched, SetMatch};
use crate::error::DuplicateKeyError;
use crate::types::{MemberFacts, MemberKind, TypeFacts};

/// Match the members of one kind across a type pair.
fn match_members(
    left: &TypeFacts,
    right: &TypeFacts,
    kind: MemberKind,
) -> Result<SetMatch<MemberFacts>, DuplicateKeyError> {
    let scope = format!("{} of {}", kind.plural(), left.full_name());
    let left_members: Vec<MemberFacts> = left.members_of(kind).cloned().collect();
    let right_members: Vec<MemberFacts> = right.members_of(kind).cloned().collect();
    match_by_key(left_members, right_members, &scope, |member| &member.key)
}

/// Build the member-level diff of two types sharing a key.
pub fn diff_type(left: TypeFacts, right: TypeFacts) -> Result<TypeDiff, DuplicateKeyError> {
    let fields = match_members(&left, &right, MemberKind::Field)?;
    let methods = match_members(&left, &right, MemberKind::Method)?;
    let properties = match_members(&left, &right, MemberKind::Property)?;

    Ok(TypeDiff {
        left_type: left,
        right_type: right,
        left_orphan_fields: fields.left_only,
        left_orphan_methods: methods.left_only,
        left_orphan_properties: properties.left_only,
        right_orphan_fields: fields.right_only,
        right_orphan_methods: methods.right_only,
        right_orphan_properties: properties.right_only,
        matching_fields: fields.matched,
        matching_methods: methods.matched,
        matching_properties: properties.matched,
    })
}

/// Diff the declared types of two versions of one module.
///
/// Types are paired by fully qualified name; a renamed type shows up as one
/// left orphan plus one right orphan. Matched pairs are diffed in parallel
/// and `matching_type_diffs` keeps left input order.
pub fn diff_types(left: Vec<TypeFacts>, right: Vec<TypeFacts>) -> Result<Diff, DuplicateKeyError> {
    let types = match_by_key(left, right, "types", |ty| &ty.key)?;

    let matching_type_diffs = types
        .matched
        .into_par_iter()
        .map(|Matched { left, right }| diff_type(left, right))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        removed = types.left_only.len(),
        added = types.right_only.len(),
        matched = matching_type_diffs.len(),
        "diffed types"
    );

    Ok(Diff {
        left_orphan_types: types.left_only,
        right_orphan_types: types.right_only,
        matching_type_diffs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Side;

    fn no_params() -> Vec<String> {
        Vec::new()
    }

    fn widget(members: Vec<MemberFacts>) -> TypeFacts {
        TypeFacts::new("Acme.Lib.Widget").with_members(members)
    }

    fn names(members: &[MemberFacts]) -> Vec<String> {
        members.iter().map(|m| m.display_name()).collect()
    }

    #[test]
    fn test_removed_method_is_left_orphan() {
        let left = vec![widget(vec![
            MemberFacts::method("Spin", no_params()),
            MemberFacts::method("Stop", no_params()),
        ])];
        let right = vec![
            widget(vec![MemberFacts::method("Spin", no_params())]),
            TypeFacts::new("Acme.Lib.WidgetFactory"),
        ];

        let diff = diff_types(left, right).unwrap();

        assert!(diff.left_orphan_types.is_empty());
        assert_eq!(diff.right_orphan_types.len(), 1);
        assert_eq!(diff.right_orphan_types[0].full_name(), "Acme.Lib.WidgetFactory");
        assert_eq!(diff.matching_type_diffs.len(), 1);

        let type_diff = &diff.matching_type_diffs[0];
        assert_eq!(type_diff.full_name(), "Acme.Lib.Widget");
        assert_eq!(names(&type_diff.left_orphan_methods), vec!["Stop()"]);
        assert_eq!(type_diff.matching_methods.len(), 1);
        assert_eq!(type_diff.matching_methods[0].left.display_name(), "Spin()");
    }

    #[test]
    fn test_overloads_are_tracked_independently() {
        let left = vec![widget(vec![
            MemberFacts::method("Foo", ["System.Int32"]),
            MemberFacts::method("Foo", ["System.String"]),
        ])];
        let right = vec![widget(vec![MemberFacts::method("Foo", ["System.Int32"])])];

        let diff = diff_types(left, right).unwrap();
        let type_diff = &diff.matching_type_diffs[0];

        assert_eq!(names(&type_diff.left_orphan_methods), vec!["Foo(System.String)"]);
        assert_eq!(type_diff.matching_methods.len(), 1);
        let pair = &type_diff.matching_methods[0];
        assert_eq!(pair.left.display_name(), "Foo(System.Int32)");
        assert_eq!(pair.right.display_name(), "Foo(System.Int32)");
    }

    #[test]
    fn test_kinds_are_matched_separately() {
        // A field and a property sharing a name never pair with each other.
        let left = vec![widget(vec![MemberFacts::field("Name")])];
        let right = vec![widget(vec![MemberFacts::property("Name")])];

        let diff = diff_types(left, right).unwrap();
        let type_diff = &diff.matching_type_diffs[0];

        assert_eq!(names(&type_diff.left_orphan_fields), vec!["Name"]);
        assert_eq!(names(&type_diff.right_orphan_properties), vec!["Name"]);
        assert!(type_diff.matching_fields.is_empty());
        assert!(type_diff.matching_properties.is_empty());
    }

    #[test]
    fn test_diff_keeps_obsolete_and_non_public_members() {
        let left = vec![widget(vec![
            MemberFacts::method("Old", no_params()).obsolete(),
            MemberFacts::field("hidden").non_public(),
            MemberFacts::constructor(no_params()),
        ])];
        let right = vec![widget(vec![])];

        let diff = diff_types(left, right).unwrap();
        let type_diff = &diff.matching_type_diffs[0];

        assert_eq!(names(&type_diff.left_orphan_methods), vec!["Old()", ".ctor()"]);
        assert_eq!(names(&type_diff.left_orphan_fields), vec!["hidden"]);
    }

    #[test]
    fn test_visibility_change_is_a_match() {
        let left = vec![widget(vec![MemberFacts::property("Speed")])];
        let right = vec![widget(vec![MemberFacts::property("Speed").non_public()])];

        let diff = diff_types(left, right).unwrap();
        let type_diff = &diff.matching_type_diffs[0];

        assert!(type_diff.left_orphan_properties.is_empty());
        assert_eq!(type_diff.matching_properties.len(), 1);
        assert!(type_diff.matching_properties[0].left.is_public);
        assert!(!type_diff.matching_properties[0].right.is_public);
    }

    #[test]
    fn test_renamed_type_is_removal_plus_addition() {
        let left = vec![TypeFacts::new("Acme.Lib.Gadget")];
        let right = vec![TypeFacts::new("Acme.Lib.Gizmo")];

        let diff = diff_types(left, right).unwrap();

        assert_eq!(diff.left_orphan_types[0].full_name(), "Acme.Lib.Gadget");
        assert_eq!(diff.right_orphan_types[0].full_name(), "Acme.Lib.Gizmo");
        assert!(diff.matching_type_diffs.is_empty());
    }

    #[test]
    fn test_identical_modules_have_no_orphans() {
        let types = vec![
            widget(vec![
                MemberFacts::method("Spin", no_params()),
                MemberFacts::field("count"),
            ]),
            TypeFacts::new("Acme.Lib.Gadget").with_member(MemberFacts::property("Size")),
        ];

        let diff = diff_types(types.clone(), types).unwrap();

        assert!(diff.left_orphan_types.is_empty());
        assert!(diff.right_orphan_types.is_empty());
        assert_eq!(diff.matching_type_diffs.len(), 2);
        assert!(diff.matching_type_diffs.iter().all(TypeDiff::is_unchanged));
        assert_eq!(diff.summary().text(), "No changes");
    }

    #[test]
    fn test_matching_type_diffs_follow_left_order() {
        let left: Vec<TypeFacts> = ["C", "A", "B"].iter().map(|n| TypeFacts::new(*n)).collect();
        let right: Vec<TypeFacts> = ["B", "C", "A"].iter().map(|n| TypeFacts::new(*n)).collect();

        let diff = diff_types(left, right).unwrap();
        let order: Vec<&str> = diff.matching_type_diffs.iter().map(|d| d.full_name()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_duplicate_member_reports_scope() {
        let left = vec![widget(vec![
            MemberFacts::method("Spin", no_params()),
            MemberFacts::method("Spin", no_params()),
        ])];
        let right = vec![widget(vec![])];

        let err = diff_types(left, right).unwrap_err();
        assert_eq!(err.key, "Spin()");
        assert_eq!(err.side, Side::Left);
        assert_eq!(err.scope, "methods of Acme.Lib.Widget");
    }

    #[test]
    fn test_duplicate_type_fails() {
        let left = vec![TypeFacts::new("Acme.Lib.Widget")];
        let right = vec![TypeFacts::new("Acme.Lib.Widget"), TypeFacts::new("Acme.Lib.Widget")];

        let err = diff_types(left, right).unwrap_err();
        assert_eq!(err.scope, "types");
        assert_eq!(err.side, Side::Right);
    }

    #[test]
    fn test_summary_counts_orphans() {
        let left = vec![
            widget(vec![
                MemberFacts::method("Stop", no_params()),
                MemberFacts::field("count"),
            ]),
            TypeFacts::new("Acme.Lib.Gadget"),
        ];
        let right = vec![widget(vec![MemberFacts::property("Speed")])];

        let summary = diff_types(left, right).unwrap().summary();
        assert_eq!(summary.types_removed, 1);
        assert_eq!(summary.types_matched, 1);
        assert_eq!(summary.methods_removed, 1);
        assert_eq!(summary.fields_removed, 1);
        assert_eq!(summary.properties_added, 1);
    }
}
