//! Structural diff engine for comparing the declared API surface of two
//! versions of a module.
//!
//! # Layers
//!
//! - **Matcher**: keyed two-way partition into left-only, right-only and
//!   matched items ([`match_by_key`])
//! - **Comparator**: per-type member diffs and the type-level [`Diff`]
//! - **Changes**: the immutable result structures
//!
//! # Example
//!
//! ```
//! use apicmp_core::differ::diff_types;
//! use apicmp_core::types::{MemberFacts, TypeFacts};
//!
//! let left = vec![TypeFacts::new("Acme.Lib.Widget").with_members([
//!     MemberFacts::method("Spin", Vec::<String>::new()),
//!     MemberFacts::method("Stop", Vec::<String>::new()),
//! ])];
//! let right = vec![TypeFacts::new("Acme.Lib.Widget")
//!     .with_member(MemberFacts::method("Spin", Vec::<String>::new()))];
//!
//! let diff = diff_types(left, right).unwrap();
//! assert_eq!(diff.matching_type_diffs[0].left_orphan_methods[0].display_name(), "Stop()");
//! ```

pub mod changes;
pub mod comparator;
pub mod matcher;

pub use changes::{Diff, DiffSummary, DiffedCompareSet, TypeDiff};
pub use comparator::{diff_type, diff_types};
pub use matcher::{match_by_key, Matched, SetMatch};
