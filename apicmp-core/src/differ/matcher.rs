//! Keyed two-way partition of a left and a right collection.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::error::{DuplicateKeyError, Side};

/// Two items, one from each side, sharing an identity key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matched<T> {
    pub left: T,
    pub right: T,
}

/// Result of matching two keyed collections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetMatch<V> {
    /// Items whose key exists only on the left, in left order.
    pub left_only: Vec<V>,
    /// Items whose key exists only on the right, in right order.
    pub right_only: Vec<V>,
    /// One pair per shared key, in left order.
    pub matched: Vec<Matched<V>>,
}

impl<V> SetMatch<V> {
    /// True when both sides had exactly the same keys.
    pub fn is_exact(&self) -> bool {
        self.left_only.is_empty() && self.right_only.is_empty()
    }
}

/// Partition `left` and `right` by the key `key_of` extracts.
///
/// Runs in time linear in `left.len() + right.len()`. Keys must be unique
/// within each side; the first repeat found fails with [`DuplicateKeyError`]
/// naming the key, the side and `scope`.
pub fn match_by_key<V, K, F>(
    left: Vec<V>,
    right: Vec<V>,
    scope: &str,
    key_of: F,
) -> Result<SetMatch<V>, DuplicateKeyError>
where
    K: Eq + Hash + fmt::Display + ?Sized,
    F: Fn(&V) -> &K,
{
    // For each left item, the index of its right counterpart.
    let pairing: Vec<Option<usize>> = {
        let mut right_index: HashMap<&K, usize> = HashMap::with_capacity(right.len());
        for (index, item) in right.iter().enumerate() {
            let key = key_of(item);
            if right_index.insert(key, index).is_some() {
                return Err(duplicate(key, Side::Right, scope));
            }
        }

        let mut seen_left: HashSet<&K> = HashSet::with_capacity(left.len());
        let mut pairing = Vec::with_capacity(left.len());
        for item in &left {
            let key = key_of(item);
            if !seen_left.insert(key) {
                return Err(duplicate(key, Side::Left, scope));
            }
            pairing.push(right_index.get(key).copied());
        }
        pairing
    };

    let mut right_slots: Vec<Option<V>> = right.into_iter().map(Some).collect();
    let mut left_only = Vec::new();
    let mut matched = Vec::new();

    for (item, counterpart) in left.into_iter().zip(pairing) {
        match counterpart.and_then(|index| right_slots[index].take()) {
            Some(other) => matched.push(Matched {
                left: item,
                right: other,
            }),
            None => left_only.push(item),
        }
    }

    let right_only = right_slots.into_iter().flatten().collect();

    Ok(SetMatch {
        left_only,
        right_only,
        matched,
    })
}

fn duplicate<K: fmt::Display + ?Sized>(key: &K, side: Side, scope: &str) -> DuplicateKeyError {
    DuplicateKeyError {
        key: key.to_string(),
        side,
        scope: scope.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Item {
        key: String,
        tag: &'static str,
    }

    fn items(keys: &[&str], tag: &'static str) -> Vec<Item> {
        keys.iter()
            .map(|k| Item {
                key: k.to_string(),
                tag,
            })
            .collect()
    }

    fn run(left: &[&str], right: &[&str]) -> SetMatch<Item> {
        match_by_key(items(left, "L"), items(right, "R"), "items", |i| {
            i.key.as_str()
        })
        .unwrap()
    }

    fn keys(values: &[Item]) -> Vec<&str> {
        values.iter().map(|i| i.key.as_str()).collect()
    }

    #[test]
    fn test_basic_partition() {
        let result = run(&["a", "b", "c"], &["b", "c", "d"]);

        assert_eq!(keys(&result.left_only), vec!["a"]);
        assert_eq!(keys(&result.right_only), vec!["d"]);
        assert_eq!(result.matched.len(), 2);
        for pair in &result.matched {
            assert_eq!(pair.left.key, pair.right.key);
            assert_eq!(pair.left.tag, "L");
            assert_eq!(pair.right.tag, "R");
        }
    }

    #[test]
    fn test_partition_covers_every_key_once() {
        let cases: &[(&[&str], &[&str])] = &[
            (&[], &[]),
            (&["a"], &[]),
            (&[], &["a"]),
            (&["a", "b", "c", "d"], &["d", "c"]),
            (&["x", "y"], &["p", "q", "x"]),
            (&["m", "n", "o"], &["o", "n", "m"]),
        ];

        for (left, right) in cases {
            let result = run(left, right);

            let mut left_seen: Vec<&str> = keys(&result.left_only);
            left_seen.extend(result.matched.iter().map(|p| p.left.key.as_str()));
            left_seen.sort_unstable();
            let mut expected_left = left.to_vec();
            expected_left.sort_unstable();
            assert_eq!(left_seen, expected_left);

            let mut right_seen: Vec<&str> = keys(&result.right_only);
            right_seen.extend(result.matched.iter().map(|p| p.right.key.as_str()));
            right_seen.sort_unstable();
            let mut expected_right = right.to_vec();
            expected_right.sort_unstable();
            assert_eq!(right_seen, expected_right);

            for orphan in &result.left_only {
                assert!(!result.matched.iter().any(|p| p.left.key == orphan.key));
            }
        }
    }

    #[test]
    fn test_identical_keys_match_completely() {
        let result = run(&["a", "b", "c"], &["c", "a", "b"]);
        assert!(result.is_exact());
        assert!(result.left_only.is_empty());
        assert!(result.right_only.is_empty());
        assert_eq!(result.matched.len(), 3);
    }

    #[test]
    fn test_order_follows_inputs() {
        let result = run(&["z", "a", "m", "q"], &["q", "y", "z", "b"]);

        let matched: Vec<&str> = result.matched.iter().map(|p| p.left.key.as_str()).collect();
        assert_eq!(matched, vec!["z", "q"]);
        assert_eq!(keys(&result.left_only), vec!["a", "m"]);
        assert_eq!(keys(&result.right_only), vec!["y", "b"]);
    }

    #[test]
    fn test_duplicate_on_left_fails() {
        let err = match_by_key(
            items(&["a", "b", "a"], "L"),
            items(&["a"], "R"),
            "methods of Acme.Widget",
            |i| i.key.as_str(),
        )
        .unwrap_err();

        assert_eq!(err.key, "a");
        assert_eq!(err.side, Side::Left);
        assert_eq!(err.scope, "methods of Acme.Widget");
    }

    #[test]
    fn test_duplicate_on_right_fails() {
        let err = match_by_key(
            items(&["a"], "L"),
            items(&["b", "b"], "R"),
            "types",
            |i| i.key.as_str(),
        )
        .unwrap_err();

        assert_eq!(err.key, "b");
        assert_eq!(err.side, Side::Right);
    }
}
