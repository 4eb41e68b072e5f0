//! Identity keys for types and members.
//!
//! Two declarations are "the same" across versions iff their keys are equal.
//! Types are keyed by fully qualified name, fields and properties by name,
//! and methods by name plus ordered parameter type names. Return types are
//! never part of a key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::MemberKind;

/// Separator between an outer type and a nested type in a full name.
pub const NESTED_SEPARATOR: char = '/';

/// Fully qualified type name (namespace + nested path + name).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self(full_name.into())
    }

    /// Build a key from its parts, e.g. `("Acme.Lib", ["Outer"], "Inner")`
    /// gives `Acme.Lib.Outer/Inner`.
    pub fn nested<I, S>(namespace: &str, enclosing: I, name: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut full = String::new();
        if !namespace.is_empty() {
            full.push_str(namespace);
            full.push('.');
        }
        for outer in enclosing {
            full.push_str(outer.as_ref());
            full.push(NESTED_SEPARATOR);
        }
        full.push_str(name);
        Self(full)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment of the name, without namespace or enclosing types.
    pub fn short_name(&self) -> &str {
        self.0
            .rsplit(|c| c == '.' || c == NESTED_SEPARATOR)
            .next()
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TypeKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Member identity within one member kind.
///
/// `parameters` is `None` for fields and properties and `Some` (possibly
/// empty) for methods, so overloads are tracked independently.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberKey {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<String>>,
}

impl MemberKey {
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: None,
        }
    }

    pub fn property(name: impl Into<String>) -> Self {
        Self::field(name)
    }

    pub fn method<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            parameters: Some(parameters.into_iter().map(Into::into).collect()),
        }
    }

    /// Coerce the key to the shape its kind requires.
    ///
    /// Providers that omit an empty parameter list for a method, or attach
    /// one to a field, would otherwise produce keys that never match.
    pub fn normalize_for(&mut self, kind: MemberKind) {
        match kind {
            MemberKind::Method => {
                self.parameters.get_or_insert_with(Vec::new);
            }
            MemberKind::Field | MemberKind::Property => self.parameters = None,
        }
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameters {
            Some(parameters) => write!(f, "{}({})", self.name, parameters.join(", ")),
            None => f.write_str(&self.name),
        }
    }
}
