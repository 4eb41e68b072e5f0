//! Data model for the declared API surface of a compiled module.
//!
//! These types are the boundary between a facts provider (whatever reads a
//! binary's metadata) and the diff engine. They carry no behavior beyond
//! construction helpers; the engine only ever reads them.

use serde::{Deserialize, Serialize};

use crate::keys::{MemberKey, TypeKey};

/// Left/right version labels for a comparison run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versions {
    pub left_version: String,
    pub right_version: String,
}

/// Identifies a single comparison run of one package.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDescription {
    pub package_id: String,
    pub versions: Versions,
}

impl PackageDescription {
    pub fn new(
        package_id: impl Into<String>,
        left_version: impl Into<String>,
        right_version: impl Into<String>,
    ) -> Self {
        Self {
            package_id: package_id.into(),
            versions: Versions {
                left_version: left_version.into(),
                right_version: right_version.into(),
            },
        }
    }

    /// File stem used for reports of this run, e.g. `Acme.Lib-1.0.0...2.0.0`.
    pub fn report_stem(&self) -> String {
        format!(
            "{}-{}...{}",
            self.package_id, self.versions.left_version, self.versions.right_version
        )
    }
}

/// Category of a type member. Members are only ever matched within their own kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    Method,
    Property,
}

impl MemberKind {
    pub const ALL: [MemberKind; 3] = [MemberKind::Field, MemberKind::Method, MemberKind::Property];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Field => "field",
            MemberKind::Method => "method",
            MemberKind::Property => "property",
        }
    }

    /// Plural label used in scopes and reports.
    pub fn plural(&self) -> &'static str {
        match self {
            MemberKind::Field => "fields",
            MemberKind::Method => "methods",
            MemberKind::Property => "properties",
        }
    }
}

/// A declared field, method or property together with its attribute facts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFacts {
    pub kind: MemberKind,

    #[serde(flatten)]
    pub key: MemberKey,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    pub is_obsolete: bool,

    #[serde(default)]
    pub is_compiler_generated: bool,

    #[serde(default)]
    pub is_constructor: bool,

    /// Public override reusing an existing virtual slot rather than introducing a new one.
    #[serde(default)]
    pub is_override_of_existing_virtual: bool,
}

impl MemberFacts {
    fn with_key(kind: MemberKind, key: MemberKey) -> Self {
        Self {
            kind,
            key,
            is_public: true,
            is_obsolete: false,
            is_compiler_generated: false,
            is_constructor: false,
            is_override_of_existing_virtual: false,
        }
    }

    /// A public field.
    pub fn field(name: impl Into<String>) -> Self {
        Self::with_key(MemberKind::Field, MemberKey::field(name))
    }

    /// A public property.
    pub fn property(name: impl Into<String>) -> Self {
        Self::with_key(MemberKind::Property, MemberKey::property(name))
    }

    /// A public method with the given ordered parameter type names.
    pub fn method<I, S>(name: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_key(MemberKind::Method, MemberKey::method(name, parameters))
    }

    /// A public constructor (`.ctor`).
    pub fn constructor<I, S>(parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut facts = Self::method(".ctor", parameters);
        facts.is_constructor = true;
        facts
    }

    pub fn non_public(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }

    pub fn compiler_generated(mut self) -> Self {
        self.is_compiler_generated = true;
        self
    }

    pub fn virtual_override(mut self) -> Self {
        self.is_override_of_existing_virtual = true;
        self
    }

    /// Name shown in reports, e.g. `Stop()` or `Count`.
    pub fn display_name(&self) -> String {
        self.key.to_string()
    }
}

/// A declared type and its members.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFacts {
    pub key: TypeKey,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default)]
    pub is_obsolete: bool,

    #[serde(default)]
    pub is_compiler_generated: bool,

    #[serde(default)]
    pub members: Vec<MemberFacts>,
}

impl TypeFacts {
    /// A public type with no members.
    pub fn new(key: impl Into<TypeKey>) -> Self {
        Self {
            key: key.into(),
            is_public: true,
            is_obsolete: false,
            is_compiler_generated: false,
            members: Vec::new(),
        }
    }

    /// Builder: add a member.
    pub fn with_member(mut self, member: MemberFacts) -> Self {
        self.members.push(member);
        self
    }

    /// Builder: add several members.
    pub fn with_members(mut self, members: impl IntoIterator<Item = MemberFacts>) -> Self {
        self.members.extend(members);
        self
    }

    pub fn non_public(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub fn obsolete(mut self) -> Self {
        self.is_obsolete = true;
        self
    }

    /// Fully qualified name.
    pub fn full_name(&self) -> &str {
        self.key.as_str()
    }

    /// Members of a single kind, in declaration order.
    pub fn members_of(&self, kind: MemberKind) -> impl Iterator<Item = &MemberFacts> {
        self.members.iter().filter(move |m| m.kind == kind)
    }
}

/// All declared types of one module, as produced by a facts provider.
///
/// `types` is required and unknown fields are rejected, so a stray object
/// is never read as an empty module.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleFacts {
    /// Module (assembly) name, informational only.
    #[serde(default)]
    pub name: Option<String>,

    pub types: Vec<TypeFacts>,
}
