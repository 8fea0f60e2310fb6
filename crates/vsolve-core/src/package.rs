use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::constraint::Constraint;
use crate::version::Version;

/// Identifier of a package. Names are compared and ordered as plain strings.
pub type PackageName = String;

/// One published version of a package, with the compiler range it supports
/// and the ranges it requires of its dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: PackageName,
    pub version: Version,
    pub compiler: Constraint,
    #[serde(default)]
    pub dependencies: BTreeMap<PackageName, Constraint>,
}

impl PackageRecord {
    pub fn new(name: impl Into<PackageName>, version: Version, compiler: Constraint) -> Self {
        Self {
            name: name.into(),
            version,
            compiler,
            dependencies: BTreeMap::new(),
        }
    }

    /// Add (or replace) a dependency on `name`.
    pub fn with_dependency(mut self, name: impl Into<PackageName>, constraint: Constraint) -> Self {
        self.dependencies.insert(name.into(), constraint);
        self
    }

    /// Whether this record can be used with the given compiler version.
    pub fn supports_compiler(&self, compiler: &Version) -> bool {
        self.compiler.contains(compiler)
    }
}

impl fmt::Display for PackageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}
