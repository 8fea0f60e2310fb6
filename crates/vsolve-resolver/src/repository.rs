//! The solver's read-only view of available packages.

use std::collections::BTreeMap;

use vsolve_core::index::RepositoryIndex;
use vsolve_core::package::{PackageName, PackageRecord};
use vsolve_core::version::Version;

/// Source of candidate package records plus the compiler version being
/// solved for. Both must stay constant for the duration of a solve.
pub trait Repository {
    fn compiler_version(&self) -> Version;

    /// Every known record of `name`, in no particular order. Unknown names
    /// yield an empty slice.
    fn records_of(&self, name: &str) -> &[PackageRecord];
}

/// A repository held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    compiler: Version,
    packages: BTreeMap<PackageName, Vec<PackageRecord>>,
}

impl MemoryRepository {
    pub fn new(compiler: Version) -> Self {
        Self {
            compiler,
            packages: BTreeMap::new(),
        }
    }

    pub fn with_records(compiler: Version, records: impl IntoIterator<Item = PackageRecord>) -> Self {
        let mut repo = Self::new(compiler);
        for record in records {
            repo.insert(record);
        }
        repo
    }

    pub fn from_index(index: RepositoryIndex, compiler: Version) -> Self {
        Self::with_records(compiler, index.package)
    }

    pub fn insert(&mut self, record: PackageRecord) {
        self.packages
            .entry(record.name.clone())
            .or_default()
            .push(record);
    }

    /// Number of distinct package names.
    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    /// Iterate over every record, grouped by name.
    pub fn records(&self) -> impl Iterator<Item = &PackageRecord> {
        self.packages.values().flatten()
    }
}

impl Repository for MemoryRepository {
    fn compiler_version(&self) -> Version {
        self.compiler
    }

    fn records_of(&self, name: &str) -> &[PackageRecord] {
        self.packages.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsolve_core::constraint::Constraint;

    fn any_compiler() -> Constraint {
        Constraint::new(Version::new(0, 0, 0), Version::new(1, 0, 0))
    }

    #[test]
    fn groups_records_by_name() {
        let repo = MemoryRepository::with_records(
            Version::new(0, 19, 1),
            [
                PackageRecord::new("B", Version::new(1, 0, 0), any_compiler()),
                PackageRecord::new("A", Version::new(1, 0, 0), any_compiler()),
                PackageRecord::new("B", Version::new(1, 0, 1), any_compiler()),
            ],
        );
        assert_eq!(repo.package_count(), 2);
        assert_eq!(repo.records_of("B").len(), 2);
        assert_eq!(repo.records().count(), 3);
        assert_eq!(repo.compiler_version(), Version::new(0, 19, 1));
    }

    #[test]
    fn unknown_package_has_no_records() {
        let repo = MemoryRepository::new(Version::new(0, 19, 1));
        assert!(repo.records_of("Z").is_empty());
    }
}
