//! Backtracking version solver.
//!
//! The search works on two maps: `pending` holds every name that still needs a
//! version together with the intersection of all ranges requested for it so
//! far, and `selected` holds the record already pinned for each name in the
//! current branch. Each step pins the lexicographically smallest pending name to its newest
//! acceptable candidate, folds that candidate's dependency ranges into
//! `pending`, and recurses. A failed branch is dropped whole, so nothing from
//! an abandoned candidate survives into the next attempt.

use std::collections::BTreeMap;

use thiserror::Error;
use vsolve_core::constraint::Constraint;
use vsolve_core::package::{PackageName, PackageRecord};
use vsolve_core::version::Version;

use crate::repository::Repository;

/// A complete assignment of one version per package name.
pub type Solution = BTreeMap<PackageName, Version>;

/// The exact records a solve committed to, one per package name.
pub type Selection<'r> = BTreeMap<PackageName, &'r PackageRecord>;

type Pending = BTreeMap<PackageName, Constraint>;

/// Tuning knobs for a single solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// Give up once this many pick steps have been taken. `None` searches the
    /// whole space, which is exponential in the worst case.
    pub max_steps: Option<u64>,
}

/// No assignment satisfies every constraint.
///
/// This is an ordinary outcome of a solve, not a malfunction: unknown
/// packages, disjoint ranges and compiler mismatches all end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no set of package versions satisfies every constraint")]
pub struct NoSolution {
    /// Pick steps taken before the search ended.
    pub steps: u64,
    /// The search stopped at the step budget rather than exhausting the
    /// version space, so a solution may still exist.
    pub budget_exhausted: bool,
}

/// Resolve `dependencies` against `repo` with an unbounded search.
pub fn solve<R>(
    dependencies: &BTreeMap<PackageName, Constraint>,
    repo: &R,
) -> Result<Solution, NoSolution>
where
    R: Repository + ?Sized,
{
    solve_with(dependencies, repo, &SolveOptions::default())
}

/// Resolve `dependencies` against `repo`.
///
/// Identical inputs always produce identical results.
pub fn solve_with<R>(
    dependencies: &BTreeMap<PackageName, Constraint>,
    repo: &R,
    options: &SolveOptions,
) -> Result<Solution, NoSolution>
where
    R: Repository + ?Sized,
{
    select_with(dependencies, repo, options).map(|selection| versions(&selection))
}

/// Like [`solve_with`], but returns the chosen records themselves.
///
/// A repository may list the same name and version more than once (for
/// different compilers, say); the selection says which entry was used.
pub fn select_with<'r, R>(
    dependencies: &BTreeMap<PackageName, Constraint>,
    repo: &'r R,
    options: &SolveOptions,
) -> Result<Selection<'r>, NoSolution>
where
    R: Repository + ?Sized,
{
    let mut solver = Solver {
        repo,
        options: *options,
        steps: 0,
        exhausted: false,
    };

    match solver.search(dependencies.clone(), Selection::new()) {
        Outcome::Solved(selection) => {
            tracing::debug!(
                "Solved {} packages in {} steps",
                selection.len(),
                solver.steps
            );
            Ok(selection)
        }
        Outcome::DeadEnd => {
            tracing::debug!("No solution after {} steps", solver.steps);
            Err(NoSolution {
                steps: solver.steps,
                budget_exhausted: solver.exhausted,
            })
        }
    }
}

/// The version of every selected record.
pub fn versions(selection: &Selection<'_>) -> Solution {
    selection
        .iter()
        .map(|(name, record)| (name.clone(), record.version))
        .collect()
}

enum Outcome<'r> {
    DeadEnd,
    Solved(Selection<'r>),
}

struct Solver<'r, R: ?Sized> {
    repo: &'r R,
    options: SolveOptions,
    steps: u64,
    exhausted: bool,
}

impl<'r, R: Repository + ?Sized> Solver<'r, R> {
    fn search(&mut self, mut pending: Pending, selected: Selection<'r>) -> Outcome<'r> {
        if self.exhausted {
            return Outcome::DeadEnd;
        }

        // Smallest name first: results must not depend on insertion order.
        let Some((name, constraint)) = pending.pop_first() else {
            return Outcome::Solved(selected);
        };

        if self.options.max_steps.is_some_and(|max| self.steps >= max) {
            tracing::warn!("Giving up after {} resolution steps", self.steps);
            self.exhausted = true;
            return Outcome::DeadEnd;
        }
        self.steps += 1;

        tracing::trace!(
            solved = selected.len(),
            pending = pending.len(),
            "picked {name} ({constraint})"
        );

        let candidates = self.candidates(&name, &constraint);
        tracing::debug!(
            "{name} has candidates [{}]",
            candidates
                .iter()
                .map(|c| c.version.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let compiler = self.repo.compiler_version();
        for candidate in candidates {
            if !candidate.supports_compiler(&compiler) {
                tracing::debug!(
                    "{candidate} rejected: needs compiler {}, have {compiler}",
                    candidate.compiler
                );
                continue;
            }

            let mut tentative_selected = selected.clone();
            tentative_selected.insert(name.clone(), candidate);

            let Some(tentative_pending) =
                merge(&pending, &candidate.dependencies, &tentative_selected)
            else {
                tracing::debug!("{candidate} rejected: conflicting dependency ranges");
                continue;
            };

            match self.search(tentative_pending, tentative_selected) {
                Outcome::Solved(selection) => return Outcome::Solved(selection),
                Outcome::DeadEnd if self.exhausted => break,
                Outcome::DeadEnd => continue,
            }
        }

        Outcome::DeadEnd
    }

    /// Records of `name` accepted by `constraint`, newest first.
    ///
    /// Trying newest first means the first complete solution found is also the
    /// newest one reachable from this branch.
    fn candidates(&self, name: &str, constraint: &Constraint) -> Vec<&'r PackageRecord> {
        let repo: &'r R = self.repo;
        let mut candidates: Vec<&PackageRecord> = repo
            .records_of(name)
            .iter()
            .filter(|record| constraint.contains(&record.version))
            .collect();
        candidates.sort_by(|a, b| b.version.cmp(&a.version));
        candidates
    }
}

/// Fold a candidate's dependency ranges into `pending`.
///
/// Ranges on a pending name are intersected; a name seen for the first time
/// is added as-is. A range on a name already pinned in `selected` is checked
/// against the pinned version instead, so pinned names never return to
/// `pending`. Returns `None` on the first range that cannot be satisfied.
fn merge(
    pending: &Pending,
    dependencies: &BTreeMap<PackageName, Constraint>,
    selected: &Selection<'_>,
) -> Option<Pending> {
    let mut merged = pending.clone();
    for (name, constraint) in dependencies {
        if let Some(pinned) = selected.get(name) {
            if !constraint.contains(&pinned.version) {
                return None;
            }
            continue;
        }
        let narrowed = match merged.get(name) {
            Some(existing) => existing.intersect(constraint)?,
            None => *constraint,
        };
        merged.insert(name.clone(), narrowed);
    }
    Some(merged)
}
