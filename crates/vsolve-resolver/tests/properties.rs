//! Randomized checks of the solver against an exhaustive enumerator.

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vsolve_core::constraint::Constraint;
use vsolve_core::package::{PackageName, PackageRecord};
use vsolve_core::version::Version;
use vsolve_resolver::repository::{MemoryRepository, Repository};
use vsolve_resolver::solver::{solve, Solution};

const NAMES: [&str; 4] = ["a", "b", "c", "d"];
const COMPILER: Version = Version::new(0, 19, 1);

fn patch(p: u64) -> Version {
    Version::new(1, 0, p)
}

fn random_range(rng: &mut StdRng) -> Constraint {
    let low = rng.gen_range(0..4);
    let high = rng.gen_range(low + 1..=5);
    Constraint::new(patch(low), patch(high))
}

/// Up to four packages, each with versions 1.0.0..=1.0.3 (some missing),
/// random dependency ranges and an occasional compiler mismatch.
fn random_repository(rng: &mut StdRng) -> MemoryRepository {
    let supported = Constraint::new(Version::new(0, 19, 0), Version::new(0, 20, 0));
    let unsupported = Constraint::new(Version::new(0, 18, 0), Version::new(0, 19, 0));

    let mut repo = MemoryRepository::new(COMPILER);
    for name in NAMES {
        for p in 0..4 {
            if rng.gen_bool(0.25) {
                continue;
            }
            let compiler = if rng.gen_bool(0.1) { unsupported } else { supported };
            let mut record = PackageRecord::new(name, patch(p), compiler);
            for dep in NAMES {
                if dep != name && rng.gen_bool(0.3) {
                    record = record.with_dependency(dep, random_range(rng));
                }
            }
            repo.insert(record);
        }
    }
    repo
}

fn random_input(rng: &mut StdRng) -> BTreeMap<PackageName, Constraint> {
    let mut input = BTreeMap::new();
    for name in NAMES {
        if rng.gen_bool(0.4) {
            input.insert(name.to_string(), random_range(rng));
        }
    }
    input
}

fn record_for<'a>(
    repo: &'a MemoryRepository,
    name: &str,
    version: &Version,
) -> Option<&'a PackageRecord> {
    repo.records_of(name).iter().find(|r| r.version == *version)
}

/// Every input range, every chosen record's dependency ranges and every
/// compiler range hold for `assignment`.
fn is_valid(
    input: &BTreeMap<PackageName, Constraint>,
    repo: &MemoryRepository,
    assignment: &Solution,
) -> bool {
    let input_ok = input.iter().all(|(name, range)| {
        assignment
            .get(name)
            .is_some_and(|version| range.contains(version))
    });
    input_ok
        && assignment.iter().all(|(name, version)| {
            let Some(record) = record_for(repo, name, version) else {
                return false;
            };
            record.compiler.contains(&repo.compiler_version())
                && record.dependencies.iter().all(|(dep, range)| {
                    assignment
                        .get(dep)
                        .is_some_and(|version| range.contains(version))
                })
        })
}

/// Every valid assignment, found by trying "absent or one known version"
/// for every name.
fn valid_assignments(
    input: &BTreeMap<PackageName, Constraint>,
    repo: &MemoryRepository,
) -> Vec<Solution> {
    fn go(
        i: usize,
        assignment: &mut Solution,
        input: &BTreeMap<PackageName, Constraint>,
        repo: &MemoryRepository,
        found: &mut Vec<Solution>,
    ) {
        if i == NAMES.len() {
            if is_valid(input, repo, assignment) {
                found.push(assignment.clone());
            }
            return;
        }
        go(i + 1, assignment, input, repo, found);
        for record in repo.records_of(NAMES[i]) {
            assignment.insert(NAMES[i].to_string(), record.version);
            go(i + 1, assignment, input, repo, found);
            assignment.remove(NAMES[i]);
        }
    }
    let mut found = Vec::new();
    go(0, &mut Solution::new(), input, repo, &mut found);
    found
}

fn brute_force_exists(
    input: &BTreeMap<PackageName, Constraint>,
    repo: &MemoryRepository,
) -> bool {
    !valid_assignments(input, repo).is_empty()
}

#[test]
fn solutions_are_sound_and_search_is_complete() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut solved = 0;
    for round in 0..400 {
        let repo = random_repository(&mut rng);
        let input = random_input(&mut rng);
        let result = solve(&input, &repo);
        let exists = brute_force_exists(&input, &repo);

        match &result {
            Ok(solution) => {
                solved += 1;
                assert!(
                    is_valid(&input, &repo, solution),
                    "round {round}: unsound {solution:?} for {input:?}"
                );
            }
            Err(err) => {
                assert!(!err.budget_exhausted);
                assert!(!exists, "round {round}: missed a solution for {input:?}");
            }
        }
        assert_eq!(result.is_ok(), exists, "round {round}");
    }
    assert!(solved > 0, "generator never produced a solvable instance");
}

#[test]
fn results_are_reproducible() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..100 {
        let repo = random_repository(&mut rng);
        let input = random_input(&mut rng);
        assert_eq!(solve(&input, &repo), solve(&input, &repo));
    }
}

#[test]
fn single_package_gets_newest_acceptable_version() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let repo = random_repository(&mut rng);
        let range = random_range(&mut rng);
        let name = NAMES[rng.gen_range(0..NAMES.len())];

        // Only packages without dependencies have a closed-form answer.
        let records = repo.records_of(name);
        if records.iter().any(|r| !r.dependencies.is_empty()) {
            continue;
        }
        let newest = records
            .iter()
            .filter(|r| range.contains(&r.version) && r.compiler.contains(&COMPILER))
            .map(|r| r.version)
            .max();

        let input: BTreeMap<PackageName, Constraint> = [(name.to_string(), range)].into();
        let result = solve(&input, &repo).ok().and_then(|s| s.get(name).copied());
        assert_eq!(result, newest);
    }
}

/// Walk the solution in the order the solver picks names (smallest pending
/// name first) and check that each pick is the newest version any valid
/// assignment allows, given the picks made before it.
#[test]
fn each_pick_is_newest_extendable_version() {
    let mut rng = StdRng::seed_from_u64(0xbe57);
    let mut checked = 0;
    for round in 0..300 {
        let repo = random_repository(&mut rng);
        let input = random_input(&mut rng);
        let Ok(solution) = solve(&input, &repo) else {
            continue;
        };
        let valid = valid_assignments(&input, &repo);

        let mut chosen = Solution::new();
        let mut pending: BTreeSet<PackageName> = input.keys().cloned().collect();
        while let Some(name) = pending.pop_first() {
            let picked = solution[&name];
            let newest = valid
                .iter()
                .filter(|t| chosen.iter().all(|(n, v)| t.get(n) == Some(v)))
                .filter_map(|t| t.get(&name).copied())
                .max();
            assert_eq!(
                Some(picked),
                newest,
                "round {round}: {name} after {chosen:?} for {input:?}"
            );
            checked += 1;

            chosen.insert(name.clone(), picked);
            let Some(record) = record_for(&repo, &name, &picked) else {
                panic!("round {round}: no record for {name} {picked}");
            };
            for dep in record.dependencies.keys() {
                if !chosen.contains_key(dep) {
                    pending.insert(dep.clone());
                }
            }
        }
        assert_eq!(chosen, solution, "round {round}");
    }
    assert!(checked > 0, "generator never produced a solvable instance");
}
