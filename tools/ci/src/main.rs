//! Runs a set of checks on the codebase, allowing for easy local testing of CI runs.
//!
//! Adapted from [Bevy's CI runner](https://github.com/bevyengine/bevy/tree/main/tools/ci/src).
//! Local runs use whatever the default Rust toolchain is locally.

use std::process;

use bevy::utils::HashSet;
use itertools::Itertools;
use xshell::{cmd, Shell};

mod map_configs;

/// The checks that can be run in CI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Check {
    Format,
    Clippy,
    Test,
    DocTest,
    DocCheck,
    BenchCheck,
    MapConfigs,
}

impl Check {
    /// Every check, paired with the argument that selects it.
    const ALL: [(Check, &'static str); 7] = [
        (Check::Format, "format"),
        (Check::Clippy, "clippy"),
        (Check::Test, "test"),
        (Check::DocTest, "doctest"),
        (Check::DocCheck, "doccheck"),
        (Check::BenchCheck, "benchcheck"),
        (Check::MapConfigs, "configs"),
    ];

    /// Returns the complete set of checks.
    fn all() -> HashSet<Check> {
        Check::ALL.iter().map(|(check, _)| *check).collect()
    }

    /// Returns the argument that corresponds to this check.
    fn argument(&self) -> &'static str {
        Check::ALL
            .iter()
            .find(|(check, _)| check == self)
            .map(|(_, argument)| *argument)
            .unwrap_or_default()
    }

    /// Returns the [`Check`] that corresponds to the given argument.
    fn from_argument(argument: &str) -> Option<Check> {
        Check::ALL
            .iter()
            .find(|(_, name)| *name == argument)
            .map(|(check, _)| *check)
    }
}

/// Controls how clippy is run.
const CLIPPY_FLAGS: [&str; 3] = [
    "-Aclippy::type_complexity",
    "-Wclippy::doc_markdown",
    "-Dwarnings",
];

fn main() {
    let what_to_run = match std::env::args().nth(1) {
        Some(arg) => match Check::from_argument(&arg) {
            Some(check) => HashSet::from_iter([check]),
            None => {
                println!(
                    "Invalid argument: {arg}.\nEnter one of: {}.",
                    Check::ALL.iter().map(|(_, argument)| argument).join(", "),
                );
                process::exit(1);
            }
        },
        None => Check::all(),
    };

    let sh = Shell::new().unwrap();

    if what_to_run.contains(&Check::Format) {
        cmd!(sh, "cargo fmt --all -- --check")
            .run()
            .expect("Please run 'cargo fmt --all' to format your code.");
    }

    if what_to_run.contains(&Check::Clippy) {
        cmd!(sh, "cargo clippy --workspace --all-targets -- {CLIPPY_FLAGS...}")
            .run()
            .expect("Please fix clippy errors in output above.");
    }

    if what_to_run.contains(&Check::Test) {
        // Doc tests run separately
        cmd!(sh, "cargo test --workspace --lib --bins --tests")
            .run()
            .expect("Please fix failing tests in output above.");
    }

    if what_to_run.contains(&Check::DocTest) {
        cmd!(sh, "cargo test --workspace --doc")
            .run()
            .expect("Please fix failing doc-tests in output above.");
    }

    if what_to_run.contains(&Check::DocCheck) {
        std::env::set_var("RUSTDOCFLAGS", "-D warnings");
        cmd!(
            sh,
            "cargo doc --workspace --all-features --no-deps --document-private-items"
        )
        .run()
        .expect("Please fix doc warnings in output above.");
    }

    if what_to_run.contains(&Check::BenchCheck) {
        cmd!(sh, "cargo bench --workspace --no-run")
            .run()
            .expect("Please fix benchmark compiler errors in output above.");
    }

    if what_to_run.contains(&Check::MapConfigs) {
        let failures = map_configs::verify_map_configs(&sh);
        if !failures.is_empty() {
            for failure in &failures {
                println!("{failure}");
            }
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_from_argument_reverses() {
        for check in Check::all() {
            assert_eq!(Check::from_argument(check.argument()), Some(check));
        }
        assert_eq!(Check::from_argument("invalid"), None);
    }

    #[test]
    fn arguments_are_unique() {
        let arguments: HashSet<&str> = Check::ALL.iter().map(|(_, argument)| *argument).collect();
        assert_eq!(arguments.len(), Check::ALL.len());
    }
}
