//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use crate::cli::orchestration::ReleasePlan;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Display the version found in the manifest.
pub fn display_current_version(current: &str) {
    println!("Current version: \x1b[31m{}\x1b[0m", current);
}

/// Display the version the release will carry.
pub fn display_bumped_version(bumped: &str) {
    println!("Bumped version:  \x1b[32m{}\x1b[0m", bumped);
}

/// Display what a release would do without doing it.
pub fn display_dry_run(plan: &ReleasePlan) {
    println!("\n\x1b[1mDry run, nothing will be changed:\x1b[0m");
    for (i, step) in plan_steps(plan).iter().enumerate() {
        println!("  Step {}: {}", i + 1, step);
    }
}

/// Human-readable list of the mutations a plan performs, in order.
pub fn plan_steps(plan: &ReleasePlan) -> Vec<String> {
    vec![
        format!(
            "rewrite {} ({} -> {})",
            plan.manifest_path.display(),
            plan.current_raw,
            plan.bumped
        ),
        format!("create and switch to branch {}", plan.branch),
        format!("stage {}", plan.manifest_path.display()),
        format!("commit with message \"{}\"", plan.commit_message),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Version;
    use std::path::PathBuf;

    #[test]
    fn test_plan_steps() {
        let plan = ReleasePlan {
            current_raw: "2.3.1".to_string(),
            current: Version::new(2, 3, 1),
            bumped: Version::new(2, 3, 2),
            branch: "release-2.3.2".to_string(),
            manifest_path: PathBuf::from("src/manifest.json"),
            commit_message: "chore: bump version".to_string(),
        };
        assert_eq!(
            plan_steps(&plan),
            vec![
                "rewrite src/manifest.json (2.3.1 -> 2.3.2)",
                "create and switch to branch release-2.3.2",
                "stage src/manifest.json",
                "commit with message \"chore: bump version\"",
            ]
        );
    }
}
