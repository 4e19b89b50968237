//! Main release workflow orchestration logic
//!
//! Runs the release as a strictly ordered pipeline:
//! read manifest, bump, guard the working tree, rewrite the manifest,
//! create branch, stage, commit. The first failure stops the pipeline and
//! nothing already done is undone.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::{ReleaseDirective, Version};
use crate::error::Result;
use crate::git::Repository;
use crate::manifest::{rewrite_manifest, Manifest};
use crate::ui::{self, Prompt};

/// Arguments for the release workflow
///
/// Mirrors the CLI arguments without depending on clap, so the workflow can
/// be driven programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRequest {
    pub directive: ReleaseDirective,

    /// Compute and report the plan, change nothing
    pub dry_run: bool,

    /// Continue over uncommitted changes without asking
    pub assume_yes: bool,
}

/// Everything a release will do, computed before any mutation
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    /// Version text exactly as it appears in the manifest
    pub current_raw: String,
    pub current: Version,
    pub bumped: Version,
    pub branch: String,
    /// Manifest path relative to the working directory
    pub manifest_path: PathBuf,
    pub commit_message: String,
}

/// How a release run ended when no error occurred
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// Manifest rewritten, branch created, change committed
    Committed(ReleasePlan),
    /// Operator declined to continue over uncommitted changes
    Declined,
    /// Dry run, nothing changed
    Planned(ReleasePlan),
}

/// Reads the current version and computes the bumped one.
///
/// Reports the current version as soon as it is parsed, so it is shown even
/// when the bump itself fails.
pub fn plan_release(
    directive: ReleaseDirective,
    config: &Config,
    root: &Path,
) -> Result<ReleasePlan> {
    let manifest = Manifest::load(root.join(&config.manifest_path))?;
    let current = manifest.version(&config.version_key)?;
    ui::display_current_version(&current.raw);

    let bumped = current.version.bump(directive)?;
    ui::display_bumped_version(&bumped.to_string());

    Ok(ReleasePlan {
        branch: config.branch_name(&bumped.to_string()),
        current_raw: current.raw,
        current: current.version,
        bumped,
        manifest_path: config.manifest_path.clone(),
        commit_message: config.commit_message.clone(),
    })
}

/// Main release workflow
///
/// # Arguments
///
/// * `request` - Validated directive and run options
/// * `config` - Release configuration
/// * `root` - Directory the manifest path is relative to
/// * `repo` - Version-control backend
/// * `prompt` - Asked only when the working tree has uncommitted changes
pub fn run_release<G, P>(
    request: &ReleaseRequest,
    config: &Config,
    root: &Path,
    repo: &G,
    prompt: &P,
) -> Result<ReleaseOutcome>
where
    G: Repository + ?Sized,
    P: Prompt + ?Sized,
{
    let plan = plan_release(request.directive, config, root)?;
    tracing::info!(
        current = %plan.current_raw,
        bumped = %plan.bumped,
        directive = %request.directive,
        "computed release version"
    );

    if request.dry_run {
        return Ok(ReleaseOutcome::Planned(plan));
    }

    if repo.has_uncommitted_changes()? {
        if request.assume_yes {
            tracing::warn!("continuing over uncommitted changes");
        } else if !ui::confirm_uncommitted_changes(prompt)? {
            tracing::info!("release declined by operator");
            return Ok(ReleaseOutcome::Declined);
        }
    }

    rewrite_manifest(
        &root.join(&plan.manifest_path),
        &plan.current_raw,
        &plan.bumped.to_string(),
        config.rewrite,
        &config.version_key,
    )?;
    ui::display_success(&format!(
        "Updated {} to {}",
        plan.manifest_path.display(),
        plan.bumped
    ));

    repo.create_branch(&plan.branch)?;
    ui::display_success(&format!("Switched to new branch {}", plan.branch));

    repo.stage(&plan.manifest_path)?;
    ui::display_status(&format!("Staged {}", plan.manifest_path.display()));

    repo.commit(&plan.commit_message)?;
    ui::display_success(&format!("Committed \"{}\"", plan.commit_message));

    Ok(ReleaseOutcome::Committed(plan))
}
