use crate::error::{ReleaseBumpError, Result};
use crate::git::runner::{command_line, CommandRunner};
use crate::git::Repository;
use std::path::Path;

/// [Repository] backed by the `git` executable
pub struct CliRepository<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> CliRepository<R> {
    pub fn new(runner: R) -> Self {
        CliRepository { runner }
    }

    /// The underlying runner, e.g. to inspect a mock after a run
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run a mutating git command, failing on any non-zero exit
    fn run_checked(&self, args: &[&str]) -> Result<()> {
        let output = self.runner.run("git", args)?;
        if !output.success() {
            return Err(ReleaseBumpError::command_failed(
                command_line("git", args),
                output.failure_detail(),
            ));
        }
        Ok(())
    }
}

impl<R: CommandRunner> Repository for CliRepository<R> {
    fn has_uncommitted_changes(&self) -> Result<bool> {
        let output = self.runner.run("git", &["status", "--short"])?;
        if !output.success() {
            // Only the listing matters here; a failing query reads as clean.
            tracing::warn!(detail = %output.failure_detail(), "git status reported an error");
        }
        Ok(!output.stdout.is_empty())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.run_checked(&["checkout", "-b", name])
    }

    fn stage(&self, path: &Path) -> Result<()> {
        let path = path.to_str().ok_or_else(|| {
            ReleaseBumpError::manifest(format!("Path is not valid UTF-8: {}", path.display()))
        })?;
        self.run_checked(&["add", path])
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run_checked(&["commit", "-m", message])
    }
}
