//! Version-control abstraction layer
//!
//! The release flow needs four operations from version control: a
//! working-tree status query and three mutations (create branch, stage,
//! commit). They sit behind the [Repository] trait so the flow can run
//! against:
//!
//! - [cli::CliRepository]: shells out to `git` through a [runner::CommandRunner]
//! - [repository::Git2Repository]: drives libgit2 in-process
//!
//! Tests substitute [mock::MockRunner] for the command runner.

pub mod cli;
pub mod mock;
pub mod repository;
pub mod runner;

pub use cli::CliRepository;
pub use mock::MockRunner;
pub use repository::Git2Repository;
pub use runner::{CommandOutput, CommandRunner, SystemRunner};

use crate::error::Result;
use std::path::Path;

/// Version-control operations used by a release
///
/// Mutating operations fail with
/// [ReleaseBumpError::CommandFailed](crate::error::ReleaseBumpError::CommandFailed)
/// (or a backend error) and perform no rollback of earlier steps.
pub trait Repository: Send + Sync {
    /// Report uncommitted changes in the working tree
    ///
    /// Returns `Ok(true)` when anything is modified, staged or untracked.
    fn has_uncommitted_changes(&self) -> Result<bool>;

    /// Create branch `name` at the current HEAD and switch to it
    fn create_branch(&self, name: &str) -> Result<()>;

    /// Stage a file, given relative to the working directory
    fn stage(&self, path: &Path) -> Result<()>;

    /// Commit the index with `message`
    fn commit(&self, message: &str) -> Result<()>;
}
