use crate::error::Result;
use git2::{Commit, Repository as Git2Repo, Signature, StatusOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Identity used for commits when no `user.name`/`user.email` is configured
const FALLBACK_NAME: &str = "release-bump";
const FALLBACK_EMAIL: &str = "release-bump@localhost";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
    root: PathBuf,
}

impl Git2Repository {
    /// Open the repository containing `path`
    ///
    /// Relative paths later passed to [stage](super::Repository::stage) are
    /// resolved against `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let repo = Git2Repo::discover(&root)?;

        Ok(Git2Repository {
            repo: Mutex::new(repo),
            root,
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Git2Repo>> {
        self.repo
            .lock()
            .map_err(|_| git2::Error::from_str("repository lock poisoned").into())
    }

    /// Path of `path` relative to the repository work tree
    fn workdir_relative(&self, repo: &Git2Repo, path: &Path) -> Result<PathBuf> {
        let workdir = repo
            .workdir()
            .ok_or_else(|| git2::Error::from_str("cannot stage files in a bare repository"))?;
        let absolute = self.root.join(path).canonicalize()?;
        let workdir = workdir.canonicalize()?;
        let relative = absolute.strip_prefix(&workdir).map_err(|_| {
            git2::Error::from_str(&format!(
                "{} is outside the work tree {}",
                absolute.display(),
                workdir.display()
            ))
        })?;
        Ok(relative.to_path_buf())
    }
}

impl super::Repository for Git2Repository {
    fn has_uncommitted_changes(&self) -> Result<bool> {
        let repo = self.lock()?;
        let mut options = StatusOptions::new();
        options.include_untracked(true).include_ignored(false);

        let statuses = repo.statuses(Some(&mut options))?;
        tracing::debug!(entries = statuses.len(), "working tree status");
        Ok(!statuses.is_empty())
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        let repo = self.lock()?;
        let head = repo.head()?.peel_to_commit()?;
        repo.branch(name, &head, false)?;
        repo.set_head(&format!("refs/heads/{}", name))?;
        Ok(())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        let repo = self.lock()?;
        let relative = self.workdir_relative(&repo, path)?;
        let mut index = repo.index()?;
        index.add_path(&relative)?;
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let repo = self.lock()?;
        let mut index = repo.index()?;
        let tree = repo.find_tree(index.write_tree()?)?;
        let signature = match repo.signature() {
            Ok(signature) => signature,
            Err(e) => {
                tracing::warn!("no git identity configured ({}), using fallback", e);
                Signature::now(FALLBACK_NAME, FALLBACK_EMAIL)?
            }
        };

        let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&Commit> = parent.iter().collect();

        let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        tracing::info!(%oid, "created commit");
        Ok(())
    }
}
