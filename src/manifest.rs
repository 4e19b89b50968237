//! Manifest access: read the declared version and rewrite it in place.
//!
//! The manifest is parsed as JSON only to find the version. Rewrites work on
//! the raw text so formatting, key order and whitespace survive untouched.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde_json::Value;

use crate::config::RewriteMode;
use crate::domain::Version;
use crate::error::{ReleaseBumpError, Result};

/// The version declared by a manifest, as written and as parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestVersion {
    /// Exact text of the version field, used for substitution.
    pub raw: String,
    pub version: Version,
}

/// A manifest file loaded into memory.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    content: String,
}

impl Manifest {
    /// Reads the whole manifest as text.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ReleaseBumpError::manifest(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Ok(Manifest {
            path: path.to_path_buf(),
            content,
        })
    }

    pub fn from_content(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Manifest {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Looks up the top-level string member `key` and parses it as a version.
    pub fn version(&self, key: &str) -> Result<ManifestVersion> {
        let parsed: Value = serde_json::from_str(&self.content)?;
        let raw = match parsed.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(ReleaseBumpError::manifest(format!(
                    "'{}' in {} is not a string: {}",
                    key,
                    self.path.display(),
                    other
                )))
            }
            None => {
                return Err(ReleaseBumpError::manifest(format!(
                    "{} has no top-level '{}' field",
                    self.path.display(),
                    key
                )))
            }
        };
        let version = Version::parse(&raw)?;
        Ok(ManifestVersion { raw, version })
    }

    /// Produces the rewritten text without touching the file.
    ///
    /// Returns the new content and the number of substitutions made.
    pub fn replace_version(
        &self,
        old: &str,
        new: &str,
        mode: RewriteMode,
        key: &str,
    ) -> Result<(String, usize)> {
        let (content, count) = match mode {
            RewriteMode::AllOccurrences => {
                let count = self.content.matches(old).count();
                (self.content.replace(old, new), count)
            }
            RewriteMode::VersionField => {
                match self.replace_top_level_field(old, new, key)? {
                    Some(content) => (content, 1),
                    None => (self.content.clone(), 0),
                }
            }
        };

        if count == 0 {
            return Err(ReleaseBumpError::manifest(format!(
                "Version text '{}' not found in {}",
                old,
                self.path.display()
            )));
        }
        Ok((content, count))
    }

    /// Rewrites the `key` member that JSON parsing sees at the top level.
    ///
    /// Each textual `"key": "old"` match is tried in order; a candidate is
    /// kept only if the top-level member reads `new` afterwards, so nested
    /// members with the same name are left alone.
    fn replace_top_level_field(
        &self,
        old: &str,
        new: &str,
        key: &str,
    ) -> Result<Option<String>> {
        let re = version_field_regex(key, old)?;
        let mut matched = false;

        for caps in re.captures_iter(&self.content) {
            matched = true;
            let (Some(whole), Some(prefix)) = (caps.get(0), caps.name("prefix")) else {
                continue;
            };
            let candidate = format!(
                "{}{}{}\"{}",
                &self.content[..whole.start()],
                prefix.as_str(),
                new,
                &self.content[whole.end()..]
            );
            let parsed: Value = serde_json::from_str(&candidate)?;
            if parsed.get(key).and_then(Value::as_str) == Some(new) {
                return Ok(Some(candidate));
            }
            tracing::debug!(offset = whole.start(), "skipping nested '{}' member", key);
        }

        if matched {
            return Err(ReleaseBumpError::manifest(format!(
                "No top-level '{}' member with value '{}' in {}",
                key,
                old,
                self.path.display()
            )));
        }
        Ok(None)
    }
}

fn version_field_regex(key: &str, old: &str) -> Result<Regex> {
    let pattern = format!(
        r#"(?P<prefix>"{}"\s*:\s*"){}""#,
        regex::escape(key),
        regex::escape(old)
    );
    Regex::new(&pattern).map_err(|e| ReleaseBumpError::manifest(e.to_string()))
}

/// Rewrites the manifest at `path`, replacing `old` with `new`.
///
/// With [`RewriteMode::AllOccurrences`] every occurrence of the old version
/// text is replaced, including ones outside the version field.
pub fn rewrite_manifest(
    path: &Path,
    old: &str,
    new: &str,
    mode: RewriteMode,
    key: &str,
) -> Result<usize> {
    let manifest = Manifest::load(path)?;
    let (content, count) = manifest.replace_version(old, new, mode, key)?;
    if count > 1 {
        tracing::warn!(
            count,
            old,
            path = %path.display(),
            "version text occurs more than once, all occurrences replaced"
        );
    }
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), old, new, "manifest rewritten");
    Ok(count)
}
