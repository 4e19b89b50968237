use crate::error::{ReleaseBumpError, Result};
use std::fmt;
use std::str::FromStr;

/// Which version component a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDirective {
    Minor,
    Patch,
}

impl ReleaseDirective {
    /// Resolve the optional command-line argument into a directive.
    ///
    /// Matching is exact and case-sensitive. A missing argument is reported
    /// the same way as an unknown one.
    pub fn from_arg(arg: Option<&str>) -> Result<Self> {
        match arg {
            Some(value) => value.parse(),
            None => Err(unexpected("None")),
        }
    }
}

fn unexpected(got: &str) -> ReleaseBumpError {
    ReleaseBumpError::invalid_argument(format!(
        "Expected release type (\"minor\" or \"patch\"), got {}",
        got
    ))
}

impl FromStr for ReleaseDirective {
    type Err = ReleaseBumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minor" => Ok(ReleaseDirective::Minor),
            "patch" => Ok(ReleaseDirective::Patch),
            other => Err(unexpected(&format!("'{}'", other))),
        }
    }
}

impl fmt::Display for ReleaseDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseDirective::Minor => write!(f, "minor"),
            ReleaseDirective::Patch => write!(f, "patch"),
        }
    }
}
