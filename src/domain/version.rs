use crate::domain::directive::ReleaseDirective;
use crate::error::{ReleaseBumpError, Result};
use std::fmt;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a dotted `major.minor.patch` string.
    ///
    /// Each component must be a non-empty run of ASCII digits; signs, prefixes
    /// and whitespace are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseBumpError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                text
            )));
        }

        let major = parse_component(parts[0], "major")?;
        let minor = parse_component(parts[1], "minor")?;
        let patch = parse_component(parts[2], "patch")?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Bump version according to the release directive
    pub fn bump(&self, directive: ReleaseDirective) -> Result<Self> {
        let overflow = || ReleaseBumpError::version(format!("Cannot bump {}: overflow", self));
        match directive {
            ReleaseDirective::Minor => Ok(Version {
                major: self.major,
                minor: self.minor.checked_add(1).ok_or_else(overflow)?,
                patch: 0,
            }),
            ReleaseDirective::Patch => Ok(Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch.checked_add(1).ok_or_else(overflow)?,
            }),
        }
    }
}

fn parse_component(part: &str, name: &str) -> Result<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReleaseBumpError::version(format!(
            "Invalid {} version: '{}'",
            name, part
        )));
    }
    part.parse::<u32>()
        .map_err(|e| ReleaseBumpError::version(format!("Invalid {} version: '{}' ({})", name, part, e)))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
