use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::{ChangekitError, Result};
use crate::versions::parse_version;

/// Which semantic version component to increment.
///
/// Ordered by severity so reductions over many changes can use plain
/// comparison: `Patch < Minor < Major`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BumpLevel {
    Patch,
    Minor,
    Major,
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpLevel::Major => write!(f, "major"),
            BumpLevel::Minor => write!(f, "minor"),
            BumpLevel::Patch => write!(f, "patch"),
        }
    }
}

/// Bump level a kind contributes during automatic version resolution.
///
/// `none` is a deliberate no-op: the kind is recognized but never raises
/// the resulting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoLevel {
    Major,
    Minor,
    Patch,
    None,
}

impl AutoLevel {
    /// The chargeable bump level, if any.
    pub fn bump_level(self) -> Option<BumpLevel> {
        match self {
            AutoLevel::Major => Some(BumpLevel::Major),
            AutoLevel::Minor => Some(BumpLevel::Minor),
            AutoLevel::Patch => Some(BumpLevel::Patch),
            AutoLevel::None => None,
        }
    }
}

/// A parsed next-version specifier.
///
/// Either an explicit version (used as-is), a concrete bump keyword, or
/// `auto` which derives the level from the pending changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpSpec {
    Explicit(Version),
    Level(BumpLevel),
    Auto,
}

impl FromStr for BumpSpec {
    type Err = ChangekitError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(version) = parse_version(s) {
            return Ok(BumpSpec::Explicit(version));
        }

        match s {
            "major" => Ok(BumpSpec::Level(BumpLevel::Major)),
            "minor" => Ok(BumpSpec::Level(BumpLevel::Minor)),
            "patch" => Ok(BumpSpec::Level(BumpLevel::Patch)),
            "auto" => Ok(BumpSpec::Auto),
            _ => Err(ChangekitError::BadVersionOrPart),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_level_severity_order() {
        assert!(BumpLevel::Patch < BumpLevel::Minor);
        assert!(BumpLevel::Minor < BumpLevel::Major);
    }

    #[test]
    fn test_bump_level_display() {
        assert_eq!(BumpLevel::Major.to_string(), "major");
        assert_eq!(BumpLevel::Minor.to_string(), "minor");
        assert_eq!(BumpLevel::Patch.to_string(), "patch");
    }

    #[test]
    fn test_auto_level_bump_level() {
        assert_eq!(AutoLevel::Major.bump_level(), Some(BumpLevel::Major));
        assert_eq!(AutoLevel::None.bump_level(), None);
    }

    #[test]
    fn test_spec_parse_keywords() {
        assert_eq!(
            "major".parse::<BumpSpec>().unwrap(),
            BumpSpec::Level(BumpLevel::Major)
        );
        assert_eq!(
            "minor".parse::<BumpSpec>().unwrap(),
            BumpSpec::Level(BumpLevel::Minor)
        );
        assert_eq!(
            "patch".parse::<BumpSpec>().unwrap(),
            BumpSpec::Level(BumpLevel::Patch)
        );
        assert_eq!("auto".parse::<BumpSpec>().unwrap(), BumpSpec::Auto);
    }

    #[test]
    fn test_spec_parse_explicit_version() {
        let spec = "v1.2.3".parse::<BumpSpec>().unwrap();
        assert_eq!(spec, BumpSpec::Explicit(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_spec_parse_explicit_partial_version() {
        let spec = "v1.2".parse::<BumpSpec>().unwrap();
        assert_eq!(spec, BumpSpec::Explicit(Version::new(1, 2, 0)));
    }

    #[test]
    fn test_spec_parse_invalid() {
        let err = "---asdf---".parse::<BumpSpec>().unwrap_err();
        assert!(matches!(err, ChangekitError::BadVersionOrPart));
    }
}
