//! Next-version resolution.
//!
//! Pure version math: no clock, no filesystem. Identical inputs always
//! produce the identical output version.

use semver::{BuildMetadata, Prerelease, Version};

use crate::analyzer::BumpAnalyzer;
use crate::config::KindConfig;
use crate::domain::{BumpLevel, BumpSpec, Change};
use crate::error::Result;

/// Bump a version at the given level.
///
/// Lower-order components reset to zero. A patch bump of a prerelease
/// promotes it to its release instead of incrementing, matching the
/// increment semantics of the semver tooling this replaces.
pub fn bump_version(version: &Version, level: BumpLevel) -> Version {
    match level {
        BumpLevel::Major => Version::new(version.major + 1, 0, 0),
        BumpLevel::Minor => Version::new(version.major, version.minor + 1, 0),
        BumpLevel::Patch => {
            if version.pre.is_empty() {
                Version::new(version.major, version.minor, version.patch + 1)
            } else {
                Version::new(version.major, version.minor, version.patch)
            }
        }
    }
}

/// Compute the next version for a parsed specifier.
///
/// Explicit versions pass through untouched; bump keywords increment
/// `latest`; `auto` derives its level from the pending changes via
/// [BumpAnalyzer]. Prerelease and metadata labels are then joined with
/// `.` and attached, surfacing the semver parser's error on invalid
/// grammar.
pub fn next_version(
    spec: &BumpSpec,
    latest: &Version,
    pending: &[Change],
    kinds: &[KindConfig],
    prerelease: &[String],
    metadata: &[String],
) -> Result<Version> {
    let mut next = match spec {
        BumpSpec::Explicit(version) => version.clone(),
        BumpSpec::Level(level) => bump_version(latest, *level),
        BumpSpec::Auto => {
            let level = BumpAnalyzer::new(kinds).highest_auto_level(pending)?;
            bump_version(latest, level)
        }
    };

    if !prerelease.is_empty() {
        next.pre = Prerelease::new(&prerelease.join("."))?;
    }

    if !metadata.is_empty() {
        next.build = BuildMetadata::new(&metadata.join("."))?;
    }

    Ok(next)
}
