//! Released-version discovery.
//!
//! Released versions are stored as one file per version under the changes
//! directory (e.g. `v1.2.3.md`). Discovery is a pure function over a
//! directory listing: anything that is not a parsable version file is
//! silently ignored so arbitrary documentation or `.gitkeep` files can
//! live alongside version files.

use semver::Version;

use crate::error::Result;
use crate::store::DirEntry;

/// Parse a version string, accepting an optional leading 'v' or 'V' and
/// partial versions ("1.2" parses as 1.2.0).
pub fn parse_version(input: &str) -> Result<Version> {
    let trimmed = input.trim();
    let bare = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    if let Ok(version) = Version::parse(bare) {
        return Ok(version);
    }

    // Pad missing components, keeping any prerelease/build suffix intact.
    let (core, suffix) = match bare.find(|c: char| c == '-' || c == '+') {
        Some(idx) => bare.split_at(idx),
        None => (bare, ""),
    };

    let dots = core.chars().filter(|c| *c == '.').count();
    if core.is_empty() || dots >= 2 {
        // Not fixable by padding, surface the parser's error.
        return Ok(Version::parse(bare)?);
    }

    let padded = format!("{}{}{}", core, ".0".repeat(2 - dots), suffix);
    Ok(Version::parse(&padded)?)
}

/// Discover all released versions in a directory listing.
///
/// Directories and the reserved header file are skipped. The final
/// extension is stripped from each remaining name and the rest is parsed
/// as a semantic version; parse failures skip the entry rather than
/// erroring. When `skip_prereleases` is set, versions with a non-empty
/// prerelease component are dropped.
///
/// The result is sorted in descending semantic-version order, newest
/// first. An empty or fully-filtered listing yields an empty vec.
pub fn versions_from_entries(
    entries: &[DirEntry],
    header_filename: &str,
    skip_prereleases: bool,
) -> Vec<Version> {
    let mut versions = Vec::new();

    for entry in entries {
        if entry.is_dir || entry.name == header_filename {
            continue;
        }

        let stem = match entry.name.rsplit_once('.') {
            Some((stem, _ext)) => stem,
            None => entry.name.as_str(),
        };

        let version = match parse_version(stem) {
            Ok(version) => version,
            Err(_) => continue,
        };

        if skip_prereleases && !version.pre.is_empty() {
            continue;
        }

        versions.push(version);
    }

    versions.sort_unstable_by(|a, b| b.cmp(a));

    versions
}
