//! Workflow facade over the configuration and file store.
//!
//! This is the seam between the CLI and the core pipelines: commands
//! construct one [Workspace] per invocation and call into it, keeping
//! argument parsing decoupled from version and fragment logic.

use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use semver::{Version, VersionReq};

use crate::changes::{load_changes, sort_changes};
use crate::config::{Config, FRAGMENT_EXT};
use crate::domain::{BumpSpec, Change};
use crate::error::Result;
use crate::store::FileStore;
use crate::versions::{parse_version, versions_from_entries};

/// One command invocation's view of the changes directory.
pub struct Workspace<'a, S: FileStore> {
    config: &'a Config,
    store: &'a S,
}

impl<'a, S: FileStore> Workspace<'a, S> {
    pub fn new(config: &'a Config, store: &'a S) -> Self {
        Workspace { config, store }
    }

    fn versions_dir(&self, project_key: &str) -> PathBuf {
        let mut dir = self.config.root_path();
        if !project_key.is_empty() {
            dir.push(project_key);
        }
        dir
    }

    /// All released versions for a scope, newest first.
    ///
    /// A missing changes directory is an empty set, not an error; any
    /// other listing failure propagates.
    pub fn all_versions(&self, skip_prereleases: bool, project_key: &str) -> Result<Vec<Version>> {
        let dir = self.versions_dir(project_key);

        let entries = match self.store.read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        Ok(versions_from_entries(
            &entries,
            &self.config.header_filename,
            skip_prereleases,
        ))
    }

    /// Latest released version for a scope, `0.0.0` when none exist.
    pub fn latest_version(&self, skip_prereleases: bool, project_key: &str) -> Result<Version> {
        let all = self.all_versions(skip_prereleases, project_key)?;
        Ok(all.into_iter().next().unwrap_or_else(|| Version::new(0, 0, 0)))
    }

    /// Compute the next version for a specifier string.
    ///
    /// Pending changes are only loaded when the specifier is `auto`;
    /// explicit versions and concrete keywords never touch fragments.
    pub fn next_version(
        &self,
        specifier: &str,
        prerelease: &[String],
        metadata: &[String],
        project_key: &str,
    ) -> Result<Version> {
        let spec = BumpSpec::from_str(specifier)?;

        let pending = match spec {
            BumpSpec::Auto => self.ordered_changes(&[], project_key)?,
            _ => Vec::new(),
        };

        let latest = self.latest_version(false, project_key)?;

        crate::resolver::next_version(
            &spec,
            &latest,
            &pending,
            &self.config.kinds,
            prerelease,
            metadata,
        )
    }

    /// Load and order all pending changes.
    pub fn ordered_changes(
        &self,
        search_dirs: &[String],
        project_key: &str,
    ) -> Result<Vec<Change>> {
        let mut changes = load_changes(self.store, self.config, search_dirs, project_key)?;
        sort_changes(&mut changes, self.config);
        Ok(changes)
    }

    /// Persist a change as a new fragment under the unreleased directory.
    ///
    /// The file name embeds the change's labels and timestamp; a numeric
    /// suffix disambiguates collisions within the same second.
    pub fn save_change(&self, change: &Change) -> Result<PathBuf> {
        let dir = self.config.root_path().join(&self.config.unreleased_dir);
        let stem = change.fragment_stem();

        let mut path = dir.join(format!("{}.{}", stem, FRAGMENT_EXT));
        let mut attempt = 1;
        while self.store.exists(&path) {
            path = dir.join(format!("{}-{}.{}", stem, attempt, FRAGMENT_EXT));
            attempt += 1;
        }

        self.store.write(&path, &change.to_yaml()?)?;

        Ok(path)
    }

    /// Resolve a version range expression into matching versions,
    /// newest first.
    ///
    /// Accepts a plain count (`2` is the two most recent versions), a
    /// `start...end` double-ended range (inclusive), or any comparator
    /// expression the semver requirement grammar supports (`>=1.2.0`).
    pub fn versions_in_range(
        &self,
        range: &str,
        skip_prereleases: bool,
        project_key: &str,
    ) -> Result<Vec<Version>> {
        let all = self.all_versions(skip_prereleases, project_key)?;

        if let Ok(count) = range.parse::<usize>() {
            return Ok(all.into_iter().take(count).collect());
        }

        let req = match range.split_once("...") {
            Some((start, end)) => {
                let low = parse_version(start)?;
                let high = parse_version(end)?;
                VersionReq::parse(&format!(">={}, <={}", low, high))?
            }
            None => VersionReq::parse(range)?,
        };

        Ok(all.into_iter().filter(|v| req.matches(v)).collect())
    }

    /// Path of the released version file for a version.
    pub fn version_file_path(&self, version: &Version, project_key: &str) -> PathBuf {
        self.versions_dir(project_key).join(format!(
            "{}{}.{}",
            self.config.version_prefix, version, self.config.version_ext
        ))
    }
}
