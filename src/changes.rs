//! Fragment loading and deterministic ordering.
//!
//! Loading is a fan-out over the search directories through the
//! [FileStore] collaborator: list, filter to fragment files, parse each.
//! One malformed fragment aborts the whole load — silently skipping it
//! would drop a contributor's recorded change.

use std::cmp::Ordering;

use crate::config::{Config, KindConfig, FRAGMENT_EXT};
use crate::domain::Change;
use crate::error::{ChangekitError, Result};
use crate::store::FileStore;

/// Load all change fragments from the search directories.
///
/// Each directory is relative to the changes root; the unreleased
/// directory is always searched in addition to `search_dirs`. Fragments
/// whose `project` does not match a non-empty `project_key` are filtered
/// out silently. When kinds are configured, a fragment with an
/// unrecognized kind fails the entire load.
pub fn load_changes<S: FileStore>(
    store: &S,
    config: &Config,
    search_dirs: &[String],
    project_key: &str,
) -> Result<Vec<Change>> {
    let mut paths = Vec::new();
    let fragment_suffix = format!(".{}", FRAGMENT_EXT);

    let mut dirs: Vec<&str> = search_dirs.iter().map(String::as_str).collect();
    dirs.push(&config.unreleased_dir);

    for dir in dirs {
        let root = config.root_path().join(dir);

        for entry in store.read_dir(&root)? {
            if entry.is_dir || !entry.name.ends_with(&fragment_suffix) {
                continue;
            }

            paths.push(root.join(&entry.name));
        }
    }

    let mut changes = Vec::new();

    for path in paths {
        let raw = store.read_to_string(&path)?;
        let mut change = Change::from_yaml(&raw)?;
        change.filename = Some(path);

        if !project_key.is_empty() && change.project.as_deref() != Some(project_key) {
            continue;
        }

        if !config.kinds.is_empty() {
            let kind = change.kind.clone().unwrap_or_default();
            if !config.kinds.iter().any(|k| k.label == kind) {
                return Err(ChangekitError::KindNotFound(kind));
            }
        }

        changes.push(change);
    }

    Ok(changes)
}

/// Sort changes into their rendering order.
///
/// Components sort by index in the configured list, then kinds by index
/// in theirs, then oldest first. Labels missing from a configured list
/// compare equal at that tier and fall through to the next.
pub fn sort_changes(changes: &mut [Change], config: &Config) {
    changes.sort_by(|a, b| compare_changes(a, b, &config.components, &config.kinds));
}

fn compare_changes(
    a: &Change,
    b: &Change,
    components: &[String],
    kinds: &[KindConfig],
) -> Ordering {
    if !components.is_empty() && a.component != b.component {
        let index_of =
            |label: &Option<String>| components.iter().position(|c| Some(c) == label.as_ref());

        match (index_of(&a.component), index_of(&b.component)) {
            (Some(left), Some(right)) => return left.cmp(&right),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => {}
        }
    }

    if !kinds.is_empty() && a.kind != b.kind {
        let index_of =
            |label: &Option<String>| kinds.iter().position(|k| Some(&k.label) == label.as_ref());

        match (index_of(&a.kind), index_of(&b.kind)) {
            (Some(left), Some(right)) => return left.cmp(&right),
            (Some(_), None) => return Ordering::Less,
            (None, Some(_)) => return Ordering::Greater,
            (None, None) => {}
        }
    }

    a.time.cmp(&b.time)
}
