use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AutoLevel, CustomConfig};
use crate::error::{ChangekitError, Result};

/// Extension used by change fragment files.
pub const FRAGMENT_EXT: &str = "yaml";

/// Represents the complete configuration for changekit.
///
/// Directory layout, version formatting, and the ordered component /
/// kind lists. The order of `components` and `kinds` is meaningful:
/// array index is the sort priority used when ordering changes.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Directory for version files and the unreleased fragments,
    /// relative to the project root.
    #[serde(default = "default_root_dir")]
    pub root_dir: String,

    /// Directory under `root_dir` holding unreleased fragments.
    #[serde(default = "default_unreleased_dir")]
    pub unreleased_dir: String,

    /// Reserved header file name excluded from version discovery.
    #[serde(default = "default_header_filename")]
    pub header_filename: String,

    /// Extension of generated version files.
    #[serde(default = "default_version_ext")]
    pub version_ext: String,

    /// Prefix applied when formatting versions for files and output.
    #[serde(default = "default_version_prefix")]
    pub version_prefix: String,

    /// Separator between project key and version in CLI output.
    #[serde(default = "default_project_separator")]
    pub project_version_separator: String,

    /// Ordered component labels; empty disables the component field.
    #[serde(default)]
    pub components: Vec<String>,

    /// Ordered kind descriptors; empty disables kind validation.
    #[serde(default)]
    pub kinds: Vec<KindConfig>,

    /// Projects for monorepo scoping; empty disables the project field.
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,

    /// Declared custom metadata options for fragments.
    #[serde(default)]
    pub custom: Vec<CustomConfig>,
}

/// One configured change kind.
///
/// Position in the kind list is the ordering priority; `auto` is the
/// level this kind contributes during automatic bumping.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct KindConfig {
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto: Option<AutoLevel>,
}

/// One configured project for monorepo layouts.
///
/// Version files for a project live under `<root_dir>/<key>/`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub label: String,
    pub key: String,
}

fn default_root_dir() -> String {
    ".changes".to_string()
}

fn default_unreleased_dir() -> String {
    "unreleased".to_string()
}

fn default_header_filename() -> String {
    "header.tpl.md".to_string()
}

fn default_version_ext() -> String {
    "md".to_string()
}

fn default_version_prefix() -> String {
    "v".to_string()
}

fn default_project_separator() -> String {
    "_".to_string()
}

/// Returns the default kind list, keep-a-changelog style.
fn default_kinds() -> Vec<KindConfig> {
    ["Added", "Changed", "Deprecated", "Removed", "Fixed", "Security"]
        .into_iter()
        .map(|label| KindConfig {
            label: label.to_string(),
            auto: None,
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root_dir: default_root_dir(),
            unreleased_dir: default_unreleased_dir(),
            header_filename: default_header_filename(),
            version_ext: default_version_ext(),
            version_prefix: default_version_prefix(),
            project_version_separator: default_project_separator(),
            components: Vec::new(),
            kinds: default_kinds(),
            projects: Vec::new(),
            custom: Vec::new(),
        }
    }
}

impl Config {
    /// Root changes directory as a path.
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root_dir)
    }

    /// Whether a kind label is configured. Always true when the kind
    /// list is empty (the feature is disabled).
    pub fn has_kind(&self, label: &str) -> bool {
        self.kinds.is_empty() || self.kinds.iter().any(|k| k.label == label)
    }

    /// Resolve a project label or key to its key.
    ///
    /// With no projects configured the key is empty and any input is
    /// ignored. With projects configured the input is required and must
    /// match a label or key.
    pub fn project_key(&self, label_or_key: &str) -> Result<String> {
        if self.projects.is_empty() {
            return Ok(String::new());
        }

        if label_or_key.is_empty() {
            return Err(ChangekitError::config("project missing but required"));
        }

        self.projects
            .iter()
            .find(|p| p.label == label_or_key || p.key == label_or_key)
            .map(|p| p.key.clone())
            .ok_or_else(|| {
                ChangekitError::config(format!("project not found: '{}'", label_or_key))
            })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changekit.toml` in current directory
/// 3. `changekit.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./changekit.toml").exists() {
        fs::read_to_string("./changekit.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("changekit.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| ChangekitError::config(e.to_string()))?;
    Ok(config)
}
