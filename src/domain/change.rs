use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Time layout embedded in fragment file names, second precision.
const FILENAME_TIME_FORMAT: &str = "%Y%m%d-%H%M%S";

/// One atomic pending or historical change.
///
/// Fragments are persisted as YAML, one change per file. `time` is
/// required: it is the final ordering tie-break and names the fragment
/// file. The creation clock is injected by the caller so tests stay
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    /// Project of our change, if one was provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Component of our change, if one was provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    /// Kind of our change, if one was provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Body message of our change.
    #[serde(default)]
    pub body: String,

    /// When our change was made.
    pub time: DateTime<Utc>,

    /// Custom values keyed by the configured custom option keys.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, String>,

    /// Path the change was loaded from, never serialized.
    #[serde(skip)]
    pub filename: Option<PathBuf>,
}

impl Change {
    /// Create a new change stamped with the provided clock value.
    pub fn new(
        project: Option<String>,
        component: Option<String>,
        kind: Option<String>,
        body: String,
        custom: BTreeMap<String, String>,
        now: DateTime<Utc>,
    ) -> Self {
        Change {
            project,
            component,
            kind,
            body,
            time: now,
            custom,
            filename: None,
        }
    }

    /// Parse a change from YAML fragment content.
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Serialize the change to YAML fragment content.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// File stem for this change's fragment:
    /// `{project-}{component-}{kind-}YYYYMMDD-HHMMSS`.
    pub fn fragment_stem(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();

        for label in [&self.project, &self.component, &self.kind] {
            if let Some(label) = label.as_deref() {
                if !label.is_empty() {
                    parts.push(label);
                }
            }
        }

        let timestamp = self.time.format(FILENAME_TIME_FORMAT).to_string();

        if parts.is_empty() {
            timestamp
        } else {
            format!("{}-{}", parts.join("-"), timestamp)
        }
    }
}
