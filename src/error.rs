use thiserror::Error;

/// Unified error type for changekit operations
#[derive(Error, Debug)]
pub enum ChangekitError {
    #[error("part string is not a supported version or version increment")]
    BadVersionOrPart,

    #[error("kind not found but configuration expects one: '{0}'")]
    KindNotFound(String),

    #[error("kind config missing auto level value for auto bumping")]
    MissingAutoLevel,

    #[error("no unreleased changes found for automatic bumping")]
    NoChangesForAuto,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Custom value error: {0}")]
    Custom(String),

    #[error("Version parsing error: {0}")]
    Semver(#[from] semver::Error),

    #[error("Fragment parsing error: {0}")]
    Fragment(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in changekit
pub type Result<T> = std::result::Result<T, ChangekitError>;

impl ChangekitError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangekitError::Config(msg.into())
    }

    /// Create a custom value error with context
    pub fn custom(msg: impl Into<String>) -> Self {
        ChangekitError::Custom(msg.into())
    }
}
