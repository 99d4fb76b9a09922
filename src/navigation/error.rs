use thiserror::Error;

/// Errors surfaced by navigation, page creation and view-model wiring.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// A required argument was missing or blank
    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Page with key '{0}' is not registered")]
    UnregisteredKey(String),

    #[error("Failed to create instance of page type '{type_name}': {source}")]
    InstantiationFailed {
        type_name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to create instance of view model type '{type_name}': {source}")]
    ViewModelInstantiationFailed {
        type_name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Page with key '{0}' not found in navigation stack")]
    TargetNotFound(String),

    #[error("Path '{0}' must contain at least one page segment")]
    EmptyPath(String),

    #[error("Navigation not available: {0}")]
    NavigationUnavailable(String),

    /// The host stack primitive (push/pop/pop-to-root) reported a failure
    #[error("Host navigation stack failed: {0}")]
    Host(#[source] anyhow::Error),
}

impl NavigationError {
    pub(crate) fn blank(name: &'static str) -> Self {
        NavigationError::InvalidArgument {
            name,
            reason: "cannot be empty".to_string(),
        }
    }
}

pub type Result<T, E = NavigationError> = std::result::Result<T, E>;

/// Fails with `InvalidArgument` when `value` is empty or whitespace only.
pub(crate) fn require_non_blank(name: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NavigationError::blank(name));
    }
    Ok(())
}
