/// Convenience result type used across vitrine.
pub type VitrineResult<T> = Result<T, VitrineError>;

/// Top-level error taxonomy used by the motion core.
///
/// Controllers never surface these to the page: load and sampling failures are absorbed where
/// they happen. Errors only escape from construction-time APIs (config, layout inputs) and from
/// sinks.
#[derive(thiserror::Error, Debug)]
pub enum VitrineError {
    /// Invalid caller-provided data (viewport, content, layout inputs).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable motion configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Image could not be loaded, decoded or sampled.
    #[error("sampling error: {0}")]
    Sampling(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VitrineError {
    /// Build a [`VitrineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VitrineError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`VitrineError::Sampling`] value.
    pub fn sampling(msg: impl Into<String>) -> Self {
        Self::Sampling(msg.into())
    }

    /// Build a [`VitrineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for VitrineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
