/// Crate-wide result alias.
pub type GlitchResult<T> = Result<T, GlitchError>;

/// Errors raised while loading configuration or preparing inputs.
///
/// The animation runtime itself never fails; these only surface at the edges
/// (configuration files, CLI arguments, serialization).
#[derive(thiserror::Error, Debug)]
pub enum GlitchError {
    /// A value violated a documented invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A configuration file could not be read or understood.
    #[error("config error: {0}")]
    Config(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlitchError {
    /// Build a [`GlitchError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlitchError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GlitchError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GlitchError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
