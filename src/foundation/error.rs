/// Convenience result type used across Postline.
pub type PostlineResult<T> = Result<T, PostlineError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant is fatal for the request that produced it. Recoverable conditions (font
/// fallback, text overflow) are reported as [`crate::CompositionWarning`] values instead.
#[derive(thiserror::Error, Debug)]
pub enum PostlineError {
    /// Background image is empty, undecodable or below the configured minimum size.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Unknown layout identifier or style values the engine cannot honor.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Rasterization failed (surface too large, buffer size mismatch, unusable font data).
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PostlineError {
    /// Build a [`PostlineError::InvalidImage`] value.
    pub fn invalid_image(msg: impl Into<String>) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Build a [`PostlineError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`PostlineError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PostlineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
