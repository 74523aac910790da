/// Convenience result type used across spritegraph.
pub type SpriteResult<T> = Result<T, SpriteError>;

/// Top-level error taxonomy used by scene, path and encoding APIs.
#[derive(thiserror::Error, Debug)]
pub enum SpriteError {
    /// A source image or background could not be read or decoded.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// Requested output image format or video container is not supported.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Anchor set cannot be fitted (repeated abscissa).
    #[error("degenerate anchor set: {0}")]
    DegenerateAnchorSet(String),

    /// Invalid user-provided values (scale, fps, sizes, configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while encoding images or driving the external encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing scene descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteError {
    /// Build a [`SpriteError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`SpriteError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`SpriteError::DegenerateAnchorSet`] value.
    pub fn degenerate_anchors(msg: impl Into<String>) -> Self {
        Self::DegenerateAnchorSet(msg.into())
    }

    /// Build a [`SpriteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpriteError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SpriteError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
