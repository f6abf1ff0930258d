pub type TransResult<T> = Result<T, TransError>;

/// Errors raised by the compositing entry points.
#[derive(thiserror::Error, Debug)]
pub enum TransError {
    /// Bad caller input: mismatched buffers, out-of-range samples, invalid settings.
    #[error("validation error: {0}")]
    Validation(String),

    /// A [`ColorTransform`](crate::ColorTransform) implementation failed.
    #[error("colour transform failure: {0}")]
    ColorTransform(#[source] anyhow::Error),

    /// Configuration (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, passed through unchanged.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TransError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn color_transform(err: anyhow::Error) -> Self {
        Self::ColorTransform(err)
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
