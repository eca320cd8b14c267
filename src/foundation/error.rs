/// Convenience result type used across chalkline.
pub type ChalkResult<T> = Result<T, ChalkError>;

/// Top-level error taxonomy used by crate APIs.
#[derive(thiserror::Error, Debug)]
pub enum ChalkError {
    /// Invalid geometric input (non-positive radius, odd sector count).
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Structural storyboard defects caught before any rendering.
    #[error("storyboard error: {0}")]
    Storyboard(String),

    /// The external renderer could not execute a step; aborts the run.
    #[error("renderer failure: {0}")]
    Renderer(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChalkError {
    /// Build a [`ChalkError::InvalidGeometry`] value.
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Build a [`ChalkError::Storyboard`] value.
    pub fn storyboard(msg: impl Into<String>) -> Self {
        Self::Storyboard(msg.into())
    }

    /// Build a [`ChalkError::Renderer`] value.
    pub fn renderer(msg: impl Into<String>) -> Self {
        Self::Renderer(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
