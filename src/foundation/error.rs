/// Convenience result type used across the crate.
pub type DistortResult<T> = Result<T, DistortError>;

/// Top-level error taxonomy used by transition, loader and renderer APIs.
#[derive(thiserror::Error, Debug)]
pub enum DistortError {
    /// Missing or invalid construction parameters.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A source image or displacement map could not be loaded or decoded.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// Drawing surface or rasterization failures.
    #[error("render error: {0}")]
    Render(String),

    /// Operation not valid in the current transition state.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DistortError {
    /// Build a [`DistortError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`DistortError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`DistortError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DistortError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build a [`DistortError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for [`DistortError::Configuration`].
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
