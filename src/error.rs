use thiserror::Error;

/// Top-level error type for spiral mesh generation.
#[derive(Debug, Error)]
pub enum SpiralMeshError {
    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid parameter {parameter}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// Errors related to per-vertex attribute synthesis.
#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("uv count {uvs} does not match vertex count {vertices}")]
    UvCountMismatch { uvs: usize, vertices: usize },

    #[error("index {index} is out of bounds for {vertices} vertices")]
    IndexOutOfBounds { index: u32, vertices: usize },
}

/// Errors related to configuration documents.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid surface config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`SpiralMeshError`].
pub type Result<T> = std::result::Result<T, SpiralMeshError>;
