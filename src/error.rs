//! Error types of the matrix engine

use thiserror::Error;

/// Matrix engine errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Mat4Error {
    /// Matrix has no inverse (zero pivot or zero determinant)
    #[error("singular matrix")]
    SingularMatrix,

    /// Perspective projection with zero depth range, zero field of view or zero aspect
    #[error("degenerate projection: fov_y = {fov_y}, aspect = {aspect}, z_near = {z_near}, z_far = {z_far}")]
    DegenerateProjection {
        fov_y: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    },

    /// Raw frustum plane identifier outside of 0..=5
    #[error("invalid frustum plane index: {0}")]
    InvalidPlaneIndex(u32),

    /// Backend name is neither `scalar` nor `simd`
    #[error("unknown backend: {0}")]
    UnknownBackend(String),
}

/// Result type for matrix engine operations
pub type Result<T> = std::result::Result<T, Mat4Error>;

// error.rs
