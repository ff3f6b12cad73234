//! Single-precision 4x4 matrix engine with interchangeable scalar and SIMD
//! implementations.
//!
//! Matrices are column-major ([`mat4::Mat4`]); each operation writes into a
//! caller-provided output and returns it. [`mat4::Engine`] picks the
//! implementation at run time, [`kernel`] checks both against each other.

/// Error types
pub mod error;

/// Basic math utility
pub mod math;

/// Matrix engine
pub mod mat4;

/// Scalar/SIMD self-check kernels
pub mod kernel;

pub use error::{Mat4Error, Result};
pub use mat4::{Backend, Engine, Mat4, EPSILON};

// lib.rs
