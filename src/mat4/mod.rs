//! 4x4 single-precision matrix engine.
//!
//! Matrices are stored column-major: element at (row, col) lives at
//! `data[row + 4 * col]`, so every column is one 16-byte aligned group of
//! four floats. Every operation exists in a [`scalar`] and a [`simd`]
//! flavour with the same contract; [`Engine`] dispatches to one of them.

use crate::error::{Mat4Error, Result};
use crate::math::{Planef, Vec3f};

pub mod extract;
pub mod scalar;
pub mod simd;
pub mod transform;

pub use extract::{FrustumPlane, PlaneSet};

/// Tolerance of [`scalar::are_equal`] and [`simd::are_equal`]
pub const EPSILON: f32 = 1.0 / 64.0;

/// Column-major 4x4 float matrix
#[repr(C, align(16))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

unsafe impl bytemuck::Zeroable for Mat4 {}
unsafe impl bytemuck::AnyBitPattern for Mat4 {}
unsafe impl bytemuck::NoUninit for Mat4 {}

impl Mat4 {
    /// All-zero matrix
    pub const fn zero() -> Self {
        Self { data: [0.0; 16] }
    }

    /// Identity matrix
    pub const fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Construct matrix from 16 column-major elements
    pub const fn from_cols_array(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Construct matrix from row-major elements (reads like the matrix is written on paper)
    pub fn from_rows_array(rows: [f32; 16]) -> Self {
        Self {
            data: std::array::from_fn(|i| rows[crate::math::lanes::TRANSPOSE[i]]),
        }
    }

    /// Element at (row, col)
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row + 4 * col]
    }

    /// Set element at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row + 4 * col] = value;
    }

    /// Swap two elements
    pub fn swap(&mut self, (r1, c1): (usize, usize), (r2, c2): (usize, usize)) {
        self.data.swap(r1 + 4 * c1, r2 + 4 * c2);
    }

    /// Columns as four 4-element groups
    pub fn cols(&self) -> &[[f32; 4]; 4] {
        bytemuck::cast_ref(&self.data)
    }

    /// Mutable columns
    pub fn cols_mut(&mut self) -> &mut [[f32; 4]; 4] {
        bytemuck::cast_mut(&mut self.data)
    }

    /// Column `index` as vector (W dropped)
    pub fn col_vec3(&self, index: usize) -> Vec3f {
        let [x, y, z, _] = self.cols()[index];
        Vec3f::new(x, y, z)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(data: [f32; 16]) -> Self {
        Self { data }
    }
}

impl From<Mat4> for [f32; 16] {
    fn from(m: Mat4) -> Self {
        m.data
    }
}

/// Implementation flavour
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Plain element-wise arithmetic
    Scalar,

    /// 4-lane column arithmetic
    Simd,
}

impl Backend {
    /// Environment variable read by [`Backend::from_env`]
    pub const ENV_VAR: &'static str = "FMAT4_BACKEND";

    /// Backend named by `FMAT4_BACKEND`, default one if the variable is not set
    pub fn from_env() -> Result<Self> {
        match std::env::var(Self::ENV_VAR) {
            Ok(name) => name.parse(),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Lowercase backend name
    pub fn name(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Simd => "simd",
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(feature = "simd") {
            Self::Simd
        } else {
            Self::Scalar
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = Mat4Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(Self::Scalar),
            "simd" => Ok(Self::Simd),
            _ => Err(Mat4Error::UnknownBackend(s.to_string())),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Operation set bound to one backend
///
/// Operations that only have a scalar form (builders, extraction) are
/// reachable through [`transform`] and [`extract`] directly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Engine {
    backend: Backend,
}

impl Engine {
    pub fn new(backend: Backend) -> Self {
        log::debug!("matrix engine uses {backend} backend");
        Self { backend }
    }

    /// Engine with backend selected by `FMAT4_BACKEND`
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Backend::from_env()?))
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn identity<'t>(&self, out: &'t mut Mat4) -> &'t mut Mat4 {
        match self.backend {
            Backend::Scalar => scalar::identity(out),
            Backend::Simd => simd::identity(out),
        }
    }

    pub fn is_identity(&self, m: &Mat4) -> bool {
        match self.backend {
            Backend::Scalar => scalar::is_identity(m),
            Backend::Simd => simd::is_identity(m),
        }
    }

    pub fn assign<'t>(&self, out: &'t mut Mat4, m: &Mat4) -> &'t mut Mat4 {
        match self.backend {
            Backend::Scalar => scalar::assign(out, m),
            Backend::Simd => simd::assign(out, m),
        }
    }

    pub fn are_equal(&self, a: &Mat4, b: &Mat4) -> bool {
        match self.backend {
            Backend::Scalar => scalar::are_equal(a, b),
            Backend::Simd => simd::are_equal(a, b),
        }
    }

    pub fn transpose<'t>(&self, out: &'t mut Mat4, m: &Mat4) -> &'t mut Mat4 {
        match self.backend {
            Backend::Scalar => scalar::transpose(out, m),
            Backend::Simd => simd::transpose(out, m),
        }
    }

    /// `out = B * A`, see [`scalar::multiply`]
    pub fn multiply<'t>(&self, out: &'t mut Mat4, a: &Mat4, b: &Mat4) -> &'t mut Mat4 {
        match self.backend {
            Backend::Scalar => scalar::multiply(out, a, b),
            Backend::Simd => simd::multiply(out, a, b),
        }
    }

    /// `A * B`, see [`scalar::multiply_value`]
    pub fn multiply_value(&self, a: &Mat4, b: &Mat4) -> Mat4 {
        match self.backend {
            Backend::Scalar => scalar::multiply_value(a, b),
            Backend::Simd => simd::multiply_value(a, b),
        }
    }

    /// Unchecked cofactor inverse, singular input gives inf/NaN elements
    pub fn inverse_cramer<'t>(&self, out: &'t mut Mat4, m: &Mat4) -> &'t mut Mat4 {
        match self.backend {
            Backend::Scalar => scalar::inverse_cramer(out, m),
            Backend::Simd => simd::inverse_cramer(out, m),
        }
    }

    /// Checked inverse. The scalar backend eliminates with full pivoting,
    /// the SIMD backend expands cofactors and checks the determinant.
    pub fn inverse<'t>(&self, out: &'t mut Mat4, m: &Mat4) -> Result<&'t mut Mat4> {
        match self.backend {
            Backend::Scalar => scalar::inverse(out, m),
            Backend::Simd => simd::inverse_cramer_checked(out, m),
        }
    }

    pub fn look_at<'t>(&self, out: &'t mut Mat4, eye: &Vec3f, center: &Vec3f, up: &Vec3f) -> &'t mut Mat4 {
        match self.backend {
            Backend::Scalar => transform::look_at(out, eye, center, up),
            Backend::Simd => simd::look_at(out, eye, center, up),
        }
    }

    /// Transform point by matrix, divide by resulting W
    pub fn transform_coord<'t>(&self, out: &'t mut Vec3f, v: &Vec3f, m: &Mat4) -> &'t mut Vec3f {
        match self.backend {
            Backend::Scalar => scalar::transform_coord(out, v, m),
            Backend::Simd => simd::transform_coord(out, v, m),
        }
    }

    /// Every frustum plane selected by `set`, see [`extract::extract_planes`]
    pub fn extract_planes(&self, out: &mut [Planef; 6], m: &Mat4, set: PlaneSet) {
        extract::extract_planes(out, m, set);
    }
}


// mod.rs
