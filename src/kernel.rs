//! Self-check kernels.
//!
//! A kernel seeds fixed input data, runs the scalar and the SIMD flavour of
//! one operation over it and reports whether both agree. The same hooks drive
//! repeated runs of either flavour.

use std::hint::black_box;

use crate::mat4::{scalar, simd, transform, Mat4};
use crate::math::Vec3f;

/// Default iteration count of a kernel run
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Scalar/SIMD comparison kernel
pub trait Kernel {
    /// Kernel name
    fn name(&self) -> &'static str;

    /// Seed input data, run both flavours once and compare results
    fn init(&mut self) -> bool;

    /// Run scalar flavour `n` times
    fn run_scalar(&mut self, n: usize);

    /// Run SIMD flavour `n` times
    fn run_simd(&mut self, n: usize);

    /// Check that results are still the same after the runs
    fn cleanup(&mut self) -> bool {
        self.init()
    }
}

/// Input data and latest result of one flavour
#[derive(Copy, Clone, Debug, Default)]
struct Lane<I, O> {
    input: I,
    output: O,
}

/// Generic, well-conditioned transform used as kernel input
fn seed_matrix() -> Mat4 {
    Mat4::from_rows_array([
        2.0, 0.5, -0.25, 3.0,
        -0.5, 1.5, 0.75, -2.0,
        0.25, -1.0, 2.5, 1.0,
        0.0, 0.125, 0.0, 1.0,
    ])
}

#[derive(Default)]
pub struct MultiplyKernel {
    scalar: Lane<(Mat4, Mat4), Mat4>,
    simd: Lane<(Mat4, Mat4), Mat4>,
}

impl Kernel for MultiplyKernel {
    fn name(&self) -> &'static str {
        "mat4_multiply"
    }

    fn init(&mut self) -> bool {
        let mut t1 = Mat4::zero();
        let mut t2 = Mat4::zero();
        for i in 0..4 {
            t1.set(i, i, 1.0);
            t2.set(i, i, 2.0);
        }

        self.scalar.input = (t1, t2);
        self.simd.input = (t1, t2);

        self.run_scalar(1);
        self.run_simd(1);

        self.scalar.input == self.simd.input && self.scalar.output == self.simd.output
    }

    fn run_scalar(&mut self, n: usize) {
        let (a, b) = &self.scalar.input;
        for _ in 0..n {
            black_box(scalar::multiply(&mut self.scalar.output, black_box(a), black_box(b)));
        }
    }

    fn run_simd(&mut self, n: usize) {
        let (a, b) = &self.simd.input;
        for _ in 0..n {
            black_box(simd::multiply(&mut self.simd.output, black_box(a), black_box(b)));
        }
    }
}

#[derive(Default)]
pub struct InverseKernel {
    scalar: Lane<Mat4, Mat4>,
    simd: Lane<Mat4, Mat4>,
}

impl Kernel for InverseKernel {
    fn name(&self) -> &'static str {
        "mat4_inverse"
    }

    fn init(&mut self) -> bool {
        self.scalar.input = seed_matrix();
        self.simd.input = seed_matrix();

        self.run_scalar(1);
        self.run_simd(1);

        scalar::are_equal(&self.scalar.output, &self.simd.output)
            && scalar::are_equal(&scalar::multiply_value(&self.scalar.input, &self.simd.output), &Mat4::identity())
    }

    fn run_scalar(&mut self, n: usize) {
        for _ in 0..n {
            black_box(scalar::inverse_cramer(&mut self.scalar.output, black_box(&self.scalar.input)));
        }
    }

    fn run_simd(&mut self, n: usize) {
        for _ in 0..n {
            black_box(simd::inverse_cramer(&mut self.simd.output, black_box(&self.simd.input)));
        }
    }
}

#[derive(Default)]
pub struct TransposeKernel {
    scalar: Lane<Mat4, Mat4>,
    simd: Lane<Mat4, Mat4>,
}

impl Kernel for TransposeKernel {
    fn name(&self) -> &'static str {
        "mat4_transpose"
    }

    fn init(&mut self) -> bool {
        let m = Mat4::from_cols_array(std::array::from_fn(|i| i as f32));
        self.scalar.input = m;
        self.simd.input = m;

        self.run_scalar(1);
        self.run_simd(1);

        self.scalar.output == self.simd.output && self.scalar.output.get(0, 1) == m.get(1, 0)
    }

    fn run_scalar(&mut self, n: usize) {
        for _ in 0..n {
            black_box(scalar::transpose(&mut self.scalar.output, black_box(&self.scalar.input)));
        }
    }

    fn run_simd(&mut self, n: usize) {
        for _ in 0..n {
            black_box(simd::transpose(&mut self.simd.output, black_box(&self.simd.input)));
        }
    }
}

/// Checks one identity and one almost-identity matrix
#[derive(Default)]
pub struct IsIdentityKernel {
    scalar: Lane<[Mat4; 2], [bool; 2]>,
    simd: Lane<[Mat4; 2], [bool; 2]>,
}

impl Kernel for IsIdentityKernel {
    fn name(&self) -> &'static str {
        "mat4_is_identity"
    }

    fn init(&mut self) -> bool {
        let mut almost = Mat4::identity();
        almost.set(3, 0, 0.5);

        self.scalar.input = [Mat4::identity(), almost];
        self.simd.input = [Mat4::identity(), almost];

        self.run_scalar(1);
        self.run_simd(1);

        self.scalar.output == [true, false] && self.scalar.output == self.simd.output
    }

    fn run_scalar(&mut self, n: usize) {
        for _ in 0..n {
            self.scalar.output = black_box(&self.scalar.input).each_ref().map(scalar::is_identity);
        }
    }

    fn run_simd(&mut self, n: usize) {
        for _ in 0..n {
            self.simd.output = black_box(&self.simd.input).each_ref().map(simd::is_identity);
        }
    }
}

/// Compares a matrix against a close and a distant copy
#[derive(Default)]
pub struct AreEqualKernel {
    scalar: Lane<[Mat4; 3], [bool; 2]>,
    simd: Lane<[Mat4; 3], [bool; 2]>,
}

impl Kernel for AreEqualKernel {
    fn name(&self) -> &'static str {
        "mat4_are_equal"
    }

    fn init(&mut self) -> bool {
        let base = seed_matrix();
        let close = Mat4::from_cols_array(base.data.map(|v| v + crate::mat4::EPSILON * 0.25));
        let distant = Mat4::from_cols_array(base.data.map(|v| v - 1.0));

        self.scalar.input = [base, close, distant];
        self.simd.input = [base, close, distant];

        self.run_scalar(1);
        self.run_simd(1);

        self.scalar.output == [true, false] && self.scalar.output == self.simd.output
    }

    fn run_scalar(&mut self, n: usize) {
        for _ in 0..n {
            let [base, close, distant] = black_box(&self.scalar.input);
            self.scalar.output = [scalar::are_equal(base, close), scalar::are_equal(base, distant)];
        }
    }

    fn run_simd(&mut self, n: usize) {
        for _ in 0..n {
            let [base, close, distant] = black_box(&self.simd.input);
            self.simd.output = [simd::are_equal(base, close), simd::are_equal(base, distant)];
        }
    }
}

#[derive(Default)]
pub struct LookAtKernel {
    scalar: Lane<[Vec3f; 3], Mat4>,
    simd: Lane<[Vec3f; 3], Mat4>,
}

impl Kernel for LookAtKernel {
    fn name(&self) -> &'static str {
        "mat4_look_at"
    }

    fn init(&mut self) -> bool {
        let input = [
            Vec3f::new(2.0, 3.0, 10.0),
            Vec3f::new(0.0, 1.0, 0.0),
            Vec3f::new(0.0, 1.0, 0.0),
        ];
        self.scalar.input = input;
        self.simd.input = input;

        self.run_scalar(1);
        self.run_simd(1);

        scalar::are_equal(&self.scalar.output, &self.simd.output)
    }

    fn run_scalar(&mut self, n: usize) {
        for _ in 0..n {
            let [eye, center, up] = black_box(&self.scalar.input);
            black_box(transform::look_at(&mut self.scalar.output, eye, center, up));
        }
    }

    fn run_simd(&mut self, n: usize) {
        for _ in 0..n {
            let [eye, center, up] = black_box(&self.simd.input);
            black_box(simd::look_at(&mut self.simd.output, eye, center, up));
        }
    }
}

#[derive(Default)]
pub struct TransformCoordKernel {
    scalar: Lane<(Vec3f, Mat4), Vec3f>,
    simd: Lane<(Vec3f, Mat4), Vec3f>,
}

impl Kernel for TransformCoordKernel {
    fn name(&self) -> &'static str {
        "vec3_transform_coord"
    }

    fn init(&mut self) -> bool {
        let input = (Vec3f::new(0.0, 1.0, 0.0), Mat4::identity());
        self.scalar.input = input;
        self.simd.input = input;

        self.run_scalar(1);
        self.run_simd(1);

        self.scalar.output == self.simd.output && self.scalar.output == input.0
    }

    fn run_scalar(&mut self, n: usize) {
        for _ in 0..n {
            let (v, m) = black_box(&self.scalar.input);
            black_box(scalar::transform_coord(&mut self.scalar.output, v, m));
        }
    }

    fn run_simd(&mut self, n: usize) {
        for _ in 0..n {
            let (v, m) = black_box(&self.simd.input);
            black_box(simd::transform_coord(&mut self.simd.output, v, m));
        }
    }
}

/// Every kernel, fresh state
pub fn all() -> Vec<Box<dyn Kernel>> {
    vec![
        Box::new(MultiplyKernel::default()),
        Box::new(InverseKernel::default()),
        Box::new(TransposeKernel::default()),
        Box::new(IsIdentityKernel::default()),
        Box::new(AreEqualKernel::default()),
        Box::new(LookAtKernel::default()),
        Box::new(TransformCoordKernel::default()),
    ]
}


// kernel.rs
