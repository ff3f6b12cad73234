//! Value types consumed by the matrix engine: vectors, quaternion, plane
//! and the 3x3 rotation block, plus the 4-lane float vector both engine
//! paths are written against.

use std::ops::{Add, AddAssign, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Rem, Sub, SubAssign};

/// Lane permutation table
pub mod lanes;

#[cfg(target_arch = "x86_64")]
mod f32x4_x86;

#[cfg(target_arch = "x86_64")]
pub use f32x4_x86::F32x4;

#[cfg(not(target_arch = "x86_64"))]
mod f32x4_fallback;

#[cfg(not(target_arch = "x86_64"))]
pub use f32x4_fallback::F32x4;

mod f32x4;

pub mod numeric_traits {
    pub trait Sqrt {
        fn sqrt(self) -> Self;
    }

    impl Sqrt for f32 {
        fn sqrt(self) -> Self {
            self.sqrt()
        }
    }

    impl Sqrt for f64 {
        fn sqrt(self) -> Self {
            self.sqrt()
        }
    }
}

macro_rules! consume_ident {
    ($type: ty, $i: ident) => { $type };
}

macro_rules! impl_vecn_base {
    ($struct_name: ident, $($x: ident),*) => {
        #[repr(C)]
        #[derive(Debug, Default, PartialEq)]
        pub struct $struct_name<T> {
            $( pub $x : T, )*
        }

        impl<T: Clone> Clone for $struct_name<T> {
            fn clone(&self) -> Self {
                Self {
                    $( $x: self.$x.clone() ),*
                }
            }
        }

        impl<T: Copy> Copy for $struct_name<T> {}

        impl<T> $struct_name<T> {
            pub const fn new($($x: T,)*) -> Self {
                Self { $($x,)* }
            }
        }

        impl<T> From<( $( consume_ident!(T, $x) ),* )> for $struct_name<T> {
            fn from(t: ( $( consume_ident!(T, $x) ),* )) -> Self {
                let ($($x),*) = t;

                Self { $($x),* }
            }
        }
    }
}

macro_rules! impl_vecn_binary_operator {
    ($op_name: ident, $op_fn_name: ident, $struct_name: ident, $($x: ident),*) => {
        impl<T: $op_name<Output = T>> $op_name<$struct_name<T>> for $struct_name<T> {
            type Output = $struct_name<T>;

            fn $op_fn_name(self, rhs: $struct_name<T>) -> Self::Output {
                Self::Output {
                    $( $x: $op_name::$op_fn_name(self.$x, rhs.$x), )*
                }
            }
        }

        impl<T: Clone + $op_name<Output = T>> $op_name<T> for $struct_name<T> {
            type Output = $struct_name<T>;

            fn $op_fn_name(self, rhs: T) -> Self::Output {
                Self::Output {
                    $( $x: $op_name::$op_fn_name(self.$x, rhs.clone()), )*
                }
            }
        }
    }
}

macro_rules! impl_vecn_assignment_operator {
    ($op_name: ident, $op_fn_name: ident, $struct_name: ident, $($x: ident),*) => {
        impl<T: $op_name> $op_name<$struct_name<T>> for $struct_name<T> {
            fn $op_fn_name(&mut self, rhs: $struct_name<T>) {
                $( $op_name::<T>::$op_fn_name(&mut self.$x, rhs.$x); )*
            }
        }

        impl<T: Clone + $op_name> $op_name<T> for $struct_name<T> {
            fn $op_fn_name(&mut self, rhs: T) {
                $( $op_name::<T>::$op_fn_name(&mut self.$x, rhs.clone()); )*
            }
        }
    }
}

macro_rules! operator_on_variadic {
    ($operator: tt, $first: expr) => {
        $first
    };

    ($operator: tt, $first: expr, $($rest: expr),*) => {
        $first $operator operator_on_variadic!($operator, $($rest),*)
    };
}

macro_rules! impl_vecn {
    ($struct_name: ident, $($x: ident),*) => {
        impl_vecn_base!($struct_name, $($x),*);

        impl<T: Add<T, Output = T> + Mul<T, Output = T>> BitXor for $struct_name<T> {
            type Output = T;

            fn bitxor(self, rhs: $struct_name<T>) -> Self::Output {
                self.dot(rhs)
            }
        }

        impl<T: Add<T, Output = T> + Mul<T, Output = T>> $struct_name<T> {
            pub fn dot(self, rhs: $struct_name<T>) -> T {
                operator_on_variadic!(+, $(self.$x * rhs.$x),*)
            }
        }

        impl<T: Add<T, Output = T> + Mul<T, Output = T> + Clone> $struct_name<T> {
            pub fn length2(&self) -> T {
                self.clone() ^ self.clone()
            }
        }

        impl<T: Add<T, Output = T> + Mul<T, Output = T> + Clone + numeric_traits::Sqrt> $struct_name<T> {
            pub fn length(&self) -> T {
                self.length2().sqrt()
            }
        }

        impl<T: Add<T, Output = T> + Mul<T, Output = T> + Div<T, Output = T> + Clone + numeric_traits::Sqrt> $struct_name<T> {
            pub fn normalized(&self) -> Self {
                let len = self.length();

                Self { $( $x: self.$x.clone() / len.clone() ),* }
            }

            pub fn normalize(&mut self) {
                let len = self.length();

                $( self.$x = self.$x.clone() / len.clone(); )*
            }
        }

        impl<T: Neg<Output = T>> Neg for $struct_name<T> {
            type Output = $struct_name<T>;

            fn neg(self) -> Self::Output {
                Self::Output {
                    $( $x: -self.$x, )*
                }
            }
        }

        impl_vecn_binary_operator!(Add, add, $struct_name, $($x),*);
        impl_vecn_binary_operator!(Sub, sub, $struct_name, $($x),*);
        impl_vecn_binary_operator!(Mul, mul, $struct_name, $($x),*);
        impl_vecn_binary_operator!(Div, div, $struct_name, $($x),*);

        impl_vecn_assignment_operator!(AddAssign, add_assign, $struct_name, $($x),*);
        impl_vecn_assignment_operator!(SubAssign, sub_assign, $struct_name, $($x),*);
        impl_vecn_assignment_operator!(MulAssign, mul_assign, $struct_name, $($x),*);
        impl_vecn_assignment_operator!(DivAssign, div_assign, $struct_name, $($x),*);
    }
}

impl_vecn!(Vec3, x, y, z);

pub type Vec3f = Vec3<f32>;

#[macro_export]
macro_rules! vec3f {
    ($x: expr, $y: expr, $z: expr $(,)?) => {
        $crate::math::Vec3f::new($x, $y, $z)
    };
}

impl<T: Clone + Mul<T, Output = T> + Sub<T, Output = T>> Vec3<T> {
    pub fn cross(self, rhs: Self) -> Vec3<T> {
        Vec3::<T> {
            x: self.y.clone() * rhs.z.clone() - self.z.clone() * rhs.y.clone(),
            y: self.z * rhs.x.clone() - self.x.clone() * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }
}

impl<T: Clone + Mul<T, Output = T> + Sub<T, Output = T>> Rem for Vec3<T> {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        self.cross(rhs)
    }
}

impl Vec3f {
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Normalized vector; a vector with zero squared length (exact zero or
    /// underflow) is returned as is
    pub fn normalized_or_zero(&self) -> Self {
        if self.length2() == 0.0 {
            *self
        } else {
            self.normalized()
        }
    }
}

/// 3x3 matrix, column-major: `data[row + 3 * col]`.
/// Only used as the rotation block of a 4x4 transform.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3f {
    pub data: [f32; 9],
}

unsafe impl bytemuck::Zeroable for Mat3f {}
unsafe impl bytemuck::AnyBitPattern for Mat3f {}
unsafe impl bytemuck::NoUninit for Mat3f {}

impl Mat3f {
    pub const fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0,
                0.0, 1.0, 0.0,
                0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn from_cols(c0: Vec3f, c1: Vec3f, c2: Vec3f) -> Self {
        Self {
            data: [
                c0.x, c0.y, c0.z,
                c1.x, c1.y, c1.z,
                c2.x, c2.y, c2.z,
            ],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row + 3 * col]
    }
}

impl Default for Mat3f {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotation quaternion
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quatf {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quatf {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Quaternion of rotation by `radians` around `axis` (axis is normalized here)
    pub fn from_axis_angle(axis: Vec3f, radians: f32) -> Self {
        let axis = axis.normalized_or_zero();
        let (sin, cos) = (radians * 0.5).sin_cos();

        Self {
            x: axis.x * sin,
            y: axis.y * sin,
            z: axis.z * sin,
            w: cos,
        }
    }

    /// Quaternion of a pure rotation matrix.
    /// Picks the largest of w, x, y, z to divide by, so near-180 degree
    /// rotations stay stable.
    pub fn from_rotation_matrix(m: &Mat3f) -> Self {
        let (m00, m01, m02) = (m.get(0, 0), m.get(0, 1), m.get(0, 2));
        let (m10, m11, m12) = (m.get(1, 0), m.get(1, 1), m.get(1, 2));
        let (m20, m21, m22) = (m.get(2, 0), m.get(2, 1), m.get(2, 2));

        let trace = m00 + m11 + m22;

        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;

            Self {
                x: (m21 - m12) / s,
                y: (m02 - m20) / s,
                z: (m10 - m01) / s,
                w: 0.25 * s,
            }
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;

            Self {
                x: 0.25 * s,
                y: (m01 + m10) / s,
                z: (m02 + m20) / s,
                w: (m21 - m12) / s,
            }
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;

            Self {
                x: (m01 + m10) / s,
                y: 0.25 * s,
                z: (m12 + m21) / s,
                w: (m02 - m20) / s,
            }
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;

            Self {
                x: (m02 + m20) / s,
                y: (m12 + m21) / s,
                z: 0.25 * s,
                w: (m10 - m01) / s,
            }
        }
    }

    /// Split unit quaternion into (axis, radians).
    /// Zero rotation reports the Z axis and zero angle.
    pub fn to_axis_angle(&self) -> (Vec3f, f32) {
        let scale = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();

        if scale <= f32::EPSILON {
            return (Vec3f::new(0.0, 0.0, 1.0), 0.0);
        }

        let radians = self.w.clamp(-1.0, 1.0).acos() * 2.0;
        let axis = Vec3f::new(self.x / scale, self.y / scale, self.z / scale);

        (axis, radians)
    }
}

impl Default for Quatf {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Plane in implicit form: a*x + b*y + c*z + d = 0
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Planef {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl Planef {
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Plane normal (not normalized unless the plane is)
    pub fn normal(&self) -> Vec3f {
        Vec3f::new(self.a, self.b, self.c)
    }

    /// Signed distance for a normalized plane
    pub fn distance(&self, point: Vec3f) -> f32 {
        self.normal().dot(point) + self.d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_of_basis_vectors() {
        let x = vec3f!(1.0, 0.0, 0.0);
        let y = vec3f!(0.0, 1.0, 0.0);

        assert_eq!(x % y, vec3f!(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), vec3f!(0.0, 0.0, -1.0));
    }

    #[test]
    fn zero_vector_normalization() {
        assert_eq!(Vec3f::zero().normalized_or_zero(), Vec3f::zero());

        // squared length underflows, vector is kept
        let tiny = vec3f!(1e-23, 0.0, 0.0);
        assert_eq!(tiny.normalized_or_zero(), tiny);

        let n = vec3f!(3.0, 0.0, 4.0).normalized_or_zero();
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn quaternion_axis_angle_round_trip() {
        let q = Quatf::from_axis_angle(vec3f!(0.0, 2.0, 0.0), 1.25);
        let (axis, radians) = q.to_axis_angle();

        assert!((radians - 1.25).abs() < 1e-5);
        assert!((axis - vec3f!(0.0, 1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn quaternion_of_half_turn() {
        // 180 degrees around X: trace is -1, so the x branch is taken
        let m = Mat3f::from_cols(
            vec3f!(1.0, 0.0, 0.0),
            vec3f!(0.0, -1.0, 0.0),
            vec3f!(0.0, 0.0, -1.0),
        );
        let q = Quatf::from_rotation_matrix(&m);

        assert!((q.x.abs() - 1.0).abs() < 1e-6);
        assert!(q.w.abs() < 1e-6);
    }

    #[test]
    fn identity_quaternion_has_no_rotation() {
        let (axis, radians) = Quatf::IDENTITY.to_axis_angle();

        assert_eq!(radians, 0.0);
        assert_eq!(axis, vec3f!(0.0, 0.0, 1.0));
    }
}

// math.rs
