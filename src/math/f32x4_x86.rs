//! 4-lane float vector based on x86 SSE/SSE2 extension.
//! Both extensions are part of the x86_64 baseline, so no runtime
//! feature detection is needed.

#![allow(unused_unsafe)]

use std::arch::x86_64 as arch;

/// SIMD-based 4-component float vector
#[repr(transparent)]
#[derive(Copy, Clone)]
pub struct F32x4(arch::__m128);

impl F32x4 {
    /// Construct vector from 4 lanes, lane 0 first
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self(unsafe {
            arch::_mm_set_ps(w, z, y, x)
        })
    }

    /// Load vector from 4 consecutive floats
    pub fn load(src: &[f32; 4]) -> Self {
        Self(unsafe { arch::_mm_loadu_ps(src.as_ptr()) })
    }

    /// Store vector into 4 consecutive floats
    pub fn store(self, dst: &mut [f32; 4]) {
        unsafe { arch::_mm_storeu_ps(dst.as_mut_ptr(), self.0) }
    }

    /// Convert vector into array
    pub fn to_array(self) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        self.store(&mut out);
        out
    }

    /// Produce constant zero vector
    pub fn zero() -> Self {
        Self(unsafe { arch::_mm_setzero_ps() })
    }

    /// Construct vector from single number
    pub fn splat(v: f32) -> Self {
        Self(unsafe { arch::_mm_set1_ps(v) })
    }

    /// Get lane 0
    pub fn first(self) -> f32 {
        unsafe { arch::_mm_cvtss_f32(self.0) }
    }

    /// Reorder lanes of this vector by permutation mask (see `lanes`)
    pub fn swizzle<const MASK: i32>(self) -> Self {
        Self(unsafe { arch::_mm_shuffle_ps::<MASK>(self.0, self.0) })
    }

    /// Lanes 0 and 1 from `self`, lanes 2 and 3 from `other`, selected by mask (see `lanes`)
    pub fn shuffle<const MASK: i32>(self, other: F32x4) -> Self {
        Self(unsafe { arch::_mm_shuffle_ps::<MASK>(self.0, other.0) })
    }

    /// Per-lane square root
    pub fn sqrt(self) -> Self {
        Self(unsafe { arch::_mm_sqrt_ps(self.0) })
    }

    /// Bit `i` is set if lane `i` of `self` is less than lane `i` of `rhs`
    pub fn lt_mask(self, rhs: F32x4) -> u32 {
        unsafe { arch::_mm_movemask_ps(arch::_mm_cmplt_ps(self.0, rhs.0)) as u32 }
    }

    /// Bit `i` is set if lane `i` of `self` is greater than lane `i` of `rhs`
    pub fn gt_mask(self, rhs: F32x4) -> u32 {
        unsafe { arch::_mm_movemask_ps(arch::_mm_cmpgt_ps(self.0, rhs.0)) as u32 }
    }

    /// Bit `i` is set if lane `i` of `self` equals lane `i` of `rhs`
    pub fn eq_mask(self, rhs: F32x4) -> u32 {
        unsafe { arch::_mm_movemask_ps(arch::_mm_cmpeq_ps(self.0, rhs.0)) as u32 }
    }
}

impl std::fmt::Debug for F32x4 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("F32x4").field(&self.to_array()).finish()
    }
}

impl std::ops::Neg for F32x4 {
    type Output = F32x4;

    fn neg(self) -> Self::Output {
        // Sign bit flip, same result as scalar negation (including zeroes)
        Self(unsafe { arch::_mm_xor_ps(self.0, arch::_mm_set1_ps(-0.0)) })
    }
}

macro_rules! impl_binary_operator {
    ($op_trait_name: ident, $op_func_name: ident, $arch_func_name: ident) => {

        // vector-vector operation
        impl std::ops::$op_trait_name<F32x4> for F32x4 {
            type Output = F32x4;

            fn $op_func_name(self, rhs: F32x4) -> Self::Output {
                Self(unsafe { arch::$arch_func_name(self.0, rhs.0) })
            }
        }

        // vector-number operation
        impl std::ops::$op_trait_name<f32> for F32x4 {
            type Output = F32x4;

            fn $op_func_name(self, rhs: f32) -> Self::Output {
                Self(unsafe { arch::$arch_func_name(self.0, arch::_mm_set1_ps(rhs)) })
            }
        }
    };
}

impl_binary_operator!(Mul, mul, _mm_mul_ps);
impl_binary_operator!(Div, div, _mm_div_ps);
impl_binary_operator!(Add, add, _mm_add_ps);
impl_binary_operator!(Sub, sub, _mm_sub_ps);

// f32x4_x86.rs
