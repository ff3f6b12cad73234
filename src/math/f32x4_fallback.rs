//! 4-lane float vector on plain arrays, for targets without SSE.
//! Lane permutations decode the same masks the SSE path feeds to `shufps`.

use super::lanes;

/// Array-based 4-component float vector
#[repr(C, align(16))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct F32x4([f32; 4]);

impl F32x4 {
    /// Construct vector from 4 lanes, lane 0 first
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self([x, y, z, w])
    }

    /// Load vector from 4 consecutive floats
    pub fn load(src: &[f32; 4]) -> Self {
        Self(*src)
    }

    /// Store vector into 4 consecutive floats
    pub fn store(self, dst: &mut [f32; 4]) {
        *dst = self.0;
    }

    /// Convert vector into array
    pub fn to_array(self) -> [f32; 4] {
        self.0
    }

    /// Produce constant zero vector
    pub fn zero() -> Self {
        Self([0.0; 4])
    }

    /// Construct vector from single number
    pub fn splat(v: f32) -> Self {
        Self([v; 4])
    }

    /// Get lane 0
    pub fn first(self) -> f32 {
        self.0[0]
    }

    /// Reorder lanes of this vector by permutation mask (see `lanes`)
    pub fn swizzle<const MASK: i32>(self) -> Self {
        Self([0, 1, 2, 3].map(|i| self.0[lanes::lane(MASK, i)]))
    }

    /// Lanes 0 and 1 from `self`, lanes 2 and 3 from `other`, selected by mask (see `lanes`)
    pub fn shuffle<const MASK: i32>(self, other: F32x4) -> Self {
        Self([
            self.0[lanes::lane(MASK, 0)],
            self.0[lanes::lane(MASK, 1)],
            other.0[lanes::lane(MASK, 2)],
            other.0[lanes::lane(MASK, 3)],
        ])
    }

    /// Per-lane square root
    pub fn sqrt(self) -> Self {
        Self(self.0.map(f32::sqrt))
    }

    /// Bit `i` is set if lane `i` of `self` is less than lane `i` of `rhs`
    pub fn lt_mask(self, rhs: F32x4) -> u32 {
        Self::collect_mask(|i| self.0[i] < rhs.0[i])
    }

    /// Bit `i` is set if lane `i` of `self` is greater than lane `i` of `rhs`
    pub fn gt_mask(self, rhs: F32x4) -> u32 {
        Self::collect_mask(|i| self.0[i] > rhs.0[i])
    }

    /// Bit `i` is set if lane `i` of `self` equals lane `i` of `rhs`
    pub fn eq_mask(self, rhs: F32x4) -> u32 {
        Self::collect_mask(|i| self.0[i] == rhs.0[i])
    }

    fn collect_mask(predicate: impl Fn(usize) -> bool) -> u32 {
        (0..4).fold(0, |mask, i| mask | ((predicate(i) as u32) << i))
    }
}

impl std::ops::Neg for F32x4 {
    type Output = F32x4;

    fn neg(self) -> Self::Output {
        Self(self.0.map(|v| -v))
    }
}

macro_rules! impl_binary_operator {
    ($op_trait_name: ident, $op_func_name: ident) => {

        // vector-vector operation
        impl std::ops::$op_trait_name<F32x4> for F32x4 {
            type Output = F32x4;

            fn $op_func_name(self, rhs: F32x4) -> Self::Output {
                Self(std::array::from_fn(|i| std::ops::$op_trait_name::$op_func_name(self.0[i], rhs.0[i])))
            }
        }

        // vector-number operation
        impl std::ops::$op_trait_name<f32> for F32x4 {
            type Output = F32x4;

            fn $op_func_name(self, rhs: f32) -> Self::Output {
                Self(self.0.map(|v| std::ops::$op_trait_name::$op_func_name(v, rhs)))
            }
        }
    };
}

impl_binary_operator!(Mul, mul);
impl_binary_operator!(Div, div);
impl_binary_operator!(Add, add);
impl_binary_operator!(Sub, sub);

// f32x4_fallback.rs
