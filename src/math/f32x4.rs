//! Lane operations shared by every `F32x4` backend.
//! Built only from swizzles, shuffles and lane arithmetic, so they produce
//! the same bits whichever backend is compiled in.

use super::{lanes, F32x4, Vec3f};

impl F32x4 {
    /// Construct vector from X, Y and Z, W is zeroed
    pub fn from_vec3(v: Vec3f) -> Self {
        Self::new(v.x, v.y, v.z, 0.0)
    }

    /// X, Y and Z lanes as vector
    pub fn to_vec3(self) -> Vec3f {
        let [x, y, z, _] = self.to_array();
        Vec3f::new(x, y, z)
    }

    /// Sum of all four lanes, broadcast to every lane.
    /// Adds across halves first, then across pairs.
    pub fn splat_sum(self) -> Self {
        let halves = self.swizzle::<{ lanes::SWAP_HALVES }>() + self;

        halves.swizzle::<{ lanes::SWAP_PAIRS }>() + halves
    }

    /// x*x' + (y*y' + z*z'), broadcast to every lane
    pub fn dot3_splat(self, rhs: F32x4) -> Self {
        let product = self * rhs;
        let rest = product.swizzle::<{ lanes::ROTATE_XYZ_LEFT }>() + product.swizzle::<{ lanes::ROTATE_XYZ_RIGHT }>();

        (product + rest).swizzle::<{ lanes::BROADCAST_X }>()
    }

    /// Normalize XYZ part; zero squared length (exact zero or underflow) is kept as is
    pub fn normalized3(self) -> Self {
        let length2 = self.dot3_splat(self);

        if length2.first() == 0.0 {
            self
        } else {
            self / length2.sqrt()
        }
    }

    /// 3-dimensional cross product of self.xyz and rhs.xyz, W is zeroed for finite input
    pub fn cross(self, othr: F32x4) -> F32x4 {
        // 3 shuffles, 2 products and 1 substraction
        let tmp0 = self.swizzle::<{ lanes::ROTATE_XYZ_LEFT }>();
        let tmp1 = othr.swizzle::<{ lanes::ROTATE_XYZ_RIGHT }>();
        let tmp2 = tmp0 * othr;
        let tmp3 = tmp0 * tmp1;
        let tmp4 = tmp2.swizzle::<{ lanes::ROTATE_XYZ_LEFT }>();

        tmp3 - tmp4
    }

    /// Linear combination `cols[0] * w.x + cols[1] * w.y + cols[2] * w.z + cols[3] * w.w`,
    /// summed left to right. This is one output column of a column-major 4x4 product.
    pub fn combine_columns(cols: &[F32x4; 4], weights: F32x4) -> Self {
        let mut sum = cols[0] * weights.swizzle::<{ lanes::BROADCAST_X }>();
        sum = sum + cols[1] * weights.swizzle::<{ lanes::BROADCAST_Y }>();
        sum = sum + cols[2] * weights.swizzle::<{ lanes::BROADCAST_Z }>();
        sum + cols[3] * weights.swizzle::<{ lanes::BROADCAST_W }>()
    }
}
