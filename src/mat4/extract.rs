//! Queries that pull vectors, rotation blocks and frustum planes out of a
//! transformation matrix.

use bitflags::bitflags;

use super::Mat4;
use crate::error::{Mat4Error, Result};
use crate::math::{Mat3f, Planef, Quatf, Vec3f};

/// Clipping frustum plane
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FrustumPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl FrustumPlane {
    /// All planes, in identifier order
    pub const ALL: [FrustumPlane; 6] = [
        Self::Left,
        Self::Right,
        Self::Bottom,
        Self::Top,
        Self::Near,
        Self::Far,
    ];

    /// Raw identifier, also index into [`extract_planes`] output
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-plane set
    pub fn flag(self) -> PlaneSet {
        PlaneSet::from_bits_truncate(1 << self.index())
    }
}

impl TryFrom<u32> for FrustumPlane {
    type Error = u32;

    fn try_from(value: u32) -> std::result::Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Left,
            1 => Self::Right,
            2 => Self::Bottom,
            3 => Self::Top,
            4 => Self::Near,
            5 => Self::Far,
            _ => return Err(value),
        })
    }
}

bitflags! {
    /// Set of frustum planes to extract
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PlaneSet: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const TOP = 1 << 3;
        const NEAR = 1 << 4;
        const FAR = 1 << 5;
        /// Side planes only, no depth clipping
        const SIDES = Self::LEFT.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits() | Self::TOP.bits();
        const ALL = Self::SIDES.bits() | Self::NEAR.bits() | Self::FAR.bits();
    }
}

impl Default for PlaneSet {
    fn default() -> Self {
        PlaneSet::ALL
    }
}

/// Normalized up direction (column 1)
pub fn get_up_vec3<'t>(out: &'t mut Vec3f, m: &Mat4) -> &'t mut Vec3f {
    *out = m.col_vec3(1).normalized_or_zero();
    out
}

/// Normalized right direction (column 0)
pub fn get_right_vec3<'t>(out: &'t mut Vec3f, m: &Mat4) -> &'t mut Vec3f {
    *out = m.col_vec3(0).normalized_or_zero();
    out
}

/// Normalized forward direction (column 2)
pub fn get_forward_vec3<'t>(out: &'t mut Vec3f, m: &Mat4) -> &'t mut Vec3f {
    *out = m.col_vec3(2).normalized_or_zero();
    out
}

/// Upper-left 3x3 block
pub fn extract_rotation<'t>(out: &'t mut Mat3f, m: &Mat4) -> &'t mut Mat3f {
    let d = &m.data;

    out.data = [
        d[0], d[1], d[2],
        d[4], d[5], d[6],
        d[8], d[9], d[10],
    ];
    out
}

/// Frustum plane of a projection (or view-projection) matrix.
/// Combines row 3 with the plane's axis row and normalizes the result.
pub fn extract_plane<'t>(out: &'t mut Planef, m: &Mat4, plane: FrustumPlane) -> &'t mut Planef {
    let row = |r: usize| [m.get(r, 0), m.get(r, 1), m.get(r, 2), m.get(r, 3)];
    let w = row(3);

    // (axis row, added to row 3 or subtracted from it)
    let (axis, add) = match plane {
        FrustumPlane::Left => (0, true),
        FrustumPlane::Right => (0, false),
        FrustumPlane::Bottom => (1, true),
        FrustumPlane::Top => (1, false),
        FrustumPlane::Near => (2, true),
        FrustumPlane::Far => (2, false),
    };
    let other = row(axis);
    let [a, b, c, d]: [f32; 4] = std::array::from_fn(|i| if add { w[i] + other[i] } else { w[i] - other[i] });

    let t = (a * a + b * b + c * c).sqrt();
    *out = Planef::new(a / t, b / t, c / t, d / t);
    out
}

/// [`extract_plane`] with a raw plane identifier (0 left, 1 right, 2 bottom,
/// 3 top, 4 near, 5 far); `out` is untouched for unknown identifiers.
pub fn extract_plane_index<'t>(out: &'t mut Planef, m: &Mat4, plane: u32) -> Result<&'t mut Planef> {
    let plane = FrustumPlane::try_from(plane).map_err(|id| {
        log::warn!("invalid frustum plane index {id}");
        Mat4Error::InvalidPlaneIndex(id)
    })?;

    Ok(extract_plane(out, m, plane))
}

/// Extract every plane in `set`, plane `p` goes to `out[p.index()]`.
/// Other entries are left as they are.
pub fn extract_planes(out: &mut [Planef; 6], m: &Mat4, set: PlaneSet) {
    for plane in FrustumPlane::ALL {
        if set.contains(plane.flag()) {
            extract_plane(&mut out[plane.index()], m, plane);
        }
    }
}

/// Rotation of the upper-left block as (axis, radians), axis goes to `out_axis`
pub fn rotation_to_axis_angle(out_axis: &mut Vec3f, m: &Mat4) -> f32 {
    let mut rotation = Mat3f::identity();
    extract_rotation(&mut rotation, m);

    let (axis, radians) = Quatf::from_rotation_matrix(&rotation).to_axis_angle();
    *out_axis = axis;
    radians
}


// extract.rs
