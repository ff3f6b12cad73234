//! Transformation matrix builders.
//!
//! Every builder overwrites all 16 elements of `out`, whatever it held
//! before, and returns it.

use super::{scalar, Mat4};
use crate::error::{Mat4Error, Result};
use crate::math::{Mat3f, Quatf, Vec3f};

/// Rotation around the X axis
pub fn rotation_x(out: &mut Mat4, radians: f32) -> &mut Mat4 {
    let (sin, cos) = radians.sin_cos();

    *out = Mat4::from_cols_array([
        1.0, 0.0, 0.0, 0.0,
        0.0, cos, sin, 0.0,
        0.0, -sin, cos, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    out
}

/// Rotation around the Y axis
pub fn rotation_y(out: &mut Mat4, radians: f32) -> &mut Mat4 {
    let (sin, cos) = radians.sin_cos();

    *out = Mat4::from_cols_array([
        cos, 0.0, -sin, 0.0,
        0.0, 1.0, 0.0, 0.0,
        sin, 0.0, cos, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    out
}

/// Rotation around the Z axis
pub fn rotation_z(out: &mut Mat4, radians: f32) -> &mut Mat4 {
    let (sin, cos) = radians.sin_cos();

    *out = Mat4::from_cols_array([
        cos, sin, 0.0, 0.0,
        -sin, cos, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    out
}

/// Composed Euler rotation.
///
/// Result is the transpose of `Rz(roll) * Ry(yaw) * Rx(pitch)`, i.e. the
/// inverse of that rotation.
pub fn rotation_pitch_yaw_roll(out: &mut Mat4, pitch: f32, yaw: f32, roll: f32) -> &mut Mat4 {
    let (sp, cp) = pitch.sin_cos();
    let (sy, cy) = yaw.sin_cos();
    let (sr, cr) = roll.sin_cos();
    let sp_sy = sp * sy;
    let cp_sy = cp * sy;

    *out = Mat4::from_cols_array([
        cy * cr,
        sp_sy * cr - cp * sr,
        cp_sy * cr + sp * sr,
        0.0,

        cy * sr,
        sp_sy * sr + cp * cr,
        cp_sy * sr - sp * cr,
        0.0,

        -sy,
        sp * cy,
        cp * cy,
        0.0,

        0.0, 0.0, 0.0, 1.0,
    ]);
    out
}

/// Rotation from unit quaternion (normalization is not checked)
pub fn rotation_quaternion<'t>(out: &'t mut Mat4, q: &Quatf) -> &'t mut Mat4 {
    *out = Mat4::from_cols_array([
        1.0 - 2.0 * (q.y * q.y + q.z * q.z),
        2.0 * (q.x * q.y + q.z * q.w),
        2.0 * (q.x * q.z - q.y * q.w),
        0.0,

        2.0 * (q.x * q.y - q.z * q.w),
        1.0 - 2.0 * (q.x * q.x + q.z * q.z),
        2.0 * (q.z * q.y + q.x * q.w),
        0.0,

        2.0 * (q.x * q.z + q.y * q.w),
        2.0 * (q.y * q.z - q.x * q.w),
        1.0 - 2.0 * (q.x * q.x + q.y * q.y),
        0.0,

        0.0, 0.0, 0.0, 1.0,
    ]);
    out
}

/// Rotation block followed by translation
pub fn rotation_translation<'t>(out: &'t mut Mat4, rotation: &Mat3f, translation: &Vec3f) -> &'t mut Mat4 {
    let r = &rotation.data;

    *out = Mat4::from_cols_array([
        r[0], r[1], r[2], 0.0,
        r[3], r[4], r[5], 0.0,
        r[6], r[7], r[8], 0.0,
        translation.x, translation.y, translation.z, 1.0,
    ]);
    out
}

pub fn scaling(out: &mut Mat4, x: f32, y: f32, z: f32) -> &mut Mat4 {
    *out = Mat4::from_cols_array([
        x, 0.0, 0.0, 0.0,
        0.0, y, 0.0, 0.0,
        0.0, 0.0, z, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ]);
    out
}

pub fn translation(out: &mut Mat4, x: f32, y: f32, z: f32) -> &mut Mat4 {
    *out = Mat4::from_cols_array([
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        x, y, z, 1.0,
    ]);
    out
}

/// Rotation by `radians` around `axis` (Rodrigues' formula), axis doesn't need to be normalized
pub fn rotation_axis_angle<'t>(out: &'t mut Mat4, axis: &Vec3f, radians: f32) -> &'t mut Mat4 {
    let (sin, cos) = radians.sin_cos();
    let n = axis.normalized_or_zero();
    let k = 1.0 - cos;

    *out = Mat4::from_cols_array([
        cos + n.x * n.x * k,
        n.z * sin + n.y * n.x * k,
        -n.y * sin + n.z * n.x * k,
        0.0,

        -n.z * sin + n.x * n.y * k,
        cos + n.y * n.y * k,
        n.x * sin + n.z * n.y * k,
        0.0,

        n.y * sin + n.x * n.z * k,
        -n.x * sin + n.y * n.z * k,
        cos + n.z * n.z * k,
        0.0,

        0.0, 0.0, 0.0, 1.0,
    ]);
    out
}

/// Perspective projection in the manner of `gluPerspective`.
///
/// Fails if the depth range is empty, the field of view is a multiple of
/// 360 degrees or the aspect ratio is zero; `out` is untouched then.
pub fn perspective_projection(
    out: &mut Mat4,
    fov_y_degrees: f32,
    aspect: f32,
    z_near: f32,
    z_far: f32,
) -> Result<&mut Mat4> {
    let r = (fov_y_degrees / 2.0).to_radians();
    let delta_z = z_far - z_near;
    let (sin, cos) = r.sin_cos();

    if delta_z == 0.0 || sin == 0.0 || aspect == 0.0 {
        log::debug!("degenerate perspective: fov_y = {fov_y_degrees}, aspect = {aspect}, z = {z_near}..{z_far}");
        return Err(Mat4Error::DegenerateProjection {
            fov_y: fov_y_degrees,
            aspect,
            z_near,
            z_far,
        });
    }

    let cotangent = cos / sin;

    *out = Mat4::from_cols_array([
        cotangent / aspect, 0.0, 0.0, 0.0,
        0.0, cotangent, 0.0, 0.0,
        0.0, 0.0, -(z_far + z_near) / delta_z, -1.0,
        0.0, 0.0, -2.0 * z_near * z_far / delta_z, 0.0,
    ]);
    Ok(out)
}

/// Orthographic projection in the manner of `glOrtho`.
///
/// Empty ranges are not checked and produce infinite or NaN elements.
pub fn orthographic_projection(
    out: &mut Mat4,
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    near: f32,
    far: f32,
) -> &mut Mat4 {
    *out = Mat4::from_cols_array([
        2.0 / (right - left), 0.0, 0.0, 0.0,
        0.0, 2.0 / (top - bottom), 0.0, 0.0,
        0.0, 0.0, -2.0 / (far - near), 0.0,
        -((right + left) / (right - left)),
        -((top + bottom) / (top - bottom)),
        -((far + near) / (far - near)),
        1.0,
    ]);
    out
}

/// View matrix in the manner of `gluLookAt`.
///
/// Rotation rows are the side, recomputed up and negated forward
/// directions; the eye is moved to the origin before rotating.
pub fn look_at<'t>(out: &'t mut Mat4, eye: &Vec3f, center: &Vec3f, up: &Vec3f) -> &'t mut Mat4 {
    let f = (*center - *eye).normalized_or_zero();
    let up = up.normalized_or_zero();
    let s = f.cross(up).normalized_or_zero();
    let u = s.cross(f).normalized_or_zero();

    let mut rotation = Mat4::identity();
    rotation.data[0] = s.x;
    rotation.data[4] = s.y;
    rotation.data[8] = s.z;

    rotation.data[1] = u.x;
    rotation.data[5] = u.y;
    rotation.data[9] = u.z;

    rotation.data[2] = -f.x;
    rotation.data[6] = -f.y;
    rotation.data[10] = -f.z;

    let mut translate = Mat4::zero();
    translation(&mut translate, -eye.x, -eye.y, -eye.z);

    scalar::multiply(out, &translate, &rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mat4::{scalar::are_equal, scalar::multiply_value, simd};
    use std::f32::consts::{FRAC_PI_2, PI};

    fn garbage() -> Mat4 {
        Mat4::from_cols_array([f32::NAN; 16])
    }

    fn point(m: &Mat4, v: Vec3f) -> Vec3f {
        let mut out = Vec3f::zero();
        scalar::transform_coord(&mut out, &v, m);
        out
    }

    fn close(a: Vec3f, b: Vec3f) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn zero_rotation_is_identity() {
        let mut m = garbage();

        assert!(scalar::is_identity(rotation_x(&mut m, 0.0)));
        assert!(scalar::is_identity(rotation_y(&mut m, 0.0)));
        assert!(scalar::is_identity(rotation_z(&mut m, 0.0)));
        assert!(scalar::is_identity(rotation_pitch_yaw_roll(&mut m, 0.0, 0.0, 0.0)));
        assert!(scalar::is_identity(rotation_quaternion(&mut m, &Quatf::IDENTITY)));
        assert!(scalar::is_identity(rotation_axis_angle(&mut m, &Vec3f::new(0.0, 0.0, 1.0), 0.0)));
    }

    #[test]
    fn half_turn_around_x() {
        let mut m = garbage();
        rotation_x(&mut m, PI);

        assert!(close(m.col_vec3(1), Vec3f::new(0.0, -1.0, 0.0)));
        assert!(close(point(&m, Vec3f::new(0.0, 0.0, 1.0)), Vec3f::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn quarter_turns_are_counterclockwise() {
        let mut m = Mat4::zero();

        rotation_x(&mut m, FRAC_PI_2);
        assert!(close(point(&m, Vec3f::new(0.0, 1.0, 0.0)), Vec3f::new(0.0, 0.0, 1.0)));

        rotation_y(&mut m, FRAC_PI_2);
        assert!(close(point(&m, Vec3f::new(0.0, 0.0, 1.0)), Vec3f::new(1.0, 0.0, 0.0)));

        rotation_z(&mut m, FRAC_PI_2);
        assert!(close(point(&m, Vec3f::new(1.0, 0.0, 0.0)), Vec3f::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn pitch_yaw_roll_composition() {
        let (pitch, yaw, roll) = (0.3, 0.5, 0.7);
        let mut m = garbage();
        rotation_pitch_yaw_roll(&mut m, pitch, yaw, roll);

        let (mut rx, mut ry, mut rz) = (Mat4::zero(), Mat4::zero(), Mat4::zero());
        rotation_x(&mut rx, pitch);
        rotation_y(&mut ry, yaw);
        rotation_z(&mut rz, roll);

        let mut expected = multiply_value(&multiply_value(&rz, &ry), &rx);
        scalar::transpose_in_place(&mut expected);

        assert!(are_equal(&m, &expected));
        assert_eq!(&m.data[12..15], &[0.0; 3]);

        // orthonormal: transpose is the inverse
        let mut t = Mat4::zero();
        scalar::transpose(&mut t, &m);
        assert!(are_equal(&multiply_value(&m, &t), &Mat4::identity()));
    }

    #[test]
    fn quaternion_matches_axis_angle() {
        let axis = Vec3f::new(1.0, 2.0, -0.5);
        let mut from_quat = garbage();
        let mut from_axis = garbage();

        rotation_quaternion(&mut from_quat, &Quatf::from_axis_angle(axis.normalized(), 1.1));
        rotation_axis_angle(&mut from_axis, &axis, 1.1);

        assert!(are_equal(&from_quat, &from_axis));
    }

    #[test]
    fn rotation_translation_layout() {
        let mut rz = Mat4::zero();
        rotation_z(&mut rz, 0.4);

        let rotation = Mat3f::from_cols(rz.col_vec3(0), rz.col_vec3(1), rz.col_vec3(2));
        let mut m = garbage();
        rotation_translation(&mut m, &rotation, &Vec3f::new(1.0, 2.0, 3.0));

        let mut t = Mat4::zero();
        translation(&mut t, 1.0, 2.0, 3.0);
        assert_eq!(m, multiply_value(&t, &rz));
    }

    #[test]
    fn scaling_and_translation() {
        let mut m = garbage();

        scaling(&mut m, 2.0, 3.0, 4.0);
        assert_eq!(point(&m, Vec3f::new(1.0, 1.0, 1.0)), Vec3f::new(2.0, 3.0, 4.0));

        translation(&mut m, 2.0, 3.0, 4.0);
        assert_eq!(point(&m, Vec3f::new(1.0, 1.0, 1.0)), Vec3f::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn perspective_maps_depth_range() {
        let mut m = garbage();
        perspective_projection(&mut m, 90.0, 2.0, 1.0, 10.0).unwrap();

        assert!((m.get(1, 1) - 1.0).abs() < 1e-6);
        assert!((m.get(0, 0) - 0.5).abs() < 1e-6);
        assert_eq!(m.get(3, 2), -1.0);
        assert_eq!(m.get(3, 3), 0.0);

        assert!((point(&m, Vec3f::new(0.0, 0.0, -1.0)).z + 1.0).abs() < 1e-5);
        assert!((point(&m, Vec3f::new(0.0, 0.0, -10.0)).z - 1.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_perspective() {
        let mut m = Mat4::identity();

        assert_eq!(
            perspective_projection(&mut m, 60.0, 1.0, 5.0, 5.0),
            Err(Mat4Error::DegenerateProjection { fov_y: 60.0, aspect: 1.0, z_near: 5.0, z_far: 5.0 })
        );
        assert!(perspective_projection(&mut m, 60.0, 0.0, 1.0, 5.0).is_err());
        assert!(perspective_projection(&mut m, 0.0, 1.0, 1.0, 5.0).is_err());
        assert_eq!(m, Mat4::identity());
    }

    #[test]
    fn orthographic_maps_box_to_cube() {
        let mut m = garbage();
        orthographic_projection(&mut m, -2.0, 2.0, -1.0, 1.0, 1.0, 11.0);

        assert!(close(point(&m, Vec3f::new(2.0, 1.0, -11.0)), Vec3f::new(1.0, 1.0, 1.0)));
        assert!(close(point(&m, Vec3f::new(-2.0, -1.0, -1.0)), Vec3f::new(-1.0, -1.0, -1.0)));
    }

    #[test]
    fn look_at_down_negative_z() {
        let mut m = garbage();
        look_at(&mut m, &Vec3f::new(0.0, 0.0, 5.0), &Vec3f::zero(), &Vec3f::new(0.0, 1.0, 0.0));

        // forward row is -f = (0, 0, 1), eye is moved to the origin
        assert_eq!([m.get(2, 0), m.get(2, 1), m.get(2, 2)], [0.0, 0.0, 1.0]);
        assert_eq!(m.get(2, 3), -5.0);
        assert_eq!(point(&m, Vec3f::zero()), Vec3f::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn look_at_rotation_is_orthonormal() {
        let mut m = garbage();
        look_at(&mut m, &Vec3f::new(3.0, -2.0, 7.0), &Vec3f::new(-1.0, 4.0, 0.5), &Vec3f::new(0.2, 1.0, 0.1));

        let rows: [Vec3f; 3] = std::array::from_fn(|r| Vec3f::new(m.get(r, 0), m.get(r, 1), m.get(r, 2)));
        for (i, a) in rows.iter().enumerate() {
            assert!((a.length() - 1.0).abs() < 1e-5);
            for b in &rows[i + 1..] {
                assert!(a.dot(*b).abs() < 1e-5);
            }
        }

        let mut simd_out = garbage();
        simd::look_at(&mut simd_out, &Vec3f::new(3.0, -2.0, 7.0), &Vec3f::new(-1.0, 4.0, 0.5), &Vec3f::new(0.2, 1.0, 0.1));
        assert!(are_equal(&m, &simd_out));
    }
}

// transform.rs
