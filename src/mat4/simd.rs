//! Column-wise implementation of the matrix operations on [`F32x4`].
//!
//! A matrix is handled as four column vectors. Products and comparisons use
//! the same per-element arithmetic as [`super::scalar`], so multiplication,
//! transposition, equality and point transformation give the same bits in
//! both implementations. The cofactor inverse groups its arithmetic
//! differently and agrees with the scalar one within [`super::EPSILON`].

use super::{Mat4, EPSILON};
use crate::error::{Mat4Error, Result};
use crate::math::{lanes, F32x4, Vec3f};

fn load_cols(m: &Mat4) -> [F32x4; 4] {
    m.cols().each_ref().map(F32x4::load)
}

fn store_cols(out: &mut Mat4, cols: [F32x4; 4]) {
    for (dst, col) in out.cols_mut().iter_mut().zip(cols) {
        col.store(dst);
    }
}

/// 4x4 transpose by two rounds of interleave shuffles
fn transpose_cols([c0, c1, c2, c3]: [F32x4; 4]) -> [F32x4; 4] {
    let t0 = c0.shuffle::<{ lanes::LOW_HALVES }>(c1);
    let t1 = c2.shuffle::<{ lanes::LOW_HALVES }>(c3);
    let t2 = c0.shuffle::<{ lanes::HIGH_HALVES }>(c1);
    let t3 = c2.shuffle::<{ lanes::HIGH_HALVES }>(c3);

    [
        t0.shuffle::<{ lanes::EVEN_LANES }>(t1),
        t0.shuffle::<{ lanes::ODD_LANES }>(t1),
        t2.shuffle::<{ lanes::EVEN_LANES }>(t3),
        t2.shuffle::<{ lanes::ODD_LANES }>(t3),
    ]
}

pub fn identity(out: &mut Mat4) -> &mut Mat4 {
    store_cols(out, [
        F32x4::new(1.0, 0.0, 0.0, 0.0),
        F32x4::new(0.0, 1.0, 0.0, 0.0),
        F32x4::new(0.0, 0.0, 1.0, 0.0),
        F32x4::new(0.0, 0.0, 0.0, 1.0),
    ]);
    out
}

/// Exact comparison against identity, every lane of every column must match
pub fn is_identity(m: &Mat4) -> bool {
    let identity = load_cols(&Mat4::identity());

    load_cols(m)
        .into_iter()
        .zip(identity)
        .all(|(col, expected)| col.eq_mask(expected) == 0b1111)
}

pub fn assign<'t>(out: &'t mut Mat4, m: &Mat4) -> &'t mut Mat4 {
    store_cols(out, load_cols(m));
    out
}

/// `true` if every element pair is closer than [`EPSILON`]
pub fn are_equal(a: &Mat4, b: &Mat4) -> bool {
    if std::ptr::eq(a, b) {
        log::trace!("matrix compared with itself");
        return true;
    }

    load_cols(a)
        .into_iter()
        .zip(load_cols(b))
        .all(|(a, b)| (a + EPSILON).gt_mask(b) == 0b1111 && (a - EPSILON).lt_mask(b) == 0b1111)
}

pub fn transpose<'t>(out: &'t mut Mat4, m: &Mat4) -> &'t mut Mat4 {
    store_cols(out, transpose_cols(load_cols(m)));
    out
}

/// Adjugate columns and splatted determinant.
///
/// Works on the "half-swapped" row arrangement: rows 0 and 2 hold the
/// even-indexed column elements, rows 1 and 3 the odd-indexed ones with
/// halves exchanged. Minors are accumulated two pair-product blocks at a
/// time.
fn adjugate([s0, s1, s2, s3]: [F32x4; 4]) -> ([F32x4; 4], F32x4) {
    let tmp = s0.shuffle::<{ lanes::LOW_HALVES }>(s1);
    let row1 = s2.shuffle::<{ lanes::LOW_HALVES }>(s3);
    let row0 = tmp.shuffle::<{ lanes::EVEN_LANES }>(row1);
    let row1 = row1.shuffle::<{ lanes::ODD_LANES }>(tmp);

    let tmp = s0.shuffle::<{ lanes::HIGH_HALVES }>(s1);
    let row3 = s2.shuffle::<{ lanes::HIGH_HALVES }>(s3);
    let row2 = tmp.shuffle::<{ lanes::EVEN_LANES }>(row3);
    let row3 = row3.shuffle::<{ lanes::ODD_LANES }>(tmp);

    let pairs = (row2 * row3).swizzle::<{ lanes::SWAP_PAIRS }>();
    let mut minor0 = row1 * pairs;
    let mut minor1 = row0 * pairs;
    let pairs = pairs.swizzle::<{ lanes::SWAP_HALVES }>();
    minor0 = row1 * pairs - minor0;
    minor1 = row0 * pairs - minor1;
    minor1 = minor1.swizzle::<{ lanes::SWAP_HALVES }>();

    let pairs = (row1 * row2).swizzle::<{ lanes::SWAP_PAIRS }>();
    minor0 = row3 * pairs + minor0;
    let mut minor3 = row0 * pairs;
    let pairs = pairs.swizzle::<{ lanes::SWAP_HALVES }>();
    minor0 = minor0 - row3 * pairs;
    minor3 = row0 * pairs - minor3;
    minor3 = minor3.swizzle::<{ lanes::SWAP_HALVES }>();

    let pairs = (row1.swizzle::<{ lanes::SWAP_HALVES }>() * row3).swizzle::<{ lanes::SWAP_PAIRS }>();
    let row2 = row2.swizzle::<{ lanes::SWAP_HALVES }>();
    minor0 = row2 * pairs + minor0;
    let mut minor2 = row0 * pairs;
    let pairs = pairs.swizzle::<{ lanes::SWAP_HALVES }>();
    minor0 = minor0 - row2 * pairs;
    minor2 = row0 * pairs - minor2;
    minor2 = minor2.swizzle::<{ lanes::SWAP_HALVES }>();

    let pairs = (row0 * row1).swizzle::<{ lanes::SWAP_PAIRS }>();
    minor2 = row3 * pairs + minor2;
    minor3 = row2 * pairs - minor3;
    let pairs = pairs.swizzle::<{ lanes::SWAP_HALVES }>();
    minor2 = row3 * pairs - minor2;
    minor3 = minor3 - row2 * pairs;

    let pairs = (row0 * row3).swizzle::<{ lanes::SWAP_PAIRS }>();
    minor1 = minor1 - row2 * pairs;
    minor2 = row1 * pairs + minor2;
    let pairs = pairs.swizzle::<{ lanes::SWAP_HALVES }>();
    minor1 = row2 * pairs + minor1;
    minor2 = minor2 - row1 * pairs;

    let pairs = (row0 * row2).swizzle::<{ lanes::SWAP_PAIRS }>();
    minor1 = row3 * pairs + minor1;
    minor3 = minor3 - row1 * pairs;
    let pairs = pairs.swizzle::<{ lanes::SWAP_HALVES }>();
    minor1 = minor1 - row3 * pairs;
    minor3 = row1 * pairs + minor3;

    let det = (row0 * minor0).splat_sum();

    ([minor0, minor1, minor2, minor3], det)
}

fn store_scaled(out: &mut Mat4, minors: [F32x4; 4], det: F32x4) {
    let inv_det = F32x4::splat(1.0) / det;
    store_cols(out, minors.map(|minor| minor * inv_det));
}

/// Inverse by cofactor expansion.
///
/// Determinant is not checked: singular input produces infinite or NaN
/// elements. See [`inverse_cramer_checked`].
pub fn inverse_cramer<'t>(out: &'t mut Mat4, m: &Mat4) -> &'t mut Mat4 {
    let (minors, det) = adjugate(load_cols(m));
    store_scaled(out, minors, det);
    out
}

/// Inverse by cofactor expansion, fails on zero or non-finite determinant
pub fn inverse_cramer_checked<'t>(out: &'t mut Mat4, m: &Mat4) -> Result<&'t mut Mat4> {
    let (minors, det) = adjugate(load_cols(m));

    let value = det.first();
    if value == 0.0 || !value.is_finite() {
        log::debug!("cofactor inverse of matrix with determinant {value}");
        return Err(Mat4Error::SingularMatrix);
    }

    store_scaled(out, minors, det);
    Ok(out)
}

/// `out = B * A`: transformation `a` is applied first, `b` second.
/// Column `c` of the result is `b` columns weighted by column `c` of `a`.
pub fn multiply<'t>(out: &'t mut Mat4, a: &Mat4, b: &Mat4) -> &'t mut Mat4 {
    let b_cols = load_cols(b);
    let a_cols = load_cols(a);

    store_cols(out, a_cols.map(|weights| F32x4::combine_columns(&b_cols, weights)));
    out
}

/// `A * B` as new matrix: transformation `b` is applied first, `a` second
pub fn multiply_value(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut out = Mat4::zero();
    multiply(&mut out, b, a);
    out
}

/// View matrix looking from `eye` at `center`, see [`super::transform::look_at`]
pub fn look_at<'t>(out: &'t mut Mat4, eye: &Vec3f, center: &Vec3f, up: &Vec3f) -> &'t mut Mat4 {
    let eye = F32x4::from_vec3(*eye);
    let f = (F32x4::from_vec3(*center) - eye).normalized3();
    let up = F32x4::from_vec3(*up).normalized3();
    let s = f.cross(up).normalized3();
    let u = s.cross(f).normalized3();

    // s, u and -f are the rotation rows
    let rotation = transpose_cols([s, u, -f, F32x4::new(0.0, 0.0, 0.0, 1.0)]);

    let [x, y, z, _] = (-eye).to_array();
    let translation = [
        F32x4::new(1.0, 0.0, 0.0, 0.0),
        F32x4::new(0.0, 1.0, 0.0, 0.0),
        F32x4::new(0.0, 0.0, 1.0, 0.0),
        F32x4::new(x, y, z, 1.0),
    ];

    store_cols(out, translation.map(|weights| F32x4::combine_columns(&rotation, weights)));
    out
}

/// Transform point `(v, 1)` by `m` and project it back by the resulting W
pub fn transform_coord<'t>(out: &'t mut Vec3f, v: &Vec3f, m: &Mat4) -> &'t mut Vec3f {
    let point = F32x4::new(v.x, v.y, v.z, 1.0);
    let result = F32x4::combine_columns(&load_cols(m), point);

    *out = (result / result.swizzle::<{ lanes::BROADCAST_W }>()).to_vec3();
    out
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::mat4::{scalar, transform};
    use proptest::prelude::*;

    /// Diagonally dominant matrix, always well-conditioned
    fn dominant_strategy() -> impl Strategy<Value = Mat4> {
        (
            proptest::array::uniform16(-1.0f32..1.0),
            proptest::array::uniform4(4.0f32..8.0),
        )
            .prop_map(|(mut data, diagonal)| {
                for (i, value) in diagonal.into_iter().enumerate() {
                    data[i * 5] = value;
                }
                Mat4::from_cols_array(data)
            })
    }

    /// Identity, identity with one element changed, or a generic matrix
    fn identity_like_strategy() -> impl Strategy<Value = Mat4> {
        prop_oneof![
            Just(Mat4::identity()),
            (0..16usize, -2.0f32..2.0).prop_map(|(index, delta)| {
                let mut m = Mat4::identity();
                m.data[index] += delta;
                m
            }),
            dominant_strategy(),
        ]
    }

    fn vec3_strategy(range: f32) -> impl Strategy<Value = Vec3f> {
        proptest::array::uniform3(-range..range).prop_map(|[x, y, z]| Vec3f::new(x, y, z))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn multiply_matches_scalar(a in dominant_strategy(), b in dominant_strategy()) {
            let mut simd_out = Mat4::zero();
            let mut scalar_out = Mat4::zero();

            multiply(&mut simd_out, &a, &b);
            scalar::multiply(&mut scalar_out, &a, &b);

            prop_assert_eq!(simd_out, scalar_out);
            prop_assert_eq!(multiply_value(&a, &b), scalar::multiply_value(&a, &b));
        }

        #[test]
        fn inverse_matches_scalar(m in dominant_strategy()) {
            let mut simd_out = Mat4::zero();
            let mut cramer_out = Mat4::zero();
            let mut gauss_out = Mat4::zero();

            inverse_cramer(&mut simd_out, &m);
            scalar::inverse_cramer(&mut cramer_out, &m);
            scalar::inverse(&mut gauss_out, &m).unwrap();

            prop_assert!(scalar::are_equal(&simd_out, &cramer_out));
            prop_assert!(scalar::are_equal(&simd_out, &gauss_out));
            prop_assert!(scalar::are_equal(&multiply_value(&m, &simd_out), &Mat4::identity()));
        }

        #[test]
        fn transpose_matches_scalar(m in dominant_strategy()) {
            let mut simd_out = Mat4::zero();
            let mut scalar_out = Mat4::zero();

            transpose(&mut simd_out, &m);
            scalar::transpose(&mut scalar_out, &m);

            prop_assert_eq!(simd_out, scalar_out);
        }

        #[test]
        fn equality_matches_scalar(
            m in dominant_strategy(),
            delta in proptest::array::uniform16(-0.03f32..0.03),
        ) {
            let other = Mat4::from_cols_array(std::array::from_fn(|i| m.data[i] + delta[i]));

            prop_assert_eq!(are_equal(&m, &other), scalar::are_equal(&m, &other));
            prop_assert!(are_equal(&m, &m.clone()));
        }

        #[test]
        fn identity_check_matches_scalar(m in identity_like_strategy()) {
            prop_assert_eq!(is_identity(&m), scalar::is_identity(&m));
        }

        #[test]
        fn transpose_twice_is_noop(data in proptest::array::uniform16(-1.0e6f32..1.0e6)) {
            let m = Mat4::from_cols_array(data);
            let mut once = Mat4::zero();
            let mut twice = Mat4::zero();

            transpose(&mut once, &m);
            transpose(&mut twice, &once);
            prop_assert_eq!(twice, m);

            scalar::transpose(&mut once, &m);
            scalar::transpose(&mut twice, &once);
            prop_assert_eq!(twice, m);
        }

        #[test]
        fn transform_coord_matches_scalar(m in dominant_strategy(), v in vec3_strategy(1.0)) {
            let mut simd_out = Vec3f::zero();
            let mut scalar_out = Vec3f::zero();

            transform_coord(&mut simd_out, &v, &m);
            scalar::transform_coord(&mut scalar_out, &v, &m);

            prop_assert_eq!(simd_out, scalar_out);
        }

        #[test]
        fn look_at_matches_scalar(
            eye in vec3_strategy(10.0),
            center in vec3_strategy(10.0),
            up in vec3_strategy(1.0),
        ) {
            let forward = center - eye;
            prop_assume!(forward.length() > 0.5);
            prop_assume!(up.length() > 0.5);
            prop_assume!(forward.normalized().cross(up.normalized()).length() > 0.1);

            let mut simd_out = Mat4::zero();
            let mut scalar_out = Mat4::zero();

            look_at(&mut simd_out, &eye, &center, &up);
            transform::look_at(&mut scalar_out, &eye, &center, &up);

            prop_assert!(scalar::are_equal(&simd_out, &scalar_out));
        }
    }
}

// simd.rs
