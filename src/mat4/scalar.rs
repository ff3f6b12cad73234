//! Element-wise implementation of the matrix operations.
//!
//! Every function takes its output as `&mut` and returns it back, so calls
//! chain the same way in both implementations.

use super::{Mat4, EPSILON};
use crate::error::{Mat4Error, Result};
use crate::math::{lanes, Vec3f};

/// Set every element to `value`
pub fn fill(out: &mut Mat4, value: f32) -> &mut Mat4 {
    out.data = [value; 16];
    out
}

pub fn identity(out: &mut Mat4) -> &mut Mat4 {
    *out = Mat4::identity();
    out
}

/// Exact comparison against identity, `-0.0` counts as zero
pub fn is_identity(m: &Mat4) -> bool {
    m.data == Mat4::identity().data
}

pub fn assign<'t>(out: &'t mut Mat4, m: &Mat4) -> &'t mut Mat4 {
    out.data = m.data;
    out
}

/// Copy slot `src` into slot `dst`
///
/// Copying a slot onto itself is reported and skipped.
///
/// # Panics
/// Panics if either index is out of `slots` bounds.
pub fn assign_indexed(slots: &mut [Mat4], dst: usize, src: usize) {
    if dst == src {
        log::warn!("matrix assignment to itself (slot {dst}) skipped");
        return;
    }

    slots[dst] = slots[src];
}

/// `true` if every element pair is closer than [`EPSILON`]
pub fn are_equal(a: &Mat4, b: &Mat4) -> bool {
    if std::ptr::eq(a, b) {
        log::trace!("matrix compared with itself");
        return true;
    }

    a.data
        .iter()
        .zip(b.data.iter())
        .all(|(&a, &b)| a + EPSILON > b && a - EPSILON < b)
}

pub fn transpose<'t>(out: &'t mut Mat4, m: &Mat4) -> &'t mut Mat4 {
    out.data = std::array::from_fn(|i| m.data[lanes::TRANSPOSE[i]]);
    out
}

pub fn transpose_in_place(m: &mut Mat4) -> &mut Mat4 {
    let source = *m;
    transpose(m, &source)
}

/// Gauss-Jordan elimination with full pivoting.
///
/// Replaces `a` by its inverse and `b` by `A^-1 * B`. Both matrices hold
/// unspecified values if the system is singular.
pub fn solve_in_place(a: &mut Mat4, b: &mut Mat4) -> Result<()> {
    let mut indxc = [0usize; 4];
    let mut indxr = [0usize; 4];
    let mut ipiv = [0u32; 4];
    let mut irow = 0;
    let mut icol = 0;

    for i in 0..4 {
        // search for the pivot among rows and columns not used yet
        let mut big = 0.0f32;
        for j in 0..4 {
            if ipiv[j] == 1 {
                continue;
            }

            for k in 0..4 {
                if ipiv[k] == 0 && a.get(j, k).abs() >= big {
                    big = a.get(j, k).abs();
                    irow = j;
                    icol = k;
                }
            }
        }

        ipiv[icol] += 1;

        // column chosen twice, NaN somewhere in the input
        if ipiv[icol] > 1 {
            log::debug!("elimination picked column {icol} twice");
            return Err(Mat4Error::SingularMatrix);
        }

        // move pivot onto the diagonal
        if irow != icol {
            for l in 0..4 {
                a.swap((irow, l), (icol, l));
                b.swap((irow, l), (icol, l));
            }
        }

        indxr[i] = irow;
        indxc[i] = icol;

        let pivot = a.get(icol, icol);
        if pivot == 0.0 {
            log::debug!("zero pivot at column {icol}");
            return Err(Mat4Error::SingularMatrix);
        }

        let pivinv = 1.0 / pivot;
        a.set(icol, icol, 1.0);
        for l in 0..4 {
            a.set(icol, l, a.get(icol, l) * pivinv);
            b.set(icol, l, b.get(icol, l) * pivinv);
        }

        for ll in 0..4 {
            if ll == icol {
                continue;
            }

            let dum = a.get(ll, icol);
            a.set(ll, icol, 0.0);
            for l in 0..4 {
                a.set(ll, l, a.get(ll, l) - a.get(icol, l) * dum);
                b.set(ll, l, b.get(ll, l) - b.get(icol, l) * dum);
            }
        }
    }

    // undo column interchanges, last one first
    for l in (0..4).rev() {
        if indxr[l] != indxc[l] {
            for k in 0..4 {
                a.swap((k, indxr[l]), (k, indxc[l]));
            }
        }
    }

    Ok(())
}

/// Inverse by Gauss-Jordan elimination, `out` is untouched on failure
pub fn inverse<'t>(out: &'t mut Mat4, m: &Mat4) -> Result<&'t mut Mat4> {
    let mut inv = *m;
    let mut rhs = Mat4::identity();

    solve_in_place(&mut inv, &mut rhs)?;

    *out = inv;
    Ok(out)
}

/// Transposed source and its 16 cofactors
fn cofactors(m: &Mat4) -> ([f32; 16], [f32; 16]) {
    let t: [f32; 16] = std::array::from_fn(|i| m.data[lanes::TRANSPOSE[i]]);

    let mut d = [0.0f32; 16];

    // pairs for the first 8 cofactors
    let p = [
        t[10] * t[15], t[11] * t[14], t[9] * t[15], t[11] * t[13],
        t[9] * t[14], t[10] * t[13], t[8] * t[15], t[11] * t[12],
        t[8] * t[14], t[10] * t[12], t[8] * t[13], t[9] * t[12],
    ];

    d[0] = p[0] * t[5] + p[3] * t[6] + p[4] * t[7] - (p[1] * t[5] + p[2] * t[6] + p[5] * t[7]);
    d[1] = p[1] * t[4] + p[6] * t[6] + p[9] * t[7] - (p[0] * t[4] + p[7] * t[6] + p[8] * t[7]);
    d[2] = p[2] * t[4] + p[7] * t[5] + p[10] * t[7] - (p[3] * t[4] + p[6] * t[5] + p[11] * t[7]);
    d[3] = p[5] * t[4] + p[8] * t[5] + p[11] * t[6] - (p[4] * t[4] + p[9] * t[5] + p[10] * t[6]);
    d[4] = p[1] * t[1] + p[2] * t[2] + p[5] * t[3] - (p[0] * t[1] + p[3] * t[2] + p[4] * t[3]);
    d[5] = p[0] * t[0] + p[7] * t[2] + p[8] * t[3] - (p[1] * t[0] + p[6] * t[2] + p[9] * t[3]);
    d[6] = p[3] * t[0] + p[6] * t[1] + p[11] * t[3] - (p[2] * t[0] + p[7] * t[1] + p[10] * t[3]);
    d[7] = p[4] * t[0] + p[9] * t[1] + p[10] * t[2] - (p[5] * t[0] + p[8] * t[1] + p[11] * t[2]);

    // pairs for the second 8 cofactors
    let p = [
        t[2] * t[7], t[3] * t[6], t[1] * t[7], t[3] * t[5],
        t[1] * t[6], t[2] * t[5], t[0] * t[7], t[3] * t[4],
        t[0] * t[6], t[2] * t[4], t[0] * t[5], t[1] * t[4],
    ];

    d[8] = p[0] * t[13] + p[3] * t[14] + p[4] * t[15] - (p[1] * t[13] + p[2] * t[14] + p[5] * t[15]);
    d[9] = p[1] * t[12] + p[6] * t[14] + p[9] * t[15] - (p[0] * t[12] + p[7] * t[14] + p[8] * t[15]);
    d[10] = p[2] * t[12] + p[7] * t[13] + p[10] * t[15] - (p[3] * t[12] + p[6] * t[13] + p[11] * t[15]);
    d[11] = p[5] * t[12] + p[8] * t[13] + p[11] * t[14] - (p[4] * t[12] + p[9] * t[13] + p[10] * t[14]);
    d[12] = p[2] * t[10] + p[5] * t[11] + p[1] * t[9] - (p[4] * t[11] + p[0] * t[9] + p[3] * t[10]);
    d[13] = p[8] * t[11] + p[0] * t[8] + p[7] * t[10] - (p[6] * t[10] + p[9] * t[11] + p[1] * t[8]);
    d[14] = p[6] * t[9] + p[11] * t[11] + p[3] * t[8] - (p[10] * t[11] + p[2] * t[8] + p[7] * t[9]);
    d[15] = p[10] * t[10] + p[4] * t[8] + p[9] * t[9] - (p[8] * t[9] + p[11] * t[10] + p[5] * t[8]);

    (t, d)
}

fn cofactor_determinant(t: &[f32; 16], d: &[f32; 16]) -> f32 {
    t[0] * d[0] + t[1] * d[1] + t[2] * d[2] + t[3] * d[3]
}

fn scale_cofactors(out: &mut Mat4, d: &[f32; 16], det: f32) {
    let inv_det = 1.0 / det;
    out.data = d.map(|v| v * inv_det);
}

/// Determinant by cofactor expansion
pub fn determinant(m: &Mat4) -> f32 {
    let (t, d) = cofactors(m);
    cofactor_determinant(&t, &d)
}

/// Inverse by Cramer's rule.
///
/// Determinant is not checked: singular input produces infinite or NaN
/// elements. See [`inverse_cramer_checked`].
pub fn inverse_cramer<'t>(out: &'t mut Mat4, m: &Mat4) -> &'t mut Mat4 {
    let (t, d) = cofactors(m);
    scale_cofactors(out, &d, cofactor_determinant(&t, &d));
    out
}

/// Inverse by Cramer's rule, fails on zero or non-finite determinant
pub fn inverse_cramer_checked<'t>(out: &'t mut Mat4, m: &Mat4) -> Result<&'t mut Mat4> {
    let (t, d) = cofactors(m);
    let det = cofactor_determinant(&t, &d);

    if det == 0.0 || !det.is_finite() {
        log::debug!("cofactor inverse of matrix with determinant {det}");
        return Err(Mat4Error::SingularMatrix);
    }

    scale_cofactors(out, &d, det);
    Ok(out)
}

/// `out = B * A`: transformation `a` is applied first, `b` second.
///
/// `out[row + 4 * col] = sum(b[row + 4 * k] * a[k + 4 * col])`
pub fn multiply<'t>(out: &'t mut Mat4, a: &Mat4, b: &Mat4) -> &'t mut Mat4 {
    let [
        a00, a01, a02, a03,
        a10, a11, a12, a13,
        a20, a21, a22, a23,
        a30, a31, a32, a33,
    ] = a.data;
    let [
        b00, b01, b02, b03,
        b10, b11, b12, b13,
        b20, b21, b22, b23,
        b30, b31, b32, b33,
    ] = b.data;

    out.data[0] = b00 * a00 + b10 * a01 + b20 * a02 + b30 * a03;
    out.data[1] = b01 * a00 + b11 * a01 + b21 * a02 + b31 * a03;
    out.data[2] = b02 * a00 + b12 * a01 + b22 * a02 + b32 * a03;
    out.data[3] = b03 * a00 + b13 * a01 + b23 * a02 + b33 * a03;

    out.data[4] = b00 * a10 + b10 * a11 + b20 * a12 + b30 * a13;
    out.data[5] = b01 * a10 + b11 * a11 + b21 * a12 + b31 * a13;
    out.data[6] = b02 * a10 + b12 * a11 + b22 * a12 + b32 * a13;
    out.data[7] = b03 * a10 + b13 * a11 + b23 * a12 + b33 * a13;

    out.data[8] = b00 * a20 + b10 * a21 + b20 * a22 + b30 * a23;
    out.data[9] = b01 * a20 + b11 * a21 + b21 * a22 + b31 * a23;
    out.data[10] = b02 * a20 + b12 * a21 + b22 * a22 + b32 * a23;
    out.data[11] = b03 * a20 + b13 * a21 + b23 * a22 + b33 * a23;

    out.data[12] = b00 * a30 + b10 * a31 + b20 * a32 + b30 * a33;
    out.data[13] = b01 * a30 + b11 * a31 + b21 * a32 + b31 * a33;
    out.data[14] = b02 * a30 + b12 * a31 + b22 * a32 + b32 * a33;
    out.data[15] = b03 * a30 + b13 * a31 + b23 * a32 + b33 * a33;

    out
}

/// `A * B` as new matrix: transformation `b` is applied first, `a` second.
///
/// `result[row + 4 * col] = sum(a[row + 4 * k] * b[k + 4 * col])`, same
/// bits as `multiply(_, b, a)`.
pub fn multiply_value(a: &Mat4, b: &Mat4) -> Mat4 {
    let [
        a00, a01, a02, a03,
        a10, a11, a12, a13,
        a20, a21, a22, a23,
        a30, a31, a32, a33,
    ] = a.data;
    let [
        b00, b01, b02, b03,
        b10, b11, b12, b13,
        b20, b21, b22, b23,
        b30, b31, b32, b33,
    ] = b.data;

    Mat4::from_cols_array([
        a00 * b00 + a10 * b01 + a20 * b02 + a30 * b03,
        a01 * b00 + a11 * b01 + a21 * b02 + a31 * b03,
        a02 * b00 + a12 * b01 + a22 * b02 + a32 * b03,
        a03 * b00 + a13 * b01 + a23 * b02 + a33 * b03,

        a00 * b10 + a10 * b11 + a20 * b12 + a30 * b13,
        a01 * b10 + a11 * b11 + a21 * b12 + a31 * b13,
        a02 * b10 + a12 * b11 + a22 * b12 + a32 * b13,
        a03 * b10 + a13 * b11 + a23 * b12 + a33 * b13,

        a00 * b20 + a10 * b21 + a20 * b22 + a30 * b23,
        a01 * b20 + a11 * b21 + a21 * b22 + a31 * b23,
        a02 * b20 + a12 * b21 + a22 * b22 + a32 * b23,
        a03 * b20 + a13 * b21 + a23 * b22 + a33 * b23,

        a00 * b30 + a10 * b31 + a20 * b32 + a30 * b33,
        a01 * b30 + a11 * b31 + a21 * b32 + a31 * b33,
        a02 * b30 + a12 * b31 + a22 * b32 + a32 * b33,
        a03 * b30 + a13 * b31 + a23 * b32 + a33 * b33,
    ])
}

/// Transform point `(v, 1)` by `m` and project it back by the resulting W
pub fn transform_coord<'t>(out: &'t mut Vec3f, v: &Vec3f, m: &Mat4) -> &'t mut Vec3f {
    let d = &m.data;

    let x = d[0] * v.x + d[4] * v.y + d[8] * v.z + d[12];
    let y = d[1] * v.x + d[5] * v.y + d[9] * v.z + d[13];
    let z = d[2] * v.x + d[6] * v.y + d[10] * v.z + d[14];
    let w = d[3] * v.x + d[7] * v.y + d[11] * v.z + d[15];

    *out = Vec3f::new(x / w, y / w, z / w);
    out
}


// scalar.rs
