//! Public API checks through both backends.

use fmat4::mat4::{extract, scalar, simd, transform, FrustumPlane, PlaneSet};
use fmat4::math::{Planef, Vec3f};
use fmat4::{Backend, Engine, Mat4, Mat4Error};

const BACKENDS: [Backend; 2] = [Backend::Scalar, Backend::Simd];

fn model() -> Mat4 {
    let mut rotation = Mat4::zero();
    let mut translation = Mat4::zero();
    let mut out = Mat4::zero();

    transform::rotation_axis_angle(&mut rotation, &Vec3f::new(1.0, 1.0, 0.0), 0.7);
    transform::translation(&mut translation, 1.0, -2.0, 3.0);

    // rotate first, then translate
    scalar::multiply(&mut out, &rotation, &translation);
    out
}

#[test]
fn inverse_undoes_transform() {
    let m = model();

    for backend in BACKENDS {
        let engine = Engine::new(backend);
        let mut inv = Mat4::zero();
        let mut cramer = Mat4::zero();

        engine.inverse(&mut inv, &m).unwrap();
        engine.inverse_cramer(&mut cramer, &m);

        assert!(engine.are_equal(&engine.multiply_value(&m, &inv), &Mat4::identity()), "{backend}");
        assert!(engine.are_equal(&inv, &cramer), "{backend}");

        let mut p = Vec3f::zero();
        let mut back = Vec3f::zero();
        engine.transform_coord(&mut p, &Vec3f::new(0.5, 0.25, -4.0), &m);
        engine.transform_coord(&mut back, &p, &inv);
        assert!((back - Vec3f::new(0.5, 0.25, -4.0)).length() < 1e-4, "{backend}");
    }
}

#[test]
fn singular_inverse_fails_on_both_backends() {
    let mut singular = Mat4::identity();
    singular.data[0] = 0.0;

    for backend in BACKENDS {
        let mut out = Mat4::identity();

        assert_eq!(
            Engine::new(backend).inverse(&mut out, &singular),
            Err(Mat4Error::SingularMatrix)
        );
        assert_eq!(out, Mat4::identity());
    }
}

#[test]
fn multiply_then_inverse_with_both_orders() {
    let a = model();
    let mut b = Mat4::zero();
    transform::rotation_pitch_yaw_roll(&mut b, 0.1, -0.4, 1.2);

    for backend in BACKENDS {
        let engine = Engine::new(backend);
        let mut product = Mat4::zero();

        engine.multiply(&mut product, &a, &b);
        assert_eq!(product, engine.multiply_value(&b, &a));
    }
}

#[test]
fn view_projection_frustum() {
    let mut projection = Mat4::zero();
    transform::perspective_projection(&mut projection, 75.0, 16.0 / 9.0, 0.1, 50.0).unwrap();

    let eye = Vec3f::new(0.0, 2.0, 10.0);
    let center = Vec3f::new(0.0, 0.0, 0.0);
    let up = Vec3f::new(0.0, 1.0, 0.0);

    for backend in BACKENDS {
        let engine = Engine::new(backend);
        let mut view = Mat4::zero();
        let mut view_projection = Mat4::zero();

        engine.look_at(&mut view, &eye, &center, &up);
        engine.multiply(&mut view_projection, &view, &projection);

        let mut planes = [Planef::default(); 6];
        engine.extract_planes(&mut planes, &view_projection, PlaneSet::ALL);

        // the point looked at is inside, the camera itself is in front of the near plane
        assert!(planes.iter().all(|p| p.distance(center) > 0.0), "{backend}");
        assert!(planes[FrustumPlane::Near.index()].distance(eye) < 0.0, "{backend}");
        assert!(planes[FrustumPlane::Left.index()].distance(Vec3f::new(-100.0, 0.0, 0.0)) < 0.0, "{backend}");
    }
}

#[test]
fn look_at_backends_agree() {
    let eye = Vec3f::new(-3.0, 4.0, 2.5);
    let center = Vec3f::new(1.0, 0.5, -2.0);
    let up = Vec3f::new(0.0, 0.0, 1.0);

    let mut scalar_view = Mat4::zero();
    let mut simd_view = Mat4::zero();
    transform::look_at(&mut scalar_view, &eye, &center, &up);
    simd::look_at(&mut simd_view, &eye, &center, &up);

    assert!(scalar::are_equal(&scalar_view, &simd_view));

    let mut axis = Vec3f::zero();
    let radians = extract::rotation_to_axis_angle(&mut axis, &scalar_view);
    assert!((axis.length() - 1.0).abs() < 1e-5);
    assert!(radians > 0.0 && radians < std::f32::consts::TAU);
}

#[test]
fn raw_plane_index_bounds() {
    let mut plane = Planef::default();

    assert!(extract::extract_plane_index(&mut plane, &Mat4::identity(), 5).is_ok());
    assert_eq!(
        extract::extract_plane_index(&mut plane, &Mat4::identity(), 6),
        Err(Mat4Error::InvalidPlaneIndex(6))
    );
}

#[test]
fn backend_names() {
    assert_eq!("scalar".parse::<Backend>().map(Engine::new).map(|e| e.backend()), Ok(Backend::Scalar));
    assert!(matches!("gpu".parse::<Backend>(), Err(Mat4Error::UnknownBackend(name)) if name == "gpu"));
}

#[test]
fn self_check_kernels_pass() {
    for mut kernel in fmat4::kernel::all() {
        assert!(kernel.init(), "{}", kernel.name());
        assert!(kernel.cleanup(), "{}", kernel.name());
    }
}

// engine.rs
