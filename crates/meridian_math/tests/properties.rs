//! Cross-type properties of the math value types.

use std::mem::size_of;

use meridian_math::mathf::{self, Real, PI};
use meridian_math::{
    Aabb, Basis, Color, Plane, Projection, Quaternion, Rect2, Rect2i, Rid, Transform2D, Transform3D,
    Vector2, Vector2i, Vector3, Vector3i, Vector4, Vector4i,
};

fn sample_vectors() -> Vec<Vector3> {
    vec![
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::new(-0.25, 8.0, 0.5),
        Vector3::new(1e-3, -1e-3, 2e-3),
        Vector3::new(100.0, -50.0, 25.0),
        Vector3::ZERO,
    ]
}

#[test]
fn test_normalized_length_is_one_or_zero() {
    for v in sample_vectors() {
        let n = v.normalized();
        if v == Vector3::ZERO {
            assert_eq!(n, Vector3::ZERO);
            assert_eq!(n.length(), 0.0);
        } else {
            assert!(mathf::is_equal_approx(n.length(), 1.0), "{v} -> {n}");
        }
    }
    assert_eq!(Vector2::ZERO.normalized(), Vector2::ZERO);
    assert_eq!(Vector4::ZERO.normalized(), Vector4::ZERO);
}

#[test]
fn test_scale_then_divide_round_trips() {
    for v in sample_vectors() {
        for s in [0.5, 3.0, -7.25] {
            assert!(((v * s) / s).is_equal_approx(v), "{v} with {s}");
        }
    }
}

#[test]
fn test_lerp_endpoints_are_exact() {
    let a = Vector3::new(0.1, -7.3, 1e6);
    let b = Vector3::new(3.3, 0.7, -2e-4);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(mathf::lerp(0.1, 0.3, 1.0), 0.3);
    assert_eq!(mathf::lerp(0.1, 0.3, 0.0), 0.1);
}

#[test]
fn test_inverse_undoes_orthonormal_transform() {
    let t = Transform3D::new(
        Basis::from_axis_angle(Vector3::new(0.0, 0.6, 0.8), 2.2),
        Vector3::new(-3.0, 1.5, 9.0),
    );
    for v in sample_vectors() {
        assert!((t.inverse() * (t * v)).is_equal_approx(v));
    }

    let t2 = Transform2D::from_rotation(-0.8, Vector2::new(2.0, 2.0));
    let v2 = Vector2::new(5.0, -1.0);
    assert!((t2.inverse() * (t2 * v2)).is_equal_approx(v2));
}

#[test]
fn test_rotation_and_counter_rotation_cancel() {
    let a = Vector2::new(3.0, -4.0);
    for theta in [0.1, 1.0, PI, -2.5] {
        assert!(a.rotated(theta).rotated(-theta).is_equal_approx(a));
    }
    let b = Vector3::new(1.0, 2.0, 3.0);
    let axis = Vector3::new(1.0, 0.0, 1.0).normalized();
    assert!(b.rotated(axis, 0.7).rotated(axis, -0.7).is_equal_approx(b));
}

#[test]
fn test_remainder_and_pos_mod_scenarios() {
    assert_eq!(Vector2::new(10.0, -20.0) % 7.0, Vector2::new(3.0, -6.0));
    assert_eq!(Vector2::new(10.0, -20.0).pos_mod(7.0), Vector2::new(3.0, 1.0));
    assert_eq!(Vector2i::new(10, -20) % 7, Vector2i::new(3, -6));
    assert_eq!(Vector2i::new(10, -20).pos_mod(7), Vector2i::new(3, 1));
}

#[test]
fn test_identity_is_two_sided_neutral() {
    let t = Transform2D::from_components(0.4, Vector2::new(1.5, -2.0), 0.1, Vector2::new(7.0, 3.0));
    assert_eq!(Transform2D::IDENTITY * t, t);
    assert_eq!(t * Transform2D::IDENTITY, t);

    let t3 = Transform3D::new(Basis::from_scale(Vector3::new(2.0, 3.0, 4.0)), Vector3::ONE);
    assert_eq!(Transform3D::IDENTITY * t3, t3);
    assert_eq!(t3 * Transform3D::IDENTITY, t3);
}

#[test]
fn test_quaternion_and_basis_agree_on_composition() {
    let qa = Quaternion::from_axis_angle(Vector3::UP, 0.5);
    let qb = Quaternion::from_axis_angle(Vector3::RIGHT, -1.1);
    let ba = Basis::from_quaternion(qa);
    let bb = Basis::from_quaternion(qb);
    let v = Vector3::new(0.3, -2.0, 4.0);
    assert!(((ba * bb) * v).is_equal_approx((qa * qb) * v));
}

#[test]
fn test_axis_tie_breaks_per_arity() {
    assert_eq!(Vector2::new(1.0, 1.0).max_axis_index().index(), 0);
    assert_eq!(Vector2::new(1.0, 1.0).min_axis_index().index(), 1);
    assert_eq!(Vector3::new(1.0, 1.0, 1.0).max_axis_index().index(), 0);
    assert_eq!(Vector3::new(1.0, 1.0, 1.0).min_axis_index().index(), 2);
    assert_eq!(Vector4::new(1.0, 1.0, 1.0, 1.0).max_axis_index().index(), 0);
    assert_eq!(Vector4::new(1.0, 1.0, 1.0, 1.0).min_axis_index().index(), 3);
    assert_eq!(Vector3i::new(2, 2, 2).max_axis_index().index(), 0);
    assert_eq!(Vector4i::new(2, 2, 2, 2).min_axis_index().index(), 3);
}

#[test]
fn test_layouts_are_sequential_reals() {
    let real = size_of::<Real>();
    assert_eq!(size_of::<Vector2>(), 2 * real);
    assert_eq!(size_of::<Vector3>(), 3 * real);
    assert_eq!(size_of::<Vector4>(), 4 * real);
    assert_eq!(size_of::<Quaternion>(), 4 * real);
    assert_eq!(size_of::<Basis>(), 9 * real);
    assert_eq!(size_of::<Transform2D>(), 6 * real);
    assert_eq!(size_of::<Transform3D>(), 12 * real);
    assert_eq!(size_of::<Projection>(), 16 * real);
    assert_eq!(size_of::<Rect2>(), 4 * real);
    assert_eq!(size_of::<Aabb>(), 6 * real);
    assert_eq!(size_of::<Plane>(), 4 * real);

    assert_eq!(size_of::<Vector2i>(), 8);
    assert_eq!(size_of::<Vector3i>(), 12);
    assert_eq!(size_of::<Vector4i>(), 16);
    assert_eq!(size_of::<Rect2i>(), 16);
    assert_eq!(size_of::<Color>(), 16);
    assert_eq!(size_of::<Rid>(), 8);
}

#[test]
fn test_pod_byte_views() {
    let t = Transform2D::new(Vector2::new(1.0, 2.0), Vector2::new(3.0, 4.0), Vector2::new(5.0, 6.0));
    let reals: &[Real] = bytemuck::cast_slice(std::slice::from_ref(&t));
    assert_eq!(reals, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

    let back: Transform2D = bytemuck::pod_read_unaligned(bytemuck::bytes_of(&t));
    assert_eq!(back, t);
}

#[test]
fn test_serde_shape() {
    let json_like = toml::to_string(&Vector3::new(1.0, 2.0, 3.0)).unwrap();
    assert!(json_like.contains("x = 1"));
    let parsed: Vector3 = toml::from_str("x = 4.0\ny = 5.0\nz = 6.0\n").unwrap();
    assert_eq!(parsed, Vector3::new(4.0, 5.0, 6.0));
}

#[test]
fn test_integer_vectors_near_i32_limits() {
    let v = Vector2i::new(50_000, 50_000);
    assert_eq!(v.length_squared(), 5_000_000_000);
    assert!((v.length() - 70_710.68).abs() < 0.01, "{}", v.length());

    let far = Vector3i::new(i32::MAX, i32::MIN, i32::MAX);
    assert_eq!(Vector3i::ZERO.distance_squared_to(Vector3i::new(0, i32::MIN, 0)), 1 << 62);
    assert_eq!(far.length_squared(), i64::MAX);
    assert!(far.length().is_finite());
    assert!(Vector4i::new(i32::MIN, i32::MIN, i32::MIN, i32::MIN).distance_to(Vector4i::MAX).is_finite());

    // Component arithmetic wraps instead of panicking.
    assert_eq!(Vector2i::new(i32::MAX, 0) + Vector2i::new(1, 0), Vector2i::new(i32::MIN, 0));
    assert_eq!(Vector3i::new(i32::MIN, 1, 1) * -1, Vector3i::new(i32::MIN, -1, -1));
    assert_eq!(-Vector4i::new(i32::MIN, 0, 0, 0), Vector4i::new(i32::MIN, 0, 0, 0));
    assert_eq!(Vector2i::new(i32::MIN, 4) / -1, Vector2i::new(i32::MIN, -4));
}
