use wellscene_core::geom::{cross, dot, normalize, BBox3, Vec3};

#[test]
fn normalize_returns_unit_vector() {
    let v = normalize(Vec3::new(3.0, 4.0, 12.0));
    assert!((v.length() - 1.0).abs() < 1e-12);
    assert!((v.x - 3.0 / 13.0).abs() < 1e-12);
    assert!((v.z - 12.0 / 13.0).abs() < 1e-12);
}

#[test]
fn normalize_of_zero_is_zero() {
    assert_eq!(Vec3::ZERO, normalize(Vec3::ZERO));
    assert_eq!(Vec3::ZERO, normalize(Vec3::new(1e-300, 0.0, 0.0)));
}

#[test]
fn normalize_is_idempotent() {
    for v in [
        Vec3::new(1.0, 2.0, 3.0),
        Vec3::new(-0.5, 1e-3, 7.0),
        Vec3::new(250_000.0, -3.0, 0.25),
    ] {
        let once = normalize(v);
        let twice = normalize(once);
        assert!(once.distance(twice) < 1e-12, "{once:?} vs {twice:?}");
    }
}

#[test]
fn dot_and_cross_follow_right_hand_rule() {
    assert_eq!(0.0, dot(Vec3::X, Vec3::Y));
    assert_eq!(32.0, dot(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)));
    assert_eq!(Vec3::Z, cross(Vec3::X, Vec3::Y));
    assert_eq!(Vec3::X, cross(Vec3::Y, Vec3::Z));
    assert_eq!(-Vec3::Z, cross(Vec3::Y, Vec3::X));
}

#[test]
fn bbox_ignores_non_finite_points() {
    let mut bbox = BBox3::empty();
    assert!(bbox.is_empty());
    bbox.include_point(Vec3::new(1.0, -2.0, 3.0));
    bbox.include_point(Vec3::new(f64::NAN, 0.0, 0.0));
    bbox.include_point(Vec3::new(-1.0, 2.0, 5.0));
    assert_eq!(Vec3::new(-1.0, -2.0, 3.0), bbox.min);
    assert_eq!(Vec3::new(1.0, 2.0, 5.0), bbox.max);
    assert_eq!(Vec3::new(0.0, 0.0, 4.0), bbox.center());
}
