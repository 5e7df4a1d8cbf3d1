use wellscene_core::disc::{build_marker_geometry, build_oriented_geometry, DiscTemplate, IndicatorKind};
use wellscene_core::geom::{cross, dot, normalize, rotate, Vec3};
use wellscene_core::mesh::PolyMesh;
use wellscene_core::model::AttitudePoint;
use wellscene_core::orient::{
    indicator_endpoints, orient, place, plane_normal, rotation_between, Attitude, AttitudeError,
    LocalFrame, INDICATOR_LENGTH_DIVISOR,
};

const RADIUS: f64 = 200.0;

fn template() -> PolyMesh {
    PolyMesh::regular_polygon(Vec3::ZERO, RADIUS, 40)
}

fn segment(mesh: &PolyMesh) -> (Vec3, Vec3) {
    assert_eq!(2, mesh.num_points());
    assert_eq!(1, mesh.num_lines());
    (mesh.points[0], mesh.points[1])
}

fn midpoint(mesh: &PolyMesh) -> Vec3 {
    let (a, b) = segment(mesh);
    (a + b) * 0.5
}

fn angle_diff_mod(a: f64, b: f64, period: f64) -> f64 {
    let d = (a - b).rem_euclid(period);
    d.min(period - d)
}

fn disc_normal(mesh: &PolyMesh) -> Vec3 {
    let c = mesh.centroid();
    let a = mesh.points[0] - c;
    let b = mesh.points[mesh.num_points() / 4] - c;
    normalize(cross(a, b))
}

#[test]
fn placed_pieces_share_the_observation_center() {
    let tpl = template();
    let origin = Vec3::new(452_310.5, 6_781_002.25, -1_843.75);
    for dip in [0.0, 10.0, 33.0, 45.0, 60.0, 89.0, 90.0] {
        for az in [0.0, 30.0, 90.0, 135.0, 180.0, 222.0, 270.0, 359.9] {
            let placed = place(&tpl, &AttitudePoint::new(origin, az, dip), RADIUS);
            assert!(placed.disc.centroid().distance(origin) < 1e-6, "disc az={az} dip={dip}");
            assert!(midpoint(&placed.strike_line).distance(origin) < 1e-6, "strike az={az} dip={dip}");
            assert!(midpoint(&placed.dip_line).distance(origin) < 1e-6, "dip az={az} dip={dip}");
        }
    }
}

#[test]
fn zero_translation_leaves_geometry_unchanged() {
    let oriented = orient(&template(), 125.0, 40.0, RADIUS);
    let moved = oriented.translated(Vec3::ZERO);
    for (a, b) in oriented.disc.points.iter().zip(&moved.disc.points) {
        assert!(a.distance(*b) < 1e-9);
    }
    assert_eq!(oriented.strike_line, moved.strike_line);
    assert_eq!(oriented.dip_line, moved.dip_line);
}

#[test]
fn dip_line_recovers_dip_angle() {
    for dip in [0.0, 15.0, 45.0, 75.0, 90.0] {
        for az in [0.0, 45.0, 200.0, 315.0] {
            let oriented = orient(&template(), az, dip, RADIUS);
            let (p0, p1) = segment(&oriented.dip_line);
            let v = p1 - p0;
            let measured = (-v.z).atan2(v.horizontal_length()).to_degrees();
            assert!((measured - dip).abs() < 5.0, "az={az} dip={dip} measured={measured}");
        }
    }
}

#[test]
fn dip_line_points_down_dip() {
    let oriented = orient(&template(), 120.0, 30.0, RADIUS);
    let (p0, p1) = segment(&oriented.dip_line);
    let v = p1 - p0;
    let bearing = v.x.atan2(v.y).to_degrees().rem_euclid(360.0);
    assert!(angle_diff_mod(bearing, 120.0, 360.0) < 1e-6);
    assert!(v.z < 0.0);
}

#[test]
fn strike_line_recovers_azimuth_up_to_strike_ambiguity() {
    for dip in [0.0, 20.0, 70.0, 90.0] {
        for az in [0.0, 10.0, 90.0, 145.0, 180.0, 260.0, 300.0] {
            let oriented = orient(&template(), az, dip, RADIUS);
            let (p0, p1) = segment(&oriented.strike_line);
            let v = p1 - p0;
            assert!(v.z.abs() < 1e-9, "strike must be horizontal");
            let bearing = v.x.atan2(v.y).to_degrees();
            let diff = angle_diff_mod(bearing, az - 90.0, 180.0);
            assert!(diff < 5.0, "az={az} dip={dip} bearing={bearing}");
        }
    }
}

#[test]
fn flat_dip_keeps_everything_horizontal() {
    let oriented = orient(&template(), 75.0, 0.0, RADIUS);
    assert!(oriented.disc.points.iter().all(|p| p.z.abs() < 1e-9));
    let (a, b) = segment(&oriented.strike_line);
    assert!(a.z.abs() < 1e-9 && b.z.abs() < 1e-9);
    let (a, b) = segment(&oriented.dip_line);
    assert!(a.z.abs() < 1e-9 && b.z.abs() < 1e-9);
}

#[test]
fn vertical_dip_stands_the_disc_up() {
    let oriented = orient(&template(), 30.0, 90.0, RADIUS);
    let n = disc_normal(&oriented.disc);
    assert!(n.z.abs() < 1e-9, "normal {n:?} should be horizontal");
    let zs: Vec<f64> = oriented.disc.points.iter().map(|p| p.z).collect();
    let span = zs.iter().cloned().fold(f64::MIN, f64::max) - zs.iter().cloned().fold(f64::MAX, f64::min);
    assert!((span - 2.0 * RADIUS).abs() < 1.0);
}

#[test]
fn disc_normal_matches_plane_normal() {
    for (az, dip) in [(0.0, 10.0), (90.0, 45.0), (210.0, 80.0), (333.0, 5.0)] {
        let oriented = orient(&template(), az, dip, RADIUS);
        let n = disc_normal(&oriented.disc);
        let expected = plane_normal(az, dip);
        assert!(n.distance(expected) < 1e-9, "az={az} dip={dip}: {n:?} vs {expected:?}");
    }
}

#[test]
fn dip_drop_grows_with_dip() {
    let mut last = -1.0;
    for step in 0..=18 {
        let dip = step as f64 * 5.0;
        let oriented = orient(&template(), 45.0, dip, RADIUS);
        let (p0, p1) = segment(&oriented.dip_line);
        let drop = p0.z - p1.z;
        assert!(drop >= last, "dip={dip}: {drop} < {last}");
        last = drop;
    }
}

#[test]
fn local_frame_is_orthonormal() {
    for (az, dip) in [(0.0, 0.0), (45.0, 30.0), (180.0, 90.0), (271.0, 61.0)] {
        let frame = LocalFrame::new(az, dip, plane_normal(az, dip));
        for v in [frame.strike, frame.dip, frame.normal] {
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
        assert!(dot(frame.strike, frame.dip).abs() < 1e-12);
        assert!(dot(frame.strike, frame.normal).abs() < 1e-12);
        assert!(dot(frame.dip, frame.normal).abs() < 1e-12);
    }
}

#[test]
fn rotation_between_handles_parallel_and_antiparallel() {
    let same = rotation_between(Vec3::Z, Vec3::Z);
    assert!(rotate(&same, Vec3::new(1.0, 2.0, 3.0)).distance(Vec3::new(1.0, 2.0, 3.0)) < 1e-12);

    let flipped = rotation_between(Vec3::Z, -Vec3::Z);
    assert!(rotate(&flipped, Vec3::Z).distance(-Vec3::Z) < 1e-12);

    let flipped_x = rotation_between(Vec3::X, -Vec3::X);
    assert!(rotate(&flipped_x, Vec3::X).distance(-Vec3::X) < 1e-12);

    let tilt = rotation_between(Vec3::Z, Vec3::new(0.0, 1.0, 1.0));
    assert!(rotate(&tilt, Vec3::Z).distance(normalize(Vec3::new(0.0, 1.0, 1.0))) < 1e-12);
}

#[test]
fn attitude_validation_and_clamping() {
    assert!(Attitude::new(0.0, 0.0).is_ok());
    assert!(Attitude::new(359.99, 90.0).is_ok());
    assert_eq!(Err(AttitudeError::AzimuthOutOfRange(360.0)), Attitude::new(360.0, 10.0));
    assert_eq!(Err(AttitudeError::DipOutOfRange(-1.0)), Attitude::new(10.0, -1.0));
    assert!(matches!(Attitude::new(f64::NAN, 1.0), Err(AttitudeError::NotFinite { .. })));

    let a = Attitude::clamped(-30.0, 120.0).expect("finite input clamps");
    assert!((a.azimuth() - 330.0).abs() < 1e-12);
    assert_eq!(90.0, a.dip());
    assert!((a.strike() - 240.0).abs() < 1e-12);
    assert!(Attitude::clamped(10.0, f64::INFINITY).is_err());
}

#[test]
fn marker_geometry_keeps_lines_on_their_discs() {
    let points = [
        AttitudePoint::new(Vec3::new(10.0, 20.0, -30.0), 45.0, 30.0),
        AttitudePoint::new(Vec3::new(-500.0, 80.0, -1200.0), 300.0, 70.0),
    ];
    let geometry = build_oriented_geometry(&points, &DiscTemplate::new(RADIUS, 40));
    assert_eq!(2, geometry.disc_count());
    assert_eq!(80, geometry.discs.num_points());

    let kinds: Vec<IndicatorKind> = geometry.lines.iter().map(|l| l.kind).collect();
    assert_eq!(
        vec![IndicatorKind::Strike, IndicatorKind::Dip, IndicatorKind::Strike, IndicatorKind::Dip],
        kinds
    );
    for (pair, point) in geometry.lines.chunks(2).zip(&points) {
        for line in pair {
            assert!(line.midpoint().distance(point.position) < 1e-6);
            assert!((line.vector().length() - RADIUS / 1.5).abs() < 1e-9);
        }
    }
    assert_eq!(4, geometry.line_mesh().num_lines());
}

#[test]
fn custom_orient_fn_is_used_per_point() {
    let points = [AttitudePoint::new(Vec3::ZERO, 0.0, 0.0); 3];
    let calls = std::cell::Cell::new(0);
    let geometry = build_marker_geometry(&points, &DiscTemplate::new(RADIUS, 8), |tpl, p, r| {
        calls.set(calls.get() + 1);
        place(tpl, p, r)
    });
    assert_eq!(3, calls.get());
    assert_eq!(3, geometry.disc_count());
    assert_eq!(6, geometry.lines.len());
}

#[test]
fn indicators_are_centred_with_total_length_radius_over_divisor() {
    let (strike, dip) = indicator_endpoints(RADIUS);
    let expected = RADIUS / INDICATOR_LENGTH_DIVISOR;
    for [a, b] in [strike, dip] {
        assert!(((b - a).length() - expected).abs() < 1e-12);
        assert!(((a + b) * 0.5).length() < 1e-12);
    }
    assert!(strike[0].distance(Vec3::new(-RADIUS / 3.0, 0.0, 0.0)) < 1e-12);
    assert!(dip[1].distance(Vec3::new(0.0, RADIUS / 3.0, 0.0)) < 1e-12);
}
