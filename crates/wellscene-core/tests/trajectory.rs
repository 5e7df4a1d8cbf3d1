use wellscene_core::geom::Vec3;
use wellscene_core::model::TrajectorySample;
use wellscene_core::trajectory::{build_trajectory, group_trajectories, WellTrajectory};

fn sample(well: &str, z: f64) -> TrajectorySample {
    TrajectorySample {
        well_name: well.to_string(),
        position: Vec3::new(100.0, 200.0 - z, z),
        md: -z,
    }
}

#[test]
fn single_sample_well_is_skipped() {
    let well = WellTrajectory {
        name: "NE6".to_string(),
        samples: vec![Vec3::new(1.0, 2.0, 3.0)],
    };
    assert!(build_trajectory(&well).is_none());
}

#[test]
fn two_sample_well_gets_one_line_and_top_label() {
    let well = WellTrajectory {
        name: "NE6".to_string(),
        samples: vec![Vec3::new(0.0, 0.0, -900.0), Vec3::new(5.0, 5.0, 12.5)],
    };
    let geometry = build_trajectory(&well).expect("two samples are enough");
    assert_eq!(1, geometry.polyline.num_lines());
    assert_eq!(2, geometry.polyline.num_points());
    assert_eq!(12.5, geometry.polyline.points[0].z);
    assert_eq!("NE6", geometry.label.text);
    assert!(geometry.label.position.distance(Vec3::new(5.0, 5.0, 12.5)) < 1e-3);
}

#[test]
fn non_finite_elevations_sort_last_and_never_carry_the_label() {
    let well = WellTrajectory {
        name: "NE7".to_string(),
        samples: vec![
            Vec3::new(1.0, 1.0, 10.0),
            Vec3::new(2.0, 2.0, f64::NAN),
            Vec3::new(3.0, 3.0, -100.0),
        ],
    };
    let geometry = build_trajectory(&well).expect("three samples");
    let z: Vec<f64> = geometry.polyline.points.iter().map(|p| p.z).collect();
    assert_eq!(10.0, z[0]);
    assert_eq!(-100.0, z[1]);
    assert!(z[2].is_nan());
    assert_eq!(Vec3::new(1.0, 1.0, 10.0), geometry.label.position);
}

#[test]
fn samples_are_ordered_by_descending_elevation() {
    let samples = vec![
        sample("A", -10.0),
        sample("B", 3.0),
        sample("A", 40.0),
        sample("A", -200.0),
        sample("B", -3.0),
        sample("C", 0.0),
    ];
    let wells = group_trajectories(&samples);
    let names: Vec<&str> = wells.iter().map(|w| w.name.as_str()).collect();
    assert_eq!(vec!["A", "B", "C"], names);

    let a = build_trajectory(&wells[0]).expect("three samples");
    let zs: Vec<f64> = a.polyline.points.iter().map(|p| p.z).collect();
    assert_eq!(vec![40.0, -10.0, -200.0], zs);
    assert_eq!(vec![vec![0, 1], vec![1, 2]], a.polyline.lines);

    assert!(build_trajectory(&wells[2]).is_none());
}
