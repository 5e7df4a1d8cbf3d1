use wellscene_core::color::PotentialColorMap;
use wellscene_core::edges::{
    assemble_selected, build_edge_polylines, EdgePolicy, EdgeSelection, POTENTIAL_FIELD,
};
use wellscene_core::geom::Vec3;
use wellscene_core::model::{EdgeGraph, EdgeRow};

fn row(seg_id: i64, point: i64, x: f64, potential: f64) -> EdgeRow {
    EdgeRow {
        seg_id,
        position: Vec3::new(x, 0.0, -x),
        potential,
        point,
    }
}

fn sample_rows() -> Vec<EdgeRow> {
    vec![
        row(0, 1, 0.0, 0.1),
        row(0, 2, 1.0, 0.2),
        row(0, 3, 2.0, 0.3),
        row(7, 1, 10.0, 0.9),
        row(4, 3, 22.0, 0.6),
        row(4, 1, 20.0, 0.4),
        row(4, 2, 21.0, 0.5),
    ]
}

#[test]
fn first_pair_policy_builds_one_line_per_group() {
    let built = build_edge_polylines(&sample_rows(), EdgePolicy::FirstPair);
    assert_eq!(1, built.stats.segments_built);
    assert_eq!(1, built.stats.skipped_short);
    assert_eq!(1, built.stats.skipped_unassigned);

    let mesh = &built.mesh;
    assert_eq!(1, mesh.num_lines());
    assert_eq!(2, mesh.num_points());
    assert_eq!(vec![0, 1], mesh.lines[0]);
    // File order, not point order.
    assert_eq!(22.0, mesh.points[0].x);
    assert_eq!(20.0, mesh.points[1].x);

    let scalars = mesh.scalars.as_ref().expect("potential attached");
    assert_eq!(POTENTIAL_FIELD, scalars.name);
    assert_eq!(vec![0.6, 0.4], scalars.values);
}

#[test]
fn polyline_policy_connects_all_rows_in_point_order() {
    let built = build_edge_polylines(&sample_rows(), EdgePolicy::Polyline);
    assert_eq!(1, built.stats.segments_built);
    let mesh = &built.mesh;
    assert_eq!(3, mesh.num_points());
    assert_eq!(2, mesh.num_lines());
    let xs: Vec<f64> = mesh.points.iter().map(|p| p.x).collect();
    assert_eq!(vec![20.0, 21.0, 22.0], xs);
    assert_eq!(vec![0.4, 0.5, 0.6], mesh.scalars.as_ref().map(|s| s.values.clone()).unwrap_or_default());
}

#[test]
fn unassigned_segment_is_skipped_regardless_of_size() {
    let rows: Vec<EdgeRow> = (0..10).map(|i| row(0, i, i as f64, 0.5)).collect();
    let built = build_edge_polylines(&rows, EdgePolicy::Polyline);
    assert!(built.mesh.is_empty());
    assert_eq!(0, built.stats.segments_built);
    assert_eq!(1, built.stats.skipped_unassigned);
}

#[test]
fn selection_parsing() {
    assert!(EdgeSelection::parse("", 5).is_empty());
    assert!(EdgeSelection::parse("  None ", 5).is_empty());
    assert!(EdgeSelection::parse("n", 5).is_empty());

    let sel = EdgeSelection::parse("0, 2,x,9,2,-1,3", 5);
    assert_eq!(vec![0, 2, 3], sel.indices);
    assert_eq!(vec!["x", "9", "-1"], sel.rejected);

    let sel = EdgeSelection::parse("abc", 5);
    assert!(sel.is_empty());
    assert_eq!(vec!["abc"], sel.rejected);

    assert_eq!(vec![0, 1, 2], EdgeSelection::all(3).indices);
    assert_eq!(vec![1], EdgeSelection::from_indices([1, 1, 8], 2).indices);
}

#[test]
fn assemble_merges_selected_sources_only() {
    let graphs = vec![
        EdgeGraph {
            name: "a".to_string(),
            rows: vec![row(1, 1, 0.0, 0.0), row(1, 2, 1.0, 1.0)],
            skipped_rows: 0,
        },
        EdgeGraph {
            name: "b".to_string(),
            rows: vec![row(0, 1, 5.0, 0.0), row(0, 2, 6.0, 0.0)],
            skipped_rows: 0,
        },
        EdgeGraph {
            name: "c".to_string(),
            rows: vec![row(3, 1, 8.0, 0.25), row(3, 2, 9.0, 0.75)],
            skipped_rows: 0,
        },
    ];

    let sel = EdgeSelection::from_indices([2, 1], graphs.len());
    let built = assemble_selected(&graphs, &sel, EdgePolicy::FirstPair);
    assert_eq!(1, built.stats.segments_built);
    assert_eq!(1, built.stats.skipped_unassigned);
    assert_eq!(2, built.mesh.num_points());
    assert_eq!(8.0, built.mesh.points[0].x);

    let all = assemble_selected(&graphs, &EdgeSelection::all(3), EdgePolicy::FirstPair);
    assert_eq!(2, all.mesh.num_lines());
    assert_eq!(vec![2, 3], all.mesh.lines[1]);
    assert_eq!(
        vec![0.0, 1.0, 0.25, 0.75],
        all.mesh.scalars.as_ref().map(|s| s.values.clone()).unwrap_or_default()
    );

    assert!(assemble_selected(&graphs, &EdgeSelection::none(), EdgePolicy::FirstPair)
        .mesh
        .is_empty());
}

#[test]
fn potential_colors_span_red_to_blue() {
    let lut = PotentialColorMap::default();
    assert_eq!(256, lut.len());
    let low = lut.color_at(0.0);
    let high = lut.color_at(1.0);
    assert!(low.r > 0.99 && low.b < 0.01);
    assert!(high.b > 0.99 && high.r < 0.01);
    assert_eq!(lut.color_at(-3.0), low);
    assert_eq!(lut.color_at(7.0), high);
    assert_eq!(lut.color_at(f64::NAN), low);
}
