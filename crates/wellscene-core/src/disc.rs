use crate::color::Rgba;
use crate::geom::Vec3;
use crate::mesh::PolyMesh;
use crate::model::AttitudePoint;
use crate::orient::{self, OrientedDisc};
use serde::{Deserialize, Serialize};

/// Base disc shared by every observation: a regular polygon centred on the
/// origin in the XY plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscTemplate {
    pub radius: f64,
    pub resolution: usize,
    pub mesh: PolyMesh,
}

impl DiscTemplate {
    pub fn new(radius: f64, resolution: usize) -> Self {
        Self {
            radius,
            resolution,
            mesh: PolyMesh::regular_polygon(Vec3::ZERO, radius, resolution),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorKind {
    Strike,
    Dip,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorLine {
    pub kind: IndicatorKind,
    pub a: Vec3,
    pub b: Vec3,
}

impl IndicatorLine {
    fn from_mesh(kind: IndicatorKind, mesh: &PolyMesh) -> Option<Self> {
        match mesh.points.as_slice() {
            [a, b, ..] => Some(Self { kind, a: *a, b: *b }),
            _ => None,
        }
    }

    pub fn midpoint(&self) -> Vec3 {
        (self.a + self.b) * 0.5
    }

    pub fn vector(&self) -> Vec3 {
        self.b - self.a
    }
}

/// Merged discs plus the flat list of indicator lines for one set of points.
///
/// Lines are kept apart from the discs so they can be styled on their own.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerGeometry {
    pub discs: PolyMesh,
    pub lines: Vec<IndicatorLine>,
}

impl MarkerGeometry {
    pub fn disc_count(&self) -> usize {
        self.discs.num_polys()
    }

    /// All indicator lines as one line mesh.
    pub fn line_mesh(&self) -> PolyMesh {
        let mut mesh = PolyMesh::new();
        for l in &self.lines {
            mesh.append(&PolyMesh::line(l.a, l.b));
        }
        mesh
    }
}

/// Calls `orient_fn` once per point and merges the results.
///
/// Non-finite inputs are not filtered here; they produce non-finite vertices.
pub fn build_marker_geometry<F>(
    points: &[AttitudePoint],
    template: &DiscTemplate,
    orient_fn: F,
) -> MarkerGeometry
where
    F: Fn(&PolyMesh, &AttitudePoint, f64) -> OrientedDisc,
{
    let mut out = MarkerGeometry::default();
    out.lines.reserve(points.len() * 2);

    for point in points {
        let placed = orient_fn(&template.mesh, point, template.radius);
        out.discs.append(&placed.disc);
        out.lines
            .extend(IndicatorLine::from_mesh(IndicatorKind::Strike, &placed.strike_line));
        out.lines
            .extend(IndicatorLine::from_mesh(IndicatorKind::Dip, &placed.dip_line));
    }

    out
}

/// [`build_marker_geometry`] with the standard orientation.
pub fn build_oriented_geometry(points: &[AttitudePoint], template: &DiscTemplate) -> MarkerGeometry {
    build_marker_geometry(points, template, orient::place)
}

/// Geometry of every point sharing one marker, tagged with its color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerGeometryBatch {
    pub marker_id: usize,
    pub marker_name: String,
    pub color: Rgba,
    pub geometry: MarkerGeometry,
}
