use crate::geom::{BBox3, Vec3};
use crate::mesh::PolyMesh;
use crate::trajectory::WorldLabel;
use serde::{Deserialize, Serialize};

/// Horizontal wind rose: four arms with an arrow head on north.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompassRose {
    pub center: Vec3,
    pub size: f64,
    pub lines: PolyMesh,
    pub labels: Vec<WorldLabel>,
}

/// Rose position just outside the south-east corner of `extents`, at the
/// lowest elevation.
pub fn compass_anchor(extents: &BBox3, offset_factor: f64) -> Vec3 {
    let offset = offset_factor * extents.width();
    Vec3::new(extents.max.x + offset, extents.min.y - offset, extents.min.z)
}

pub fn compass_rose(center: Vec3, size: f64) -> CompassRose {
    let arm = size * 0.5;
    let head = size * 0.08;
    let label_gap = size * 0.1;

    let north = center + Vec3::Y * arm;
    let south = center - Vec3::Y * arm;
    let east = center + Vec3::X * arm;
    let west = center - Vec3::X * arm;

    let mut lines = PolyMesh::new();
    lines.append(&PolyMesh::line(south, north));
    lines.append(&PolyMesh::line(west, east));
    lines.append(&PolyMesh::line(north, north + Vec3::new(-head, -head * 1.5, 0.0)));
    lines.append(&PolyMesh::line(north, north + Vec3::new(head, -head * 1.5, 0.0)));

    let labels = [
        ("N", north + Vec3::Y * label_gap),
        ("E", east + Vec3::X * label_gap),
        ("S", south - Vec3::Y * label_gap),
        ("W", west - Vec3::X * label_gap),
    ]
    .into_iter()
    .map(|(text, position)| WorldLabel {
        text: text.to_string(),
        position,
    })
    .collect();

    CompassRose {
        center,
        size,
        lines,
        labels,
    }
}
