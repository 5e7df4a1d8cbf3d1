use crate::geom::{rotate, BBox3, Vec3};
use nalgebra::Rotation3;
use serde::{Deserialize, Serialize};

/// Named per-vertex scalar field, one value per mesh point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    pub name: String,
    pub values: Vec<f64>,
}

/// Plain geometry buffers: vertex positions plus line and polygon topology
/// indexing into them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolyMesh {
    pub points: Vec<Vec3>,
    /// Each entry is a polyline through the listed point indices.
    pub lines: Vec<Vec<usize>>,
    /// Each entry is a closed polygon through the listed point indices.
    pub polys: Vec<Vec<usize>>,
    pub scalars: Option<ScalarField>,
}

impl PolyMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single two-point line cell.
    pub fn line(a: Vec3, b: Vec3) -> Self {
        Self {
            points: vec![a, b],
            lines: vec![vec![0, 1]],
            polys: Vec::new(),
            scalars: None,
        }
    }

    /// Open polyline through `points` in order, stored as consecutive
    /// two-point cells.
    pub fn polyline(points: Vec<Vec3>) -> Self {
        let lines = (1..points.len()).map(|i| vec![i - 1, i]).collect();
        Self {
            points,
            lines,
            polys: Vec::new(),
            scalars: None,
        }
    }

    /// Regular polygon in the XY plane, normal +Z, first vertex on +X.
    pub fn regular_polygon(center: Vec3, radius: f64, sides: usize) -> Self {
        let sides = sides.max(3);
        let mut points = Vec::with_capacity(sides);
        for i in 0..sides {
            let a = i as f64 / sides as f64 * std::f64::consts::TAU;
            points.push(Vec3::new(
                center.x + radius * a.cos(),
                center.y + radius * a.sin(),
                center.z,
            ));
        }
        Self {
            points,
            lines: Vec::new(),
            polys: vec![(0..sides).collect()],
            scalars: None,
        }
    }

    pub fn with_scalars(mut self, name: &str, values: Vec<f64>) -> Self {
        self.scalars = Some(ScalarField {
            name: name.to_string(),
            values,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn num_polys(&self) -> usize {
        self.polys.len()
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        let mut out = self.clone();
        for p in &mut out.points {
            *p = *p + offset;
        }
        out
    }

    pub fn rotated(&self, rotation: &Rotation3<f64>) -> Self {
        let mut out = self.clone();
        for p in &mut out.points {
            *p = rotate(rotation, *p);
        }
        out
    }

    /// Appends `other`, offsetting its topology. Coincident points are kept.
    ///
    /// Scalars survive only when both sides carry a field of the same name;
    /// appending onto an empty mesh adopts `other`'s field.
    pub fn append(&mut self, other: &PolyMesh) {
        let base = self.points.len();
        let was_empty = self.is_empty();

        self.scalars = match (self.scalars.take(), &other.scalars) {
            (_, Some(theirs)) if was_empty => Some(theirs.clone()),
            (ours, _) if other.is_empty() => ours,
            (Some(mut ours), Some(theirs)) if ours.name == theirs.name => {
                ours.values.extend_from_slice(&theirs.values);
                Some(ours)
            }
            _ => None,
        };

        self.points.extend_from_slice(&other.points);
        self.lines
            .extend(other.lines.iter().map(|c| c.iter().map(|i| i + base).collect()));
        self.polys
            .extend(other.polys.iter().map(|c| c.iter().map(|i| i + base).collect()));
    }

    pub fn merged<'a>(meshes: impl IntoIterator<Item = &'a PolyMesh>) -> Self {
        let mut out = PolyMesh::new();
        for m in meshes {
            out.append(m);
        }
        out
    }

    pub fn bounds(&self) -> BBox3 {
        let mut bbox = BBox3::empty();
        for p in &self.points {
            bbox.include_point(*p);
        }
        bbox
    }

    /// Mean of all vertex positions; zero for an empty mesh.
    pub fn centroid(&self) -> Vec3 {
        if self.points.is_empty() {
            return Vec3::ZERO;
        }
        let sum = self.points.iter().fold(Vec3::ZERO, |acc, p| acc + *p);
        sum * (1.0 / self.points.len() as f64)
    }
}
