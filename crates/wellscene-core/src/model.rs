use crate::geom::Vec3;
use serde::{Deserialize, Serialize};

/// One row of the observation table: a marker pick on a well with the
/// attitude of the surface at that depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellObservationPoint {
    pub well_name: String,
    pub position: Vec3,
    pub md: f64,
    pub marker_name: String,
    /// Inclination from horizontal, degrees.
    pub dip: f64,
    /// Dip direction as a compass bearing, degrees.
    pub azimuth: f64,
    /// Blank in the source table reads as `None`.
    pub point_number: Option<i64>,
    pub marker_fault: Option<i64>,
}

/// The `(x, y, z, azimuth, dip)` tuple consumed by the disc builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttitudePoint {
    pub position: Vec3,
    pub azimuth: f64,
    pub dip: f64,
}

impl AttitudePoint {
    pub const fn new(position: Vec3, azimuth: f64, dip: f64) -> Self {
        Self {
            position,
            azimuth,
            dip,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.azimuth.is_finite() && self.dip.is_finite()
    }
}

impl From<&WellObservationPoint> for AttitudePoint {
    fn from(p: &WellObservationPoint) -> Self {
        Self::new(p.position, p.azimuth, p.dip)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub well_name: String,
    pub position: Vec3,
    pub md: f64,
}

/// One row of an edge-graph source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub seg_id: i64,
    pub position: Vec3,
    pub potential: f64,
    pub point: i64,
}

/// All rows of one edge-graph file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeGraph {
    pub name: String,
    pub rows: Vec<EdgeRow>,
    /// Rows dropped at load time for a blank `Seg_id` or `point`.
    #[serde(default)]
    pub skipped_rows: usize,
}

impl EdgeGraph {
    pub fn distinct_segments(&self) -> usize {
        let mut ids: Vec<i64> = self.rows.iter().map(|r| r.seg_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

/// Everything one visualization session is built from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WellDataset {
    pub observations: Vec<WellObservationPoint>,
    pub trajectories: Vec<TrajectorySample>,
    pub edges: Vec<EdgeGraph>,
}
