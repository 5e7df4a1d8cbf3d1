use crate::geom::Vec3;
use crate::mesh::PolyMesh;
use crate::model::TrajectorySample;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Samples of one named well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellTrajectory {
    pub name: String,
    pub samples: Vec<Vec3>,
}

/// Text anchored in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLabel {
    pub text: String,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryGeometry {
    pub name: String,
    pub polyline: PolyMesh,
    /// Sits on the highest sample.
    pub label: WorldLabel,
}

/// Splits samples per well, wells in order of first appearance.
pub fn group_trajectories(samples: &[TrajectorySample]) -> Vec<WellTrajectory> {
    let mut wells: Vec<WellTrajectory> = Vec::new();
    for s in samples {
        match wells.iter_mut().find(|w| w.name == s.well_name) {
            Some(w) => w.samples.push(s.position),
            None => wells.push(WellTrajectory {
                name: s.well_name.clone(),
                samples: vec![s.position],
            }),
        }
    }
    wells
}

/// Polyline from the top of the well down, or `None` for fewer than two
/// samples.
pub fn build_trajectory(well: &WellTrajectory) -> Option<TrajectoryGeometry> {
    if well.samples.len() < 2 {
        debug!(well = %well.name, samples = well.samples.len(), "skipping short trajectory");
        return None;
    }

    // Highest first; NaN or infinite elevations sink to the bottom.
    let mut ordered = well.samples.clone();
    ordered.sort_by(|a, b| {
        b.z.is_finite()
            .cmp(&a.z.is_finite())
            .then_with(|| b.z.total_cmp(&a.z))
    });
    let top = ordered
        .iter()
        .copied()
        .find(|p| p.is_finite())
        .unwrap_or(ordered[0]);

    Some(TrajectoryGeometry {
        name: well.name.clone(),
        polyline: PolyMesh::polyline(ordered),
        label: WorldLabel {
            text: well.name.clone(),
            position: top,
        },
    })
}
