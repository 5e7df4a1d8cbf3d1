use crate::color::{generate_colors, Rgba};
use crate::geom::Vec3;
use crate::model::{AttitudePoint, WellObservationPoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("attribute arrays differ in length (points {points}, markers {markers}, azimuths {azimuths}, dips {dips})")]
    LengthMismatch {
        points: usize,
        markers: usize,
        azimuths: usize,
        dips: usize,
    },
    #[error("marker id {id} at index {index} is outside 0..{count}")]
    UnknownMarker { index: usize, id: usize, count: usize },
    #[error("marker {name:?} at index {index} is not in the catalog")]
    UnknownMarkerName { index: usize, name: String },
}

/// Dense ids and colors for the distinct marker names of one dataset.
///
/// Ids follow the sorted order of the names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerCatalog {
    names: Vec<String>,
    colors: Vec<Rgba>,
}

impl MarkerCatalog {
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut names: Vec<String> = names.into_iter().map(str::to_string).collect();
        names.sort();
        names.dedup();
        let colors = generate_colors(names.len());
        Self { names, colors }
    }

    pub fn from_observations(points: &[WellObservationPoint]) -> Self {
        Self::from_names(points.iter().map(|p| p.marker_name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.names.binary_search_by(|n| n.as_str().cmp(name)).ok()
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn color(&self, id: usize) -> Option<Rgba> {
        self.colors.get(id).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Marker id of every observation, in input order.
    ///
    /// Names missing from the catalog map to `None`.
    pub fn marker_ids(&self, points: &[WellObservationPoint]) -> Vec<Option<usize>> {
        points.iter().map(|p| self.id_of(&p.marker_name)).collect()
    }
}

/// Buckets points by marker id. The result has exactly the keys
/// `0..marker_count`, empty buckets included, and each bucket keeps input
/// order.
pub fn group_by_marker(
    points: &[Vec3],
    marker_ids: &[usize],
    azimuths: &[f64],
    dips: &[f64],
    marker_count: usize,
) -> Result<BTreeMap<usize, Vec<AttitudePoint>>, GroupError> {
    let n = points.len();
    if marker_ids.len() != n || azimuths.len() != n || dips.len() != n {
        return Err(GroupError::LengthMismatch {
            points: n,
            markers: marker_ids.len(),
            azimuths: azimuths.len(),
            dips: dips.len(),
        });
    }

    let mut groups: BTreeMap<usize, Vec<AttitudePoint>> =
        (0..marker_count).map(|id| (id, Vec::new())).collect();

    for (index, &id) in marker_ids.iter().enumerate() {
        let Some(bucket) = groups.get_mut(&id) else {
            return Err(GroupError::UnknownMarker {
                index,
                id,
                count: marker_count,
            });
        };
        bucket.push(AttitudePoint::new(points[index], azimuths[index], dips[index]));
    }

    Ok(groups)
}

/// [`group_by_marker`] driven directly by observations and a catalog built
/// from them.
pub fn group_observations(
    catalog: &MarkerCatalog,
    observations: &[WellObservationPoint],
) -> Result<BTreeMap<usize, Vec<AttitudePoint>>, GroupError> {
    let mut ids = Vec::with_capacity(observations.len());
    for (index, point) in observations.iter().enumerate() {
        let Some(id) = catalog.id_of(&point.marker_name) else {
            return Err(GroupError::UnknownMarkerName {
                index,
                name: point.marker_name.clone(),
            });
        };
        ids.push(id);
    }
    let points: Vec<Vec3> = observations.iter().map(|p| p.position).collect();
    let azimuths: Vec<f64> = observations.iter().map(|p| p.azimuth).collect();
    let dips: Vec<f64> = observations.iter().map(|p| p.dip).collect();
    group_by_marker(&points, &ids, &azimuths, &dips, catalog.len())
}
