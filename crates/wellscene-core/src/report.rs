use crate::color::Rgba;
use crate::geom::BBox3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

impl Warning {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerReport {
    pub id: usize,
    pub name: String,
    pub points: usize,
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsReport {
    pub observations: usize,
    pub observations_rejected: usize,
    pub observations_non_finite: usize,
    pub markers: usize,
    pub discs: usize,
    pub indicator_lines: usize,
    pub wells_rendered: usize,
    pub wells_skipped: usize,
    pub edge_sources_available: usize,
    pub edge_sources_selected: usize,
    pub edge_segments: usize,
    pub edge_segments_skipped_short: usize,
    pub edge_segments_skipped_unassigned: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub stats: StatsReport,
    pub extents: Option<BBox3>,
    pub markers: Vec<MarkerReport>,
    pub warnings: Vec<Warning>,
}
