//! Potential-field edge graphs as colorable line meshes.

use crate::mesh::PolyMesh;
use crate::model::{EdgeGraph, EdgeRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Segment id meaning "not part of any segment".
pub const UNASSIGNED_SEGMENT: i64 = 0;

/// Name of the per-vertex scalar attached to edge meshes.
pub const POTENTIAL_FIELD: &str = "potential";

/// How the rows of one segment group become line cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// One line between the first two rows of the group, in file order.
    #[default]
    FirstPair,
    /// A polyline through every row of the group, ordered by `point`.
    Polyline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeStats {
    pub segments_built: usize,
    pub skipped_short: usize,
    pub skipped_unassigned: usize,
}

impl EdgeStats {
    fn absorb(&mut self, other: EdgeStats) {
        self.segments_built += other.segments_built;
        self.skipped_short += other.skipped_short;
        self.skipped_unassigned += other.skipped_unassigned;
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeAssembly {
    /// Line cells with a `potential` scalar per vertex.
    pub mesh: PolyMesh,
    pub stats: EdgeStats,
}

/// Groups rows by segment id and turns every usable group into line cells.
///
/// Groups with id [`UNASSIGNED_SEGMENT`] or fewer than two rows are skipped
/// and counted.
pub fn build_edge_polylines(rows: &[EdgeRow], policy: EdgePolicy) -> EdgeAssembly {
    let mut groups: BTreeMap<i64, Vec<&EdgeRow>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.seg_id).or_default().push(row);
    }

    let mut out = EdgeAssembly {
        mesh: PolyMesh::new().with_scalars(POTENTIAL_FIELD, Vec::new()),
        stats: EdgeStats::default(),
    };

    for (seg_id, mut group) in groups {
        if seg_id == UNASSIGNED_SEGMENT {
            debug!(rows = group.len(), "skipping unassigned edge rows");
            out.stats.skipped_unassigned += 1;
            continue;
        }
        if group.len() < 2 {
            debug!(seg_id, "skipping single-row edge segment");
            out.stats.skipped_short += 1;
            continue;
        }

        let used: &[&EdgeRow] = match policy {
            EdgePolicy::FirstPair => &group[..2],
            EdgePolicy::Polyline => {
                group.sort_by_key(|r| r.point);
                &group
            }
        };

        let points = used.iter().map(|r| r.position).collect();
        let potentials = used.iter().map(|r| r.potential).collect();
        let segment = PolyMesh::polyline(points).with_scalars(POTENTIAL_FIELD, potentials);
        out.mesh.append(&segment);
        out.stats.segments_built += 1;
    }

    out
}

/// Which edge-graph sources to display, as indices into the loaded list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeSelection {
    pub indices: Vec<usize>,
    /// Tokens dropped while parsing.
    pub rejected: Vec<String>,
}

impl EdgeSelection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all(available: usize) -> Self {
        Self {
            indices: (0..available).collect(),
            rejected: Vec::new(),
        }
    }

    /// Keeps in-range indices, first occurrence order.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>, available: usize) -> Self {
        let mut out = Self::none();
        for i in indices {
            if i >= available {
                out.rejected.push(i.to_string());
            } else if !out.indices.contains(&i) {
                out.indices.push(i);
            }
        }
        out
    }

    /// Parses a comma-separated index list such as `"0,2,3"`.
    ///
    /// Empty input, `none`, `no` and `n` select nothing. Tokens that are not
    /// non-negative integers below `available` are dropped into `rejected`.
    pub fn parse(input: &str, available: usize) -> Self {
        let choice = input.trim().to_ascii_lowercase();
        if matches!(choice.as_str(), "" | "none" | "no" | "n") {
            return Self::none();
        }

        let mut out = Self::none();
        for token in choice.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<usize>() {
                Ok(i) if i < available => {
                    if !out.indices.contains(&i) {
                        out.indices.push(i);
                    }
                }
                _ => out.rejected.push(token.to_string()),
            }
        }

        if !out.rejected.is_empty() {
            warn!(rejected = ?out.rejected, "ignoring invalid edge selection tokens");
        }
        if out.indices.is_empty() {
            warn!("no valid edge source index selected");
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Builds and merges the selected sources. Sources that contribute nothing
/// are left out.
pub fn assemble_selected(graphs: &[EdgeGraph], selection: &EdgeSelection, policy: EdgePolicy) -> EdgeAssembly {
    let mut out = EdgeAssembly::default();
    for &idx in &selection.indices {
        let Some(graph) = graphs.get(idx) else {
            continue;
        };
        let built = build_edge_polylines(&graph.rows, policy);
        debug!(
            source = %graph.name,
            segments = built.stats.segments_built,
            "assembled edge source"
        );
        out.stats.absorb(built.stats);
        if !built.mesh.is_empty() {
            out.mesh.append(&built.mesh);
        }
    }
    out
}
