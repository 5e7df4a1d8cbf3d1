//! Single-shot scene assembly and the seam to a rendering toolkit.

use crate::color::{PotentialColorMap, Rgba};
use crate::compass::{compass_anchor, compass_rose, CompassRose};
use crate::config::{AttitudeMode, SceneConfig};
use crate::disc::{build_oriented_geometry, DiscTemplate, MarkerGeometryBatch};
use crate::edges::{assemble_selected, EdgeAssembly, EdgeSelection};
use crate::geom::BBox3;
use crate::markers::{group_observations, GroupError, MarkerCatalog};
use crate::mesh::PolyMesh;
use crate::model::{WellDataset, WellObservationPoint};
use crate::orient::Attitude;
use crate::report::{BuildReport, MarkerReport, StatsReport, Warning};
use crate::trajectory::{build_trajectory, group_trajectories, TrajectoryGeometry, WorldLabel};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    pub color: Rgba,
    pub opacity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub color: Rgba,
    pub font_size: f32,
    pub bold: bool,
}

/// What a toolkit has to provide to show a [`Scene`].
pub trait RenderBackend {
    fn filled_mesh(&mut self, mesh: &PolyMesh, style: SurfaceStyle);
    fn line_mesh(&mut self, mesh: &PolyMesh, style: LineStyle);
    /// Line mesh colored per vertex through `colors`.
    fn scalar_line_mesh(&mut self, mesh: &PolyMesh, colors: &PotentialColorMap, width: f64);
    fn label(&mut self, label: &WorldLabel, style: LabelStyle);
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub config: SceneConfig,
    pub catalog: MarkerCatalog,
    /// One batch per marker with at least one point, by marker id.
    pub batches: Vec<MarkerGeometryBatch>,
    pub wells: Vec<TrajectoryGeometry>,
    pub edges: EdgeAssembly,
    pub potential_colors: PotentialColorMap,
    pub compass: Option<CompassRose>,
    pub extents: Option<BBox3>,
    pub report: BuildReport,
}

impl Scene {
    pub fn render<B: RenderBackend + ?Sized>(&self, backend: &mut B) {
        let cfg = &self.config;

        for batch in &self.batches {
            backend.filled_mesh(
                &batch.geometry.discs,
                SurfaceStyle {
                    color: batch.color,
                    opacity: cfg.disc.opacity,
                },
            );
            backend.line_mesh(
                &batch.geometry.line_mesh(),
                LineStyle {
                    color: cfg.lines.color,
                    width: cfg.lines.width,
                },
            );
        }

        let well_label = LabelStyle {
            color: cfg.wells.color,
            font_size: cfg.wells.label_font_size,
            bold: true,
        };
        for well in &self.wells {
            backend.line_mesh(
                &well.polyline,
                LineStyle {
                    color: cfg.wells.color,
                    width: cfg.wells.line_width,
                },
            );
            backend.label(&well.label, well_label);
        }

        if !self.edges.mesh.is_empty() {
            backend.scalar_line_mesh(&self.edges.mesh, &self.potential_colors, cfg.edges.line_width);
        }

        if let Some(rose) = &self.compass {
            backend.line_mesh(
                &rose.lines,
                LineStyle {
                    color: Rgba::BLACK,
                    width: 2.0,
                },
            );
            for label in &rose.labels {
                backend.label(
                    label,
                    LabelStyle {
                        color: Rgba::BLACK,
                        font_size: 14.0,
                        bold: true,
                    },
                );
            }
        }
    }
}

pub struct SceneBuilder {
    cfg: SceneConfig,
}

impl SceneBuilder {
    pub fn new(cfg: SceneConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.cfg
    }

    pub fn build(&self, dataset: &WellDataset, selection: &EdgeSelection) -> Result<Scene, GroupError> {
        let mut warnings = Vec::new();
        let mut stats = StatsReport {
            observations: dataset.observations.len(),
            edge_sources_available: dataset.edges.len(),
            edge_sources_selected: selection.indices.len(),
            ..StatsReport::default()
        };

        if dataset.observations.is_empty() {
            warnings.push(Warning::new("no_observations", "No observation points to draw."));
        }

        // Ids come from every observation so a marker keeps its color even
        // when all its points are filtered out below.
        let catalog = MarkerCatalog::from_observations(&dataset.observations);
        let accepted = self.screen_observations(&dataset.observations, &mut stats);
        if stats.observations_rejected > 0 {
            warnings.push(Warning::new(
                "observations_rejected",
                format!(
                    "{} observation(s) had an azimuth/dip outside the valid range and were dropped.",
                    stats.observations_rejected
                ),
            ));
        }
        if stats.observations_non_finite > 0 {
            warnings.push(Warning::new(
                "observations_non_finite",
                format!(
                    "{} observation(s) carry NaN/inf values; their discs will be degenerate.",
                    stats.observations_non_finite
                ),
            ));
        }

        let groups = group_observations(&catalog, &accepted)?;
        let template = DiscTemplate::new(self.cfg.disc.radius, self.cfg.disc.resolution);

        let mut batches = Vec::new();
        let mut markers = Vec::with_capacity(catalog.len());
        for (marker_id, points) in &groups {
            let name = catalog.name(*marker_id).unwrap_or_default().to_string();
            let color = catalog.color(*marker_id).unwrap_or(Rgba::WHITE);
            markers.push(MarkerReport {
                id: *marker_id,
                name: name.clone(),
                points: points.len(),
                color,
            });
            if points.is_empty() {
                continue;
            }

            let geometry = build_oriented_geometry(points, &template);
            stats.discs += geometry.disc_count();
            stats.indicator_lines += geometry.lines.len();
            batches.push(MarkerGeometryBatch {
                marker_id: *marker_id,
                marker_name: name,
                color,
                geometry,
            });
        }
        stats.markers = catalog.len();

        let mut wells = Vec::new();
        for well in group_trajectories(&dataset.trajectories) {
            match build_trajectory(&well) {
                Some(geometry) => wells.push(geometry),
                None => stats.wells_skipped += 1,
            }
        }
        stats.wells_rendered = wells.len();
        if stats.wells_skipped > 0 {
            warnings.push(Warning::new(
                "wells_skipped",
                format!(
                    "{} well(s) have fewer than 2 trajectory samples and were not drawn.",
                    stats.wells_skipped
                ),
            ));
        }

        if !selection.rejected.is_empty() {
            warnings.push(Warning::new(
                "edge_selection_rejected",
                format!("Ignored edge selection tokens: {}", selection.rejected.join(", ")),
            ));
        }
        let edges = assemble_selected(&dataset.edges, selection, self.cfg.edges.policy);
        stats.edge_segments = edges.stats.segments_built;
        stats.edge_segments_skipped_short = edges.stats.skipped_short;
        stats.edge_segments_skipped_unassigned = edges.stats.skipped_unassigned;
        if !selection.is_empty() && edges.mesh.is_empty() {
            warnings.push(Warning::new(
                "edges_empty",
                "The selected edge sources contain no drawable segments.",
            ));
        }

        let mut data_extents = BBox3::empty();
        for p in &accepted {
            data_extents.include_point(p.position);
        }
        let compass = if data_extents.is_empty() {
            None
        } else {
            let center = compass_anchor(&data_extents, self.cfg.compass.offset_factor);
            Some(compass_rose(center, self.cfg.compass.size))
        };

        let mut extents = BBox3::empty();
        for batch in &batches {
            extents = extents.union(&batch.geometry.discs.bounds());
        }
        for well in &wells {
            extents = extents.union(&well.polyline.bounds());
        }
        extents = extents.union(&edges.mesh.bounds());
        if let Some(rose) = &compass {
            extents = extents.union(&rose.lines.bounds());
        }
        let extents = (!extents.is_empty()).then_some(extents);

        info!(
            observations = stats.observations,
            markers = stats.markers,
            discs = stats.discs,
            wells = stats.wells_rendered,
            edge_segments = stats.edge_segments,
            "scene assembled"
        );

        Ok(Scene {
            config: self.cfg.clone(),
            catalog,
            batches,
            wells,
            edges,
            potential_colors: PotentialColorMap::default(),
            compass,
            extents,
            report: BuildReport {
                stats,
                extents,
                markers,
                warnings,
            },
        })
    }

    fn screen_observations(
        &self,
        observations: &[WellObservationPoint],
        stats: &mut StatsReport,
    ) -> Vec<WellObservationPoint> {
        let mut accepted = Vec::with_capacity(observations.len());
        for obs in observations {
            let checked = match self.cfg.validation.attitude {
                AttitudeMode::Passthrough => Ok(None),
                AttitudeMode::Clamp => Attitude::clamped(obs.azimuth, obs.dip).map(Some),
                AttitudeMode::Reject => Attitude::new(obs.azimuth, obs.dip).map(Some),
            };
            match checked {
                Ok(attitude) => {
                    let mut obs = obs.clone();
                    if let Some(a) = attitude {
                        obs.azimuth = a.azimuth();
                        obs.dip = a.dip();
                    }
                    if !(obs.position.is_finite() && obs.azimuth.is_finite() && obs.dip.is_finite()) {
                        warn!(well = %obs.well_name, marker = %obs.marker_name, "non-finite observation");
                        stats.observations_non_finite += 1;
                    }
                    accepted.push(obs);
                }
                Err(err) => {
                    warn!(well = %obs.well_name, marker = %obs.marker_name, error = %err, "dropping observation");
                    stats.observations_rejected += 1;
                }
            }
        }
        accepted
    }
}
