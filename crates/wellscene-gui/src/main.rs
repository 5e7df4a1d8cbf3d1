mod camera;
mod painter;

use anyhow::{Context, Result};
use camera::OrbitCamera;
use eframe::egui;
use painter::{color32, EguiBackend};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use wellscene_core::color::PotentialColorMap;
use wellscene_core::config::{SceneConfig, BACKGROUND, WINDOW_SIZE};
use wellscene_core::edges::EdgeSelection;
use wellscene_core::model::WellDataset;
use wellscene_core::scene::{Scene, SceneBuilder};
use wellscene_import::{load_dataset, DatasetPaths};

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // wellscene-viewer [OBSERVATIONS TRAJECTORIES [EDGES_DIR]]
    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("wellscene")
            .with_inner_size(WINDOW_SIZE),
        ..eframe::NativeOptions::default()
    };
    eframe::run_native(
        "wellscene",
        native_options,
        Box::new(move |cc| Ok(Box::new(WellSceneApp::new(cc, args)))),
    )
}

struct WellSceneApp {
    observations_path: Option<PathBuf>,
    trajectories_path: Option<PathBuf>,
    edges_dir: Option<PathBuf>,

    config: SceneConfig,
    dataset: Option<WellDataset>,
    edge_enabled: Vec<bool>,
    scene: Option<Scene>,

    camera: OrbitCamera,
    status: String,
}

impl WellSceneApp {
    fn new(_cc: &eframe::CreationContext<'_>, args: Vec<PathBuf>) -> Self {
        let mut args = args.into_iter();
        let mut app = Self {
            observations_path: args.next(),
            trajectories_path: args.next(),
            edges_dir: args.next(),
            config: SceneConfig::default(),
            dataset: None,
            edge_enabled: Vec::new(),
            scene: None,
            camera: OrbitCamera::default(),
            status: "Pick an observation table and a trajectory table to begin.".to_string(),
        };
        app.reload();
        app
    }

    fn pick_observations(&mut self) {
        let file = rfd::FileDialog::new()
            .add_filter("Observation table", &["csv"])
            .pick_file();
        if let Some(path) = file {
            self.observations_path = Some(path);
            self.reload();
        }
    }

    fn pick_trajectories(&mut self) {
        let file = rfd::FileDialog::new()
            .add_filter("Trajectory table", &["txt", "dat", "csv"])
            .pick_file();
        if let Some(path) = file {
            self.trajectories_path = Some(path);
            self.reload();
        }
    }

    fn pick_edges_dir(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            self.edges_dir = Some(path);
            self.reload();
        }
    }

    fn reload(&mut self) {
        let (Some(observations), Some(trajectories)) =
            (self.observations_path.clone(), self.trajectories_path.clone())
        else {
            return;
        };
        let paths = DatasetPaths {
            observations,
            trajectories,
            edges_dir: self.edges_dir.clone(),
        };
        match load_dataset(&paths) {
            Ok(dataset) => {
                self.edge_enabled = vec![false; dataset.edges.len()];
                self.dataset = Some(dataset);
                self.rebuild();
                if let Some(scene) = &self.scene {
                    self.camera = OrbitCamera::framing(scene.extents);
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to load dataset");
                self.status = format!("Failed to load: {e}");
                self.dataset = None;
                self.scene = None;
            }
        }
    }

    fn rebuild(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let enabled = self
            .edge_enabled
            .iter()
            .enumerate()
            .filter_map(|(i, on)| on.then_some(i));
        let selection = EdgeSelection::from_indices(enabled, dataset.edges.len());

        match SceneBuilder::new(self.config.clone()).build(dataset, &selection) {
            Ok(scene) => {
                let stats = &scene.report.stats;
                self.status = format!(
                    "{} discs in {} markers, {} wells, {} edge segments",
                    stats.discs, stats.markers, stats.wells_rendered, stats.edge_segments
                );
                info!(status = %self.status, "scene rebuilt");
                self.scene = Some(scene);
            }
            Err(e) => {
                self.status = format!("Failed to assemble scene: {e}");
                self.scene = None;
            }
        }
    }

    fn save_report(&mut self) {
        let Some(scene) = &self.scene else {
            return;
        };
        let file = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("wellscene.report.json")
            .save_file();
        if let Some(path) = file {
            self.status = match write_json(&path, &scene.report) {
                Ok(()) => format!("Wrote report: {}", path.display()),
                Err(e) => format!("Failed to write report: {e}"),
            };
        }
    }
}

impl eframe::App for WellSceneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Observations…").clicked() {
                    self.pick_observations();
                }
                if ui.button("Trajectories…").clicked() {
                    self.pick_trajectories();
                }
                if ui.button("Edge folder…").clicked() {
                    self.pick_edges_dir();
                }
                ui.separator();
                if ui.button("Reset view").clicked() {
                    self.camera.reset();
                }
                if ui
                    .add_enabled(self.scene.is_some(), egui::Button::new("Save report…"))
                    .clicked()
                {
                    self.save_report();
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::SidePanel::left("legend")
            .resizable(true)
            .default_width(200.0)
            .show(ctx, |ui| draw_side_panel(ui, self));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| draw_view(ui, self));
    }
}

fn draw_side_panel(ui: &mut egui::Ui, app: &mut WellSceneApp) {
    for (label, path) in [
        ("Observations", &app.observations_path),
        ("Trajectories", &app.trajectories_path),
        ("Edges", &app.edges_dir),
    ] {
        if let Some(p) = path {
            ui.label(format!("{label}: {}", file_name(p)));
        }
    }

    let Some(scene) = &app.scene else {
        ui.label("No scene loaded.");
        return;
    };

    ui.separator();
    ui.heading("Markers");
    egui::ScrollArea::vertical()
        .id_salt("markers")
        .max_height(240.0)
        .show(ui, |ui| {
            for m in &scene.report.markers {
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, egui::CornerRadius::same(2), color32(m.color));
                    ui.label(format!("{} ({})", m.name, m.points));
                });
            }
        });

    ui.separator();
    draw_scalar_bar(ui, &scene.potential_colors);

    let names: Vec<String> = app
        .dataset
        .as_ref()
        .map(|d| d.edges.iter().map(|g| g.name.clone()).collect())
        .unwrap_or_default();
    if names.is_empty() {
        return;
    }
    ui.separator();
    ui.heading("Edge sources");
    let mut changed = false;
    for (i, name) in names.iter().enumerate() {
        if let Some(on) = app.edge_enabled.get_mut(i) {
            changed |= ui.checkbox(on, format!("{i}: {name}")).changed();
        }
    }
    if changed {
        app.rebuild();
    }
}

fn draw_scalar_bar(ui: &mut egui::Ui, colors: &PotentialColorMap) {
    ui.label("Potential");
    let width = ui.available_width().min(180.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 14.0), egui::Sense::hover());
    let painter = ui.painter();
    let n = colors.len().max(1);
    let step = rect.width() / n as f32;
    for (i, c) in colors.table().iter().enumerate() {
        let x0 = rect.left() + i as f32 * step;
        let cell = egui::Rect::from_min_max(
            egui::pos2(x0, rect.top()),
            egui::pos2(x0 + step + 0.5, rect.bottom()),
        );
        painter.rect_filled(cell, egui::CornerRadius::same(0), color32(*c));
    }
    let (lo, hi) = colors.range;
    ui.horizontal(|ui| {
        ui.label(format!("{lo}"));
        ui.add_space((width - 30.0).max(0.0));
        ui.label(format!("{hi}"));
    });
}

fn draw_view(ui: &mut egui::Ui, app: &mut WellSceneApp) {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, egui::CornerRadius::same(0), color32(BACKGROUND));

    let Some(scene) = &app.scene else {
        return;
    };

    let shift = ui.input(|i| i.modifiers.shift);
    if response.dragged_by(egui::PointerButton::Secondary)
        || response.dragged_by(egui::PointerButton::Middle)
        || (shift && response.dragged_by(egui::PointerButton::Primary))
    {
        app.camera.pan(response.drag_delta(), rect);
    } else if response.dragged_by(egui::PointerButton::Primary) {
        app.camera.orbit(response.drag_delta());
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll.abs() > 0.0 {
            app.camera.zoom(scroll);
        }
    }
    if response.double_clicked() {
        app.camera.reset();
    }

    let mut backend = EguiBackend::new(app.camera.projector(rect));
    scene.render(&mut backend);
    backend.paint(&painter);
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize json")?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
