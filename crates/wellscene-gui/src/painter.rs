use crate::camera::Projector;
use eframe::egui;
use wellscene_core::color::{PotentialColorMap, Rgba};
use wellscene_core::geom::Vec3;
use wellscene_core::mesh::PolyMesh;
use wellscene_core::scene::{LabelStyle, LineStyle, RenderBackend, SurfaceStyle};
use wellscene_core::trajectory::WorldLabel;

pub fn color32(c: Rgba) -> egui::Color32 {
    let [r, g, b, a] = c.to_rgba8();
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

struct DepthShape {
    depth: f64,
    shape: egui::Shape,
}

struct Text {
    pos: egui::Pos2,
    text: String,
    font: egui::FontId,
    color: egui::Color32,
}

/// Collects scene primitives as egui shapes and paints them back to front.
pub struct EguiBackend {
    proj: Projector,
    shapes: Vec<DepthShape>,
    texts: Vec<Text>,
}

impl EguiBackend {
    pub fn new(proj: Projector) -> Self {
        Self {
            proj,
            shapes: Vec::new(),
            texts: Vec::new(),
        }
    }

    fn segment(&mut self, a: Vec3, b: Vec3, stroke: egui::Stroke) {
        if !(a.is_finite() && b.is_finite()) {
            return;
        }
        let depth = self.proj.depth((a + b) * 0.5);
        self.shapes.push(DepthShape {
            depth,
            shape: egui::Shape::line_segment([self.proj.point(a), self.proj.point(b)], stroke),
        });
    }

    /// Labels go on top of all geometry, like screen-space billboards.
    pub fn paint(mut self, painter: &egui::Painter) {
        self.shapes.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        for s in self.shapes {
            painter.add(s.shape);
        }
        for t in self.texts {
            painter.text(t.pos, egui::Align2::LEFT_BOTTOM, t.text, t.font, t.color);
        }
    }
}

impl RenderBackend for EguiBackend {
    fn filled_mesh(&mut self, mesh: &PolyMesh, style: SurfaceStyle) {
        let fill = color32(style.color.with_alpha(style.opacity));
        for poly in &mesh.polys {
            let corners: Vec<Vec3> = poly.iter().filter_map(|&i| mesh.points.get(i).copied()).collect();
            if corners.len() < 3 || corners.iter().any(|p| !p.is_finite()) {
                continue;
            }
            let center = corners.iter().fold(Vec3::ZERO, |acc, &p| acc + p) * (1.0 / corners.len() as f64);
            let points = corners.iter().map(|&p| self.proj.point(p)).collect();
            self.shapes.push(DepthShape {
                depth: self.proj.depth(center),
                shape: egui::Shape::convex_polygon(points, fill, egui::Stroke::NONE),
            });
        }
    }

    fn line_mesh(&mut self, mesh: &PolyMesh, style: LineStyle) {
        let stroke = egui::Stroke::new(style.width as f32, color32(style.color));
        for cell in &mesh.lines {
            for pair in cell.windows(2) {
                if let (Some(&a), Some(&b)) = (mesh.points.get(pair[0]), mesh.points.get(pair[1])) {
                    self.segment(a, b, stroke);
                }
            }
        }
    }

    fn scalar_line_mesh(&mut self, mesh: &PolyMesh, colors: &PotentialColorMap, width: f64) {
        let scalar = |i: usize| {
            mesh.scalars
                .as_ref()
                .and_then(|s| s.values.get(i).copied())
                .unwrap_or(f64::NAN)
        };
        for cell in &mesh.lines {
            for pair in cell.windows(2) {
                let (Some(&a), Some(&b)) = (mesh.points.get(pair[0]), mesh.points.get(pair[1])) else {
                    continue;
                };
                let value = 0.5 * (scalar(pair[0]) + scalar(pair[1]));
                let stroke = egui::Stroke::new(width as f32, color32(colors.color_at(value)));
                self.segment(a, b, stroke);
            }
        }
    }

    fn label(&mut self, label: &WorldLabel, style: LabelStyle) {
        if !label.position.is_finite() {
            return;
        }
        // Default egui fonts have no bold face.
        let font = if style.bold {
            egui::FontId::new(style.font_size + 2.0, egui::FontFamily::Proportional)
        } else {
            egui::FontId::proportional(style.font_size)
        };
        self.texts.push(Text {
            pos: self.proj.point(label.position) + egui::vec2(3.0, -3.0),
            text: label.text.clone(),
            font,
            color: color32(style.color),
        });
    }
}
