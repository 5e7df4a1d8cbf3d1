use eframe::egui;
use wellscene_core::geom::{BBox3, Vec3};

const DEFAULT_YAW_DEG: f64 = 30.0;
const DEFAULT_PITCH_DEG: f64 = 25.0;
const PITCH_LIMIT_DEG: f64 = 89.0;

/// Orbit camera around a target in a Z-up world, projected orthographically.
///
/// `distance` is the world height that fits the shorter side of the canvas.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw_deg: f64,
    pub pitch_deg: f64,
    pub distance: f64,
    home: (Vec3, f64),
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::framing(None)
    }
}

impl OrbitCamera {
    pub fn framing(extents: Option<BBox3>) -> Self {
        let (target, distance) = match extents {
            Some(b) if !b.is_empty() => (b.center(), (b.diag() * 1.1).max(1.0)),
            _ => (Vec3::ZERO, 1000.0),
        };
        Self {
            target,
            yaw_deg: DEFAULT_YAW_DEG,
            pitch_deg: DEFAULT_PITCH_DEG,
            distance,
            home: (target, distance),
        }
    }

    pub fn reset(&mut self) {
        let (target, distance) = self.home;
        self.target = target;
        self.distance = distance;
        self.yaw_deg = DEFAULT_YAW_DEG;
        self.pitch_deg = DEFAULT_PITCH_DEG;
    }

    pub fn orbit(&mut self, delta: egui::Vec2) {
        self.yaw_deg = (self.yaw_deg + delta.x as f64 * 0.4).rem_euclid(360.0);
        self.pitch_deg =
            (self.pitch_deg + delta.y as f64 * 0.4).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    pub fn pan(&mut self, delta: egui::Vec2, rect: egui::Rect) {
        let (right, up, _) = self.basis();
        let scale = self.scale(rect);
        self.target = self.target - right * (delta.x as f64 / scale) + up * (delta.y as f64 / scale);
    }

    pub fn zoom(&mut self, scroll: f32) {
        let factor = (-scroll as f64 / 200.0).exp();
        self.distance = (self.distance * factor).clamp(1e-3, 1e9);
    }

    /// Right, up and forward unit vectors of the view.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let (sy, cy) = self.yaw_deg.to_radians().sin_cos();
        let (sp, cp) = self.pitch_deg.to_radians().sin_cos();
        let forward = Vec3::new(-cp * sy, cp * cy, -sp);
        let right = forward.cross(Vec3::Z).normalized();
        let up = right.cross(forward);
        (right, up, forward)
    }

    fn scale(&self, rect: egui::Rect) -> f64 {
        rect.width().min(rect.height()).max(1.0) as f64 / self.distance
    }

    pub fn projector(&self, rect: egui::Rect) -> Projector {
        let (right, up, forward) = self.basis();
        Projector {
            origin: rect.center(),
            target: self.target,
            right,
            up,
            forward,
            scale: self.scale(rect),
        }
    }
}

/// World to screen mapping for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    origin: egui::Pos2,
    target: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    scale: f64,
}

impl Projector {
    pub fn point(&self, p: Vec3) -> egui::Pos2 {
        let rel = p - self.target;
        let x = rel.dot(self.right) * self.scale;
        let y = rel.dot(self.up) * self.scale;
        egui::pos2(self.origin.x + x as f32, self.origin.y - y as f32)
    }

    /// Distance along the view direction; larger is farther away.
    pub fn depth(&self, p: Vec3) -> f64 {
        (p - self.target).dot(self.forward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(200.0, 100.0))
    }

    #[test]
    fn basis_is_right_handed() {
        let cam = OrbitCamera {
            yaw_deg: 47.0,
            pitch_deg: -12.0,
            ..OrbitCamera::default()
        };
        let (r, u, f) = cam.basis();
        assert!((r.cross(u) - (f * -1.0)).length() < 1e-12);
        assert!(r.z.abs() < 1e-12);
    }

    #[test]
    fn level_view_looks_north() {
        let cam = OrbitCamera {
            target: Vec3::ZERO,
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            distance: 100.0,
            home: (Vec3::ZERO, 100.0),
        };
        let proj = cam.projector(rect());
        let east = proj.point(Vec3::new(10.0, 0.0, 0.0));
        let up = proj.point(Vec3::new(0.0, 0.0, 10.0));
        assert!(east.x > 100.0);
        assert!(up.y < 50.0);
        assert!(proj.depth(Vec3::new(0.0, 10.0, 0.0)) > 0.0);
    }

    #[test]
    fn reset_restores_framing() {
        let mut cam = OrbitCamera::framing(None);
        cam.orbit(egui::vec2(50.0, 30.0));
        cam.zoom(120.0);
        cam.pan(egui::vec2(5.0, 5.0), rect());
        cam.reset();
        assert_eq!(Vec3::ZERO, cam.target);
        assert_eq!(1000.0, cam.distance);
        assert_eq!(DEFAULT_PITCH_DEG, cam.pitch_deg);
    }
}
