use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Seed for marker colors; fixed so a dataset always renders the same way.
pub const MARKER_COLOR_SEED: u64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WELL_GRAY: Self = Self::new(0.1, 0.1, 0.1, 1.0);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// `n` RGBA colors, each channel uniform in [0, 1), alpha 1. Identical for
/// every call with the same `n`.
pub fn generate_colors(n: usize) -> Vec<Rgba> {
    let mut rng = StdRng::seed_from_u64(MARKER_COLOR_SEED);
    (0..n)
        .map(|_| {
            let r = rng.gen::<f64>();
            let g = rng.gen::<f64>();
            let b = rng.gen::<f64>();
            Rgba::rgb(r, g, b)
        })
        .collect()
}

/// Scalar range used for edge potentials.
pub const POTENTIAL_RANGE: (f64, f64) = (0.0, 1.0);

/// Lookup table from a scalar to a color, sweeping hue from red at the low
/// end to blue at the high end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialColorMap {
    pub range: (f64, f64),
    table: Vec<Rgba>,
}

impl Default for PotentialColorMap {
    fn default() -> Self {
        Self::new(POTENTIAL_RANGE, 256)
    }
}

impl PotentialColorMap {
    pub fn new(range: (f64, f64), entries: usize) -> Self {
        let entries = entries.max(2);
        let table = (0..entries)
            .map(|i| {
                let t = i as f64 / (entries - 1) as f64;
                hsv_to_rgb(t * 2.0 / 3.0, 1.0, 1.0)
            })
            .collect();
        Self { range, table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Color for `value`; values outside the range clamp to its ends and NaN
    /// maps to the low end.
    pub fn color_at(&self, value: f64) -> Rgba {
        let (lo, hi) = self.range;
        let span = (hi - lo).max(f64::EPSILON);
        let t = ((value - lo) / span).clamp(0.0, 1.0);
        let t = if t.is_nan() { 0.0 } else { t };
        let idx = (t * (self.table.len() - 1) as f64).round() as usize;
        self.table[idx.min(self.table.len() - 1)]
    }

    pub fn table(&self) -> &[Rgba] {
        &self.table
    }
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgba {
    let h6 = (h.rem_euclid(1.0)) * 6.0;
    let sector = h6.floor() as i32;
    let f = h6 - sector as f64;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match sector {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgba::rgb(r, g, b)
}
