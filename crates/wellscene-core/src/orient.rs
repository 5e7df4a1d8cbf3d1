//! Attitude (dip direction + dip) to disc orientation.
//!
//! Conventions: azimuth is the dip direction as a compass bearing (0° north,
//! clockwise positive, +Y is north and +X is east); dip is the inclination
//! of the plane below horizontal, 0° flat and 90° vertical. World +Z is up.
//!
//! A disc template is authored in the XY plane with normal +Z. [`orient`]
//! rotates it onto the plane normal with the minimal rotation and derives the
//! strike and dip indicator segments from a local frame, all still centred on
//! the template origin. [`place`] then translates the three pieces by the
//! same offset.

use crate::geom::{cross, dot, normalize, Vec3, ZERO_LENGTH_EPS};
use crate::mesh::PolyMesh;
use crate::model::AttitudePoint;
use nalgebra::{Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Indicator half-length is the disc radius divided by this.
pub const INDICATOR_LENGTH_DIVISOR: f64 = 1.5;

/// Default normal of the disc template.
pub const TEMPLATE_NORMAL: Vec3 = Vec3::Z;

const PARALLEL_EPS: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttitudeError {
    #[error("azimuth {0} is outside [0, 360)")]
    AzimuthOutOfRange(f64),
    #[error("dip {0} is outside [0, 90]")]
    DipOutOfRange(f64),
    #[error("attitude is not finite (azimuth {azimuth}, dip {dip})")]
    NotFinite { azimuth: f64, dip: f64 },
}

/// A validated dip direction / dip pair, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    azimuth: f64,
    dip: f64,
}

impl Attitude {
    pub fn new(azimuth: f64, dip: f64) -> Result<Self, AttitudeError> {
        if !azimuth.is_finite() || !dip.is_finite() {
            return Err(AttitudeError::NotFinite { azimuth, dip });
        }
        if !(0.0..360.0).contains(&azimuth) {
            return Err(AttitudeError::AzimuthOutOfRange(azimuth));
        }
        if !(0.0..=90.0).contains(&dip) {
            return Err(AttitudeError::DipOutOfRange(dip));
        }
        Ok(Self { azimuth, dip })
    }

    /// Wraps azimuth into [0, 360) and clamps dip into [0, 90].
    ///
    /// Non-finite input is rejected since there is nothing sensible to clamp
    /// it to.
    pub fn clamped(azimuth: f64, dip: f64) -> Result<Self, AttitudeError> {
        if !azimuth.is_finite() || !dip.is_finite() {
            return Err(AttitudeError::NotFinite { azimuth, dip });
        }
        let mut azimuth = azimuth.rem_euclid(360.0);
        if azimuth >= 360.0 {
            azimuth = 0.0;
        }
        Ok(Self {
            azimuth,
            dip: dip.clamp(0.0, 90.0),
        })
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    pub fn dip(&self) -> f64 {
        self.dip
    }

    /// Bearing of the strike line, dip direction minus 90°.
    pub fn strike(&self) -> f64 {
        strike_bearing(self.azimuth)
    }
}

pub fn strike_bearing(dip_direction_deg: f64) -> f64 {
    (dip_direction_deg - 90.0).rem_euclid(360.0)
}

/// Upward unit normal of a plane dipping `dip_deg` towards `azimuth_deg`.
pub fn plane_normal(azimuth_deg: f64, dip_deg: f64) -> Vec3 {
    let az = azimuth_deg.to_radians();
    let d = dip_deg.to_radians();
    normalize(Vec3::new(az.sin() * d.sin(), az.cos() * d.sin(), d.cos()))
}

/// Minimal rotation carrying `from` onto `to` (axis `from × to`, angle
/// `acos(from · to)`).
///
/// Parallel inputs give the identity. Antiparallel inputs give a half turn
/// about an axis orthogonal to `from`: `from × X`, or `from × Y` when `from`
/// lies along X.
pub fn rotation_between(from: Vec3, to: Vec3) -> Rotation3<f64> {
    let n1 = normalize(from);
    let n2 = normalize(to);
    let dp = dot(n1, n2).clamp(-1.0, 1.0);
    let axis = cross(n1, n2);

    if axis.length() <= ZERO_LENGTH_EPS || (dp.abs() - 1.0).abs() < PARALLEL_EPS {
        if dp > 0.0 {
            return Rotation3::identity();
        }
        let mut candidate = cross(n1, Vec3::X);
        if candidate.length() <= ZERO_LENGTH_EPS {
            candidate = cross(n1, Vec3::Y);
        }
        let axis = Unit::new_normalize(Vector3::from(candidate));
        return Rotation3::from_axis_angle(&axis, std::f64::consts::PI);
    }

    let axis = Unit::new_normalize(Vector3::from(axis));
    Rotation3::from_axis_angle(&axis, dp.acos())
}

/// Orthonormal frame attached to a dipping plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalFrame {
    /// Horizontal, along strike.
    pub strike: Vec3,
    /// Steepest descent within the plane.
    pub dip: Vec3,
    pub normal: Vec3,
}

impl LocalFrame {
    pub fn new(dip_direction_deg: f64, dip_deg: f64, normal: Vec3) -> Self {
        let s = strike_bearing(dip_direction_deg).to_radians();
        let strike = normalize(Vec3::new(s.sin(), s.cos(), 0.0));

        let az = dip_direction_deg.to_radians();
        let d = dip_deg.to_radians();
        let dip = normalize(Vec3::new(az.sin() * d.cos(), az.cos() * d.cos(), -d.sin()));

        Self {
            strike,
            dip,
            normal,
        }
    }

    /// Maps local `(x, y, z)` along `(strike, dip, normal)` to world axes.
    pub fn to_global(&self, local: Vec3) -> Vec3 {
        self.strike * local.x + self.dip * local.y + self.normal * local.z
    }
}

/// Local endpoints of the strike and dip indicators for a disc of `radius`.
///
/// Both are centred on the origin; the strike segment runs along local X and
/// the dip segment along local Y, each with total length
/// `radius / INDICATOR_LENGTH_DIVISOR`.
pub fn indicator_endpoints(radius: f64) -> ([Vec3; 2], [Vec3; 2]) {
    let h = 0.5 * radius / INDICATOR_LENGTH_DIVISOR;
    (
        [Vec3::new(-h, 0.0, 0.0), Vec3::new(h, 0.0, 0.0)],
        [Vec3::new(0.0, -h, 0.0), Vec3::new(0.0, h, 0.0)],
    )
}

/// A disc and its two indicator lines for one observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrientedDisc {
    pub disc: PolyMesh,
    pub strike_line: PolyMesh,
    pub dip_line: PolyMesh,
}

impl OrientedDisc {
    /// Same offset for all three pieces so they stay concentric.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            disc: self.disc.translated(offset),
            strike_line: self.strike_line.translated(offset),
            dip_line: self.dip_line.translated(offset),
        }
    }
}

/// Orients `template` for the given attitude. The result is still centred on
/// the template origin.
pub fn orient(template: &PolyMesh, azimuth_deg: f64, dip_deg: f64, radius: f64) -> OrientedDisc {
    let dip_direction = azimuth_deg.rem_euclid(360.0);
    let normal = plane_normal(dip_direction, dip_deg);

    let rotation = rotation_between(TEMPLATE_NORMAL, normal);
    let disc = template.rotated(&rotation);

    let frame = LocalFrame::new(dip_direction, dip_deg, normal);
    let ([s0, s1], [d0, d1]) = indicator_endpoints(radius);

    OrientedDisc {
        disc,
        strike_line: PolyMesh::line(frame.to_global(s0), frame.to_global(s1)),
        dip_line: PolyMesh::line(frame.to_global(d0), frame.to_global(d1)),
    }
}

/// Orients `template` for `point` and moves it to the point's position.
pub fn place(template: &PolyMesh, point: &AttitudePoint, radius: f64) -> OrientedDisc {
    orient(template, point.azimuth, point.dip, radius).translated(point.position)
}
