//! Geometry primitives shared across the workspace.
//!
//! All coordinates are meters in a right-handed frame: X east, Y up, Z south.
//! Rotation about +Y (yaw) is the only rotation the catalog uses in practice.

use serde::{Deserialize, Serialize};

/// 3-component vector, serialized as a plain `[x, y, z]` array to match the
/// persisted catalog format.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Yaw-only rotation vector, the common case for placed equipment.
    pub fn yaw(angle: f64) -> Self {
        Self::new(0.0, angle, 0.0)
    }

    pub fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance_to(self, other: Vec3) -> f64 {
        self.sub(other).length()
    }

    /// Horizontal (XZ-plane) length, ignoring elevation.
    pub fn horizontal_length(self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    /// Rotates about the +Y axis. Positive angles turn +Z toward +X,
    /// matching the yaw convention of the catalog.
    pub fn rotate_yaw(self, angle: f64) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        Vec3::new(
            self.x * cos + self.z * sin,
            self.y,
            -self.x * sin + self.z * cos,
        )
    }
}

/// Axis-aligned box in the ground (XZ) plane. Elevation never participates in
/// the overlap checks, so the box is two-dimensional on purpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Aabb {
    /// Builds a box from a center point and half-extents on X and Z.
    pub fn from_center(center: Vec3, half_x: f64, half_z: f64) -> Self {
        Self {
            min_x: center.x - half_x,
            max_x: center.x + half_x,
            min_z: center.z - half_z,
            max_z: center.z + half_z,
        }
    }

    /// Strict intersection test: boxes that merely touch do not intersect.
    /// The validator additionally shrinks each box by a small margin before
    /// calling this, so touching equipment never reports as overlapping.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.max_x > other.min_x
            && self.min_x < other.max_x
            && self.max_z > other.min_z
            && self.min_z < other.max_z
    }
}

/// Pointer ray in world space, used to project cursor input onto the ground.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Intersects the horizontal plane `y = plane_y`. Returns `None` when the
    /// ray is parallel to the plane or points away from it.
    pub fn intersect_ground(&self, plane_y: f64) -> Option<Vec3> {
        if self.direction.y.abs() < 1e-12 {
            return None;
        }
        let t = (plane_y - self.origin.y) / self.direction.y;
        if t < 0.0 {
            return None;
        }
        Some(self.origin.add(self.direction.scale(t)))
    }
}

/// Snaps a value to the nearest multiple of `step`.
pub fn snap(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

/// Yaw that makes an object at `from` face `to`, using the catalog's
/// `atan2(dx, dz)` argument order. This order is deliberate: the generator's
/// camera placement and cable-tray headings both assume it, so it must not be
/// swapped for the more common `atan2(dz, dx)`.
pub fn look_at_yaw(from: Vec3, to: Vec3) -> f64 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    dx.atan2(dz)
}
