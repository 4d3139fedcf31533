//! 2D point type used throughout the planner.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// World coordinates (meters, f64)
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in meters
    pub x: f64,
    /// Y coordinate in meters
    pub y: f64,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Whether both coordinates are finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &WorldPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Angle from this point to another (radians, CCW from +X).
    ///
    /// Coincident points yield 0.0, matching `atan2(0, 0)`.
    #[inline]
    pub fn angle_to(&self, other: &WorldPoint) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dy.atan2(dx)
    }

    /// Create a point at a given angle and distance from this point
    #[inline]
    pub fn point_at(&self, angle: f64, distance: f64) -> WorldPoint {
        WorldPoint::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }

    /// Linear interpolation: `t = 0` is `self`, `t = 1` is `other`
    #[inline]
    pub fn lerp(&self, other: &WorldPoint, t: f64) -> WorldPoint {
        WorldPoint::new(
            self.x + t * (other.x - self.x),
            self.y + t * (other.y - self.y),
        )
    }

    /// Midpoint between two points
    #[inline]
    pub fn midpoint(&self, other: &WorldPoint) -> WorldPoint {
        WorldPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Rotate this point around the origin by angle (radians)
    #[inline]
    pub fn rotate(&self, angle: f64) -> WorldPoint {
        let (sin_a, cos_a) = angle.sin_cos();
        WorldPoint::new(
            self.x * cos_a - self.y * sin_a,
            self.x * sin_a + self.y * cos_a,
        )
    }

    /// Convert to an `[x, y]` pair
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for WorldPoint {
    fn from(p: [f64; 2]) -> Self {
        WorldPoint::new(p[0], p[1])
    }
}

impl From<WorldPoint> for [f64; 2] {
    fn from(p: WorldPoint) -> Self {
        p.to_array()
    }
}

impl Add for WorldPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        WorldPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for WorldPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        WorldPoint::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for WorldPoint {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        WorldPoint::new(self.x * scalar, self.y * scalar)
    }
}
