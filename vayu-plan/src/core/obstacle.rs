//! Rotated rectangular obstacles.
//!
//! An obstacle is a rectangle of `width × height` centered at `center` and
//! rotated by `yaw` radians (CCW) about its center. Containment is tested in
//! the obstacle's local frame:
//!
//! ```text
//!            local y
//!               ▲
//!        ┌──────┼──────┐  ─┬─
//!        │      │      │   │ height/2 + margin
//!   ─────┼──────●──────┼───┴──▶ local x
//!        │    center   │
//!        └─────────────┘
//!        ├─────────────┤
//!        width + 2·margin
//! ```

use std::f64::consts::{FRAC_PI_2, PI};

use super::point::WorldPoint;

/// Rectangle rotated about its center.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    /// Rectangle center in world frame
    pub center: WorldPoint,
    /// Extent along the local x axis (meters)
    pub width: f64,
    /// Extent along the local y axis (meters)
    pub height: f64,
    /// Rotation about the center (radians, CCW)
    pub yaw: f64,
}

impl Obstacle {
    /// Create an obstacle. Validation happens when it joins a [`World`](super::World).
    pub fn new(center: WorldPoint, width: f64, height: f64, yaw: f64) -> Self {
        Self {
            center,
            width,
            height,
            yaw,
        }
    }

    /// Axis-aligned obstacle (yaw = 0).
    pub fn axis_aligned(center: WorldPoint, width: f64, height: f64) -> Self {
        Self::new(center, width, height, 0.0)
    }

    /// Test whether `p` lies inside the rectangle inflated by `margin` on every side.
    ///
    /// Boundary points count as inside. A rectangle repeats itself every half
    /// turn, so the yaw is folded into `[-π/2, π/2)` before the trig: `yaw` and
    /// `yaw + π` rotate by the same angle up to the rounding of `yaw + π`
    /// itself. Points off the boundary classify identically; a point lying
    /// exactly on an inflated edge may flip, since its local coordinate can
    /// differ by about one ulp.
    #[inline]
    pub fn contains(&self, p: WorldPoint, margin: f64) -> bool {
        let local = self.to_local(p);
        local.x.abs() <= self.width / 2.0 + margin && local.y.abs() <= self.height / 2.0 + margin
    }

    /// Transform a world point into the obstacle's unrotated local frame.
    #[inline]
    pub fn to_local(&self, p: WorldPoint) -> WorldPoint {
        (p - self.center).rotate(-fold_half_turn(self.yaw))
    }

    /// The four corners in world frame, counter-clockwise from the local
    /// (-x, -y) corner.
    pub fn corners(&self) -> [WorldPoint; 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
            .map(|(x, y)| self.center + WorldPoint::new(x, y).rotate(self.yaw))
    }

    /// Check dimensions and coordinates, returning a reason on failure.
    pub(crate) fn check(&self) -> Result<(), String> {
        if !self.center.is_finite() {
            return Err("center is not finite".to_string());
        }
        if !self.yaw.is_finite() {
            return Err("yaw is not finite".to_string());
        }
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(format!("width must be finite and >= 0, got {}", self.width));
        }
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(format!(
                "height must be finite and >= 0, got {}",
                self.height
            ));
        }
        Ok(())
    }
}

/// Fold an angle into `[-π/2, π/2)`.
#[inline]
fn fold_half_turn(yaw: f64) -> f64 {
    (yaw + FRAC_PI_2).rem_euclid(PI) - FRAC_PI_2
}
