//! Collision oracle over a [`World`] snapshot.
//!
//! Two predicates back every planner decision:
//! - [`CollisionChecker::is_colliding`]: point within `margin` of any obstacle
//! - [`CollisionChecker::is_segment_safe`]: discretized check along a segment
//!
//! Segment checks sample at most `check_step` apart, so an obstacle thinner
//! than `check_step` (after inflation) can slip between two samples. Keep the
//! step small relative to the smallest inflated obstacle dimension.

use serde::{Deserialize, Serialize};

use crate::core::{World, WorldPoint};
use crate::error::Result;

use super::config::{non_negative, positive};

/// Collision checking settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Inflation applied to every obstacle side (robot radius, meters)
    pub margin: f64,
    /// Maximum spacing between segment samples (meters)
    pub check_step: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            margin: 0.45,
            check_step: 0.3,
        }
    }
}

impl CollisionConfig {
    /// Reject a negative margin or a non-positive step.
    pub fn validate(&self) -> Result<()> {
        non_negative("margin", self.margin)?;
        positive("check_step", self.check_step)
    }
}

/// Point and segment collision queries against one world.
#[derive(Clone, Debug)]
pub struct CollisionChecker<'a> {
    world: &'a World,
    config: CollisionConfig,
}

impl<'a> CollisionChecker<'a> {
    /// Create a checker for `world`.
    pub fn new(world: &'a World, config: CollisionConfig) -> Self {
        Self { world, config }
    }

    /// The world being checked.
    #[inline]
    pub fn world(&self) -> &'a World {
        self.world
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// True iff `p` lies within `margin` of any obstacle.
    #[inline]
    pub fn is_colliding(&self, p: WorldPoint) -> bool {
        let margin = self.config.margin;
        self.world.obstacles().iter().any(|o| o.contains(p, margin))
    }

    /// True iff every sample along `p1 → p2` is collision-free.
    ///
    /// Samples both endpoints plus `floor(d / check_step)` evenly spaced
    /// interior points. A zero-length segment reduces to the point check.
    pub fn is_segment_safe(&self, p1: WorldPoint, p2: WorldPoint) -> bool {
        if self.is_colliding(p1) {
            return false;
        }
        let dist = p1.distance(&p2);
        if dist == 0.0 {
            return true;
        }
        if self.is_colliding(p2) {
            return false;
        }

        let interior = (dist / self.config.check_step).floor() as usize;
        let divisions = (interior + 1) as f64;
        (1..=interior).all(|i| !self.is_colliding(p1.lerp(&p2, i as f64 / divisions)))
    }

    /// True iff every consecutive pair of `path` is segment-safe.
    pub fn is_path_safe(&self, path: &[WorldPoint]) -> bool {
        match path {
            [] => true,
            [p] => !self.is_colliding(*p),
            _ => path.windows(2).all(|w| self.is_segment_safe(w[0], w[1])),
        }
    }
}
