//! Immutable planning request snapshot.

use crate::error::{Result, VayuError};

use super::obstacle::Obstacle;
use super::point::WorldPoint;

/// Start, goal and obstacles for one planning request.
///
/// Construction validates every input, so a `World` that exists is always safe
/// to hand to the planner.
#[derive(Clone, Debug)]
pub struct World {
    start: WorldPoint,
    goal: WorldPoint,
    obstacles: Vec<Obstacle>,
}

impl World {
    /// Build a validated world snapshot.
    ///
    /// # Errors
    /// [`VayuError::NonFinite`] for a non-finite start or goal,
    /// [`VayuError::InvalidObstacle`] for a degenerate obstacle.
    pub fn new(start: WorldPoint, goal: WorldPoint, obstacles: Vec<Obstacle>) -> Result<Self> {
        if !start.is_finite() {
            return Err(VayuError::NonFinite("start"));
        }
        if !goal.is_finite() {
            return Err(VayuError::NonFinite("goal"));
        }
        for (index, obstacle) in obstacles.iter().enumerate() {
            obstacle
                .check()
                .map_err(|reason| VayuError::InvalidObstacle { index, reason })?;
        }

        Ok(Self {
            start,
            goal,
            obstacles,
        })
    }

    /// Obstacle-free world.
    pub fn empty(start: WorldPoint, goal: WorldPoint) -> Result<Self> {
        Self::new(start, goal, Vec::new())
    }

    /// Start position (tree root).
    #[inline]
    pub fn start(&self) -> WorldPoint {
        self.start
    }

    /// Goal position.
    #[inline]
    pub fn goal(&self) -> WorldPoint {
        self.goal
    }

    /// Obstacles in request order.
    #[inline]
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}
