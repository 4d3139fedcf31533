//! Greedy shortcut smoothing.
//!
//! From the current waypoint, scan the remaining path from its end backward
//! and jump to the first (farthest) waypoint reachable by a safe straight
//! segment. Repeat from there until the last waypoint is reached.
//!
//! ```text
//!   raw:       S ─ a ─ b ─ c ─ d ─ G        S ─────────── c ─── G
//!                   ╲obstacle╱        →              ╲obstacle╱
//! ```
//!
//! The result only keeps waypoints of the input, in order, and every segment
//! of it passed the collision check. Greedy, so not globally shortest.

use crate::core::WorldPoint;

use super::collision::CollisionChecker;

/// Path shortcutting against a collision oracle.
pub struct PathSmoother<'a> {
    checker: &'a CollisionChecker<'a>,
}

impl<'a> PathSmoother<'a> {
    /// Create a smoother using `checker` for segment tests.
    pub fn new(checker: &'a CollisionChecker<'a>) -> Self {
        Self { checker }
    }

    /// Shortcut `path`. Paths with fewer than three waypoints come back unchanged.
    ///
    /// If no onward segment from a waypoint is safe (only possible when the
    /// input itself has an unsafe segment), the next waypoint is kept so the
    /// output never has more unsafe segments than the input.
    pub fn smooth(&self, path: &[WorldPoint]) -> Vec<WorldPoint> {
        if path.len() < 3 {
            return path.to_vec();
        }

        let last = path.len() - 1;
        let mut smoothed = vec![path[0]];
        let mut current = 0;

        while current < last {
            let next = (current + 1..=last)
                .rev()
                .find(|&j| self.checker.is_segment_safe(path[current], path[j]))
                .unwrap_or_else(|| {
                    tracing::warn!(
                        "No safe shortcut from waypoint {}, keeping unsafe segment",
                        current
                    );
                    current + 1
                });
            smoothed.push(path[next]);
            current = next;
        }

        tracing::debug!(
            "Shortcut {} waypoints down to {}",
            path.len(),
            smoothed.len()
        );
        smoothed
    }
}

/// Total polyline length.
pub fn path_length(path: &[WorldPoint]) -> f64 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}
