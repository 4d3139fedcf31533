//! Expansion primitive shared by both growth strategies.
//!
//! One iteration of either strategy is:
//! 1. sample a target point (strategy specific)
//! 2. find the nearest tree node
//! 3. steer a fixed `expand_dis` from that node toward the target
//! 4. keep the candidate only if it is collision-free
//!
//! An iteration either appends a node (and finishes any rewiring for it) or
//! leaves the tree untouched, so stopping between iterations always leaves a
//! consistent tree.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;

use crate::core::WorldPoint;

use super::collision::CollisionChecker;
use super::config::PlannerConfig;
use super::tree::{NodeId, PlanningTree};

/// How a growth run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// A terminal node was chosen and a path extracted
    Found,
    /// Iteration budget spent without reaching the goal
    Exhausted,
    /// Stopped by the caller's cancellation flag
    Cancelled,
}

/// Counters collected while growing a tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanStats {
    /// Iterations started
    pub iterations: usize,
    /// Nodes in the final tree, root included
    pub nodes: usize,
    /// Iterations whose candidate was discarded
    pub rejected_samples: usize,
    /// Rewire operations applied (RRT* only)
    pub rewires: usize,
    /// Wall-clock time spent growing the tree
    pub elapsed: Duration,
}

/// Tree plus outcome of one growth run.
#[derive(Clone, Debug)]
pub struct Growth {
    /// Final tree
    pub tree: PlanningTree,
    /// Node the path is extracted from, if any
    pub terminal: Option<NodeId>,
    /// Outcome
    pub status: PlanStatus,
    /// Counters
    pub stats: PlanStats,
}

/// Point `expand_dis` from `from` in the direction of `toward`.
///
/// Always moves the full step, overshooting targets closer than `expand_dis`.
/// Coincident points steer along +X.
#[inline]
pub fn steer(from: WorldPoint, toward: WorldPoint, expand_dis: f64) -> WorldPoint {
    from.point_at(from.angle_to(&toward), expand_dis)
}

/// Steps 2-4 of an iteration: nearest node and a collision-free candidate.
///
/// Returns `None` when the candidate must be discarded.
pub(crate) fn propose(
    tree: &PlanningTree,
    checker: &CollisionChecker<'_>,
    config: &PlannerConfig,
    target: WorldPoint,
) -> Option<(NodeId, WorldPoint)> {
    let nearest = tree.nearest(target);
    let from = tree.node(nearest).position;
    let candidate = steer(from, target, config.expand_dis);

    if checker.is_colliding(candidate) {
        return None;
    }
    if config.check_steer_edge && !checker.is_segment_safe(from, candidate) {
        return None;
    }
    Some((nearest, candidate))
}

/// Upper bound on nodes reserved up front; larger trees grow on demand.
const MAX_RESERVED_NODES: usize = 16_384;

/// Fresh tree rooted at `root`, sized for the iteration budget.
pub(crate) fn new_tree(root: WorldPoint, config: &PlannerConfig) -> PlanningTree {
    PlanningTree::with_capacity(root, config.max_iterations.min(MAX_RESERVED_NODES) + 1)
}

/// Whether the caller asked to stop.
#[inline]
pub(crate) fn cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}
