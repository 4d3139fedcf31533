//! Goal and obstacle-boundary biased tree growth.
//!
//! Each iteration draws its target from a three-way mixture:
//!
//! | share (default) | target |
//! |-----------------|--------|
//! | `goal_sample_rate` (0.15) | the goal itself |
//! | `boundary_sample_rate` (0.45) | midpoint of a uniform point and a Gaussian neighbor when exactly one of them collides, else the uniform point |
//! | remainder (0.40) | uniform over the bounds |
//!
//! The boundary samples pull the tree into narrow gaps along obstacle edges.
//! Growth is greedy (no rewiring) and stops as soon as a new node lands within
//! the arrival tolerance of the goal.

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use rand::Rng;

use crate::core::{World, WorldPoint};

use super::collision::CollisionChecker;
use super::config::PlannerConfig;
use super::growth::{Growth, PlanStats, PlanStatus, cancelled, new_tree, propose};
use super::sampler::Sampler;

/// Which branch of the mixture produced a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleKind {
    /// Exactly the goal
    Goal,
    /// Midpoint of a pair straddling an obstacle boundary
    Boundary,
    /// Boundary pair did not straddle; first point used as-is
    BoundaryFallback,
    /// Plain uniform sample
    Uniform,
}

/// Draw one target from the goal / boundary / uniform mixture.
pub fn sample_target<R: Rng>(
    sampler: &mut Sampler<R>,
    checker: &CollisionChecker<'_>,
    config: &PlannerConfig,
    goal: WorldPoint,
) -> (WorldPoint, SampleKind) {
    let p = sampler.unit();
    if p < config.goal_sample_rate {
        return (goal, SampleKind::Goal);
    }
    if p < config.goal_sample_rate + config.boundary_sample_rate {
        let first = sampler.uniform(&config.bounds);
        let second = sampler.gaussian_around(first, config.gaussian_sigma);
        return if checker.is_colliding(first) != checker.is_colliding(second) {
            (first.midpoint(&second), SampleKind::Boundary)
        } else {
            (first, SampleKind::BoundaryFallback)
        };
    }
    (sampler.uniform(&config.bounds), SampleKind::Uniform)
}

/// Grow a greedy tree until a node reaches the goal or the budget runs out.
pub fn grow<R: Rng>(
    world: &World,
    checker: &CollisionChecker<'_>,
    config: &PlannerConfig,
    sampler: &mut Sampler<R>,
    cancel: Option<&AtomicBool>,
) -> Growth {
    let started = Instant::now();
    let goal = world.goal();
    let tolerance = config.arrival_tolerance();
    let mut tree = new_tree(world.start(), config);
    let mut stats = PlanStats::default();
    let mut terminal = None;
    let mut status = PlanStatus::Exhausted;

    for _ in 0..config.max_iterations {
        if cancelled(cancel) {
            tracing::warn!("Multi-bias cancelled after {} iterations", stats.iterations);
            status = PlanStatus::Cancelled;
            break;
        }
        stats.iterations += 1;

        let (target, _) = sample_target(sampler, checker, config, goal);
        let Some((nearest, candidate)) = propose(&tree, checker, config, target) else {
            stats.rejected_samples += 1;
            continue;
        };

        let cost = tree.node(nearest).cost + config.expand_dis;
        let id = tree.append(candidate, nearest, cost);

        if candidate.distance(&goal) < tolerance {
            terminal = Some(id);
            status = PlanStatus::Found;
            break;
        }
    }

    if status == PlanStatus::Exhausted {
        tracing::warn!(
            "Multi-bias exhausted {} iterations without reaching the goal",
            stats.iterations
        );
    }

    stats.nodes = tree.len();
    stats.elapsed = started.elapsed();
    Growth {
        tree,
        terminal,
        status,
        stats,
    }
}
