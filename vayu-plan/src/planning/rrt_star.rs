//! Cost-optimizing tree growth (RRT*).
//!
//! Samples uniformly over the bounds for the whole iteration budget. Each
//! accepted candidate picks the cheapest collision-free parent among its
//! `search_radius` neighbors, then offers itself as a cheaper parent to those
//! same neighbors (rewiring).
//!
//! There is no early exit on reaching the goal. After the budget, the path is
//! taken from the node *closest to the goal position*, which need not be the
//! cheapest route the tree knows about.

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use rand::Rng;

use crate::core::World;

use super::collision::CollisionChecker;
use super::config::PlannerConfig;
use super::growth::{Growth, PlanStats, PlanStatus, cancelled, new_tree, propose};
use super::sampler::Sampler;

/// Grow an RRT* tree over `world`.
///
/// Always returns a terminal node unless cancelled.
pub fn grow<R: Rng>(
    world: &World,
    checker: &CollisionChecker<'_>,
    config: &PlannerConfig,
    sampler: &mut Sampler<R>,
    cancel: Option<&AtomicBool>,
) -> Growth {
    let started = Instant::now();
    let mut tree = new_tree(world.start(), config);
    let mut stats = PlanStats::default();

    for _ in 0..config.max_iterations {
        if cancelled(cancel) {
            tracing::warn!("RRT* cancelled after {} iterations", stats.iterations);
            stats.nodes = tree.len();
            stats.elapsed = started.elapsed();
            return Growth {
                tree,
                terminal: None,
                status: PlanStatus::Cancelled,
                stats,
            };
        }
        stats.iterations += 1;

        let target = sampler.uniform(&config.bounds);
        let Some((nearest, candidate)) = propose(&tree, checker, config, target) else {
            stats.rejected_samples += 1;
            continue;
        };

        // Neighbors are gathered before insertion so the candidate never
        // considers itself.
        let near = tree.within_radius(candidate, config.search_radius);

        // Choose parent over the full neighborhood.
        let mut parent = nearest;
        let mut cost = tree.node(nearest).cost + config.expand_dis;
        for &id in &near {
            let node = tree.node(id);
            let through = node.cost + node.position.distance(&candidate);
            if through < cost && checker.is_segment_safe(node.position, candidate) {
                parent = id;
                cost = through;
            }
        }

        let new_id = tree.append(candidate, parent, cost);

        // Rewire neighbors through the new node.
        for &id in &near {
            let node = tree.node(id);
            let through = cost + candidate.distance(&node.position);
            if through < node.cost && checker.is_segment_safe(candidate, node.position) {
                tree.rewire(id, new_id, through);
                stats.rewires += 1;
                if config.propagate_rewire_cost {
                    tree.propagate_cost(id);
                }
            }
        }
    }

    let terminal = tree.nearest(world.goal());
    tracing::debug!(
        "RRT* finished: {} nodes, {} rewires, terminal {:.3}m from goal",
        tree.len(),
        stats.rewires,
        tree.node(terminal).position.distance(&world.goal())
    );

    stats.nodes = tree.len();
    stats.elapsed = started.elapsed();
    Growth {
        tree,
        terminal: Some(terminal),
        status: PlanStatus::Found,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Obstacle, WorldPoint};
    use crate::planning::collision::CollisionConfig;
    use std::sync::atomic::Ordering;

    fn open_world() -> World {
        World::empty(WorldPoint::ZERO, WorldPoint::new(5.0, 0.0)).unwrap()
    }

    fn config(iterations: usize) -> PlannerConfig {
        PlannerConfig {
            max_iterations: iterations,
            propagate_rewire_cost: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_runs_full_budget() {
        let world = open_world();
        let checker = CollisionChecker::new(&world, CollisionConfig::default());
        let mut sampler = Sampler::seeded(1);
        let growth = grow(&world, &checker, &config(300), &mut sampler, None);

        assert_eq!(growth.status, PlanStatus::Found);
        assert_eq!(growth.stats.iterations, 300);
        // Nothing to collide with: every iteration adds a node.
        assert_eq!(growth.tree.len(), 301);
        assert_eq!(growth.stats.rejected_samples, 0);
        assert!(growth.terminal.is_some());
    }

    #[test]
    fn test_terminal_is_nearest_to_goal() {
        let world = open_world();
        let checker = CollisionChecker::new(&world, CollisionConfig::default());
        let mut sampler = Sampler::seeded(2);
        let growth = grow(&world, &checker, &config(500), &mut sampler, None);

        let terminal = growth.terminal.unwrap();
        let best = growth.tree.node(terminal).position.distance(&world.goal());
        for (_, node) in growth.tree.iter() {
            assert!(node.position.distance(&world.goal()) >= best);
        }
    }

    #[test]
    fn test_costs_consistent_with_propagation() {
        let world = World::new(
            WorldPoint::ZERO,
            WorldPoint::new(5.0, 0.0),
            vec![Obstacle::axis_aligned(WorldPoint::new(2.0, 0.0), 1.0, 4.0)],
        )
        .unwrap();
        let checker = CollisionChecker::new(&world, CollisionConfig::default());
        let mut sampler = Sampler::seeded(3);
        let growth = grow(&world, &checker, &config(800), &mut sampler, None);

        assert!(growth.stats.rewires > 0);
        let tree = &growth.tree;
        for (_, node) in tree.iter() {
            if let Some(parent) = node.parent {
                let p = tree.node(parent);
                let expected = p.cost + node.position.distance(&p.position);
                assert!(
                    (node.cost - expected).abs() < 1e-9,
                    "cost {} != {}",
                    node.cost,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_stale_costs_never_undercut_parent() {
        let world = open_world();
        let checker = CollisionChecker::new(&world, CollisionConfig::default());
        let mut sampler = Sampler::seeded(4);
        let cfg = PlannerConfig {
            max_iterations: 600,
            ..Default::default()
        };
        let growth = grow(&world, &checker, &cfg, &mut sampler, None);

        let tree = &growth.tree;
        for (_, node) in tree.iter() {
            if let Some(parent) = node.parent {
                let p = tree.node(parent);
                let expected = p.cost + node.position.distance(&p.position);
                assert!(node.cost >= expected - 1e-9);
            }
        }
    }

    #[test]
    fn test_cancelled_before_start() {
        let world = open_world();
        let checker = CollisionChecker::new(&world, CollisionConfig::default());
        let mut sampler = Sampler::seeded(5);
        let flag = AtomicBool::new(false);
        flag.store(true, Ordering::Relaxed);
        let growth = grow(&world, &checker, &config(100), &mut sampler, Some(&flag));

        assert_eq!(growth.status, PlanStatus::Cancelled);
        assert!(growth.terminal.is_none());
        assert_eq!(growth.tree.len(), 1);
    }
}
