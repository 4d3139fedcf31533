//! Planning entry point.
//!
//! [`Planner`] validates its configuration once, then turns any number of
//! [`World`] snapshots into [`PlanResult`]s. Each call grows a fresh tree;
//! nothing is shared between calls, so one planner can serve several threads.

use std::sync::atomic::AtomicBool;

use rand::Rng;

use crate::config::VayuConfig;
use crate::core::{World, WorldPoint};
use crate::error::Result;

use super::collision::{CollisionChecker, CollisionConfig};
use super::config::{PlannerConfig, SmoothingConfig, Strategy};
use super::growth::{Growth, PlanStats, PlanStatus};
use super::sampler::Sampler;
use super::smoother::{PathSmoother, path_length};
use super::tree::TreeEdge;
use super::{multi_bias, rrt_star};

/// Waypoints with their total length.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedPath {
    /// Waypoints from start to goal, inclusive
    pub waypoints: Vec<WorldPoint>,
    /// Total path length in meters
    pub length: f64,
}

impl PlannedPath {
    /// Wrap waypoints, computing the length.
    pub fn new(waypoints: Vec<WorldPoint>) -> Self {
        let length = path_length(&waypoints);
        Self { waypoints, length }
    }
}

/// Outcome of one planning request.
#[derive(Clone, Debug)]
pub struct PlanResult {
    /// How the search ended
    pub status: PlanStatus,
    /// Path extracted from the tree
    pub raw: Option<PlannedPath>,
    /// Shortcut version of `raw` (equal to `raw` when smoothing is disabled)
    pub smoothed: Option<PlannedPath>,
    /// Every `(child, parent)` tree edge
    pub tree_edges: Vec<TreeEdge>,
    /// Search counters
    pub stats: PlanStats,
}

impl PlanResult {
    /// Whether a path was produced.
    pub fn is_found(&self) -> bool {
        self.status == PlanStatus::Found
    }

    /// Waypoints to hand to a path follower: smoothed if present, else raw.
    pub fn waypoints(&self) -> Option<&[WorldPoint]> {
        self.smoothed
            .as_ref()
            .or(self.raw.as_ref())
            .map(|p| p.waypoints.as_slice())
    }
}

/// Sampling-based planner over rotated-rectangle worlds.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    config: PlannerConfig,
    collision: CollisionConfig,
    smoothing: SmoothingConfig,
}

impl Planner {
    /// Create a planner, rejecting invalid parameters.
    pub fn new(
        config: PlannerConfig,
        collision: CollisionConfig,
        smoothing: SmoothingConfig,
    ) -> Result<Self> {
        config.validate()?;
        collision.validate()?;
        Ok(Self {
            config,
            collision,
            smoothing,
        })
    }

    /// Create a planner from the loaded application config.
    pub fn from_config(config: &VayuConfig) -> Result<Self> {
        Self::new(
            config.planner.clone(),
            config.collision.clone(),
            config.smoothing.clone(),
        )
    }

    /// Create a planner with default parameters.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Growth parameters.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Collision parameters.
    pub fn collision_config(&self) -> &CollisionConfig {
        &self.collision
    }

    /// Plan with an RNG seeded from the config (`seed = 0` draws entropy).
    pub fn plan(&self, world: &World) -> PlanResult {
        let mut sampler = Sampler::seeded(self.config.seed);
        self.run(world, &mut sampler, None)
    }

    /// Plan with a caller-supplied RNG.
    pub fn plan_with_rng<R: Rng>(&self, world: &World, rng: &mut R) -> PlanResult {
        let mut sampler = Sampler::from_rng(rng);
        self.run(world, &mut sampler, None)
    }

    /// Plan with a caller-supplied RNG, checking `cancel` between iterations.
    pub fn plan_with_cancel<R: Rng>(
        &self,
        world: &World,
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> PlanResult {
        let mut sampler = Sampler::from_rng(rng);
        self.run(world, &mut sampler, Some(cancel))
    }

    fn run<R: Rng>(
        &self,
        world: &World,
        sampler: &mut Sampler<R>,
        cancel: Option<&AtomicBool>,
    ) -> PlanResult {
        tracing::info!(
            "Planning ({}) from ({:.2}, {:.2}) to ({:.2}, {:.2}) among {} obstacles",
            self.config.strategy,
            world.start().x,
            world.start().y,
            world.goal().x,
            world.goal().y,
            world.obstacles().len()
        );

        let checker = CollisionChecker::new(world, self.collision.clone());
        let growth = match self.config.strategy {
            Strategy::RrtStar => rrt_star::grow(world, &checker, &self.config, sampler, cancel),
            Strategy::MultiBias => {
                multi_bias::grow(world, &checker, &self.config, sampler, cancel)
            }
        };

        let Growth {
            tree,
            terminal,
            status,
            stats,
        } = growth;

        let raw = terminal.map(|t| PlannedPath::new(tree.extract_path(t, world.goal())));
        let smoothed = raw.as_ref().map(|raw| {
            if self.smoothing.enabled {
                PlannedPath::new(PathSmoother::new(&checker).smooth(&raw.waypoints))
            } else {
                raw.clone()
            }
        });

        match (&raw, &smoothed) {
            (Some(raw), Some(smoothed)) => tracing::info!(
                "Path found after {} iterations ({} nodes, {:?}): raw {} pts / {:.2}m, smoothed {} pts / {:.2}m",
                stats.iterations,
                stats.nodes,
                stats.elapsed,
                raw.waypoints.len(),
                raw.length,
                smoothed.waypoints.len(),
                smoothed.length
            ),
            _ => tracing::warn!(
                "No path ({:?}) after {} iterations ({} nodes)",
                status,
                stats.iterations,
                stats.nodes
            ),
        }

        PlanResult {
            status,
            raw,
            smoothed,
            tree_edges: tree.edges(),
            stats,
        }
    }
}
