//! Sampling-based path planning.
//!
//! This module provides:
//! - Collision oracle for inflated rotated rectangles
//! - Arena planning tree with nearest / radius queries and rewiring
//! - RRT* and goal/boundary biased growth strategies
//! - Greedy shortcut smoothing of extracted paths
//!
//! ## Usage
//!
//! ```rust
//! use vayu_plan::core::{Obstacle, World, WorldPoint};
//! use vayu_plan::planning::{Planner, PlannerConfig, Strategy};
//!
//! let world = World::new(
//!     WorldPoint::new(0.0, 0.0),
//!     WorldPoint::new(5.0, 0.0),
//!     vec![Obstacle::new(WorldPoint::new(2.0, 0.0), 1.0, 4.0, 0.0)],
//! )?;
//!
//! let planner = Planner::new(
//!     PlannerConfig { strategy: Strategy::MultiBias, seed: 7, ..Default::default() },
//!     Default::default(),
//!     Default::default(),
//! )?;
//!
//! let result = planner.plan(&world);
//! if let Some(waypoints) = result.waypoints() {
//!     println!("{} waypoints", waypoints.len());
//! }
//! # Ok::<(), vayu_plan::VayuError>(())
//! ```

mod collision;
mod config;
mod growth;
pub mod multi_bias;
mod planner;
pub mod rrt_star;
mod sampler;
mod smoother;
mod tree;

pub use collision::{CollisionChecker, CollisionConfig};
pub use config::{Bounds, PlannerConfig, SmoothingConfig, Strategy};
pub use growth::{Growth, PlanStats, PlanStatus, steer};
pub use multi_bias::SampleKind;
pub use planner::{PlanResult, PlannedPath, Planner};
pub use sampler::Sampler;
pub use smoother::{PathSmoother, path_length};
pub use tree::{NodeId, PlanningTree, TreeEdge, TreeNode};
