//! # VayuPlan
//!
//! Sampling-based 2D motion planning among rotated rectangular obstacles.
//!
//! ## Overview
//!
//! A planning request is a [`World`]: start, goal and a list of obstacles.
//! The planner grows a tree from the start by steering fixed-length steps
//! toward sampled points, keeps only collision-free nodes, and extracts a
//! waypoint path that ends exactly at the goal. A greedy shortcut pass then
//! removes waypoints wherever a straight segment is collision-free.
//!
//! ## Strategies
//!
//! - **RRT\***: uniform sampling, choose-parent and rewiring within a radius,
//!   runs the full iteration budget
//! - **Multi-bias**: goal samples, Gaussian obstacle-boundary samples and
//!   uniform samples; greedy growth that stops on arrival at the goal
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vayu_plan::{Planner, World, WorldPoint, Obstacle};
//!
//! let world = World::new(
//!     WorldPoint::new(0.0, 0.0),
//!     WorldPoint::new(5.0, 0.0),
//!     vec![Obstacle::new(WorldPoint::new(2.0, 0.0), 1.0, 4.0, 0.0)],
//! )?;
//!
//! let result = Planner::with_defaults().plan(&world);
//! if let Some(waypoints) = result.waypoints() {
//!     println!("{} waypoints", waypoints.len());
//! }
//! ```
//!
//! ## Coordinate System
//!
//! - X, Y in meters, double precision
//! - Yaw in radians, CCW positive from +X

// Geometry and world model
pub mod core;

// Error types
pub mod error;

// TOML configuration
pub mod config;

// Trees, strategies, collision and smoothing
pub mod planning;

// World/plan JSON and SVG export
pub mod io;

pub use config::{OutputConfig, VayuConfig};
pub use core::{Obstacle, World, WorldPoint};
pub use error::{Result, VayuError};
pub use planning::{
    CollisionChecker, CollisionConfig, PlanResult, PlanStatus, PlannedPath, Planner,
    PlannerConfig, SmoothingConfig, Strategy,
};
