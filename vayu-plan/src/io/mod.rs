//! File input and output.
//!
//! - **World JSON**: start, goal and obstacles in the supervisor's wire shape
//! - **Plan JSON**: status, raw and smoothed waypoints, tree edges, counters
//! - **SVG export**: visual audit of a planning run
//!
//! ## Loading a World
//!
//! ```rust,ignore
//! use vayu_plan::io::load_world;
//! use std::path::Path;
//!
//! let world = load_world(Path::new("worlds/sample.json"))?;
//! ```
//!
//! ## Saving Results
//!
//! ```rust,ignore
//! use vayu_plan::io::{SvgConfig, SvgRenderer, save_plan};
//!
//! save_plan(&result, Path::new("output/plan.json"), true)?;
//!
//! SvgRenderer::new(&world, SvgConfig::default())
//!     .with_tree(&result.tree_edges)
//!     .save(Path::new("output/plan.svg"))?;
//! ```

mod plan_file;
pub mod svg;
mod world_file;

pub use plan_file::{PathRecord, PlanFile, StatsRecord, plan_to_json, save_plan, waypoint_pairs};
pub use svg::{SvgColorScheme, SvgConfig, SvgRenderer};
pub use world_file::{ObstacleRecord, WorldFile, load_world, parse_world, save_world};
