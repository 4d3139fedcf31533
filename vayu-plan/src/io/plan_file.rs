//! Plan JSON output.
//!
//! Waypoints are written as `[x, y]` pairs, the shape a path follower consumes
//! directly. Tree edges are `[[child_x, child_y], [parent_x, parent_y]]`.

use std::path::Path;

use serde::Serialize;

use crate::core::WorldPoint;
use crate::error::Result;
use crate::planning::{PlanResult, PlanStatus, PlannedPath};

/// Serialized path.
#[derive(Clone, Debug, Serialize)]
pub struct PathRecord {
    pub waypoints: Vec<[f64; 2]>,
    pub length: f64,
}

impl From<&PlannedPath> for PathRecord {
    fn from(path: &PlannedPath) -> Self {
        Self {
            waypoints: waypoint_pairs(&path.waypoints),
            length: path.length,
        }
    }
}

/// Serialized search counters.
#[derive(Clone, Debug, Serialize)]
pub struct StatsRecord {
    pub iterations: usize,
    pub nodes: usize,
    pub rejected_samples: usize,
    pub rewires: usize,
    pub elapsed_ms: f64,
}

/// Top-level plan document.
#[derive(Clone, Debug, Serialize)]
pub struct PlanFile {
    pub status: PlanStatus,
    pub raw: Option<PathRecord>,
    pub smoothed: Option<PathRecord>,
    pub tree: Vec<[[f64; 2]; 2]>,
    pub stats: StatsRecord,
}

impl PlanFile {
    /// Build the document, optionally leaving out the tree edges.
    pub fn from_result(result: &PlanResult, include_tree: bool) -> Self {
        let tree = if include_tree {
            result
                .tree_edges
                .iter()
                .map(|e| [e.child.to_array(), e.parent.to_array()])
                .collect()
        } else {
            Vec::new()
        };

        Self {
            status: result.status,
            raw: result.raw.as_ref().map(PathRecord::from),
            smoothed: result.smoothed.as_ref().map(PathRecord::from),
            tree,
            stats: StatsRecord {
                iterations: result.stats.iterations,
                nodes: result.stats.nodes,
                rejected_samples: result.stats.rejected_samples,
                rewires: result.stats.rewires,
                elapsed_ms: result.stats.elapsed.as_secs_f64() * 1000.0,
            },
        }
    }
}

/// Render a plan document as pretty-printed JSON.
pub fn plan_to_json(result: &PlanResult, include_tree: bool) -> Result<String> {
    Ok(serde_json::to_string_pretty(&PlanFile::from_result(
        result,
        include_tree,
    ))?)
}

/// Write a plan document, creating parent directories as needed.
pub fn save_plan(result: &PlanResult, path: &Path, include_tree: bool) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, plan_to_json(result, include_tree)?)?;
    tracing::info!("Saved plan to {:?}", path);
    Ok(())
}

/// Waypoints in the follower's `[x, y]` form.
pub fn waypoint_pairs(waypoints: &[WorldPoint]) -> Vec<[f64; 2]> {
    waypoints.iter().map(|p| p.to_array()).collect()
}
