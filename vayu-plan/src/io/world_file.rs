//! World JSON in the supervisor's wire shape.
//!
//! ```json
//! {
//!   "start": [0.0, 0.0],
//!   "goal": [5.0, 0.0],
//!   "obstacles": [{ "x": 2.0, "y": 0.0, "w": 1.0, "h": 4.0, "rot": 0.0 }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Obstacle, World, WorldPoint};
use crate::error::{Result, VayuError};

/// One obstacle as it appears on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleRecord {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Yaw in radians, CCW
    #[serde(default)]
    pub rot: f64,
}

/// Unvalidated world description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldFile {
    pub start: [f64; 2],
    pub goal: [f64; 2],
    #[serde(default)]
    pub obstacles: Vec<ObstacleRecord>,
}

impl TryFrom<WorldFile> for World {
    type Error = VayuError;

    fn try_from(file: WorldFile) -> Result<Self> {
        let obstacles = file
            .obstacles
            .iter()
            .map(|o| Obstacle::new(WorldPoint::new(o.x, o.y), o.w, o.h, o.rot))
            .collect();
        World::new(file.start.into(), file.goal.into(), obstacles)
    }
}

impl From<&World> for WorldFile {
    fn from(world: &World) -> Self {
        Self {
            start: world.start().to_array(),
            goal: world.goal().to_array(),
            obstacles: world
                .obstacles()
                .iter()
                .map(|o| ObstacleRecord {
                    x: o.center.x,
                    y: o.center.y,
                    w: o.width,
                    h: o.height,
                    rot: o.yaw,
                })
                .collect(),
        }
    }
}

/// Parse and validate a world from JSON text.
pub fn parse_world(json: &str) -> Result<World> {
    let file: WorldFile = serde_json::from_str(json)?;
    World::try_from(file)
}

/// Load and validate a world JSON file.
pub fn load_world(path: &Path) -> Result<World> {
    let content = std::fs::read_to_string(path)?;
    let world = parse_world(&content)?;
    tracing::debug!(
        "Loaded world from {:?}: {} obstacles",
        path,
        world.obstacles().len()
    );
    Ok(world)
}

/// Write a world as pretty-printed JSON.
pub fn save_world(world: &World, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&WorldFile::from(world))?;
    std::fs::write(path, json)?;
    Ok(())
}
