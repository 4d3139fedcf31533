//! Core geometric types.
//!
//! - [`WorldPoint`]: 2D world coordinates in meters
//! - [`Obstacle`]: rectangle rotated about its center
//! - [`World`]: validated start/goal/obstacle snapshot for one request

mod obstacle;
mod point;
mod world;

pub use obstacle::Obstacle;
pub use point::WorldPoint;
pub use world::World;
