//! Biomes, tile ids and the tile registry.
#![forbid(unsafe_code)]

pub mod registry;
pub mod types;

pub use registry::{TileRegistry, TileType};
pub use types::{Biome, RoadTile, TileId, TileKind};
