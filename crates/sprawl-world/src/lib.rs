//! Seeded chunk layers: biomes, border crossings, roads, structures,
//! decorations and water outlines.
#![forbid(unsafe_code)]

pub mod biome;
pub mod chunk_coord;
pub mod decorations;
pub mod edges;
pub mod gen_ctx;
pub mod objects;
pub mod roads;
pub mod seed;
pub mod structures;
pub mod water;
pub mod world;
pub mod worldgen;

use sprawl_geom::Grid;
use sprawl_tiles::{Biome, TileId};

pub use biome::BiomeField;
pub use chunk_coord::ChunkCoord;
pub use edges::{ChunkBorders, EdgeSampler};
pub use gen_ctx::{ChunkTiming, GEN_STAGE_COUNT, GEN_STAGE_LABELS, GenCtx, GenProfiler, GenStage};
pub use objects::{ObjectKind, ObjectShape, PlacementObject, WorldObject, WorldShape};
pub use roads::{RoadLayout, RoadShape, RoadStats};
pub use water::WaterOutlines;
pub use world::World;
pub use worldgen::{ConfigError, WorldGenConfig, WorldGenParams, load_params_from_path};

pub type BiomeGrid = Grid<Biome>;
/// `None` is empty ground.
pub type TerrainGrid = Grid<Option<TileId>>;
