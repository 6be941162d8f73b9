use std::sync::Arc;

use sprawl_tiles::{Biome, TileRegistry};

use crate::biome::BiomeField;
use crate::chunk_coord::ChunkCoord;
use crate::edges::{ChunkBorders, EdgeSampler};
use crate::gen_ctx::{GenCtx, GenProfiler};
use crate::worldgen::WorldGenParams;

/// Seed plus frozen parameters. Cheap to share across threads.
#[derive(Clone, Debug)]
pub struct World {
    pub seed: i64,
    pub params: Arc<WorldGenParams>,
    pub tiles: Arc<TileRegistry>,
}

impl World {
    pub fn new(seed: i64, params: WorldGenParams) -> Self {
        Self {
            seed,
            params: Arc::new(params),
            tiles: Arc::new(TileRegistry::standard()),
        }
    }

    #[inline]
    pub fn chunk_tiles(&self) -> usize {
        self.params.chunk_tiles()
    }

    /// Global tile coordinate of the chunk's lower-left tile.
    #[inline]
    pub fn chunk_origin(&self, coord: ChunkCoord) -> (i32, i32) {
        let w = self.chunk_tiles() as i32;
        (coord.cx * w, coord.cy * w)
    }

    #[inline]
    pub fn chunk_of_tile(&self, gx: i32, gy: i32) -> ChunkCoord {
        let w = self.chunk_tiles() as i32;
        ChunkCoord::new(gx.div_euclid(w), gy.div_euclid(w))
    }

    /// World-space origin of a chunk.
    #[inline]
    pub fn chunk_world_origin(&self, coord: ChunkCoord) -> [f32; 2] {
        let s = self.params.chunk_world_size();
        [coord.cx as f32 * s, coord.cy as f32 * s]
    }

    pub fn chunk_of_world(&self, wx: f32, wy: f32) -> ChunkCoord {
        let s = self.params.chunk_world_size();
        ChunkCoord::new((wx / s).floor() as i32, (wy / s).floor() as i32)
    }

    pub fn make_gen_ctx(&self) -> GenCtx {
        let params = Arc::clone(&self.params);
        GenCtx {
            seed: self.seed,
            biomes: BiomeField::new(self.seed, &params),
            edges: EdgeSampler::new(self.seed, params.road_density, params.cells, params.chunk_tiles()),
            tiles: Arc::clone(&self.tiles),
            params,
            profiler: GenProfiler::new(),
        }
    }

    pub fn biome_at(&self, gx: i32, gy: i32) -> Biome {
        // PERF: builds fresh noise generators; use a `GenCtx` for bulk sampling.
        BiomeField::new(self.seed, &self.params).classify(gx, gy)
    }

    pub fn borders(&self, coord: ChunkCoord) -> ChunkBorders {
        EdgeSampler::new(
            self.seed,
            self.params.road_density,
            self.params.cells,
            self.params.chunk_tiles(),
        )
        .chunk_borders(coord)
    }
}
