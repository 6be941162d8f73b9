use fastnoise_lite::{
    CellularDistanceFunction, CellularReturnType, DomainWarpType, FastNoiseLite, NoiseType,
};
use sprawl_geom::Grid;
use sprawl_tiles::Biome;

use crate::chunk_coord::ChunkCoord;
use crate::seed::noise_seed;
use crate::worldgen::WorldGenParams;

/// Biome classification over global tile coordinates.
pub struct BiomeField {
    cell: FastNoiseLite,
    warp: Option<FastNoiseLite>,
    thresholds: [f32; 4],
    chunk_tiles: usize,
}

impl BiomeField {
    pub fn new(seed: i64, params: &WorldGenParams) -> Self {
        let seed = noise_seed(seed);
        let mut cell = FastNoiseLite::with_seed(seed);
        cell.set_noise_type(Some(NoiseType::Cellular));
        cell.set_frequency(Some(params.noise_frequency));
        cell.set_cellular_return_type(Some(CellularReturnType::CellValue));
        cell.set_cellular_distance_function(Some(CellularDistanceFunction::Hybrid));
        let warp = params.warp_enable.then(|| {
            let mut w = FastNoiseLite::with_seed(seed);
            w.set_domain_warp_type(Some(DomainWarpType::OpenSimplex2));
            w.set_domain_warp_amp(Some(params.warp_amp));
            w.set_frequency(Some(params.warp_frequency));
            w
        });
        Self {
            cell,
            warp,
            thresholds: params.thresholds,
            chunk_tiles: params.chunk_tiles(),
        }
    }

    /// Raw noise value at a global tile, roughly in `[-1, 1]`.
    pub fn sample(&self, gx: i32, gy: i32) -> f32 {
        let (mut x, mut y) = (gx as f32, gy as f32);
        if let Some(w) = self.warp.as_ref() {
            (x, y) = w.domain_warp_2d(x, y);
        }
        self.cell.get_noise_2d(x, y)
    }

    /// Maps a noise value onto the ordered bands.
    pub fn band(&self, v: f32) -> Biome {
        let [water, wild_west, tundra, plains] = self.thresholds;
        if v < water {
            Biome::Water
        } else if v < wild_west {
            Biome::WildWest
        } else if v < tundra {
            Biome::Tundra
        } else if v < plains {
            Biome::Plains
        } else {
            Biome::Desert
        }
    }

    #[inline]
    pub fn classify(&self, gx: i32, gy: i32) -> Biome {
        self.band(self.sample(gx, gy))
    }

    pub fn fill_chunk(&self, coord: ChunkCoord) -> Grid<Biome> {
        let w = self.chunk_tiles;
        let ox = coord.cx * w as i32;
        let oy = coord.cy * w as i32;
        Grid::from_fn(w, w, |x, y| self.classify(ox + x as i32, oy + y as i32))
    }
}
