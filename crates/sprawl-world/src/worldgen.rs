use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use sprawl_tiles::Biome;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read worldgen config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse worldgen config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid worldgen config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub noise: Noise,
    #[serde(default)]
    pub roads: Roads,
    #[serde(default)]
    pub structures: Structures,
    #[serde(default)]
    pub decorations: Decorations,
    #[serde(default)]
    pub runtime: Runtime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Layout {
    #[serde(default = "default_tile_pixels")]
    pub tile_pixels: u32,
    #[serde(default = "default_pixels_per_meter")]
    pub pixels_per_meter: f32,
    #[serde(default = "default_road_size")]
    pub road_size: usize,
    #[serde(default = "default_cells")]
    pub cells: usize,
}
fn default_tile_pixels() -> u32 {
    8
}
fn default_pixels_per_meter() -> f32 {
    32.0
}
fn default_road_size() -> usize {
    10
}
fn default_cells() -> usize {
    8
}
impl Default for Layout {
    fn default() -> Self {
        Self {
            tile_pixels: default_tile_pixels(),
            pixels_per_meter: default_pixels_per_meter(),
            road_size: default_road_size(),
            cells: default_cells(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Noise {
    #[serde(default = "default_noise_freq")]
    pub frequency: f32,
    #[serde(default = "default_true")]
    pub warp_enable: bool,
    #[serde(default = "default_warp_amp")]
    pub warp_amp: f32,
    #[serde(default = "default_noise_freq")]
    pub warp_frequency: f32,
    /// Upper bounds of the water, wild west, tundra and plains bands; desert is everything above.
    #[serde(default = "default_thresholds")]
    pub thresholds: [f32; 4],
}
fn default_noise_freq() -> f32 {
    0.01
}
fn default_true() -> bool {
    true
}
fn default_warp_amp() -> f32 {
    50.0
}
fn default_thresholds() -> [f32; 4] {
    [-0.70, -0.30, 0.10, 0.60]
}
impl Default for Noise {
    fn default() -> Self {
        Self {
            frequency: default_noise_freq(),
            warp_enable: true,
            warp_amp: default_warp_amp(),
            warp_frequency: default_noise_freq(),
            thresholds: default_thresholds(),
        }
    }
}

/// Per land-biome weights. Water never takes part in weighted draws.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct BiomeWeights<T> {
    pub desert: T,
    pub plains: T,
    pub wild_west: T,
    pub tundra: T,
}

impl<T: Copy + Default> BiomeWeights<T> {
    #[inline]
    pub fn get(&self, biome: Biome) -> T {
        match biome {
            Biome::Desert => self.desert,
            Biome::Plains => self.plains,
            Biome::WildWest => self.wild_west,
            Biome::Tundra => self.tundra,
            Biome::Water => T::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Roads {
    #[serde(default = "default_road_density")]
    pub density: f64,
    #[serde(default = "default_straight_multiplier")]
    pub straight_multiplier: BiomeWeights<u32>,
}
fn default_road_density() -> f64 {
    0.1
}
fn default_straight_multiplier() -> BiomeWeights<u32> {
    BiomeWeights {
        desert: 3,
        plains: 5,
        wild_west: 2,
        tundra: 3,
    }
}
impl Default for Roads {
    fn default() -> Self {
        Self {
            density: default_road_density(),
            straight_multiplier: default_straight_multiplier(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Structures {
    #[serde(default = "default_true")]
    pub enable: bool,
    /// One attempt in `skip_one_in` is skipped outright.
    #[serde(default = "default_skip_one_in")]
    pub skip_one_in: u32,
    /// Cells whose origin row is within this many tiles of the top edge get no structure.
    #[serde(default = "default_top_margin")]
    pub top_margin: usize,
}
fn default_skip_one_in() -> u32 {
    3
}
fn default_top_margin() -> usize {
    5
}
impl Default for Structures {
    fn default() -> Self {
        Self {
            enable: true,
            skip_one_in: default_skip_one_in(),
            top_margin: default_top_margin(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Decorations {
    #[serde(default = "default_decoration_density")]
    pub density: f64,
    #[serde(default = "default_decoration_multiplier")]
    pub multiplier: BiomeWeights<f64>,
}
fn default_decoration_density() -> f64 {
    0.002
}
fn default_decoration_multiplier() -> BiomeWeights<f64> {
    BiomeWeights {
        desert: 1.0,
        plains: 4.0,
        wild_west: 2.0,
        tundra: 2.0,
    }
}
impl Default for Decorations {
    fn default() -> Self {
        Self {
            density: default_decoration_density(),
            multiplier: default_decoration_multiplier(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Runtime {
    #[serde(default = "default_load_radius")]
    pub load_radius: i32,
    /// Zero uses every available core.
    #[serde(default)]
    pub workers: usize,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}
fn default_load_radius() -> i32 {
    1
}
fn default_cache_capacity() -> usize {
    64
}
impl Default for Runtime {
    fn default() -> Self {
        Self {
            load_radius: default_load_radius(),
            workers: 0,
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// Frozen generation parameters. Everything here shapes seams between
/// neighbouring chunks, so a running world never changes them.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub tile_pixels: u32,
    pub pixels_per_meter: f32,
    pub road_size: usize,
    pub cells: usize,
    pub noise_frequency: f32,
    pub warp_enable: bool,
    pub warp_amp: f32,
    pub warp_frequency: f32,
    pub thresholds: [f32; 4],
    pub road_density: f64,
    pub straight_multiplier: BiomeWeights<u32>,
    pub structures_enable: bool,
    pub structure_skip_one_in: u32,
    pub structure_top_margin: usize,
    pub decoration_density: f64,
    pub decoration_multiplier: BiomeWeights<f64>,
    pub load_radius: i32,
    pub workers: usize,
    pub cache_capacity: usize,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            tile_pixels: cfg.layout.tile_pixels,
            pixels_per_meter: cfg.layout.pixels_per_meter,
            road_size: cfg.layout.road_size,
            cells: cfg.layout.cells,
            noise_frequency: cfg.noise.frequency,
            warp_enable: cfg.noise.warp_enable,
            warp_amp: cfg.noise.warp_amp,
            warp_frequency: cfg.noise.warp_frequency,
            thresholds: cfg.noise.thresholds,
            road_density: cfg.roads.density,
            straight_multiplier: cfg.roads.straight_multiplier,
            structures_enable: cfg.structures.enable,
            structure_skip_one_in: cfg.structures.skip_one_in,
            structure_top_margin: cfg.structures.top_margin,
            decoration_density: cfg.decorations.density,
            decoration_multiplier: cfg.decorations.multiplier,
            load_radius: cfg.runtime.load_radius,
            workers: cfg.runtime.workers,
            cache_capacity: cfg.runtime.cache_capacity,
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: WorldGenConfig = toml::from_str(s)?;
        let params = Self::from_config(&cfg);
        params.validate()?;
        Ok(params)
    }

    /// Tiles along one side of a chunk.
    #[inline]
    pub fn chunk_tiles(&self) -> usize {
        self.road_size * self.cells
    }

    /// World units covered by one tile.
    #[inline]
    pub fn tile_world_size(&self) -> f32 {
        (self.tile_pixels * self.tile_pixels) as f32 / self.pixels_per_meter
    }

    #[inline]
    pub fn chunk_world_size(&self) -> f32 {
        self.chunk_tiles() as f32 * self.tile_world_size()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.road_size < 4 || self.road_size % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "layout.road_size must be even and at least 4, got {}",
                self.road_size
            )));
        }
        if self.cells < 3 {
            return Err(ConfigError::Invalid(format!(
                "layout.cells must be at least 3, got {}",
                self.cells
            )));
        }
        if self.tile_pixels == 0 || !(self.pixels_per_meter > 0.0) {
            return Err(ConfigError::Invalid(
                "layout.tile_pixels and layout.pixels_per_meter must be positive".into(),
            ));
        }
        if !(self.noise_frequency > 0.0) {
            return Err(ConfigError::Invalid("noise.frequency must be positive".into()));
        }
        if self.thresholds.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(ConfigError::Invalid(format!(
                "noise.thresholds must be strictly increasing, got {:?}",
                self.thresholds
            )));
        }
        for (name, d) in [
            ("roads.density", self.road_density),
            ("decorations.density", self.decoration_density),
        ] {
            if !(0.0..=1.0).contains(&d) {
                return Err(ConfigError::Invalid(format!("{name} must be in [0, 1], got {d}")));
            }
        }
        if self.structure_skip_one_in == 0 {
            return Err(ConfigError::Invalid("structures.skip_one_in must be at least 1".into()));
        }
        if self.load_radius < 0 {
            return Err(ConfigError::Invalid("runtime.load_radius must not be negative".into()));
        }
        Ok(())
    }
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    WorldGenParams::from_toml_str(&s)
}
