//! PNG overviews of a square block of chunks, north up.

use std::path::Path;
use std::time::Instant;

use image::{Rgb, RgbImage};
use sprawl_tiles::Biome;
use sprawl_world::{ChunkCoord, World};

use crate::generate_chunk_with_ctx;

#[derive(Debug, thiserror::Error)]
pub enum OverviewError {
    #[error("overview radius must be >= 0, got {0}")]
    NegativeRadius(i32),
    #[error("failed to write overview image: {0}")]
    Image(#[from] image::ImageError),
}

/// The `(2r+1)²` chunks around `center`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverviewRegion {
    center: ChunkCoord,
    radius: i32,
}

impl OverviewRegion {
    pub fn new(center: ChunkCoord, radius: i32) -> Result<Self, OverviewError> {
        if radius < 0 {
            return Err(OverviewError::NegativeRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn chunks(&self) -> impl Iterator<Item = ChunkCoord> {
        self.center.square(self.radius)
    }

    /// Lower-left global tile and side length in tiles.
    fn tile_bounds(&self, world: &World) -> (i32, i32, u32) {
        let w = world.chunk_tiles() as i32;
        let (ox, oy) = world.chunk_origin(self.center);
        let side = (2 * self.radius + 1) * w;
        (ox - self.radius * w, oy - self.radius * w, side as u32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverviewMode {
    /// Ground colour of every tile's biome.
    BiomeMap,
    /// Full chunks: roads, structures and decorations over the biomes.
    Chunks,
}

pub fn render_overview(world: &World, region: OverviewRegion, mode: OverviewMode) -> RgbImage {
    let t0 = Instant::now();
    let (min_x, min_y, side) = region.tile_bounds(world);
    let mut image = RgbImage::new(side, side);
    // row 0 is the northmost tile row
    let mut put = |gx: i32, gy: i32, rgb: [u8; 3]| {
        let px = (gx - min_x) as u32;
        let py = side - 1 - (gy - min_y) as u32;
        image.put_pixel(px, py, Rgb(rgb));
    };
    let mut ctx = world.make_gen_ctx();
    match mode {
        OverviewMode::BiomeMap => {
            for gy in min_y..min_y + side as i32 {
                for gx in min_x..min_x + side as i32 {
                    put(gx, gy, ground_color(world, ctx.biomes.classify(gx, gy)));
                }
            }
        }
        OverviewMode::Chunks => {
            for coord in region.chunks() {
                let chunk = generate_chunk_with_ctx(world, coord, &mut ctx).data;
                let (ox, oy) = world.chunk_origin(coord);
                for (x, y, biome) in chunk.biome_layer.iter() {
                    let color = match chunk.terrain_layer.value(x, y) {
                        Some(id) => world.tiles.color(id),
                        None => ground_color(world, *biome),
                    };
                    put(ox + x as i32, oy + y as i32, color);
                }
            }
        }
    }
    log::info!(
        target: "worldgen",
        "overview mode={:?} size={}x{} ms={}",
        mode,
        side,
        side,
        t0.elapsed().as_millis()
    );
    image
}

pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), OverviewError> {
    image.save(path)?;
    Ok(())
}

#[inline]
fn ground_color(world: &World, biome: Biome) -> [u8; 3] {
    world.tiles.color(world.tiles.ground(biome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprawl_world::WorldGenParams;

    fn world() -> World {
        World::new(11, WorldGenParams::default())
    }

    #[test]
    fn rejects_negative_radius() {
        assert!(matches!(
            OverviewRegion::new(ChunkCoord::new(0, 0), -1),
            Err(OverviewError::NegativeRadius(-1))
        ));
    }

    #[test]
    fn biome_map_is_north_up() {
        let world = world();
        let region = OverviewRegion::new(ChunkCoord::new(-1, 2), 0).unwrap();
        let img = render_overview(&world, region, OverviewMode::BiomeMap);
        assert_eq!(img.dimensions(), (80, 80));
        let (ox, oy) = world.chunk_origin(ChunkCoord::new(-1, 2));
        let north_west = world.biome_at(ox, oy + 79);
        assert_eq!(img.get_pixel(0, 0).0, ground_color(&world, north_west));
        let south_east = world.biome_at(ox + 79, oy);
        assert_eq!(img.get_pixel(79, 79).0, ground_color(&world, south_east));
    }

    #[test]
    fn chunk_mode_paints_terrain_over_ground() {
        let world = world();
        let coord = ChunkCoord::new(1, -1);
        let region = OverviewRegion::new(coord, 1).unwrap();
        let img = render_overview(&world, region, OverviewMode::Chunks);
        assert_eq!(img.dimensions(), (240, 240));
        let chunk = crate::generate_chunk(&world, coord).data;
        // centre chunk sits in the middle block of the image
        for (x, y, biome) in chunk.biome_layer.iter() {
            let want = match chunk.terrain_layer.value(x, y) {
                Some(id) => world.tiles.color(id),
                None => ground_color(&world, *biome),
            };
            let px = 80 + x as u32;
            let py = 240 - 1 - (80 + y as u32);
            assert_eq!(img.get_pixel(px, py).0, want);
        }
    }
}
