use rand::Rng;
use sprawl_geom::{Grid, TileRect};
use sprawl_tiles::registry::DECORATION_VARIANTS;
use sprawl_tiles::{Biome, TileRegistry};

use crate::TerrainGrid;
use crate::objects::{ObjectKind, PlacementObject};
use crate::worldgen::WorldGenParams;

/// Scatters one-tile decorations over every still-empty tile. Every empty
/// tile draws the same two samples whether or not it gets a decoration.
pub fn place_decorations(
    biomes: &Grid<Biome>,
    terrain: &mut TerrainGrid,
    params: &WorldGenParams,
    tiles: &TileRegistry,
    rng: &mut impl Rng,
) -> Vec<PlacementObject> {
    let mut out = Vec::new();
    for x in 0..terrain.width() {
        for y in 0..terrain.height() {
            if terrain.value(x, y).is_some() {
                continue;
            }
            let roll: f64 = rng.r#gen();
            let variant = rng.gen_range(0..DECORATION_VARIANTS);
            let biome = biomes.value(x, y);
            let limit = params.decoration_density * params.decoration_multiplier.get(biome);
            if roll >= limit {
                continue;
            }
            if let Some(id) = tiles.decoration(biome, variant) {
                terrain.set(x, y, Some(id));
                out.push(PlacementObject::rect(
                    ObjectKind::Decoration,
                    TileRect::new(x as i32, y as i32, 1, 1),
                ));
            }
        }
    }
    out
}
