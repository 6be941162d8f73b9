use rand::Rng;
use sprawl_geom::{Grid, TileRect};
use sprawl_tiles::registry::{STRUCTURE_PARTS, STRUCTURE_STYLES};
use sprawl_tiles::{Biome, TileRegistry};

use crate::TerrainGrid;
use crate::objects::{ObjectKind, PlacementObject};
use crate::roads::{RoadLayout, RoadShape};
use crate::worldgen::WorldGenParams;

pub const FOOTPRINT_W: usize = 4;
pub const FOOTPRINT_H: usize = 3;
/// The biome check extends one column past the stamp.
const CHECK_W: usize = FOOTPRINT_W + 1;

/// One attempt per land-collapsed road cell, in collapse order. Each
/// success stamps a 4x3 building just above the cell's horizontal lane.
pub fn place_structures(
    layout: &RoadLayout,
    biomes: &Grid<Biome>,
    terrain: &mut TerrainGrid,
    params: &WorldGenParams,
    tiles: &TileRegistry,
    rng: &mut impl Rng,
) -> Vec<PlacementObject> {
    let mut out = Vec::new();
    if !params.structures_enable {
        return out;
    }
    let h = params.road_size / 2;
    for &(cx, cy) in &layout.collapse_order {
        match layout.shape(cx, cy) {
            None | Some(RoadShape::Blocked) => continue,
            Some(_) => {}
        }
        let centre = biomes.value(cx * params.road_size + h, cy * params.road_size + h);
        if !centre.is_land() {
            continue;
        }
        if let Some(rect) = try_place(cx, cy, biomes, terrain, params, tiles, rng) {
            out.push(PlacementObject::rect(ObjectKind::Structure, rect));
        }
    }
    out
}

fn try_place(
    cx: usize,
    cy: usize,
    biomes: &Grid<Biome>,
    terrain: &mut TerrainGrid,
    params: &WorldGenParams,
    tiles: &TileRegistry,
    rng: &mut impl Rng,
) -> Option<TileRect> {
    if rng.gen_range(0..params.structure_skip_one_in) == 0 {
        return None;
    }
    let w = params.chunk_tiles();
    let r = params.road_size;
    let (x, y) = (cx * r, cy * r);
    if y + params.structure_top_margin > w {
        return None;
    }
    let start_x = x.saturating_sub(r / 4);
    let start_y = y + r / 2 + 1;
    let end_x = start_x + CHECK_W;
    let end_y = start_y + FOOTPRINT_H;
    if end_x > w || end_y > w {
        return None;
    }
    // must sit on a painted lane
    terrain.value(x + 1, start_y - 1)?;
    let biome = biomes.value(x, y);
    if !biome.is_land() {
        return None;
    }
    for j in start_y..end_y {
        for i in start_x..end_x {
            if biomes.value(i, j) != biome {
                return None;
            }
        }
    }
    let stamp_x = start_x..start_x + FOOTPRINT_W;
    for j in start_y..end_y {
        for i in stamp_x.clone() {
            if terrain.value(i, j).is_some() {
                return None;
            }
        }
    }

    let style = rng.gen_range(0..STRUCTURE_STYLES);
    let mut part = 0u8;
    for j in (start_y..end_y).rev() {
        for i in stamp_x.clone() {
            let id = tiles.structure(biome, style, part % STRUCTURE_PARTS)?;
            terrain.set(i, j, Some(id));
            part += 1;
        }
    }
    Some(TileRect::new(
        start_x as i32,
        start_y as i32,
        FOOTPRINT_W as i32,
        FOOTPRINT_H as i32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::ObjectShape;
    use crate::roads::CollapseCell;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use sprawl_tiles::{RoadTile, TileKind};

    fn single_cell_layout(params: &WorldGenParams, cx: usize, cy: usize) -> RoadLayout {
        let t = params.cells;
        let mut grid = vec![CollapseCell::default(); t * t];
        grid[cy * t + cx] = CollapseCell {
            constraints: [Some(false), Some(true), Some(true), Some(false)],
            collapsed: true,
            shape: Some(RoadShape::Horizontal),
        };
        RoadLayout {
            cells: t,
            road_size: params.road_size,
            grid,
            collapse_order: vec![(cx, cy)],
            stats: Default::default(),
        }
    }

    #[test]
    fn stamps_above_lane_and_never_on_road() {
        let params = WorldGenParams {
            structure_skip_one_in: 1_000_000,
            ..WorldGenParams::default()
        };
        let tiles = TileRegistry::standard();
        let w = params.chunk_tiles();
        let biomes = Grid::new(w, w, Biome::Plains);
        let mut terrain: TerrainGrid = Grid::new(w, w, None);
        let (cx, cy) = (2, 3);
        let (x0, y0) = (cx * 10, cy * 10);
        for x in x0..x0 + 10 {
            terrain.set(x, y0 + 5, Some(tiles.road(RoadTile::RoadTop)));
            terrain.set(x, y0 + 4, Some(tiles.road(RoadTile::RoadBottom)));
        }
        let layout = single_cell_layout(&params, cx, cy);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let objs = place_structures(&layout, &biomes, &mut terrain, &params, &tiles, &mut rng);
        assert_eq!(objs.len(), 1);
        let ObjectShape::Rect(rect) = objs[0].shape else {
            panic!("structure must be a rect");
        };
        assert_eq!(rect, TileRect::new(18, 36, 4, 3));
        let first = terrain.value(18, 38).unwrap();
        let TileKind::Structure { part, biome, .. } = tiles.kind(first) else {
            panic!("expected a structure tile");
        };
        assert_eq!((part, biome), (0, Biome::Plains));
        let last = terrain.value(21, 36).unwrap();
        assert!(matches!(tiles.kind(last), TileKind::Structure { part: 11, .. }));
        for (x, y) in rect.tiles() {
            assert!(matches!(
                tiles.kind(terrain.value(x as usize, y as usize).unwrap()),
                TileKind::Structure { .. }
            ));
        }
    }

    #[test]
    fn mixed_biome_footprint_is_skipped() {
        let params = WorldGenParams {
            structure_skip_one_in: 1_000_000,
            ..WorldGenParams::default()
        };
        let tiles = TileRegistry::standard();
        let w = params.chunk_tiles();
        let mut biomes = Grid::new(w, w, Biome::Desert);
        biomes.set(22, 37, Biome::Tundra);
        let mut terrain: TerrainGrid = Grid::new(w, w, None);
        terrain.set(21, 35, Some(tiles.road(RoadTile::RoadTop)));
        let layout = single_cell_layout(&params, 2, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let objs = place_structures(&layout, &biomes, &mut terrain, &params, &tiles, &mut rng);
        assert!(objs.is_empty());
        assert_eq!(terrain.count(|t| t.is_some()), 1);
    }

    #[test]
    fn needs_road_below() {
        let params = WorldGenParams {
            structure_skip_one_in: 1_000_000,
            ..WorldGenParams::default()
        };
        let tiles = TileRegistry::standard();
        let w = params.chunk_tiles();
        let biomes = Grid::new(w, w, Biome::WildWest);
        let mut terrain: TerrainGrid = Grid::new(w, w, None);
        let layout = single_cell_layout(&params, 4, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert!(place_structures(&layout, &biomes, &mut terrain, &params, &tiles, &mut rng).is_empty());
    }
}
