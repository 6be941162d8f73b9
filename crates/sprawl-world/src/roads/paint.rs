use sprawl_geom::{Grid, Side};
use sprawl_tiles::{Biome, RoadTile, TileId, TileRegistry};

use crate::edges::ChunkBorders;
use crate::TerrainGrid;

/// Stamps two-tile-wide lanes into the terrain grid, one coarse cell at a time.
pub(crate) struct RoadPainter<'a> {
    pub road_size: usize,
    pub cells: usize,
    pub biomes: &'a Grid<Biome>,
    pub borders: &'a ChunkBorders,
    pub tiles: &'a TileRegistry,
}

impl RoadPainter<'_> {
    /// Paints every connected side of `(cx, cy)` plus the matching half lane
    /// of the neighbour across that side.
    pub fn paint_cell(&self, terrain: &mut TerrainGrid, cx: usize, cy: usize, sides: [bool; 4]) {
        for side in Side::ALL {
            if !sides[side.index()] {
                continue;
            }
            self.paint_lane(terrain, cx, cy, side);
            let (dx, dy) = side.offset();
            let (nx, ny) = (cx as i32 + dx, cy as i32 + dy);
            if self.in_bounds(nx, ny) {
                self.paint_lane(terrain, nx as usize, ny as usize, side.opposite());
            }
        }
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cells && (y as usize) < self.cells
    }

    /// Lanes that would leave the chunk only exist where the border says a road crosses.
    fn crosses_border(&self, cx: usize, cy: usize, side: Side) -> bool {
        let last = self.cells - 1;
        match side {
            Side::Up if cy == last => self.borders.top[cx],
            Side::Down if cy == 0 => self.borders.bottom[cx],
            Side::Left if cx == 0 => self.borders.left[cy],
            Side::Right if cx == last => self.borders.right[cy],
            _ => true,
        }
    }

    fn paint_lane(&self, terrain: &mut TerrainGrid, cx: usize, cy: usize, side: Side) {
        if !self.crosses_border(cx, cy, side) {
            return;
        }
        let r = self.road_size;
        let h = r / 2;
        let mut cell = CellView {
            x0: cx * r,
            y0: cy * r,
            terrain,
            biomes: self.biomes,
        };

        let vertical = matches!(side, Side::Up | Side::Down);
        let straight = if vertical {
            self.tiles.road(RoadTile::RoadRight)
        } else {
            self.tiles.road(RoadTile::RoadTop)
        };
        if cell.get(h, h).is_some_and(|id| id != straight) {
            self.paint_junction(&mut cell, side);
        }

        let steps: Vec<usize> = match side {
            Side::Up | Side::Right => (h - 1..r).rev().collect(),
            Side::Down | Side::Left => (0..=h).collect(),
        };
        for i in steps {
            let (a, b) = if vertical { ((h, i), (h - 1, i)) } else { ((i, h), (i, h - 1)) };
            if cell.land(a.0, a.1) && cell.land(b.0, b.1) && cell.get(a.0, a.1).is_none() {
                let (ta, tb) = if vertical {
                    (RoadTile::RoadRight, RoadTile::RoadLeft)
                } else {
                    (RoadTile::RoadTop, RoadTile::RoadBottom)
                };
                cell.put(a.0, a.1, self.tiles.road(ta));
                cell.put(b.0, b.1, self.tiles.road(tb));
            }
        }
    }

    /// A lane reaching a centre already holding a perpendicular lane.
    fn paint_junction(&self, cell: &mut CellView<'_>, side: Side) {
        let h = self.road_size / 2;
        let junction = self.tiles.road(RoadTile::Junction);
        let cw_height = self.tiles.road(RoadTile::CrosswalkHeight);
        let cw_width = self.tiles.road(RoadTile::CrosswalkWidth);
        for (x, y) in [(h, h), (h, h - 1), (h - 1, h), (h - 1, h - 1)] {
            cell.put_land(x, y, junction);
        }
        match side {
            Side::Up | Side::Down => {
                let row = if side == Side::Up { h + 1 } else { h - 2 };
                cell.put_land(h, row, cw_height);
                cell.put_land(h - 1, row, cw_height);
                for col in [h - 2, h + 1] {
                    if cell.get(col, h).is_some() {
                        cell.put_land(col, h, cw_width);
                        cell.put_land(col, h - 1, cw_width);
                    }
                }
            }
            Side::Left | Side::Right => {
                let col = if side == Side::Left { h - 2 } else { h + 1 };
                cell.put_land(col, h, cw_width);
                cell.put_land(col, h - 1, cw_width);
                for row in [h - 2, h + 1] {
                    if cell.get(h, row).is_some() {
                        cell.put_land(h, row, cw_height);
                        cell.put_land(h - 1, row, cw_height);
                    }
                }
            }
        }
    }
}

/// Cell-local accessors over the chunk grids.
struct CellView<'a> {
    x0: usize,
    y0: usize,
    terrain: &'a mut TerrainGrid,
    biomes: &'a Grid<Biome>,
}

impl CellView<'_> {
    #[inline]
    fn get(&self, lx: usize, ly: usize) -> Option<TileId> {
        self.terrain.value(self.x0 + lx, self.y0 + ly)
    }

    #[inline]
    fn land(&self, lx: usize, ly: usize) -> bool {
        self.biomes.value(self.x0 + lx, self.y0 + ly).is_land()
    }

    #[inline]
    fn put(&mut self, lx: usize, ly: usize, id: TileId) {
        self.terrain.set(self.x0 + lx, self.y0 + ly, Some(id));
    }

    #[inline]
    fn put_land(&mut self, lx: usize, ly: usize, id: TileId) {
        if self.land(lx, ly) {
            self.put(lx, ly, id);
        }
    }
}
