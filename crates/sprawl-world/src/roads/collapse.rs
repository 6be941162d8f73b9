use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rand::Rng;
use sprawl_geom::{Grid, Side};
use sprawl_tiles::{Biome, TileRegistry};

use super::paint::RoadPainter;
use super::{CollapseCell, Constraints, RoadLayout, RoadShape, RoadStats};
use crate::TerrainGrid;
use crate::edges::ChunkBorders;
use crate::worldgen::WorldGenParams;

/// Constraint update for the cell at `(x, y)` when a road reaches it from
/// the neighbour on `from`. Cells in the two outermost rings get fixed
/// patterns that depend only on their position.
pub fn propagation_constraints(x: usize, y: usize, cells: usize, from: Side) -> Constraints {
    let t = cells;
    let half = t / 2;
    let last = t - 1;
    let corner = (x == 0 || x == last) && (y == 0 || y == last);
    if corner {
        return [
            Some((x == 0 && y == last) || (x == last && y == last)),
            Some(x == 0),
            Some(x == last),
            Some((x == 0 && y == 0) || (x == last && y == 0)),
        ];
    }
    if x <= 1 || x + 2 >= t {
        return [
            Some(y >= half),
            if x >= half { None } else { Some(false) },
            if x >= half { Some(false) } else { None },
            Some(y <= half),
        ];
    }
    if y <= 1 || y + 2 >= t {
        return [
            if y >= half { Some(false) } else { None },
            Some(x <= half),
            Some(x >= half),
            if y >= half { None } else { Some(false) },
        ];
    }
    let mut update = [None; 4];
    update[from.index()] = Some(true);
    update
}

/// Heap entry: live option count, insertion sequence, cell position.
type QueueEntry = Reverse<(usize, u64, usize, usize)>;

pub struct RoadCollapser<'a> {
    cells: usize,
    road_size: usize,
    biomes: &'a Grid<Biome>,
    params: &'a WorldGenParams,
    painter: RoadPainter<'a>,
    grid: Vec<CollapseCell>,
    queue: BinaryHeap<QueueEntry>,
    seq: u64,
    order: Vec<(usize, usize)>,
    stats: RoadStats,
}

impl<'a> RoadCollapser<'a> {
    pub fn new(
        params: &'a WorldGenParams,
        tiles: &'a TileRegistry,
        biomes: &'a Grid<Biome>,
        borders: &'a ChunkBorders,
    ) -> Self {
        let cells = params.cells;
        Self {
            cells,
            road_size: params.road_size,
            biomes,
            params,
            painter: RoadPainter {
                road_size: params.road_size,
                cells,
                biomes,
                borders,
                tiles,
            },
            grid: vec![CollapseCell::default(); cells * cells],
            queue: BinaryHeap::new(),
            seq: 0,
            order: Vec::new(),
            stats: RoadStats::default(),
        }
    }

    /// Seeds the border cells, then collapses until the queue drains.
    pub fn run(mut self, terrain: &mut TerrainGrid, rng: &mut impl Rng) -> RoadLayout {
        let t = self.cells;
        let borders = self.painter.borders;
        for i in 0..t {
            if borders.top[i] {
                self.seed_cell(terrain, i, t - 1, Side::Up);
            }
            if borders.left[i] {
                self.seed_cell(terrain, 0, i, Side::Left);
            }
            if borders.right[i] {
                self.seed_cell(terrain, t - 1, i, Side::Right);
            }
            if borders.bottom[i] {
                self.seed_cell(terrain, i, 0, Side::Down);
            }
        }

        while let Some(Reverse((_, _, x, y))) = self.queue.pop() {
            self.stats.dequeues += 1;
            if self.grid[self.idx(x, y)].collapsed {
                continue;
            }
            self.collapse_cell(terrain, rng, x, y);
        }

        self.stats.unreached = self.grid.iter().filter(|c| !c.collapsed).count() as u32;
        RoadLayout {
            cells: self.cells,
            road_size: self.road_size,
            grid: self.grid,
            collapse_order: self.order,
            stats: self.stats,
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.cells + x
    }

    fn centre_biome(&self, x: usize, y: usize) -> Biome {
        let h = self.road_size / 2;
        self.biomes.value(x * self.road_size + h, y * self.road_size + h)
    }

    /// A border crossing forces the straight shape through that border.
    /// A cell seeded from two borders keeps both straights.
    fn seed_cell(&mut self, terrain: &mut TerrainGrid, x: usize, y: usize, border: Side) {
        let i = self.idx(x, y);
        let mut sides = RoadShape::straight_through(border).sides();
        let cell = &mut self.grid[i];
        if cell.collapsed {
            for (s, prev) in sides.iter_mut().zip(cell.sides()) {
                *s |= prev;
            }
        } else {
            self.order.push((x, y));
            self.stats.seeded += 1;
        }
        cell.collapsed = true;
        cell.shape = RoadShape::from_sides(sides);
        cell.constraints = sides.map(Some);
        self.painter.paint_cell(terrain, x, y, sides);
        self.propagate(x, y);
    }

    fn collapse_cell(&mut self, terrain: &mut TerrainGrid, rng: &mut impl Rng, x: usize, y: usize) {
        let i = self.idx(x, y);
        let biome = self.centre_biome(x, y);
        if !biome.is_land() {
            let cell = &mut self.grid[i];
            cell.collapsed = true;
            cell.shape = Some(RoadShape::Blocked);
            cell.constraints = [Some(false); 4];
            self.order.push((x, y));
            self.stats.blocked += 1;
            return;
        }

        let multiplier = self.params.straight_multiplier.get(biome);
        let weight = |s: RoadShape| {
            if s.is_straight() {
                s.weight() * multiplier
            } else {
                s.weight()
            }
        };
        let cell = self.grid[i];
        let total: u32 = RoadShape::SELECTABLE
            .iter()
            .filter(|s| cell.admits(**s))
            .map(|s| weight(*s))
            .sum();
        if total == 0 {
            self.stats.contradictions += 1;
            log::trace!(target: "worldgen", "road_contradiction cell=({}, {}) constraints={:?}", x, y, cell.constraints);
            return;
        }

        let mut pick = rng.gen_range(0..total);
        let mut chosen = None;
        for s in RoadShape::SELECTABLE.iter().filter(|s| cell.admits(**s)) {
            let w = weight(*s);
            if pick < w {
                chosen = Some(*s);
                break;
            }
            pick -= w;
        }
        let Some(shape) = chosen else {
            return;
        };

        let cell = &mut self.grid[i];
        cell.collapsed = true;
        cell.shape = Some(shape);
        cell.constraints = shape.sides().map(Some);
        self.order.push((x, y));
        self.stats.collapsed += 1;
        self.painter.paint_cell(terrain, x, y, shape.sides());
        self.propagate(x, y);
    }

    fn propagate(&mut self, x: usize, y: usize) {
        let sides = self.grid[self.idx(x, y)].sides();
        for side in [Side::Up, Side::Down, Side::Left, Side::Right] {
            if !sides[side.index()] {
                continue;
            }
            let (dx, dy) = side.offset();
            let (nx, ny) = (x as i32 + dx, y as i32 + dy);
            if nx < 0 || ny < 0 || nx as usize >= self.cells || ny as usize >= self.cells {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            let ni = self.idx(nx, ny);
            if self.grid[ni].collapsed {
                continue;
            }
            let update = propagation_constraints(nx, ny, self.cells, side.opposite());
            self.grid[ni].restrict(update);
            let count = self.grid[ni].option_count();
            self.queue.push(Reverse((count, self.seq, nx, ny)));
            self.seq += 1;
            self.stats.pushes += 1;
        }
    }
}
