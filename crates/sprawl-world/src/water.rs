//! Water outlines: water tiles grouped into 8-connected bodies, each body
//! traced into closed rings of tile corners.

use sprawl_geom::{Corner, Grid, Polygon, Side};
use sprawl_tiles::Biome;

/// Rings with this many vertices or fewer are dropped.
pub const MIN_RING_VERTICES: usize = 4;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaterOutlines {
    pub polygons: Vec<Polygon>,
    pub regions: usize,
    pub dropped_rings: usize,
    pub capped_rings: usize,
}

const NEIGHBOURS_8: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

struct Tracer<'a> {
    biomes: &'a Grid<Biome>,
    w: i32,
    h: i32,
    /// Walked directed edges, indexed by start corner and heading.
    walked: Vec<bool>,
}

impl<'a> Tracer<'a> {
    fn new(biomes: &'a Grid<Biome>) -> Self {
        let (w, h) = (biomes.width() as i32, biomes.height() as i32);
        Self {
            biomes,
            w,
            h,
            walked: vec![false; ((w + 1) * (h + 1) * 4) as usize],
        }
    }

    #[inline]
    fn is_water(&self, x: i32, y: i32) -> bool {
        self.biomes.get(x, y).is_some_and(|b| *b == Biome::Water)
    }

    #[inline]
    fn edge_index(&self, c: Corner, heading: Side) -> usize {
        ((c.y * (self.w + 1) + c.x) * 4) as usize + heading.index()
    }

    /// Tiles to the right and left of the unit edge leaving `c` along `heading`.
    fn flanks(c: Corner, heading: Side) -> ((i32, i32), (i32, i32)) {
        match heading {
            Side::Right => ((c.x, c.y - 1), (c.x, c.y)),
            Side::Down => ((c.x - 1, c.y - 1), (c.x, c.y - 1)),
            Side::Left => ((c.x - 1, c.y), (c.x - 1, c.y - 1)),
            Side::Up => ((c.x, c.y), (c.x - 1, c.y)),
        }
    }

    /// A boundary edge keeps water on its right and anything else on its left.
    fn is_edge(&self, c: Corner, heading: Side) -> bool {
        if c.x < 0 || c.y < 0 || c.x > self.w || c.y > self.h {
            return false;
        }
        let (right, left) = Self::flanks(c, heading);
        self.is_water(right.0, right.1) && !self.is_water(left.0, left.1)
    }

    /// Edge along `side` of tile `(x, y)`, oriented clockwise around the water.
    fn tile_edge(x: i32, y: i32, side: Side) -> (Corner, Side) {
        match side {
            Side::Up => (Corner::new(x, y + 1), Side::Right),
            Side::Right => (Corner::new(x + 1, y + 1), Side::Down),
            Side::Down => (Corner::new(x + 1, y), Side::Left),
            Side::Left => (Corner::new(x, y), Side::Up),
        }
    }

    /// Every water tile 8-connected to `start`. Islands stay inside the
    /// body that surrounds them.
    fn body_from(&self, start: (i32, i32), visited: &mut [bool]) -> Vec<(i32, i32)> {
        let mut body = Vec::new();
        let mut stack = vec![start];
        visited[(start.1 * self.w + start.0) as usize] = true;
        while let Some((x, y)) = stack.pop() {
            body.push((x, y));
            for (dx, dy) in NEIGHBOURS_8 {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= self.w || ny >= self.h {
                    continue;
                }
                let i = (ny * self.w + nx) as usize;
                if !visited[i] && self.is_water(nx, ny) {
                    visited[i] = true;
                    stack.push((nx, ny));
                }
            }
        }
        body
    }

    /// Follows the wall from `start` until it comes back around. `None` when
    /// the step cap is hit.
    fn trace(&mut self, start: (Corner, Side)) -> Option<Vec<Corner>> {
        let cap = (4 * self.w * self.h + 4) as usize;
        let mut ring: Vec<Corner> = Vec::new();
        let (mut at, mut heading) = start;
        for _ in 0..cap {
            let ei = self.edge_index(at, heading);
            self.walked[ei] = true;
            if ring.last() != Some(&at) {
                ring.push(at);
            }
            let next = at.step(heading);
            let turn = [heading.turn_left(), heading, heading.turn_right()]
                .into_iter()
                .find(|d| self.is_edge(next, *d))?;
            at = next;
            heading = turn;
            if (at, heading) == start {
                return Some(ring);
            }
        }
        None
    }
}

/// One polygon per 8-connected water body. The outer ring comes first and
/// runs clockwise; islands add counter-clockwise rings after it.
pub fn trace_water(biomes: &Grid<Biome>) -> WaterOutlines {
    let mut tracer = Tracer::new(biomes);
    let (w, h) = (tracer.w, tracer.h);
    let mut visited = vec![false; (w * h) as usize];
    let mut out = WaterOutlines::default();

    for x in 0..w {
        for y in 0..h {
            if visited[(y * w + x) as usize] || !tracer.is_water(x, y) {
                continue;
            }
            let mut body = tracer.body_from((x, y), &mut visited);
            body.sort_unstable();
            out.regions += 1;

            let mut rings = Vec::new();
            for &(tx, ty) in &body {
                for side in Side::ALL {
                    let (c, heading) = Tracer::tile_edge(tx, ty, side);
                    if !tracer.is_edge(c, heading) || tracer.walked[tracer.edge_index(c, heading)] {
                        continue;
                    }
                    match tracer.trace((c, heading)) {
                        Some(ring) if ring.len() > MIN_RING_VERTICES => rings.push(ring),
                        Some(_) => out.dropped_rings += 1,
                        None => {
                            out.capped_rings += 1;
                            log::warn!(target: "worldgen", "water_trace_capped start=({}, {})", tx, ty);
                        }
                    }
                }
            }
            rings.sort_by_key(|r| Polygon::ring_area2(r));
            // holes without their shore are not a body
            if rings.first().is_some_and(|r| Polygon::ring_area2(r) < 0) {
                out.polygons.push(Polygon::new(rings));
            }
        }
    }
    out
}
