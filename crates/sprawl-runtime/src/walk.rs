use sprawl_chunk::ChunkData;
use sprawl_geom::Grid;
use sprawl_world::ChunkCoord;

/// Blocked-tile mask over the `(2r+1)²` chunks around a centre chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkWindow {
    /// Global tile coordinate of cell `(0, 0)`.
    pub origin: (i32, i32),
    pub blocked: Grid<bool>,
}

impl WalkWindow {
    /// `None` outside the window.
    pub fn is_blocked(&self, gx: i32, gy: i32) -> Option<bool> {
        self.blocked.get(gx - self.origin.0, gy - self.origin.1).copied()
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.count(|b| *b)
    }
}

/// Chunks `lookup` cannot provide read as fully walkable.
pub fn stitch_walkability<'a, F>(
    center: ChunkCoord,
    radius: i32,
    chunk_tiles: usize,
    lookup: F,
) -> WalkWindow
where
    F: Fn(ChunkCoord) -> Option<&'a ChunkData>,
{
    let w = chunk_tiles;
    let span = (2 * radius.max(0) as usize + 1) * w;
    let min = center.offset(-radius, -radius);
    let mut blocked = Grid::new(span, span, false);
    for coord in center.square(radius) {
        let Some(chunk) = lookup(coord) else {
            continue;
        };
        let bx = (coord.cx - min.cx) as usize * w;
        let by = (coord.cy - min.cy) as usize * w;
        for (x, y, b) in chunk.walkability.iter() {
            if *b {
                blocked.set(bx + x, by + y, true);
            }
        }
    }
    WalkWindow {
        origin: (min.cx * w as i32, min.cy * w as i32),
        blocked,
    }
}
