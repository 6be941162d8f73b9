use rand::Rng;
use serde::Serialize;

use crate::chunk_coord::ChunkCoord;
use crate::seed::{SALT_EDGE, stream_rng};

/// Road crossing flags for the four borders of one chunk. Index `i` is the
/// coarse cell position along the border, left to right / bottom to top.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChunkBorders {
    pub top: Vec<bool>,
    pub left: Vec<bool>,
    pub right: Vec<bool>,
    pub bottom: Vec<bool>,
}

impl ChunkBorders {
    /// Borders with no crossings at all.
    pub fn closed(cells: usize) -> Self {
        Self {
            top: vec![false; cells],
            left: vec![false; cells],
            right: vec![false; cells],
            bottom: vec![false; cells],
        }
    }

    pub fn crossing_count(&self) -> usize {
        [&self.top, &self.left, &self.right, &self.bottom]
            .iter()
            .map(|v| v.iter().filter(|b| **b).count())
            .sum()
    }
}

/// Border flags keyed by a global tile coordinate. Two chunks sharing a
/// border ask for the same key and therefore see the same flags.
#[derive(Clone, Debug)]
pub struct EdgeSampler {
    seed: i64,
    density: f64,
    cells: usize,
    chunk_tiles: i32,
}

impl EdgeSampler {
    pub fn new(seed: i64, density: f64, cells: usize, chunk_tiles: usize) -> Self {
        Self {
            seed,
            density: density.clamp(0.0, 1.0),
            cells,
            chunk_tiles: chunk_tiles as i32,
        }
    }

    pub fn sample_edge(&self, gx: i32, gy: i32) -> Vec<bool> {
        let mut rng = stream_rng(self.seed, gx, gy, SALT_EDGE);
        (0..self.cells).map(|_| rng.gen_bool(self.density)).collect()
    }

    /// The top and left borders come from the same key (the chunk origin),
    /// so the two always carry identical flags. Right and bottom use the
    /// keys of the east and south neighbours, which matches what those
    /// neighbours compute for their left and top borders.
    pub fn chunk_borders(&self, coord: ChunkCoord) -> ChunkBorders {
        let w = self.chunk_tiles;
        let (ox, oy) = (coord.cx * w, coord.cy * w);
        ChunkBorders {
            top: self.sample_edge(ox, oy),
            left: self.sample_edge(ox, oy),
            right: self.sample_edge(ox + w, oy),
            bottom: self.sample_edge(ox, oy - w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_density_never_crosses() {
        let s = EdgeSampler::new(9, 0.0, 8, 80);
        assert_eq!(s.chunk_borders(ChunkCoord::new(4, -1)), ChunkBorders::closed(8));
    }

    #[test]
    fn full_density_always_crosses() {
        let s = EdgeSampler::new(9, 1.0, 8, 80);
        assert_eq!(s.chunk_borders(ChunkCoord::new(0, 0)).crossing_count(), 32);
    }

    #[test]
    fn seeds_differing_above_bit_31_give_different_flags() {
        let lo = EdgeSampler::new(7, 0.5, 64, 80);
        let hi = EdgeSampler::new(7 + (1i64 << 32), 0.5, 64, 80);
        assert_ne!(lo.sample_edge(0, 0), hi.sample_edge(0, 0));
        assert_ne!(lo.chunk_borders(ChunkCoord::new(3, -2)), hi.chunk_borders(ChunkCoord::new(3, -2)));
    }
}
