//! Coarse road network: lowest-entropy-first collapse over a `T x T` grid of
//! road cells, painted into the terrain grid as it goes.

mod collapse;
mod paint;
mod shape;

pub use collapse::{RoadCollapser, propagation_constraints};
pub use shape::RoadShape;

use serde::Serialize;

/// Side constraints of one cell, indexed by `Side::index`.
/// `None` leaves the side open, `Some(b)` forces it.
pub type Constraints = [Option<bool>; 4];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CollapseCell {
    pub constraints: Constraints,
    pub collapsed: bool,
    pub shape: Option<RoadShape>,
}

impl CollapseCell {
    #[inline]
    pub fn admits(&self, shape: RoadShape) -> bool {
        self.constraints
            .iter()
            .zip(shape.sides())
            .all(|(c, s)| c.is_none_or(|want| want == s))
    }

    #[inline]
    pub fn option_count(&self) -> usize {
        RoadShape::SELECTABLE.iter().filter(|s| self.admits(**s)).count()
    }

    /// `Some` overwrites, `None` keeps. Collapsed cells are frozen.
    pub fn restrict(&mut self, update: Constraints) {
        if self.collapsed {
            return;
        }
        for (c, u) in self.constraints.iter_mut().zip(update) {
            if u.is_some() {
                *c = u;
            }
        }
    }

    /// Connected sides of a collapsed cell; all false otherwise.
    #[inline]
    pub fn sides(&self) -> [bool; 4] {
        self.shape.map(RoadShape::sides).unwrap_or([false; 4])
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RoadStats {
    pub seeded: u32,
    pub collapsed: u32,
    pub blocked: u32,
    /// Dequeued with no admissible shape.
    pub contradictions: u32,
    pub unreached: u32,
    pub pushes: u32,
    pub dequeues: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoadLayout {
    pub cells: usize,
    pub road_size: usize,
    /// Arena indexed `y * cells + x`.
    pub grid: Vec<CollapseCell>,
    /// Cells in the order they collapsed, seeds first.
    pub collapse_order: Vec<(usize, usize)>,
    pub stats: RoadStats,
}

impl RoadLayout {
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> &CollapseCell {
        &self.grid[y * self.cells + x]
    }

    #[inline]
    pub fn shape(&self, x: usize, y: usize) -> Option<RoadShape> {
        self.cell(x, y).shape
    }
}
