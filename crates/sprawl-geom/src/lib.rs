//! Minimal 2D tile geometry shared by the generator crates.
#![forbid(unsafe_code)]

mod grid;

pub use grid::Grid;

use serde::{Deserialize, Serialize};

/// Cardinal side of a tile or coarse cell. `Up` is +y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Up,
    Left,
    Right,
    Down,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Up, Side::Left, Side::Right, Side::Down];

    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Side::Up => (0, 1),
            Side::Left => (-1, 0),
            Side::Right => (1, 0),
            Side::Down => (0, -1),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Up => Side::Down,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Down => Side::Up,
        }
    }

    /// Counter-clockwise quarter turn.
    #[inline]
    pub const fn turn_left(self) -> Side {
        match self {
            Side::Up => Side::Left,
            Side::Left => Side::Down,
            Side::Down => Side::Right,
            Side::Right => Side::Up,
        }
    }

    /// Clockwise quarter turn.
    #[inline]
    pub const fn turn_right(self) -> Side {
        match self {
            Side::Up => Side::Right,
            Side::Right => Side::Down,
            Side::Down => Side::Left,
            Side::Left => Side::Up,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Side::Up => 0,
            Side::Left => 1,
            Side::Right => 2,
            Side::Down => 3,
        }
    }
}

/// Axis-aligned rectangle in whole tiles; `(x, y)` is the lower-left tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl TileRect {
    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub const fn top(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn area(&self) -> i32 {
        self.w.max(0) * self.h.max(0)
    }

    #[inline]
    pub fn contains_tile(&self, tx: i32, ty: i32) -> bool {
        tx >= self.x && tx < self.right() && ty >= self.y && ty < self.top()
    }

    #[inline]
    pub fn overlaps(&self, other: &TileRect) -> bool {
        self.x < other.right() && other.x < self.right() && self.y < other.top() && other.y < self.top()
    }

    /// True when the rect lies inside `[0, w] x [0, h]` tile space.
    #[inline]
    pub fn within(&self, w: i32, h: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.w > 0 && self.h > 0 && self.right() <= w && self.top() <= h
    }

    /// Tiles covered by the rect, row by row from the bottom.
    pub fn tiles(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (x0, x1) = (self.x, self.right());
        (self.y..self.top()).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}

/// Integer tile-corner point. Corner `(x, y)` is the lower-left corner of tile `(x, y)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Corner {
    pub x: i32,
    pub y: i32,
}

impl Corner {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn step(self, side: Side) -> Corner {
        let (dx, dy) = side.offset();
        Corner::new(self.x + dx, self.y + dy)
    }
}

/// One or more closed rings of tile corners. Rings are implicitly closed
/// (the last vertex connects back to the first).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polygon {
    pub rings: Vec<Vec<Corner>>,
}

impl Polygon {
    pub fn new(rings: Vec<Vec<Corner>>) -> Self {
        Self { rings }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(|r| r.is_empty())
    }

    pub fn vertex_count(&self) -> usize {
        self.rings.iter().map(Vec::len).sum()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Corner> + '_ {
        self.rings.iter().flatten().copied()
    }

    /// Smallest rect (in corner units) enclosing every vertex.
    pub fn bounds(&self) -> Option<TileRect> {
        let mut it = self.vertices();
        let first = it.next()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for c in it {
            x0 = x0.min(c.x);
            y0 = y0.min(c.y);
            x1 = x1.max(c.x);
            y1 = y1.max(c.y);
        }
        Some(TileRect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Twice the signed area of one ring; negative for clockwise rings (y up).
    pub fn ring_area2(ring: &[Corner]) -> i64 {
        let n = ring.len();
        let mut acc = 0i64;
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            acc += i64::from(a.x) * i64::from(b.y) - i64::from(b.x) * i64::from(a.y);
        }
        acc
    }

    /// Flat `[x0, y0, x1, y1, ...]` list scaled by `unit` and offset by `origin`,
    /// with a `NaN, NaN` pair between rings.
    pub fn to_flat(&self, unit: f32, origin: [f32; 2]) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count() * 2 + self.rings.len() * 2);
        for (i, ring) in self.rings.iter().enumerate() {
            if i > 0 {
                out.push(f32::NAN);
                out.push(f32::NAN);
            }
            for c in ring {
                out.push(c.x as f32 * unit + origin[0]);
                out.push(c.y as f32 * unit + origin[1]);
            }
        }
        out
    }
}

/// Rectangle in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl WorldRect {
    #[inline]
    pub fn from_tiles(rect: &TileRect, unit: f32, origin: [f32; 2]) -> Self {
        Self {
            x: rect.x as f32 * unit + origin[0],
            y: rect.y as f32 * unit + origin[1],
            w: rect.w as f32 * unit,
            h: rect.h as f32 * unit,
        }
    }

    #[inline]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small_rect() -> impl Strategy<Value = TileRect> {
        (-64i32..64, -64i32..64, 0i32..32, 0i32..32).prop_map(|(x, y, w, h)| TileRect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in small_rect(), b in small_rect()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn corner_step_roundtrips(c: Corner) {
            prop_assume!(c.x.checked_add(2).is_some() && c.x.checked_sub(2).is_some());
            prop_assume!(c.y.checked_add(2).is_some() && c.y.checked_sub(2).is_some());
            for side in Side::ALL {
                prop_assert_eq!(c.step(side).step(side.opposite()), c);
            }
        }
    }

    #[test]
    fn turns_compose() {
        for side in Side::ALL {
            assert_eq!(side.turn_left().turn_right(), side);
            assert_eq!(side.turn_left().turn_left(), side.opposite());
        }
    }
}
