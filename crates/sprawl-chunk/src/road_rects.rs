use sprawl_geom::{Grid, TileRect};
use sprawl_tiles::{RoadTile, TileKind, TileRegistry};
use sprawl_world::{ObjectKind, PlacementObject, TerrainGrid};

/// Collapses painted road tiles into maximal two-tile-wide runs. A run only
/// counts when it contains at least one proper lane pair, so a perpendicular
/// lane crossing two columns does not produce a stray stub.
pub fn merge_road_rects(terrain: &TerrainGrid, tiles: &TileRegistry) -> Vec<PlacementObject> {
    let (w, h) = (terrain.width(), terrain.height());
    let roads: Grid<Option<RoadTile>> = Grid::from_fn(w, h, |x, y| {
        terrain.value(x, y).and_then(|id| match tiles.kind(id) {
            TileKind::Road(r) => Some(r),
            _ => None,
        })
    });
    let mut out = Vec::new();

    for x in 0..w.saturating_sub(1) {
        let pair = |y: usize| (roads.value(x, y), roads.value(x + 1, y));
        for (start, len) in runs(h, |y| matches!(pair(y), (Some(_), Some(_))), |y| {
            pair(y) == (Some(RoadTile::RoadLeft), Some(RoadTile::RoadRight))
        }) {
            out.push(PlacementObject::rect(
                ObjectKind::RoadVertical,
                TileRect::new(x as i32, start as i32, 2, len as i32),
            ));
        }
    }

    for y in 0..h.saturating_sub(1) {
        let pair = |x: usize| (roads.value(x, y), roads.value(x, y + 1));
        for (start, len) in runs(w, |x| matches!(pair(x), (Some(_), Some(_))), |x| {
            pair(x) == (Some(RoadTile::RoadBottom), Some(RoadTile::RoadTop))
        }) {
            out.push(PlacementObject::rect(
                ObjectKind::RoadHorizontal,
                TileRect::new(start as i32, y as i32, len as i32, 2),
            ));
        }
    }
    out
}

/// Maximal runs of `member` along `0..n` that contain at least one `anchor`.
fn runs(n: usize, member: impl Fn(usize) -> bool, anchor: impl Fn(usize) -> bool) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < n {
        if !member(i) {
            i += 1;
            continue;
        }
        let start = i;
        let mut anchored = false;
        while i < n && member(i) {
            anchored |= anchor(i);
            i += 1;
        }
        if anchored {
            out.push((start, i - start));
        }
    }
    out
}
