use proptest::prelude::*;
use sprawl_geom::{Corner, Grid, Polygon, TileRect, WorldRect};

fn dims() -> impl Strategy<Value = (usize, usize)> {
    (1usize..24, 1usize..24)
}

fn arb_ring() -> impl Strategy<Value = Vec<Corner>> {
    prop::collection::vec((-50i32..50, -50i32..50), 1..12)
        .prop_map(|v| v.into_iter().map(|(x, y)| Corner::new(x, y)).collect())
}

proptest! {
    #[test]
    fn from_fn_matches_at((w, h) in dims()) {
        let g = Grid::from_fn(w, h, |x, y| (x, y));
        for y in 0..h {
            for x in 0..w {
                prop_assert_eq!(*g.at(x, y), (x, y));
                prop_assert_eq!(g.get(x as i32, y as i32), Some(&(x, y)));
            }
        }
        prop_assert!(g.get(-1, 0).is_none());
        prop_assert!(g.get(0, h as i32).is_none());
        prop_assert!(g.get(w as i32, 0).is_none());
    }

    #[test]
    fn iter_visits_every_cell_once((w, h) in dims()) {
        let g = Grid::from_fn(w, h, |x, y| y * w + x);
        let mut seen = 0usize;
        for (x, y, v) in g.iter() {
            prop_assert_eq!(*v, y * w + x);
            seen += 1;
        }
        prop_assert_eq!(seen, w * h);
    }

    #[test]
    fn rect_tiles_cover_area(x in -10i32..10, y in -10i32..10, w in 0i32..8, h in 0i32..8) {
        let r = TileRect::new(x, y, w, h);
        let tiles: Vec<_> = r.tiles().collect();
        prop_assert_eq!(tiles.len() as i32, r.area());
        for (tx, ty) in tiles {
            prop_assert!(r.contains_tile(tx, ty));
        }
    }

    #[test]
    fn flat_list_separates_rings(rings in prop::collection::vec(arb_ring(), 1..4)) {
        let poly = Polygon::new(rings.clone());
        let flat = poly.to_flat(2.0, [100.0, -40.0]);
        let nan_pairs = flat.chunks(2).filter(|p| p[0].is_nan() && p[1].is_nan()).count();
        prop_assert_eq!(nan_pairs, rings.len() - 1);
        prop_assert_eq!(flat.len(), poly.vertex_count() * 2 + nan_pairs * 2);
        let first = rings[0][0];
        prop_assert_eq!(flat[0], first.x as f32 * 2.0 + 100.0);
        prop_assert_eq!(flat[1], first.y as f32 * 2.0 - 40.0);
    }

    #[test]
    fn bounds_enclose_vertices(ring in arb_ring()) {
        let poly = Polygon::new(vec![ring]);
        let b = poly.bounds().unwrap();
        for c in poly.vertices() {
            prop_assert!(c.x >= b.x && c.x <= b.right());
            prop_assert!(c.y >= b.y && c.y <= b.top());
        }
    }
}

#[test]
fn unit_square_is_counter_clockwise() {
    let ring = [Corner::new(0, 0), Corner::new(1, 0), Corner::new(1, 1), Corner::new(0, 1)];
    assert_eq!(Polygon::ring_area2(&ring), 2);
    let rev: Vec<_> = ring.iter().rev().copied().collect();
    assert_eq!(Polygon::ring_area2(&rev), -2);
}

#[test]
fn world_rect_scales_and_offsets() {
    let r = WorldRect::from_tiles(&TileRect::new(3, 4, 2, 1), 2.0, [160.0, 0.0]);
    assert_eq!(r, WorldRect { x: 166.0, y: 8.0, w: 4.0, h: 2.0 });
    assert!(r.contains(167.0, 9.0));
    assert!(!r.contains(170.0, 9.0));
}

#[test]
fn rect_within_bounds() {
    assert!(TileRect::new(0, 0, 80, 80).within(80, 80));
    assert!(!TileRect::new(78, 0, 3, 1).within(80, 80));
    assert!(!TileRect::new(0, 0, 0, 1).within(80, 80));
}
