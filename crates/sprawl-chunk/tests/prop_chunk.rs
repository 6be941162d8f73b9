use proptest::prelude::*;
use sprawl_chunk::generate_chunk;
use sprawl_tiles::TileKind;
use sprawl_geom::Polygon;
use sprawl_world::{ChunkCoord, ObjectKind, ObjectShape, World, WorldGenParams};

fn world(seed: i64, density: f64) -> World {
    World::new(
        seed,
        WorldGenParams {
            road_density: density,
            ..WorldGenParams::default()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn same_seed_same_chunk(seed in any::<i64>(), cx in -1000i32..1000, cy in -1000i32..1000) {
        let w = world(seed, 0.3);
        let a = generate_chunk(&w, ChunkCoord::new(cx, cy)).data;
        let b = generate_chunk(&w, ChunkCoord::new(cx, cy)).data;
        prop_assert_eq!(a, b);
    }

    #[test]
    fn objects_stay_inside_the_chunk(seed in any::<i64>(), cx in -1000i32..1000, cy in -1000i32..1000) {
        let w = world(seed, 0.4);
        let data = generate_chunk(&w, ChunkCoord::new(cx, cy)).data;
        let n = data.size() as i32;
        for obj in &data.objects {
            let b = obj.bounds();
            prop_assert!(b.is_some_and(|r| r.within(n, n)), "{:?} escapes", obj);
        }
    }

    #[test]
    fn water_polygons_lead_with_their_shore(seed in any::<i64>(), cx in -1000i32..1000, cy in -1000i32..1000) {
        let w = world(seed, 0.3);
        let data = generate_chunk(&w, ChunkCoord::new(cx, cy)).data;
        for obj in data.objects_of_kind(ObjectKind::Water) {
            let ObjectShape::Polygon(poly) = &obj.shape else {
                panic!("water must be a polygon");
            };
            prop_assert!(Polygon::ring_area2(&poly.rings[0]) < 0, "{:?}", poly.rings[0]);
            for hole in &poly.rings[1..] {
                prop_assert!(Polygon::ring_area2(hole) > 0);
            }
        }
    }

    #[test]
    fn structures_never_sit_on_roads(seed in any::<i64>(), cx in -1000i32..1000, cy in -1000i32..1000) {
        let w = world(seed, 0.6);
        let data = generate_chunk(&w, ChunkCoord::new(cx, cy)).data;
        for obj in data.objects_of_kind(ObjectKind::Structure) {
            let ObjectShape::Rect(rect) = obj.shape else {
                prop_assert!(false, "structure without a rect");
                continue;
            };
            let mut biome = None;
            for (x, y) in rect.tiles() {
                let id = data.terrain_layer.value(x as usize, y as usize);
                prop_assert!(id.is_some());
                let kind = w.tiles.kind(id.unwrap_or_default());
                let TileKind::Structure { biome: b, .. } = kind else {
                    prop_assert!(false, "footprint tile {:?} is not a structure", kind);
                    continue;
                };
                prop_assert!(biome.is_none_or(|prev| prev == b));
                biome = Some(b);
                prop_assert!(data.is_blocked(x as usize, y as usize));
            }
        }
    }

    #[test]
    fn walkability_matches_layers(seed in any::<i64>(), cx in -100i32..100, cy in -100i32..100) {
        let w = world(seed, 0.3);
        let data = generate_chunk(&w, ChunkCoord::new(cx, cy)).data;
        for (x, y, blocked) in data.walkability.iter() {
            let water = !data.biome_layer.value(x, y).is_land();
            let prop = data.terrain_layer.value(x, y).is_some_and(|id| w.tiles.blocks_walk(id));
            prop_assert_eq!(*blocked, water || prop);
        }
    }
}

#[test]
fn seeds_give_different_chunks() {
    let a = generate_chunk(&world(1, 0.3), ChunkCoord::new(0, 0)).data;
    let b = generate_chunk(&world(2, 0.3), ChunkCoord::new(0, 0)).data;
    assert_ne!(a.biome_layer, b.biome_layer);
}
