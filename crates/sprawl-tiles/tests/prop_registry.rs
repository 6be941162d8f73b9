use proptest::prelude::*;
use sprawl_tiles::{Biome, RoadTile, TileKind, TileRegistry};

proptest! {
    #[test]
    fn unknown_biome_ids_read_as_water(id in 5u8..=255) {
        prop_assert_eq!(Biome::from_id(id), Biome::Water);
    }

    #[test]
    fn out_of_range_tiles_resolve_to_water(id in 168u16..=u16::MAX) {
        let reg = TileRegistry::standard();
        prop_assert_eq!(reg.kind(id), TileKind::Ground(Biome::Water));
        prop_assert!(reg.blocks_walk(id));
        prop_assert_eq!(reg.name(id), "water_ground");
    }

    #[test]
    fn structure_ids_decode(b in 0u8..4, style in 0u8..3, part in 0u8..12) {
        let reg = TileRegistry::standard();
        let biome = Biome::from_id(b);
        let id = reg.structure(biome, style, part).unwrap();
        prop_assert_eq!(reg.kind(id), TileKind::Structure { biome, style, part });
        prop_assert!(!reg.is_road(id));
    }

    #[test]
    fn decoration_ids_decode(b in 0u8..4, variant in 0u8..3) {
        let reg = TileRegistry::standard();
        let biome = Biome::from_id(b);
        let id = reg.decoration(biome, variant).unwrap();
        prop_assert_eq!(reg.kind(id), TileKind::Decoration { biome, variant });
        prop_assert!(reg.blocks_walk(id));
    }
}

#[test]
fn biome_ids_roundtrip() {
    for b in Biome::ALL {
        assert_eq!(Biome::from_id(b.id()), b);
    }
    assert!(!Biome::Water.is_land());
    assert_eq!(Biome::Water.land_index(), None);
}

#[test]
fn water_has_no_decorations_or_structures() {
    let reg = TileRegistry::standard();
    assert_eq!(reg.decoration(Biome::Water, 0), None);
    assert_eq!(reg.structure(Biome::Water, 0, 0), None);
}

#[test]
fn road_tiles_are_walkable() {
    let reg = TileRegistry::standard();
    for r in RoadTile::ALL {
        let id = reg.road(r);
        assert!(reg.is_road(id));
        assert!(!reg.blocks_walk(id));
        assert_eq!(reg.id_by_name(r.name()), Some(id));
    }
    for b in Biome::LAND {
        assert!(!reg.blocks_walk(reg.ground(b)));
    }
    assert!(reg.blocks_walk(reg.ground(Biome::Water)));
}
