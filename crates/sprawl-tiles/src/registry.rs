use hashbrown::HashMap;
use serde::Serialize;

use crate::types::{Biome, RoadTile, TileId, TileKind};

pub const DECORATION_VARIANTS: u8 = 3;
pub const STRUCTURE_STYLES: u8 = 3;
/// A structure is a 4x3 stamp.
pub const STRUCTURE_PARTS: u8 = 12;

const GROUND_BASE: TileId = 0;
const DECORATION_BASE: TileId = GROUND_BASE + Biome::ALL.len() as TileId;
const STRUCTURE_BASE: TileId = DECORATION_BASE + (Biome::LAND.len() as TileId) * DECORATION_VARIANTS as TileId;
const ROAD_BASE: TileId =
    STRUCTURE_BASE + (Biome::LAND.len() as TileId) * (STRUCTURE_STYLES as TileId) * (STRUCTURE_PARTS as TileId);
const TILE_COUNT: TileId = ROAD_BASE + RoadTile::ALL.len() as TileId;

#[derive(Clone, Debug, Serialize)]
pub struct TileType {
    pub id: TileId,
    pub name: String,
    pub kind: TileKind,
    pub color: [u8; 3],
}

/// Fixed tile table shared by generation, rendering and the walkability pass.
#[derive(Clone, Debug)]
pub struct TileRegistry {
    pub tiles: Vec<TileType>,
    pub by_name: HashMap<String, TileId>,
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl TileRegistry {
    pub fn standard() -> Self {
        let mut tiles = Vec::with_capacity(TILE_COUNT as usize);
        let mut push = |name: String, kind: TileKind, color: [u8; 3]| {
            let id = tiles.len() as TileId;
            tiles.push(TileType { id, name, kind, color });
        };
        for b in Biome::ALL {
            push(format!("{}_ground", b.name()), TileKind::Ground(b), ground_color(b));
        }
        for b in Biome::LAND {
            for variant in 0..DECORATION_VARIANTS {
                push(
                    format!("{}_{}", decoration_stem(b), variant),
                    TileKind::Decoration { biome: b, variant },
                    shade(ground_color(b), -60 - 10 * variant as i16),
                );
            }
        }
        for b in Biome::LAND {
            for style in 0..STRUCTURE_STYLES {
                for part in 0..STRUCTURE_PARTS {
                    push(
                        format!("{}_building_{}_{:02}", b.name(), style, part),
                        TileKind::Structure { biome: b, style, part },
                        structure_color(style),
                    );
                }
            }
        }
        for r in RoadTile::ALL {
            let color = match r {
                RoadTile::CrosswalkHeight | RoadTile::CrosswalkWidth => [220, 220, 210],
                RoadTile::Junction => [70, 70, 74],
                _ => [90, 90, 96],
            };
            push(r.name().to_string(), TileKind::Road(r), color);
        }
        let by_name = tiles.iter().map(|t| (t.name.clone(), t.id)).collect();
        Self { tiles, by_name }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn get(&self, id: TileId) -> Option<&TileType> {
        self.tiles.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<TileId> {
        self.by_name.get(name).copied()
    }

    /// Unknown ids resolve to the water ground tile.
    pub fn resolve(&self, id: TileId) -> &TileType {
        match self.get(id) {
            Some(t) => t,
            None => &self.tiles[self.ground(Biome::Water) as usize],
        }
    }

    #[inline]
    pub fn kind(&self, id: TileId) -> TileKind {
        self.resolve(id).kind
    }

    #[inline]
    pub fn name(&self, id: TileId) -> &str {
        &self.resolve(id).name
    }

    #[inline]
    pub fn color(&self, id: TileId) -> [u8; 3] {
        self.resolve(id).color
    }

    #[inline]
    pub fn ground(&self, biome: Biome) -> TileId {
        GROUND_BASE + biome.id() as TileId
    }

    /// `None` for water, which has no decorations.
    pub fn decoration(&self, biome: Biome, variant: u8) -> Option<TileId> {
        let li = biome.land_index()? as TileId;
        Some(DECORATION_BASE + li * DECORATION_VARIANTS as TileId + (variant % DECORATION_VARIANTS) as TileId)
    }

    pub fn structure(&self, biome: Biome, style: u8, part: u8) -> Option<TileId> {
        let li = biome.land_index()? as TileId;
        let style = (style % STRUCTURE_STYLES) as TileId;
        let part = (part % STRUCTURE_PARTS) as TileId;
        Some(STRUCTURE_BASE + (li * STRUCTURE_STYLES as TileId + style) * STRUCTURE_PARTS as TileId + part)
    }

    #[inline]
    pub fn road(&self, tile: RoadTile) -> TileId {
        ROAD_BASE + tile.index() as TileId
    }

    #[inline]
    pub fn is_road(&self, id: TileId) -> bool {
        (ROAD_BASE..TILE_COUNT).contains(&id)
    }

    #[inline]
    pub fn blocks_walk(&self, id: TileId) -> bool {
        self.kind(id).blocks_walk()
    }
}

fn decoration_stem(b: Biome) -> &'static str {
    match b {
        Biome::Desert => "desert_shrub",
        Biome::Plains => "plains_tree",
        Biome::WildWest => "wild_west_tumbleweed",
        Biome::Tundra => "tundra_icicle",
        Biome::Water => "water",
    }
}

fn ground_color(b: Biome) -> [u8; 3] {
    match b {
        Biome::Desert => [222, 196, 132],
        Biome::Plains => [112, 170, 84],
        Biome::WildWest => [184, 120, 72],
        Biome::Tundra => [214, 226, 232],
        Biome::Water => [52, 96, 178],
    }
}

fn structure_color(style: u8) -> [u8; 3] {
    match style {
        0 => [150, 60, 50],
        1 => [120, 90, 60],
        _ => [100, 100, 130],
    }
}

fn shade(c: [u8; 3], delta: i16) -> [u8; 3] {
    c.map(|v| (v as i16 + delta).clamp(0, 255) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_has_expected_size() {
        let reg = TileRegistry::standard();
        assert_eq!(reg.len(), 168);
        assert_eq!(reg.len(), TILE_COUNT as usize);
        for (i, t) in reg.tiles.iter().enumerate() {
            assert_eq!(t.id as usize, i);
        }
    }

    #[test]
    fn names_are_unique() {
        let reg = TileRegistry::standard();
        assert_eq!(reg.by_name.len(), reg.len());
    }
}
