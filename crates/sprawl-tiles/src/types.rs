use serde::{Deserialize, Serialize};

pub type TileId = u16;

/// Terrain class of a tile. `Water` is the lowest noise band.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Biome {
    Desert = 0,
    Plains = 1,
    WildWest = 2,
    Tundra = 3,
    Water = 4,
}

impl Biome {
    pub const ALL: [Biome; 5] = [
        Biome::Desert,
        Biome::Plains,
        Biome::WildWest,
        Biome::Tundra,
        Biome::Water,
    ];
    pub const LAND: [Biome; 4] = [Biome::Desert, Biome::Plains, Biome::WildWest, Biome::Tundra];

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Out-of-range ids read as water.
    #[inline]
    pub const fn from_id(id: u8) -> Biome {
        match id {
            0 => Biome::Desert,
            1 => Biome::Plains,
            2 => Biome::WildWest,
            3 => Biome::Tundra,
            _ => Biome::Water,
        }
    }

    #[inline]
    pub const fn is_land(self) -> bool {
        !matches!(self, Biome::Water)
    }

    /// Position in [`Biome::LAND`]; `None` for water.
    #[inline]
    pub const fn land_index(self) -> Option<usize> {
        match self {
            Biome::Water => None,
            b => Some(b as usize),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Biome::Desert => "desert",
            Biome::Plains => "plains",
            Biome::WildWest => "wild_west",
            Biome::Tundra => "tundra",
            Biome::Water => "water",
        }
    }
}

/// Painted road pieces. Lanes come in pairs: `RoadLeft`/`RoadRight` for a
/// vertical road, `RoadBottom`/`RoadTop` for a horizontal one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadTile {
    RoadLeft,
    RoadRight,
    RoadTop,
    RoadBottom,
    CrosswalkHeight,
    CrosswalkWidth,
    Junction,
}

impl RoadTile {
    pub const ALL: [RoadTile; 7] = [
        RoadTile::RoadLeft,
        RoadTile::RoadRight,
        RoadTile::RoadTop,
        RoadTile::RoadBottom,
        RoadTile::CrosswalkHeight,
        RoadTile::CrosswalkWidth,
        RoadTile::Junction,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            RoadTile::RoadLeft => 0,
            RoadTile::RoadRight => 1,
            RoadTile::RoadTop => 2,
            RoadTile::RoadBottom => 3,
            RoadTile::CrosswalkHeight => 4,
            RoadTile::CrosswalkWidth => 5,
            RoadTile::Junction => 6,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RoadTile::RoadLeft => "road_left",
            RoadTile::RoadRight => "road_right",
            RoadTile::RoadTop => "road_top",
            RoadTile::RoadBottom => "road_bottom",
            RoadTile::CrosswalkHeight => "crosswalk_height",
            RoadTile::CrosswalkWidth => "crosswalk_width",
            RoadTile::Junction => "junction",
        }
    }

    /// Lane tiles of a north-south road.
    #[inline]
    pub const fn is_vertical_lane(self) -> bool {
        matches!(self, RoadTile::RoadLeft | RoadTile::RoadRight)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Ground(Biome),
    Decoration { biome: Biome, variant: u8 },
    Structure { biome: Biome, style: u8, part: u8 },
    Road(RoadTile),
}

impl TileKind {
    #[inline]
    pub fn is_road(&self) -> bool {
        matches!(self, TileKind::Road(_))
    }

    /// Tiles an agent cannot walk onto.
    #[inline]
    pub fn blocks_walk(&self) -> bool {
        matches!(
            self,
            TileKind::Ground(Biome::Water) | TileKind::Decoration { .. } | TileKind::Structure { .. }
        )
    }

    pub fn biome(&self) -> Option<Biome> {
        match *self {
            TileKind::Ground(b) => Some(b),
            TileKind::Decoration { biome, .. } | TileKind::Structure { biome, .. } => Some(biome),
            TileKind::Road(_) => None,
        }
    }
}
