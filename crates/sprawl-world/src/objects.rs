use serde::Serialize;
use sprawl_geom::{Polygon, TileRect, WorldRect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ObjectKind {
    #[serde(rename = "ROAD_HORIZONTAL")]
    RoadHorizontal,
    #[serde(rename = "ROAD_VERTICAL")]
    RoadVertical,
    #[serde(rename = "STRUCTURE")]
    Structure,
    #[serde(rename = "DECORATION")]
    Decoration,
    #[serde(rename = "WATER")]
    Water,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 5] = [
        ObjectKind::RoadHorizontal,
        ObjectKind::RoadVertical,
        ObjectKind::Structure,
        ObjectKind::Decoration,
        ObjectKind::Water,
    ];

    /// Stable tag consumers match on.
    pub const fn tag(self) -> &'static str {
        match self {
            ObjectKind::RoadHorizontal => "ROAD_HORIZONTAL",
            ObjectKind::RoadVertical => "ROAD_VERTICAL",
            ObjectKind::Structure => "STRUCTURE",
            ObjectKind::Decoration => "DECORATION",
            ObjectKind::Water => "WATER",
        }
    }

    pub fn from_tag(tag: &str) -> Option<ObjectKind> {
        ObjectKind::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Geometry in chunk-local tile units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ObjectShape {
    Rect(TileRect),
    Polygon(Polygon),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlacementObject {
    pub kind: ObjectKind,
    pub shape: ObjectShape,
}

impl PlacementObject {
    #[inline]
    pub fn rect(kind: ObjectKind, rect: TileRect) -> Self {
        Self {
            kind,
            shape: ObjectShape::Rect(rect),
        }
    }

    #[inline]
    pub fn polygon(kind: ObjectKind, polygon: Polygon) -> Self {
        Self {
            kind,
            shape: ObjectShape::Polygon(polygon),
        }
    }

    /// Tile-space bounding rect; polygon bounds are in corner units.
    pub fn bounds(&self) -> Option<TileRect> {
        match &self.shape {
            ObjectShape::Rect(r) => Some(*r),
            ObjectShape::Polygon(p) => p.bounds(),
        }
    }
}

/// World-space geometry: rects as-is, polygons as flat NaN-separated vertex lists.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum WorldShape {
    Rect(WorldRect),
    Polygon(Vec<f32>),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldObject {
    pub kind: ObjectKind,
    pub shape: WorldShape,
}

impl WorldObject {
    pub fn from_placement(obj: &PlacementObject, unit: f32, origin: [f32; 2]) -> Self {
        let shape = match &obj.shape {
            ObjectShape::Rect(r) => WorldShape::Rect(WorldRect::from_tiles(r, unit, origin)),
            ObjectShape::Polygon(p) => WorldShape::Polygon(p.to_flat(unit, origin)),
        };
        Self { kind: obj.kind, shape }
    }
}
