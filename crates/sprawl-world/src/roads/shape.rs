use serde::Serialize;
use sprawl_geom::Side;

/// Road topology of one coarse cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RoadShape {
    Cross,
    Horizontal,
    Vertical,
    RightDown,
    LeftDown,
    RightUp,
    LeftUp,
    LeftUpDown,
    RightUpDown,
    LeftRightDown,
    LeftRightUp,
    /// Cell centred on water. Never drawn.
    Blocked,
}

struct ShapeRow {
    shape: RoadShape,
    // up, left, right, down
    sides: [bool; 4],
    weight: u32,
}

const fn row(shape: RoadShape, up: bool, left: bool, right: bool, down: bool, weight: u32) -> ShapeRow {
    ShapeRow {
        shape,
        sides: [up, left, right, down],
        weight,
    }
}

const TABLE: [ShapeRow; 12] = [
    row(RoadShape::Cross, true, true, true, true, 1),
    row(RoadShape::Horizontal, false, true, true, false, 10),
    row(RoadShape::Vertical, true, false, false, true, 10),
    row(RoadShape::RightDown, false, false, true, true, 1),
    row(RoadShape::LeftDown, false, true, false, true, 1),
    row(RoadShape::RightUp, true, false, true, false, 1),
    row(RoadShape::LeftUp, true, true, false, false, 1),
    row(RoadShape::LeftUpDown, true, true, false, true, 1),
    row(RoadShape::RightUpDown, true, false, true, true, 1),
    row(RoadShape::LeftRightDown, false, true, true, true, 1),
    row(RoadShape::LeftRightUp, true, true, true, false, 1),
    row(RoadShape::Blocked, false, false, false, false, 0),
];

impl RoadShape {
    /// Shapes the collapse may pick, in draw order.
    pub const SELECTABLE: [RoadShape; 11] = [
        RoadShape::Cross,
        RoadShape::Horizontal,
        RoadShape::Vertical,
        RoadShape::RightDown,
        RoadShape::LeftDown,
        RoadShape::RightUp,
        RoadShape::LeftUp,
        RoadShape::LeftUpDown,
        RoadShape::RightUpDown,
        RoadShape::LeftRightDown,
        RoadShape::LeftRightUp,
    ];

    #[inline]
    fn row(self) -> &'static ShapeRow {
        &TABLE[self as usize]
    }

    /// Connection flags indexed by [`Side::index`].
    #[inline]
    pub fn sides(self) -> [bool; 4] {
        self.row().sides
    }

    #[inline]
    pub fn connects(self, side: Side) -> bool {
        self.row().sides[side.index()]
    }

    #[inline]
    pub fn weight(self) -> u32 {
        self.row().weight
    }

    #[inline]
    pub fn is_straight(self) -> bool {
        matches!(self, RoadShape::Horizontal | RoadShape::Vertical)
    }

    /// Straight shape running through `side`.
    #[inline]
    pub fn straight_through(side: Side) -> RoadShape {
        match side {
            Side::Up | Side::Down => RoadShape::Vertical,
            Side::Left | Side::Right => RoadShape::Horizontal,
        }
    }

    /// Shape with exactly these connections. Dead ends have no shape.
    pub fn from_sides(sides: [bool; 4]) -> Option<RoadShape> {
        TABLE.iter().find(|r| r.sides == sides).map(|r| r.shape)
    }
}
