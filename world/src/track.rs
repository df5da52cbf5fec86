//! Track geometry: plane coordinates of cells and the waypoint paths trains
//! follow through them.

use glam::{IVec2, Vec2};
use switchyard_core::{CellCoord, Direction, TrackType, BOARD_COLUMNS, BOARD_ROWS};

/// Side length of a cell in plane units.
pub const CELL_SIZE: i32 = 32;

/// Waypoints along a straight track crossing a whole cell.
pub const STRAIGHT_WAYPOINTS: usize = 32;

/// Waypoints along a quarter-turn curve.
///
/// Must stay a multiple of [`STRAIGHT_WAYPOINTS`]: trains then reach every
/// cell centre on a multiple of 32 ticks after departing, which is when
/// splitters fork.
pub const CURVE_WAYPOINTS: usize = 64;

/// Waypoints along a stub running from the cell centre to one edge.
pub const STUB_WAYPOINTS: usize = 16;

const HALF_CELL: i32 = CELL_SIZE / 2;
const ENDPOINT_TOLERANCE: i32 = 1;

/// Geometry of a segment within its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackShape {
    /// Edge-to-edge track of a drawable shape.
    Full(TrackType),
    /// Half track running from the cell centre out to the given edge.
    Stub(Direction),
}

impl TrackShape {
    /// Side the geometry starts from, `None` for the cell centre.
    #[must_use]
    pub const fn start_side(self) -> Option<Direction> {
        match self {
            Self::Full(track) => Some(track.sides().0),
            Self::Stub(_) => None,
        }
    }

    /// Side the geometry ends on.
    #[must_use]
    pub const fn end_side(self) -> Direction {
        match self {
            Self::Full(track) => track.sides().1,
            Self::Stub(side) => side,
        }
    }

    /// Number of waypoints a train steps through to cross the segment.
    #[must_use]
    pub const fn waypoint_count(self) -> usize {
        match self {
            Self::Full(track) if track.is_curve() => CURVE_WAYPOINTS,
            Self::Full(_) => STRAIGHT_WAYPOINTS,
            Self::Stub(_) => STUB_WAYPOINTS,
        }
    }
}

/// One piece of track placed in one cell.
///
/// Waypoints run from the start point to the end point, excluding the start
/// and finishing exactly on the end, so a train that entered at the start
/// stands on `waypoints[k - 1]` after `k` steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackSegment {
    cell: CellCoord,
    shape: TrackShape,
    bright: bool,
    start: IVec2,
    waypoints: Vec<IVec2>,
}

impl TrackSegment {
    /// Builds a segment of the given shape inside `cell`.
    #[must_use]
    pub fn new(cell: CellCoord, shape: TrackShape) -> Self {
        let start = match shape.start_side() {
            Some(side) => edge_midpoint(cell, side),
            None => cell_centre(cell),
        };
        let end = edge_midpoint(cell, shape.end_side());
        let count = shape.waypoint_count();
        let waypoints = match shape {
            TrackShape::Full(track) if track.is_curve() => {
                let (first, second) = track.sides();
                arc(corner(cell, first, second), start, end, count)
            }
            _ => line(start, end, count),
        };

        Self {
            cell,
            shape,
            bright: true,
            start,
            waypoints,
        }
    }

    /// Builds a drawable edge-to-edge segment.
    #[must_use]
    pub fn drawn(cell: CellCoord, track: TrackType) -> Self {
        Self::new(cell, TrackShape::Full(track))
    }

    /// Builds a half segment from the centre of `cell` toward `side`.
    #[must_use]
    pub fn stub(cell: CellCoord, side: Direction) -> Self {
        Self::new(cell, TrackShape::Stub(side))
    }

    /// Cell that owns the segment.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Geometry of the segment.
    #[must_use]
    pub const fn shape(&self) -> TrackShape {
        self.shape
    }

    /// Drawable track type, if the segment spans the whole cell.
    #[must_use]
    pub const fn track_type(&self) -> Option<TrackType> {
        match self.shape {
            TrackShape::Full(track) => Some(track),
            TrackShape::Stub(_) => None,
        }
    }

    /// Whether the segment is the active one of a stacked pair.
    #[must_use]
    pub const fn is_bright(&self) -> bool {
        self.bright
    }

    pub(crate) fn set_bright(&mut self, bright: bool) {
        self.bright = bright;
    }

    /// Point the geometry starts from.
    #[must_use]
    pub const fn start(&self) -> IVec2 {
        self.start
    }

    /// Point the geometry ends on.
    #[must_use]
    pub fn end(&self) -> IVec2 {
        self.waypoints.last().copied().unwrap_or(self.start)
    }

    /// Ordered waypoints from start to end.
    #[must_use]
    pub fn waypoints(&self) -> &[IVec2] {
        &self.waypoints
    }

    /// Number of steps needed to cross the segment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Reports whether the segment has no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Position of a train after `steps` steps along the segment.
    ///
    /// `reversed` trains entered at the end and travel toward the start.
    #[must_use]
    pub fn point_at(&self, steps: usize, reversed: bool) -> IVec2 {
        let len = self.waypoints.len();
        let steps = steps.min(len);
        if steps == 0 {
            return if reversed { self.end() } else { self.start };
        }

        if reversed {
            if steps == len {
                self.start
            } else {
                self.waypoints[len - 1 - steps]
            }
        } else {
            self.waypoints[steps - 1]
        }
    }

    /// Matches `point` against the segment's endpoints.
    ///
    /// Returns `Some(false)` when the point sits on the start, `Some(true)`
    /// when it sits on the end (a train entering there runs reversed).
    #[must_use]
    pub fn entry_at(&self, point: IVec2) -> Option<bool> {
        if near(self.start, point) {
            Some(false)
        } else if near(self.end(), point) {
            Some(true)
        } else {
            None
        }
    }

    /// Heading of a train after entering the segment.
    ///
    /// Forward trains leave through the end side; reversed trains leave
    /// through the start side, or keep running toward the centre of a stub.
    #[must_use]
    pub fn heading(&self, reversed: bool) -> Direction {
        if reversed {
            self.shape
                .start_side()
                .unwrap_or_else(|| self.shape.end_side().opposite())
        } else {
            self.shape.end_side()
        }
    }
}

/// Upper-left corner of a cell in plane coordinates.
#[must_use]
pub fn cell_origin(cell: CellCoord) -> IVec2 {
    IVec2::new(cell.column() as i32, cell.row() as i32) * CELL_SIZE
}

/// Centre of a cell in plane coordinates.
#[must_use]
pub fn cell_centre(cell: CellCoord) -> IVec2 {
    cell_origin(cell) + IVec2::splat(HALF_CELL)
}

/// Midpoint of one edge of a cell. Non-cardinal sides yield the centre.
#[must_use]
pub fn edge_midpoint(cell: CellCoord, side: Direction) -> IVec2 {
    let offset = match side {
        Direction::Right => IVec2::new(CELL_SIZE, HALF_CELL),
        Direction::Up => IVec2::new(HALF_CELL, 0),
        Direction::Left => IVec2::new(0, HALF_CELL),
        Direction::Down => IVec2::new(HALF_CELL, CELL_SIZE),
        _ => IVec2::splat(HALF_CELL),
    };
    cell_origin(cell) + offset
}

/// Cell of the board containing `point`, with cells owning their upper and
/// left edges.
#[must_use]
pub fn cell_at(point: IVec2) -> Option<CellCoord> {
    if point.x < 0 || point.y < 0 {
        return None;
    }
    let cell = CellCoord::new((point.x / CELL_SIZE) as u32, (point.y / CELL_SIZE) as u32);
    if cell.column() < BOARD_COLUMNS && cell.row() < BOARD_ROWS {
        Some(cell)
    } else {
        None
    }
}

/// Reports whether `point` lies within the cell rectangle.
#[must_use]
pub fn cell_contains(cell: CellCoord, point: IVec2) -> bool {
    let origin = cell_origin(cell);
    let local = point - origin;
    local.x >= 0 && local.y >= 0 && local.x < CELL_SIZE && local.y < CELL_SIZE
}

/// Reports whether two points are close enough to count as the same endpoint.
#[must_use]
pub fn near(first: IVec2, second: IVec2) -> bool {
    (first - second).abs().max_element() <= ENDPOINT_TOLERANCE
}

fn corner(cell: CellCoord, first: Direction, second: Direction) -> IVec2 {
    let sides = [first, second];
    let x = if sides.contains(&Direction::Right) {
        CELL_SIZE
    } else {
        0
    };
    let y = if sides.contains(&Direction::Up) {
        0
    } else {
        CELL_SIZE
    };
    cell_origin(cell) + IVec2::new(x, y)
}

fn line(start: IVec2, end: IVec2, count: usize) -> Vec<IVec2> {
    let delta = end - start;
    let steps = count as i32;
    (1..=steps).map(|step| start + delta * step / steps).collect()
}

fn arc(centre: IVec2, start: IVec2, end: IVec2, count: usize) -> Vec<IVec2> {
    let from = (start - centre).as_vec2();
    let to = (end - centre).as_vec2();
    let radius = from.length();
    let start_angle = from.y.atan2(from.x);
    let mut sweep = to.y.atan2(to.x) - start_angle;
    if sweep > std::f32::consts::PI {
        sweep -= std::f32::consts::TAU;
    } else if sweep < -std::f32::consts::PI {
        sweep += std::f32::consts::TAU;
    }

    let mut points: Vec<IVec2> = (1..=count)
        .map(|step| {
            let angle = start_angle + sweep * step as f32 / count as f32;
            let offset = Vec2::new(angle.cos(), angle.sin()) * radius;
            (centre.as_vec2() + offset).round().as_ivec2()
        })
        .collect();
    if let Some(last) = points.last_mut() {
        *last = end;
    }
    points
}
