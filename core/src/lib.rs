#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Switchyard engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative field, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the field executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation layers to react to. Systems consume event streams and respond
//! exclusively with new command batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of cell columns on the playing board.
pub const BOARD_COLUMNS: u32 = 8;

/// Number of cell rows on the playing board.
pub const BOARD_ROWS: u32 = 8;

/// Describes whether the player is editing tracks or watching trains run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayMode {
    /// Trains are held back and the track network may be edited.
    #[default]
    Edit,
    /// The level is released: stations emit trains and the network is frozen.
    Play,
}

impl PlayMode {
    /// Returns the mode reached by toggling the release switch.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Edit => Self::Play,
            Self::Play => Self::Edit,
        }
    }
}

/// Commands that express all permissible field mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the static layout of the board and returns to edit mode.
    LoadLevel {
        /// Layout to install.
        level: Level,
    },
    /// Requests that the field transition to the provided play mode.
    SetPlayMode {
        /// Mode the field should activate.
        mode: PlayMode,
    },
    /// Requests insertion of a track segment into an editable cell.
    PlaceTrack {
        /// Cell receiving the segment.
        cell: CellCoord,
        /// Shape of the segment.
        track: TrackType,
    },
    /// Requests that the two stacked segments of a cell swap priority.
    FlipTracks {
        /// Cell whose segments should flip.
        cell: CellCoord,
    },
    /// Requests removal of every segment drawn into a cell.
    ClearTracks {
        /// Cell to clear.
        cell: CellCoord,
    },
    /// Advances the simulation by one fixed step.
    Tick,
}

/// Events broadcast by the field after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that a simulation step completed.
    TimeAdvanced {
        /// Value of the tick counter when the step ran.
        tick: u64,
    },
    /// Announces that the field entered a new play mode.
    PlayModeChanged {
        /// Mode that became active.
        mode: PlayMode,
    },
    /// Confirms that a new layout was installed.
    LevelLoaded,
    /// Confirms that a segment was drawn into a cell.
    TrackPlaced {
        /// Cell that received the segment.
        cell: CellCoord,
        /// Shape of the placed segment.
        track: TrackType,
    },
    /// Reports that a placement request was rejected.
    TrackPlacementRejected {
        /// Cell named in the request.
        cell: CellCoord,
        /// Shape named in the request.
        track: TrackType,
        /// Specific reason the placement failed.
        reason: EditError,
    },
    /// Confirms that the stacked segments of a cell swapped priority.
    TracksFlipped {
        /// Cell whose segments flipped.
        cell: CellCoord,
    },
    /// Confirms that a cell lost its drawn segments.
    TracksCleared {
        /// Cell that was cleared.
        cell: CellCoord,
    },
    /// Reports that a flip or clear request was rejected.
    EditRejected {
        /// Cell named in the request.
        cell: CellCoord,
        /// Specific reason the edit failed.
        reason: EditError,
    },
    /// Confirms that a departure station emitted a train.
    TrainDeparted {
        /// Identifier assigned to the new train.
        train: TrainId,
        /// Cell of the emitting station.
        cell: CellCoord,
        /// Color of the new train.
        color: TrainColor,
    },
    /// Confirms that an arrival station accepted a train.
    TrainArrived {
        /// Identifier of the consumed train.
        train: TrainId,
        /// Cell of the accepting station.
        cell: CellCoord,
        /// Color of the consumed train.
        color: TrainColor,
    },
    /// Reports that two trains travelling the same way fused into one.
    TrainsMerged {
        /// Train that survived the merge.
        survivor: TrainId,
        /// Train that was absorbed and removed.
        absorbed: TrainId,
        /// Blended color carried by the survivor.
        color: TrainColor,
    },
    /// Reports that two crossing trains repainted each other.
    TrainsPainted {
        /// First train of the encounter.
        first: TrainId,
        /// Second train of the encounter.
        second: TrainId,
        /// Blended color both trains now carry.
        color: TrainColor,
    },
    /// Reports that a painter cell recolored a train.
    TrainRepainted {
        /// Train that changed color.
        train: TrainId,
        /// Color imposed by the painter.
        color: TrainColor,
    },
    /// Reports that a splitter forked a train in two.
    TrainSplit {
        /// Train that continued on the right-hand branch.
        original: TrainId,
        /// Train created on the left-hand branch.
        spawned: TrainId,
    },
    /// Reports that a train crashed.
    TrainCrashed {
        /// Identifier of the crashed train.
        train: TrainId,
        /// Reason for the crash.
        cause: CrashCause,
    },
    /// Announces that every arrival station was satisfied without crashes.
    LevelCompleted,
}

/// Reasons a track edit may be rejected by the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditError {
    /// The level is released, so the network cannot be edited.
    InvalidMode,
    /// The requested cell lies outside the board.
    OutOfBounds,
    /// The requested cell is fixed scenery rather than a drawing cell.
    NotEditable,
}

/// Reasons a train leaves the network in a crash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrashCause {
    /// The train had no track to follow.
    NoSelectedTrack,
    /// The train ran off the edge of the board.
    OffBoard,
    /// The cell ahead holds no track a train may enter.
    NoTrackAhead,
    /// No segment in the cell ahead starts where the train stands.
    NoMatchingEndpoint,
    /// The train ran into a departure station from the wrong side.
    DepartureCollision,
    /// An arrival station refused the train.
    WrongArrival,
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Row zero is the top row of the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the neighbouring cell one step in a cardinal direction.
    ///
    /// Yields `None` for diagonal or empty directions and when the step would
    /// leave the non-negative quadrant. Upper board bounds are not checked.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (dx, dy) = direction.cardinal_offset()?;
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        Some(Self::new(column, row))
    }

    /// Reports whether the coordinate lies on the fixed playing board.
    #[must_use]
    pub const fn on_board(self) -> bool {
        self.column < BOARD_COLUMNS && self.row < BOARD_ROWS
    }
}

/// Headings of trains and deltas between consecutive cursor cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// No movement, or a jump between non-adjacent cells.
    #[default]
    None,
    /// Toward increasing columns.
    Right,
    /// Toward decreasing rows.
    Up,
    /// Toward decreasing columns.
    Left,
    /// Toward increasing rows.
    Down,
    /// Diagonal toward the upper right.
    RightUp,
    /// Diagonal toward the upper left.
    UpLeft,
    /// Diagonal toward the lower left.
    LeftDown,
    /// Diagonal toward the lower right.
    RightDown,
}

impl Direction {
    /// The four cardinal directions in counter-clockwise order from `Right`.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Right,
        Direction::Up,
        Direction::Left,
        Direction::Down,
    ];

    /// Derives the cardinal direction leading from `from` to `to`.
    ///
    /// Cells that are not exactly one step apart on a single axis yield
    /// [`Direction::None`].
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Self {
        let column_diff = from.column().abs_diff(to.column());
        let row_diff = from.row().abs_diff(to.row());

        if column_diff + row_diff != 1 {
            return Self::None;
        }

        if column_diff == 1 {
            if to.column() > from.column() {
                Self::Right
            } else {
                Self::Left
            }
        } else if to.row() > from.row() {
            Self::Down
        } else {
            Self::Up
        }
    }

    /// Converts a level angle in degrees into a cardinal heading.
    #[must_use]
    pub const fn from_angle(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Right),
            90 => Some(Self::Up),
            180 => Some(Self::Left),
            270 => Some(Self::Down),
            _ => None,
        }
    }

    /// Angle in degrees of a cardinal heading, counter-clockwise from `Right`.
    #[must_use]
    pub const fn angle(self) -> Option<u32> {
        match self {
            Self::Right => Some(0),
            Self::Up => Some(90),
            Self::Left => Some(180),
            Self::Down => Some(270),
            _ => None,
        }
    }

    /// Reports whether the direction is one of the four cardinals.
    #[must_use]
    pub const fn is_cardinal(self) -> bool {
        matches!(self, Self::Right | Self::Up | Self::Left | Self::Down)
    }

    /// Column and row delta of a cardinal step.
    #[must_use]
    pub const fn cardinal_offset(self) -> Option<(i32, i32)> {
        match self {
            Self::Right => Some((1, 0)),
            Self::Up => Some((0, -1)),
            Self::Left => Some((-1, 0)),
            Self::Down => Some((0, 1)),
            _ => None,
        }
    }

    /// Returns the reverse heading.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::RightUp => Self::LeftDown,
            Self::UpLeft => Self::RightDown,
            Self::LeftDown => Self::RightUp,
            Self::RightDown => Self::UpLeft,
        }
    }

    /// Heading after a quarter turn to the left. Non-cardinals are unchanged.
    #[must_use]
    pub const fn turned_left(self) -> Self {
        match self {
            Self::Right => Self::Up,
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            other => other,
        }
    }

    /// Heading after a quarter turn to the right. Non-cardinals are unchanged.
    #[must_use]
    pub const fn turned_right(self) -> Self {
        match self {
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
            Self::Up => Self::Right,
            other => other,
        }
    }
}

/// Shapes of track that can be drawn into a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackType {
    /// Straight track joining the top and bottom edges.
    Vert,
    /// Straight track joining the left and right edges.
    Hori,
    /// Curve joining the top and right edges.
    TopRight,
    /// Curve joining the top and left edges.
    TopLeft,
    /// Curve joining the bottom and left edges.
    BottomLeft,
    /// Curve joining the bottom and right edges.
    BottomRight,
}

impl TrackType {
    /// Every track shape.
    pub const ALL: [TrackType; 6] = [
        TrackType::Vert,
        TrackType::Hori,
        TrackType::TopRight,
        TrackType::TopLeft,
        TrackType::BottomLeft,
        TrackType::BottomRight,
    ];

    /// Cell sides joined by the track, in the order its geometry runs.
    #[must_use]
    pub const fn sides(self) -> (Direction, Direction) {
        match self {
            Self::Vert => (Direction::Up, Direction::Down),
            Self::Hori => (Direction::Left, Direction::Right),
            Self::TopRight => (Direction::Up, Direction::Right),
            Self::TopLeft => (Direction::Up, Direction::Left),
            Self::BottomLeft => (Direction::Down, Direction::Left),
            Self::BottomRight => (Direction::Down, Direction::Right),
        }
    }

    /// Reports whether the track bends around a corner.
    #[must_use]
    pub const fn is_curve(self) -> bool {
        !matches!(self, Self::Vert | Self::Hori)
    }

    /// Resolves the track drawn by a cursor that entered a cell moving
    /// `previous` and left it moving `current`.
    ///
    /// The shape joins the side the cursor came in through with the side it
    /// left by, so a train following the stroke can drive it. Drawing the
    /// same stroke backwards resolves to the same shape. Pairs that describe
    /// neither a straight run nor a quarter turn, including any pair with a
    /// [`Direction::None`] side, yield `None`.
    #[must_use]
    pub fn for_gesture(previous: Direction, current: Direction) -> Option<Self> {
        use Direction::{Down, Left, Right, Up};

        match (previous, current) {
            (Up, Up) | (Down, Down) => Some(Self::Vert),
            (Right, Right) | (Left, Left) => Some(Self::Hori),
            (Up, Left) | (Right, Down) => Some(Self::BottomLeft),
            (Up, Right) | (Left, Down) => Some(Self::BottomRight),
            (Down, Right) | (Left, Up) => Some(Self::TopRight),
            (Down, Left) | (Right, Up) => Some(Self::TopLeft),
            _ => None,
        }
    }
}

/// Colors a train can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainColor {
    /// Primary red.
    Red,
    /// Primary blue.
    Blue,
    /// Primary yellow.
    Yellow,
    /// Blend of red and yellow.
    Orange,
    /// Blend of red and blue.
    Purple,
    /// Blend of blue and yellow.
    Green,
    /// Reserved color no blend produces.
    Brown,
}

impl TrainColor {
    /// Blends two colors when trains meet.
    ///
    /// Identical colors blend to themselves and pairs of distinct primaries
    /// blend to their secondary. Any other pair has no defined result.
    pub fn blend(self, other: TrainColor) -> Result<TrainColor, BlendError> {
        use TrainColor::{Blue, Green, Orange, Purple, Red, Yellow};

        if self == other {
            return Ok(self);
        }

        match (self, other) {
            (Blue, Red) | (Red, Blue) => Ok(Purple),
            (Blue, Yellow) | (Yellow, Blue) => Ok(Green),
            (Yellow, Red) | (Red, Yellow) => Ok(Orange),
            _ => Err(BlendError {
                first: self,
                second: other,
            }),
        }
    }

    /// Single-letter code used by level files.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Blue => 'B',
            Self::Yellow => 'Y',
            Self::Orange => 'O',
            Self::Purple => 'P',
            Self::Green => 'G',
            Self::Brown => 'N',
        }
    }

    /// Parses a level-file color letter.
    #[must_use]
    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'R' => Some(Self::Red),
            'B' => Some(Self::Blue),
            'Y' => Some(Self::Yellow),
            'O' => Some(Self::Orange),
            'P' => Some(Self::Purple),
            'G' => Some(Self::Green),
            'N' => Some(Self::Brown),
            _ => None,
        }
    }
}

/// Two colors met that the blend table does not cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("no blend is defined for {first:?} and {second:?}")]
pub struct BlendError {
    /// Color of the first train of the encounter.
    pub first: TrainColor,
    /// Color of the second train of the encounter.
    pub second: TrainColor,
}

/// Unique identifier assigned to a train.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrainId(u32);

impl TrainId {
    /// Creates a new train identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Static description of a single board cell in a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellSpec {
    /// Impassable scenery.
    Rock,
    /// Cell the player may draw tracks into.
    #[default]
    Empty,
    /// Fixed straight track that recolors passing trains.
    Painter {
        /// Color imposed on trains.
        color: TrainColor,
        /// Orientation of the straight track.
        heading: Direction,
    },
    /// Fixed junction that forks trains travelling along `heading`.
    Splitter {
        /// Direction of travel the splitter forks.
        heading: Direction,
    },
    /// Station emitting trains.
    Departure {
        /// Number of trains to emit.
        count: u32,
        /// Color of emitted trains.
        color: TrainColor,
        /// Heading of emitted trains.
        heading: Direction,
    },
    /// Station accepting trains.
    Arrival {
        /// Number of trains to accept.
        count: u32,
        /// Color of accepted trains.
        color: TrainColor,
        /// Heading trains must travel to enter.
        heading: Direction,
    },
}

/// Static layout of the fixed-size board, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Level {
    cells: Vec<CellSpec>,
}

impl Level {
    /// Creates a board where every cell is editable.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: vec![CellSpec::Empty; (BOARD_COLUMNS * BOARD_ROWS) as usize],
        }
    }

    /// Returns the specification of a cell, if it lies on the board.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<&CellSpec> {
        index(cell).and_then(|index| self.cells.get(index))
    }

    /// Replaces the specification of a cell. Off-board cells are ignored.
    pub fn set(&mut self, cell: CellCoord, spec: CellSpec) {
        if let Some(slot) = index(cell).and_then(|index| self.cells.get_mut(index)) {
            *slot = spec;
        }
    }

    /// Builder-style variant of [`Level::set`].
    #[must_use]
    pub fn with(mut self, cell: CellCoord, spec: CellSpec) -> Self {
        self.set(cell, spec);
        self
    }

    /// Iterates the board row-major, yielding each coordinate and its cell.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &CellSpec)> {
        self.cells.iter().enumerate().map(|(index, spec)| {
            let index = index as u32;
            (
                CellCoord::new(index % BOARD_COLUMNS, index / BOARD_COLUMNS),
                spec,
            )
        })
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::empty()
    }
}

fn index(cell: CellCoord) -> Option<usize> {
    if !cell.on_board() {
        return None;
    }
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    Some(row * BOARD_COLUMNS as usize + column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_gestures_resolve_to_straights() {
        use Direction::{Down, Left, Right, Up};
        assert_eq!(TrackType::for_gesture(Up, Up), Some(TrackType::Vert));
        assert_eq!(TrackType::for_gesture(Down, Down), Some(TrackType::Vert));
        assert_eq!(TrackType::for_gesture(Right, Right), Some(TrackType::Hori));
        assert_eq!(TrackType::for_gesture(Left, Left), Some(TrackType::Hori));
    }

    #[test]
    fn turn_gestures_follow_table() {
        use Direction::{Down, Left, Right, Up};
        let table = [
            (Up, Left, TrackType::BottomLeft),
            (Right, Down, TrackType::BottomLeft),
            (Up, Right, TrackType::BottomRight),
            (Left, Down, TrackType::BottomRight),
            (Down, Right, TrackType::TopRight),
            (Left, Up, TrackType::TopRight),
            (Down, Left, TrackType::TopLeft),
            (Right, Up, TrackType::TopLeft),
        ];

        for (first, second, expected) in table {
            assert_eq!(
                TrackType::for_gesture(first, second),
                Some(expected),
                "{first:?},{second:?}"
            );
        }
    }

    #[test]
    fn turn_gestures_join_the_sides_they_trace() {
        for first in Direction::CARDINALS {
            for second in Direction::CARDINALS {
                let Some(track) = TrackType::for_gesture(first, second) else {
                    continue;
                };
                let (a, b) = track.sides();
                let entered = first.opposite();
                assert!(
                    (a, b) == (entered, second) || (b, a) == (entered, second),
                    "{first:?},{second:?} placed {track:?}"
                );
            }
        }
    }

    #[test]
    fn reversed_strokes_resolve_to_the_same_track() {
        for first in Direction::CARDINALS {
            for second in Direction::CARDINALS {
                assert_eq!(
                    TrackType::for_gesture(first, second),
                    TrackType::for_gesture(second.opposite(), first.opposite()),
                    "{first:?},{second:?}"
                );
            }
        }
    }

    #[test]
    fn reversals_and_warps_place_nothing() {
        use Direction::{Down, Left, None, Right, Up};
        assert_eq!(TrackType::for_gesture(Up, Down), Option::None);
        assert_eq!(TrackType::for_gesture(Left, Right), Option::None);
        assert_eq!(TrackType::for_gesture(None, Up), Option::None);
        assert_eq!(TrackType::for_gesture(Right, None), Option::None);
        assert_eq!(TrackType::for_gesture(None, None), Option::None);
    }

    #[test]
    fn direction_between_requires_single_step() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(
            Direction::between(origin, CellCoord::new(4, 3)),
            Direction::Right
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(3, 2)),
            Direction::Up
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(2, 3)),
            Direction::Left
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(3, 4)),
            Direction::Down
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(5, 3)),
            Direction::None
        );
        assert_eq!(
            Direction::between(origin, CellCoord::new(4, 4)),
            Direction::None
        );
        assert_eq!(Direction::between(origin, origin), Direction::None);
    }

    #[test]
    fn turns_and_angles_are_consistent() {
        for direction in Direction::CARDINALS {
            assert_eq!(direction.turned_left().turned_right(), direction);
            assert_eq!(direction.turned_left().turned_left(), direction.opposite());
            let angle = direction.angle().expect("cardinal angle");
            assert_eq!(Direction::from_angle(angle), Some(direction));
        }
        assert_eq!(Direction::from_angle(45), Option::None);
    }

    #[test]
    fn primary_pairs_blend_symmetrically() {
        use TrainColor::*;
        assert_eq!(Blue.blend(Red), Ok(Purple));
        assert_eq!(Red.blend(Blue), Ok(Purple));
        assert_eq!(Blue.blend(Yellow), Ok(Green));
        assert_eq!(Yellow.blend(Blue), Ok(Green));
        assert_eq!(Yellow.blend(Red), Ok(Orange));
        assert_eq!(Red.blend(Yellow), Ok(Orange));
        assert_eq!(Purple.blend(Purple), Ok(Purple));
    }

    #[test]
    fn unhandled_blends_are_errors() {
        use TrainColor::*;
        assert_eq!(
            Purple.blend(Yellow),
            Err(BlendError {
                first: Purple,
                second: Yellow
            })
        );
        assert!(Orange.blend(Green).is_err());
        assert!(Brown.blend(Red).is_err());
    }

    #[test]
    fn step_stays_in_quadrant() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.step(Direction::Up), Option::None);
        assert_eq!(corner.step(Direction::Left), Option::None);
        assert_eq!(corner.step(Direction::Down), Some(CellCoord::new(0, 1)));
        assert_eq!(corner.step(Direction::RightUp), Option::None);
    }

    #[test]
    fn level_iterates_row_major() {
        let level = Level::empty().with(CellCoord::new(2, 1), CellSpec::Rock);
        let (cell, spec) = level
            .iter()
            .nth(10)
            .expect("board holds more than ten cells");
        assert_eq!(cell, CellCoord::new(2, 1));
        assert_eq!(*spec, CellSpec::Rock);
        assert_eq!(level.get(CellCoord::new(8, 0)), Option::None);
    }
}
