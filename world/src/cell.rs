//! Board cells: the editable drawing cells and the fixed scenery kinds.

use std::slice;

use switchyard_core::{CellCoord, CellSpec, Direction, TrackType, TrainColor};

use crate::{
    stations::{ArrivalStation, DepartureStation},
    track::{cell_centre, TrackSegment},
};

/// Maximum number of segments stacked in a drawing cell.
pub const MAX_DRAWN_SEGMENTS: usize = 2;

/// Closed set of cell kinds on the board.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// Impassable scenery without track.
    Rock,
    /// Cell the player draws track into.
    Drawing(DrawingCell),
    /// Fixed straight track that recolors trains at its centre.
    Painter(Painter),
    /// Fixed junction that forks trains at its centre.
    Splitter(Splitter),
    /// Station emitting trains.
    Departure(DepartureStation),
    /// Station consuming trains.
    Arrival(ArrivalStation),
}

impl Cell {
    pub(crate) fn from_spec(cell: CellCoord, spec: &CellSpec) -> Self {
        match *spec {
            CellSpec::Rock => Self::Rock,
            CellSpec::Empty => Self::Drawing(DrawingCell::new(cell)),
            CellSpec::Painter { color, heading } => {
                Self::Painter(Painter::new(cell, color, heading))
            }
            CellSpec::Splitter { heading } => Self::Splitter(Splitter::new(cell, heading)),
            CellSpec::Departure {
                count,
                color,
                heading,
            } => Self::Departure(DepartureStation::new(cell, count, color, heading)),
            CellSpec::Arrival {
                count,
                color,
                heading,
            } => Self::Arrival(ArrivalStation::new(cell, count, color, heading)),
        }
    }

    /// Static level description of the cell, using configured counts.
    #[must_use]
    pub fn spec(&self) -> CellSpec {
        match self {
            Self::Rock => CellSpec::Rock,
            Self::Drawing(_) => CellSpec::Empty,
            Self::Painter(painter) => CellSpec::Painter {
                color: painter.color,
                heading: painter.heading,
            },
            Self::Splitter(splitter) => CellSpec::Splitter {
                heading: splitter.heading,
            },
            Self::Departure(station) => CellSpec::Departure {
                count: station.count(),
                color: station.color(),
                heading: station.heading(),
            },
            Self::Arrival(station) => CellSpec::Arrival {
                count: station.count(),
                color: station.color(),
                heading: station.heading(),
            },
        }
    }

    /// Every segment in the cell, in storage order.
    #[must_use]
    pub fn tracks(&self) -> &[TrackSegment] {
        match self {
            Self::Rock => &[],
            Self::Drawing(drawing) => drawing.segments(),
            Self::Painter(painter) => slice::from_ref(&painter.segment),
            Self::Splitter(splitter) => &splitter.segments,
            Self::Departure(station) => slice::from_ref(station.track()),
            Self::Arrival(station) => slice::from_ref(station.track()),
        }
    }

    /// Segments a train arriving from a neighbouring cell may select, in
    /// priority order.
    #[must_use]
    pub fn entry_segments(&self) -> &[TrackSegment] {
        match self {
            Self::Rock | Self::Departure(_) => &[],
            Self::Splitter(splitter) => &splitter.segments[..1],
            other => other.tracks(),
        }
    }
}

/// Editable cell holding up to two stacked segments.
///
/// The first segment wins when a train's entry point matches both; it is
/// kept bright and the second dark.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawingCell {
    cell: CellCoord,
    segments: Vec<TrackSegment>,
}

impl DrawingCell {
    /// Creates an empty drawing cell.
    #[must_use]
    pub fn new(cell: CellCoord) -> Self {
        Self {
            cell,
            segments: Vec::with_capacity(MAX_DRAWN_SEGMENTS + 1),
        }
    }

    /// Segments in priority order.
    #[must_use]
    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }

    /// Adds a drawn segment.
    ///
    /// Drawing a shape already present collapses the cell to that single
    /// segment; otherwise the segment is appended and only the two most
    /// recent are kept.
    pub fn insert(&mut self, track: TrackType) {
        if self
            .segments
            .iter()
            .any(|segment| segment.track_type() == Some(track))
        {
            self.segments.clear();
            self.segments.push(TrackSegment::drawn(self.cell, track));
        } else {
            self.segments.push(TrackSegment::drawn(self.cell, track));
            if self.segments.len() > MAX_DRAWN_SEGMENTS {
                let excess = self.segments.len() - MAX_DRAWN_SEGMENTS;
                let _ = self.segments.drain(..excess);
            }
        }
        self.normalize_brightness();
    }

    /// Removes every segment.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Swaps the priority of two stacked segments.
    ///
    /// Pairs that share no entry side (`Vert`/`Hori` and the two opposite
    /// diagonals) are left untouched. Returns whether the cell changed.
    pub fn flip_tracks(&mut self) -> bool {
        let [first, second] = self.segments.as_slice() else {
            return false;
        };
        let (Some(first), Some(second)) = (first.track_type(), second.track_type()) else {
            return false;
        };
        if !flippable(first, second) {
            return false;
        }

        for segment in &mut self.segments {
            let bright = segment.is_bright();
            segment.set_bright(!bright);
        }
        self.segments.reverse();
        true
    }

    fn normalize_brightness(&mut self) {
        for (index, segment) in self.segments.iter_mut().enumerate() {
            segment.set_bright(index == 0);
        }
    }
}

fn flippable(first: TrackType, second: TrackType) -> bool {
    use TrackType::{BottomLeft, BottomRight, Hori, TopLeft, TopRight, Vert};

    !matches!(
        (first, second),
        (Vert, Hori)
            | (Hori, Vert)
            | (BottomLeft, TopRight)
            | (TopRight, BottomLeft)
            | (TopLeft, BottomRight)
            | (BottomRight, TopLeft)
    )
}

/// Fixed straight track that imposes its color on trains at its centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Painter {
    color: TrainColor,
    heading: Direction,
    segment: TrackSegment,
}

impl Painter {
    fn new(cell: CellCoord, color: TrainColor, heading: Direction) -> Self {
        let track = match heading {
            Direction::Up | Direction::Down => TrackType::Vert,
            _ => TrackType::Hori,
        };
        Self {
            color,
            heading,
            segment: TrackSegment::drawn(cell, track),
        }
    }

    /// Color imposed on passing trains.
    #[must_use]
    pub const fn color(&self) -> TrainColor {
        self.color
    }

    /// Point where trains are recolored.
    #[must_use]
    pub fn centre(&self) -> glam::IVec2 {
        cell_centre(self.segment.cell())
    }
}

/// Fixed junction: a straight along `heading` with branches to either side.
#[derive(Clone, Debug, PartialEq)]
pub struct Splitter {
    heading: Direction,
    segments: [TrackSegment; 3],
}

impl Splitter {
    fn new(cell: CellCoord, heading: Direction) -> Self {
        let straight = match heading {
            Direction::Up | Direction::Down => TrackType::Vert,
            _ => TrackType::Hori,
        };
        Self {
            heading,
            segments: [
                TrackSegment::drawn(cell, straight),
                TrackSegment::stub(cell, heading.turned_left()),
                TrackSegment::stub(cell, heading.turned_right()),
            ],
        }
    }

    /// Direction of travel the splitter forks.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Point where trains fork.
    #[must_use]
    pub fn centre(&self) -> glam::IVec2 {
        cell_centre(self.segments[0].cell())
    }

    /// Branch taken by the spawned train.
    #[must_use]
    pub fn left_branch(&self) -> &TrackSegment {
        &self.segments[1]
    }

    /// Branch taken by the original train.
    #[must_use]
    pub fn right_branch(&self) -> &TrackSegment {
        &self.segments[2]
    }
}
