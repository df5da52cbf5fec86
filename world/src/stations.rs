//! Departure and arrival stations that drive the train population.

use switchyard_core::{CellCoord, Direction, TrainColor, TrainId};

use crate::{train::Train, track::TrackSegment};

/// Station that emits a fixed number of trains on a fixed cadence.
#[derive(Clone, Debug, PartialEq)]
pub struct DepartureStation {
    cell: CellCoord,
    heading: Direction,
    color: TrainColor,
    count: u32,
    remaining: u32,
    last_emission: Option<u64>,
    track: TrackSegment,
}

impl DepartureStation {
    pub(crate) fn new(cell: CellCoord, count: u32, color: TrainColor, heading: Direction) -> Self {
        Self {
            cell,
            heading,
            color,
            count,
            remaining: count,
            last_emission: None,
            track: TrackSegment::stub(cell, heading),
        }
    }

    /// Emits a train when one is due.
    ///
    /// The first train leaves immediately; later ones wait until `interval`
    /// ticks have passed since the previous emission.
    pub(crate) fn tick(&mut self, current_tick: u64, interval: u64, id: TrainId) -> Option<Train> {
        if self.remaining == 0 {
            return None;
        }

        let due = self
            .last_emission
            .map_or(true, |last| current_tick.saturating_sub(last) >= interval);
        if !due {
            return None;
        }

        self.last_emission = Some(current_tick);
        self.remaining -= 1;
        Some(Train::on_track(id, self.track.clone(), false, self.color))
    }

    /// Restores the configured count and forgets the emission history.
    pub(crate) fn reset(&mut self) {
        self.remaining = self.count;
        self.last_emission = None;
    }

    /// Cell occupied by the station.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Heading of emitted trains.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Color of emitted trains.
    #[must_use]
    pub const fn color(&self) -> TrainColor {
        self.color
    }

    /// Number of trains the level configures.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Number of trains still to emit.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Stub leading from the station centre toward its heading.
    #[must_use]
    pub const fn track(&self) -> &TrackSegment {
        &self.track
    }
}

/// Station that accepts a fixed number of trains of one color.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrivalStation {
    cell: CellCoord,
    heading: Direction,
    color: TrainColor,
    count: u32,
    remaining: u32,
    checkmark: bool,
    track: TrackSegment,
}

impl ArrivalStation {
    pub(crate) fn new(cell: CellCoord, count: u32, color: TrainColor, heading: Direction) -> Self {
        Self {
            cell,
            heading,
            color,
            count,
            remaining: count,
            checkmark: false,
            track: TrackSegment::stub(cell, heading.opposite()),
        }
    }

    /// Offers a train of `color` to the station.
    ///
    /// Returns `true` when the train is accepted. A refused train clears the
    /// checkmark; the caller is responsible for crashing it.
    pub(crate) fn consume(&mut self, color: TrainColor) -> bool {
        if color == self.color && self.remaining > 0 {
            self.remaining -= 1;
            if self.remaining == 0 {
                self.checkmark = true;
            }
            true
        } else {
            self.checkmark = false;
            false
        }
    }

    /// Restores the configured capacity and clears the checkmark.
    pub(crate) fn reset(&mut self) {
        self.remaining = self.count;
        self.checkmark = false;
    }

    /// Cell occupied by the station.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Heading trains must travel to enter.
    #[must_use]
    pub const fn heading(&self) -> Direction {
        self.heading
    }

    /// Color of accepted trains.
    #[must_use]
    pub const fn color(&self) -> TrainColor {
        self.color
    }

    /// Number of trains the level configures.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Number of trains still accepted.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether the station has been satisfied.
    #[must_use]
    pub const fn checkmark(&self) -> bool {
        self.checkmark
    }

    /// Stub leading from the entry edge to the station centre.
    #[must_use]
    pub const fn track(&self) -> &TrackSegment {
        &self.track
    }
}
