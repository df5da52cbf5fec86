//! Train agents and their cell-to-cell navigation.

use glam::IVec2;
use switchyard_core::{CellCoord, CrashCause, Direction, TrainColor, TrainId};

use crate::{cell::Cell, grid_index, track::TrackSegment};

/// A train travelling the network.
///
/// `selected_track` is a copy of the segment being traversed, so flipping
/// the owning cell never moves a train that is already on it.
#[derive(Clone, Debug)]
pub(crate) struct Train {
    pub(crate) id: TrainId,
    pub(crate) position: IVec2,
    pub(crate) direction: Direction,
    pub(crate) color: TrainColor,
    pub(crate) selected_track: Option<TrackSegment>,
    pub(crate) reversed: bool,
    pub(crate) navigation_index: usize,
    pub(crate) crashed_at: Option<u64>,
    pub(crate) last_flipped: Option<CellCoord>,
}

impl Train {
    /// Places a new train at the entry point of `track`.
    pub(crate) fn on_track(
        id: TrainId,
        track: TrackSegment,
        reversed: bool,
        color: TrainColor,
    ) -> Self {
        let mut train = Self {
            id,
            position: IVec2::ZERO,
            direction: Direction::None,
            color,
            selected_track: None,
            reversed: false,
            navigation_index: 0,
            crashed_at: None,
            last_flipped: None,
        };
        train.enter(track, reversed);
        train
    }

    /// Snaps the train onto the entry point of a new segment.
    pub(crate) fn enter(&mut self, track: TrackSegment, reversed: bool) {
        self.position = track.point_at(0, reversed);
        self.direction = track.heading(reversed);
        self.reversed = reversed;
        self.navigation_index = 0;
        self.last_flipped = None;
        self.selected_track = Some(track);
    }

    #[cfg(test)]
    pub(crate) fn detached(
        id: TrainId,
        position: IVec2,
        direction: Direction,
        color: TrainColor,
    ) -> Self {
        Self {
            id,
            position,
            direction,
            color,
            selected_track: None,
            reversed: false,
            navigation_index: 0,
            crashed_at: None,
            last_flipped: None,
        }
    }

    pub(crate) fn is_crashed(&self) -> bool {
        self.crashed_at.is_some()
    }

    /// Cell owning the segment the train is on.
    pub(crate) fn cell(&self) -> Option<CellCoord> {
        self.selected_track.as_ref().map(TrackSegment::cell)
    }

    /// Whether the train stands on the far endpoint of its segment.
    pub(crate) fn at_boundary(&self) -> bool {
        self.selected_track
            .as_ref()
            .is_some_and(|track| self.navigation_index >= track.len())
    }

    /// Whether the train has crossed the midpoint of its segment.
    pub(crate) fn past_midpoint(&self) -> bool {
        self.selected_track
            .as_ref()
            .is_some_and(|track| self.navigation_index > track.len() / 2)
    }

    /// Moves one waypoint along the current segment.
    pub(crate) fn advance(&mut self) {
        let Some(track) = &self.selected_track else {
            return;
        };
        if self.navigation_index >= track.len() {
            return;
        }
        self.navigation_index += 1;
        self.position = track.point_at(self.navigation_index, self.reversed);
    }

    /// Finds the segment of the next cell that continues from the far
    /// endpoint of the current one.
    ///
    /// The first segment in storage order whose endpoint coincides with the
    /// train's position wins.
    pub(crate) fn next_segment(&self, cells: &[Cell]) -> Result<(TrackSegment, bool), CrashCause> {
        let current = self.cell().ok_or(CrashCause::NoSelectedTrack)?;
        let destination = current
            .step(self.direction)
            .filter(|cell| cell.on_board())
            .ok_or(CrashCause::OffBoard)?;
        let cell = grid_index(destination)
            .and_then(|index| cells.get(index))
            .ok_or(CrashCause::OffBoard)?;

        let candidates = cell.entry_segments();
        if candidates.is_empty() {
            return Err(CrashCause::NoTrackAhead);
        }

        candidates
            .iter()
            .find_map(|segment| {
                segment
                    .entry_at(self.position)
                    .map(|reversed| (segment.clone(), reversed))
            })
            .ok_or(CrashCause::NoMatchingEndpoint)
    }
}
