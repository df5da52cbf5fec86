//! Translation of cursor strokes into drawn track shapes.

use switchyard_core::{CellCoord, Direction, TrackType};

/// Remembers the last two cell-to-cell movements of the cursor.
///
/// A cell's shape is only known once the cursor has left it, so every
/// resolved stroke names the cell entered one step earlier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureTranslator {
    last_cell: Option<CellCoord>,
    previous: Direction,
    current: Direction,
}

/// Track resolved for a cell the cursor passed through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stroke {
    /// Cell the cursor entered and then left.
    pub cell: CellCoord,
    /// Shape traced through that cell.
    pub track: TrackType,
}

impl GestureTranslator {
    /// Creates a translator with no cursor history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_cell: None,
            previous: Direction::None,
            current: Direction::None,
        }
    }

    /// Cell the cursor was last seen in, if it is on the board.
    #[must_use]
    pub const fn last_cell(&self) -> Option<CellCoord> {
        self.last_cell
    }

    /// The two most recent movements, oldest first.
    #[must_use]
    pub const fn movements(&self) -> (Direction, Direction) {
        (self.previous, self.current)
    }

    /// Records the cursor entering `cell`.
    ///
    /// Re-entering the current cell is ignored. Jumps that are not a single
    /// cardinal step count as a [`Direction::None`] movement, which never
    /// resolves to a track.
    pub fn enter(&mut self, cell: CellCoord) -> Option<Stroke> {
        if self.last_cell == Some(cell) {
            return None;
        }

        let movement = self
            .last_cell
            .map_or(Direction::None, |last| Direction::between(last, cell));
        let passed = self.last_cell.replace(cell);
        self.previous = self.current;
        self.current = movement;

        let track = TrackType::for_gesture(self.previous, self.current)?;
        passed.map(|cell| Stroke { cell, track })
    }

    /// Forgets the last cell so the next entry counts as a warp.
    pub fn leave(&mut self) {
        self.last_cell = None;
    }
}
