#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure edit-mode system translating pointer input into track edit commands.

mod gesture;

pub use gesture::{GestureTranslator, Stroke};

use switchyard_core::{CellCoord, Command, Event, PlayMode};

/// Discrete pointer and keyboard input delivered by an adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The cursor moved into a board cell.
    CursorEntered(CellCoord),
    /// The cursor left the board.
    CursorLeft,
    /// The primary button was pressed.
    PrimaryDown,
    /// The secondary button was pressed.
    SecondaryDown,
    /// The release switch was toggled.
    ToggleRelease,
}

/// Snapshot of the inputs held down while the events were delivered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldInputs {
    /// Indicates whether the primary button is held.
    pub primary: bool,
    /// Indicates whether the delete modifier key is held.
    pub delete_modifier: bool,
}

impl HeldInputs {
    /// Creates a new snapshot with explicit field values.
    #[must_use]
    pub const fn new(primary: bool, delete_modifier: bool) -> Self {
        Self {
            primary,
            delete_modifier,
        }
    }
}

/// Edit-mode system that turns strokes and clicks into field commands.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    play_mode: PlayMode,
    cursor: Option<CellCoord>,
    gesture: GestureTranslator,
}

impl Editor {
    /// Creates a new editor system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            play_mode: PlayMode::Edit,
            cursor: None,
            gesture: GestureTranslator::new(),
        }
    }

    /// Play mode last announced by the field.
    #[must_use]
    pub const fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    /// Consumes field events and adapter input to emit edit commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        inputs: &[InputEvent],
        held: HeldInputs,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if let Event::PlayModeChanged { mode } = event {
                self.play_mode = *mode;
            }
        }

        for input in inputs {
            match *input {
                InputEvent::CursorEntered(cell) => self.cursor_entered(cell, held, out),
                InputEvent::CursorLeft => {
                    self.cursor = None;
                    self.gesture.leave();
                }
                InputEvent::PrimaryDown => {
                    if let Some(cell) = self.editable_cursor() {
                        if held.delete_modifier {
                            out.push(Command::ClearTracks { cell });
                        }
                    }
                }
                InputEvent::SecondaryDown => {
                    if let Some(cell) = self.editable_cursor() {
                        out.push(Command::FlipTracks { cell });
                    }
                }
                InputEvent::ToggleRelease => out.push(Command::SetPlayMode {
                    mode: self.play_mode.toggled(),
                }),
            }
        }
    }

    fn cursor_entered(&mut self, cell: CellCoord, held: HeldInputs, out: &mut Vec<Command>) {
        self.cursor = Some(cell);
        if self.gesture.last_cell() == Some(cell) {
            return;
        }

        let stroke = self.gesture.enter(cell);
        if self.play_mode != PlayMode::Edit || !held.primary {
            return;
        }

        if held.delete_modifier {
            out.push(Command::ClearTracks { cell });
        } else if let Some(stroke) = stroke {
            out.push(Command::PlaceTrack {
                cell: stroke.cell,
                track: stroke.track,
            });
        }
    }

    fn editable_cursor(&self) -> Option<CellCoord> {
        if self.play_mode == PlayMode::Edit {
            self.cursor
        } else {
            None
        }
    }
}
