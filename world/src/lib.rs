#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative field state for the Switchyard engine.
//!
//! The [`Field`] owns the board, its stations and every train. It is only
//! mutated through [`apply`], which reports what happened as [`Event`]
//! values; the [`query`] module exposes read-only views for adapters.

pub mod cell;
pub mod level;
pub mod stations;
pub mod track;

mod collision;
mod train;

use log::{debug, error, info, trace};
use switchyard_core::{
    BlendError, CellCoord, Command, CrashCause, EditError, Event, Level, PlayMode, TrainId,
    BOARD_COLUMNS,
};
use thiserror::Error;

use crate::{
    cell::{Cell, DrawingCell},
    train::Train,
};

pub use level::LevelError;

const DEFAULT_EMISSION_INTERVAL: u64 = 32;
const DEFAULT_SPLIT_INTERVAL: u64 = 32;

/// Timing parameters of the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    emission_interval: u64,
    split_interval: u64,
}

impl Config {
    /// Creates a configuration with explicit intervals, in ticks.
    ///
    /// Zero intervals are raised to one.
    #[must_use]
    pub const fn new(emission_interval: u64, split_interval: u64) -> Self {
        Self {
            emission_interval: if emission_interval == 0 {
                1
            } else {
                emission_interval
            },
            split_interval: if split_interval == 0 {
                1
            } else {
                split_interval
            },
        }
    }

    /// Minimum number of ticks between two trains leaving one departure.
    #[must_use]
    pub const fn emission_interval(&self) -> u64 {
        self.emission_interval
    }

    /// Period of the ticks on which splitters fork trains.
    #[must_use]
    pub const fn split_interval(&self) -> u64 {
        self.split_interval
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_EMISSION_INTERVAL, DEFAULT_SPLIT_INTERVAL)
    }
}

/// Failures that abort a simulation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Two trains met whose colors have no defined blend.
    #[error(transparent)]
    UnhandledColorBlend(#[from] BlendError),
}

/// Represents the authoritative state of one board.
#[derive(Debug)]
pub struct Field {
    cells: Vec<Cell>,
    trains: Vec<Train>,
    tick: u64,
    mode: PlayMode,
    crashed_count: u32,
    level_passed: bool,
    next_train_id: u32,
    config: Config,
}

impl Field {
    /// Creates an empty board in edit mode with default timing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty board in edit mode with the provided timing.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let mut field = Self {
            cells: Vec::new(),
            trains: Vec::new(),
            tick: 0,
            mode: PlayMode::Edit,
            crashed_count: 0,
            level_passed: false,
            next_train_id: 0,
            config,
        };
        field.install(&Level::empty());
        field
    }

    fn install(&mut self, level: &Level) {
        self.cells = level
            .iter()
            .map(|(cell, spec)| Cell::from_spec(cell, spec))
            .collect();
        self.reset();
    }

    /// Standing reset applied while the level is not released.
    fn reset(&mut self) {
        self.trains.clear();
        self.tick = 0;
        self.crashed_count = 0;
        self.level_passed = false;
        self.next_train_id = 0;
        for cell in &mut self.cells {
            match cell {
                Cell::Departure(station) => station.reset(),
                Cell::Arrival(station) => station.reset(),
                _ => {}
            }
        }
    }

    fn cell(&self, cell: CellCoord) -> Option<&Cell> {
        grid_index(cell).and_then(|index| self.cells.get(index))
    }

    fn drawing_cell_mut(&mut self, cell: CellCoord) -> Result<&mut DrawingCell, EditError> {
        if self.mode == PlayMode::Play {
            return Err(EditError::InvalidMode);
        }
        let index = grid_index(cell).ok_or(EditError::OutOfBounds)?;
        match self.cells.get_mut(index) {
            Some(Cell::Drawing(drawing)) => Ok(drawing),
            Some(_) => Err(EditError::NotEditable),
            None => Err(EditError::OutOfBounds),
        }
    }

    fn step(&mut self, out_events: &mut Vec<Event>) -> Result<(), SimulationError> {
        let tick = self.tick;

        self.flip_passed_switches(out_events);
        self.depart(out_events);
        self.crash_departure_collisions(out_events);
        self.navigate(out_events);
        self.trains
            .retain(|train| train.crashed_at.map_or(true, |crashed_at| crashed_at >= tick));
        self.check_arrivals(out_events);
        self.check_completion(out_events);

        if let Err(blend) = collision::resolve(&mut self.trains, out_events) {
            error!("tick {tick}: {blend}");
            return Err(blend.into());
        }

        self.paint(out_events);
        self.split(out_events);
        for train in self.trains.iter_mut().filter(|train| !train.is_crashed()) {
            train.advance();
        }

        out_events.push(Event::TimeAdvanced { tick });
        self.tick = tick.saturating_add(1);
        Ok(())
    }

    fn flip_passed_switches(&mut self, out_events: &mut Vec<Event>) {
        for train in &mut self.trains {
            if train.is_crashed() || !train.past_midpoint() {
                continue;
            }
            let Some(cell) = train.cell() else {
                continue;
            };
            if train.last_flipped == Some(cell) {
                continue;
            }

            let Some(Cell::Drawing(drawing)) =
                grid_index(cell).and_then(|index| self.cells.get_mut(index))
            else {
                continue;
            };
            train.last_flipped = Some(cell);
            if drawing.flip_tracks() {
                out_events.push(Event::TracksFlipped { cell });
            }
        }
    }

    fn depart(&mut self, out_events: &mut Vec<Event>) {
        for cell in &mut self.cells {
            let Cell::Departure(station) = cell else {
                continue;
            };
            let id = TrainId::new(self.next_train_id);
            let Some(train) = station.tick(self.tick, self.config.emission_interval, id) else {
                continue;
            };

            self.next_train_id = self.next_train_id.saturating_add(1);
            out_events.push(Event::TrainDeparted {
                train: train.id,
                cell: station.cell(),
                color: train.color,
            });
            self.trains.push(train);
        }
    }

    fn crash_departure_collisions(&mut self, out_events: &mut Vec<Event>) {
        let crashes: Vec<usize> = self
            .trains
            .iter()
            .enumerate()
            .filter(|(_, train)| !train.is_crashed())
            .filter(|(_, train)| {
                self.cells.iter().any(|cell| match cell {
                    Cell::Departure(station) => {
                        track::cell_contains(station.cell(), train.position)
                            && train.direction != station.heading()
                    }
                    _ => false,
                })
            })
            .map(|(index, _)| index)
            .collect();

        for index in crashes {
            self.crash(index, CrashCause::DepartureCollision, out_events);
        }
    }

    fn navigate(&mut self, out_events: &mut Vec<Event>) {
        let mut crashes = Vec::new();
        for (index, train) in self.trains.iter_mut().enumerate() {
            if train.is_crashed() {
                continue;
            }
            if train.selected_track.is_none() {
                crashes.push((index, CrashCause::NoSelectedTrack));
                continue;
            }
            if !train.at_boundary() {
                continue;
            }

            match train.next_segment(&self.cells) {
                Ok((segment, reversed)) => {
                    trace!(
                        "train {} enters {:?} at {:?}",
                        train.id.get(),
                        segment.cell(),
                        segment.shape()
                    );
                    train.enter(segment, reversed);
                }
                Err(cause) => crashes.push((index, cause)),
            }
        }

        for (index, cause) in crashes {
            self.crash(index, cause, out_events);
        }
    }

    fn crash(&mut self, index: usize, cause: CrashCause, out_events: &mut Vec<Event>) {
        let Some(train) = self.trains.get_mut(index) else {
            return;
        };
        train.crashed_at = Some(self.tick);
        self.crashed_count = self.crashed_count.saturating_add(1);
        debug!(
            "tick {}: train {} crashed at {:?}: {cause:?}",
            self.tick,
            train.id.get(),
            train.position
        );
        out_events.push(Event::TrainCrashed {
            train: train.id,
            cause,
        });
    }

    fn check_arrivals(&mut self, out_events: &mut Vec<Event>) {
        let mut arrived = vec![false; self.trains.len()];
        let mut refused = Vec::new();

        for (index, train) in self.trains.iter().enumerate() {
            if train.is_crashed() {
                continue;
            }
            let Some(Cell::Arrival(station)) = train
                .cell()
                .and_then(grid_index)
                .and_then(|index| self.cells.get_mut(index))
            else {
                continue;
            };

            if station.consume(train.color) {
                arrived[index] = true;
                out_events.push(Event::TrainArrived {
                    train: train.id,
                    cell: station.cell(),
                    color: train.color,
                });
            } else {
                refused.push(index);
            }
        }

        for index in refused {
            self.crash(index, CrashCause::WrongArrival, out_events);
        }
        let mut flags = arrived.into_iter();
        self.trains.retain(|_| !flags.next().unwrap_or(false));
    }

    fn check_completion(&mut self, out_events: &mut Vec<Event>) {
        if self.level_passed || self.crashed_count > 0 {
            return;
        }

        let mut arrivals = self.cells.iter().filter_map(|cell| match cell {
            Cell::Arrival(station) => Some(station),
            _ => None,
        });
        let mut any = false;
        let satisfied = arrivals.all(|station| {
            any = true;
            station.remaining() == 0
        });

        if any && satisfied {
            self.level_passed = true;
            info!("level completed at tick {}", self.tick);
            out_events.push(Event::LevelCompleted);
        }
    }

    fn paint(&mut self, out_events: &mut Vec<Event>) {
        for train in &mut self.trains {
            if train.is_crashed() {
                continue;
            }
            let Some(Cell::Painter(painter)) = track::cell_at(train.position)
                .and_then(grid_index)
                .and_then(|index| self.cells.get(index))
            else {
                continue;
            };
            if painter.centre() != train.position || painter.color() == train.color {
                continue;
            }

            train.color = painter.color();
            out_events.push(Event::TrainRepainted {
                train: train.id,
                color: train.color,
            });
        }
    }

    fn split(&mut self, out_events: &mut Vec<Event>) {
        if self.tick == 0 || self.tick % self.config.split_interval != 0 {
            return;
        }

        let mut spawned = Vec::new();
        for train in &mut self.trains {
            if train.is_crashed() {
                continue;
            }
            let Some(Cell::Splitter(splitter)) = track::cell_at(train.position)
                .and_then(grid_index)
                .and_then(|index| self.cells.get(index))
            else {
                continue;
            };
            if splitter.centre() != train.position || splitter.heading() != train.direction {
                continue;
            }

            let id = TrainId::new(self.next_train_id);
            self.next_train_id = self.next_train_id.saturating_add(1);
            spawned.push(Train::on_track(
                id,
                splitter.left_branch().clone(),
                false,
                train.color,
            ));
            train.enter(splitter.right_branch().clone(), false);
            out_events.push(Event::TrainSplit {
                original: train.id,
                spawned: id,
            });
        }
        self.trains.extend(spawned);
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the field, mutating state deterministically.
///
/// Rejected edits are reported as events rather than errors. The only error
/// is a failed color blend, which aborts the current tick without advancing
/// the tick counter. The offending trains stay where they are, so every later
/// [`Command::Tick`] fails the same way until the field is reset by switching
/// to [`PlayMode::Edit`] or loading a level.
pub fn apply(
    field: &mut Field,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), SimulationError> {
    match command {
        Command::LoadLevel { level } => {
            field.install(&level);
            if field.mode != PlayMode::Edit {
                field.mode = PlayMode::Edit;
                out_events.push(Event::PlayModeChanged {
                    mode: PlayMode::Edit,
                });
            }
            debug!("level loaded");
            out_events.push(Event::LevelLoaded);
        }
        Command::SetPlayMode { mode } => {
            if field.mode != mode {
                field.mode = mode;
                if mode == PlayMode::Edit {
                    field.reset();
                }
                out_events.push(Event::PlayModeChanged { mode });
            }
        }
        Command::PlaceTrack { cell, track } => match field.drawing_cell_mut(cell) {
            Ok(drawing) => {
                drawing.insert(track);
                out_events.push(Event::TrackPlaced { cell, track });
            }
            Err(reason) => {
                debug!("placing {track:?} at {cell:?} rejected: {reason:?}");
                out_events.push(Event::TrackPlacementRejected {
                    cell,
                    track,
                    reason,
                });
            }
        },
        Command::FlipTracks { cell } => match field.drawing_cell_mut(cell) {
            Ok(drawing) => {
                if drawing.flip_tracks() {
                    out_events.push(Event::TracksFlipped { cell });
                }
            }
            Err(reason) => {
                debug!("flipping {cell:?} rejected: {reason:?}");
                out_events.push(Event::EditRejected { cell, reason });
            }
        },
        Command::ClearTracks { cell } => match field.drawing_cell_mut(cell) {
            Ok(drawing) => {
                drawing.clear();
                out_events.push(Event::TracksCleared { cell });
            }
            Err(reason) => {
                debug!("clearing {cell:?} rejected: {reason:?}");
                out_events.push(Event::EditRejected { cell, reason });
            }
        },
        Command::Tick => match field.mode {
            PlayMode::Edit => {
                field.reset();
                field.paint(out_events);
                out_events.push(Event::TimeAdvanced { tick: 0 });
            }
            PlayMode::Play => field.step(out_events)?,
        },
    }
    Ok(())
}

pub(crate) fn grid_index(cell: CellCoord) -> Option<usize> {
    if !cell.on_board() {
        return None;
    }
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    let width = usize::try_from(BOARD_COLUMNS).ok()?;
    Some(row * width + column)
}

/// Query functions that provide read-only access to the field state.
pub mod query {
    use glam::IVec2;
    use switchyard_core::{
        CellCoord, Direction, Level, PlayMode, TrainColor, TrainId, BOARD_COLUMNS, BOARD_ROWS,
    };

    use super::{Config, Field};
    use crate::{cell::Cell, track::TrackSegment};

    /// Number of play ticks simulated since the last reset.
    #[must_use]
    pub fn tick(field: &Field) -> u64 {
        field.tick
    }

    /// Current play mode.
    #[must_use]
    pub fn play_mode(field: &Field) -> PlayMode {
        field.mode
    }

    /// Reports whether the level is released and trains are running.
    #[must_use]
    pub fn is_released(field: &Field) -> bool {
        field.mode == PlayMode::Play
    }

    /// Number of crashes since the last reset.
    #[must_use]
    pub fn crashed_count(field: &Field) -> u32 {
        field.crashed_count
    }

    /// Reports whether the level was completed since the last reset.
    #[must_use]
    pub fn level_passed(field: &Field) -> bool {
        field.level_passed
    }

    /// Timing the field runs with.
    #[must_use]
    pub fn config(field: &Field) -> Config {
        field.config
    }

    /// Board dimensions as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(_field: &Field) -> (u32, u32) {
        (BOARD_COLUMNS, BOARD_ROWS)
    }

    /// Cell at the given coordinate, if it lies on the board.
    #[must_use]
    pub fn cell(field: &Field, cell: CellCoord) -> Option<&Cell> {
        field.cell(cell)
    }

    /// Board cell containing a plane point.
    #[must_use]
    pub fn cell_at(_field: &Field, point: IVec2) -> Option<CellCoord> {
        crate::track::cell_at(point)
    }

    /// Segments held by a cell, empty for off-board coordinates.
    #[must_use]
    pub fn tracks(field: &Field, cell: CellCoord) -> &[TrackSegment] {
        field.cell(cell).map(Cell::tracks).unwrap_or_default()
    }

    /// Static layout of the board, with configured station counts.
    #[must_use]
    pub fn layout(field: &Field) -> Level {
        let mut level = Level::empty();
        for (index, cell) in field.cells.iter().enumerate() {
            let Ok(index) = u32::try_from(index) else {
                continue;
            };
            level.set(
                CellCoord::new(index % BOARD_COLUMNS, index / BOARD_COLUMNS),
                cell.spec(),
            );
        }
        level
    }

    /// Captures a read-only view of every train on the board.
    #[must_use]
    pub fn train_view(field: &Field) -> TrainView {
        let mut snapshots: Vec<TrainSnapshot> = field
            .trains
            .iter()
            .map(|train| TrainSnapshot {
                id: train.id,
                position: train.position,
                direction: train.direction,
                color: train.color,
                cell: train.cell(),
                navigation_index: train.navigation_index,
                crashed: train.is_crashed(),
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        TrainView { snapshots }
    }

    /// Snapshots of every departure station in row-major order.
    #[must_use]
    pub fn departures(field: &Field) -> Vec<StationSnapshot> {
        field
            .cells
            .iter()
            .filter_map(|cell| match cell {
                Cell::Departure(station) => Some(StationSnapshot {
                    cell: station.cell(),
                    heading: station.heading(),
                    color: station.color(),
                    count: station.count(),
                    remaining: station.remaining(),
                    checkmark: false,
                }),
                _ => None,
            })
            .collect()
    }

    /// Snapshots of every arrival station in row-major order.
    #[must_use]
    pub fn arrivals(field: &Field) -> Vec<StationSnapshot> {
        field
            .cells
            .iter()
            .filter_map(|cell| match cell {
                Cell::Arrival(station) => Some(StationSnapshot {
                    cell: station.cell(),
                    heading: station.heading(),
                    color: station.color(),
                    count: station.count(),
                    remaining: station.remaining(),
                    checkmark: station.checkmark(),
                }),
                _ => None,
            })
            .collect()
    }

    /// Read-only snapshot describing all trains on the board.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct TrainView {
        snapshots: Vec<TrainSnapshot>,
    }

    impl TrainView {
        /// Iterator over the captured train snapshots in id order.
        pub fn iter(&self) -> impl Iterator<Item = &TrainSnapshot> {
            self.snapshots.iter()
        }

        /// Snapshot of the train with the given id, if it still exists.
        #[must_use]
        pub fn get(&self, id: TrainId) -> Option<&TrainSnapshot> {
            self.snapshots
                .binary_search_by_key(&id, |snapshot| snapshot.id)
                .ok()
                .and_then(|index| self.snapshots.get(index))
        }

        /// Number of trains captured.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no trains were captured.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Consumes the view, yielding the underlying snapshots.
        pub fn into_vec(self) -> Vec<TrainSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single train's state used for queries.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct TrainSnapshot {
        /// Unique identifier assigned to the train.
        pub id: TrainId,
        /// Position in plane coordinates.
        pub position: IVec2,
        /// Heading of travel.
        pub direction: Direction,
        /// Current color.
        pub color: TrainColor,
        /// Cell owning the segment being traversed.
        pub cell: Option<CellCoord>,
        /// Steps taken along the current segment.
        pub navigation_index: usize,
        /// Indicates whether the train crashed and awaits removal.
        pub crashed: bool,
    }

    /// Immutable representation of a station used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct StationSnapshot {
        /// Cell occupied by the station.
        pub cell: CellCoord,
        /// Heading of emitted trains, or the heading required to enter.
        pub heading: Direction,
        /// Color emitted or accepted.
        pub color: TrainColor,
        /// Number of trains the level configures.
        pub count: u32,
        /// Trains still to emit or accept.
        pub remaining: u32,
        /// Whether an arrival was satisfied; always false for departures.
        pub checkmark: bool,
    }
}
