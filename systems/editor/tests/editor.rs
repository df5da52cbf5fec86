use switchyard_core::{
    CellCoord, CellSpec, Command, Direction, Event, Level, PlayMode, TrackType, TrainColor,
};
use switchyard_system_editor::{Editor, HeldInputs, InputEvent};
use switchyard_world::{self as world, query, Field};

const DRAWING: HeldInputs = HeldInputs::new(true, false);
const DELETING: HeldInputs = HeldInputs::new(true, true);

fn entered(cells: &[(u32, u32)]) -> Vec<InputEvent> {
    cells
        .iter()
        .map(|&(column, row)| InputEvent::CursorEntered(CellCoord::new(column, row)))
        .collect()
}

#[test]
fn stroke_emits_place_commands_in_edit_mode() {
    let mut editor = Editor::default();
    let mut commands = Vec::new();

    editor.handle(&[], &entered(&[(3, 5), (3, 4), (3, 3), (4, 3)]), DRAWING, &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::PlaceTrack {
                cell: CellCoord::new(3, 4),
                track: TrackType::Vert,
            },
            Command::PlaceTrack {
                cell: CellCoord::new(3, 3),
                track: TrackType::BottomRight,
            },
        ],
        "each inner cell of the stroke should receive a track",
    );
}

#[test]
fn hovering_without_primary_places_nothing() {
    let mut editor = Editor::default();
    let mut commands = Vec::new();

    editor.handle(
        &[],
        &entered(&[(0, 0), (1, 0), (2, 0)]),
        HeldInputs::default(),
        &mut commands,
    );

    assert!(commands.is_empty(), "hovering must not draw");
}

#[test]
fn strokes_ignored_while_released() {
    let mut editor = Editor::new();
    let mut commands = Vec::new();

    editor.handle(
        &[Event::PlayModeChanged {
            mode: PlayMode::Play,
        }],
        &entered(&[(0, 0), (1, 0), (2, 0)]),
        DRAWING,
        &mut commands,
    );

    assert!(commands.is_empty(), "released levels are frozen");
    assert_eq!(editor.play_mode(), PlayMode::Play);
}

#[test]
fn delete_modifier_clears_entered_cells() {
    let mut editor = Editor::default();
    let mut commands = Vec::new();

    editor.handle(&[], &entered(&[(1, 1), (2, 1)]), DELETING, &mut commands);
    editor.handle(&[], &[InputEvent::PrimaryDown], DELETING, &mut commands);

    assert_eq!(
        commands,
        vec![
            Command::ClearTracks {
                cell: CellCoord::new(1, 1),
            },
            Command::ClearTracks {
                cell: CellCoord::new(2, 1),
            },
            Command::ClearTracks {
                cell: CellCoord::new(2, 1),
            },
        ]
    );
}

#[test]
fn secondary_click_flips_the_hovered_cell() {
    let mut editor = Editor::default();
    let mut commands = Vec::new();

    editor.handle(
        &[],
        &[
            InputEvent::CursorEntered(CellCoord::new(6, 2)),
            InputEvent::SecondaryDown,
            InputEvent::CursorLeft,
            InputEvent::SecondaryDown,
        ],
        HeldInputs::default(),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::FlipTracks {
            cell: CellCoord::new(6, 2),
        }],
        "clicks off the board are ignored",
    );
}

#[test]
fn toggle_requests_the_opposite_mode() {
    let mut editor = Editor::default();
    let mut commands = Vec::new();

    editor.handle(
        &[],
        &[InputEvent::ToggleRelease],
        HeldInputs::default(),
        &mut commands,
    );
    editor.handle(
        &[Event::PlayModeChanged {
            mode: PlayMode::Play,
        }],
        &[InputEvent::ToggleRelease],
        HeldInputs::default(),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::SetPlayMode {
                mode: PlayMode::Play,
            },
            Command::SetPlayMode {
                mode: PlayMode::Edit,
            },
        ]
    );
}

/// Loads `level`, draws `stroke` through the editor, releases and runs
/// `ticks` ticks. Returns the field, the edit events and the tick of the
/// first arrival.
fn draw_and_run(
    level: Level,
    stroke: &[CellCoord],
    ticks: u64,
) -> (Field, Vec<Event>, Option<u64>) {
    let mut field = Field::new();
    let mut editor = Editor::new();
    let mut events = Vec::new();
    world::apply(&mut field, Command::LoadLevel { level }, &mut events)
        .expect("loading never fails");

    let inputs: Vec<InputEvent> = stroke
        .iter()
        .map(|&cell| InputEvent::CursorEntered(cell))
        .collect();
    let mut commands = Vec::new();
    editor.handle(&events, &inputs, DRAWING, &mut commands);
    editor.handle(
        &[],
        &[InputEvent::ToggleRelease],
        HeldInputs::default(),
        &mut commands,
    );

    let mut edits = Vec::new();
    for command in commands {
        world::apply(&mut field, command, &mut edits).expect("edits never fail");
    }
    assert!(query::is_released(&field));

    let mut arrived_at = None;
    for _ in 0..ticks {
        let tick = query::tick(&field);
        events.clear();
        world::apply(&mut field, Command::Tick, &mut events).expect("tick succeeds");
        if arrived_at.is_none()
            && events
                .iter()
                .any(|event| matches!(event, Event::TrainArrived { .. }))
        {
            arrived_at = Some(tick);
        }
    }
    (field, edits, arrived_at)
}

fn route(start: CellCoord, leaving: Direction, end: CellCoord, entering: Direction) -> Level {
    Level::empty()
        .with(
            start,
            CellSpec::Departure {
                count: 1,
                color: TrainColor::Blue,
                heading: leaving,
            },
        )
        .with(
            end,
            CellSpec::Arrival {
                count: 1,
                color: TrainColor::Blue,
                heading: entering,
            },
        )
}

#[test]
fn drawn_route_carries_a_train_home() {
    let start = CellCoord::new(0, 2);
    let end = CellCoord::new(0, 0);
    let (field, edits, arrived_at) = draw_and_run(
        route(start, Direction::Up, end, Direction::Up),
        &[start, CellCoord::new(0, 1), end],
        64,
    );

    assert!(edits.contains(&Event::TrackPlaced {
        cell: CellCoord::new(0, 1),
        track: TrackType::Vert,
    }));
    assert_eq!(arrived_at, Some(48));
    assert!(query::level_passed(&field));
    assert_eq!(query::crashed_count(&field), 0);
}

#[test]
fn every_turn_drawn_along_the_route_delivers_its_train() {
    use Direction::{Down, Left, Right, Up};

    let corner = CellCoord::new(3, 3);
    let turns = [
        (Up, Left),
        (Right, Down),
        (Up, Right),
        (Left, Down),
        (Down, Right),
        (Left, Up),
        (Down, Left),
        (Right, Up),
    ];

    for (previous, current) in turns {
        let start = corner.step(previous.opposite()).expect("start on board");
        let end = corner.step(current).expect("end on board");
        let (field, edits, arrived_at) = draw_and_run(
            route(start, previous, end, current),
            &[start, corner, end],
            100,
        );

        let placed = edits.iter().find_map(|event| match event {
            Event::TrackPlaced { cell, track } if *cell == corner => Some(*track),
            _ => None,
        });
        assert_eq!(
            placed,
            TrackType::for_gesture(previous, current),
            "{previous:?},{current:?}"
        );
        assert_eq!(arrived_at, Some(80), "{previous:?},{current:?} via {placed:?}");
        assert!(query::level_passed(&field), "{previous:?},{current:?}");
        assert_eq!(query::crashed_count(&field), 0, "{previous:?},{current:?}");
    }
}
