#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line adapter that runs a Switchyard level.

mod scenario;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, trace};
use switchyard_core::{Command, Event};
use switchyard_system_editor::Editor;
use switchyard_world::{self as world, level, query, Field};

use crate::scenario::{InputBatch, Scenario};

/// Command-line arguments accepted by the Switchyard binary.
#[derive(Debug, Parser)]
#[command(name = "switchyard", about = "Run a Switchyard level headless")]
struct CliArgs {
    /// Level layout to load.
    #[arg(long, value_name = "PATH")]
    level: PathBuf,

    /// TOML scenario with the strokes to draw before release.
    #[arg(long, value_name = "PATH")]
    scenario: Option<PathBuf>,

    /// Number of ticks to run after release, overriding the scenario.
    #[arg(long, value_name = "COUNT")]
    ticks: Option<u64>,

    /// Writes the loaded layout back out in canonical form.
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
}

/// Field plus the systems reacting to it.
struct Session {
    field: Field,
    editor: Editor,
    pending: Vec<Event>,
}

impl Session {
    fn new(field: Field) -> Self {
        Self {
            field,
            editor: Editor::new(),
            pending: Vec::new(),
        }
    }

    fn submit(&mut self, command: Command) -> Result<()> {
        let mut events = Vec::new();
        world::apply(&mut self.field, command, &mut events)
            .with_context(|| format!("simulation failed at tick {}", query::tick(&self.field)))?;
        for event in &events {
            report(event);
        }
        self.pending.extend(events);
        Ok(())
    }

    fn input(&mut self, batch: &InputBatch) -> Result<()> {
        let events = std::mem::take(&mut self.pending);
        let mut commands = Vec::new();
        self.editor
            .handle(&events, &batch.inputs, batch.held, &mut commands);
        for command in commands {
            self.submit(command)?;
        }
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        self.submit(Command::Tick)
    }
}

fn report(event: &Event) {
    match event {
        Event::TimeAdvanced { .. } => trace!("{event:?}"),
        Event::TrainDeparted { .. }
        | Event::TrainArrived { .. }
        | Event::TrainCrashed { .. }
        | Event::TrainSplit { .. }
        | Event::LevelCompleted => info!("{event:?}"),
        _ => debug!("{event:?}"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArgs::parse();

    let text = fs::read_to_string(&args.level)
        .with_context(|| format!("failed to read level {}", args.level.display()))?;
    let layout = level::parse(&text)
        .with_context(|| format!("invalid level {}", args.level.display()))?;
    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    let ticks = args.ticks.unwrap_or(scenario.ticks);

    let mut session = Session::new(Field::new());
    session.submit(Command::LoadLevel { level: layout })?;

    if let Some(path) = &args.save {
        let saved = level::to_text(&query::layout(&session.field));
        fs::write(path, saved)
            .with_context(|| format!("failed to save layout to {}", path.display()))?;
        info!("layout saved to {}", path.display());
    }

    for batch in scenario.batches() {
        session.input(&batch)?;
    }

    for _ in 0..ticks {
        session.tick()?;
        if query::level_passed(&session.field) {
            break;
        }
    }

    let field = &session.field;
    println!(
        "tick {}: {} crashes, passed: {}",
        query::tick(field),
        query::crashed_count(field),
        query::level_passed(field)
    );
    for station in query::arrivals(field) {
        println!(
            "arrival {:?}: {}/{} {:?} delivered",
            station.cell,
            station.count - station.remaining,
            station.count,
            station.color
        );
    }
    Ok(())
}
