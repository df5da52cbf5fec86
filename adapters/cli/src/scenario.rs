//! Scripted editor input loaded from TOML.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use switchyard_core::CellCoord;
use switchyard_system_editor::{HeldInputs, InputEvent};

const DEFAULT_TICKS: u64 = 600;

/// Strokes and clicks to replay before the level is released.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    /// Number of ticks to simulate after release.
    #[serde(default = "default_ticks")]
    pub(crate) ticks: u64,
    /// Cursor strokes drawn with the primary button held.
    #[serde(default)]
    pub(crate) strokes: Vec<StrokeScript>,
    /// Cells clicked with the secondary button.
    #[serde(default)]
    pub(crate) flips: Vec<[u32; 2]>,
}

/// One cursor stroke over consecutive cells.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct StrokeScript {
    /// Cells visited, as `[column, row]` pairs.
    pub(crate) cells: Vec<[u32; 2]>,
    /// Holds the delete modifier so the stroke erases.
    #[serde(default)]
    pub(crate) delete: bool,
}

/// Input delivered to the editor in one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct InputBatch {
    pub(crate) inputs: Vec<InputEvent>,
    pub(crate) held: HeldInputs,
}

fn default_ticks() -> u64 {
    DEFAULT_TICKS
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            ticks: DEFAULT_TICKS,
            strokes: Vec::new(),
            flips: Vec::new(),
        }
    }
}

impl Scenario {
    pub(crate) fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse scenario toml")
    }

    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Editor input reproducing the scenario, ending with the release toggle.
    ///
    /// Every stroke and click leaves the board afterwards so consecutive
    /// strokes never join into one gesture.
    pub(crate) fn batches(&self) -> Vec<InputBatch> {
        let mut batches = Vec::with_capacity(self.strokes.len() + self.flips.len() + 1);

        for stroke in &self.strokes {
            let mut inputs: Vec<InputEvent> = stroke
                .cells
                .iter()
                .map(|&[column, row]| InputEvent::CursorEntered(CellCoord::new(column, row)))
                .collect();
            inputs.push(InputEvent::CursorLeft);
            batches.push(InputBatch {
                inputs,
                held: HeldInputs::new(true, stroke.delete),
            });
        }

        for &[column, row] in &self.flips {
            batches.push(InputBatch {
                inputs: vec![
                    InputEvent::CursorEntered(CellCoord::new(column, row)),
                    InputEvent::SecondaryDown,
                    InputEvent::CursorLeft,
                ],
                held: HeldInputs::default(),
            });
        }

        batches.push(InputBatch {
            inputs: vec![InputEvent::ToggleRelease],
            held: HeldInputs::default(),
        });
        batches
    }
}
