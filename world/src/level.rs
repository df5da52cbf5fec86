//! Plain-text level layouts.
//!
//! A layout is eight rows of eight whitespace-separated cell codes:
//!
//! | code | cell |
//! |---|---|
//! | `R` | rock |
//! | `E` | empty drawing cell |
//! | `P<color><angle>` | painter, e.g. `PR90` |
//! | `S<angle>` | splitter, e.g. `S0` |
//! | `D<count><color><angle>` | departure, e.g. `D3B270` |
//! | `A<count><color><angle>` | arrival, e.g. `A1G0` |
//!
//! Colors are the letters `R B Y O P G N`, angles one of `0 90 180 270`.
//! Blank lines and lines starting with `#` are skipped.

use std::fmt::Write as _;

use switchyard_core::{CellCoord, CellSpec, Direction, Level, TrainColor, BOARD_COLUMNS, BOARD_ROWS};
use thiserror::Error;

const COLUMN_WIDTH: usize = 6;

/// Reasons a level layout cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The layout does not have exactly one line per board row.
    #[error("expected {} rows, found {found}", BOARD_ROWS)]
    RowCount {
        /// Number of rows present.
        found: usize,
    },
    /// A row does not have exactly one code per board column.
    #[error("row {row}: expected {} cells, found {found}", BOARD_COLUMNS)]
    ColumnCount {
        /// Board row of the offending line.
        row: u32,
        /// Number of codes present.
        found: usize,
    },
    /// A code does not name any cell kind.
    #[error("row {row}, column {column}: unknown cell code `{code}`")]
    UnknownCode {
        /// Board row of the code.
        row: u32,
        /// Board column of the code.
        column: u32,
        /// Offending code.
        code: String,
    },
    /// A code names a color outside `RBYOPGN`.
    #[error("row {row}, column {column}: invalid color in `{code}`")]
    InvalidColor {
        /// Board row of the code.
        row: u32,
        /// Board column of the code.
        column: u32,
        /// Offending code.
        code: String,
    },
    /// A code names an angle other than 0, 90, 180 or 270.
    #[error("row {row}, column {column}: invalid angle in `{code}`")]
    InvalidAngle {
        /// Board row of the code.
        row: u32,
        /// Board column of the code.
        column: u32,
        /// Offending code.
        code: String,
    },
    /// A station code carries a missing or zero train count.
    #[error("row {row}, column {column}: invalid train count in `{code}`")]
    InvalidCount {
        /// Board row of the code.
        row: u32,
        /// Board column of the code.
        column: u32,
        /// Offending code.
        code: String,
    },
}

/// Parses a layout from its text form.
pub fn parse(text: &str) -> Result<Level, LevelError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    if rows.len() != BOARD_ROWS as usize {
        return Err(LevelError::RowCount { found: rows.len() });
    }

    let mut level = Level::empty();
    for (row, line) in (0..BOARD_ROWS).zip(rows) {
        let codes: Vec<&str> = line.split_whitespace().collect();
        if codes.len() != BOARD_COLUMNS as usize {
            return Err(LevelError::ColumnCount {
                row,
                found: codes.len(),
            });
        }
        for (column, code) in (0..BOARD_COLUMNS).zip(codes) {
            let cell = CellCoord::new(column, row);
            level.set(cell, parse_code(cell, code)?);
        }
    }
    Ok(level)
}

/// Writes a layout in the form accepted by [`parse`].
///
/// Codes are left-aligned in fixed-width columns, one board row per line.
#[must_use]
pub fn to_text(level: &Level) -> String {
    let mut text = String::new();
    for row in 0..BOARD_ROWS {
        let mut line = String::new();
        for column in 0..BOARD_COLUMNS {
            let spec = level
                .get(CellCoord::new(column, row))
                .copied()
                .unwrap_or_default();
            let _ = write!(line, "{:<width$}", encode(spec), width = COLUMN_WIDTH);
        }
        text.push_str(line.trim_end());
        text.push('\n');
    }
    text
}

fn encode(spec: CellSpec) -> String {
    match spec {
        CellSpec::Rock => "R".to_owned(),
        CellSpec::Empty => "E".to_owned(),
        CellSpec::Painter { color, heading } => {
            format!("P{}{}", color.code(), angle(heading))
        }
        CellSpec::Splitter { heading } => format!("S{}", angle(heading)),
        CellSpec::Departure {
            count,
            color,
            heading,
        } => format!("D{count}{}{}", color.code(), angle(heading)),
        CellSpec::Arrival {
            count,
            color,
            heading,
        } => format!("A{count}{}{}", color.code(), angle(heading)),
    }
}

// Layouts only ever carry cardinal headings; anything else is written as 0.
fn angle(heading: Direction) -> u32 {
    heading.angle().unwrap_or(0)
}

fn parse_code(cell: CellCoord, code: &str) -> Result<CellSpec, LevelError> {
    parse_spec(code).map_err(|fault| fault.at(cell, code))
}

#[derive(Clone, Copy, Debug)]
enum Fault {
    Unknown,
    Color,
    Angle,
    Count,
}

impl Fault {
    fn at(self, cell: CellCoord, code: &str) -> LevelError {
        let (row, column, code) = (cell.row(), cell.column(), code.to_owned());
        match self {
            Self::Unknown => LevelError::UnknownCode { row, column, code },
            Self::Color => LevelError::InvalidColor { row, column, code },
            Self::Angle => LevelError::InvalidAngle { row, column, code },
            Self::Count => LevelError::InvalidCount { row, column, code },
        }
    }
}

fn parse_spec(code: &str) -> Result<CellSpec, Fault> {
    let mut chars = code.chars();
    let kind = chars.next().ok_or(Fault::Unknown)?;
    let rest = chars.as_str();

    match kind {
        'R' if rest.is_empty() => Ok(CellSpec::Rock),
        'E' if rest.is_empty() => Ok(CellSpec::Empty),
        'P' => {
            let (color, rest) = split_color(rest)?;
            Ok(CellSpec::Painter {
                color,
                heading: heading(rest)?,
            })
        }
        'S' => Ok(CellSpec::Splitter {
            heading: heading(rest)?,
        }),
        'D' | 'A' => {
            let (count, rest) = split_count(rest)?;
            let (color, rest) = split_color(rest)?;
            let heading = heading(rest)?;
            Ok(if kind == 'D' {
                CellSpec::Departure {
                    count,
                    color,
                    heading,
                }
            } else {
                CellSpec::Arrival {
                    count,
                    color,
                    heading,
                }
            })
        }
        _ => Err(Fault::Unknown),
    }
}

fn split_count(text: &str) -> Result<(u32, &str), Fault> {
    let digits = text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let (count, rest) = text.split_at(digits);
    let count = count
        .parse::<u32>()
        .ok()
        .filter(|count| *count > 0)
        .ok_or(Fault::Count)?;
    Ok((count, rest))
}

fn split_color(text: &str) -> Result<(TrainColor, &str), Fault> {
    let mut chars = text.chars();
    let color = chars
        .next()
        .and_then(TrainColor::from_code)
        .ok_or(Fault::Color)?;
    Ok((color, chars.as_str()))
}

fn heading(text: &str) -> Result<Direction, Fault> {
    text.parse::<u32>()
        .ok()
        .and_then(Direction::from_angle)
        .ok_or(Fault::Angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = "\
# departure bottom-left, arrival top-left
A1B90 E     E     E     E     E     E     R
E     E     E     E     E     E     E     R
E     E     PR0   E     S90   E     E     R

E     E     E     E     E     E     E     E
E     E     E     E     E     E     E     E
E     E     E     E     E     E     E     E
E     E     E     E     E     E     E     E
D12B90 E    E     E     E     E     E     E
";

    #[test]
    fn parses_every_cell_kind() {
        let level = parse(DEMO).expect("demo layout parses");
        assert_eq!(
            level.get(CellCoord::new(0, 0)),
            Some(&CellSpec::Arrival {
                count: 1,
                color: TrainColor::Blue,
                heading: Direction::Up,
            })
        );
        assert_eq!(level.get(CellCoord::new(7, 0)), Some(&CellSpec::Rock));
        assert_eq!(
            level.get(CellCoord::new(2, 2)),
            Some(&CellSpec::Painter {
                color: TrainColor::Red,
                heading: Direction::Right,
            })
        );
        assert_eq!(
            level.get(CellCoord::new(4, 2)),
            Some(&CellSpec::Splitter {
                heading: Direction::Up,
            })
        );
        assert_eq!(
            level.get(CellCoord::new(0, 7)),
            Some(&CellSpec::Departure {
                count: 12,
                color: TrainColor::Blue,
                heading: Direction::Up,
            })
        );
        assert_eq!(level.get(CellCoord::new(1, 1)), Some(&CellSpec::Empty));
    }

    #[test]
    fn written_layout_parses_back() {
        let level = parse(DEMO).expect("demo layout parses");
        let text = to_text(&level);
        assert!(text.starts_with("A1B90 E     E"));
        assert_eq!(text.lines().count(), BOARD_ROWS as usize);
        assert_eq!(parse(&text), Ok(level));
    }

    #[test]
    fn reports_shape_errors() {
        assert_eq!(parse("E E E"), Err(LevelError::RowCount { found: 1 }));

        let short_row = DEMO.replacen("E     E     E     E     E     E     E     E", "E E", 1);
        assert_eq!(
            parse(&short_row),
            Err(LevelError::ColumnCount { row: 3, found: 2 })
        );
    }

    #[test]
    fn reports_bad_codes_with_location() {
        let cases = [
            ("X", "UnknownCode"),
            ("RR", "UnknownCode"),
            ("PX0", "InvalidColor"),
            ("PR45", "InvalidAngle"),
            ("S", "InvalidAngle"),
            ("D0B90", "InvalidCount"),
            ("AB90", "InvalidCount"),
            ("D2Q90", "InvalidColor"),
        ];
        for (code, expected) in cases {
            let text = DEMO.replacen("PR0  ", &format!("{code:<5}"), 1);
            let error = parse(&text).expect_err(code);
            let (row, column) = match &error {
                LevelError::UnknownCode { row, column, .. }
                | LevelError::InvalidColor { row, column, .. }
                | LevelError::InvalidAngle { row, column, .. }
                | LevelError::InvalidCount { row, column, .. } => (*row, *column),
                other => panic!("unexpected error {other:?}"),
            };
            assert_eq!((row, column), (2, 2), "{code}");
            assert!(format!("{error:?}").starts_with(expected), "{code}: {error:?}");
        }
    }
}
