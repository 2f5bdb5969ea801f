//! Sensor interfaces for Prometheus grid localization
//!
//! The robot's only sensor reports a 3x3 window centred on its own cell. The
//! eight outer cells are open or wall; the centre is either a heading glyph
//! (when the compass is readable) or a neutral glyph.

use crate::common::Orientation;
use crate::error::{LocalizationError, Result};
use crate::perception::maze::{Cell, OPEN_GLYPH, WALL_GLYPH};
use nalgebra::Matrix3;
use std::collections::VecDeque;
use std::fmt;

/// Centre glyph reported when the heading is not observable
pub const DEFAULT_NEUTRAL_GLYPH: char = '*';

/// One cell of an observation window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Open,
    Wall,
    Heading(Orientation),
    Neutral,
}

impl Glyph {
    /// Whether this glyph agrees with a maze cell
    pub fn matches(self, cell: Cell) -> bool {
        matches!(
            (self, cell),
            (Glyph::Open, Cell::Open) | (Glyph::Wall, Cell::Wall)
        )
    }
}

/// `Neutral` prints as the default neutral glyph; an `Observation` prints the
/// glyph it was parsed with.
impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Glyph::Open => OPEN_GLYPH,
            Glyph::Wall => WALL_GLYPH,
            Glyph::Heading(heading) => heading.glyph(),
            Glyph::Neutral => DEFAULT_NEUTRAL_GLYPH,
        };
        write!(f, "{}", c)
    }
}

/// A 3x3 observation window in the maze frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    window: Matrix3<Glyph>,
    /// Character the centre was parsed from when neutral
    neutral: char,
}

impl Observation {
    /// Parse three rows of three glyphs, using the default neutral glyph
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        Self::parse(rows, DEFAULT_NEUTRAL_GLYPH)
    }

    /// Parse three rows of three glyphs.
    ///
    /// Outer cells must be `.` or a wall glyph (`#` or `=`); the centre must be
    /// a heading glyph or `neutral`.
    pub fn parse<S: AsRef<str>>(rows: &[S], neutral: char) -> Result<Self> {
        if rows.len() != 3 {
            return Err(LocalizationError::MalformedObservation(format!(
                "Expected 3 rows, got {}",
                rows.len()
            )));
        }

        let mut glyphs = [Glyph::Wall; 9];
        for (r, row) in rows.iter().enumerate() {
            let chars: Vec<char> = row.as_ref().chars().collect();
            if chars.len() != 3 {
                return Err(LocalizationError::MalformedObservation(format!(
                    "Row {} has {} glyphs, expected 3",
                    r,
                    chars.len()
                )));
            }
            for (c, &ch) in chars.iter().enumerate() {
                let is_center = r == 1 && c == 1;
                glyphs[r * 3 + c] = Self::decode(ch, is_center, neutral).ok_or_else(|| {
                    LocalizationError::MalformedObservation(format!(
                        "Unexpected glyph '{}' at row {}, column {}",
                        ch, r, c
                    ))
                })?;
            }
        }

        Ok(Observation {
            window: Matrix3::from_row_slice(&glyphs),
            neutral,
        })
    }

    fn decode(ch: char, is_center: bool, neutral: char) -> Option<Glyph> {
        if is_center {
            if ch == neutral {
                return Some(Glyph::Neutral);
            }
            return Orientation::from_glyph(ch).map(Glyph::Heading);
        }
        match ch {
            OPEN_GLYPH => Some(Glyph::Open),
            WALL_GLYPH | '=' => Some(Glyph::Wall),
            _ => None,
        }
    }

    /// Glyph at a row/column offset from the centre, each in `-1..=1`
    pub fn at(&self, row_offset: i32, col_offset: i32) -> Glyph {
        assert!(
            (-1..=1).contains(&row_offset) && (-1..=1).contains(&col_offset),
            "observation offset ({}, {}) outside the 3x3 window",
            row_offset,
            col_offset
        );
        self.window[((row_offset + 1) as usize, (col_offset + 1) as usize)]
    }

    /// Glyph in the centre cell
    pub fn center(&self) -> Glyph {
        self.window[(1, 1)]
    }

    /// Heading shown in the centre, if any
    pub fn heading(&self) -> Option<Orientation> {
        match self.center() {
            Glyph::Heading(heading) => Some(heading),
            _ => None,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..3 {
            if r > 0 {
                writeln!(f)?;
            }
            for c in 0..3 {
                match self.window[(r, c)] {
                    Glyph::Neutral => write!(f, "{}", self.neutral)?,
                    glyph => write!(f, "{}", glyph)?,
                }
            }
        }
        Ok(())
    }
}

/// A source of observations
pub trait ObservationSource {
    /// Get the source name
    fn name(&self) -> &str;

    /// Next observation, `None` once the source is exhausted
    fn next_observation(&mut self) -> Result<Option<Observation>>;
}

/// Replays a fixed sequence of observations
#[derive(Debug, Clone)]
pub struct ScriptedObservations {
    name: String,
    queue: VecDeque<Observation>,
}

impl ScriptedObservations {
    /// Create a new scripted source
    pub fn new(name: &str, observations: Vec<Observation>) -> Self {
        ScriptedObservations {
            name: name.to_string(),
            queue: observations.into(),
        }
    }

    /// Parse every window with the given neutral glyph
    pub fn parse<S: AsRef<str>>(name: &str, windows: &[[S; 3]], neutral: char) -> Result<Self> {
        let observations = windows
            .iter()
            .map(|rows| Observation::parse(&rows[..], neutral))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, observations))
    }

    /// Observations not yet handed out
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl ObservationSource for ScriptedObservations {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_observation(&mut self) -> Result<Option<Observation>> {
        Ok(self.queue.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_heading() {
        let obs = Observation::from_rows(&["#.#", ".>.", "###"]).unwrap();
        assert_eq!(obs.heading(), Some(Orientation::Right));
        assert_eq!(obs.at(-1, -1), Glyph::Wall);
        assert_eq!(obs.at(-1, 0), Glyph::Open);
        assert_eq!(obs.at(0, 1), Glyph::Open);
        assert_eq!(obs.at(1, 0), Glyph::Wall);
    }

    #[test]
    fn test_parse_neutral_center() {
        let obs = Observation::from_rows(&["###", ".*.", "#=#"]).unwrap();
        assert_eq!(obs.center(), Glyph::Neutral);
        assert_eq!(obs.heading(), None);
        assert_eq!(obs.at(1, 0), Glyph::Wall);

        let custom = Observation::parse(&["###", ".?.", "###"], '?').unwrap();
        assert_eq!(custom.center(), Glyph::Neutral);
        assert!(Observation::parse(&["###", ".*.", "###"], '?').is_err());
    }

    #[test]
    fn test_rejects_malformed_windows() {
        assert!(Observation::from_rows(&["###", ".*."]).is_err());
        assert!(Observation::from_rows(&["###", ".*..", "###"]).is_err());
        assert!(Observation::from_rows(&["#x#", ".*.", "###"]).is_err());
        assert!(Observation::from_rows(&["###", "...", "###"]).is_err());
        assert!(Observation::from_rows(&["#^#", ".*.", "###"]).is_err());
    }

    #[test]
    fn test_display_round_trips_text() {
        let obs = Observation::from_rows(&["#.#", ".v.", "###"]).unwrap();
        assert_eq!(obs.to_string(), "#.#\n.v.\n###");
    }

    #[test]
    fn test_display_keeps_custom_neutral_glyph() {
        let obs = Observation::parse(&["#.#", ".?.", "###"], '?').unwrap();
        assert_eq!(obs.to_string(), "#.#\n.?.\n###");

        let rows: Vec<String> = obs.to_string().lines().map(str::to_string).collect();
        assert_eq!(Observation::parse(&rows[..], '?').unwrap(), obs);
        assert_eq!(Glyph::Neutral.to_string(), "*");
    }

    #[test]
    fn test_scripted_source_drains_in_order() {
        let mut source = ScriptedObservations::parse(
            "script",
            &[["###", ".^.", "###"], ["#.#", ".*.", "###"]],
            DEFAULT_NEUTRAL_GLYPH,
        )
        .unwrap();
        assert_eq!(source.name(), "script");
        assert_eq!(source.remaining(), 2);

        let first = source.next_observation().unwrap().unwrap();
        assert_eq!(first.heading(), Some(Orientation::Up));
        let second = source.next_observation().unwrap().unwrap();
        assert_eq!(second.center(), Glyph::Neutral);
        assert!(source.next_observation().unwrap().is_none());
    }

    #[test]
    fn test_glyph_matches_cells() {
        assert!(Glyph::Open.matches(Cell::Open));
        assert!(Glyph::Wall.matches(Cell::Wall));
        assert!(!Glyph::Open.matches(Cell::Wall));
        assert!(!Glyph::Neutral.matches(Cell::Open));
    }
}
