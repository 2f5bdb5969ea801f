//! Common utilities and types for Prometheus grid localization

use std::fmt;

/// Heading of the robot in the maze frame.
///
/// Variants are ordered clockwise, so adding one is a quarter turn to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Orientation {
    /// All headings in clockwise order starting from `Up`
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
    ];

    /// Numeric encoding (0-3)
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Heading for an encoding, wrapped modulo 4
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(4) as usize]
    }

    /// Turn by a number of clockwise quarter turns (negative turns counter-clockwise)
    pub fn rotated(self, quarter_turns: i32) -> Self {
        Self::from_index(self.index() + quarter_turns)
    }

    /// Grid step `(dx, dy)` taken when moving forward with this heading
    pub fn step(self) -> (i32, i32) {
        match self {
            Orientation::Left => (-1, 0),
            Orientation::Up => (0, -1),
            Orientation::Right => (1, 0),
            Orientation::Down => (0, 1),
        }
    }

    /// Decode a heading glyph (`^ > v <`)
    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '^' => Some(Orientation::Up),
            '>' => Some(Orientation::Right),
            'v' => Some(Orientation::Down),
            '<' => Some(Orientation::Left),
            _ => None,
        }
    }

    /// Glyph used for this heading in observations
    pub fn glyph(self) -> char {
        match self {
            Orientation::Up => '^',
            Orientation::Right => '>',
            Orientation::Down => 'v',
            Orientation::Left => '<',
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A single localization hypothesis: a maze cell plus a heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hypothesis {
    x: i32,
    y: i32,
    heading: Orientation,
}

impl Hypothesis {
    /// Create a new hypothesis
    pub fn new(x: i32, y: i32, heading: Orientation) -> Self {
        Hypothesis { x, y, heading }
    }

    /// Column of the hypothesised cell
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Row of the hypothesised cell
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Hypothesised heading
    pub fn heading(&self) -> Orientation {
        self.heading
    }

    /// Same cell, different heading
    pub fn with_heading(&self, heading: Orientation) -> Self {
        Hypothesis::new(self.x, self.y, heading)
    }

    /// The hypothesis one cell ahead along its heading
    pub fn advanced(&self) -> Self {
        let (dx, dy) = self.heading.step();
        Hypothesis::new(self.x + dx, self.y + dy, self.heading)
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.x, self.y, self.heading)
    }
}
