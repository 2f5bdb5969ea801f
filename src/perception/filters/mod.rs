//! Neighborhood matching between the maze and an observation window
//!
//! A candidate cell is consistent with an observation when its 3x3 maze
//! neighborhood agrees with the window. When the robot's heading is unknown the
//! window may be read as if the robot faced any of the four headings: the
//! window's frame is rotated by 0, 90, 180 or 270 degrees before comparing.

use crate::common::{Hypothesis, Orientation};
use crate::perception::maze::Maze;
use crate::perception::sensors::Observation;

/// Alignment order used when seeding without a heading
pub const SEED_ALIGNMENTS: [Orientation; 4] = [
    Orientation::Up,
    Orientation::Right,
    Orientation::Left,
    Orientation::Down,
];

/// Alignment order used when testing a shifted hypothesis
pub const SHIFT_ALIGNMENTS: [Orientation; 4] = [
    Orientation::Up,
    Orientation::Left,
    Orientation::Right,
    Orientation::Down,
];

/// Window cell `(row, col)`, relative to the centre, compared against maze
/// offset `(dx, dy)` when the window is read with the given alignment
pub fn window_offset(alignment: Orientation, dx: i32, dy: i32) -> (i32, i32) {
    match alignment {
        Orientation::Up => (dy, dx),
        Orientation::Right => (-dx, dy),
        Orientation::Down => (-dy, -dx),
        Orientation::Left => (dx, -dy),
    }
}

/// Matches maze neighborhoods against one observation
#[derive(Debug, Clone, Copy)]
pub struct NeighborhoodMatcher<'a> {
    maze: &'a Maze,
    observation: &'a Observation,
}

impl<'a> NeighborhoodMatcher<'a> {
    /// Create a new matcher
    pub fn new(maze: &'a Maze, observation: &'a Observation) -> Self {
        NeighborhoodMatcher { maze, observation }
    }

    /// Whether the neighborhood of `(x, y)` agrees with the window read under
    /// `alignment`. The centre never takes part in the comparison.
    pub fn matches(&self, x: i32, y: i32, alignment: Orientation) -> bool {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (row, col) = window_offset(alignment, dx, dy);
                let glyph = self.observation.at(row, col);
                match self.maze.cell(x + dx, y + dy) {
                    Some(cell) if glyph.matches(cell) => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Window read with no rotation
    pub fn matches_unrotated(&self, x: i32, y: i32) -> bool {
        self.matches(x, y, Orientation::Up)
    }

    /// Re-orient `hypothesis` under `alignment`: on a match the heading is
    /// turned by the alignment's quarter turns (Up 0, Right +1, Down +2, Left -1).
    pub fn reorient(&self, hypothesis: &Hypothesis, alignment: Orientation) -> Option<Hypothesis> {
        if self.matches(hypothesis.x(), hypothesis.y(), alignment) {
            Some(hypothesis.with_heading(hypothesis.heading().rotated(alignment.index())))
        } else {
            None
        }
    }

    /// First alignment in `order` that matches, as a re-oriented hypothesis
    pub fn first_match(
        &self,
        hypothesis: &Hypothesis,
        order: &[Orientation],
    ) -> Option<Hypothesis> {
        order
            .iter()
            .find_map(|&alignment| self.reorient(hypothesis, alignment))
    }
}
