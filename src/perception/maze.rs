//! Static maze map
//!
//! The maze is a rectangular grid of open and wall cells, addressed by
//! `(x, y)` where `x` is the column and `y` the row. It is built once and never
//! mutated, so the localization engine can borrow from it freely.

use crate::error::{LocalizationError, Result};
use nalgebra::DMatrix;

/// Glyph for an open cell in text mazes and observations
pub const OPEN_GLYPH: char = '.';

/// Glyph for a wall cell in text mazes and observations
pub const WALL_GLYPH: char = '#';

/// Occupancy of a single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Open,
    Wall,
}

impl Cell {
    /// Anything other than `.` is treated as wall
    pub fn from_char(c: char) -> Self {
        if c == OPEN_GLYPH {
            Cell::Open
        } else {
            Cell::Wall
        }
    }

    /// Text glyph for this cell
    pub fn to_char(self) -> char {
        match self {
            Cell::Open => OPEN_GLYPH,
            Cell::Wall => WALL_GLYPH,
        }
    }
}

/// An immutable maze bordered by walls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    cells: DMatrix<Cell>,
}

impl Maze {
    /// Create a maze from row-major cells
    pub fn new(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(LocalizationError::InvalidMaze(format!(
                "Maze must have at least one row and column, got {}x{}",
                rows, cols
            )));
        }
        if cells.len() != rows * cols {
            return Err(LocalizationError::InvalidMaze(format!(
                "Expected {} cells for a {}x{} maze, got {}",
                rows * cols,
                rows,
                cols,
                cells.len()
            )));
        }

        let maze = Maze {
            cells: DMatrix::from_row_slice(rows, cols, &cells),
        };
        maze.check_border()?;
        Ok(maze)
    }

    /// Create a maze from text rows (`.` open, anything else wall)
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let width = row.chars().count();
            if width != cols {
                return Err(LocalizationError::InvalidMaze(format!(
                    "Row {} has {} cells, expected {}",
                    y, width, cols
                )));
            }
            cells.extend(row.chars().map(Cell::from_char));
        }

        Maze::new(rows.len(), cols, cells)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Cell at `(x, y)`, `None` when outside the maze
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get((y as usize, x as usize)).copied()
    }

    /// Whether `(x, y)` is inside the maze and open
    pub fn is_open(&self, x: i32, y: i32) -> bool {
        self.cell(x, y) == Some(Cell::Open)
    }

    /// Open cells as `(x, y)`, row by row
    pub fn open_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.rows()).flat_map(move |y| {
            (0..self.cols())
                .filter(move |&x| self.cells[(y, x)] == Cell::Open)
                .map(move |x| (x as i32, y as i32))
        })
    }

    /// Number of open cells
    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Open).count()
    }

    /// Neighborhood reads at `x±1, y±1` are unchecked by the filter, so no
    /// open cell may sit on the outer edge.
    fn check_border(&self) -> Result<()> {
        let last_row = self.rows() - 1;
        let last_col = self.cols() - 1;
        for (x, y) in self.open_cells() {
            let (x, y) = (x as usize, y as usize);
            if x == 0 || y == 0 || x == last_col || y == last_row {
                return Err(LocalizationError::InvalidMaze(format!(
                    "Open cell at ({}, {}) lies on the maze border",
                    x, y
                )));
            }
        }
        Ok(())
    }
}
