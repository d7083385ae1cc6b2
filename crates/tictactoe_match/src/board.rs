//! The 3x3 board: cell occupancy and terminal-position detection.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// The eight winning lines, checked rows first, then diagonals, then columns.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
];

/// The symbol a player places on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Mark {
    /// Cross, always held by seat A.
    X,
    /// Nought, always held by seat B.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Occupied by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// Reasons a placement can be refused by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PlaceError {
    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),
    /// The index is outside 0-8.
    #[display("Cell index {} is out of range (must be 0-8)", _0)]
    IndexOutOfRange(usize),
}

impl std::error::Error for PlaceError {}

/// Row-major 3x3 board with a running count of free cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
    free: usize,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
            free: CELL_COUNT,
        }
    }

    /// Places `mark` at `index`.
    ///
    /// # Errors
    ///
    /// Fails without touching the board if the index is out of range or the
    /// cell is already occupied.
    #[instrument(level = "trace", skip(self))]
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), PlaceError> {
        match self.cells.get(index) {
            None => Err(PlaceError::IndexOutOfRange(index)),
            Some(Cell::Occupied(_)) => Err(PlaceError::CellOccupied(index)),
            Some(Cell::Empty) => {
                self.cells[index] = Cell::Occupied(mark);
                self.free -= 1;
                Ok(())
            }
        }
    }

    /// Empties an occupied cell again. Only the search engine undoes moves.
    pub(crate) fn vacate(&mut self, index: usize) {
        if self.cells[index] != Cell::Empty {
            self.cells[index] = Cell::Empty;
            self.free += 1;
        }
    }

    /// Resets every cell to empty.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns the cell at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Number of empty cells.
    pub fn free_cells(&self) -> usize {
        self.free
    }

    /// Number of occupied cells.
    pub fn filled_cells(&self) -> usize {
        CELL_COUNT - self.free
    }

    /// Returns the mark owning a complete line, if any.
    ///
    /// Three empty cells compare equal to each other, so every line is
    /// required to start from an occupied cell before it can count.
    pub fn line_winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a].mark()?;
            (self.cells[b] == Cell::Occupied(mark) && self.cells[c] == Cell::Occupied(mark))
                .then_some(mark)
        })
    }

    /// True once every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.free == 0
    }

    /// True when the board is full or a line is complete.
    pub fn is_round_over(&self) -> bool {
        self.is_full() || self.line_winner().is_some()
    }

    /// Ascending indices of empty cells.
    pub fn available_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Empty cells show their 1-based number so a human can pick them.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, "{}", index + 1)?,
                    Cell::Occupied(mark) => write!(f, "{}", mark)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
