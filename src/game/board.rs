use super::Player;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// Player owning this cell, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Concrete cell a column drop resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
}

/// The 6x7 grid. Row 0 is the top, row 5 is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position, `None` when out of range
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Lowest empty row in a column, scanning from the bottom up
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Drop a piece in a column, returns where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<Placement, MoveError> {
        if col >= COLS {
            return Err(MoveError::OutOfRange { column: col });
        }

        let row = self
            .lowest_empty_row(col)
            .ok_or(MoveError::ColumnFull { column: col })?;
        self.cells[row][col] = player.to_cell();

        Ok(Placement { row, column: col })
    }

    /// Put a piece directly on a cell, ignoring gravity. Used to set up
    /// positions; never overwrites an occupied cell.
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<(), MoveError> {
        match self.get(row, col) {
            None => Err(MoveError::CellOutOfRange { row, column: col }),
            Some(Cell::Empty) => {
                self.cells[row][col] = player.to_cell();
                Ok(())
            }
            Some(_) => Err(MoveError::CellOccupied { row, column: col }),
        }
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Columns that can still take a piece, left to right
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
