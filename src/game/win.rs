//! Win detection around the most recently placed piece.
//!
//! Only lines through the given cell are examined. A new run of four can
//! only form through the piece that was just dropped, so there is no
//! full-board scan.

use super::{Board, Cell, COLS, ROWS};

/// Pieces in a row needed to win.
pub const WIN_LENGTH: usize = 4;

/// One of the four lines through a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vertical,
    Horizontal,
    /// Top-left to bottom-right, `\`
    DiagonalDown,
    /// Bottom-left to top-right, `/`
    DiagonalUp,
}

impl Axis {
    /// Checked in this order; the first winning axis is reported.
    pub const ALL: [Axis; 4] = [
        Axis::Vertical,
        Axis::Horizontal,
        Axis::DiagonalDown,
        Axis::DiagonalUp,
    ];

    /// The two opposite `(row, col)` steps making up this axis
    pub fn directions(self) -> [(isize, isize); 2] {
        match self {
            Axis::Vertical => [(-1, 0), (1, 0)],
            Axis::Horizontal => [(0, -1), (0, 1)],
            Axis::DiagonalDown => [(-1, -1), (1, 1)],
            Axis::DiagonalUp => [(-1, 1), (1, -1)],
        }
    }
}

/// Step from `(row, col)` by `(dr, dc)`, `None` when that leaves the grid.
fn step(row: usize, col: usize, (dr, dc): (isize, isize)) -> Option<(usize, usize)> {
    let r = row.checked_add_signed(dr)?;
    let c = col.checked_add_signed(dc)?;
    (r < ROWS && c < COLS).then_some((r, c))
}

/// Cells matching `cell` walking away from `(row, col)` in one direction,
/// nearest first. Stops at the board edge or the first non-matching cell.
fn walk(
    board: &Board,
    row: usize,
    col: usize,
    cell: Cell,
    dir: (isize, isize),
) -> impl Iterator<Item = (usize, usize)> + '_ {
    std::iter::successors(step(row, col, dir), move |&(r, c)| step(r, c, dir))
        .take_while(move |&(r, c)| board.get(r, c) == Some(cell))
}

/// Length of the run through `(row, col)` along `axis`, including the
/// piece itself. Zero for an empty or out-of-range cell.
pub fn run_length(board: &Board, row: usize, col: usize, axis: Axis) -> usize {
    let cell = match board.get(row, col) {
        Some(cell) if !cell.is_empty() => cell,
        _ => return 0,
    };

    let [back, forward] = axis.directions();
    1 + walk(board, row, col, cell, back).count() + walk(board, row, col, cell, forward).count()
}

/// Axis on which the piece at `(row, col)` completes four in a row, if any.
pub fn check_winner(board: &Board, row: usize, col: usize) -> Option<Axis> {
    Axis::ALL
        .into_iter()
        .find(|&axis| run_length(board, row, col, axis) >= WIN_LENGTH)
}

/// Whether the piece at `(row, col)` wins.
pub fn is_winning_move(board: &Board, row: usize, col: usize) -> bool {
    check_winner(board, row, col).is_some()
}

/// Every cell of the winning run through `(row, col)`, ordered along the
/// axis. Empty when the piece does not win.
pub fn winning_line(board: &Board, row: usize, col: usize) -> Vec<(usize, usize)> {
    let Some(axis) = check_winner(board, row, col) else {
        return Vec::new();
    };
    let Some(cell) = board.get(row, col) else {
        return Vec::new();
    };

    let [back, forward] = axis.directions();
    let mut line: Vec<_> = walk(board, row, col, cell, back).collect();
    line.reverse();
    line.push((row, col));
    line.extend(walk(board, row, col, cell, forward));
    line
}
