use tracing::{debug, info};

use super::{win, Axis, Board, Cell, Placement, Player};
use crate::error::MoveError;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Result of resolving the last drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No win; the turn passed to `next`.
    Continue { next: Player },
    Win {
        player: Player,
        axis: Axis,
        placement: Placement,
    },
    /// The board filled up without a winner.
    Draw,
}

/// One game: grid, player to move, and the drop awaiting resolution.
///
/// A drop is resolved by [`GameSession::advance_turn`],
/// [`GameSession::resolve`] or [`GameSession::reset`]. Until then further
/// drops are rejected, so exactly one cell changes per turn.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    pending: Option<Placement>,
    outcome: Option<GameOutcome>,
    move_count: usize,
}

impl GameSession {
    /// Create a session with an empty board and Red to move
    pub fn new() -> Self {
        Self::with_board(Board::new(), Player::FIRST)
    }

    /// Start from an arbitrary position
    pub fn with_board(board: Board, current_player: Player) -> Self {
        GameSession {
            board,
            current_player,
            pending: None,
            outcome: None,
            move_count: 0,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cell contents, `None` when out of range
    pub fn cell_at(&self, row: usize, column: usize) -> Option<Cell> {
        self.board.get(row, column)
    }

    /// Drop awaiting resolution, if any
    pub fn pending(&self) -> Option<Placement> {
        self.pending
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Drops accepted since the last reset
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// Drop the current player's piece into `column`.
    ///
    /// On any error the session is left untouched.
    pub fn drop_piece(&mut self, column: usize) -> Result<Placement, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.pending.is_some() {
            debug!(column, "drop rejected, previous move unresolved");
            return Err(MoveError::ResolutionPending);
        }

        let placement = self
            .board
            .drop_piece(column, self.current_player)
            .inspect_err(|err| debug!(column, %err, "drop rejected"))?;

        self.pending = Some(placement);
        self.move_count += 1;
        debug!(
            player = %self.current_player,
            row = placement.row,
            column = placement.column,
            "piece placed"
        );

        Ok(placement)
    }

    /// Whether the piece at `(row, column)` completes four in a row.
    pub fn check_winner(&self, row: usize, column: usize) -> bool {
        win::is_winning_move(&self.board, row, column)
    }

    /// Hand the move to the other player and clear the pending drop.
    ///
    /// Once the game is over the token stays with the winner.
    pub fn advance_turn(&mut self) {
        self.pending = None;
        if !self.is_over() {
            self.current_player = self.current_player.other();
        }
    }

    /// Resolve the pending drop: record a win or draw, otherwise advance
    /// the turn.
    pub fn resolve(&mut self) -> Result<MoveOutcome, MoveError> {
        let placement = self.pending.ok_or(MoveError::NothingPending)?;
        let player = self.current_player;

        if let Some(axis) = win::check_winner(&self.board, placement.row, placement.column) {
            self.pending = None;
            self.outcome = Some(GameOutcome::Winner(player));
            info!(%player, ?axis, moves = self.move_count, "game won");
            return Ok(MoveOutcome::Win {
                player,
                axis,
                placement,
            });
        }

        if self.board.is_full() {
            self.pending = None;
            self.outcome = Some(GameOutcome::Draw);
            info!(moves = self.move_count, "game drawn");
            return Ok(MoveOutcome::Draw);
        }

        self.advance_turn();
        Ok(MoveOutcome::Continue {
            next: self.current_player,
        })
    }

    /// Empty the board and give the first move back to Red
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("game reset");
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{COLS, ROWS};

    /// Drop and resolve in one go, the way a host without animation would.
    fn play(session: &mut GameSession, column: usize) -> MoveOutcome {
        session.drop_piece(column).unwrap();
        session.resolve().unwrap()
    }

    #[test]
    fn test_initial_state() {
        let session = GameSession::new();
        assert_eq!(session.current_player(), Player::Red);
        assert!(!session.is_over());
        assert_eq!(session.pending(), None);
        assert_eq!(session.board().legal_columns().len(), COLS);
    }

    #[test]
    fn test_drop_then_advance() {
        let mut session = GameSession::new();
        let placed = session.drop_piece(3).unwrap();

        assert_eq!(placed, Placement { row: 5, column: 3 });
        assert_eq!(session.cell_at(5, 3), Some(Cell::Red));
        assert_eq!(session.pending(), Some(placed));
        // Turn only changes once the host resolves the move
        assert_eq!(session.current_player(), Player::Red);

        session.advance_turn();
        assert_eq!(session.current_player(), Player::Yellow);
        assert_eq!(session.pending(), None);
    }

    #[test]
    fn test_second_drop_rejected_while_pending() {
        let mut session = GameSession::new();
        session.drop_piece(0).unwrap();
        let board = *session.board();

        assert_eq!(session.drop_piece(1), Err(MoveError::ResolutionPending));
        assert_eq!(*session.board(), board);
        assert_eq!(session.move_count(), 1);
    }

    #[test]
    fn test_column_full_leaves_session_unchanged() {
        let mut session = GameSession::new();
        for _ in 0..ROWS {
            play(&mut session, 0);
        }
        let before = session.clone();

        assert_eq!(
            session.drop_piece(0),
            Err(MoveError::ColumnFull { column: 0 })
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_out_of_range_column_rejected() {
        let mut session = GameSession::new();
        assert_eq!(
            session.drop_piece(COLS),
            Err(MoveError::OutOfRange { column: COLS })
        );
        assert_eq!(session.pending(), None);
        assert_eq!(session.cell_at(ROWS, 0), None);
    }

    #[test]
    fn test_resolve_without_drop() {
        let mut session = GameSession::new();
        assert_eq!(session.resolve(), Err(MoveError::NothingPending));
    }

    #[test]
    fn test_win_detection() {
        let mut session = GameSession::new();

        // Red builds the bottom row, Yellow stacks on top
        for col in 0..3 {
            play(&mut session, col);
            play(&mut session, col);
        }
        let outcome = play(&mut session, 3);

        assert_eq!(
            outcome,
            MoveOutcome::Win {
                player: Player::Red,
                axis: Axis::Horizontal,
                placement: Placement { row: 5, column: 3 },
            }
        );
        assert_eq!(session.outcome(), Some(GameOutcome::Winner(Player::Red)));
        // Winner stays current
        assert_eq!(session.current_player(), Player::Red);
        assert_eq!(session.drop_piece(4), Err(MoveError::GameOver));
    }

    #[test]
    fn test_check_winner_matches_resolve() {
        let mut board = Board::new();
        for row in [5, 4, 3] {
            board.place(row, 6, Player::Yellow).unwrap();
        }
        let mut session = GameSession::with_board(board, Player::Yellow);
        let placed = session.drop_piece(6).unwrap();

        assert!(session.check_winner(placed.row, placed.column));
        assert!(matches!(
            session.resolve(),
            Ok(MoveOutcome::Win {
                axis: Axis::Vertical,
                ..
            })
        ));
    }

    #[test]
    fn test_draw() {
        // Columns filled in pairs of rows so no line of four forms
        let mut board = Board::new();
        let owner = |row: usize, col: usize| {
            if ((row / 2) + col) % 2 == 0 {
                Player::Red
            } else {
                Player::Yellow
            }
        };
        for row in 0..ROWS {
            for col in 0..COLS {
                if (row, col) != (0, 0) {
                    board.place(row, col, owner(row, col)).unwrap();
                }
            }
        }

        let mut session = GameSession::with_board(board, owner(0, 0));
        let placed = session.drop_piece(0).unwrap();
        assert_eq!(placed, Placement { row: 0, column: 0 });
        assert!(!session.check_winner(0, 0));

        assert_eq!(session.resolve(), Ok(MoveOutcome::Draw));
        assert_eq!(session.outcome(), Some(GameOutcome::Draw));
        assert_eq!(session.drop_piece(1), Err(MoveError::GameOver));
    }

    #[test]
    fn test_advance_turn_after_win_keeps_winner() {
        let mut session = GameSession::new();
        for col in 0..3 {
            play(&mut session, col);
            play(&mut session, col);
        }
        play(&mut session, 3);

        session.advance_turn();
        assert_eq!(session.current_player(), Player::Red);
        assert_eq!(session.outcome(), Some(GameOutcome::Winner(Player::Red)));
    }

    #[test]
    fn test_reset_after_win() {
        let mut session = GameSession::new();
        for col in 0..3 {
            play(&mut session, col);
            play(&mut session, col);
        }
        play(&mut session, 3);
        assert!(session.is_over());

        session.reset();
        assert_eq!(session, GameSession::new());

        // Idempotent
        session.reset();
        assert_eq!(session, GameSession::new());
    }

    #[test]
    fn test_reset_clears_pending_drop() {
        let mut session = GameSession::new();
        session.drop_piece(2).unwrap();
        session.reset();

        assert_eq!(session.pending(), None);
        assert_eq!(session.board().piece_count(), 0);
        assert!(session.drop_piece(2).is_ok());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = GameSession::new();
        let b = GameSession::new();
        play(&mut a, 0);

        assert_eq!(b.cell_at(5, 0), Some(Cell::Empty));
        assert_eq!(b.current_player(), Player::Red);
    }
}
