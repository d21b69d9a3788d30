//! Core Connect Four game logic: board, player tokens, win detection, and the
//! session that sequences drops, win checks and turn changes.

mod board;
mod player;
mod session;
pub mod win;

pub use board::{Board, Cell, Placement, COLS, ROWS};
pub use player::Player;
pub use session::{GameOutcome, GameSession, MoveOutcome};
pub use win::Axis;
