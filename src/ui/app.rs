use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, info, warn};

use super::animation::DropAnimation;
use super::game_view::{self, BoardOverlay};
use crate::config::AppConfig;
use crate::error::MoveError;
use crate::game::{win, GameSession, MoveOutcome, COLS};

pub struct App {
    session: GameSession,
    config: AppConfig,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    animation: Option<DropAnimation>,
    winning_line: Vec<(usize, usize)>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App {
            session: GameSession::new(),
            selected_column: start_column(&config),
            config,
            should_quit: false,
            message: None,
            animation: None,
            winning_line: Vec::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn selected_column(&self) -> usize {
        self.selected_column
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let poll = Duration::from_millis(self.config.ui.poll_interval_ms);
        loop {
            terminal.draw(|f| self.render(f, Instant::now()))?;

            if self.should_quit {
                break;
            }

            if event::poll(poll)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, Instant::now());
                    }
                }
            }
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Finish a drop animation once it has run its course
    pub fn tick(&mut self, now: Instant) {
        if let Some(anim) = self.animation {
            if anim.is_finished(now) {
                self.animation = None;
                self.resolve_move();
            }
        }
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='7') => {
                self.selected_column = (c as usize) - ('1' as usize);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_selected(now);
            }
            KeyCode::Char('r') => {
                self.session.reset();
                self.animation = None;
                self.winning_line.clear();
                self.selected_column = start_column(&self.config);
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    fn drop_selected(&mut self, now: Instant) {
        // Input is refused until the falling piece lands
        if self.animation.is_some() {
            return;
        }

        let player = self.session.current_player();
        match self.session.drop_piece(self.selected_column) {
            Ok(placement) => {
                self.message = None;
                let step = Duration::from_millis(self.config.ui.drop_step_ms);
                self.animation = Some(DropAnimation::new(placement, player, now, step));
            }
            Err(MoveError::ColumnFull { column }) => {
                self.message = Some(format!("Column {} is full!", column + 1));
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            Err(err) => {
                debug!(%err, "drop ignored");
            }
        }
    }

    fn resolve_move(&mut self) {
        match self.session.resolve() {
            Ok(MoveOutcome::Win {
                player, placement, ..
            }) => {
                let name = game_view::player_name(&self.config.players, player);
                info!(player = name, "winner announced");
                if self.config.ui.highlight_win {
                    self.winning_line =
                        win::winning_line(self.session.board(), placement.row, placement.column);
                }
                self.message = Some(format!("{name} wins! Press 'r' to play again."));
            }
            Ok(MoveOutcome::Draw) => {
                self.message = Some("It's a draw! Press 'r' to play again.".to_string());
            }
            Ok(MoveOutcome::Continue { .. }) => {}
            Err(err) => warn!(%err, "nothing to resolve after animation"),
        }
    }

    /// Render the UI
    pub fn render(&self, frame: &mut ratatui::Frame, now: Instant) {
        let overlay = match self.animation {
            Some(anim) => {
                let p = anim.placement();
                BoardOverlay {
                    falling: Some((anim.current_row(now), p.column, anim.player())),
                    hidden: Some((p.row, p.column)),
                    highlight: &[],
                }
            }
            None => BoardOverlay {
                highlight: &self.winning_line,
                ..BoardOverlay::default()
            },
        };

        game_view::render(
            frame,
            &self.session,
            &self.config.players,
            self.selected_column,
            &self.message,
            &overlay,
        );
    }
}

/// Configured starting column, kept on the board
fn start_column(config: &AppConfig) -> usize {
    config.ui.start_column.min(COLS - 1)
}

impl Default for App {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
