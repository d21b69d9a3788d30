//! # Connect Four
//!
//! A two-player Connect Four engine with a terminal host built on Ratatui.
//! The engine is synchronous and owns no timing; hosts drive it with column
//! drops and resolve each move when they are ready.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player tokens, win detection, session
//! - [`ui`] — Terminal UI: board view, drop animation, key handling
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — `tracing` subscriber setup
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
