//! Terminal host: renders the session, maps keys to columns, and animates
//! each drop before asking the session to resolve it.

mod animation;
mod app;
mod game_view;

pub use animation::DropAnimation;
pub use app::App;
