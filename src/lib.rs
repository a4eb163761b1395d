//! Terminal snake for one player or two players on one keyboard.
//!
//! The simulation (`engine`, `food`, `snake`, `state`) is plain data plus
//! functions over it and never touches the terminal. `flow` layers the
//! menu/pause/game-over screens on top, `render` turns a session into a
//! drawable snapshot, and `term` + `game` are the crossterm front-end.

pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod flow;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod snake;
pub mod state;
pub mod term;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use flow::{Flow, Screen};
pub use state::{GameSession, Mode};

/// Board cell, `(x, y)` with the origin at the top left.
pub type Coords = (u16, u16);
