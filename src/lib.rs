//! An operating-system themed Flappy Bird for the terminal.
//!
//! The simulation (`game` and the modules it drives) is independent of the
//! terminal: it takes explicit commands, a play-field size and a random
//! source, and exposes read-only state for `render` and events for `sfx`.

pub mod collision;
pub mod color;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod particles;
pub mod physics;
pub mod render;
pub mod score;
pub mod sfx;
pub mod spawner;

pub use error::{Error, Result};
pub use game::{Command, Field, Game, GameEvent, Phase};
