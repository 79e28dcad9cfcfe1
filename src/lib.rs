//! Timed word-guessing game.
//!
//! [`game::GameEngine`] owns the shuffled word queue, the score and the
//! countdown. A presentation layer observes its state channels, forwards skip
//! and correct intents, acknowledges the end of the game and disposes the
//! engine when it is done with it.

pub mod config;
pub mod console;
pub mod game;
pub mod models;
pub mod scheduler;
pub mod utils;
