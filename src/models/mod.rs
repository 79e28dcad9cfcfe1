pub mod game;

pub use game::{CountdownState, GameSnapshot};
