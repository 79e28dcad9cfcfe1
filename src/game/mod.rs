pub mod engine;
pub mod observable;
pub mod words;

pub use engine::{GameEngine, GameObservers};
pub use observable::Observable;
pub use words::{WordQueue, VOCABULARY};
