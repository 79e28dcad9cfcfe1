use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of the engine's countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Running,
    /// Duration elapsed; no further ticks
    Finished,
    /// Countdown cancelled; engine ignores every further call
    Disposed,
}

/// Consistent copy of every observable channel, taken under one lock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub session_id: Uuid,
    pub word: String,
    pub score: i32,
    pub time_left: u32,
    pub time_left_text: String,
    pub game_finished: bool,
    pub countdown: CountdownState,
}
