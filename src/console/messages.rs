use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::GameSnapshot;

/// Intents read from the player, one per line.
///
/// Accepts short keywords (`c`, `s`, `q`), full words, or a JSON object such as
/// `{"type":"correct"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    Correct,
    Skip,
    Quit,
}

#[derive(Debug, Error)]
pub enum ParseIntentError {
    #[error("empty input")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("invalid intent message: {0}")]
    Json(#[from] serde_json::Error),
}

impl Intent {
    pub fn parse(line: &str) -> Result<Self, ParseIntentError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ParseIntentError::Empty);
        }
        if line.starts_with('{') {
            return Ok(serde_json::from_str(line)?);
        }

        match line.to_lowercase().as_str() {
            "c" | "correct" | "got it" => Ok(Intent::Correct),
            "s" | "skip" => Ok(Intent::Skip),
            "q" | "quit" | "exit" => Ok(Intent::Quit),
            _ => Err(ParseIntentError::Unknown(line.to_string())),
        }
    }
}

/// Lines written to stdout for whatever renders the game
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConsoleEvent {
    State(GameSnapshot),
    GameOver { final_score: i32 },
}
