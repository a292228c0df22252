// Errors surfaced in the form's error region

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoryError {
    /// Blank prompt, caught before any request is made
    #[error("Please enter a story prompt")]
    EmptyPrompt,
    /// The server answered with an `error` field
    #[error("Error: {0}")]
    Server(String),
    /// The request failed or the reply was not usable JSON
    #[error("Error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for StoryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
