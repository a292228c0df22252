// Event types for async communication

use crate::error::StoryError;
use crate::models::{ExamplePrompt, Story};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Example prompts fetched at startup
    ExamplesLoaded(Vec<ExamplePrompt>),
    /// A generation request finished, successfully or not
    StoryFinished(Result<Story, StoryError>),
    /// The clipboard accepted a copy; carries the copy's sequence number
    Copied(u64),
    /// The "copied" confirmation window for that sequence number ended
    CopyFeedbackExpired(u64),
}
