// Background work spawned from the UI loop. Tasks only report back through
// AppEvent; they never touch App directly.

use anyhow::{anyhow, Context, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::api::StoryClient;
use crate::app::App;
use crate::events::AppEvent;

pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

#[cfg_attr(test, mockall::automock)]
pub trait ClipboardWriter: Send {
    fn set_text(&mut self, text: String) -> Result<()>;
}

/// The OS clipboard. One handle is opened on first use and kept for the life
/// of the app; on X11 and Wayland the copied text only stays available while
/// its owner is alive. Clones share the handle.
#[derive(Clone, Default)]
pub struct SystemClipboard {
    handle: Arc<Mutex<Option<arboard::Clipboard>>>,
}

impl ClipboardWriter for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<()> {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_| anyhow!("Clipboard lock poisoned"))?;
        if guard.is_none() {
            *guard = Some(arboard::Clipboard::new().context("Failed to open clipboard")?);
        }
        if let Some(clipboard) = guard.as_mut() {
            clipboard.set_text(text).context("Failed to write clipboard")?;
        }
        Ok(())
    }
}

/// Fetch the example prompts once. Failures only reach the log.
pub fn load_examples(client: &StoryClient, event_tx: &UnboundedSender<AppEvent>) -> JoinHandle<()> {
    let client = client.clone();
    let tx = event_tx.clone();

    tokio::spawn(async move {
        match client.example_prompts().await {
            Ok(examples) => {
                tracing::info!(count = examples.len(), "loaded example prompts");
                let _ = tx.send(AppEvent::ExamplesLoaded(examples));
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "Error loading example prompts");
            }
        }
    })
}

/// Handle a form submission. Returns the request task, or `None` when the
/// prompt failed validation and nothing was sent.
pub fn submit_story(
    app: &mut App,
    client: &StoryClient,
    event_tx: &UnboundedSender<AppEvent>,
) -> Option<JoinHandle<()>> {
    let Some(request) = app.submit() else {
        tracing::debug!("rejected submission with empty prompt");
        return None;
    };

    tracing::info!(
        genre = %request.genre,
        length = %request.length,
        "requesting story"
    );

    let client = client.clone();
    let tx = event_tx.clone();

    Some(tokio::spawn(async move {
        let result = client.generate_story(&request).await;
        match &result {
            Ok(story) => tracing::info!(title = %story.title, "story generated"),
            Err(e) => tracing::warn!(error = %e, "story generation failed"),
        }
        let _ = tx.send(AppEvent::StoryFinished(result));
    }))
}

/// Copy the displayed story. On success reports `Copied`, then
/// `CopyFeedbackExpired` once the confirmation window has passed.
pub fn copy_story<C>(
    app: &mut App,
    mut clipboard: C,
    event_tx: &UnboundedSender<AppEvent>,
) -> Option<JoinHandle<()>>
where
    C: ClipboardWriter + 'static,
{
    let (seq, text) = app.begin_copy()?;
    let tx = event_tx.clone();

    Some(tokio::spawn(async move {
        let written = tokio::task::spawn_blocking(move || clipboard.set_text(text)).await;
        match written {
            Ok(Ok(())) => {
                let _ = tx.send(AppEvent::Copied(seq));
                tokio::time::sleep(COPY_FEEDBACK).await;
                let _ = tx.send(AppEvent::CopyFeedbackExpired(seq));
            }
            Ok(Err(e)) => tracing::warn!(error = %format!("{e:#}"), "copy to clipboard failed"),
            Err(e) => tracing::warn!(error = %e, "clipboard task panicked"),
        }
    }))
}
