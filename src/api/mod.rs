// Story server API client

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::error::StoryError;
use crate::models::{ExamplePrompt, GenerationRequest, GenerationResult, Story};

#[derive(Debug, Clone)]
pub struct StoryClient {
    base_url: String,
    client: Client,
}

impl StoryClient {
    pub fn new(base_url: &str, request_timeout: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = request_timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn example_prompts(&self) -> Result<Vec<ExamplePrompt>> {
        let url = format!("{}/example_prompts", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send example prompts request")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Failed to load example prompts: {status}");
        }

        let examples = response
            .json::<Vec<ExamplePrompt>>()
            .await
            .context("Failed to parse example prompts response")?;

        Ok(examples)
    }

    /// Send one generation request.
    ///
    /// The body is read as JSON whatever the HTTP status, since the server
    /// reports failures as `{"error": ...}` with a 4xx/5xx code.
    pub async fn generate_story(&self, request: &GenerationRequest) -> Result<Story, StoryError> {
        let url = format!("{}/generate_story", self.base_url);

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let result: GenerationResult = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(%status, error = %e, "unparseable generate_story reply");
            StoryError::Transport(format!("Invalid response from server ({status}): {e}"))
        })?;

        match result {
            GenerationResult::Success(story) => Ok(story),
            GenerationResult::Failure { error } => Err(StoryError::Server(error)),
        }
    }
}
