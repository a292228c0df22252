use serde::{Deserialize, Serialize};

pub const GENRES: &[&str] = &["fantasy", "sci-fi", "mystery", "adventure", "horror", "romance"];
pub const LENGTHS: &[&str] = &["short", "medium", "long"];

pub const DEFAULT_GENRE: &str = "fantasy";
pub const DEFAULT_LENGTH: &str = "short";
pub const INITIAL_PROMPT: &str = "A robot who falls in love with a human";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExamplePrompt {
    pub prompt: String,
    pub genre: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub genre: String,
    pub length: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Story {
    pub title: String,
    pub content: String,
}

impl Story {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Text written to the clipboard: title, blank line, content.
    pub fn clipboard_text(&self) -> String {
        format!("{}\n\n{}", self.title, self.content)
    }
}

/// Reply to `POST /generate_story`.
///
/// Any truthy `error` makes the reply a failure, even when `title`/`content`
/// are present too. A non-string error is shown as its JSON text.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(try_from = "RawGenerationReply")]
pub enum GenerationResult {
    Failure { error: String },
    Success(Story),
}

#[derive(Deserialize)]
struct RawGenerationReply {
    #[serde(default)]
    error: serde_json::Value,
    title: Option<String>,
    content: Option<String>,
}

fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl TryFrom<RawGenerationReply> for GenerationResult {
    type Error = String;

    fn try_from(raw: RawGenerationReply) -> Result<Self, Self::Error> {
        if is_truthy(&raw.error) {
            let error = match raw.error {
                serde_json::Value::String(message) => message,
                other => other.to_string(),
            };
            return Ok(Self::Failure { error });
        }
        match (raw.title, raw.content) {
            (Some(title), Some(content)) => Ok(Self::Success(Story { title, content })),
            _ => Err("reply has neither an error nor a title and content".to_string()),
        }
    }
}

/// The form inputs that feed a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub prompt: String,
    pub genre: String,
    pub length: String,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            prompt: INITIAL_PROMPT.to_string(),
            genre: DEFAULT_GENRE.to_string(),
            length: DEFAULT_LENGTH.to_string(),
        }
    }

    pub fn reset(&mut self) {
        self.prompt.clear();
        self.genre = DEFAULT_GENRE.to_string();
        self.length = DEFAULT_LENGTH.to_string();
    }

    /// Build a request from the current values, or `None` if the trimmed
    /// prompt is empty.
    pub fn to_request(&self) -> Option<GenerationRequest> {
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return None;
        }
        Some(GenerationRequest {
            prompt: prompt.to_string(),
            genre: self.genre.clone(),
            length: self.length.clone(),
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Step `current` through `options`, wrapping at both ends. A value that is
/// not in the list (e.g. an example's unknown genre) starts from the first
/// option.
pub fn cycle_option(options: &[&str], current: &str, forward: bool) -> String {
    if options.is_empty() {
        return current.to_string();
    }
    let next = match options.iter().position(|o| *o == current) {
        Some(i) if forward => (i + 1) % options.len(),
        Some(i) => (i + options.len() - 1) % options.len(),
        None => 0,
    };
    options[next].to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub server_url: String,
    /// Seconds; no client-side timeout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout: None,
            log_level: default_log_level(),
            theme: ThemeConfig::default(),
        }
    }
}

#[allow(clippy::struct_field_names)]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThemeConfig {
    pub accent_color: String,
    pub error_color: String,
    pub border_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_color: "magenta".to_string(),
            error_color: "red".to_string(),
            border_color: "cyan".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_state_new() {
        let form = FormState::new();
        assert_eq!(form.prompt, "A robot who falls in love with a human");
        assert_eq!(form.genre, "fantasy");
        assert_eq!(form.length, "short");
    }

    #[test]
    fn test_form_state_reset() {
        let mut form = FormState {
            prompt: "Something".to_string(),
            genre: "horror".to_string(),
            length: "long".to_string(),
        };
        form.reset();
        assert_eq!(form.prompt, "");
        assert_eq!(form.genre, "fantasy");
        assert_eq!(form.length, "short");
    }

    #[test]
    fn test_to_request_trims_prompt() {
        let form = FormState {
            prompt: "  A lonely lighthouse  \n".to_string(),
            genre: "mystery".to_string(),
            length: "medium".to_string(),
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.prompt, "A lonely lighthouse");
        assert_eq!(request.genre, "mystery");
        assert_eq!(request.length, "medium");
    }

    #[test]
    fn test_to_request_rejects_blank_prompts() {
        for prompt in ["", " ", "\t\n", "   \r\n  "] {
            let form = FormState {
                prompt: prompt.to_string(),
                ..FormState::new()
            };
            assert!(form.to_request().is_none(), "prompt {prompt:?} should be rejected");
        }
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerationRequest {
            prompt: "A dragon".to_string(),
            genre: "fantasy".to_string(),
            length: "short".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"prompt": "A dragon", "genre": "fantasy", "length": "short"})
        );
    }

    #[test]
    fn test_result_success_ignores_extra_fields() {
        let json = r#"{"title":"T","content":"C","prompt":"p","genre":"fantasy","length":"short"}"#;
        let result: GenerationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result, GenerationResult::Success(Story::new("T", "C")));
    }

    #[test]
    fn test_result_error_wins() {
        let json = r#"{"error":"boom","title":"T","content":"C"}"#;
        let result: GenerationResult = serde_json::from_str(json).unwrap();
        assert_eq!(
            result,
            GenerationResult::Failure {
                error: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_result_null_error_is_success() {
        let json = r#"{"error":null,"title":"T","content":"C"}"#;
        let result: GenerationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result, GenerationResult::Success(Story::new("T", "C")));
    }

    #[test]
    fn test_result_non_string_error_is_failure() {
        let json = r#"{"error":{"code":500},"title":"T","content":"C"}"#;
        let result: GenerationResult = serde_json::from_str(json).unwrap();
        assert_eq!(
            result,
            GenerationResult::Failure {
                error: r#"{"code":500}"#.to_string()
            }
        );

        let result: GenerationResult = serde_json::from_str(r#"{"error":true}"#).unwrap();
        assert_eq!(
            result,
            GenerationResult::Failure {
                error: "true".to_string()
            }
        );
    }

    #[test]
    fn test_result_falsy_error_is_success() {
        for error in [r#""""#, "false", "0"] {
            let json = format!(r#"{{"error":{error},"title":"T","content":"C"}}"#);
            let result: GenerationResult = serde_json::from_str(&json).unwrap();
            assert_eq!(result, GenerationResult::Success(Story::new("T", "C")), "error {error}");
        }
    }

    #[test]
    fn test_result_missing_fields_is_rejected() {
        let result: Result<GenerationResult, _> = serde_json::from_str(r#"{"title":"only"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_clipboard_text() {
        assert_eq!(Story::new("X", "Y").clipboard_text(), "X\n\nY");
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.server_url, "http://localhost:5000");
        assert!(config.request_timeout.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_cycle_option() {
        assert_eq!(cycle_option(LENGTHS, "short", true), "medium");
        assert_eq!(cycle_option(LENGTHS, "long", true), "short");
        assert_eq!(cycle_option(LENGTHS, "short", false), "long");
        assert_eq!(cycle_option(GENRES, "steampunk", true), "fantasy");
    }
}
