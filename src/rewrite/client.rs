use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::response::parse_completion;
use crate::error::ApiError;
use crate::models::RewriteResult;

const CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const SYSTEM_PROMPT: &str =
    "You are a creative songwriter who can rewrite lyrics while maintaining their essence.";

pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            top_p: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub seed: u64,
}

impl ChatRequest {
    pub fn new(settings: &GenerationSettings, prompt: &str, seed: u64) -> Self {
        Self {
            model: settings.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            top_p: settings.top_p,
            seed,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Something that turns a chat request into completion text.
pub trait CompletionBackend {
    fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// OpenAI-compatible chat completions served by Groq.
pub struct GroqBackend {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl GroqBackend {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            api_key,
        }
    }
}

impl CompletionBackend for GroqBackend {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()?;

        if !response.status().is_success() {
            return Err(ApiError::from_response("chat/completions", response).into());
        }

        let body: ChatResponse = response.json()?;
        first_choice_text(body)
    }
}

fn first_choice_text(body: ChatResponse) -> Result<String> {
    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ApiError::EmptyCompletion)?;
    Ok(content.trim().to_string())
}

pub struct RewriteClient<B> {
    backend: B,
    settings: GenerationSettings,
}

impl<B: CompletionBackend> RewriteClient<B> {
    pub fn new(backend: B, settings: GenerationSettings) -> Self {
        Self { backend, settings }
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// One completion call. Failures yield `RewriteResult::failed()` instead of an error.
    pub fn generate(&self, prompt: &str, seed: u64) -> RewriteResult {
        info!(model = %self.settings.model, seed, "Generating new lyrics");
        let request = ChatRequest::new(&self.settings, prompt, seed);

        match self.backend.complete(&request) {
            Ok(text) => {
                let result = parse_completion(&text);
                info!(genre = %result.genre, "Successfully generated new lyrics");
                result
            }
            Err(e) => {
                error!("Error generating lyrics: {e:#}");
                RewriteResult::failed()
            }
        }
    }
}
