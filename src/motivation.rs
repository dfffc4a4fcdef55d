//! One-line motivational text from an OpenAI-compatible chat completions
//! endpoint. Every failure path degrades to [`FALLBACK_SENTENCE`] at zero cost.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const FALLBACK_SENTENCE: &str = "Keep showing up. Consistency beats intensity.";
pub const PROMPT: &str =
    "Write one short, upbeat sentence to motivate someone before today's workout.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motivation {
    pub sentence: String,
    pub cost: f64,
}

impl Motivation {
    pub fn fallback() -> Self {
        Self {
            sentence: FALLBACK_SENTENCE.to_string(),
            cost: 0.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum MotivationError {
    #[error("no api key configured")]
    MissingKey,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0} from completion service")]
    Status(StatusCode),
    #[error("completion response had no text")]
    EmptyResponse,
}

/// USD per million tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            input_per_million: 0.15,
            output_per_million: 0.60,
        }
    }
}

impl Pricing {
    pub fn cost(&self, usage: &Usage) -> f64 {
        (usage.prompt_tokens as f64 * self.input_per_million
            + usage.completion_tokens as f64 * self.output_per_million)
            / 1_000_000.0
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
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

#[derive(Debug, Clone)]
pub struct Motivator {
    client: Client,
    api_base: String,
    model: String,
    pricing: Pricing,
}

impl Default for Motivator {
    fn default() -> Self {
        Self::new()
    }
}

impl Motivator {
    pub fn new() -> Self {
        Self {
            client: crate::program::source::default_client(),
            api_base: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            pricing: Pricing::default(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_pricing(mut self, pricing: Pricing) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, MotivationError> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Never fails; see [`Motivator::request`] for the fallible call.
    pub async fn motivate(&self, api_key: Option<&str>) -> Motivation {
        match self.request(api_key).await {
            Ok(motivation) => motivation,
            Err(MotivationError::MissingKey) => Motivation::fallback(),
            Err(err) => {
                warn!(error = %err, "motivation request failed, using fallback");
                Motivation::fallback()
            }
        }
    }

    pub async fn request(&self, api_key: Option<&str>) -> Result<Motivation, MotivationError> {
        let api_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(MotivationError::MissingKey)?;

        let url = format!("{}/chat/completions", self.api_base);
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": PROMPT }],
            "max_tokens": 60,
        });
        debug!(%url, model = %self.model, "requesting motivation");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MotivationError::Status(status));
        }

        let completion: CompletionResponse = response.json().await?;
        let sentence = completion
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(MotivationError::EmptyResponse)?;

        Ok(Motivation {
            sentence,
            cost: self.pricing.cost(&completion.usage),
        })
    }
}
