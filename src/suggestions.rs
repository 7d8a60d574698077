use crate::settings::Settings;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Number of mappings the prompt asks the model for.
pub const SUGGESTION_TARGET: usize = 5;

/// Environment variable overriding the configured suggestion endpoint.
pub const SUGGESTION_URL_ENV: &str = "GF_SUGGEST_URL";

const SUGGESTION_PROMPT: &str = "You are an assistant that suggests useful gesture mappings \
for a new user of a gesture-based application.\n\n\
Generate a list of 5 common and useful gesture mappings, including the gesture name, the \
action it performs, and a brief description of what the gesture does.\n\n\
Each mapping should be distinct and practical for common computer tasks like volume control, \
screen brightness, window switching, etc.\n\n\
The response must be a valid JSON array of objects with the string fields \"gesture\", \
\"action\" and \"description\", and nothing else.";

/// A transient candidate mapping proposed by the model. Not yet a record;
/// accepting one mints a `GestureMapping`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AISuggestion {
    pub gesture: String,
    pub action: String,
    pub description: String,
}

pub trait SuggestionTransport: Send + Sync {
    /// Send the prompt to the model and return the raw response body.
    fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}

pub struct HttpSuggestionTransport {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpSuggestionTransport {
    pub fn new(endpoint: String) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("gesture-flow suggestion client")
            .build()?;
        Ok(Self { client, endpoint })
    }
}

impl SuggestionTransport for HttpSuggestionTransport {
    fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .context("send suggestion request")?;
        if !resp.status().is_success() {
            bail!("http status {}", resp.status());
        }
        resp.text().context("read suggestion response")
    }
}

/// Parse and check a model response. All-or-nothing: malformed JSON, an
/// empty array, or any empty field fails the whole batch.
pub fn parse_suggestions(body: &str) -> anyhow::Result<Vec<AISuggestion>> {
    let suggestions: Vec<AISuggestion> =
        serde_json::from_str(body.trim()).context("parse suggestion response")?;
    if suggestions.is_empty() {
        bail!("model returned no suggestions");
    }
    for (idx, suggestion) in suggestions.iter().enumerate() {
        if suggestion.gesture.trim().is_empty()
            || suggestion.action.trim().is_empty()
            || suggestion.description.trim().is_empty()
        {
            bail!("suggestion {idx} has an empty field");
        }
    }
    Ok(suggestions)
}

/// One-shot pass-through to the model. No retry, no caching.
pub struct SuggestionGateway {
    transport: Box<dyn SuggestionTransport>,
}

impl SuggestionGateway {
    pub fn new(transport: Box<dyn SuggestionTransport>) -> Self {
        Self { transport }
    }

    /// Build a gateway for the configured endpoint. `GF_SUGGEST_URL` wins
    /// over the settings file.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let endpoint = std::env::var(SUGGESTION_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| settings.suggestion_endpoint.clone())
            .ok_or_else(|| anyhow::anyhow!("no suggestion endpoint configured"))?;
        Ok(Self::new(Box::new(HttpSuggestionTransport::new(endpoint)?)))
    }

    pub fn fetch_suggestions(&self) -> anyhow::Result<Vec<AISuggestion>> {
        let body = self.transport.complete(SUGGESTION_PROMPT)?;
        parse_suggestions(&body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Ready(Vec<AISuggestion>),
    Failed(String),
}

/// Runs the gateway call on a background thread so the panel stays
/// responsive. At most one fetch is in flight; the outcome, success or
/// failure, always clears the loading state.
pub struct SuggestionFetcher {
    state: Arc<Mutex<FetchState>>,
}

impl Default for SuggestionFetcher {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(FetchState::Idle)),
        }
    }
}

impl SuggestionFetcher {
    pub fn is_loading(&self) -> bool {
        self.state
            .lock()
            .map(|state| matches!(*state, FetchState::Loading))
            .unwrap_or(false)
    }

    /// Kick off a fetch unless one is already in flight.
    pub fn begin(&self, gateway: Arc<SuggestionGateway>) {
        match self.state.lock() {
            Ok(mut state) => {
                if matches!(*state, FetchState::Loading) {
                    return;
                }
                *state = FetchState::Loading;
            }
            Err(_) => return,
        }
        let state = Arc::clone(&self.state);
        thread::spawn(move || {
            let outcome = match gateway.fetch_suggestions() {
                Ok(suggestions) => FetchState::Ready(suggestions),
                Err(err) => {
                    tracing::warn!(?err, "suggestion fetch failed");
                    FetchState::Failed(err.to_string())
                }
            };
            if let Ok(mut guard) = state.lock() {
                *guard = outcome;
            }
        });
    }

    /// Take a finished outcome, resetting to Idle. Returns `None` while
    /// idle or still loading.
    pub fn take_outcome(&self) -> Option<Result<Vec<AISuggestion>, String>> {
        let mut guard = self.state.lock().ok()?;
        let outcome = match &*guard {
            FetchState::Ready(suggestions) => Ok(suggestions.clone()),
            FetchState::Failed(message) => Err(message.clone()),
            FetchState::Idle | FetchState::Loading => return None,
        };
        *guard = FetchState::Idle;
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_mentions_target_count() {
        assert!(SUGGESTION_PROMPT.contains("5"));
    }

    #[test]
    fn empty_array_is_rejected() {
        assert!(parse_suggestions("[]").is_err());
    }
}
