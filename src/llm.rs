//! Language model clients used by the turn loop.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use colloquy_core::Message;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ModelConfig;
use crate::error::{ColloquyError, Result};

/// Minimal abstraction around a chat completion provider.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends the role-tagged messages in order and returns the generated text.
    async fn complete_chat(&self, messages: &[Message]) -> Result<String>;
}

/// Picks a client for the configured provider.
pub fn build_model(cfg: &ModelConfig) -> Result<Arc<dyn LanguageModel>> {
    match cfg.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAIClient::from_config(cfg)?)),
        "stub" => Ok(StubModel::echo()),
        other => Err(ColloquyError::Configuration(format!(
            "unknown model provider `{other}`"
        ))),
    }
}

fn coalesce_error(status: reqwest::StatusCode, body: &str, provider: &str) -> ColloquyError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return ColloquyError::LanguageModel(format!("{provider} rate limit exceeded: {body}"));
    }
    ColloquyError::LanguageModel(format!("{provider} request failed with {status}: {body}"))
}

#[derive(Clone)]
pub struct OpenAIClient {
    http: reqwest::Client,
    model: String,
    api_key: String,
    base_url: String,
    organization: Option<String>,
    temperature: Option<f32>,
}

impl OpenAIClient {
    pub fn from_config(cfg: &ModelConfig) -> Result<Self> {
        let api_key = cfg.require_api_key()?.to_string();
        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(cfg.timeout_secs))
                .build()
                .map_err(|err| ColloquyError::LanguageModel(format!("http client error: {err}")))?,
            model: cfg.model.clone(),
            api_key,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            organization: cfg.organization.clone(),
            temperature: cfg.temperature,
        })
    }

    fn request_body(&self, messages: &[Message]) -> Value {
        let messages: Vec<OpenAiMessage> = messages
            .iter()
            .map(|message| OpenAiMessage {
                role: message.role.as_str().to_string(),
                content: message.content.clone(),
            })
            .collect();
        let mut payload = json!({
            "model": self.model,
            "messages": messages,
        });
        if let Some(temperature) = self.temperature {
            payload["temperature"] = json!(temperature);
        }
        payload
    }
}

#[async_trait]
impl LanguageModel for OpenAIClient {
    async fn complete_chat(&self, messages: &[Message]) -> Result<String> {
        let mut builder = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_key),
            );
        if let Some(org) = &self.organization {
            builder = builder.header("OpenAI-Organization", org);
        }
        let resp = builder
            .json(&self.request_body(messages))
            .send()
            .await
            .map_err(|err| ColloquyError::LanguageModel(format!("OpenAI request error: {err}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(coalesce_error(status, &body, "openai"));
        }

        let body: OpenAiResponse = resp.json().await.map_err(|err| {
            ColloquyError::LanguageModel(format!("OpenAI response parse error: {err}"))
        })?;

        let first = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ColloquyError::LanguageModel("OpenAI returned no choices".into()))?;

        Ok(first.message.content.unwrap_or_default())
    }
}

/// A deterministic model used for tests and offline demos.
///
/// Scripted replies are returned in order. Without a script the stub echoes
/// the last message it was sent.
pub struct StubModel {
    responses: Mutex<VecDeque<String>>,
    echo: bool,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl StubModel {
    pub fn new(responses: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            echo: false,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn echo() -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            echo: true,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn complete_chat(&self, messages: &[Message]) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(messages.to_vec());
        }

        let scripted = self
            .responses
            .lock()
            .map_err(|_| ColloquyError::LanguageModel("stub model poisoned".into()))?
            .pop_front();

        match scripted {
            Some(raw) => Ok(raw),
            None if self.echo => Ok(messages
                .last()
                .map(|m| format!("(echo) {}", m.content))
                .unwrap_or_default()),
            None => Err(ColloquyError::LanguageModel(
                "StubModel ran out of scripted responses".into(),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoiceMessage {
    content: Option<String>,
}
