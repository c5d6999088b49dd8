// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Chat-model client.
//!
//! [`TextModel`] is the seam the pipeline and combiner run against;
//! [`ChatClient`] implements it over an OpenAI-compatible chat-completions
//! endpoint (by default Gemini's OpenAI adapter). One request per completion,
//! no retries; failures surface as [`ServiceError::Generation`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ServiceError;

const REQUEST_TIMEOUT_SECS: u64 = 120;
const TEMPERATURE: f32 = 0.2;
const ERROR_BODY_SNIPPET_LEN: usize = 200;

/// A single-turn text completion surface.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// Send one system + user exchange and return the assistant text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| ServiceError::Upstream(format!("cannot build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.llm_base_url.trim_end_matches('/').to_owned(),
            api_key: config.llm_api_key.clone(),
            model: config.llm_model.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl TextModel for ChatClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ServiceError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| ServiceError::Generation(format!("model request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Generation(format!(
                "model endpoint returned {status}: {}",
                snippet(&body, ERROR_BODY_SNIPPET_LEN)
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|err| ServiceError::Generation(format!("cannot parse model response: {err}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ServiceError::Generation("model response contained no choices".to_owned()))
    }
}

fn snippet(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((offset, _)) => &text[..offset],
        None => text,
    }
}
