// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Process configuration.
//!
//! Read once from the environment at startup and passed by reference to the
//! components that need it. No component looks up environment variables on
//! its own.

use std::env;
use std::fmt;

/// Gemini's OpenAI-compatible endpoint, used unless `LLM_BASE_URL` overrides it.
pub const DEFAULT_LLM_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Notion integration token (`NOTION_API_KEY`).
    pub notion_token: String,
    /// API key for the chat-completions endpoint (`GEMINI_API_KEY`).
    pub llm_api_key: String,
    /// Chat-completions base URL (`LLM_BASE_URL`, optional).
    pub llm_base_url: String,
    /// Model name (`LLM_MODEL`, optional).
    pub llm_model: String,
    /// Tracing filter directive (`TRITON_LOG`, optional).
    pub log_filter: Option<String>,
}

impl Config {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset, matching how shells export blanks.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let notion_token = get("NOTION_API_KEY").ok_or(ConfigError::MissingNotionKey)?;
        let llm_api_key = get("GEMINI_API_KEY").ok_or(ConfigError::MissingLlmKey)?;

        Ok(Self {
            notion_token,
            llm_api_key,
            llm_base_url: get("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_owned()),
            llm_model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_owned()),
            log_filter: get("TRITON_LOG"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingNotionKey,
    MissingLlmKey,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNotionKey => {
                f.write_str("NOTION_API_KEY is not set (required for workspace access)")
            }
            Self::MissingLlmKey => {
                f.write_str("GEMINI_API_KEY is not set (required for model access)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
