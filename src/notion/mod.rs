// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Notion block API client.
//!
//! Implements the [`PageStore`] seam over Notion's `blocks.children` API:
//! paginated reads of a page's text blocks and a single-request append of
//! titled sections. The client never overwrites existing content; appends
//! are permanent and a caller retry after a partial failure will re-append
//! (no idempotency guard, no automatic chunking).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::ServiceError;
use crate::model::{PageId, PageSection, SectionBody};
use crate::service::PageStore;

pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Notion rejects more children than this in a single append request.
pub const MAX_BLOCKS_PER_APPEND: usize = 100;
/// Notion rejects rich-text runs longer than this.
pub const MAX_TEXT_RUN_LEN: usize = 2000;

const FETCH_PAGE_SIZE: u32 = 100;
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl NotionClient {
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| ServiceError::Upstream(format!("cannot build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: NOTION_API_BASE_URL.to_owned(),
            token: config.notion_token.clone(),
        })
    }

    async fn check(
        &self,
        response: reqwest::Response,
        page_id: &PageId,
    ) -> Result<reqwest::Response, ServiceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .text()
            .await
            .ok()
            .and_then(|body| extract_api_message(&body))
            .unwrap_or_else(|| status.to_string());
        Err(map_status(status.as_u16(), page_id, &detail))
    }
}

#[async_trait]
impl PageStore for NotionClient {
    async fn fetch_text(&self, page_id: &PageId) -> Result<String, ServiceError> {
        let mut parts: Vec<String> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(format!("{}/blocks/{page_id}/children", self.base_url))
                .bearer_auth(&self.token)
                .header("Notion-Version", NOTION_API_VERSION)
                .query(&[("page_size", FETCH_PAGE_SIZE.to_string())]);
            if let Some(cursor) = &cursor {
                request = request.query(&[("start_cursor", cursor.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|err| ServiceError::Upstream(format!("workspace request failed: {err}")))?;
            let response = self.check(response, page_id).await?;

            let children: BlockChildren = response.json().await.map_err(|err| {
                ServiceError::Upstream(format!("cannot parse workspace response: {err}"))
            })?;

            parts.extend(children.results.iter().filter_map(block_plain_text));

            cursor = children.has_more.then_some(children.next_cursor).flatten();
            if cursor.is_none() {
                break;
            }
        }

        Ok(parts.join("\n"))
    }

    async fn append_sections(
        &self,
        page_id: &PageId,
        sections: &[PageSection],
    ) -> Result<(), ServiceError> {
        let children = build_section_blocks(sections)?;
        tracing::debug!(page_id = %page_id, blocks = children.len(), "appending blocks");

        let response = self
            .http
            .patch(format!("{}/blocks/{page_id}/children", self.base_url))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_API_VERSION)
            .json(&json!({ "children": children }))
            .send()
            .await
            .map_err(|err| ServiceError::Upstream(format!("workspace request failed: {err}")))?;
        self.check(response, page_id).await?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct BlockChildren {
    #[serde(default)]
    results: Vec<Block>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Block {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(flatten)]
    payload: Value,
}

/// Plain text of one block, or `None` for non-text block types and blocks
/// whose rich text is empty.
///
/// Headings keep their level as `#` prefixes and list items get a `-` marker
/// so that downstream refinement sees the page's structure, not a flat blob.
fn block_plain_text(block: &Block) -> Option<String> {
    let text = rich_text_content(block)?;
    if text.is_empty() {
        return None;
    }

    match block.block_type.as_str() {
        "paragraph" => Some(text),
        "heading_1" => Some(format!("# {text}")),
        "heading_2" => Some(format!("## {text}")),
        "heading_3" => Some(format!("### {text}")),
        "bulleted_list_item" => Some(format!("- {text}")),
        _ => None,
    }
}

fn rich_text_content(block: &Block) -> Option<String> {
    let runs = block.payload.get(&block.block_type)?.get("rich_text")?.as_array()?;
    let mut content = String::new();
    for run in runs {
        if let Some(text) = run.get("plain_text").and_then(Value::as_str) {
            content.push_str(text);
        }
    }
    Some(content)
}

/// Assemble the children payload for one append request: a leading divider,
/// then per section a heading plus paragraph or code blocks.
fn build_section_blocks(sections: &[PageSection]) -> Result<Vec<Value>, ServiceError> {
    let mut children = vec![json!({ "object": "block", "type": "divider", "divider": {} })];

    for section in sections {
        children.push(json!({
            "object": "block",
            "type": "heading_2",
            "heading_2": { "rich_text": [text_run(&section.title)?] },
        }));

        match &section.body {
            SectionBody::Markdown(text) => {
                for paragraph in split_paragraphs(text) {
                    children.push(json!({
                        "object": "block",
                        "type": "paragraph",
                        "paragraph": { "rich_text": [text_run(paragraph)?] },
                    }));
                }
            }
            SectionBody::Code { language, text } => {
                children.push(json!({
                    "object": "block",
                    "type": "code",
                    "code": { "rich_text": [text_run(text)?], "language": language },
                }));
            }
        }
    }

    if children.len() > MAX_BLOCKS_PER_APPEND {
        return Err(ServiceError::Validation(format!(
            "append would create {} blocks; the workspace API accepts at most {MAX_BLOCKS_PER_APPEND} per request",
            children.len()
        )));
    }

    Ok(children)
}

fn text_run(content: &str) -> Result<Value, ServiceError> {
    let chars = content.chars().count();
    if chars > MAX_TEXT_RUN_LEN {
        return Err(ServiceError::Validation(format!(
            "text run of {chars} characters exceeds the workspace API limit of {MAX_TEXT_RUN_LEN}"
        )));
    }
    Ok(json!({ "type": "text", "text": { "content": content } }))
}

/// Split structured text into paragraph-sized chunks on blank lines.
fn split_paragraphs(text: &str) -> Vec<&str> {
    let mut paragraphs = Vec::new();
    let mut rest = text;
    while let Some(split_at) = rest.find("\n\n") {
        let (head, tail) = rest.split_at(split_at);
        if !head.trim().is_empty() {
            paragraphs.push(head.trim_matches('\n'));
        }
        rest = &tail[2..];
    }
    if !rest.trim().is_empty() {
        paragraphs.push(rest.trim_matches('\n'));
    }
    paragraphs
}

fn map_status(status: u16, page_id: &PageId, detail: &str) -> ServiceError {
    match status {
        404 => ServiceError::NotFound(format!("page {page_id} does not resolve: {detail}")),
        401 | 403 => {
            ServiceError::Authorization(format!("integration lacks access to page {page_id}: {detail}"))
        }
        400 => ServiceError::Validation(format!("workspace rejected the request: {detail}")),
        _ => ServiceError::Upstream(format!("workspace returned {status}: {detail}")),
    }
}

fn extract_api_message(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    parsed.get("message").and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests;
