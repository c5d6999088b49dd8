// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Transport-agnostic service facade.
//!
//! The three operations live here once; the MCP and HTTP surfaces are thin
//! adapters that translate their native request shapes into these calls and
//! the results back into protocol-native responses.

use std::sync::Arc;

use async_trait::async_trait;

use crate::agent;
use crate::error::ServiceError;
use crate::llm::TextModel;
use crate::model::{DiagramSource, PageId, PageSection, ProcessedPage, SectionBody};

pub const REFINED_SECTION_TITLE: &str = "Refined Notes";
pub const DIAGRAM_SECTION_TITLE: &str = "Architecture Diagram";

/// Read/append surface of the document workspace.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Concatenated plain text of all text-bearing blocks, in workspace order.
    /// A page without text blocks yields an empty string, not an error.
    async fn fetch_text(&self, page_id: &PageId) -> Result<String, ServiceError>;

    /// Append titled sections to the page in a single request.
    async fn append_sections(
        &self,
        page_id: &PageId,
        sections: &[PageSection],
    ) -> Result<(), ServiceError>;
}

#[derive(Clone)]
pub struct ResearchService {
    pages: Arc<dyn PageStore>,
    model: Arc<dyn TextModel>,
}

impl ResearchService {
    pub fn new(pages: Arc<dyn PageStore>, model: Arc<dyn TextModel>) -> Self {
        Self { pages, model }
    }

    /// Full pipeline: fetch the page text, refine it, generate a diagram,
    /// append both back to the page.
    ///
    /// One fetch, two model calls, one append, in that order. A retry after
    /// a partial failure re-appends; there is no idempotency guard.
    pub async fn process_research_page(
        &self,
        page_id: &str,
    ) -> Result<ProcessedPage, ServiceError> {
        let page_id = parse_page_id(page_id)?;
        tracing::info!(page_id = %page_id, "processing research page");

        let raw_notes = self.pages.fetch_text(&page_id).await?;
        if raw_notes.trim().is_empty() {
            return Err(ServiceError::Validation(
                "page has no text content to refine".to_owned(),
            ));
        }
        tracing::debug!(chars = raw_notes.len(), "extracted page text");

        let (refined_text, diagram_text) =
            agent::run_pipeline(self.model.as_ref(), &raw_notes).await?;

        let sections = [
            PageSection {
                title: REFINED_SECTION_TITLE.to_owned(),
                body: SectionBody::Markdown(refined_text.clone()),
            },
            PageSection {
                title: DIAGRAM_SECTION_TITLE.to_owned(),
                body: SectionBody::Code {
                    language: "mermaid".to_owned(),
                    text: diagram_text.clone(),
                },
            },
        ];
        self.pages.append_sections(&page_id, &sections).await?;
        tracing::info!(page_id = %page_id, "page refined and diagram appended");

        Ok(ProcessedPage { page_id, refined_text, diagram_text })
    }

    /// Read-only fetch of a page's plain text.
    pub async fn get_page_content(&self, page_id: &str) -> Result<String, ServiceError> {
        let page_id = parse_page_id(page_id)?;
        self.pages.fetch_text(&page_id).await
    }

    /// Merge labeled Mermaid diagrams into one unified diagram.
    pub async fn combine_architecture_diagrams(
        &self,
        title: &str,
        diagrams: &[DiagramSource],
    ) -> Result<String, ServiceError> {
        agent::combine_diagrams(self.model.as_ref(), title, diagrams).await
    }
}

fn parse_page_id(raw: &str) -> Result<PageId, ServiceError> {
    PageId::new(raw).map_err(|err| ServiceError::Validation(format!("invalid page id: {err}")))
}

#[cfg(test)]
mod tests;
