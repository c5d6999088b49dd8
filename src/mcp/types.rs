// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PageParams {
    /// Notion page id, as shown in the page URL (dashed or undashed).
    pub page_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProcessPageResponse {
    pub page_id: String,
    /// Refined Markdown appended to the page.
    pub refined_text: String,
    /// Mermaid diagram appended to the page as a code block.
    pub diagram_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PageContentResponse {
    /// Plain text of the page; empty when the page has no text blocks.
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DiagramParam {
    /// Label naming the system this diagram describes.
    pub label: String,
    /// Raw Mermaid diagram code.
    pub mermaid_code: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CombineDiagramsParams {
    /// Title for the combined diagram; defaults to "Unified Architecture".
    pub title: Option<String>,
    /// Diagrams to merge, in order.
    pub diagrams: Vec<DiagramParam>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CombineDiagramsResponse {
    pub combined_diagram: String,
}
