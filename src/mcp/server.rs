// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};

use crate::agent::DEFAULT_COMBINE_TITLE;
use crate::error::ServiceError;
use crate::model::DiagramSource;
use crate::service::ResearchService;

use super::types::*;

#[derive(Clone)]
pub struct TritonMcp {
    service: Arc<ResearchService>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TritonMcp {
    pub fn new(service: Arc<ResearchService>) -> Self {
        Self { service, tool_router: Self::tool_router() }
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Read a page, refine its notes into structured Markdown, generate a
    /// Mermaid architecture diagram, and append both back to the page.
    #[tool(name = "page.process")]
    async fn page_process(
        &self,
        params: Parameters<PageParams>,
    ) -> Result<Json<ProcessPageResponse>, ErrorData> {
        let processed = self
            .service
            .process_research_page(&params.0.page_id)
            .await
            .map_err(tool_error)?;

        Ok(Json(ProcessPageResponse {
            page_id: processed.page_id.into_string(),
            refined_text: processed.refined_text,
            diagram_text: processed.diagram_text,
        }))
    }

    /// Read and return the plain text of a page without modifying it; useful
    /// for inspecting content before `page.process`.
    #[tool(name = "page.read")]
    async fn page_read(
        &self,
        params: Parameters<PageParams>,
    ) -> Result<Json<PageContentResponse>, ErrorData> {
        let text =
            self.service.get_page_content(&params.0.page_id).await.map_err(tool_error)?;
        Ok(Json(PageContentResponse { text }))
    }

    /// Merge multiple Mermaid diagrams into one unified architecture diagram.
    #[tool(name = "diagram.combine")]
    async fn diagram_combine(
        &self,
        params: Parameters<CombineDiagramsParams>,
    ) -> Result<Json<CombineDiagramsResponse>, ErrorData> {
        let CombineDiagramsParams { title, diagrams } = params.0;
        let title = title.unwrap_or_else(|| DEFAULT_COMBINE_TITLE.to_owned());
        let diagrams: Vec<DiagramSource> = diagrams
            .into_iter()
            .map(|d| DiagramSource { label: d.label, mermaid_code: d.mermaid_code })
            .collect();

        let combined = self
            .service
            .combine_architecture_diagrams(&title, &diagrams)
            .await
            .map_err(tool_error)?;
        Ok(Json(CombineDiagramsResponse { combined_diagram: combined }))
    }
}

fn tool_error(err: ServiceError) -> ErrorData {
    match &err {
        ServiceError::NotFound(_) => ErrorData::resource_not_found(err.to_string(), None),
        ServiceError::Validation(_) => ErrorData::invalid_params(err.to_string(), None),
        ServiceError::Authorization(_) | ServiceError::Generation(_) | ServiceError::Upstream(_) => {
            ErrorData::internal_error(err.to_string(), None)
        }
    }
}

#[tool_handler]
impl ServerHandler for TritonMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Triton research-notes server (tools: page.process, page.read, diagram.combine). \
Use page.read to inspect a Notion page, page.process to refine its notes and append a Mermaid \
architecture diagram in place, and diagram.combine to merge multiple Mermaid diagrams into one."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
