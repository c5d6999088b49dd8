// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! HTTP API surface.
//!
//! A thin adapter over [`crate::service::ResearchService`] mirroring the MCP
//! tools. Interactive documentation is served at `/docs`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::agent::DEFAULT_COMBINE_TITLE;
use crate::error::ServiceError;
use crate::model::DiagramSource;
use crate::service::ResearchService;

pub const DEFAULT_HTTP_PORT: u16 = 8000;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentResponse {
    /// Plain text of the page; empty when the page has no text blocks.
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessResponse {
    pub refined_text: String,
    pub diagram_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiagramBody {
    /// Label naming the system this diagram describes.
    pub label: String,
    /// Raw Mermaid diagram code.
    pub mermaid_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CombineRequest {
    /// Title for the combined diagram; defaults to "Unified Architecture".
    pub title: Option<String>,
    /// Diagrams to merge, in order.
    pub diagrams: Vec<DiagramBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CombineResponse {
    pub combined_diagram: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Authorization(_) => StatusCode::FORBIDDEN,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (status, Json(ErrorBody { message: self.0.to_string() })).into_response()
    }
}

/// Service status.
#[utoipa::path(get, path = "/", responses((status = 200, body = StatusResponse)))]
async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

/// Plain text content of a page.
#[utoipa::path(
    get,
    path = "/content/{page_id}",
    params(("page_id" = String, Path, description = "Notion page id")),
    responses(
        (status = 200, body = ContentResponse),
        (status = 404, body = ErrorBody),
        (status = 403, body = ErrorBody),
    )
)]
async fn get_content(
    State(service): State<Arc<ResearchService>>,
    Path(page_id): Path<String>,
) -> Result<Json<ContentResponse>, ApiError> {
    let text = service.get_page_content(&page_id).await?;
    Ok(Json(ContentResponse { text }))
}

/// Refine a page's notes and append a Mermaid diagram in place.
#[utoipa::path(
    post,
    path = "/process/{page_id}",
    params(("page_id" = String, Path, description = "Notion page id")),
    responses(
        (status = 200, body = ProcessResponse),
        (status = 404, body = ErrorBody),
        (status = 403, body = ErrorBody),
        (status = 500, body = ErrorBody),
    )
)]
async fn process_page(
    State(service): State<Arc<ResearchService>>,
    Path(page_id): Path<String>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let processed = service.process_research_page(&page_id).await?;
    Ok(Json(ProcessResponse {
        refined_text: processed.refined_text,
        diagram_text: processed.diagram_text,
    }))
}

/// Merge multiple Mermaid diagrams into one unified diagram.
#[utoipa::path(
    post,
    path = "/combine-diagrams",
    request_body = CombineRequest,
    responses(
        (status = 200, body = CombineResponse),
        (status = 400, body = ErrorBody),
        (status = 500, body = ErrorBody),
    )
)]
async fn combine_diagrams(
    State(service): State<Arc<ResearchService>>,
    Json(request): Json<CombineRequest>,
) -> Result<Json<CombineResponse>, ApiError> {
    let title = request.title.unwrap_or_else(|| DEFAULT_COMBINE_TITLE.to_owned());
    let diagrams: Vec<DiagramSource> = request
        .diagrams
        .into_iter()
        .map(|d| DiagramSource { label: d.label, mermaid_code: d.mermaid_code })
        .collect();

    let combined = service.combine_architecture_diagrams(&title, &diagrams).await?;
    Ok(Json(CombineResponse { combined_diagram: combined }))
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Triton API",
        description = "Refine Notion research notes and generate Mermaid architecture diagrams."
    ),
    paths(root, get_content, process_page, combine_diagrams),
    components(schemas(
        StatusResponse,
        ContentResponse,
        ProcessResponse,
        DiagramBody,
        CombineRequest,
        CombineResponse,
        ErrorBody
    ))
)]
struct ApiDoc;

pub fn build_router(service: Arc<ResearchService>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(root))
        .route("/content/{page_id}", get(get_content))
        .route("/process/{page_id}", post(process_page))
        .route("/combine-diagrams", post(combine_diagrams))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Serve the HTTP API until the process exits.
pub async fn serve(service: Arc<ResearchService>, port: u16) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "HTTP API listening; interactive docs at /docs");
    axum::serve(listener, build_router(service)).await
}
