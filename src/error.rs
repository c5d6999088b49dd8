// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Failure kinds surfaced by the service operations.
//!
//! One external failure ends the request; nothing is retried or swallowed.
//! Each transport maps these onto its native error representation (MCP
//! `ErrorData`, HTTP status + error body).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The page id did not resolve to a page in the workspace.
    NotFound(String),
    /// The integration token lacks access to the page.
    Authorization(String),
    /// The model call failed, timed out, or returned unusable output.
    Generation(String),
    /// Malformed caller input: bad page id, empty diagram list, or a body
    /// exceeding the workspace API's per-request limits.
    Validation(String),
    /// The workspace API failed in a way that is not the caller's fault
    /// (network error, unexpected status).
    Upstream(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(message) => write!(f, "not found: {message}"),
            Self::Authorization(message) => write!(f, "not authorized: {message}"),
            Self::Generation(message) => write!(f, "generation failed: {message}"),
            Self::Validation(message) => write!(f, "invalid input: {message}"),
            Self::Upstream(message) => write!(f, "upstream failure: {message}"),
        }
    }
}

impl std::error::Error for ServiceError {}
