// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Stub collaborators shared across test modules.
//!
//! Both stubs write into one [`CallLog`] so tests can assert not just call
//! counts but the exact order of fetch/model/append interactions.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::llm::TextModel;
use crate::model::{PageId, PageSection};
use crate::service::PageStore;

#[derive(Debug, Default)]
pub(crate) struct CallLog {
    events: Mutex<Vec<&'static str>>,
}

impl CallLog {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn record(&self, event: &'static str) {
        self.events.lock().expect("call log lock").push(event);
    }

    pub(crate) fn events(&self) -> Vec<&'static str> {
        self.events.lock().expect("call log lock").clone()
    }
}

pub(crate) struct StubModel {
    log: Arc<CallLog>,
    replies: Mutex<VecDeque<Result<String, ServiceError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubModel {
    pub(crate) fn new(
        log: Arc<CallLog>,
        replies: impl IntoIterator<Item = Result<String, ServiceError>>,
    ) -> Self {
        Self {
            log,
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(system, user)` prompt pair the stub has seen, in order.
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("stub model lock").clone()
    }
}

#[async_trait]
impl TextModel for StubModel {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ServiceError> {
        self.log.record("model.complete");
        self.calls.lock().expect("stub model lock").push((system.to_owned(), user.to_owned()));
        self.replies.lock().expect("stub model lock").pop_front().unwrap_or_else(|| {
            Err(ServiceError::Generation("stub model has no scripted reply".to_owned()))
        })
    }
}

pub(crate) struct StubPages {
    log: Arc<CallLog>,
    fetch_reply: Result<String, ServiceError>,
    appends: Mutex<Vec<(PageId, Vec<PageSection>)>>,
}

impl StubPages {
    pub(crate) fn new(log: Arc<CallLog>, fetch_reply: Result<String, ServiceError>) -> Self {
        Self { log, fetch_reply, appends: Mutex::new(Vec::new()) }
    }

    /// Every `(page_id, sections)` append the stub has received, in order.
    pub(crate) fn appends(&self) -> Vec<(PageId, Vec<PageSection>)> {
        self.appends.lock().expect("stub pages lock").clone()
    }
}

#[async_trait]
impl PageStore for StubPages {
    async fn fetch_text(&self, _page_id: &PageId) -> Result<String, ServiceError> {
        self.log.record("pages.fetch");
        self.fetch_reply.clone()
    }

    async fn append_sections(
        &self,
        page_id: &PageId,
        sections: &[PageSection],
    ) -> Result<(), ServiceError> {
        self.log.record("pages.append");
        self.appends
            .lock()
            .expect("stub pages lock")
            .push((page_id.clone(), sections.to_vec()));
        Ok(())
    }
}
