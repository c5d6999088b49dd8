// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::*;

use crate::testing::{CallLog, StubModel, StubPages};

const RAW_NOTES: &str = "meeting notes: discussed db, then api, then queue";
const REFINED: &str = "# Meeting Notes\n- db\n- api\n- queue";
const DIAGRAM: &str = "graph TD\n  db-->api\n  api-->queue";

struct Harness {
    log: Arc<CallLog>,
    pages: Arc<StubPages>,
    service: ResearchService,
}

fn harness(
    fetch_reply: Result<String, ServiceError>,
    replies: impl IntoIterator<Item = Result<String, ServiceError>>,
) -> Harness {
    let log = CallLog::new();
    let pages = Arc::new(StubPages::new(log.clone(), fetch_reply));
    let model = Arc::new(StubModel::new(log.clone(), replies));
    let service = ResearchService::new(pages.clone(), model);
    Harness { log, pages, service }
}

#[tokio::test]
async fn process_performs_fetch_two_model_calls_and_one_append_in_order() {
    let h = harness(
        Ok(RAW_NOTES.to_owned()),
        [Ok(REFINED.to_owned()), Ok(DIAGRAM.to_owned())],
    );

    let processed = h.service.process_research_page("page-1").await.expect("processed");
    assert_eq!(processed.page_id.as_str(), "page-1");
    assert_eq!(processed.refined_text, REFINED);
    assert_eq!(processed.diagram_text, DIAGRAM);

    assert_eq!(
        h.log.events(),
        vec!["pages.fetch", "model.complete", "model.complete", "pages.append"]
    );
}

#[tokio::test]
async fn process_appends_refined_notes_and_diagram_sections() {
    let h = harness(
        Ok(RAW_NOTES.to_owned()),
        [Ok(REFINED.to_owned()), Ok(DIAGRAM.to_owned())],
    );

    h.service.process_research_page("page-1").await.expect("processed");

    let appends = h.pages.appends();
    assert_eq!(appends.len(), 1);
    let (page_id, sections) = &appends[0];
    assert_eq!(page_id.as_str(), "page-1");
    assert_eq!(sections.len(), 2);

    assert_eq!(sections[0].title, REFINED_SECTION_TITLE);
    assert_eq!(sections[0].body, SectionBody::Markdown(REFINED.to_owned()));
    assert_eq!(sections[1].title, DIAGRAM_SECTION_TITLE);
    assert_eq!(
        sections[1].body,
        SectionBody::Code { language: "mermaid".to_owned(), text: DIAGRAM.to_owned() }
    );
}

#[tokio::test]
async fn process_fetch_not_found_surfaces_before_any_model_call() {
    let h = harness(
        Err(ServiceError::NotFound("page page-1 does not resolve".to_owned())),
        [Ok(REFINED.to_owned())],
    );

    let err = h.service.process_research_page("page-1").await.expect_err("fetch failure");
    assert!(matches!(err, ServiceError::NotFound(_)), "got {err:?}");
    assert_eq!(h.log.events(), vec!["pages.fetch"]);
    assert!(h.pages.appends().is_empty());
}

#[tokio::test]
async fn process_rejects_pages_without_text() {
    let h = harness(Ok("  \n ".to_owned()), []);

    let err = h.service.process_research_page("page-1").await.expect_err("empty page");
    assert!(matches!(err, ServiceError::Validation(_)), "got {err:?}");
    assert_eq!(h.log.events(), vec!["pages.fetch"]);
}

#[tokio::test]
async fn process_skips_append_when_generation_fails() {
    let h = harness(
        Ok(RAW_NOTES.to_owned()),
        [
            Ok(REFINED.to_owned()),
            Err(ServiceError::Generation("model timed out".to_owned())),
        ],
    );

    let err = h.service.process_research_page("page-1").await.expect_err("diagram failure");
    assert_eq!(err, ServiceError::Generation("model timed out".to_owned()));
    assert_eq!(h.log.events(), vec!["pages.fetch", "model.complete", "model.complete"]);
    assert!(h.pages.appends().is_empty());
}

#[tokio::test]
async fn get_page_content_returns_empty_string_for_empty_pages() {
    let h = harness(Ok(String::new()), []);

    let text = h.service.get_page_content("page-1").await.expect("content");
    assert_eq!(text, "");
    assert_eq!(h.log.events(), vec!["pages.fetch"]);
}

#[tokio::test]
async fn rejects_malformed_page_ids_without_touching_collaborators() {
    let h = harness(Ok(String::new()), []);

    let err = h.service.get_page_content("a/b").await.expect_err("bad id");
    assert!(matches!(err, ServiceError::Validation(_)), "got {err:?}");

    let err = h.service.process_research_page("").await.expect_err("empty id");
    assert!(matches!(err, ServiceError::Validation(_)), "got {err:?}");

    assert!(h.log.events().is_empty());
}

#[tokio::test]
async fn combine_delegates_to_the_combiner() {
    let h = harness(Ok(String::new()), [Ok("graph TD\n  a-->b\n  c-->d".to_owned())]);

    let sources = [
        DiagramSource { label: "System A".to_owned(), mermaid_code: "graph TD\na-->b".to_owned() },
        DiagramSource { label: "System B".to_owned(), mermaid_code: "graph TD\nc-->d".to_owned() },
    ];
    let combined = h
        .service
        .combine_architecture_diagrams("Unified Architecture", &sources)
        .await
        .expect("combined");
    assert_eq!(combined, "graph TD\n  a-->b\n  c-->d");
    assert_eq!(h.log.events(), vec!["model.complete"]);
}
