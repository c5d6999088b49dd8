// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::*;

use rstest::rstest;

fn block(payload: Value) -> Block {
    serde_json::from_value(payload).expect("block")
}

fn page_id(value: &str) -> PageId {
    PageId::new(value).expect("page id")
}

#[test]
fn extracts_paragraph_text() {
    let block = block(json!({
        "type": "paragraph",
        "paragraph": { "rich_text": [
            { "plain_text": "first " },
            { "plain_text": "second" }
        ] }
    }));
    assert_eq!(block_plain_text(&block).as_deref(), Some("first second"));
}

#[rstest]
#[case("heading_1", "# Title")]
#[case("heading_2", "## Title")]
#[case("heading_3", "### Title")]
#[case("bulleted_list_item", "- Title")]
fn prefixes_structured_blocks(#[case] block_type: &str, #[case] expected: &str) {
    let block = block(json!({
        "type": block_type,
        block_type: { "rich_text": [{ "plain_text": "Title" }] }
    }));
    assert_eq!(block_plain_text(&block).as_deref(), Some(expected));
}

#[test]
fn skips_non_text_blocks_and_empty_rich_text() {
    let divider = block(json!({ "type": "divider", "divider": {} }));
    assert_eq!(block_plain_text(&divider), None);

    let empty = block(json!({ "type": "paragraph", "paragraph": { "rich_text": [] } }));
    assert_eq!(block_plain_text(&empty), None);

    let image = block(json!({
        "type": "image",
        "image": { "rich_text": [{ "plain_text": "caption" }] }
    }));
    assert_eq!(block_plain_text(&image), None);
}

#[test]
fn parses_paginated_children_payload() {
    let payload = json!({
        "results": [
            { "type": "paragraph", "paragraph": { "rich_text": [{ "plain_text": "one" }] } },
            { "type": "divider", "divider": {} }
        ],
        "has_more": true,
        "next_cursor": "cursor-2"
    });
    let children: BlockChildren = serde_json::from_value(payload).expect("children");
    assert_eq!(children.results.len(), 2);
    assert!(children.has_more);
    assert_eq!(children.next_cursor.as_deref(), Some("cursor-2"));
}

#[test]
fn splits_markdown_on_blank_lines() {
    let text = "# Title\n- a\n- b\n\nSecond paragraph\n\n\nThird";
    assert_eq!(split_paragraphs(text), vec!["# Title\n- a\n- b", "Second paragraph", "Third"]);
}

#[test]
fn split_paragraphs_of_blank_input_is_empty() {
    assert_eq!(split_paragraphs(""), Vec::<&str>::new());
    assert_eq!(split_paragraphs("\n\n\n"), Vec::<&str>::new());
}

#[test]
fn builds_divider_heading_paragraphs_and_code() {
    let sections = [
        PageSection {
            title: "Refined Notes".to_owned(),
            body: SectionBody::Markdown("# Meeting\n- db\n\n- api".to_owned()),
        },
        PageSection {
            title: "Architecture Diagram".to_owned(),
            body: SectionBody::Code {
                language: "mermaid".to_owned(),
                text: "graph TD\n  db-->api".to_owned(),
            },
        },
    ];

    let children = build_section_blocks(&sections).expect("blocks");
    let kinds: Vec<&str> =
        children.iter().map(|child| child["type"].as_str().expect("type")).collect();
    assert_eq!(
        kinds,
        vec!["divider", "heading_2", "paragraph", "paragraph", "heading_2", "code"]
    );

    assert_eq!(children[1]["heading_2"]["rich_text"][0]["text"]["content"], "Refined Notes");
    assert_eq!(children[5]["code"]["language"], "mermaid");
    assert_eq!(children[5]["code"]["rich_text"][0]["text"]["content"], "graph TD\n  db-->api");
}

#[test]
fn rejects_appends_over_the_block_limit() {
    let body = vec!["paragraph"; MAX_BLOCKS_PER_APPEND].join("\n\n");
    let sections = [PageSection {
        title: "Refined Notes".to_owned(),
        body: SectionBody::Markdown(body),
    }];

    let err = build_section_blocks(&sections).expect_err("over the limit");
    assert!(matches!(err, ServiceError::Validation(_)), "got {err:?}");
}

#[test]
fn rejects_oversized_text_runs() {
    let text = "x".repeat(MAX_TEXT_RUN_LEN + 1);
    let err = text_run(&text).expect_err("over the limit");
    assert!(matches!(err, ServiceError::Validation(_)), "got {err:?}");

    text_run(&"x".repeat(MAX_TEXT_RUN_LEN)).expect("at the limit");
}

#[rstest]
#[case(404, ServiceError::NotFound(String::new()))]
#[case(401, ServiceError::Authorization(String::new()))]
#[case(403, ServiceError::Authorization(String::new()))]
#[case(400, ServiceError::Validation(String::new()))]
#[case(500, ServiceError::Upstream(String::new()))]
#[case(429, ServiceError::Upstream(String::new()))]
fn maps_workspace_statuses(#[case] status: u16, #[case] expected: ServiceError) {
    let err = map_status(status, &page_id("abc123"), "detail");
    assert_eq!(std::mem::discriminant(&err), std::mem::discriminant(&expected));
}

#[test]
fn extracts_api_error_message() {
    let body = r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find block."}"#;
    assert_eq!(extract_api_message(body).as_deref(), Some("Could not find block."));
    assert_eq!(extract_api_message("not json"), None);
}
