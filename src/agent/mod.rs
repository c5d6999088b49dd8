// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The refinement pipeline and the diagram combiner.
//!
//! The pipeline is deliberately not a graph: it is two transformation
//! functions applied in a fixed order over a single [`NoteState`] record.
//! A refine failure propagates unchanged and the diagram step is never
//! attempted.

use crate::error::ServiceError;
use crate::llm::TextModel;
use crate::model::{detect_diagram_kind, scrub_mermaid_fences, DiagramSource, NoteState};

pub const DEFAULT_COMBINE_TITLE: &str = "Unified Architecture";

pub(crate) const REFINE_SYSTEM_PROMPT: &str = "\
You refine raw research notes into clean, structured Markdown.
Use headers, bullet lists, and bold text. Keep every piece of information; \
never invent facts that are not in the notes. Never return empty output for \
non-empty input. Return only the refined Markdown, no commentary.";

pub(crate) const DIAGRAM_SYSTEM_PROMPT: &str = "\
You analyze text and produce a single Mermaid.js diagram (graph TD or \
sequenceDiagram, whichever fits the content) representing the system \
architecture or flow it describes. Return only the Mermaid code: no prose, \
no markdown code fences.";

pub(crate) const COMBINE_SYSTEM_PROMPT: &str = "\
You are an expert at creating Mermaid.js architecture diagrams. You merge \
multiple diagrams into one coherent diagram, reusing and connecting nodes \
that are semantically identical across inputs. Return only the Mermaid code: \
no prose, no markdown code fences.";

/// Step 1: refine raw notes into structured Markdown.
async fn refine_step(model: &dyn TextModel, state: &mut NoteState) -> Result<String, ServiceError> {
    tracing::info!("refiner: cleaning notes");
    let reply = model.complete(REFINE_SYSTEM_PROMPT, state.raw_notes()).await?;
    let refined = reply.trim();
    if refined.is_empty() {
        return Err(ServiceError::Generation(
            "model returned an empty refinement for non-empty notes".to_owned(),
        ));
    }
    state.set_refined_notes(refined.to_owned());
    Ok(refined.to_owned())
}

/// Step 2: generate a Mermaid diagram from the refined notes.
async fn diagram_step(model: &dyn TextModel, state: &mut NoteState) -> Result<String, ServiceError> {
    tracing::info!("architect: generating diagram");
    let content = state.refined_notes().unwrap_or_else(|| state.raw_notes());
    let reply = model.complete(DIAGRAM_SYSTEM_PROMPT, content).await?;
    let code = checked_diagram(&reply)?;
    state.set_mermaid_code(code.clone());
    Ok(code)
}

/// Run refine then diagram over a fresh state record.
///
/// Returns `(refined_text, diagram_text)` when both steps succeed.
pub async fn run_pipeline(
    model: &dyn TextModel,
    raw_notes: &str,
) -> Result<(String, String), ServiceError> {
    let mut state = NoteState::new(raw_notes.to_owned());
    let refined = refine_step(model, &mut state).await?;
    let diagram = diagram_step(model, &mut state).await?;
    Ok((refined, diagram))
}

/// Merge labeled diagrams into one unified diagram.
///
/// An empty list is a validation error and performs no model call. A single
/// diagram is returned unchanged. Two or more are merged in one model call.
pub async fn combine_diagrams(
    model: &dyn TextModel,
    title: &str,
    diagrams: &[DiagramSource],
) -> Result<String, ServiceError> {
    if diagrams.is_empty() {
        return Err(ServiceError::Validation(
            "at least one diagram is required to combine".to_owned(),
        ));
    }
    if let [only] = diagrams {
        return Ok(only.mermaid_code.trim().to_owned());
    }

    tracing::info!(count = diagrams.len(), "combining diagrams");
    let reply = model.complete(COMBINE_SYSTEM_PROMPT, &combine_prompt(title, diagrams)).await?;
    checked_diagram(&reply)
}

fn combine_prompt(title: &str, diagrams: &[DiagramSource]) -> String {
    let mut prompt = format!(
        "Combine these {} architecture diagrams into ONE unified graph TD diagram \
titled \"{title}\".\n\n\
Requirements:\n\
1. Group each original diagram as a named subgraph.\n\
2. Identify logical connections BETWEEN the different systems.\n\
3. Use consistent styling and clear, concise node names.\n\n\
Diagrams to combine:\n",
        diagrams.len()
    );
    for diagram in diagrams {
        prompt.push_str("\n### ");
        prompt.push_str(&diagram.label);
        prompt.push_str("\n```mermaid\n");
        prompt.push_str(&diagram.mermaid_code);
        prompt.push_str("\n```\n");
    }
    prompt
}

/// Scrub fences from a model reply and insist the remainder declares a known
/// Mermaid diagram kind. An unrecognizable reply never reaches the page.
fn checked_diagram(reply: &str) -> Result<String, ServiceError> {
    let code = scrub_mermaid_fences(reply);
    if detect_diagram_kind(&code).is_none() {
        return Err(ServiceError::Generation(
            "model did not return a recognizable Mermaid diagram".to_owned(),
        ));
    }
    Ok(code)
}
