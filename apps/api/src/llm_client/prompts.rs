// Shared prompt constants.
// Each flow that needs LLM calls keeps its own templates in flows/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// System prompt for every structured-output call.
pub const STRUCTURED_OUTPUT_SYSTEM: &str = "You are a precise, structured assistant \
    for CampusConnect, a campus collaboration platform. \
    You MUST answer by calling the provided tool exactly once. \
    If you cannot call the tool, respond with valid JSON only that matches its input schema. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
