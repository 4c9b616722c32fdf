// Shared prompt fragments. Each module that calls the text service keeps its own
// prompts.rs alongside it; cross-cutting pieces live here.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to every rewrite prompt so the service never fabricates history.
pub const FIDELITY_INSTRUCTION: &str = "\
    CRITICAL: Keep every employer, title, date, degree and technology exactly as given. \
    Do NOT invent new roles, projects or credentials. \
    Any metric you add must be plausible for the described work and phrased as approximate (e.g. '~20%').";
