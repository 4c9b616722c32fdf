// Prompt templates for the improvement pass.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub const IMPROVE_SYSTEM: &str = JSON_ONLY_SYSTEM;

/// Replace `{tone_directive}`, `{fidelity_instruction}`, `{summary}`, `{experience}`
/// and `{skills}` before sending.
pub const IMPROVE_PROMPT_TEMPLATE: &str = r#"Improve the following resume sections.

{tone_directive}

{fidelity_instruction}

SUMMARY:
{summary}

EXPERIENCE (one line per bullet or role header):
{experience}

SKILLS:
{skills}

Return a JSON object with this EXACT schema:
{
  "summary": "improved summary text",
  "experience": "improved experience text, one line per bullet, same line order where possible",
  "skills": "comma-separated skills",
  "rationale": "one or two sentences on what changed and why",
  "changeSummary": {"bulletsChanged": 0, "metricsAdded": 0, "verbsAdded": 0}
}

RULES:
1. Omit a key entirely if that section should stay as it is.
2. Keep "experience" as plain text lines; do not return an array.
3. Return ONLY the JSON object."#;
