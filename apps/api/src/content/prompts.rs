// Prompt templates for service-assisted scoring.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub const SCORE_SYSTEM: &str = JSON_ONLY_SYSTEM;

/// Replace `{resume_text}` before sending.
pub const SCORE_PROMPT_TEMPLATE: &str = r#"Rate the following resume text for clarity, impact and quantification.

RESUME TEXT:
{resume_text}

Return a JSON object with this EXACT schema:
{
  "score": 0-100 integer,
  "breakdown": {"impact": 0.0-1.0, "clarity": 0.0-1.0, "quantification": 0.0-1.0},
  "suggestions": ["short, concrete suggestion"]
}

RULES:
1. "score" MUST be an integer between 0 and 100.
2. At most 5 suggestions, each under 120 characters.
3. Return ONLY the JSON object."#;
