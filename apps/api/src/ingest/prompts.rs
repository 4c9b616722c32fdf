// Import structuring prompt templates.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub const STRUCTURE_SYSTEM: &str = JSON_ONLY_SYSTEM;

/// Replace `{raw_text}` before sending.
pub const STRUCTURE_PROMPT_TEMPLATE: &str = r#"Extract the summary, work experience and skills from the following resume text.

INPUT TEXT:
{raw_text}

Return a JSON object with this EXACT schema:
{
  "summary": "2-4 sentence professional summary taken from the text",
  "experience": "one line per role header or bullet; bullets start with '- '",
  "skills": ["skill", "skill"]
}

RULES:
1. Use only information present in the input. Do NOT invent employers, dates or skills.
2. Keep role headers (title, company, dates) on their own line.
3. Return ONLY the JSON object — nothing else, no code fences."#;
