// Prompts for resume matching.
// Reuses the JSON-only fragment from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

const ANALYST_ROLE: &str = "You are an AI assistant specialized in resume analysis and job matching. \
    You read resumes, identify key skills, experiences and qualifications, \
    and recommend suitable job roles or career paths based on them.";

const TAILOR_ROLE: &str = "You improve passages of a resume so that it matches a job description. \
    You only rewrite text that already exists in the resume and report, for each rewrite, \
    the exact original passage and its replacement.";

/// Number of suggestions a recommendation asks for.
pub const RECOMMENDATION_COUNT: usize = 5;

pub fn recommendation_system() -> String {
    format!("{ANALYST_ROLE} {JSON_ONLY_SYSTEM}")
}

pub fn tailoring_system() -> String {
    format!("{ANALYST_ROLE} {TAILOR_ROLE} {JSON_ONLY_SYSTEM}")
}

/// Recommendation prompt template. Replace `{count}` and `{resume_text}`.
const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"Generate {count} jobs for the following resume.

Return a JSON object with this EXACT schema:
{
  "jobs": [
    {"title": "Backend Engineer", "description": "Why this role fits the candidate"}
  ]
}

RESUME:
{resume_text}"#;

/// Tailoring prompt template. Replace `{resume_text}` and `{job_description}`.
const TAILORING_PROMPT_TEMPLATE: &str = r#"Rewrite passages of the following resume to match the job description.

Return a JSON object with this EXACT schema:
{
  "changes": [
    {"originalText": "exact passage copied from the resume", "newText": "replacement passage"}
  ]
}

Rules:
- "originalText" must appear verbatim in the resume.
- Do NOT invent employers, titles, dates or degrees.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;

pub fn build_recommendation_prompt(resume_text: &str) -> String {
    let count = RECOMMENDATION_COUNT.to_string();
    render(
        RECOMMENDATION_PROMPT_TEMPLATE,
        &[
            ("count", count.as_str()),
            ("resume_text", resume_text.trim()),
        ],
    )
}

pub fn build_tailoring_prompt(resume_text: &str, job_description: &str) -> String {
    render(
        TAILORING_PROMPT_TEMPLATE,
        &[
            ("resume_text", resume_text.trim()),
            ("job_description", job_description.trim()),
        ],
    )
}

/// Fills `{name}` placeholders in one pass over the template, so braces inside
/// substituted values are never expanded.
fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let hit = values.iter().find_map(|(name, value)| {
            tail.strip_prefix('{')
                .and_then(|t| t.strip_prefix(*name))
                .and_then(|t| t.strip_prefix('}'))
                .map(|after| (*value, after))
        });
        match hit {
            Some((value, after)) => {
                out.push_str(value);
                rest = after;
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
