//! Resume matching: job recommendations from a resume, and a resume rewritten
//! for a given job description.

pub mod handlers;
pub mod prompts;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::documents::{usable_changes, ResumeFile, TextChange};
use crate::errors::AppError;
use crate::state::AppState;

/// One suggested role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSuggestion {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct RecommendationReply {
    jobs: Vec<JobSuggestion>,
}

#[derive(Debug, Deserialize)]
struct TailoringReply {
    changes: Vec<TextChange>,
}

/// POST /api/openai/job-matcher body.
#[derive(Debug, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1, max = 20000, message = "description must not be empty"))]
    pub description: String,
}

/// Downloads the caller's resume. A user without a resume link has nothing to match.
async fn load_resume(state: &AppState, user_id: Uuid) -> Result<ResumeFile, AppError> {
    let user = state.users.find_by_id(user_id).await?.ok_or_else(|| {
        warn!("User {user_id} not found");
        AppError::NotFound("No user found".to_string())
    })?;
    let link = user
        .resume_link
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(|| AppError::NotFound("No resume found".to_string()))?;
    state.documents.download(&link).await
}

pub async fn recommend_jobs(
    state: &AppState,
    user_id: Uuid,
) -> Result<Vec<JobSuggestion>, AppError> {
    let resume = load_resume(state, user_id).await?;
    let resume_text = state.documents.extract_text(&resume).await?;

    let reply: RecommendationReply = state
        .llm
        .call_json(
            &prompts::build_recommendation_prompt(&resume_text),
            &prompts::recommendation_system(),
        )
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let jobs = trim_suggestions(reply.jobs);
    info!("Generated {} job recommendations for user {user_id}", jobs.len());
    Ok(jobs)
}

/// Returns the bytes of the caller's resume rewritten for `job_description`.
pub async fn tailor_resume(
    state: &AppState,
    user_id: Uuid,
    job_description: &str,
) -> Result<Bytes, AppError> {
    let resume = load_resume(state, user_id).await?;
    let resume_text = state.documents.extract_text(&resume).await?;

    let reply: TailoringReply = state
        .llm
        .call_json(
            &prompts::build_tailoring_prompt(&resume_text, job_description),
            &prompts::tailoring_system(),
        )
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let changes = usable_changes(reply.changes);
    info!("Applying {} resume changes for user {user_id}", changes.len());
    state.documents.replace_text(&resume, &changes).await
}

/// Drops blank suggestions and keeps at most the requested number.
fn trim_suggestions(jobs: Vec<JobSuggestion>) -> Vec<JobSuggestion> {
    jobs.into_iter()
        .filter(|j| !j.title.trim().is_empty())
        .take(prompts::RECOMMENDATION_COUNT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recommendation_reply_decodes() {
        let reply: RecommendationReply = serde_json::from_value(json!({
            "jobs": [
                {"title": "Data Analyst", "description": "SQL heavy"},
                {"title": "BI Developer", "description": "Dashboards"}
            ]
        }))
        .unwrap();
        assert_eq!(reply.jobs.len(), 2);
        assert_eq!(reply.jobs[0].title, "Data Analyst");
    }

    #[test]
    fn test_tailoring_reply_decodes_camel_case_changes() {
        let reply: TailoringReply = serde_json::from_value(json!({
            "changes": [{"originalText": "Wrote Java", "newText": "Wrote Rust"}]
        }))
        .unwrap();
        assert_eq!(reply.changes[0].new_text, "Wrote Rust");
    }

    #[test]
    fn test_trim_suggestions_caps_and_drops_blank() {
        let jobs: Vec<JobSuggestion> = (0..7)
            .map(|i| JobSuggestion {
                title: if i == 0 { " ".to_string() } else { format!("Role {i}") },
                description: String::new(),
            })
            .collect();
        let trimmed = trim_suggestions(jobs);
        assert_eq!(trimmed.len(), 5);
        assert_eq!(trimmed[0].title, "Role 1");
    }

    #[test]
    fn test_match_request_requires_description() {
        let empty = MatchRequest {
            description: String::new(),
        };
        assert!(empty.validate().is_err());
        let ok = MatchRequest {
            description: "Rust backend engineer".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
