use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Json,
};

use crate::auth::AuthUser;
use crate::documents::DOCX_CONTENT_TYPE;
use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::matching::{self, JobSuggestion, MatchRequest};
use crate::state::AppState;

/// GET /api/openai/job-recommendation
pub async fn handle_job_recommendation(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<JobSuggestion>>, AppError> {
    Ok(Json(matching::recommend_jobs(&state, auth.user_id).await?))
}

/// POST /api/openai/job-matcher
///
/// Responds with the rewritten resume as a Word attachment.
pub async fn handle_job_matcher(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<MatchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let document = matching::tailor_resume(&state, auth.user_id, &request.description).await?;
    Ok((
        [
            (CONTENT_TYPE, DOCX_CONTENT_TYPE),
            (CONTENT_DISPOSITION, "attachment; filename=\"resume.docx\""),
        ],
        document,
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{login, register, send, test_app};

    async fn token(app: &axum::Router) -> String {
        register(app, "ada@example.com", "pw").await;
        login(app, "ada@example.com", "pw").await
    }

    #[tokio::test]
    async fn test_recommendation_without_resume_is_not_found() {
        let app = test_app();
        let token = token(&app).await;
        let (status, body) = send(
            &app,
            "GET",
            "/api/openai/job-recommendation",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "No resume found");
    }

    #[tokio::test]
    async fn test_matcher_without_resume_is_not_found() {
        let app = test_app();
        let token = token(&app).await;
        let (status, _) = send(
            &app,
            "POST",
            "/api/openai/job-matcher",
            Some(&token),
            Some(json!({ "description": "Rust engineer" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_matcher_rejects_empty_description() {
        let app = test_app();
        let token = token(&app).await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/openai/job-matcher",
            Some(&token),
            Some(json!({ "description": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unreachable_resume_is_document_error() {
        let app = test_app();
        let token = token(&app).await;
        let (status, _) = send(
            &app,
            "PATCH",
            "/api/user",
            Some(&token),
            Some(json!({ "resume_link": "http://127.0.0.1:1/resume.docx" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            "GET",
            "/api/openai/job-recommendation",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "DOCUMENT_ERROR");
    }

    #[tokio::test]
    async fn test_requires_auth() {
        let app = test_app();
        let (status, _) = send(&app, "GET", "/api/openai/job-recommendation", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
