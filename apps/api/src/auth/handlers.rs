use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::{info, warn};
use validator::Validate;

use crate::auth::password;
use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::state::AppState;
use crate::users::models::NewUser;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(rename = "firstName")]
    #[validate(length(min = 1))]
    pub first_name: String,
    #[serde(rename = "lastName")]
    #[validate(length(min = 1))]
    pub last_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<&'static str>), AppError> {
    let password_hash = password::hash_blocking(req.password).await?;

    let user = state
        .users
        .create(NewUser {
            email: req.email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json("User registered successfully")))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same response.
pub async fn handle_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<String>, AppError> {
    let Some(user) = state.users.find_by_email(&req.email).await? else {
        warn!("Login failed: unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !password::verify_blocking(req.password, user.password_hash).await? {
        warn!("Login failed: wrong password for user {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(user.id)?;
    Ok(Json(token))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::{login, register, send, test_app};

    #[tokio::test]
    async fn test_register_then_login_returns_token() {
        let app = test_app();
        let (status, _) = register(&app, "ada@example.com", "pw").await;
        assert_eq!(status, StatusCode::CREATED);

        let token = login(&app, "ada@example.com", "pw").await;
        assert_eq!(token.split('.').count(), 3, "expected a JWT");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let app = test_app();
        register(&app, "dup@example.com", "pw").await;
        let (status, body) = register(&app, "dup@example.com", "other").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_identical() {
        let app = test_app();
        register(&app, "ada@example.com", "pw").await;

        let (wrong_status, wrong_body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "nope" })),
        )
        .await;
        let (unknown_status, unknown_body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@example.com", "password": "pw" })),
        )
        .await;

        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_body, unknown_body);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let app = test_app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "email": "not-an-email",
                "password": "pw",
                "firstName": "Ada",
                "lastName": "Lovelace"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_register_rejects_missing_fields() {
        let app = test_app();
        let (status, _) = send(
            &app,
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": "ada@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
