use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// The caller identity resolved from a valid bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = match header {
            Some(value) => value.strip_prefix("Bearer ").ok_or_else(|| {
                warn!("Invalid Authorization header format");
                AppError::Unauthorized
            })?,
            None => {
                warn!("Missing Authorization header");
                return Err(AppError::Unauthorized);
            }
        };

        let user_id = state.tokens.verify(token.trim())?;
        Ok(AuthUser { user_id })
    }
}
