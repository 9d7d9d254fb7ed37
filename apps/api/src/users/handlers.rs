use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::auth::{password, AuthUser};
use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::state::AppState;
use crate::users::models::{UserChanges, UserProfile, UserUpdate};

/// GET /api/user
pub async fn handle_get_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    let user = state.users.find_by_id(auth.user_id).await?.ok_or_else(|| {
        warn!("User {} not found", auth.user_id);
        AppError::NotFound("No user found".to_string())
    })?;
    Ok(Json(user.into()))
}

/// PATCH /api/user
///
/// The password is re-hashed only when it is part of the change set.
pub async fn handle_edit_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(changes): ValidatedJson<UserChanges>,
) -> Result<Json<&'static str>, AppError> {
    let password_hash = match changes.password {
        Some(plain) => Some(password::hash_blocking(plain).await?),
        None => None,
    };

    let update = UserUpdate {
        first_name: changes.first_name,
        last_name: changes.last_name,
        password_hash,
        resume_link: changes.resume_link,
    };

    state
        .users
        .update(auth.user_id, update)
        .await?
        .ok_or_else(|| AppError::NotFound("No user found".to_string()))?;

    info!("Updated profile of user {}", auth.user_id);
    Ok(Json("User details changed"))
}

/// DELETE /api/user
pub async fn handle_delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<&'static str>, AppError> {
    if !state.users.delete(auth.user_id).await? {
        return Err(AppError::NotFound("No user found".to_string()));
    }
    info!("Deleted user {}", auth.user_id);
    Ok(Json("User deleted successfully"))
}
