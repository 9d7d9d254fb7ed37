use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::Value;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::PathParam;
use crate::linkedin::query::{is_valid_posting_id, ListingQuery};
use crate::state::AppState;

/// GET /api/linkedin/list
pub async fn handle_list_postings(
    State(state): State<AppState>,
    _auth: AuthUser,
    query: Result<Query<ListingQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    Ok(Json(state.scraper.list(&query).await?))
}

/// GET /api/linkedin/job/:id
pub async fn handle_get_posting(
    State(state): State<AppState>,
    _auth: AuthUser,
    PathParam(posting_id): PathParam<String>,
) -> Result<Json<Value>, AppError> {
    if !is_valid_posting_id(&posting_id) {
        return Err(AppError::Validation(format!(
            "Invalid LinkedIn job id: {posting_id}"
        )));
    }
    Ok(Json(state.scraper.details(&posting_id).await?))
}
