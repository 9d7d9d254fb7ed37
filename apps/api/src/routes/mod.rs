pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::{auth, jobs, linkedin, matching, users};

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Auth (no token)
        .route("/auth/register", post(auth::handlers::handle_register))
        .route("/auth/login", post(auth::handlers::handle_login))
        // Jobs
        .route(
            "/job",
            get(jobs::handlers::handle_list_jobs).post(jobs::handlers::handle_create_job),
        )
        .route("/job/order", patch(jobs::handlers::handle_reorder_jobs))
        .route(
            "/job/:job_id",
            get(jobs::handlers::handle_get_job)
                .patch(jobs::handlers::handle_edit_job)
                .delete(jobs::handlers::handle_delete_job),
        )
        // Profile
        .route(
            "/user",
            get(users::handlers::handle_get_user)
                .patch(users::handlers::handle_edit_user)
                .delete(users::handlers::handle_delete_user),
        )
        // Resume matching
        .route(
            "/openai/job-recommendation",
            get(matching::handlers::handle_job_recommendation),
        )
        .route(
            "/openai/job-matcher",
            post(matching::handlers::handle_job_matcher),
        )
        // LinkedIn passthrough
        .route(
            "/linkedin/list",
            get(linkedin::handlers::handle_list_postings),
        )
        .route(
            "/linkedin/job/:id",
            get(linkedin::handlers::handle_get_posting),
        );

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api", api)
        .with_state(state)
}
