use std::sync::Arc;

use crate::auth::TokenService;
use crate::documents::DocumentService;
use crate::jobs::JobStore;
use crate::linkedin::ScraperClient;
use crate::llm_client::LlmClient;
use crate::users::UserStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobStore>,
    pub users: Arc<dyn UserStore>,
    pub tokens: TokenService,
    pub llm: LlmClient,
    pub documents: DocumentService,
    pub scraper: ScraperClient,
}
