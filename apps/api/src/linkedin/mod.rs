// LinkedIn passthrough: listing search and posting details, served by the
// external scraper process. Its stdout JSON is returned as-is.

pub mod handlers;
pub mod query;

use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::process::ExternalCommand;
use query::ListingQuery;

#[derive(Clone)]
pub struct ScraperClient {
    command: ExternalCommand,
}

impl ScraperClient {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }

    /// `<scraper> list --flag=value ...`
    pub async fn list(&self, query: &ListingQuery) -> Result<Value, AppError> {
        let mut args = vec!["list".to_string()];
        args.extend(query.to_args());
        info!("Scraping LinkedIn listings ({} filters)", args.len() - 1);
        self.run_json(args).await
    }

    /// `<scraper> details <id>`
    pub async fn details(&self, posting_id: &str) -> Result<Value, AppError> {
        info!("Scraping LinkedIn posting {posting_id}");
        self.run_json(["details", posting_id]).await
    }

    async fn run_json<I, S>(&self, args: I) -> Result<Value, AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let stdout = self
            .command
            .run(args)
            .await
            .map_err(|e| AppError::Scraper(e.to_string()))?;
        serde_json::from_str(stdout.trim())
            .map_err(|e| AppError::Scraper(format!("Scraper printed invalid JSON: {e}")))
    }
}
