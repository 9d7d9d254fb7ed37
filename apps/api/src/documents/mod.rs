//! Resume documents: download from the user's resume link, extract text, and
//! write a copy with passages replaced.
//!
//! Text extraction and replacement are delegated to external tools. The read
//! tool prints the document text for `<path>`; the replace tool takes `<path>`
//! and a JSON array of `{originalText, newText}` and writes `<stem>_new.docx`
//! next to the input.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::process::ExternalCommand;

/// Largest resume download accepted.
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// One passage to rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChange {
    #[serde(rename = "originalText")]
    pub original_text: String,
    #[serde(rename = "newText")]
    pub new_text: String,
}

/// A downloaded resume living in its own temporary directory.
/// The directory and everything written into it is removed on drop.
pub struct ResumeFile {
    _dir: TempDir,
    path: PathBuf,
}

impl ResumeFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the replace tool writes its output for this file.
    pub fn replaced_path(&self) -> PathBuf {
        replaced_path_for(&self.path)
    }
}

#[derive(Clone)]
pub struct DocumentService {
    http: Client,
    read: ExternalCommand,
    replace: ExternalCommand,
    max_bytes: usize,
}

impl DocumentService {
    pub fn new(read: ExternalCommand, replace: ExternalCommand) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            http,
            read,
            replace,
            max_bytes: MAX_RESUME_BYTES,
        })
    }

    #[cfg(test)]
    fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Downloads the resume at `url` into a fresh temporary directory.
    pub async fn download(&self, url: &str) -> Result<ResumeFile, AppError> {
        info!("Downloading resume from {url}");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Document(format!("Resume download failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Document(format!(
                "Resume download returned HTTP {}",
                response.status()
            )));
        }

        let body = self.read_capped(response).await?;

        let dir = tempfile::tempdir()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create temp dir: {e}")))?;
        let path = dir.path().join("resume.docx");
        tokio::fs::write(&path, &body)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write resume: {e}")))?;

        debug!("Resume saved to {} ({} bytes)", path.display(), body.len());
        Ok(ResumeFile { _dir: dir, path })
    }

    /// Reads the body chunk by chunk, failing once it exceeds `max_bytes`.
    async fn read_capped(&self, mut response: reqwest::Response) -> Result<Vec<u8>, AppError> {
        let too_large = || {
            AppError::Document(format!("Resume is larger than {} bytes", self.max_bytes))
        };

        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| AppError::Document(format!("Failed to read resume body: {e}")))?
        {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }

    /// Returns the plain text of a resume.
    pub async fn extract_text(&self, file: &ResumeFile) -> Result<String, AppError> {
        let text = self
            .read
            .run([file.path()])
            .await
            .map_err(|e| AppError::Document(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(AppError::Document("Resume contains no text".to_string()));
        }
        Ok(text)
    }

    /// Applies `changes` and returns the bytes of the rewritten document.
    pub async fn replace_text(
        &self,
        file: &ResumeFile,
        changes: &[TextChange],
    ) -> Result<Bytes, AppError> {
        let changes_json = serde_json::to_string(changes)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode changes: {e}")))?;

        self.replace
            .run([file.path().as_os_str(), OsStr::new(&changes_json)])
            .await
            .map_err(|e| AppError::Document(e.to_string()))?;

        let output = file.replaced_path();
        let bytes = tokio::fs::read(&output).await.map_err(|e| {
            AppError::Document(format!(
                "Replace tool produced no file at {}: {e}",
                output.display()
            ))
        })?;
        Ok(Bytes::from(bytes))
    }
}

/// `dir/resume.docx` → `dir/resume_new.docx`.
fn replaced_path_for(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_new.docx"))
}

/// Drops changes that would match nothing.
pub fn usable_changes(changes: Vec<TextChange>) -> Vec<TextChange> {
    changes
        .into_iter()
        .filter(|c| !c.original_text.trim().is_empty())
        .collect()
}
