//! Runs the external helper programs (scraper, document tools) and captures stdout.

use std::process::Stdio;

use anyhow::{anyhow, Result};
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// A program plus its leading arguments, parsed once from a shell-style
/// command line such as `python3 scripts/linkedin_scraper.py`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut parts = shlex::split(command_line)
            .ok_or_else(|| anyhow!("Unbalanced quoting in command: {command_line}"))?
            .into_iter();
        let program = parts
            .next()
            .ok_or_else(|| anyhow!("Command line is empty"))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Runs the command with `extra` appended and returns its stdout.
    /// A non-zero exit status is an error carrying stderr.
    pub async fn run<I, S>(&self, extra: I) -> Result<String, ProcessError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .args(extra)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running {:?}", cmd.as_std());

        let output = cmd.output().await.map_err(|source| ProcessError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(ProcessError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr,
            });
        }
        if !stderr.is_empty() {
            debug!("{} stderr: {}", self.program, stderr);
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
