mod executor;

pub use executor::PlaybookExecutor;

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::Result;

/// Fixed description of the process to launch: executable, discrete argument
/// list, working directory. Constructed once from configuration; request data
/// never flows into it.
#[derive(Debug, Clone)]
pub struct RemediationRequest {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,
}

impl RemediationRequest {
    /// Lossy rendering of the command line for log output.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// How a remediation run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemediationOutcome {
    /// The process ran to completion. The code is `None` when the process was
    /// terminated by a signal.
    Exited(Option<i32>),
    /// The process exceeded the configured deadline and was killed.
    TimedOut,
}

/// Outcome of one remediation run.
#[derive(Debug, Clone)]
pub struct RemediationResult {
    pub run_id: Uuid,
    pub outcome: RemediationOutcome,
    pub stdout: String,
    pub stderr: String,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

impl RemediationResult {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, RemediationOutcome::Exited(Some(0)))
    }
}

/// Seam between the webhook handler and the external automation process.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Remediator: Send + Sync {
    /// Launches the remediation process and waits for it to finish or time
    /// out. Exactly one [`RemediationResult`] is produced per invocation;
    /// a non-zero exit is reported in the result, not as an error.
    async fn run(&self) -> Result<RemediationResult>;
}
