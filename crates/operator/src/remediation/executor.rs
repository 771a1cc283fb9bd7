use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{RemediationOutcome, RemediationRequest, RemediationResult, Remediator};
use crate::{Error, Result};

/// Runs the configured playbook as an isolated child process.
///
/// Arguments are passed as a discrete list with no shell in between; nothing
/// from the alert payload reaches the command line or the child environment.
pub struct PlaybookExecutor {
    request: RemediationRequest,
    deadline: Duration,
}

impl PlaybookExecutor {
    pub fn new(request: RemediationRequest, deadline: Duration) -> Self {
        Self { request, deadline }
    }
}

#[async_trait]
impl Remediator for PlaybookExecutor {
    async fn run(&self) -> Result<RemediationResult> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let start = Instant::now();

        info!(
            %run_id,
            command = %self.request.display_command(),
            working_dir = %self.request.working_dir.display(),
            "starting remediation run"
        );

        let child = Command::new(&self.request.program)
            .args(&self.request.args)
            .current_dir(&self.request.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(Error::Launch)?;

        // wait_with_output owns the child; if the deadline elapses the future
        // is dropped and kill_on_drop terminates the process, so no orphan
        // survives the timeout path.
        match timeout(self.deadline, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let result = RemediationResult {
                    run_id,
                    outcome: RemediationOutcome::Exited(output.status.code()),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    started_at,
                    duration: start.elapsed(),
                };
                info!(
                    %run_id,
                    exit_code = ?output.status.code(),
                    elapsed = ?result.duration,
                    "remediation run finished"
                );
                debug!(%run_id, stdout = %result.stdout, stderr = %result.stderr, "remediation run output");
                Ok(result)
            }
            Ok(Err(e)) => Err(Error::Io(e)),
            Err(_) => {
                warn!(%run_id, deadline = ?self.deadline, "remediation run timed out, child killed");
                Ok(RemediationResult {
                    run_id,
                    outcome: RemediationOutcome::TimedOut,
                    stdout: String::new(),
                    stderr: String::new(),
                    started_at,
                    duration: start.elapsed(),
                })
            }
        }
    }
}
