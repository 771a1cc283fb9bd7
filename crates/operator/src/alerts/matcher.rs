use tracing::debug;

use super::{AlertEntry, AlertPayload};

/// Decides whether a payload should trigger remediation.
///
/// The rule: the payload as a whole is firing and at least one entry carries
/// an `alertname` label equal to the configured target. Every entry is
/// scanned, not just the first one in the group.
#[derive(Debug, Clone)]
pub struct AlertMatcher {
    target_alert: String,
}

impl AlertMatcher {
    pub fn new(target_alert: impl Into<String>) -> Self {
        Self {
            target_alert: target_alert.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.target_alert
    }

    /// Returns the first entry whose `alertname` matches the target, if the
    /// payload is firing. A missing status, an empty alert list, or entries
    /// without an `alertname` label are all treated as "no match".
    pub fn first_match<'a>(&self, payload: &'a AlertPayload) -> Option<&'a AlertEntry> {
        if payload.status != "firing" {
            debug!(status = %payload.status, "payload not firing, skipping");
            return None;
        }

        payload
            .alerts
            .iter()
            .find(|entry| entry.alertname() == Some(self.target_alert.as_str()))
    }
}
