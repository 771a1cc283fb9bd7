use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{error, info, warn};

use crate::{alerts, metrics, Error};

use super::AppState;

pub(super) const ACK: &str = "Webhook received!";

pub async fn health() -> &'static str {
    "OK"
}

pub async fn metrics() -> String {
    metrics::gather_metrics()
}

/// Entry point for Alertmanager deliveries.
///
/// Every request that reaches this handler is acknowledged with 200: parse
/// failures, non-matching payloads, and remediation failures alike. The
/// sender only cares that the notification was delivered; outcome detail
/// goes to the logs and metrics.
pub async fn webhook(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    metrics::WEBHOOKS_RECEIVED_TOTAL.inc();

    let payload = match alerts::parse_payload(&body) {
        Ok(payload) => payload,
        Err(e) => {
            metrics::PARSE_FAILURES_TOTAL.inc();
            warn!(
                error = %e,
                body_len = body.len(),
                snippet = %body_snippet(&body),
                "discarding malformed alert payload"
            );
            return (StatusCode::OK, ACK);
        }
    };

    info!(
        status = %payload.status,
        alerts = payload.alerts.len(),
        "alert payload received"
    );

    let Some(entry) = state.matcher.first_match(&payload) else {
        info!(target = %state.matcher.target(), "no matching firing alert, nothing to do");
        return (StatusCode::OK, ACK);
    };

    info!(
        alertname = entry.alertname().unwrap_or("<unknown>"),
        "target alert firing, triggering remediation"
    );
    metrics::REMEDIATIONS_TRIGGERED_TOTAL.inc();

    match state.remediator.run().await {
        Ok(result) if result.succeeded() => {
            info!(run_id = %result.run_id, elapsed = ?result.duration, "remediation completed");
        }
        Ok(result) => {
            metrics::REMEDIATION_FAILURES_TOTAL.inc();
            error!(
                run_id = %result.run_id,
                outcome = ?result.outcome,
                stderr = %result.stderr,
                "remediation did not complete cleanly"
            );
        }
        Err(Error::Launch(e)) => {
            metrics::REMEDIATION_FAILURES_TOTAL.inc();
            error!(error = %e, "remediation process could not be launched");
        }
        Err(e) => {
            metrics::REMEDIATION_FAILURES_TOTAL.inc();
            error!(error = %e, "remediation run failed unexpectedly");
        }
    }

    (StatusCode::OK, ACK)
}

// Bounded, lossy view of the offending body for diagnostics.
fn body_snippet(body: &[u8]) -> String {
    let end = body.len().min(128);
    String::from_utf8_lossy(&body[..end]).into_owned()
}
