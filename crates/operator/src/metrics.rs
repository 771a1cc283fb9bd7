use lazy_static::lazy_static;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

lazy_static! {
    pub static ref WEBHOOKS_RECEIVED_TOTAL: IntCounter = register_int_counter!(
        "remediator_webhooks_received_total",
        "Total number of webhook deliveries received."
    )
    .unwrap();
    pub static ref PARSE_FAILURES_TOTAL: IntCounter = register_int_counter!(
        "remediator_parse_failures_total",
        "Total number of webhook bodies that failed to parse."
    )
    .unwrap();
    pub static ref REMEDIATIONS_TRIGGERED_TOTAL: IntCounter = register_int_counter!(
        "remediator_remediations_triggered_total",
        "Total number of remediation runs launched."
    )
    .unwrap();
    pub static ref REMEDIATION_FAILURES_TOTAL: IntCounter = register_int_counter!(
        "remediator_remediation_failures_total",
        "Total number of remediation runs that failed, timed out, or could not launch."
    )
    .unwrap();
}

// Function to gather metrics for exposition
pub fn gather_metrics() -> String {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode(&metric_families, &mut buffer)
        .expect("Failed to encode metrics");
    String::from_utf8(buffer).expect("Failed to convert metrics to string")
}
