use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Result;

/// AlertManager webhook payload, reduced to the fields the pipeline consumes.
///
/// Missing fields decode to their defaults so that a sparse delivery never
/// fails the parse; only a body that is not a JSON object is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertPayload {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub alerts: Vec<AlertEntry>,
}

/// One alert instance within a grouped delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertEntry {
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
}

impl AlertEntry {
    pub fn alertname(&self) -> Option<&str> {
        self.labels.get("alertname").map(String::as_str)
    }
}

/// Decodes a raw request body into an [`AlertPayload`].
pub fn parse_payload(body: &[u8]) -> Result<AlertPayload> {
    let payload = serde_json::from_slice(body)?;
    Ok(payload)
}
