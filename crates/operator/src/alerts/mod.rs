mod matcher;
mod payload;

pub use matcher::AlertMatcher;
pub use payload::{parse_payload, AlertEntry, AlertPayload};
