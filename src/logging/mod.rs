pub mod ndjson;

use chrono::Utc;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub ts: String,
    pub event: &'static str,
    pub step: Option<&'static str>,
    pub payload: Value,
}

impl SessionEvent {
    pub fn new(event: &'static str, step: Option<&'static str>, payload: Value) -> Self {
        SessionEvent {
            ts: Utc::now().to_rfc3339(),
            event,
            step,
            payload,
        }
    }
}
