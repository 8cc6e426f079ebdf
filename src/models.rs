use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Last-known up/down state per target URL. This is the only persisted
/// entity: rebuilt from scratch every run, so entries for removed targets
/// disappear on the next save.
pub type StatusMap = HashMap<String, bool>;

/// Outcome of a single check of one target. Produced fresh each run and
/// never persisted directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub url: String,
    pub is_up: bool,
    /// Human-readable reason, "OK" when up.
    pub detail: String,
    /// Only set when an HTTP response was actually received.
    pub status_code: Option<u16>,
}
