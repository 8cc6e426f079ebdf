use std::path::Path;
use tracing::error;

use crate::models::StatusMap;

/// Loads the previous run's StatusMap. A missing file is the normal
/// first-run case and yields an empty map; an unreadable or unparseable
/// file is logged and also yields an empty map. Never fails.
pub fn load_state(path: impl AsRef<Path>) -> StatusMap {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                error!("Error loading state file: {}", e);
                StatusMap::new()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => StatusMap::new(),
        Err(e) => {
            error!("Error loading state file: {}", e);
            StatusMap::new()
        }
    }
}

/// Overwrites the state file with this run's StatusMap. A write failure is
/// logged and absorbed; the run is still considered complete.
pub fn save_state(path: impl AsRef<Path>, state: &StatusMap) {
    let path = path.as_ref();
    let serialized = match serde_json::to_string_pretty(state) {
        Ok(s) => s,
        Err(e) => {
            error!("Error saving state file: {}", e);
            return;
        }
    };
    if let Err(e) = std::fs::write(path, serialized) {
        error!("Error saving state file: {}", e);
    }
}
