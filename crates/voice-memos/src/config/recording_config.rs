use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where recordings are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Recording directory (None = `voice-memos` under the system temp dir).
    #[serde(default)]
    pub directory: Option<PathBuf>,
}
