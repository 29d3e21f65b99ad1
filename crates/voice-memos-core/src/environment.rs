//! Collaborators injected into the coordinator.
//!
//! Everything non-deterministic the reducers need (time, identifiers, where
//! recordings go) is reached through these traits, bundled in
//! [`Environment`] and handed to the coordinator at construction.

use std::{fmt, path::PathBuf, sync::Arc};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// Source of fresh unique identifiers.
pub trait UniqueIdSource: Send + Sync {
    /// Next identifier. Never repeats for the lifetime of the source.
    fn next(&self) -> Uuid;
}

/// Directory new recordings are written to.
pub trait TempDirectoryProvider: Send + Sync {
    /// Directory path. Not required to exist yet.
    fn path(&self) -> PathBuf;
}

/// Collaborator bundle threaded through the coordinator.
#[derive(Clone)]
pub struct Environment {
    /// Timestamps for new recording sessions.
    pub clock: Arc<dyn Clock>,
    /// Identifiers for recording files and memos.
    pub ids: Arc<dyn UniqueIdSource>,
    /// Location of new recording files.
    pub temp_dir: Arc<dyn TempDirectoryProvider>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("temp_dir", &self.temp_dir.path())
            .finish_non_exhaustive()
    }
}
