//! Base trait for state in MVI architecture.

use std::fmt::Debug;

/// Marker trait for state objects.
///
/// States should be:
/// - Cloneable (the runtime snapshots state to detect changes)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
pub trait UiState: Clone + PartialEq + Debug + Send + 'static {}
