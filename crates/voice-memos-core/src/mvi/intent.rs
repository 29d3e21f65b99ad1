//! Base trait for intents (user/system actions).

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (button presses, typed commands)
/// - Effect outcomes (permission answers, recorder completion, timers)
/// - Notifications bubbled up from child state machines
pub trait Intent: Send + 'static {}
