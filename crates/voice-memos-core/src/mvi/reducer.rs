//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::UiState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen. It never
/// performs I/O: anything that has to happen outside the state is returned
/// as an effect request and resolved by the runtime, whose outcome comes
/// back as a new intent.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// The effect requests this reducer can emit.
    type Effect;

    /// Apply an intent to the state in place and return the effects to run,
    /// in the order they should be dispatched.
    fn reduce(&self, state: &mut Self::State, intent: Self::Intent) -> Vec<Self::Effect>;
}
