//! Model-View-Intent (MVI) primitives.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑          │
//!    │          └──→ Effects ──→ Runner
//!    └───────────────────────────┘
//! ```
//!
//! - **State**: plain data describing everything the view renders
//! - **Intent**: user actions or effect outcomes
//! - **Reducer**: the only place state changes; returns effect requests
//!   instead of performing side effects

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
