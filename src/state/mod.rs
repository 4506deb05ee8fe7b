//! State management module
//! 
//! This module contains the session state machines, the zone aggregate and
//! the shared application state wrapping them.

pub mod affirmation;
pub mod app_state;
pub mod breathing;
pub mod meditation;
pub mod snapshot;
pub mod zone_state;

// Re-export main types
pub use affirmation::AffirmationRotator;
pub use app_state::AppState;
pub use breathing::BreathingSession;
pub use meditation::MeditationSession;
pub use snapshot::ZoneSnapshot;
pub use zone_state::{SessionKind, TickOutcome, ZoneState};
