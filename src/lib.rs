//! Zen Zone - A state-managed HTTP service for guided relaxation sessions
//! 
//! This library provides the breathing and meditation session state machines,
//! their countdown timers and the HTTP API a presentation client drives them
//! through.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use catalog::Catalog;
pub use config::Config;
pub use error::{Result, ZenError};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
