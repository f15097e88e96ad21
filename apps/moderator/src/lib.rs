#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod state;

// Re-exports for the public API
pub use config::GameConfig;
pub use domain::snapshot::SessionSnapshot;
pub use domain::state::{Phase, SessionId, SessionState};
pub use domain::voting::GameOutcome;
pub use errors::domain::DomainError;
pub use services::session_flow::{
    strip_directives, Directive, NarrativeContext, NarrativeError, NarrativeGenerator, Outcome,
    SessionController,
};
pub use state::SessionRegistry;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_support::logging::init();
}
