//! Session flow orchestration: phase controller, response composition,
//! directive grammar, and the optional narrative capability.

pub mod composer;
pub mod controller;
pub mod directives;
pub mod narrative;

#[cfg(test)]
mod tests;

pub use controller::SessionController;
pub use directives::{strip_directives, Directive, Outcome};
pub use narrative::{NarrativeContext, NarrativeError, NarrativeGenerator};
