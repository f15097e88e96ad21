//! Optional generative narration capability.
//!
//! The controller consults the narrator only to phrase a clarification
//! after deterministic extraction fails; it never depends on it for
//! correctness. Any error here is absorbed and the composer's fallback
//! prompt is used instead.

use thiserror::Error;

use crate::domain::state::Phase;

/// Errors a narrative collaborator can raise. All are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    #[error("narrative generator unavailable")]
    Unavailable,
    #[error("narrative generator rate-limited")]
    RateLimited,
    #[error("narrative generator failed: {0}")]
    Internal(String),
}

/// What the narrator gets to work with when phrasing a clarification.
#[derive(Debug, Clone)]
pub struct NarrativeContext<'a> {
    pub phase: Phase,
    /// The utterance the extractor could not classify.
    pub utterance: &'a str,
    /// The deterministic prompt that will be used if narration fails.
    pub fallback_prompt: &'a str,
}

/// A generative collaborator that can rephrase clarification prompts.
pub trait NarrativeGenerator: Send + Sync {
    fn clarify(&self, ctx: &NarrativeContext<'_>) -> Result<String, NarrativeError>;
}
