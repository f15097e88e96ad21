//! Phase-scoped deterministic intent extraction.
//!
//! This is the engine's only language understanding: bounded keyword and
//! roster matching, case-insensitive and diacritic-tolerant. It must be
//! able to drive a whole game on its own: the generative narrator is
//! optional and may be unavailable at any time.

use crate::config::GameConfig;
use crate::domain::state::{Phase, SessionState};
use crate::domain::text::{alphabetic_tokens, capitalize, fold_for_match};

/// A structured reading of one utterance. The controller interprets only
/// the subset relevant to the current phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Start a game (Idle).
    Start,
    /// A candidate player name (Registration).
    Name(String),
    /// No more players to register (Registration).
    EndOfList,
    /// The current player confirmed seeing their role (RoleReveal) or
    /// acknowledged the current pairing exchange (FinalPairing).
    Confirmation,
    /// The clue text, taken verbatim (ClueRound).
    Clue(String),
    /// Another clue round (RoundDecision).
    Continue,
    /// Stop giving clues and vote (RoundDecision).
    Stop,
    /// A vote against a roster name (Voting).
    Vote(String),
}

/// Deterministic extractor parameterized by the configured keyword sets.
///
/// All sets are folded once at construction; matching never allocates per
/// keyword.
#[derive(Debug, Clone)]
pub struct IntentExtractor {
    stopwords: Vec<String>,
    start: Vec<String>,
    finish: Vec<String>,
    ready: Vec<String>,
    continue_round: Vec<String>,
    vote: Vec<String>,
    ack: Vec<String>,
    min_clue_len: usize,
}

impl IntentExtractor {
    pub fn new(config: &GameConfig) -> Self {
        let fold_all = |words: &[String]| words.iter().map(|w| fold_for_match(w)).collect();
        Self {
            stopwords: fold_all(&config.stopwords),
            start: fold_all(&config.start_keywords),
            finish: fold_all(&config.finish_keywords),
            ready: fold_all(&config.ready_keywords),
            continue_round: fold_all(&config.continue_keywords),
            vote: fold_all(&config.vote_keywords),
            ack: fold_all(&config.ack_keywords),
            min_clue_len: config.min_clue_len,
        }
    }

    /// Extract the intents an utterance carries for the session's current
    /// phase. Empty means unrecognized: the controller answers with a
    /// clarifying prompt and mutates nothing.
    ///
    /// Only Registration can yield two intents (a name plus the
    /// end-of-list signal from the same utterance); every other phase
    /// yields at most one.
    pub fn extract(&self, state: &SessionState, utterance: &str) -> Vec<Intent> {
        let folded = fold_for_match(utterance);
        match state.phase {
            Phase::Idle => self.extract_start(&folded),
            Phase::Registration => self.extract_registration(utterance, &folded),
            Phase::RoleReveal => self.extract_confirmation(&folded, &self.ready),
            Phase::ClueRound => self.extract_clue(utterance),
            Phase::RoundDecision => self.extract_decision(&folded),
            Phase::Voting => self.extract_vote(state, &folded),
            Phase::FinalPairing => self.extract_acknowledgement(utterance, &folded),
            Phase::Result => Vec::new(),
        }
    }

    fn extract_start(&self, folded: &str) -> Vec<Intent> {
        if contains_any(folded, &self.start) {
            vec![Intent::Start]
        } else {
            Vec::new()
        }
    }

    /// Name extraction: first alphabetic token longer than two characters
    /// that is neither a stopword nor an end-of-list keyword, canonically
    /// capitalized. The end-of-list keywords are checked independently, so
    /// "Marco, the last one" fires both intents while a bare "last" only
    /// closes the list.
    fn extract_registration(&self, raw: &str, folded: &str) -> Vec<Intent> {
        let mut intents = Vec::new();
        let name = alphabetic_tokens(raw)
            .find(|token| {
                let folded_token = fold_for_match(token);
                token.chars().count() > 2
                    && !self.stopwords.contains(&folded_token)
                    && !self.finish.contains(&folded_token)
            })
            .map(capitalize);
        if let Some(name) = name {
            intents.push(Intent::Name(name));
        }
        if contains_any(folded, &self.finish) {
            intents.push(Intent::EndOfList);
        }
        intents
    }

    fn extract_confirmation(&self, folded: &str, keywords: &[String]) -> Vec<Intent> {
        if contains_any(folded, keywords) {
            vec![Intent::Confirmation]
        } else {
            Vec::new()
        }
    }

    fn extract_clue(&self, raw: &str) -> Vec<Intent> {
        let clue = raw.trim();
        if clue.chars().count() >= self.min_clue_len {
            vec![Intent::Clue(clue.to_string())]
        } else {
            Vec::new()
        }
    }

    fn extract_decision(&self, folded: &str) -> Vec<Intent> {
        // Vote keywords take precedence: "otra votación" means vote.
        if contains_any(folded, &self.vote) {
            vec![Intent::Stop]
        } else if contains_any(folded, &self.continue_round) {
            vec![Intent::Continue]
        } else {
            Vec::new()
        }
    }

    /// Roster scan: the first registered player whose folded name occurs
    /// in the folded utterance wins.
    fn extract_vote(&self, state: &SessionState, folded: &str) -> Vec<Intent> {
        state
            .players
            .iter()
            .find(|p| folded.contains(&fold_for_match(&p.name)))
            .map(|p| vec![Intent::Vote(p.name.clone())])
            .unwrap_or_default()
    }

    /// The pairing activity advances on an acknowledgement keyword or on
    /// any utterance of clue length (the answer itself counts).
    fn extract_acknowledgement(&self, raw: &str, folded: &str) -> Vec<Intent> {
        if contains_any(folded, &self.ack) || raw.trim().chars().count() >= self.min_clue_len {
            vec![Intent::Confirmation]
        } else {
            Vec::new()
        }
    }
}

fn contains_any(folded: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| folded.contains(k.as_str()))
}
