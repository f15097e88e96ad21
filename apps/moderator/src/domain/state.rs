use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::text::fold_for_match;
use crate::errors::domain::{DomainError, ValidationKind};

/// Index into `SessionState::players` (registration order).
pub type PlayerIndex = usize;

/// Overall session progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Session created or reset; waiting for a start intent.
    Idle,
    /// Collecting player names.
    Registration,
    /// Each player privately confirms having seen their role.
    RoleReveal,
    /// Players give one clue each in shuffled turn order.
    ClueRound,
    /// The group decides: another round, or vote now.
    RoundDecision,
    /// Each player in registration order names a suspect.
    Voting,
    /// Closing asker/answerer activity.
    FinalPairing,
    /// Winner computed; terminal until reset.
    Result,
}

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Canonically capitalized display name, unique within the session.
    pub name: String,
    /// Set once the player confirmed their role during the reveal.
    pub has_seen_role: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_seen_role: false,
        }
    }
}

/// One asker/answerer pair for the closing activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub asker: PlayerIndex,
    pub answerer: PlayerIndex,
}

/// Who said what, for audit and debugging. Append-only.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub speaker: Speaker,
    pub utterance: String,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Speaker {
    User,
    Moderator,
}

/// Opaque session identifier used in logs and the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Entire mutable state of one game, sufficient for pure domain operations.
///
/// Owned exclusively by one phase controller for the lifetime of a game;
/// every mutation goes through the domain functions in this module's
/// siblings.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub id: SessionId,
    /// Current phase.
    pub phase: Phase,
    /// Registered players in registration order. Append-only during
    /// Registration, immutable afterwards until reset.
    pub players: Vec<Player>,
    /// Topic drawn at game start; never shown to the impostor.
    pub secret_topic: Option<String>,
    /// Index of the one impostor, chosen uniformly at game start.
    pub impostor_index: Option<PlayerIndex>,
    /// Permutation of player indices, reshuffled at the start of each
    /// clue round. Only meaningful during ClueRound.
    pub turn_order: Vec<PlayerIndex>,
    /// Position within the active ordered sequence: the registration list
    /// during RoleReveal, `turn_order` during ClueRound.
    pub turn_cursor: usize,
    /// Names (canonical) that confirmed seeing their role.
    pub ready_players: BTreeSet<String>,
    /// 1-based clue round counter; 0 before the first round.
    pub round_number: u32,
    /// Clues given this round, in speaking order.
    pub clues_this_round: Vec<(PlayerIndex, String)>,
    /// Voter name -> voted-for name (both canonical). One vote per voter;
    /// voting concludes when every player has voted.
    pub votes: BTreeMap<String, String>,
    /// Pairs for the closing activity, generated once per game.
    pub pairings: Vec<Pairing>,
    /// Position within `pairings`.
    pub pairing_cursor: usize,
    /// Append-only utterance log.
    pub history: Vec<HistoryEntry>,
    /// Base RNG seed; all shuffles and draws derive from it.
    pub seed: u64,
}

impl SessionState {
    /// Fresh session in Idle with the given base seed.
    pub fn new(seed: u64) -> Self {
        Self {
            id: SessionId::generate(),
            phase: Phase::Idle,
            players: Vec::new(),
            secret_topic: None,
            impostor_index: None,
            turn_order: Vec::new(),
            turn_cursor: 0,
            ready_players: BTreeSet::new(),
            round_number: 0,
            clues_this_round: Vec::new(),
            votes: BTreeMap::new(),
            pairings: Vec::new(),
            pairing_cursor: 0,
            history: Vec::new(),
            seed,
        }
    }

    /// Reinitialize everything except the id, returning the session to
    /// Idle with a new base seed. Configuration lives outside this struct
    /// and is untouched.
    pub fn reset(&mut self, seed: u64) {
        let id = self.id;
        *self = Self::new(seed);
        self.id = id;
    }

    /// Append an utterance to the audit log.
    pub fn record(&mut self, speaker: Speaker, utterance: impl Into<String>) {
        self.history.push(HistoryEntry {
            speaker,
            utterance: utterance.into(),
            at: OffsetDateTime::now_utc(),
        });
    }

    /// Look up a player by name, case- and diacritic-insensitively.
    pub fn find_player(&self, name: &str) -> Option<PlayerIndex> {
        let wanted = fold_for_match(name);
        self.players
            .iter()
            .position(|p| fold_for_match(&p.name) == wanted)
    }

    /// Whether every registered player confirmed their role.
    pub fn all_ready(&self) -> bool {
        !self.players.is_empty() && self.ready_players.len() == self.players.len()
    }
}

pub fn require_topic<'a>(state: &'a SessionState, ctx: &'static str) -> Result<&'a str, DomainError> {
    state.secret_topic.as_deref().ok_or_else(|| {
        DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("secret topic must be set ({ctx})"),
        )
    })
}

pub fn require_impostor(state: &SessionState, ctx: &'static str) -> Result<PlayerIndex, DomainError> {
    state.impostor_index.ok_or_else(|| {
        DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("impostor must be assigned ({ctx})"),
        )
    })
}
