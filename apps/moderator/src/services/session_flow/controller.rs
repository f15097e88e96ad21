//! The phase controller: one utterance in, one outcome out.
//!
//! Owns the session state exclusively. Every call runs the deterministic
//! extractor first; the generative narrator is only consulted to phrase a
//! clarification, never to decide a transition.

use rand::{RngCore, SeedableRng};
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::domain::intent::{Intent, IntentExtractor};
use crate::domain::registration::{begin_registration, confirm_role_seen, register_player, start_game};
use crate::domain::rounds::{begin_clue_round, save_clue};
use crate::domain::snapshot::{snapshot, SessionSnapshot};
use crate::domain::state::{require_impostor, require_topic, Phase, SessionId, SessionState, Speaker};
use crate::domain::turn_order::current_player;
use crate::domain::voting::{begin_voting, record_vote, resolve, tally};
use crate::domain::pairing;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::services::session_flow::composer::ResponseComposer;
use crate::services::session_flow::directives::{Directive, Outcome};
use crate::services::session_flow::narrative::{NarrativeContext, NarrativeGenerator};

/// Drives one game session from registration to result.
pub struct SessionController {
    config: GameConfig,
    extractor: IntentExtractor,
    composer: ResponseComposer,
    narrator: Option<Box<dyn NarrativeGenerator>>,
    session: SessionState,
}

impl SessionController {
    /// Controller with a fixed base seed; the whole game replays
    /// identically from it.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let extractor = IntentExtractor::new(&config);
        Self {
            config,
            extractor,
            composer: ResponseComposer,
            narrator: None,
            session: SessionState::new(seed),
        }
    }

    /// Controller seeded from OS entropy.
    pub fn from_entropy(config: GameConfig) -> Self {
        let seed = rand::rngs::StdRng::from_os_rng().next_u64();
        Self::new(config, seed)
    }

    pub fn with_narrator(mut self, narrator: Box<dyn NarrativeGenerator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    pub fn id(&self) -> SessionId {
        self.session.id
    }

    /// Read access for collaborators and tests. All mutation goes through
    /// `handle` / `reset`.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Read-only UI snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        snapshot(&self.session, self.config.min_players)
    }

    /// Return the session to Idle with a fresh entropy seed.
    pub fn reset(&mut self) {
        let seed = rand::rngs::StdRng::from_os_rng().next_u64();
        self.reset_with_seed(seed);
    }

    pub fn reset_with_seed(&mut self, seed: u64) {
        self.session.reset(seed);
    }

    /// Process one utterance: extract intents for the current phase, apply
    /// the resulting mutations, and compose the response. Unrecognized
    /// utterances change nothing (except in RoundDecision, where
    /// unrecognized input falls through to the vote).
    pub fn handle(&mut self, utterance: &str) -> Outcome {
        self.session.record(Speaker::User, utterance);
        let intents = self.extractor.extract(&self.session, utterance);
        debug!(
            session_id = %self.session.id,
            phase = ?self.session.phase,
            ?intents,
            "utterance classified"
        );

        let outcome = match self.session.phase {
            Phase::Idle => self.handle_idle(&intents, utterance),
            Phase::Registration => self.handle_registration(&intents, utterance),
            Phase::RoleReveal => self.handle_role_reveal(&intents, utterance),
            Phase::ClueRound => self.handle_clue_round(&intents, utterance),
            Phase::RoundDecision => self.handle_round_decision(&intents),
            Phase::Voting => self.handle_voting(&intents, utterance),
            Phase::FinalPairing => self.handle_pairing(&intents, utterance),
            Phase::Result => Outcome::text_only(self.composer.game_over()),
        };

        self.session.record(Speaker::Moderator, outcome.response_text.clone());
        outcome
    }

    fn handle_idle(&mut self, intents: &[Intent], utterance: &str) -> Outcome {
        if intents.contains(&Intent::Start) {
            if begin_registration(&mut self.session).is_ok() {
                return Outcome::new(vec![Directive::Start], self.composer.ask_first_player());
            }
        }
        self.clarify(utterance)
    }

    fn handle_registration(&mut self, intents: &[Intent], utterance: &str) -> Outcome {
        if intents.is_empty() {
            return self.clarify(utterance);
        }

        let mut directives = Vec::new();
        let mut registered_name: Option<String> = None;

        if let Some(Intent::Name(name)) = intents
            .iter()
            .find(|i| matches!(i, Intent::Name(_)))
            .cloned()
        {
            match register_player(&mut self.session, &name) {
                Ok(()) => {
                    directives.push(Directive::Register(name.clone()));
                    registered_name = Some(name);
                }
                Err(err) if err.kind() == &ValidationKind::DuplicateName => {
                    return Outcome::text_only(self.composer.duplicate_name(&name));
                }
                Err(err) => return self.validation_reply(&err),
            }

            // Auto-start once the cap is reached.
            if self.session.players.len() >= self.config.auto_start_cap {
                return match start_game(&mut self.session, &self.config) {
                    Ok(()) => {
                        directives.push(Directive::BeginGame);
                        let first = self.current_player_name();
                        Outcome::new(directives, self.composer.game_started(&first))
                    }
                    Err(err) => self.validation_reply(&err),
                };
            }
        }

        if intents.contains(&Intent::EndOfList) {
            return match start_game(&mut self.session, &self.config) {
                Ok(()) => {
                    directives.push(Directive::BeginGame);
                    let first = self.current_player_name();
                    Outcome::new(directives, self.composer.game_started(&first))
                }
                Err(err) if err.kind() == &ValidationKind::InsufficientPlayers => Outcome::new(
                    directives,
                    self.composer
                        .not_enough_players(self.session.players.len(), self.config.min_players),
                ),
                Err(err) => self.validation_reply(&err),
            };
        }

        match registered_name {
            Some(name) => Outcome::new(directives, self.composer.registered(&name)),
            None => self.clarify(utterance),
        }
    }

    fn handle_role_reveal(&mut self, intents: &[Intent], utterance: &str) -> Outcome {
        if !intents.contains(&Intent::Confirmation) {
            return self.clarify(utterance);
        }
        match confirm_role_seen(&mut self.session) {
            Ok(true) => match begin_clue_round(&mut self.session) {
                Ok(()) => {
                    let first = self.current_player_name();
                    Outcome::new(
                        vec![Directive::PlayerReady],
                        self.composer.round_started(self.session.round_number, &first),
                    )
                }
                Err(err) => self.validation_reply(&err),
            },
            Ok(false) => {
                let next = self.current_player_name();
                Outcome::new(vec![Directive::PlayerReady], self.composer.next_reveal(&next))
            }
            Err(err) => self.validation_reply(&err),
        }
    }

    fn handle_clue_round(&mut self, intents: &[Intent], utterance: &str) -> Outcome {
        let Some(Intent::Clue(clue)) = intents.first() else {
            return self.clarify(utterance);
        };
        match save_clue(&mut self.session, &self.config, clue) {
            Ok(true) => Outcome::new(
                vec![Directive::ClueSaved],
                self.composer.round_complete(),
            ),
            Ok(false) => {
                let next = self.current_player_name();
                Outcome::new(vec![Directive::ClueSaved], self.composer.clue_saved(&next))
            }
            Err(err) => self.validation_reply(&err),
        }
    }

    /// RoundDecision is the one phase where unrecognized input is not a
    /// no-op: anything that is not a continue request opens the vote.
    fn handle_round_decision(&mut self, intents: &[Intent]) -> Outcome {
        if intents.contains(&Intent::Continue) {
            return match begin_clue_round(&mut self.session) {
                Ok(()) => {
                    let first = self.current_player_name();
                    Outcome::new(
                        vec![Directive::NewRound],
                        self.composer.round_started(self.session.round_number, &first),
                    )
                }
                Err(err) => self.validation_reply(&err),
            };
        }
        match begin_voting(&mut self.session) {
            Ok(()) => {
                let first = self.current_player_name();
                Outcome::new(vec![Directive::StartVote], self.composer.voting_opened(&first))
            }
            Err(err) => self.validation_reply(&err),
        }
    }

    fn handle_voting(&mut self, intents: &[Intent], utterance: &str) -> Outcome {
        let Some(Intent::Vote(target)) = intents.first() else {
            return self.clarify(utterance);
        };
        match record_vote(&mut self.session, target) {
            Ok(true) => match pairing::begin_pairing(&mut self.session) {
                Ok(()) => {
                    let (asker, answerer) = self.pairing_names();
                    Outcome::new(
                        vec![Directive::Vote(target.clone()), Directive::BeginPairing],
                        self.composer.pairing_started(&asker, &answerer),
                    )
                }
                Err(err) => self.validation_reply(&err),
            },
            Ok(false) => {
                let next = self.current_player_name();
                Outcome::new(
                    vec![Directive::Vote(target.clone())],
                    self.composer.vote_recorded(&next),
                )
            }
            Err(err) => self.validation_reply(&err),
        }
    }

    fn handle_pairing(&mut self, intents: &[Intent], utterance: &str) -> Outcome {
        if !intents.contains(&Intent::Confirmation) {
            return self.clarify(utterance);
        }
        match pairing::advance_pairing(&mut self.session) {
            Ok(true) => Outcome::new(vec![Directive::PairingAnswered], self.result_text()),
            Ok(false) => {
                let (asker, answerer) = self.pairing_names();
                Outcome::new(
                    vec![Directive::PairingAnswered],
                    self.composer.next_pairing(&asker, &answerer),
                )
            }
            Err(err) => self.validation_reply(&err),
        }
    }

    fn result_text(&self) -> String {
        let Some((most_voted, vote_count)) = tally(&self.session.players, &self.session.votes)
        else {
            return self.composer.game_over();
        };
        let Ok(impostor_index) = require_impostor(&self.session, "result") else {
            return self.composer.game_over();
        };
        let Ok(topic) = require_topic(&self.session, "result") else {
            return self.composer.game_over();
        };
        let impostor = self.session.players[impostor_index].name.clone();
        let outcome = resolve(&most_voted, &impostor);
        self.composer
            .result(outcome, &impostor, &most_voted, vote_count, topic)
    }

    /// Clarification path for unrecognized utterances: ask the narrator if
    /// one is wired in, otherwise (or on any narrator error) fall back to
    /// the composer's phase prompt. The session is never mutated here.
    fn clarify(&self, utterance: &str) -> Outcome {
        let fallback = self.composer.clarify(self.session.phase);
        if let Some(narrator) = &self.narrator {
            let ctx = NarrativeContext {
                phase: self.session.phase,
                utterance,
                fallback_prompt: &fallback,
            };
            match narrator.clarify(&ctx) {
                Ok(text) => return Outcome::text_only(text),
                Err(err) => {
                    warn!(session_id = %self.session.id, %err, "narrator failed, using fallback");
                }
            }
        }
        Outcome::text_only(fallback)
    }

    /// Validation failures become clarifying replies; the session was not
    /// mutated by the failed operation.
    fn validation_reply(&self, err: &DomainError) -> Outcome {
        debug!(session_id = %self.session.id, %err, "rejected utterance");
        match err.kind() {
            ValidationKind::InsufficientPlayers => Outcome::text_only(
                self.composer
                    .not_enough_players(self.session.players.len(), self.config.min_players),
            ),
            ValidationKind::ClueTooShort => {
                Outcome::text_only(self.composer.clarify(Phase::ClueRound))
            }
            _ => Outcome::text_only(self.composer.clarify(self.session.phase)),
        }
    }

    /// Name of the player the active sequence points at, for whichever
    /// sequence the current phase walks.
    fn current_player_name(&self) -> String {
        current_player(&self.session)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn pairing_names(&self) -> (String, String) {
        match pairing::current_pairing(&self.session) {
            Some(pair) => (
                self.session.players[pair.asker].name.clone(),
                self.session.players[pair.answerer].name.clone(),
            ),
            None => (String::new(), String::new()),
        }
    }
}
