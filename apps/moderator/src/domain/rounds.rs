//! Clue round lifecycle: starting rounds, saving clues, closing the round.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::domain::seed_derivation::derive_round_seed;
use crate::domain::state::{Phase, SessionState};
use crate::domain::turn_order;
use crate::errors::domain::{DomainError, ValidationKind};

/// Begin a clue round: bump the round counter, clear this round's clues,
/// and reshuffle the speaking order.
///
/// Valid from RoleReveal (first round, all players ready) and from
/// RoundDecision (another round requested).
pub fn begin_clue_round(state: &mut SessionState) -> Result<(), DomainError> {
    match state.phase {
        Phase::RoleReveal if state.all_ready() => {}
        Phase::RoundDecision => {}
        _ => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "a clue round needs every player ready or a continue decision",
            ));
        }
    }

    state.round_number += 1;
    state.clues_this_round.clear();
    let seed = derive_round_seed(state.seed, state.round_number);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    state.turn_order = turn_order::reshuffle(state.players.len(), &mut rng);
    state.turn_cursor = 0;
    state.phase = Phase::ClueRound;
    info!(
        session_id = %state.id,
        round = state.round_number,
        "clue round started"
    );
    Ok(())
}

/// Save the current speaker's clue and advance the turn. Returns true when
/// the round is complete, in which case the session moves to RoundDecision.
pub fn save_clue(
    state: &mut SessionState,
    config: &GameConfig,
    clue: &str,
) -> Result<bool, DomainError> {
    if state.phase != Phase::ClueRound {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "clues are only taken during a clue round",
        ));
    }
    let clue = clue.trim();
    if clue.chars().count() < config.min_clue_len {
        return Err(DomainError::validation(
            ValidationKind::ClueTooShort,
            format!("a clue needs at least {} characters", config.min_clue_len),
        ));
    }
    let Some(speaker) = turn_order::current_player_index(state) else {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "turn cursor past the speaking order",
        ));
    };

    state.clues_this_round.push((speaker, clue.to_string()));
    let exhausted = turn_order::advance(state);
    debug!(
        session_id = %state.id,
        speaker,
        clues = state.clues_this_round.len(),
        "clue saved"
    );
    if exhausted {
        state.phase = Phase::RoundDecision;
        info!(session_id = %state.id, round = state.round_number, "round complete");
    }
    Ok(exhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::{begin_registration, confirm_role_seen, register_player, start_game};

    fn ready_session(names: &[&str]) -> SessionState {
        let config = GameConfig::default();
        let mut state = SessionState::new(42);
        begin_registration(&mut state).unwrap();
        for name in names {
            register_player(&mut state, name).unwrap();
        }
        start_game(&mut state, &config).unwrap();
        for _ in names {
            confirm_role_seen(&mut state).unwrap();
        }
        state
    }

    #[test]
    fn first_round_starts_after_reveal() {
        let mut state = ready_session(&["Ana", "Luis", "Sofia"]);
        begin_clue_round(&mut state).unwrap();
        assert_eq!(state.phase, Phase::ClueRound);
        assert_eq!(state.round_number, 1);
        assert_eq!(state.turn_order.len(), 3);
        assert_eq!(state.turn_cursor, 0);
    }

    #[test]
    fn full_round_of_clues_moves_to_decision() {
        let config = GameConfig::default();
        let mut state = ready_session(&["Ana", "Luis", "Sofia"]);
        begin_clue_round(&mut state).unwrap();
        assert!(!save_clue(&mut state, &config, "it is warm").unwrap());
        assert!(!save_clue(&mut state, &config, "you eat it").unwrap());
        assert!(save_clue(&mut state, &config, "coastal dish").unwrap());
        assert_eq!(state.phase, Phase::RoundDecision);
        assert_eq!(state.clues_this_round.len(), 3);
    }

    #[test]
    fn short_clue_is_rejected_without_advancing() {
        let config = GameConfig::default();
        let mut state = ready_session(&["Ana", "Luis", "Sofia"]);
        begin_clue_round(&mut state).unwrap();
        let err = save_clue(&mut state, &config, "  a ").unwrap_err();
        assert_eq!(err.kind(), &ValidationKind::ClueTooShort);
        assert_eq!(state.turn_cursor, 0);
        assert!(state.clues_this_round.is_empty());
    }

    #[test]
    fn new_round_reshuffles_and_clears() {
        let config = GameConfig::default();
        let mut state = ready_session(&["Ana", "Luis", "Sofia", "Marco"]);
        begin_clue_round(&mut state).unwrap();
        for _ in 0..4 {
            save_clue(&mut state, &config, "something vague").unwrap();
        }
        begin_clue_round(&mut state).unwrap();
        assert_eq!(state.round_number, 2);
        assert!(state.clues_this_round.is_empty());
        assert_eq!(state.turn_cursor, 0);
        let mut order = state.turn_order.clone();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn same_seed_replays_same_orders() {
        let mut a = ready_session(&["Ana", "Luis", "Sofia"]);
        let mut b = ready_session(&["Ana", "Luis", "Sofia"]);
        begin_clue_round(&mut a).unwrap();
        begin_clue_round(&mut b).unwrap();
        assert_eq!(a.turn_order, b.turn_order);
    }
}
