//! Turn sequencing: the cursor over the phase's active player sequence.
//!
//! The active sequence depends on the phase: the registration list during
//! RoleReveal, the shuffled `turn_order` during ClueRound, and the
//! registration list again during Voting (where the vote count is the
//! cursor).

use rand::prelude::*;

use crate::domain::state::{Phase, Player, PlayerIndex, SessionState};

/// Uniformly random permutation of `0..player_count`.
pub fn reshuffle(player_count: usize, rng: &mut impl Rng) -> Vec<PlayerIndex> {
    let mut order: Vec<PlayerIndex> = (0..player_count).collect();
    order.shuffle(rng);
    order
}

/// Length of the sequence the cursor currently walks.
pub fn active_len(state: &SessionState) -> usize {
    match state.phase {
        Phase::RoleReveal | Phase::Voting => state.players.len(),
        Phase::ClueRound => state.turn_order.len(),
        _ => 0,
    }
}

/// Advance the cursor by one; returns true when the active sequence is
/// exhausted after the step.
pub fn advance(state: &mut SessionState) -> bool {
    state.turn_cursor += 1;
    state.turn_cursor >= active_len(state)
}

/// The player whose turn is active, or None when the sequence is exhausted
/// or the phase has no turn concept.
pub fn current_player(state: &SessionState) -> Option<&Player> {
    let index = current_player_index(state)?;
    state.players.get(index)
}

pub fn current_player_index(state: &SessionState) -> Option<PlayerIndex> {
    match state.phase {
        Phase::RoleReveal => {
            (state.turn_cursor < state.players.len()).then_some(state.turn_cursor)
        }
        Phase::ClueRound => state.turn_order.get(state.turn_cursor).copied(),
        // During voting the number of recorded votes is the cursor.
        Phase::Voting => {
            let next = state.votes.len();
            (next < state.players.len()).then_some(next)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::domain::state::Player;

    fn state_with_players(names: &[&str]) -> SessionState {
        let mut state = SessionState::new(42);
        for name in names {
            state.players.push(Player::new(*name));
        }
        state
    }

    #[test]
    fn reshuffle_is_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut order = reshuffle(5, &mut rng);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn reshuffle_same_seed_same_order() {
        let a = reshuffle(6, &mut ChaCha8Rng::seed_from_u64(9));
        let b = reshuffle(6, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn advance_reports_exhaustion_in_role_reveal() {
        let mut state = state_with_players(&["Ana", "Luis", "Sofia"]);
        state.phase = Phase::RoleReveal;
        assert!(!advance(&mut state));
        assert!(!advance(&mut state));
        assert!(advance(&mut state));
        assert!(current_player(&state).is_none());
    }

    #[test]
    fn clue_round_follows_turn_order() {
        let mut state = state_with_players(&["Ana", "Luis", "Sofia"]);
        state.phase = Phase::ClueRound;
        state.turn_order = vec![2, 0, 1];
        assert_eq!(current_player(&state).unwrap().name, "Sofia");
        advance(&mut state);
        assert_eq!(current_player(&state).unwrap().name, "Ana");
    }

    #[test]
    fn voting_cursor_is_vote_count() {
        let mut state = state_with_players(&["Ana", "Luis", "Sofia"]);
        state.phase = Phase::Voting;
        assert_eq!(current_player(&state).unwrap().name, "Ana");
        state
            .votes
            .insert("Ana".to_string(), "Luis".to_string());
        assert_eq!(current_player(&state).unwrap().name, "Luis");
    }
}
