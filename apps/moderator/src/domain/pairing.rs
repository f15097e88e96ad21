//! Closing-activity pairing: every player asks or answers at least once.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::domain::seed_derivation::derive_pairing_seed;
use crate::domain::state::{Pairing, Phase, PlayerIndex, SessionState};
use crate::domain::turn_order::reshuffle;
use crate::errors::domain::{DomainError, ValidationKind};

/// Build the asker/answerer pairs for the closing activity.
///
/// The shuffled roster is paired consecutively (0-1, 2-3, ...). With an odd
/// count, the leftover player asks the first player of the shuffled order.
/// That player therefore appears twice. Coverage is worth the repeat;
/// do not "fix" this by dropping the extra pair.
pub fn generate_pairings(player_count: usize, rng: &mut impl Rng) -> Vec<Pairing> {
    let order: Vec<PlayerIndex> = reshuffle(player_count, rng);
    let mut pairings = Vec::with_capacity(player_count.div_ceil(2));

    let mut chunks = order.chunks_exact(2);
    for pair in &mut chunks {
        pairings.push(Pairing {
            asker: pair[0],
            answerer: pair[1],
        });
    }
    if let Some(&leftover) = chunks.remainder().first() {
        pairings.push(Pairing {
            asker: leftover,
            answerer: order[0],
        });
    }
    pairings
}

/// Generate the pairings for this session and enter FinalPairing.
pub fn begin_pairing(state: &mut SessionState) -> Result<(), DomainError> {
    if state.phase != Phase::Voting || state.votes.len() != state.players.len() {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "the pairing activity starts once every vote is in",
        ));
    }
    let mut rng = ChaCha8Rng::seed_from_u64(derive_pairing_seed(state.seed));
    state.pairings = generate_pairings(state.players.len(), &mut rng);
    state.pairing_cursor = 0;
    state.phase = Phase::FinalPairing;
    info!(
        session_id = %state.id,
        pairs = state.pairings.len(),
        "pairing activity started"
    );
    Ok(())
}

/// The pair currently asking/answering, or None once all are done.
pub fn current_pairing(state: &SessionState) -> Option<Pairing> {
    if state.phase != Phase::FinalPairing {
        return None;
    }
    state.pairings.get(state.pairing_cursor).copied()
}

/// Step past the current pair. Returns true when the activity is finished,
/// in which case the session moves to Result.
pub fn advance_pairing(state: &mut SessionState) -> Result<bool, DomainError> {
    if state.phase != Phase::FinalPairing {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "no pairing activity in progress",
        ));
    }
    state.pairing_cursor += 1;
    let done = state.pairing_cursor >= state.pairings.len();
    if done {
        state.phase = Phase::Result;
        info!(session_id = %state.id, "pairing activity finished, computing result");
    }
    Ok(done)
}
