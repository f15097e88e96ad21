//! Vote collection, tally, and winner resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::state::{Phase, Player, SessionState};
use crate::domain::turn_order;
use crate::errors::domain::{DomainError, ValidationKind};

/// Final outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The most-voted player was the impostor.
    CitizensWin,
    /// The group voted out an innocent player.
    ImpostorWins,
}

/// Open the vote after the group decided to stop giving clues.
pub fn begin_voting(state: &mut SessionState) -> Result<(), DomainError> {
    if state.phase != Phase::RoundDecision {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "voting opens from the round decision",
        ));
    }
    state.votes.clear();
    state.phase = Phase::Voting;
    info!(session_id = %state.id, "voting opened");
    Ok(())
}

/// Record the current voter's vote for `target_name`. Voters vote in
/// registration order; the number of recorded votes selects the voter.
/// Returns true when every player has voted.
pub fn record_vote(state: &mut SessionState, target_name: &str) -> Result<bool, DomainError> {
    if state.phase != Phase::Voting {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "votes are only taken during voting",
        ));
    }
    let Some(target) = state.find_player(target_name) else {
        return Err(DomainError::validation(
            ValidationKind::UnknownVoteTarget,
            format!("{target_name} is not on the roster"),
        ));
    };
    let Some(voter) = turn_order::current_player_index(state) else {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "every player has already voted",
        ));
    };

    let voter_name = state.players[voter].name.clone();
    let target_name = state.players[target].name.clone();
    debug!(session_id = %state.id, voter = %voter_name, target = %target_name, "vote recorded");
    state.votes.insert(voter_name, target_name);
    Ok(state.votes.len() == state.players.len())
}

/// Most-voted name and its count.
///
/// Tie-break: among targets sharing the maximum count, the earliest in
/// registration order wins. Returns None when no votes were cast.
pub fn tally(players: &[Player], votes: &BTreeMap<String, String>) -> Option<(String, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for (index, player) in players.iter().enumerate() {
        let count = votes.values().filter(|t| *t == &player.name).count();
        if count > 0 && best.is_none_or(|(_, c)| count > c) {
            best = Some((index, count));
        }
    }
    best.map(|(index, count)| (players[index].name.clone(), count))
}

/// Did the group catch the impostor?
pub fn resolve(most_voted: &str, impostor_name: &str) -> GameOutcome {
    if most_voted == impostor_name {
        GameOutcome::CitizensWin
    } else {
        GameOutcome::ImpostorWins
    }
}
