//! Public snapshot API for rendering session state without exposing
//! internals. Pure read; no side effects.

use serde::{Deserialize, Serialize};

use crate::domain::pairing::current_pairing;
use crate::domain::state::{Phase, SessionState};
use crate::domain::turn_order::current_player;
use crate::domain::voting::{resolve, tally, GameOutcome};

/// Top-level snapshot combining roster facts and phase-specific data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub players: Vec<String>,
    pub total_players: usize,
    pub phase: PhaseSnapshot,
}

/// Adjacently tagged union of phase-specific snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data")]
pub enum PhaseSnapshot {
    Idle,
    Registration(RegistrationSnapshot),
    RoleReveal(RoleRevealSnapshot),
    ClueRound(ClueRoundSnapshot),
    RoundDecision(RoundDecisionSnapshot),
    Voting(VotingSnapshot),
    FinalPairing(FinalPairingSnapshot),
    Result(ResultSnapshot),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegistrationSnapshot {
    pub registered: usize,
    pub min_needed: usize,
}

/// What the screen may show while one player looks at their role.
///
/// `topic` is only present when the revealing player is NOT the impostor;
/// the impostor never sees the secret topic anywhere.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleRevealSnapshot {
    pub revealing: Option<String>,
    pub is_impostor: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub ready_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClueRoundSnapshot {
    pub round_number: u32,
    pub current_turn_player: Option<String>,
    pub clues_given: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundDecisionSnapshot {
    pub round_number: u32,
    pub clues_given: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VotingSnapshot {
    pub current_voter: Option<String>,
    pub votes_cast: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalPairingSnapshot {
    pub current_asker: Option<String>,
    pub current_answerer: Option<String>,
    pub pairing_progress: PairingProgress,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairingProgress {
    /// 1-based index of the active pair; clamped to `total` when done.
    pub current: usize,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultSnapshot {
    pub most_voted: Option<String>,
    pub vote_count: usize,
    pub impostor: Option<String>,
    pub outcome: Option<GameOutcome>,
}

/// Produce a snapshot of the current session state. The `min_needed` field
/// comes from configuration, which lives outside the session.
pub fn snapshot(state: &SessionState, min_players: usize) -> SessionSnapshot {
    let phase = match state.phase {
        Phase::Idle => PhaseSnapshot::Idle,
        Phase::Registration => PhaseSnapshot::Registration(RegistrationSnapshot {
            registered: state.players.len(),
            min_needed: min_players,
        }),
        Phase::RoleReveal => PhaseSnapshot::RoleReveal(snapshot_role_reveal(state)),
        Phase::ClueRound => PhaseSnapshot::ClueRound(ClueRoundSnapshot {
            round_number: state.round_number,
            current_turn_player: current_player(state).map(|p| p.name.clone()),
            clues_given: state.clues_this_round.len(),
        }),
        Phase::RoundDecision => PhaseSnapshot::RoundDecision(RoundDecisionSnapshot {
            round_number: state.round_number,
            clues_given: state.clues_this_round.len(),
        }),
        Phase::Voting => PhaseSnapshot::Voting(VotingSnapshot {
            current_voter: current_player(state).map(|p| p.name.clone()),
            votes_cast: state.votes.len(),
        }),
        Phase::FinalPairing => PhaseSnapshot::FinalPairing(snapshot_pairing(state)),
        Phase::Result => PhaseSnapshot::Result(snapshot_result(state)),
    };

    SessionSnapshot {
        session_id: state.id.to_string(),
        players: state.players.iter().map(|p| p.name.clone()).collect(),
        total_players: state.players.len(),
        phase,
    }
}

fn snapshot_role_reveal(state: &SessionState) -> RoleRevealSnapshot {
    let revealing_index =
        (state.turn_cursor < state.players.len()).then_some(state.turn_cursor);
    let is_impostor = revealing_index.is_some() && revealing_index == state.impostor_index;
    RoleRevealSnapshot {
        revealing: revealing_index.map(|i| state.players[i].name.clone()),
        is_impostor,
        topic: if revealing_index.is_some() && !is_impostor {
            state.secret_topic.clone()
        } else {
            None
        },
        ready_count: state.ready_players.len(),
    }
}

fn snapshot_pairing(state: &SessionState) -> FinalPairingSnapshot {
    let pair = current_pairing(state);
    FinalPairingSnapshot {
        current_asker: pair.map(|p| state.players[p.asker].name.clone()),
        current_answerer: pair.map(|p| state.players[p.answerer].name.clone()),
        pairing_progress: PairingProgress {
            current: (state.pairing_cursor + 1).min(state.pairings.len()),
            total: state.pairings.len(),
        },
    }
}

fn snapshot_result(state: &SessionState) -> ResultSnapshot {
    let tallied = tally(&state.players, &state.votes);
    let impostor = state
        .impostor_index
        .map(|i| state.players[i].name.clone());
    let outcome = match (&tallied, &impostor) {
        (Some((most_voted, _)), Some(impostor_name)) => Some(resolve(most_voted, impostor_name)),
        _ => None,
    };
    ResultSnapshot {
        most_voted: tallied.as_ref().map(|(name, _)| name.clone()),
        vote_count: tallied.map(|(_, count)| count).unwrap_or(0),
        impostor,
        outcome,
    }
}
