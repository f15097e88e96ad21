//! Whole-game integration over the pure domain operations.

use crate::config::GameConfig;
use crate::domain::pairing::{advance_pairing, begin_pairing, current_pairing};
use crate::domain::registration::{begin_registration, confirm_role_seen, register_player, start_game};
use crate::domain::rounds::{begin_clue_round, save_clue};
use crate::domain::state::{Phase, SessionState};
use crate::domain::voting::{begin_voting, record_vote, resolve, tally, GameOutcome};

fn played_to_decision(names: &[&str], seed: u64) -> (SessionState, GameConfig) {
    let config = GameConfig::default();
    let mut state = SessionState::new(seed);
    begin_registration(&mut state).unwrap();
    for name in names {
        register_player(&mut state, name).unwrap();
    }
    start_game(&mut state, &config).unwrap();
    for _ in names {
        confirm_role_seen(&mut state).unwrap();
    }
    begin_clue_round(&mut state).unwrap();
    for i in 0..names.len() {
        let done = save_clue(&mut state, &config, &format!("clue number {i}")).unwrap();
        assert_eq!(done, i == names.len() - 1);
    }
    (state, config)
}

#[test]
fn full_game_reaches_result() {
    let (mut state, _config) = played_to_decision(&["Ana", "Luis", "Sofia"], 42);
    assert_eq!(state.phase, Phase::RoundDecision);

    begin_voting(&mut state).unwrap();
    // Voters act in registration order: Ana, Luis, Sofia.
    assert!(!record_vote(&mut state, "Luis").unwrap());
    assert!(!record_vote(&mut state, "Ana").unwrap());
    assert!(record_vote(&mut state, "Luis").unwrap());

    let (most_voted, count) = tally(&state.players, &state.votes).unwrap();
    assert_eq!((most_voted.as_str(), count), ("Luis", 2));

    begin_pairing(&mut state).unwrap();
    assert_eq!(state.phase, Phase::FinalPairing);
    let total = state.pairings.len();
    assert_eq!(total, 2); // ceil(3/2)
    for i in 0..total {
        assert!(current_pairing(&state).is_some());
        let done = advance_pairing(&mut state).unwrap();
        assert_eq!(done, i == total - 1);
    }
    assert_eq!(state.phase, Phase::Result);

    let impostor = &state.players[state.impostor_index.unwrap()].name;
    let outcome = resolve("Luis", impostor);
    if impostor == "Luis" {
        assert_eq!(outcome, GameOutcome::CitizensWin);
    } else {
        assert_eq!(outcome, GameOutcome::ImpostorWins);
    }
}

#[test]
fn roster_is_frozen_after_start() {
    let (state, _config) = played_to_decision(&["Ana", "Luis", "Sofia"], 7);
    assert_eq!(state.players.len(), 3);
    let mut after = state.clone();
    assert!(register_player(&mut after, "Marco").is_err());
    assert_eq!(after.players.len(), 3);
}

#[test]
fn several_rounds_accumulate() {
    let (mut state, config) = played_to_decision(&["Ana", "Luis", "Sofia"], 9);
    begin_clue_round(&mut state).unwrap();
    assert_eq!(state.round_number, 2);
    assert!(state.clues_this_round.is_empty());
    for i in 0..3 {
        save_clue(&mut state, &config, &format!("second round {i}")).unwrap();
    }
    assert_eq!(state.phase, Phase::RoundDecision);
    assert_eq!(state.clues_this_round.len(), 3);
}

#[test]
fn same_seed_replays_identically() {
    let (a, _) = played_to_decision(&["Ana", "Luis", "Sofia", "Marco"], 1234);
    let (b, _) = played_to_decision(&["Ana", "Luis", "Sofia", "Marco"], 1234);
    assert_eq!(a.impostor_index, b.impostor_index);
    assert_eq!(a.secret_topic, b.secret_topic);
    assert_eq!(a.turn_order, b.turn_order);

    let mut a = a;
    let mut b = b;
    begin_voting(&mut a).unwrap();
    begin_voting(&mut b).unwrap();
    for name in ["Ana", "Ana", "Luis", "Ana"] {
        record_vote(&mut a, name).unwrap();
        record_vote(&mut b, name).unwrap();
    }
    begin_pairing(&mut a).unwrap();
    begin_pairing(&mut b).unwrap();
    assert_eq!(a.pairings, b.pairings);
}
