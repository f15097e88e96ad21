use crate::config::GameConfig;
use crate::domain::state::Phase;
use crate::domain::voting::GameOutcome;
use crate::services::session_flow::controller::SessionController;
use crate::services::session_flow::directives::{strip_directives, Directive};
use crate::services::session_flow::narrative::test_narrators::{CannedNarrator, FailingNarrator};

fn controller() -> SessionController {
    SessionController::new(GameConfig::default(), 42)
}

/// Drive a fresh session up to the voting phase with three players.
fn voting_session() -> SessionController {
    let mut ctrl = controller();
    ctrl.handle("start");
    for name in ["Ana", "Luis", "Sofia"] {
        ctrl.handle(name);
    }
    ctrl.handle("last");
    for _ in 0..3 {
        ctrl.handle("ready");
    }
    for clue in ["very tasty", "from the coast", "eaten warm"] {
        ctrl.handle(clue);
    }
    ctrl.handle("vote");
    ctrl
}

#[test]
fn start_opens_registration_with_directive() {
    let mut ctrl = controller();
    let outcome = ctrl.handle("let's start");
    assert_eq!(outcome.directives, vec![Directive::Start]);
    assert_eq!(ctrl.session().phase, Phase::Registration);
}

#[test]
fn greeting_before_start_changes_nothing() {
    let mut ctrl = controller();
    let outcome = ctrl.handle("hello, what is this?");
    assert!(outcome.directives.is_empty());
    assert_eq!(ctrl.session().phase, Phase::Idle);
}

#[test]
fn registration_emits_register_directives() {
    let mut ctrl = controller();
    ctrl.handle("start");
    let outcome = ctrl.handle("me llamo Carlos");
    assert_eq!(outcome.directives, vec![Directive::Register("Carlos".into())]);
    let outcome = ctrl.handle("Ana");
    assert_eq!(outcome.directives, vec![Directive::Register("Ana".into())]);
    assert_eq!(ctrl.session().players.len(), 2);
}

#[test]
fn duplicate_registration_is_rejected_and_stateless() {
    let mut ctrl = controller();
    ctrl.handle("start");
    ctrl.handle("Ana");
    let outcome = ctrl.handle("ana");
    assert!(outcome.directives.is_empty());
    assert!(outcome.response_text.contains("already"));
    assert_eq!(ctrl.session().players.len(), 1);
}

#[test]
fn finish_with_too_few_players_stays_in_registration() {
    let mut ctrl = controller();
    ctrl.handle("start");
    ctrl.handle("Ana");
    ctrl.handle("Luis");
    let outcome = ctrl.handle("last");
    assert!(outcome.directives.is_empty());
    assert_eq!(ctrl.session().phase, Phase::Registration);
    assert_eq!(ctrl.session().players.len(), 2);
}

#[test]
fn name_and_finish_in_one_utterance() {
    let mut ctrl = controller();
    ctrl.handle("start");
    ctrl.handle("Ana");
    ctrl.handle("Luis");
    let outcome = ctrl.handle("Sofia is the last one");
    assert_eq!(
        outcome.directives,
        vec![Directive::Register("Sofia".into()), Directive::BeginGame]
    );
    assert_eq!(ctrl.session().phase, Phase::RoleReveal);
    assert_eq!(ctrl.session().players.len(), 3);
}

#[test]
fn registration_auto_starts_at_cap() {
    let mut ctrl = controller();
    ctrl.handle("start");
    for name in ["Ana", "Luis", "Sofia", "Marco"] {
        ctrl.handle(name);
    }
    assert_eq!(ctrl.session().phase, Phase::Registration);
    let outcome = ctrl.handle("Elena");
    assert_eq!(
        outcome.directives,
        vec![Directive::Register("Elena".into()), Directive::BeginGame]
    );
    assert_eq!(ctrl.session().phase, Phase::RoleReveal);
    assert_eq!(ctrl.session().players.len(), 5);
}

#[test]
fn end_to_end_three_player_game() {
    // Registration through "last".
    let mut ctrl = controller();
    ctrl.handle("start");
    for name in ["Ana", "Luis", "Sofia"] {
        ctrl.handle(name);
    }
    let outcome = ctrl.handle("last");
    assert!(outcome.directives.contains(&Directive::BeginGame));
    assert_eq!(ctrl.session().phase, Phase::RoleReveal);
    assert_eq!(ctrl.session().players.len(), 3);

    // All three confirm their role.
    for i in 0..3 {
        let outcome = ctrl.handle("ready");
        assert_eq!(outcome.directives, vec![Directive::PlayerReady]);
        if i < 2 {
            assert_eq!(ctrl.session().phase, Phase::RoleReveal);
        }
    }
    assert_eq!(ctrl.session().phase, Phase::ClueRound);
    assert_eq!(ctrl.session().round_number, 1);

    // Three clues complete the round.
    for (i, clue) in ["very tasty", "from the coast", "eaten warm"].iter().enumerate() {
        let outcome = ctrl.handle(clue);
        assert_eq!(outcome.directives, vec![Directive::ClueSaved]);
        if i < 2 {
            assert_eq!(ctrl.session().phase, Phase::ClueRound);
        }
    }
    assert_eq!(ctrl.session().phase, Phase::RoundDecision);

    // The group votes; votes land Luis, Luis, Ana by seat order
    // Ana -> Luis, Luis -> Ana, Sofia -> Luis.
    let outcome = ctrl.handle("vote");
    assert_eq!(outcome.directives, vec![Directive::StartVote]);
    ctrl.handle("I vote Luis");
    ctrl.handle("Ana for sure");
    let outcome = ctrl.handle("Luis");
    assert!(outcome.directives.contains(&Directive::Vote("Luis".into())));
    assert!(outcome.directives.contains(&Directive::BeginPairing));
    assert_eq!(ctrl.session().phase, Phase::FinalPairing);

    // Two pairs for three players; acknowledging both ends the game.
    let outcome = ctrl.handle("done");
    assert_eq!(outcome.directives, vec![Directive::PairingAnswered]);
    let outcome = ctrl.handle("done");
    assert_eq!(outcome.directives, vec![Directive::PairingAnswered]);
    assert_eq!(ctrl.session().phase, Phase::Result);

    // Luis got 2 votes; the announced outcome matches the hidden role.
    let impostor_index = ctrl.session().impostor_index.unwrap();
    let impostor = ctrl.session().players[impostor_index].name.clone();
    let expected = if impostor == "Luis" {
        GameOutcome::CitizensWin
    } else {
        GameOutcome::ImpostorWins
    };
    match expected {
        GameOutcome::CitizensWin => assert!(outcome.response_text.contains("citizens win")),
        GameOutcome::ImpostorWins => assert!(outcome.response_text.contains("impostor wins")),
    }
}

#[test]
fn unrecognized_utterance_is_idempotent() {
    let mut ctrl = controller();
    ctrl.handle("start");
    ctrl.handle("Ana");

    let before_players = ctrl.session().players.clone();
    let first = ctrl.handle("eh no");
    let snapshot_after_first = ctrl.snapshot();
    let second = ctrl.handle("eh no");
    assert_eq!(first, second);
    assert_eq!(ctrl.snapshot(), snapshot_after_first);
    assert_eq!(ctrl.session().players, before_players);
    assert_eq!(ctrl.session().turn_cursor, 0);
}

#[test]
fn round_decision_falls_through_to_voting() {
    let mut ctrl = controller();
    ctrl.handle("start");
    for name in ["Ana", "Luis", "Sofia"] {
        ctrl.handle(name);
    }
    ctrl.handle("last");
    for _ in 0..3 {
        ctrl.handle("ready");
    }
    for clue in ["very tasty", "from the coast", "eaten warm"] {
        ctrl.handle(clue);
    }
    assert_eq!(ctrl.session().phase, Phase::RoundDecision);
    // Unrecognized input here opens the vote rather than clarifying.
    let outcome = ctrl.handle("ehh whatever");
    assert_eq!(outcome.directives, vec![Directive::StartVote]);
    assert_eq!(ctrl.session().phase, Phase::Voting);
}

#[test]
fn continue_decision_starts_a_new_round() {
    let mut ctrl = controller();
    ctrl.handle("start");
    for name in ["Ana", "Luis", "Sofia"] {
        ctrl.handle(name);
    }
    ctrl.handle("last");
    for _ in 0..3 {
        ctrl.handle("ready");
    }
    for clue in ["very tasty", "from the coast", "eaten warm"] {
        ctrl.handle(clue);
    }
    let outcome = ctrl.handle("otra ronda");
    assert_eq!(outcome.directives, vec![Directive::NewRound]);
    assert_eq!(ctrl.session().phase, Phase::ClueRound);
    assert_eq!(ctrl.session().round_number, 2);
    assert!(ctrl.session().clues_this_round.is_empty());
}

#[test]
fn vote_for_unknown_name_clarifies_without_recording() {
    let mut ctrl = voting_session();
    let outcome = ctrl.handle("I vote for Pedro");
    assert!(outcome.directives.is_empty());
    assert!(ctrl.session().votes.is_empty());
    assert_eq!(ctrl.session().phase, Phase::Voting);
}

#[test]
fn result_phase_only_reminds_until_reset() {
    let mut ctrl = voting_session();
    for name in ["Luis", "Ana", "Luis"] {
        ctrl.handle(name);
    }
    ctrl.handle("done");
    ctrl.handle("done");
    assert_eq!(ctrl.session().phase, Phase::Result);

    let outcome = ctrl.handle("start");
    assert!(outcome.directives.is_empty());
    assert_eq!(ctrl.session().phase, Phase::Result);

    ctrl.reset_with_seed(7);
    assert_eq!(ctrl.session().phase, Phase::Idle);
    assert!(ctrl.session().players.is_empty());
    let outcome = ctrl.handle("start");
    assert_eq!(outcome.directives, vec![Directive::Start]);
}

#[test]
fn failing_narrator_matches_deterministic_fallback() {
    let mut plain = controller();
    let mut with_failing =
        SessionController::new(GameConfig::default(), 42).with_narrator(Box::new(FailingNarrator));
    let a = plain.handle("unintelligible mumbling");
    let b = with_failing.handle("unintelligible mumbling");
    assert_eq!(a, b);
    assert_eq!(plain.session().phase, with_failing.session().phase);
}

#[test]
fn working_narrator_rephrases_but_never_mutates() {
    let mut ctrl = SessionController::new(GameConfig::default(), 42)
        .with_narrator(Box::new(CannedNarrator("Could you repeat that?")));
    let outcome = ctrl.handle("unintelligible mumbling");
    assert_eq!(outcome.response_text, "Could you repeat that?");
    assert_eq!(ctrl.session().phase, Phase::Idle);

    // Recognized input never goes through the narrator.
    let outcome = ctrl.handle("start");
    assert_eq!(outcome.directives, vec![Directive::Start]);
}

#[test]
fn outcomes_round_trip_through_directive_stripping() {
    let mut ctrl = controller();
    ctrl.handle("start");
    let outcome = ctrl.handle("Carlos");
    let (directives, text) = strip_directives(&outcome.response_text);
    assert_eq!(directives, outcome.directives);
    assert!(text.contains("Carlos"));
    assert!(!text.contains('['));
}

#[test]
fn snapshot_tracks_reveal_progress() {
    let mut ctrl = controller();
    ctrl.handle("start");
    for name in ["Ana", "Luis", "Sofia"] {
        ctrl.handle(name);
    }
    ctrl.handle("last");
    let snap = ctrl.snapshot();
    assert_eq!(snap.total_players, 3);
    ctrl.handle("ready");
    let snap = ctrl.snapshot();
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("RoleReveal"));
}
