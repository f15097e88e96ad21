//! Deterministic response text. Every situation the controller can reach
//! has a canned phrasing here, so the engine stays fully playable when the
//! generative narrator is unavailable.

use crate::domain::state::Phase;
use crate::domain::voting::GameOutcome;

pub struct ResponseComposer;

impl ResponseComposer {
    pub fn greeting(&self) -> String {
        "Welcome. One of you will secretly be the impostor; everyone else sees the secret topic \
         and gives subtle clues about it. Say 'start' when you are ready."
            .to_string()
    }

    pub fn ask_first_player(&self) -> String {
        "Perfect. Tell me the first player's name.".to_string()
    }

    pub fn registered(&self, name: &str) -> String {
        format!("Noted, {name}. Who is next?")
    }

    pub fn duplicate_name(&self, name: &str) -> String {
        format!("{name} is already on the list. Next name?")
    }

    pub fn not_enough_players(&self, have: usize, min: usize) -> String {
        format!("We have {have} players and need at least {min}. Who else is joining?")
    }

    pub fn game_started(&self, first_player: &str) -> String {
        format!(
            "Registration complete. {first_player}, look at the screen and say 'ready' once \
             you have seen your role."
        )
    }

    pub fn next_reveal(&self, player: &str) -> String {
        format!("Thank you. {player}, your turn to look. Say 'ready' when done.")
    }

    pub fn round_started(&self, round_number: u32, first_speaker: &str) -> String {
        format!("Round {round_number}. {first_speaker}, give your clue.")
    }

    pub fn clue_saved(&self, next_speaker: &str) -> String {
        format!("Good one. {next_speaker}, your clue.")
    }

    pub fn round_complete(&self) -> String {
        "That closes the round. Another round of clues, or shall we vote?".to_string()
    }

    pub fn voting_opened(&self, first_voter: &str) -> String {
        format!("Time to vote. {first_voter}, who do you think the impostor is?")
    }

    pub fn vote_recorded(&self, next_voter: &str) -> String {
        format!("Vote in. {next_voter}, your turn: who is the impostor?")
    }

    pub fn pairing_started(&self, asker: &str, answerer: &str) -> String {
        format!(
            "Before the verdict, one last exchange. {asker}, ask {answerer} one question \
             about the topic."
        )
    }

    pub fn next_pairing(&self, asker: &str, answerer: &str) -> String {
        format!("Next pair: {asker} asks, {answerer} answers.")
    }

    pub fn result(
        &self,
        outcome: GameOutcome,
        impostor: &str,
        most_voted: &str,
        vote_count: usize,
        topic: &str,
    ) -> String {
        match outcome {
            GameOutcome::CitizensWin => format!(
                "The group voted for {most_voted} with {vote_count} votes, and {impostor} was \
                 indeed the impostor. The citizens win! The topic was '{topic}'. Reset the \
                 session for another game."
            ),
            GameOutcome::ImpostorWins => format!(
                "The group voted for {most_voted} with {vote_count} votes, but the impostor was \
                 {impostor}. The impostor wins! The topic was '{topic}'. Reset the session for \
                 another game."
            ),
        }
    }

    pub fn game_over(&self) -> String {
        "The game is over. Reset the session to play again.".to_string()
    }

    /// Generic phase-appropriate prompt for an utterance the extractor
    /// could not classify. The session is left untouched.
    pub fn clarify(&self, phase: Phase) -> String {
        match phase {
            Phase::Idle => self.greeting(),
            Phase::Registration => "I did not catch a name. Who is joining?".to_string(),
            Phase::RoleReveal => {
                "Have you seen your role? Say 'ready' when you have.".to_string()
            }
            Phase::ClueRound => "Give me a slightly longer clue, please.".to_string(),
            Phase::RoundDecision => {
                "Shall we do another round of clues, or vote now?".to_string()
            }
            Phase::Voting => "I did not recognize that name. Who do you vote for?".to_string(),
            Phase::FinalPairing => "Say 'done' once the question is answered.".to_string(),
            Phase::Result => self.game_over(),
        }
    }
}
