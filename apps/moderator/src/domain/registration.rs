//! Registration and game setup mutations.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::domain::seed_derivation::derive_setup_seed;
use crate::domain::state::{Phase, Player, SessionState};
use crate::errors::domain::{DomainError, ValidationKind};

/// Open registration from Idle.
pub fn begin_registration(state: &mut SessionState) -> Result<(), DomainError> {
    if state.phase != Phase::Idle {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "registration can only begin from Idle",
        ));
    }
    state.phase = Phase::Registration;
    info!(session_id = %state.id, "registration opened");
    Ok(())
}

/// Append a player to the roster.
///
/// Names are unique case- and diacritic-insensitively; a duplicate is
/// rejected without mutating the roster.
pub fn register_player(state: &mut SessionState, name: &str) -> Result<(), DomainError> {
    if state.phase != Phase::Registration {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "players can only join during registration",
        ));
    }
    if state.find_player(name).is_some() {
        return Err(DomainError::validation(
            ValidationKind::DuplicateName,
            format!("{name} is already registered"),
        ));
    }
    state.players.push(Player::new(name));
    debug!(session_id = %state.id, player = name, count = state.players.len(), "player registered");
    Ok(())
}

/// Close registration and initialize the game: draw the secret topic,
/// assign the impostor, and enter RoleReveal with the cursor on the first
/// registered player.
pub fn start_game(state: &mut SessionState, config: &GameConfig) -> Result<(), DomainError> {
    if state.phase != Phase::Registration {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "the game can only start from registration",
        ));
    }
    if state.players.len() < config.min_players {
        return Err(DomainError::validation(
            ValidationKind::InsufficientPlayers,
            format!(
                "need at least {} players, have {}",
                config.min_players,
                state.players.len()
            ),
        ));
    }
    if config.topics.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidConfig,
            "topic pool must not be empty",
        ));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(derive_setup_seed(state.seed));
    let topic = config
        .topics
        .choose(&mut rng)
        .cloned()
        .ok_or_else(|| {
            DomainError::validation(ValidationKind::InvalidConfig, "topic pool must not be empty")
        })?;
    let impostor = rng.random_range(0..state.players.len());

    state.secret_topic = Some(topic);
    state.impostor_index = Some(impostor);
    state.ready_players.clear();
    state.turn_cursor = 0;
    state.phase = Phase::RoleReveal;
    info!(
        session_id = %state.id,
        players = state.players.len(),
        "game initialized, revealing roles"
    );
    Ok(())
}

/// Record that the player at the reveal cursor has seen their role and
/// step to the next one. Returns true once every player is ready.
pub fn confirm_role_seen(state: &mut SessionState) -> Result<bool, DomainError> {
    if state.phase != Phase::RoleReveal {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "role confirmation only happens during the reveal",
        ));
    }
    let Some(player) = state.players.get_mut(state.turn_cursor) else {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "reveal cursor past the roster",
        ));
    };
    player.has_seen_role = true;
    let name = player.name.clone();
    state.ready_players.insert(name);
    state.turn_cursor += 1;
    debug!(
        session_id = %state.id,
        ready = state.ready_players.len(),
        total = state.players.len(),
        "player confirmed role"
    );
    Ok(state.all_ready())
}
