//! Game configuration: player-count bounds, topic pool, and keyword sets.
//!
//! Everything the intent extractor and phase controller match against is
//! supplied here, never hard-coded in the engine logic. Defaults reproduce
//! the sets the game shipped with (bilingual Spanish/English keywords and
//! an Ecuadorian topic pool).

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

/// Full configuration for one game session.
///
/// Deserializable from JSON; every field falls back to the shipped default
/// when absent, so a partial config file only overrides what it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Minimum players required to start a game.
    pub min_players: usize,
    /// Registration auto-finishes when this many players have joined.
    pub auto_start_cap: usize,
    /// Clues shorter than this (after trimming) are rejected.
    pub min_clue_len: usize,
    /// Secret topic pool; one entry is drawn per game.
    pub topics: Vec<String>,
    /// Tokens ignored during registration name extraction (pronouns/fillers).
    pub stopwords: Vec<String>,
    /// Keywords that start a game from Idle.
    pub start_keywords: Vec<String>,
    /// Keywords that close registration ("last", "done", ...).
    pub finish_keywords: Vec<String>,
    /// Keywords confirming a player has seen their role.
    pub ready_keywords: Vec<String>,
    /// Keywords asking for another clue round.
    pub continue_keywords: Vec<String>,
    /// Keywords moving the game to the vote.
    pub vote_keywords: Vec<String>,
    /// Acknowledgement keywords advancing the closing pairing activity.
    pub ack_keywords: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 3,
            auto_start_cap: 5,
            min_clue_len: 3,
            topics: default_topics(),
            stopwords: to_strings(&[
                "soy", "me", "llamo", "es", "el", "ella", "la", "mi", "nombre", "estamos", "i",
                "im", "am", "my", "name", "is", "the", "and", "se",
            ]),
            start_keywords: to_strings(&["comenzar", "empezar", "dale", "start", "begin"]),
            finish_keywords: to_strings(&[
                "ultimo", "listo", "listos", "todos", "last", "done", "ready", "everyone",
            ]),
            ready_keywords: to_strings(&[
                "listo", "lista", "ok", "ya", "entendido", "siguiente", "visto", "ready", "seen",
                "done", "next", "got",
            ]),
            continue_keywords: to_strings(&[
                "otra", "ronda", "continuar", "seguir", "mas", "continue", "another", "again",
                "more", "round",
            ]),
            vote_keywords: to_strings(&[
                "votar", "votacion", "voto", "basta", "vote", "voting", "stop", "finish",
            ]),
            ack_keywords: to_strings(&[
                "listo", "ok", "ya", "respondido", "siguiente", "done", "answered", "next",
            ]),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let config: GameConfig = serde_json::from_str(json).map_err(|e| {
            DomainError::validation(ValidationKind::InvalidConfig, format!("bad config JSON: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot support a full game.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min_players < 3 {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "min_players must be at least 3",
            ));
        }
        if self.auto_start_cap < self.min_players {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "auto_start_cap must be >= min_players",
            ));
        }
        if self.topics.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "topic pool must not be empty",
            ));
        }
        Ok(())
    }
}

fn to_strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

fn default_topics() -> Vec<String> {
    to_strings(&[
        "encebollado",
        "ceviche",
        "hornado",
        "guatita",
        "cuy",
        "bolon",
        "corvina",
        "empanada",
        "humita",
        "bollo",
        "fritada",
        "salchipapa",
        "Galapagos",
        "Quito",
        "Montanita",
        "Cuenca",
        "Guayaquil",
        "guambra",
        "fuego",
        "morocho",
        "sabido",
        "chuchaqui",
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{"min_players": 4}"#).unwrap();
        assert_eq!(config.min_players, 4);
        assert_eq!(config.auto_start_cap, 5);
        assert!(!config.topics.is_empty());
    }

    #[test]
    fn rejects_cap_below_minimum() {
        let result = GameConfig::from_json(r#"{"min_players": 4, "auto_start_cap": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_empty_topic_pool() {
        let result = GameConfig::from_json(r#"{"topics": []}"#);
        assert!(result.is_err());
    }
}
