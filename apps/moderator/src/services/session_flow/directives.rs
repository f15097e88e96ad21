//! Machine-readable directive tags embedded in moderator responses.
//!
//! Collaborators (voice output, the screen) pattern-match on a closed
//! vocabulary of bracketed tokens prefixed to the response text, e.g.
//! `[REGISTER:Maria] Noted, Maria. Who is next?`. The bracket grammar is a
//! wire format: it must survive unchanged for existing collaborators.

use std::fmt;

/// Closed directive vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Start,
    Register(String),
    BeginGame,
    PlayerReady,
    ClueSaved,
    NewRound,
    StartVote,
    Vote(String),
    BeginPairing,
    PairingAnswered,
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Start => write!(f, "[START]"),
            Directive::Register(name) => write!(f, "[REGISTER:{name}]"),
            Directive::BeginGame => write!(f, "[BEGIN_GAME]"),
            Directive::PlayerReady => write!(f, "[PLAYER_READY]"),
            Directive::ClueSaved => write!(f, "[CLUE_SAVED]"),
            Directive::NewRound => write!(f, "[NEW_ROUND]"),
            Directive::StartVote => write!(f, "[START_VOTE]"),
            Directive::Vote(name) => write!(f, "[VOTE:{name}]"),
            Directive::BeginPairing => write!(f, "[BEGIN_PAIRING]"),
            Directive::PairingAnswered => write!(f, "[PAIRING_ANSWERED]"),
        }
    }
}

impl Directive {
    /// Parse one bare tag body (no brackets), e.g. `REGISTER:Maria`.
    fn parse(body: &str) -> Option<Self> {
        let (tag, arg) = match body.split_once(':') {
            Some((tag, arg)) => (tag, Some(arg)),
            None => (body, None),
        };
        match (tag, arg) {
            ("START", None) => Some(Directive::Start),
            ("REGISTER", Some(name)) if !name.is_empty() => {
                Some(Directive::Register(name.to_string()))
            }
            ("BEGIN_GAME", None) => Some(Directive::BeginGame),
            ("PLAYER_READY", None) => Some(Directive::PlayerReady),
            ("CLUE_SAVED", None) => Some(Directive::ClueSaved),
            ("NEW_ROUND", None) => Some(Directive::NewRound),
            ("START_VOTE", None) => Some(Directive::StartVote),
            ("VOTE", Some(name)) if !name.is_empty() => Some(Directive::Vote(name.to_string())),
            ("BEGIN_PAIRING", None) => Some(Directive::BeginPairing),
            ("PAIRING_ANSWERED", None) => Some(Directive::PairingAnswered),
            _ => None,
        }
    }
}

/// What one `handle` call produced: the display text with directive tags
/// already prefixed, plus the directives as structured values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub response_text: String,
    pub directives: Vec<Directive>,
}

impl Outcome {
    /// Compose the wire form: tags first, space-separated, then the text.
    pub fn new(directives: Vec<Directive>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut response_text = String::new();
        for directive in &directives {
            response_text.push_str(&directive.to_string());
            response_text.push(' ');
        }
        response_text.push_str(&text);
        Self {
            response_text,
            directives,
        }
    }

    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(Vec::new(), text)
    }
}

/// Split a response into its leading directives and the clean display
/// text. Unknown bracketed tokens are left in the text untouched.
pub fn strip_directives(response: &str) -> (Vec<Directive>, String) {
    let mut directives = Vec::new();
    let mut rest = response.trim_start();
    while let Some(after_open) = rest.strip_prefix('[') {
        let Some(close) = after_open.find(']') else {
            break;
        };
        let Some(directive) = Directive::parse(&after_open[..close]) else {
            break;
        };
        directives.push(directive);
        rest = after_open[close + 1..].trim_start();
    }
    (directives, rest.to_string())
}
