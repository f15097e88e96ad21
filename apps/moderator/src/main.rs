use std::io::{self, BufRead, Write};

use moderator::{GameConfig, SessionRegistry};

mod telemetry;

/// Console runner: one session driven over stdin, deterministic extractor
/// only. Lines starting with ':' are runner commands, everything else is
/// handed to the session as an utterance.
fn main() -> io::Result<()> {
    telemetry::init_tracing();

    // Optional config file; defaults are used when unset.
    let config = match std::env::var("MODERATOR_CONFIG") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)?;
            match GameConfig::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("invalid config {path}: {e}");
                    std::process::exit(1);
                }
            }
        }
        Err(_) => GameConfig::default(),
    };

    let registry = SessionRegistry::new();
    let (session_id, session) = registry.create(config);
    println!("session {session_id} ready; say 'start' to begin (:state, :reset, :quit)");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match input {
            ":quit" => break,
            ":reset" => {
                session.lock().reset();
                println!("session reset");
            }
            ":state" => {
                let snapshot = session.lock().snapshot();
                let json = serde_json::to_string_pretty(&snapshot)
                    .unwrap_or_else(|e| format!("snapshot error: {e}"));
                println!("{json}");
            }
            utterance => {
                let outcome = session.lock().handle(utterance);
                println!("{}", outcome.response_text);
            }
        }
        stdout.flush()?;
    }
    Ok(())
}
