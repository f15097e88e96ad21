//! RNG seed derivation for deterministic session behavior.
//!
//! Every random draw in a game (role assignment, per-round turn shuffles,
//! closing-activity pairing) uses a seed derived from the session's base
//! seed, so a whole game replays identically from one number.

/// Seed for game setup: topic draw and impostor assignment.
pub fn derive_setup_seed(session_seed: u64) -> u64 {
    session_seed.wrapping_add(1)
}

/// Seed for the turn-order shuffle of a given clue round (1-based).
///
/// Distinct rounds get distinct streams; the multiplier keeps round seeds
/// away from the setup and pairing offsets.
pub fn derive_round_seed(session_seed: u64, round_number: u32) -> u64 {
    session_seed
        .wrapping_add((round_number as u64).wrapping_mul(1_000_000))
        .wrapping_add(2)
}

/// Seed for the closing-activity pairing shuffle.
pub fn derive_pairing_seed(session_seed: u64) -> u64 {
    session_seed.wrapping_add(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_seed_is_deterministic() {
        assert_eq!(derive_setup_seed(42), derive_setup_seed(42));
        assert_ne!(derive_setup_seed(42), derive_setup_seed(43));
    }

    #[test]
    fn round_seeds_differ_per_round() {
        let base = 12345;
        assert_eq!(derive_round_seed(base, 1), derive_round_seed(base, 1));
        assert_ne!(derive_round_seed(base, 1), derive_round_seed(base, 2));
    }

    #[test]
    fn contexts_are_separated() {
        let base = 12345;
        let setup = derive_setup_seed(base);
        let round = derive_round_seed(base, 1);
        let pairing = derive_pairing_seed(base);
        assert_ne!(setup, round);
        assert_ne!(setup, pairing);
        assert_ne!(round, pairing);
    }

    #[test]
    fn wrapping_is_deterministic() {
        let near_max = u64::MAX - 10;
        assert_eq!(
            derive_round_seed(near_max, 4_000_000),
            derive_round_seed(near_max, 4_000_000)
        );
    }
}
