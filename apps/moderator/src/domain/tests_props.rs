//! Property tests for the randomized and counting components.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::pairing::generate_pairings;
use crate::domain::state::Player;
use crate::domain::turn_order::reshuffle;
use crate::domain::voting::tally;

proptest! {
    #[test]
    fn reshuffle_always_permutes(count in 1usize..12, seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut order = reshuffle(count, &mut rng);
        order.sort_unstable();
        let expected: Vec<usize> = (0..count).collect();
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn pairings_cover_every_player(count in 2usize..12, seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pairings = generate_pairings(count, &mut rng);
        prop_assert_eq!(pairings.len(), count.div_ceil(2));

        let mut covered = BTreeSet::new();
        for p in &pairings {
            covered.insert(p.asker);
            covered.insert(p.answerer);
        }
        let expected: BTreeSet<usize> = (0..count).collect();
        prop_assert_eq!(covered, expected);
    }

    #[test]
    fn even_pairings_are_disjoint(half in 1usize..6, seed in any::<u64>()) {
        let count = half * 2;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let pairings = generate_pairings(count, &mut rng);
        let mut seen = BTreeSet::new();
        for p in &pairings {
            prop_assert!(seen.insert(p.asker));
            prop_assert!(seen.insert(p.answerer));
        }
    }

    #[test]
    fn tally_winner_has_max_count(
        targets in proptest::collection::vec(0usize..4, 1..16),
    ) {
        let players: Vec<Player> = ["Ana", "Luis", "Sofia", "Marco"]
            .iter()
            .map(|n| Player::new(*n))
            .collect();
        // Synthetic voters; only the vote targets matter for the tally.
        let votes: BTreeMap<String, String> = targets
            .iter()
            .enumerate()
            .map(|(i, &t)| (format!("voter{i}"), players[t].name.clone()))
            .collect();

        let (winner, count) = tally(&players, &votes).unwrap();
        for player in &players {
            let player_count = votes.values().filter(|t| *t == &player.name).count();
            prop_assert!(player_count <= count);
            // Ties resolve to the earliest-registered player.
            if player_count == count && player.name != winner {
                let winner_pos = players.iter().position(|p| p.name == winner).unwrap();
                let player_pos = players.iter().position(|p| p.name == player.name).unwrap();
                prop_assert!(winner_pos < player_pos);
            }
        }
    }
}
