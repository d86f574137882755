//! Tests for dealing and shuffling.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{HashMap, HashSet};

use strictly_memory::{Difficulty, GameError, ICONS, Icon, deal};

#[test]
fn test_each_difficulty_deals_pairs() {
    let mut rng = StdRng::seed_from_u64(11);
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let pair_count = *difficulty.profile().pair_count();
        let cards = deal(pair_count, &mut rng).unwrap();
        assert_eq!(cards.len(), pair_count * 2);

        let mut counts: HashMap<Icon, usize> = HashMap::new();
        for card in &cards {
            *counts.entry(card.icon()).or_default() += 1;
            assert!(card.is_face_down());
        }
        assert_eq!(counts.len(), pair_count);
        assert!(counts.values().all(|&n| n == 2));
        assert!(counts.keys().all(|icon| ICONS.contains(icon)));
    }
}

#[test]
fn test_card_ids_are_positions() {
    let mut rng = StdRng::seed_from_u64(12);
    let cards = deal(8, &mut rng).unwrap();
    for (pos, card) in cards.iter().enumerate() {
        assert_eq!(card.id().0, pos);
    }
}

#[test]
fn test_too_many_pairs_rejected() {
    let mut rng = StdRng::seed_from_u64(13);
    assert!(matches!(
        deal(ICONS.len() + 1, &mut rng),
        Err(GameError::InsufficientIcons {
            requested: 17,
            available: 16
        })
    ));
}

#[test]
fn test_repeated_deals_are_not_a_fixed_permutation() {
    let mut rng = StdRng::seed_from_u64(14);
    let mut layouts: HashSet<Vec<char>> = HashSet::new();
    for _ in 0..200 {
        let cards = deal(6, &mut rng).unwrap();
        layouts.insert(cards.iter().map(|c| c.icon().symbol()).collect());
    }
    assert!(layouts.len() > 190, "only {} distinct layouts", layouts.len());
}

#[test]
fn test_icon_selection_covers_whole_set() {
    let mut rng = StdRng::seed_from_u64(15);
    let mut seen: HashSet<Icon> = HashSet::new();
    for _ in 0..100 {
        for card in deal(6, &mut rng).unwrap() {
            seen.insert(card.icon());
        }
    }
    assert_eq!(seen.len(), ICONS.len());
}

#[test]
fn test_first_position_is_roughly_uniform() {
    // With 6 pairs, each of the 12 positions holds the partner of card 0
    // about 1/11 of the time.
    let mut rng = StdRng::seed_from_u64(16);
    let trials = 11_000;
    let mut partner_at = [0usize; 12];
    for _ in 0..trials {
        let cards = deal(6, &mut rng).unwrap();
        let partner = cards
            .iter()
            .skip(1)
            .position(|c| c.icon() == cards[0].icon())
            .unwrap()
            + 1;
        partner_at[partner] += 1;
    }
    assert_eq!(partner_at[0], 0);
    for &count in &partner_at[1..] {
        assert!((700..1300).contains(&count), "skewed: {:?}", partner_at);
    }
}
