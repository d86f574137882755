//! Dealing and shuffling the deck.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use super::types::{Card, CardId, ICONS, Icon};
use super::GameError;

/// Deals `pair_count` pairs of distinct icons in shuffled order.
///
/// Icons are drawn uniformly without replacement from [`ICONS`], each is
/// duplicated, and the sequence is shuffled with [`shuffle`]. Card ids are the
/// final positions.
///
/// # Errors
///
/// Returns [`GameError::InsufficientIcons`] if `pair_count` exceeds the icon set.
#[instrument(skip(rng))]
pub fn deal<R: Rng + ?Sized>(pair_count: usize, rng: &mut R) -> Result<Vec<Card>, GameError> {
    if pair_count > ICONS.len() {
        return Err(GameError::InsufficientIcons {
            requested: pair_count,
            available: ICONS.len(),
        });
    }

    let chosen: Vec<Icon> = ICONS.choose_multiple(rng, pair_count).copied().collect();
    let mut icons: Vec<Icon> = chosen.iter().chain(chosen.iter()).copied().collect();
    shuffle(&mut icons, rng);

    let cards: Vec<Card> = icons
        .into_iter()
        .enumerate()
        .map(|(pos, icon)| Card::new(CardId(pos), icon))
        .collect();

    debug!(cards = cards.len(), "Deck dealt");
    Ok(cards)
}

/// Fisher–Yates shuffle: walks from the last index down to 1, swapping each
/// slot with a uniformly chosen index in `[0, i]`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn test_deal_zero_pairs_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(deal(0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn test_deal_full_icon_set() {
        let mut rng = StdRng::seed_from_u64(2);
        let cards = deal(16, &mut rng).unwrap();
        let mut counts: HashMap<Icon, usize> = HashMap::new();
        for card in &cards {
            *counts.entry(card.icon()).or_default() += 1;
        }
        assert_eq!(counts.len(), 16);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_deal_rejects_too_many_pairs() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            deal(17, &mut rng),
            Err(GameError::InsufficientIcons {
                requested: 17,
                available: 16
            })
        );
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_hits_every_position() {
        // Each element should land in each slot at some point over many trials.
        let mut rng = StdRng::seed_from_u64(5);
        let mut seen = [[false; 4]; 4];
        for _ in 0..500 {
            let mut items = [0usize, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            for (slot, &item) in items.iter().enumerate() {
                seen[item][slot] = true;
            }
        }
        assert!(seen.iter().flatten().all(|&hit| hit));
    }
}
