use crate::cards::Card;
use crate::rng::Mt19937;
use crate::types::{Suit, CARDS_PER_DECK, CARDS_PER_SUIT};

/// Unshuffled deck(s) in canonical order: suit-major H, D, C, S with ranks
/// ascending within each suit. Position `k` holds the card with code `k + 1`
/// (single deck).
#[must_use]
pub fn canonical_deck(num_decks: u8) -> Vec<Card> {
    let mut deck = Vec::with_capacity(CARDS_PER_DECK * num_decks as usize);
    for _ in 0..num_decks {
        for suit in Suit::ALL {
            for rank in 1..=CARDS_PER_SUIT {
                deck.push(Card::new(suit, rank));
            }
        }
    }
    deck
}

/// Deterministic deal for a seed: canonical deck, then a Fisher-Yates pass
/// driven by MT19937 seeded with the low 32 bits of `seed`.
///
/// This function is pure; equal inputs give bit-equal decks on every
/// platform. Stored seed files depend on that.
#[must_use]
pub fn gen_deck(seed: u64, num_decks: u8) -> Vec<Card> {
    let mut deck = canonical_deck(num_decks);
    let mut rng = Mt19937::new(seed as u32);
    for i in (1..deck.len()).rev() {
        let j = rng.uniform(i as u32) as usize;
        deck.swap(i, j);
    }
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_is_a_permutation() {
        let deck = gen_deck(12345, 1);
        assert_eq!(deck.len(), CARDS_PER_DECK);
        let mut seen = [false; CARDS_PER_DECK + 1];
        for c in &deck {
            assert!(!seen[c.code() as usize], "duplicate card {c}");
            seen[c.code() as usize] = true;
        }
    }

    #[test]
    fn deal_is_deterministic() {
        assert_eq!(gen_deck(7, 1), gen_deck(7, 1));
        assert_ne!(gen_deck(7, 1), gen_deck(8, 1));
    }

    #[test]
    fn two_decks_hold_every_card_twice() {
        let deck = gen_deck(0, 2);
        assert_eq!(deck.len(), 2 * CARDS_PER_DECK);
        let mut counts = [0u8; CARDS_PER_DECK + 1];
        for c in &deck {
            counts[c.code() as usize] += 1;
        }
        assert!(counts[1..].iter().all(|&n| n == 2));
    }
}
