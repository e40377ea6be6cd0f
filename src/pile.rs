use std::ops::Index;

use crate::cards::Card;
use crate::types::PileKind;

/// An ordered pile of cards. Index 0 is the bottom; the *top* of a pile is
/// its last card, the one not overlapped by any other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pile {
    kind: PileKind,
    cards: Vec<Card>,
}

impl Pile {
    #[must_use]
    pub fn new(kind: PileKind) -> Self {
        Self { kind, cards: Vec::new() }
    }

    #[must_use]
    pub fn with_cards(kind: PileKind, cards: Vec<Card>) -> Self {
        Self { kind, cards }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> PileKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    #[must_use]
    pub fn has_cards(&self) -> bool {
        !self.cards.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Card at position `k` counting down from the top (`k = 0` is the top).
    /// Panics if the pile holds fewer than `k + 1` cards.
    #[inline]
    #[must_use]
    pub fn from_top(&self, k: usize) -> &Card {
        &self.cards[self.cards.len() - 1 - k]
    }

    #[inline]
    pub fn from_top_mut(&mut self, k: usize) -> &mut Card {
        let i = self.cards.len() - 1 - k;
        &mut self.cards[i]
    }

    #[inline]
    pub fn card_mut(&mut self, index: usize) -> &mut Card {
        &mut self.cards[index]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Move the last `n` cards of `from` onto the tail of `to`, preserving
    /// their order (the top of `from` becomes the top of `to`).
    pub fn move_cards(from: &mut Pile, to: &mut Pile, n: usize) {
        debug_assert!(n <= from.cards.len());
        let at = from.cards.len() - n;
        to.cards.extend(from.cards.drain(at..));
    }

    /// Move a single card. `None` means the top of `from` / the tail of `to`.
    pub fn move_card(
        from: &mut Pile,
        from_pos: Option<usize>,
        to: &mut Pile,
        to_pos: Option<usize>,
    ) {
        let i = from_pos.unwrap_or(from.cards.len() - 1);
        let card = from.cards.remove(i);
        match to_pos {
            Some(j) => to.cards.insert(j, card),
            None => to.cards.push(card),
        }
    }
}

impl Index<usize> for Pile {
    type Output = Card;

    #[inline]
    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl<'a> IntoIterator for &'a Pile {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Suit;

    fn pile_of(ranks: &[u8]) -> Pile {
        Pile::with_cards(
            PileKind::Tableau,
            ranks.iter().map(|&r| Card::new(Suit::Clubs, r)).collect(),
        )
    }

    #[test]
    fn move_cards_preserves_suffix_order() {
        let mut a = pile_of(&[1, 2, 3, 4]);
        let mut b = pile_of(&[9]);
        Pile::move_cards(&mut a, &mut b, 2);
        assert_eq!(a.size(), 2);
        assert_eq!(b.size(), 3);
        assert_eq!(b[1].rank(), 3);
        assert_eq!(b.from_top(0).rank(), 4);
    }

    #[test]
    fn move_card_indexed_insert() {
        let mut a = pile_of(&[1, 2, 3]);
        let mut b = pile_of(&[8, 9]);
        // Take the middle of `a`, put it at the bottom of `b`.
        Pile::move_card(&mut a, Some(1), &mut b, Some(0));
        assert_eq!(a.size(), 2);
        assert_eq!(b[0].rank(), 2);
        // Default positions: top of `a` onto the tail of `b`.
        Pile::move_card(&mut a, None, &mut b, None);
        assert_eq!(b.from_top(0).rank(), 3);
    }
}
