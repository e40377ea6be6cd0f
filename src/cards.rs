use std::fmt;

use crate::types::{Rank, Suit};

/// A single playing card. Equality ignores the face-up flag: a card is the
/// same card whichever way it lies, which is what the partial-run in-flight
/// set and move records rely on.
#[derive(Debug, Clone, Copy)]
pub struct Card {
    suit: Suit,
    rank: Rank,
    face_up: bool,
}

impl PartialEq for Card {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }
}

impl Eq for Card {}

impl Card {
    #[inline]
    #[must_use]
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank, face_up: true }
    }

    #[inline]
    #[must_use]
    pub fn suit(self) -> Suit {
        self.suit
    }

    #[inline]
    #[must_use]
    pub fn rank(self) -> Rank {
        self.rank
    }

    #[inline]
    #[must_use]
    pub fn is_face_up(self) -> bool {
        self.face_up
    }

    #[inline]
    pub fn flip(&mut self) {
        self.face_up = !self.face_up;
    }

    /// Numeric card code `suit_ordinal * 13 + rank`, in 1..=52. This is the
    /// encoding used by both the state fingerprint and the deck export
    /// format, so it must never change.
    #[inline]
    #[must_use]
    pub fn code(self) -> u8 {
        self.suit.index() as u8 * 13 + self.rank
    }

    /// Two-character rank column ("A ", "2 ", .., "10", "J ", "Q ", "K ").
    #[must_use]
    pub fn rank_str(self) -> &'static str {
        const NAMES: [&str; 13] = [
            "A ", "2 ", "3 ", "4 ", "5 ", "6 ", "7 ", "8 ", "9 ", "10", "J ", "Q ", "K ",
        ];
        NAMES[self.rank as usize - 1]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_str(), self.suit.to_char())
    }
}
