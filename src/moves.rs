use std::fmt;

use crate::cards::Card;
use crate::types::PileId;

/// One reversible transition of a [`crate::game::KlondikeGame`], carrying
/// everything `undo_move` needs. The game itself keeps no history.
///
/// `Tableau` and `TableauPartial` have the same mechanical effect; partial
/// moves are distinguished because by construction they leave a face-up
/// card behind (never a flip) and the solver must suppress immediate
/// re-moves of the same card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Tableau {
        card: Card,
        from: PileId,
        to: PileId,
        cards_to_move: u8,
        /// Whether doing the move exposed a face-down card at the new top
        /// of `from`. Recorded rather than recomputed: by undo time the
        /// state has changed.
        flipped_card: bool,
    },
    TableauPartial {
        card: Card,
        from: PileId,
        to: PileId,
        cards_to_move: u8,
    },
    Stock {
        card: Card,
        /// Cursor before the move, restored on undo.
        prev_stock_position: u8,
        /// Stock index the card is taken from.
        stock_move_position: u8,
        to: PileId,
    },
    RepileStock {
        prev_stock_position: u8,
    },
}

impl Move {
    #[must_use]
    pub fn kind_str(&self) -> &'static str {
        match self {
            Move::Tableau { .. } => "TABLEAU",
            Move::TableauPartial { .. } => "TABLEAU_PARTIAL",
            Move::Stock { .. } => "STOCK",
            Move::RepileStock { .. } => "REPILE_STOCK",
        }
    }

    /// The card this move acts on, if it names one.
    #[must_use]
    pub fn card(&self) -> Option<Card> {
        match *self {
            Move::Tableau { card, .. }
            | Move::TableauPartial { card, .. }
            | Move::Stock { card, .. } => Some(card),
            Move::RepileStock { .. } => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.card() {
            Some(card) => write!(f, "{} {card}", self.kind_str()),
            None => f.write_str(self.kind_str()),
        }
    }
}
