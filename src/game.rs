use crate::deck::gen_deck;
use crate::pile::Pile;
use crate::types::{PileId, PileKind};

pub const NUM_TABLEAU_PILES: usize = 7;
pub const NUM_FOUNDATION_PILES: usize = 4;
/// Cards turned over from the stock at a time (three-card draw).
pub const NUM_STOCK_CARD_DRAW: usize = 3;

/// Full state of one Klondike deal.
///
/// `stock_position` is a cursor into `stock`, identifying the card a player
/// could act on next; it is *not* a plain card index stepped by the draw
/// count (see [`KlondikeGame::next_in_stock`]). When the stock is empty the
/// cursor wraps to an out-of-range value that no reader consults.
#[derive(Debug, Clone)]
pub struct KlondikeGame {
    pub seed: u64,
    pub tableau: [Pile; NUM_TABLEAU_PILES],
    pub foundation: [Pile; NUM_FOUNDATION_PILES],
    pub stock: Pile,
    pub stock_position: usize,
}

impl KlondikeGame {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tableau: std::array::from_fn(|_| Pile::new(PileKind::Tableau)),
            foundation: std::array::from_fn(|_| Pile::new(PileKind::Foundation)),
            stock: Pile::new(PileKind::Stock),
            stock_position: 0,
        }
    }

    /// Deal the seed's deck: tableau pile `i` gets `i + 1` cards with only
    /// the topmost face-up, everything else stays in the stock.
    pub fn set_up(&mut self) {
        self.stock = Pile::with_cards(PileKind::Stock, gen_deck(self.seed, 1));
        for i in 0..NUM_TABLEAU_PILES {
            self.tableau[i] = Pile::new(PileKind::Tableau);
            Pile::move_cards(&mut self.stock, &mut self.tableau[i], i + 1);
            for k in 0..i {
                self.tableau[i].card_mut(k).flip(); // Flip all but the topmost card.
            }
        }
        for pile in &mut self.foundation {
            *pile = Pile::new(PileKind::Foundation);
        }
        self.repile_stock();
    }

    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        match id {
            PileId::Stock => &self.stock,
            PileId::Foundation(i) => &self.foundation[i as usize],
            PileId::Tableau(i) => &self.tableau[i as usize],
        }
    }

    pub fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        match id {
            PileId::Stock => &mut self.stock,
            PileId::Foundation(i) => &mut self.foundation[i as usize],
            PileId::Tableau(i) => &mut self.tableau[i as usize],
        }
    }

    /// Mutable access to two distinct piles at once, for card transfers.
    /// Panics if `a` and `b` name the same pile.
    pub fn pile_pair_mut(&mut self, a: PileId, b: PileId) -> (&mut Pile, &mut Pile) {
        match (a, b) {
            (PileId::Tableau(i), PileId::Tableau(j)) => {
                assert_ne!(i, j, "cannot move a pile onto itself");
                let (i, j) = (i as usize, j as usize);
                if i < j {
                    let (lo, hi) = self.tableau.split_at_mut(j);
                    (&mut lo[i], &mut hi[0])
                } else {
                    let (lo, hi) = self.tableau.split_at_mut(i);
                    (&mut hi[0], &mut lo[j])
                }
            }
            (PileId::Foundation(i), PileId::Foundation(j)) => {
                assert_ne!(i, j, "cannot move a pile onto itself");
                let (i, j) = (i as usize, j as usize);
                if i < j {
                    let (lo, hi) = self.foundation.split_at_mut(j);
                    (&mut lo[i], &mut hi[0])
                } else {
                    let (lo, hi) = self.foundation.split_at_mut(i);
                    (&mut hi[0], &mut lo[j])
                }
            }
            (PileId::Stock, PileId::Stock) => panic!("cannot move the stock onto itself"),
            (PileId::Stock, PileId::Tableau(i)) => {
                (&mut self.stock, &mut self.tableau[i as usize])
            }
            (PileId::Stock, PileId::Foundation(i)) => {
                (&mut self.stock, &mut self.foundation[i as usize])
            }
            (PileId::Tableau(i), PileId::Stock) => {
                (&mut self.tableau[i as usize], &mut self.stock)
            }
            (PileId::Foundation(i), PileId::Stock) => {
                (&mut self.foundation[i as usize], &mut self.stock)
            }
            (PileId::Tableau(i), PileId::Foundation(j)) => {
                (&mut self.tableau[i as usize], &mut self.foundation[j as usize])
            }
            (PileId::Foundation(i), PileId::Tableau(j)) => {
                (&mut self.foundation[i as usize], &mut self.tableau[j as usize])
            }
        }
    }

    /// Transfer the top `n` cards of pile `from` onto pile `to`.
    pub fn move_cards(&mut self, from: PileId, to: PileId, n: usize) {
        let (f, t) = self.pile_pair_mut(from, to);
        Pile::move_cards(f, t, n);
    }

    /// Transfer one card between arbitrary positions of two piles.
    pub fn move_card(
        &mut self,
        from: PileId,
        from_pos: Option<usize>,
        to: PileId,
        to_pos: Option<usize>,
    ) {
        let (f, t) = self.pile_pair_mut(from, to);
        Pile::move_card(f, from_pos, t, to_pos);
    }

    /// Won when everything has left the stock and tableau and each
    /// foundation holds its full suit in ascending order.
    #[must_use]
    pub fn is_won(&self) -> bool {
        if self.stock.has_cards() {
            return false;
        }
        if self.tableau.iter().any(Pile::has_cards) {
            return false;
        }
        for (i, pile) in self.foundation.iter().enumerate() {
            if pile.size() != usize::from(crate::types::CARDS_PER_SUIT) {
                return false;
            }
            for (k, card) in pile.iter().enumerate() {
                if card.rank() as usize != k + 1 || card.suit().index() != i {
                    return false;
                }
            }
        }
        true
    }

    /// Whether a stock repile would change anything: false on an empty
    /// stock, at the default fresh-pass position, and at the trailing
    /// remainder position of a short stock.
    #[must_use]
    pub fn is_stock_dirty(&self) -> bool {
        if !self.stock.has_cards() {
            return false;
        }
        if self.stock_position == NUM_STOCK_CARD_DRAW - 1 {
            return false;
        }
        if self.stock_position < NUM_STOCK_CARD_DRAW
            && self.stock_position == self.stock.size() - 1
        {
            return false;
        }
        true
    }

    /// Reset the cursor to the start of a fresh pass. On an empty stock the
    /// subtraction wraps; that value is never read before the next check of
    /// `stock.has_cards()`.
    pub fn repile_stock(&mut self) {
        self.stock_position = NUM_STOCK_CARD_DRAW.min(self.stock.size()).wrapping_sub(1);
    }

    /// The next visible stock position after `from`: normally `from + 3`,
    /// clamped so the trailing remainder of a pass still surfaces the last
    /// card. Returns `stock.size()` to signal the end of iteration.
    #[must_use]
    pub fn next_in_stock(&self, from: usize) -> usize {
        let size = self.stock.size();
        if from + 1 >= size {
            return size;
        }
        let next = from + NUM_STOCK_CARD_DRAW;
        if next < size {
            next
        } else {
            size - 1
        }
    }

    /// Positions a player could act on by cycling the deck forward from the
    /// current cursor, in order.
    pub fn visible_stock(&self) -> impl Iterator<Item = usize> + '_ {
        let mut pos = self.stock_position;
        std::iter::from_fn(move || {
            if pos >= self.stock.size() {
                return None;
            }
            let current = pos;
            pos = self.next_in_stock(pos);
            Some(current)
        })
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.tableau.iter().map(Pile::size).sum::<usize>()
            + self.foundation.iter().map(Pile::size).sum::<usize>()
            + self.stock.size()
    }
}

/// Free-function forms mirrored for callers that prefer them.
#[inline]
#[must_use]
pub fn is_won(game: &KlondikeGame) -> bool {
    game.is_won()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_shape() {
        let mut game = KlondikeGame::new(0);
        game.set_up();
        for (i, pile) in game.tableau.iter().enumerate() {
            assert_eq!(pile.size(), i + 1);
            assert!(pile.from_top(0).is_face_up());
            for k in 0..i {
                assert!(!pile[k].is_face_up());
            }
        }
        assert_eq!(game.stock.size(), 52 - 28);
        assert_eq!(game.stock_position, NUM_STOCK_CARD_DRAW - 1);
        assert_eq!(game.card_count(), 52);
        assert!(!game.is_won());
        assert!(!game.is_stock_dirty());
    }

    #[test]
    fn next_in_stock_clamps_to_tail() {
        let mut game = KlondikeGame::new(3);
        game.set_up();
        let size = game.stock.size(); // 24
        assert_eq!(game.next_in_stock(2), 5);
        assert_eq!(game.next_in_stock(size - 4), size - 1);
        assert_eq!(game.next_in_stock(size - 2), size - 1);
        assert_eq!(game.next_in_stock(size - 1), size);
        let visible: Vec<usize> = game.visible_stock().collect();
        assert_eq!(visible.first(), Some(&2));
        assert_eq!(visible.last(), Some(&(size - 1)));
    }
}
