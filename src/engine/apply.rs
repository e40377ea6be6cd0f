//! Mechanical move application and reversal.
//!
//! `undo_move(do_move(g, m), m)` restores `g` bit-for-bit, including
//! face-up flags and the stock cursor. The solver layers its own
//! bookkeeping (move sequence, partial-run in-flight set) on top of these;
//! replay tooling calls them directly.

use crate::game::KlondikeGame;
use crate::moves::Move;
use crate::types::PileId;

pub fn do_move(game: &mut KlondikeGame, mv: &Move) {
    match *mv {
        Move::Tableau { from, to, cards_to_move, flipped_card, .. } => {
            tableau_do(game, from, to, cards_to_move, flipped_card);
        }
        Move::TableauPartial { from, to, cards_to_move, .. } => {
            tableau_do(game, from, to, cards_to_move, false);
        }
        Move::Stock { stock_move_position, to, .. } => {
            let position = usize::from(stock_move_position);
            game.move_card(PileId::Stock, Some(position), to, None);
            if position == 0 {
                // The whole waste prefix has been consumed; a fresh pass
                // begins or no card would be under the cursor.
                game.repile_stock();
            } else {
                // The card that was covered is now the visible one.
                game.stock_position = position - 1;
            }
        }
        Move::RepileStock { .. } => game.repile_stock(),
    }
}

pub fn undo_move(game: &mut KlondikeGame, mv: &Move) {
    match *mv {
        Move::Tableau { from, to, cards_to_move, flipped_card, .. } => {
            tableau_undo(game, from, to, cards_to_move, flipped_card);
        }
        Move::TableauPartial { from, to, cards_to_move, .. } => {
            tableau_undo(game, from, to, cards_to_move, false);
        }
        Move::Stock { prev_stock_position, stock_move_position, to, .. } => {
            game.move_card(to, None, PileId::Stock, Some(usize::from(stock_move_position)));
            game.stock_position = usize::from(prev_stock_position);
        }
        Move::RepileStock { prev_stock_position } => {
            game.stock_position = usize::from(prev_stock_position);
        }
    }
}

fn tableau_do(game: &mut KlondikeGame, from: PileId, to: PileId, count: u8, flipped: bool) {
    game.move_cards(from, to, usize::from(count));
    if flipped {
        game.pile_mut(from).from_top_mut(0).flip(); // Reveal the uncovered card.
    }
}

fn tableau_undo(game: &mut KlondikeGame, from: PileId, to: PileId, count: u8, flipped: bool) {
    // Re-hide first: the face-down card must already be under the cards
    // sliding back on top of it.
    if flipped {
        game.pile_mut(from).from_top_mut(0).flip();
    }
    game.move_cards(to, from, usize::from(count));
}
