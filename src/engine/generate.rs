//! Candidate-move enumeration, priority ordering, and auto-moves.
//!
//! The generator produces the solver's branching set: full-run tableau
//! moves, partial-run splits, stock placements, foundation moves, and an
//! optional stock repile. Every candidate carries a priority; lower values
//! are searched first, and insertion order breaks ties (the sort is
//! stable). Auto-moves are the forced subset: moves proven never to cost
//! winnability, applied greedily without branching.

use crate::cards::Card;
use crate::game::{KlondikeGame, NUM_STOCK_CARD_DRAW};
use crate::moves::Move;
use crate::pile::Pile;
use crate::types::{PileId, Suit, RANK_ACE, RANK_KING};

// Priority classes. Offsets within a class act as tiebreakers; see the
// emission sites.
const PRIORITY_REVEAL: i32 = 100;
const PRIORITY_CLEAR_WITH_KING: i32 = 200;
const PRIORITY_STOCK: i32 = 300;
const PRIORITY_FOUNDATION: i32 = 400;
const PRIORITY_REPILE: i32 = 400;
const PRIORITY_PARTIAL_RUN: i32 = 600;

/// A candidate move with its search priority.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub mv: Move,
    pub priority: i32,
}

/// `lower` may be stacked on `higher` in the tableau: opposite colours,
/// descending by exactly one.
#[inline]
#[must_use]
pub fn can_stack(lower: Card, higher: Card) -> bool {
    lower.suit().is_red() != higher.suit().is_red() && lower.rank() == higher.rank() - 1
}

/// The card may be played onto its suit's foundation right now.
#[must_use]
pub fn can_move_to_foundation(card: Card, foundation: &[Pile]) -> bool {
    let pile = &foundation[card.suit().index()];
    if pile.has_cards() {
        pile.from_top(0).rank() == card.rank() - 1
    } else {
        card.rank() == RANK_ACE
    }
}

/// The card may be played to the foundation *and* doing so can never block
/// the game: once both opposite-colour foundations have reached rank `r`,
/// no card of rank `<= r + 2` is ever again needed to receive a tableau
/// card.
#[must_use]
pub fn guaranteed_foundation(card: Card, foundation: &[Pile]) -> bool {
    let (a, b) = if card.suit().is_red() {
        // Check the black foundations.
        (foundation[Suit::Clubs.index()].size(), foundation[Suit::Spades.index()].size())
    } else {
        (foundation[Suit::Hearts.index()].size(), foundation[Suit::Diamonds.index()].size())
    };
    let min_rank = a.min(b);
    can_move_to_foundation(card, foundation) && usize::from(card.rank()) <= min_rank + 2
}

/// The face-up run of a pile: its length and its deepest (first face-up)
/// card. `None` for an empty pile.
#[must_use]
pub fn top_of_run(pile: &Pile) -> Option<(usize, &Card)> {
    for (i, card) in pile.iter().enumerate() {
        if card.is_face_up() {
            return Some((pile.size() - i, card));
        }
    }
    None
}

/// First tableau pile that accepts `card` (an empty pile for a King, or a
/// stackable top), excluding `from`.
fn find_tableau_destination(card: Card, tableau: &[Pile], from: usize) -> Option<usize> {
    for (i, pile) in tableau.iter().enumerate() {
        if i == from {
            continue; // Can't move to itself.
        }
        if !pile.has_cards() {
            if card.rank() == RANK_KING {
                return Some(i);
            }
        } else if can_stack(card, *pile.from_top(0)) {
            return Some(i);
        }
    }
    None
}

/// Whether at least two distinct tableau tops could receive `card`, and if
/// so the first of them. Kings never qualify. Retained for the extended
/// auto-move regime; the default search does not use it.
#[must_use]
pub fn two_tableau_slots(card: Card, tableau: &[Pile]) -> Option<usize> {
    if card.rank() == RANK_KING {
        return None;
    }
    let mut first: Option<usize> = None;
    for (i, pile) in tableau.iter().enumerate() {
        if !pile.has_cards() {
            continue;
        }
        if can_stack(card, *pile.from_top(0)) {
            if first.is_some() {
                return first;
            }
            first = Some(i);
        }
    }
    None
}

/// Counts empty tableau piles plus piles whose *bottom* card is a King --
/// deliberately peeking under face-down cards, which is sound for
/// winnability reasoning: if every king is placed or has a space waiting,
/// no king will ever need a different slot. Returns whether all four kings
/// have room, and the last empty pile index if one exists.
#[must_use]
pub fn has_room_for_all_kings(tableau: &[Pile]) -> (bool, Option<usize>) {
    let mut spaces = 0;
    let mut empty_spot = None;
    for (i, pile) in tableau.iter().enumerate() {
        if !pile.has_cards() {
            empty_spot = Some(i);
            spaces += 1;
        } else if pile[0].rank() == RANK_KING {
            spaces += 1;
        }
    }
    (spaces >= 4, empty_spot)
}

/// Whether `wanted` sits on a tableau top or in the visible stock sequence.
fn is_card_available(game: &KlondikeGame, wanted: Card) -> bool {
    for pile in &game.tableau {
        if pile.has_cards() && *pile.from_top(0) == wanted {
            return true;
        }
    }
    game.visible_stock().any(|i| game.stock[i] == wanted)
}

/// A king exists that could usefully take an emptied tableau pile: one
/// visible in the stock, or one leading a run that does not already own its
/// whole pile.
fn king_available(game: &KlondikeGame, excluding: usize) -> bool {
    for (i, pile) in game.tableau.iter().enumerate() {
        if i == excluding {
            continue;
        }
        if let Some((run_length, card)) = top_of_run(pile) {
            if card.rank() == RANK_KING && run_length < pile.size() {
                return true;
            }
        }
    }
    game.visible_stock().any(|i| game.stock[i].rank() == RANK_KING)
}

#[inline]
fn reveal_priority(face_down: usize) -> i32 {
    // Deeper piles of hidden cards are more urgent to dig into.
    PRIORITY_REVEAL - (face_down as i32 - 1)
}

fn face_down_count(pile: &Pile) -> usize {
    pile.iter().filter(|c| !c.is_face_up()).count()
}

/// Full-run moves: relocate a whole face-up run onto another tableau pile,
/// either to flip the card underneath or to clear the pile for a king.
fn find_full_run_moves(game: &KlondikeGame, out: &mut Vec<Candidate>) {
    for (i, from_pile) in game.tableau.iter().enumerate() {
        let Some((run_length, card)) = top_of_run(from_pile) else {
            continue; // Empty pile.
        };
        if run_length == from_pile.size() && card.rank() == RANK_KING {
            continue; // King already owns its pile; relocation is a no-op.
        }
        let Some(to) = find_tableau_destination(*card, &game.tableau, i) else {
            continue;
        };
        let flipped = from_pile.size() > run_length;
        let mv = Move::Tableau {
            card: *card,
            from: PileId::Tableau(i as u8),
            to: PileId::Tableau(to as u8),
            cards_to_move: run_length as u8,
            flipped_card: flipped,
        };
        if flipped {
            out.push(Candidate { mv, priority: reveal_priority(face_down_count(from_pile)) });
        } else if king_available(game, i) {
            // Clearing the pile only helps if a king can take the space.
            out.push(Candidate { mv, priority: PRIORITY_CLEAR_WITH_KING });
        }
    }
}

/// Partial-run moves: split a run, leaving at least one face-up card
/// behind. Only emitted when the split accomplishes something -- the
/// uncovered card can reach the foundation, or the same-colour twin of the
/// moved card is available to restack onto what is uncovered.
fn find_partial_run_moves(game: &KlondikeGame, in_flight: &[Card], out: &mut Vec<Candidate>) {
    for (i, from_pile) in game.tableau.iter().enumerate() {
        let Some((run_length, _)) = top_of_run(from_pile) else {
            continue;
        };
        for k in (1..run_length).rev() {
            let card = *from_pile.from_top(k - 1); // Deepest card of the moved block.

            // Already split once on this path; moving it again would just
            // oscillate.
            if in_flight.contains(&card) {
                continue;
            }
            let Some(to) = find_tableau_destination(card, &game.tableau, i) else {
                continue;
            };
            let uncovered = *from_pile.from_top(k);
            let twin = Card::new(card.suit().same_colour_other(), card.rank());
            if can_move_to_foundation(uncovered, &game.foundation)
                || is_card_available(game, twin)
            {
                out.push(Candidate {
                    mv: Move::TableauPartial {
                        card,
                        from: PileId::Tableau(i as u8),
                        to: PileId::Tableau(to as u8),
                        cards_to_move: k as u8,
                    },
                    priority: PRIORITY_PARTIAL_RUN,
                });
            }
        }
    }
}

/// Stock-to-tableau placements for every visible stock card.
fn find_stock_to_tableau_moves(game: &KlondikeGame, out: &mut Vec<Candidate>) {
    for position in game.visible_stock() {
        let card = game.stock[position];
        for (k, pile) in game.tableau.iter().enumerate() {
            let playable = if pile.has_cards() {
                can_stack(card, *pile.from_top(0))
            } else {
                card.rank() == RANK_KING
            };
            if playable {
                out.push(Candidate {
                    mv: stock_move(game, position, PileId::Tableau(k as u8)),
                    // Later stock cards first: taking them leaves the
                    // earlier pass intact.
                    priority: PRIORITY_STOCK - position as i32,
                });
            }
        }
    }
}

/// Foundation moves from tableau tops and the visible stock.
fn find_moves_to_foundation(game: &KlondikeGame, out: &mut Vec<Candidate>) {
    for (i, pile) in game.tableau.iter().enumerate() {
        if !pile.has_cards() {
            continue;
        }
        let card = *pile.from_top(0);
        if can_move_to_foundation(card, &game.foundation) {
            let flipped = pile.size() > 1 && !pile.from_top(1).is_face_up();
            let priority = if flipped {
                reveal_priority(face_down_count(pile))
            } else {
                PRIORITY_FOUNDATION
            };
            out.push(Candidate {
                mv: Move::Tableau {
                    card,
                    from: PileId::Tableau(i as u8),
                    to: PileId::Foundation(card.suit().index() as u8),
                    cards_to_move: 1,
                    flipped_card: flipped,
                },
                priority,
            });
        }
    }
    for position in game.visible_stock() {
        let card = game.stock[position];
        if can_move_to_foundation(card, &game.foundation) {
            out.push(Candidate {
                mv: stock_move(game, position, PileId::Foundation(card.suit().index() as u8)),
                priority: PRIORITY_STOCK - position as i32,
            });
        }
    }
}

fn stock_move(game: &KlondikeGame, position: usize, to: PileId) -> Move {
    Move::Stock {
        card: game.stock[position],
        prev_stock_position: game.stock_position as u8,
        stock_move_position: position as u8,
        to,
    }
}

/// All candidate moves from this state, sorted by ascending priority with
/// insertion order breaking ties.
#[must_use]
pub fn available_moves(game: &KlondikeGame, in_flight: &[Card]) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(16);
    find_full_run_moves(game, &mut out);
    find_partial_run_moves(game, in_flight, &mut out);
    find_stock_to_tableau_moves(game, &mut out);
    find_moves_to_foundation(game, &mut out);

    if game.is_stock_dirty() {
        out.push(Candidate {
            mv: Move::RepileStock { prev_stock_position: game.stock_position as u8 },
            priority: PRIORITY_REPILE,
        });
    }

    out.sort_by_key(|c| c.priority); // Stable: ties keep insertion order.
    out
}

/// Stock indices whose removal provably cannot change which stock cards
/// remain accessible: the last card always; the second-to-last once the
/// cursor is pass-aligned; the visible card while inside the final
/// incomplete chunk.
fn stock_auto_candidates(game: &KlondikeGame) -> Vec<usize> {
    let size = game.stock.size();
    let mut out = Vec::with_capacity(3);
    if size == 0 {
        return out;
    }
    out.push(size - 1);
    let cursor = game.stock_position;
    if size >= 2 && cursor < size && cursor % NUM_STOCK_CARD_DRAW == NUM_STOCK_CARD_DRAW - 1 {
        out.push(size - 2);
    }
    let remainder = size % NUM_STOCK_CARD_DRAW;
    if remainder != 0 && cursor < size && cursor >= size - remainder && !out.contains(&cursor) {
        out.push(cursor);
    }
    out
}

/// At most one forced move whose application never costs winnability, or
/// `None`. The solver applies these greedily before branching, collapsing
/// long forced sequences into a single decision node.
///
/// `extended` additionally fires the two-available-spots full-run rule, a
/// strategic heuristic the default search leaves off.
#[must_use]
pub fn find_auto_move(game: &KlondikeGame, extended: bool) -> Option<Move> {
    for (i, pile) in game.tableau.iter().enumerate() {
        if !pile.has_cards() {
            continue;
        }
        let top = *pile.from_top(0);
        if guaranteed_foundation(top, &game.foundation) {
            let flipped = pile.size() > 1 && !pile.from_top(1).is_face_up();
            return Some(Move::Tableau {
                card: top,
                from: PileId::Tableau(i as u8),
                to: PileId::Foundation(top.suit().index() as u8),
                cards_to_move: 1,
                flipped_card: flipped,
            });
        }

        let Some((run_length, run_card)) = top_of_run(pile).map(|(n, c)| (n, *c)) else {
            continue;
        };

        if extended {
            if let Some(spot) = two_tableau_slots(run_card, &game.tableau) {
                return Some(Move::Tableau {
                    card: run_card,
                    from: PileId::Tableau(i as u8),
                    to: PileId::Tableau(spot as u8),
                    cards_to_move: run_length as u8,
                    // Moving the whole run flips iff cards remain hidden.
                    flipped_card: !pile[0].is_face_up(),
                });
            }
        }

        // A buried king can claim an empty pile once every king is
        // guaranteed a space.
        if !pile[0].is_face_up() && run_card.rank() == RANK_KING {
            if let (true, Some(empty)) = has_room_for_all_kings(&game.tableau) {
                return Some(Move::Tableau {
                    card: run_card,
                    from: PileId::Tableau(i as u8),
                    to: PileId::Tableau(empty as u8),
                    cards_to_move: run_length as u8,
                    flipped_card: true,
                });
            }
        }
    }

    for position in stock_auto_candidates(game) {
        let card = game.stock[position];
        if guaranteed_foundation(card, &game.foundation) {
            return Some(stock_move(game, position, PileId::Foundation(card.suit().index() as u8)));
        }
        if card.rank() == RANK_KING {
            if let (true, Some(empty)) = has_room_for_all_kings(&game.tableau) {
                return Some(stock_move(game, position, PileId::Tableau(empty as u8)));
            }
        }
    }

    None
}
