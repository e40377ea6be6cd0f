use winnable::cards::Card;
use winnable::engine::apply::{do_move, undo_move};
use winnable::engine::generate::{
    available_moves, can_move_to_foundation, can_stack, find_auto_move, guaranteed_foundation,
    has_room_for_all_kings, top_of_run, two_tableau_slots,
};
use winnable::game::KlondikeGame;
use winnable::hash::fingerprint;
use winnable::moves::Move;
use winnable::pile::Pile;
use winnable::types::{PileId, PileKind, Suit};

fn set_up(seed: u64) -> KlondikeGame {
    let mut game = KlondikeGame::new(seed);
    game.set_up();
    game
}

/// Exact state image: every pile's (code, face-up) sequence plus the
/// cursor. Stricter than the fingerprint, which ignores face-up bits.
fn snapshot(game: &KlondikeGame) -> (Vec<Vec<(u8, bool)>>, usize) {
    let piles = game
        .tableau
        .iter()
        .chain(game.foundation.iter())
        .chain(std::iter::once(&game.stock))
        .map(|p| p.iter().map(|c| (c.code(), c.is_face_up())).collect())
        .collect();
    (piles, game.stock_position)
}

/// Walk the move tree a few plies deep, checking at every node that each
/// candidate move undoes to a bit-identical state.
fn check_involution(game: &mut KlondikeGame, plies: u32, checked: &mut u32) {
    let before = snapshot(game);
    let before_fp = fingerprint(game);
    for candidate in available_moves(game, &[]) {
        do_move(game, &candidate.mv);
        if plies > 1 {
            check_involution(game, plies - 1, checked);
        }
        undo_move(game, &candidate.mv);
        assert_eq!(before, snapshot(game), "undo mismatch after {}", candidate.mv);
        assert_eq!(before_fp, fingerprint(game));
        *checked += 1;
    }
}

#[test]
fn do_undo_is_an_involution() {
    for seed in [0, 1, 7, 42, 1234] {
        let mut game = set_up(seed);
        let mut checked = 0;
        check_involution(&mut game, 3, &mut checked);
        assert!(checked > 0, "seed {seed} generated no moves to check");
    }
}

#[test]
fn auto_moves_undo_cleanly_too() {
    for seed in 0..30u64 {
        let mut game = set_up(seed);
        if let Some(mv) = find_auto_move(&game, false) {
            let before = snapshot(&game);
            do_move(&mut game, &mv);
            assert_ne!(before, snapshot(&game));
            undo_move(&mut game, &mv);
            assert_eq!(before, snapshot(&game));
        }
    }
}

fn assert_invariants(game: &KlondikeGame) {
    // Card conservation.
    let mut counts = [0u8; 53];
    for pile in game.tableau.iter().chain(game.foundation.iter()) {
        for card in pile {
            counts[card.code() as usize] += 1;
        }
    }
    for card in &game.stock {
        counts[card.code() as usize] += 1;
    }
    assert!(counts[1..].iter().all(|&n| n == 1), "card multiset violated");

    // Foundation law: one suit, ascending from the ace.
    for (i, pile) in game.foundation.iter().enumerate() {
        for (k, card) in pile.iter().enumerate() {
            assert_eq!(card.suit().index(), i);
            assert_eq!(card.rank() as usize, k + 1);
        }
    }

    // Tableau laws: face-down cards form a prefix, and the face-up run
    // descends with alternating colours.
    for pile in &game.tableau {
        let mut seen_face_up = false;
        for k in 0..pile.size() {
            let card = pile[k];
            if card.is_face_up() {
                seen_face_up = true;
            } else {
                assert!(!seen_face_up, "face-down card above a face-up one");
            }
            if k > 0 && card.is_face_up() && pile[k - 1].is_face_up() {
                let below = pile[k - 1];
                assert_eq!(card.rank(), below.rank() - 1);
                assert_ne!(card.suit().is_red(), below.suit().is_red());
            }
        }
    }
}

#[test]
fn invariants_hold_along_a_playout() {
    for seed in [2, 5, 8, 21] {
        let mut game = set_up(seed);
        assert_invariants(&game);
        for _ in 0..300 {
            let mv = match find_auto_move(&game, false) {
                Some(mv) => mv,
                None => match available_moves(&game, &[]).first() {
                    Some(c) => c.mv,
                    None => break,
                },
            };
            do_move(&mut game, &mv);
            assert_invariants(&game);
            if game.is_won() {
                break;
            }
        }
    }
}

#[test]
fn stacking_rules() {
    let red_seven = Card::new(Suit::Hearts, 7);
    let black_eight = Card::new(Suit::Spades, 8);
    let red_eight = Card::new(Suit::Diamonds, 8);
    assert!(can_stack(red_seven, black_eight));
    assert!(!can_stack(red_seven, red_eight));
    assert!(!can_stack(black_eight, red_seven));
}

#[test]
fn only_aces_open_a_foundation() {
    let game = KlondikeGame::new(0);
    assert!(can_move_to_foundation(Card::new(Suit::Clubs, 1), &game.foundation));
    assert!(!can_move_to_foundation(Card::new(Suit::Clubs, 2), &game.foundation));
}

#[test]
fn foundation_builds_in_suit_order() {
    let mut game = KlondikeGame::new(0);
    game.foundation[Suit::Hearts.index()] = Pile::with_cards(
        PileKind::Foundation,
        vec![Card::new(Suit::Hearts, 1), Card::new(Suit::Hearts, 2)],
    );
    assert!(can_move_to_foundation(Card::new(Suit::Hearts, 3), &game.foundation));
    assert!(!can_move_to_foundation(Card::new(Suit::Hearts, 4), &game.foundation));
    assert!(!can_move_to_foundation(Card::new(Suit::Diamonds, 3), &game.foundation));
}

#[test]
fn guaranteed_foundation_needs_opposite_colour_cover() {
    let mut game = KlondikeGame::new(0);
    // Hearts ace is always a guaranteed move (rank 1 <= 0 + 2).
    assert!(guaranteed_foundation(Card::new(Suit::Hearts, 1), &game.foundation));

    // A red four is guaranteed only once both black foundations reach two.
    game.foundation[Suit::Hearts.index()] = Pile::with_cards(
        PileKind::Foundation,
        (1..=3).map(|r| Card::new(Suit::Hearts, r)).collect(),
    );
    assert!(!guaranteed_foundation(Card::new(Suit::Hearts, 4), &game.foundation));
    for suit in [Suit::Clubs, Suit::Spades] {
        game.foundation[suit.index()] = Pile::with_cards(
            PileKind::Foundation,
            (1..=2).map(|r| Card::new(suit, r)).collect(),
        );
    }
    assert!(guaranteed_foundation(Card::new(Suit::Hearts, 4), &game.foundation));
}

#[test]
fn empty_tableau_accepts_only_kings() {
    let mut game = KlondikeGame::new(0);
    // One empty tableau pile, a king and a queen visible in the stock.
    // Cursor lands on index 2, so the king is the visible card.
    game.stock = Pile::with_cards(
        PileKind::Stock,
        vec![
            Card::new(Suit::Clubs, 4),
            Card::new(Suit::Spades, 12),
            Card::new(Suit::Hearts, 13),
        ],
    );
    game.repile_stock();

    let candidates = available_moves(&game, &[]);
    let to_empty_tableau: Vec<&Move> = candidates
        .iter()
        .map(|c| &c.mv)
        .filter(|m| matches!(m, Move::Stock { to: PileId::Tableau(_), .. }))
        .collect();
    assert!(!to_empty_tableau.is_empty());
    for mv in to_empty_tableau {
        match mv {
            Move::Stock { card, .. } => assert_eq!(card.rank(), 13),
            _ => unreachable!(),
        }
    }
}

#[test]
fn run_detection_spans_face_up_suffix() {
    let mut pile = Pile::with_cards(
        PileKind::Tableau,
        vec![
            Card::new(Suit::Hearts, 9),
            Card::new(Suit::Spades, 5),
            Card::new(Suit::Diamonds, 4),
            Card::new(Suit::Clubs, 3),
        ],
    );
    pile.card_mut(0).flip(); // Bury the nine.
    let (length, card) = top_of_run(&pile).expect("run exists");
    assert_eq!(length, 3);
    assert_eq!(card.rank(), 5);

    let empty = Pile::new(PileKind::Tableau);
    assert!(top_of_run(&empty).is_none());
}

#[test]
fn king_room_counts_empty_piles_and_buried_kings() {
    let mut game = KlondikeGame::new(0);
    // Three empty piles plus one pile with a king at the bottom: room.
    game.tableau[3] = Pile::with_cards(
        PileKind::Tableau,
        vec![Card::new(Suit::Clubs, 13), Card::new(Suit::Hearts, 2)],
    );
    for i in [0, 1, 2] {
        game.tableau[i] = Pile::with_cards(PileKind::Tableau, vec![Card::new(Suit::Spades, 2)]);
    }
    let (room, empty) = has_room_for_all_kings(&game.tableau);
    assert!(room);
    assert_eq!(empty, Some(6));

    // Fill the last empty pile: no more room.
    game.tableau[4] = Pile::with_cards(PileKind::Tableau, vec![Card::new(Suit::Hearts, 3)]);
    game.tableau[5] = Pile::with_cards(PileKind::Tableau, vec![Card::new(Suit::Hearts, 4)]);
    game.tableau[6] = Pile::with_cards(PileKind::Tableau, vec![Card::new(Suit::Hearts, 5)]);
    let (room, empty) = has_room_for_all_kings(&game.tableau);
    assert!(!room);
    assert_eq!(empty, None);
}

#[test]
fn two_slots_predicate_needs_two_receivers() {
    let mut game = KlondikeGame::new(0);
    let red_seven = Card::new(Suit::Hearts, 7);

    game.tableau[1] = Pile::with_cards(PileKind::Tableau, vec![Card::new(Suit::Spades, 8)]);
    assert_eq!(two_tableau_slots(red_seven, &game.tableau), None);

    game.tableau[5] = Pile::with_cards(PileKind::Tableau, vec![Card::new(Suit::Clubs, 8)]);
    assert_eq!(two_tableau_slots(red_seven, &game.tableau), Some(1));

    // Kings never qualify; they go to empty piles through other rules.
    assert_eq!(two_tableau_slots(Card::new(Suit::Hearts, 13), &game.tableau), None);
}

#[test]
fn auto_move_sends_guaranteed_ace_up() {
    let mut game = KlondikeGame::new(0);
    game.tableau[2] = Pile::with_cards(
        PileKind::Tableau,
        vec![Card::new(Suit::Spades, 9), Card::new(Suit::Diamonds, 1)],
    );
    game.tableau[2].card_mut(0).flip();

    let mv = find_auto_move(&game, false).expect("ace should auto-move");
    match mv {
        Move::Tableau { card, from, to, cards_to_move, flipped_card } => {
            assert_eq!(card, Card::new(Suit::Diamonds, 1));
            assert_eq!(from, PileId::Tableau(2));
            assert_eq!(to, PileId::Foundation(Suit::Diamonds.index() as u8));
            assert_eq!(cards_to_move, 1);
            assert!(flipped_card);
        }
        other => panic!("unexpected auto move {other}"),
    }
}

#[test]
fn partial_run_in_flight_suppresses_resplits() {
    let game = set_up(17);
    // Whatever partial moves exist from the deal, flagging their card as
    // in flight must remove them from the next enumeration.
    let partials: Vec<Card> = available_moves(&game, &[])
        .iter()
        .filter_map(|c| match c.mv {
            Move::TableauPartial { card, .. } => Some(card),
            _ => None,
        })
        .collect();
    for card in partials {
        let suppressed = available_moves(&game, &[card]);
        assert!(suppressed
            .iter()
            .all(|c| !matches!(c.mv, Move::TableauPartial { card: moved, .. } if moved == card)));
    }
}
