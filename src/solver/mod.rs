use crate::cards::Card;
use crate::engine::apply::{do_move, undo_move};
use crate::game::KlondikeGame;
use crate::moves::Move;

pub mod search;
pub mod seen;

pub use seen::SeenStates;

/// Limits and toggles for a search.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// State-visit budget per solve; 0 means search until decided.
    pub max_states: u64,
    /// Also fire the two-available-spots auto-move rule. Off by default:
    /// the narrow rule set is the provably-safe one.
    pub extended_auto_moves: bool,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_states: 10_000_000,
            extended_auto_moves: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Unknown,
}

/// Result of deciding one deal.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub positions_tried: u64,
    pub seed: u64,
    /// Witnessing move sequence; non-empty only on a win.
    pub solution: Vec<Move>,
    pub outcome: Outcome,
}

/// Decides deals. Owns its game, its visited-state table, and its move
/// stack; one solver per worker, never shared.
pub struct KlondikeSolver {
    pub limits: SearchLimits,
    pub(crate) game: KlondikeGame,
    pub(crate) move_sequence: Vec<Move>,
    /// Cards currently moved as a partial run on the active path. Splitting
    /// the same card again would oscillate A->B->A forever.
    pub(crate) partial_run_in_flight: Vec<Card>,
    pub(crate) states_tried: u64,
    pub(crate) seen_states: SeenStates,
}

impl KlondikeSolver {
    #[must_use]
    pub fn new(limits: SearchLimits) -> Self {
        Self {
            limits,
            game: KlondikeGame::new(0),
            move_sequence: Vec::new(),
            partial_run_in_flight: Vec::new(),
            states_tried: 0,
            seen_states: SeenStates::with_budget(limits.max_states),
        }
    }

    #[must_use]
    pub fn with_max_states(max_states: u64) -> Self {
        Self::new(SearchLimits { max_states, ..SearchLimits::default() })
    }

    /// Reset onto a fresh deal. Clears the visited table (keeping its
    /// allocation) so peak memory stays bounded across a batch.
    pub fn set_seed(&mut self, seed: u64) {
        self.game = KlondikeGame::new(seed);
        self.game.set_up();
        self.reset_search_state();
    }

    /// Solve from an arbitrary position, e.g. a game in progress.
    pub fn set_game(&mut self, game: KlondikeGame) {
        self.game = game;
        self.reset_search_state();
    }

    fn reset_search_state(&mut self) {
        self.move_sequence.clear();
        self.partial_run_in_flight.clear();
        self.states_tried = 0;
        self.seen_states.clear();
    }

    #[must_use]
    pub fn game(&self) -> &KlondikeGame {
        &self.game
    }

    /// Run the search for the currently loaded deal.
    pub fn solve(&mut self) -> GameResult {
        let outcome = self.solve_recursive(0, true);
        GameResult {
            positions_tried: self.states_tried,
            seed: self.game.seed,
            solution: if outcome == Outcome::Win {
                self.move_sequence.clone()
            } else {
                Vec::new()
            },
            outcome,
        }
    }

    /// Convenience: load `seed` and solve it.
    pub fn solve_seed(&mut self, seed: u64) -> GameResult {
        self.set_seed(seed);
        self.solve()
    }

    /// Apply a move on behalf of the search, with path bookkeeping.
    pub(crate) fn push_move(&mut self, mv: &Move) {
        self.move_sequence.push(*mv);
        if let Move::TableauPartial { card, .. } = mv {
            self.partial_run_in_flight.push(*card);
        }
        do_move(&mut self.game, mv);
    }

    /// Reverse a move applied with `push_move`.
    pub(crate) fn pop_move(&mut self, mv: &Move) {
        self.move_sequence.pop();
        if let Move::TableauPartial { card, .. } = mv {
            match self.partial_run_in_flight.iter().position(|c| c == card) {
                Some(i) => {
                    self.partial_run_in_flight.swap_remove(i);
                }
                None => {
                    // do/undo coupling bug; keep going in release rather
                    // than corrupt the whole batch.
                    debug_assert!(false, "undo of partial move not in flight: {card}");
                    eprintln!("[solver] undo of partial move not in flight: {card}");
                }
            }
        }
        undo_move(&mut self.game, mv);
    }
}
