//! The bounded depth-first search.
//!
//! Each recursion level owns one *decision node*: it records the state
//! fingerprint, greedily plays out every auto-move, then tries the ordered
//! candidates one at a time with strict do/recurse/undo discipline. A WIN
//! or UNKNOWN unwinds immediately with the move stack intact; a LOSE undoes
//! everything this level applied.

use crate::engine::generate::{available_moves, find_auto_move};
use crate::hash::fingerprint;
use crate::moves::Move;

use super::{KlondikeSolver, Outcome};

impl KlondikeSolver {
    /// `record_state` is false for the node entered through a stock repile:
    /// its card layout is identical to a state just visited, and recording
    /// it would poison the rest of the search.
    pub(crate) fn solve_recursive(&mut self, depth: u32, record_state: bool) -> Outcome {
        if record_state && !self.seen_states.insert(fingerprint(&self.game)) {
            return Outcome::Lose;
        }

        let mut auto_moves: Vec<Move> = Vec::new();
        while let Some(mv) = find_auto_move(&self.game, self.limits.extended_auto_moves) {
            self.push_move(&mv);
            auto_moves.push(mv);
        }

        if self.game.is_won() {
            return Outcome::Win;
        }

        if self.limits.max_states > 0 && self.states_tried >= self.limits.max_states {
            return Outcome::Unknown; // Out of budget; this deal stays undecided.
        }

        let candidates = available_moves(&self.game, &self.partial_run_in_flight);
        for candidate in candidates {
            self.push_move(&candidate.mv);
            self.states_tried += 1;
            let record_next = !matches!(candidate.mv, Move::RepileStock { .. });
            let result = self.solve_recursive(depth + 1, record_next);
            if result != Outcome::Lose {
                return result;
            }
            self.pop_move(&candidate.mv);
        }

        for mv in auto_moves.iter().rev() {
            self.pop_move(mv);
        }
        Outcome::Lose
    }
}
