#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited
#![allow(clippy::cast_possible_truncation)] // pile sizes and ranks all fit u8

pub mod types;
pub mod cards;
pub mod rng;
pub mod deck;
pub mod pile;
pub mod game;
pub mod hash;
pub mod moves;

pub mod engine {
    pub mod apply;
    pub mod generate;
}

pub mod solver;

pub mod display;
pub mod persist;
pub mod batch;

// Re-exports: stable minimal API surface for external callers
pub use crate::batch::{BatchOptions, BatchRunner};
pub use crate::cards::Card;
pub use crate::deck::gen_deck;
pub use crate::engine::apply::{do_move, undo_move};
pub use crate::engine::generate::{available_moves, find_auto_move};
pub use crate::game::KlondikeGame;
pub use crate::hash::{fingerprint, Fingerprint};
pub use crate::moves::Move;
pub use crate::solver::{GameResult, KlondikeSolver, Outcome, SearchLimits};
pub use crate::types::{PileId, PileKind, Suit};
