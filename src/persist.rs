//! Append-only result files written between batches.
//!
//! Everything here is plain UTF-8 text with fixed-width numeric columns so
//! the files stay grep- and diff-friendly across runs. Appends are
//! idempotent per batch; there is no partial-write cleanup to do.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::deck::gen_deck;
use crate::display::write_game;
use crate::engine::apply::do_move;
use crate::game::KlondikeGame;
use crate::solver::{GameResult, Outcome};

pub const SOLUTIONS_SUBFOLDER: &str = "solutions";

/// Create the output directory tree. Must succeed before any run starts.
pub fn ensure_output_dirs(results_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(results_dir)
        .map_err(|e| format!("Failed to create results directory: {e}"))?;
    fs::create_dir_all(results_dir.join(SOLUTIONS_SUBFOLDER))
        .map_err(|e| format!("Failed to create solutions directory: {e}"))?;
    Ok(())
}

fn append_writer(path: PathBuf) -> Result<BufWriter<File>, String> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Append one batch of results, sorted by the caller, to the per-outcome
/// seed logs. Optionally renders a solution playback file per win.
pub fn append_results(
    results_dir: &Path,
    results: &[GameResult],
    write_solutions: bool,
) -> Result<(), String> {
    let mut win_file = append_writer(results_dir.join("winning_seeds.txt"))?;
    let mut lose_file = append_writer(results_dir.join("losing_seeds.txt"))?;
    let mut unknown_file = append_writer(results_dir.join("unknown_seeds.txt"))?;

    for result in results {
        let line = match result.outcome {
            Outcome::Win => writeln!(
                win_file,
                "{:0>10} (positions tried: {:>10}, solution length: {:>10})",
                result.seed,
                result.positions_tried,
                result.solution.len()
            ),
            Outcome::Lose => writeln!(
                lose_file,
                "{:0>10} (positions tried: {:>10})",
                result.seed, result.positions_tried
            ),
            Outcome::Unknown => writeln!(
                unknown_file,
                "{:0>10} (positions tried: {:>10})",
                result.seed, result.positions_tried
            ),
        };
        line.map_err(|e| format!("Failed to write result line: {e}"))?;

        if write_solutions && result.outcome == Outcome::Win {
            write_solution_file(results_dir, result)?;
        }
    }
    Ok(())
}

/// Full playback for one winning seed: the move list, then every board
/// state interleaved with the move that produced it. Truncated on write.
pub fn write_solution_file(results_dir: &Path, result: &GameResult) -> Result<(), String> {
    let path = results_dir
        .join(SOLUTIONS_SUBFOLDER)
        .join(format!("{}.txt", result.seed));
    let file =
        File::create(&path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let mut out = BufWriter::new(file);

    let io_err = |e: std::io::Error| format!("Failed to write {}: {e}", path.display());

    for mv in &result.solution {
        write!(out, "{mv} ").map_err(io_err)?;
    }
    writeln!(out, "\n").map_err(io_err)?;

    let mut game = KlondikeGame::new(result.seed);
    game.set_up();
    write_game(&game, &mut out).map_err(io_err)?;

    for mv in &result.solution {
        do_move(&mut game, mv);
        write_game(&game, &mut out).map_err(io_err)?;
        writeln!(out, "{mv}").map_err(io_err)?;
    }
    Ok(())
}

/// Rolling statistics across every batch completed so far.
#[derive(Debug, Clone)]
pub struct BatchStats {
    pub start_seed: u64,
    pub end_seed: u64,
    pub total_games: u64,
    pub wins: u64,
    pub losses: u64,
    pub unknown: u64,
    pub completed_avg_positions: f64,
    pub won_avg_positions: f64,
    pub lost_avg_positions: f64,
    pub avg_solution_depth: f64,
    pub max_solution_depth: u64,
    pub min_solution_depth: u64,
    pub run_time_secs: u64,
}

impl BatchStats {
    #[must_use]
    pub fn new(start_seed: u64) -> Self {
        Self {
            start_seed,
            end_seed: start_seed,
            total_games: 0,
            wins: 0,
            losses: 0,
            unknown: 0,
            completed_avg_positions: 0.0,
            won_avg_positions: 0.0,
            lost_avg_positions: 0.0,
            avg_solution_depth: 0.0,
            max_solution_depth: 0,
            min_solution_depth: u64::MAX,
            run_time_secs: 0,
        }
    }

    /// Fold one batch of results into the running totals and averages.
    #[allow(clippy::cast_precision_loss)]
    pub fn update(&mut self, results: &[GameResult]) {
        let mut wins = 0u64;
        let mut losses = 0u64;
        let mut unknown = 0u64;
        let mut win_positions = 0u64;
        let mut loss_positions = 0u64;
        let mut solution_lengths = 0u64;

        for r in results {
            match r.outcome {
                Outcome::Win => {
                    wins += 1;
                    win_positions += r.positions_tried;
                    let depth = r.solution.len() as u64;
                    solution_lengths += depth;
                    self.max_solution_depth = self.max_solution_depth.max(depth);
                    self.min_solution_depth = self.min_solution_depth.min(depth);
                }
                Outcome::Lose => {
                    losses += 1;
                    loss_positions += r.positions_tried;
                }
                Outcome::Unknown => unknown += 1,
            }
        }

        let all_wins = self.wins + wins;
        if all_wins > 0 {
            self.won_avg_positions = (self.won_avg_positions * self.wins as f64
                + win_positions as f64)
                / all_wins as f64;
            self.avg_solution_depth = (self.avg_solution_depth * self.wins as f64
                + solution_lengths as f64)
                / all_wins as f64;
        }
        let all_losses = self.losses + losses;
        if all_losses > 0 {
            self.lost_avg_positions = (self.lost_avg_positions * self.losses as f64
                + loss_positions as f64)
                / all_losses as f64;
        }
        let completed = all_wins + all_losses;
        if completed > 0 {
            self.completed_avg_positions = (self.completed_avg_positions
                * (self.wins + self.losses) as f64
                + win_positions as f64
                + loss_positions as f64)
                / completed as f64;
        }

        self.total_games += results.len() as u64;
        self.wins = all_wins;
        self.losses = all_losses;
        self.unknown += unknown;
    }
}

/// Append one stats block to `stats.txt`.
#[allow(clippy::cast_precision_loss)]
pub fn append_stats(results_dir: &Path, stats: &BatchStats) -> Result<(), String> {
    let mut out = append_writer(results_dir.join("stats.txt"))?;
    let total = stats.total_games as f64;
    let pct = |n: u64| if stats.total_games == 0 { 0.0 } else { n as f64 / total * 100.0 };
    let min_depth = if stats.min_solution_depth == u64::MAX {
        0
    } else {
        stats.min_solution_depth
    };

    (|| -> std::io::Result<()> {
        writeln!(
            out,
            "Ran from seed    {:>10} to seed {:>10}",
            stats.start_seed, stats.end_seed
        )?;
        writeln!(out, "Total games run: {:>10}", stats.total_games)?;
        writeln!(out, "Wins:            {:>10} ({:>2.2}%)", stats.wins, pct(stats.wins))?;
        writeln!(out, "Losses:          {:>10} ({:>2.2}%)", stats.losses, pct(stats.losses))?;
        writeln!(out, "Unsolved:        {:>10} ({:>2.2}%)", stats.unknown, pct(stats.unknown))?;
        writeln!(out, "Solved games:    {:>2.2}%", pct(stats.wins + stats.losses))?;
        writeln!(
            out,
            "Average positions tried for wins:            {:>10.2}",
            stats.won_avg_positions
        )?;
        writeln!(
            out,
            "Average positions tried for losses:          {:>10.2}",
            stats.lost_avg_positions
        )?;
        writeln!(
            out,
            "Average positions tried for completed games: {:>10.2}",
            stats.completed_avg_positions
        )?;
        writeln!(
            out,
            "Average solution depth: {:>10.2} (min: {:>3}, max: {:>3})",
            stats.avg_solution_depth, min_depth, stats.max_solution_depth
        )?;
        writeln!(out, "Total run time: {:>10}s", stats.run_time_secs)?;
        writeln!(out, "********")?;
        writeln!(out)
    })()
    .map_err(|e| format!("Failed to write stats: {e}"))
}

/// Append the generated deck for each seed to `decks.txt`: comma-separated
/// rank-suit strings, or space-separated 1..=52 card codes in numeric mode.
pub fn append_decks(results_dir: &Path, seeds: &[u64], numeric: bool) -> Result<(), String> {
    let mut out = append_writer(results_dir.join("decks.txt"))?;
    for &seed in seeds {
        let deck = gen_deck(seed, 1);
        let line = if numeric {
            deck.iter()
                .map(|c| c.code().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            deck.iter().map(|c| format!("{c},")).collect::<String>()
        };
        writeln!(out, "{line}").map_err(|e| format!("Failed to write decks.txt: {e}"))?;
    }
    Ok(())
}
