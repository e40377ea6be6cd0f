//! Batch harness: decide many seeds in parallel and persist the results.
//!
//! Parallelism is embarrassingly parallel across seeds. Each rayon worker
//! owns one reusable [`KlondikeSolver`]; the only cross-worker state is an
//! atomic progress counter and the collected result vector. Files are
//! written by the coordinator between batches, never by workers.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::persist::{append_decks, append_results, append_stats, ensure_output_dirs, BatchStats};
use crate::solver::{GameResult, KlondikeSolver, SearchLimits};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub first_seed: u64,
    /// Number of batches to run; 0 means run forever.
    pub num_batches: u32,
    pub batch_size: u32,
    /// Per-solve state budget; 0 means unbounded.
    pub max_states: u64,
    /// Worker count; 0 means one per logical core.
    pub num_solvers: usize,
    pub write_game_solutions: bool,
    pub output_directory: PathBuf,
    pub seed_file_path: Option<PathBuf>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            first_seed: 0,
            num_batches: 100,
            batch_size: 1000,
            max_states: 10_000_000,
            num_solvers: 0,
            write_game_solutions: false,
            output_directory: PathBuf::from("./results/"),
            seed_file_path: None,
        }
    }
}

/// Where the next batch's seeds come from: a counting cursor, or a
/// position in a seed list read from disk.
enum SeedSource {
    Range { next: u64 },
    File { seeds: Vec<u64>, position: usize },
}

impl SeedSource {
    fn next_batch(&mut self, batch_size: usize) -> Vec<u64> {
        match self {
            SeedSource::Range { next } => {
                let start = *next;
                *next += batch_size as u64;
                (start..*next).collect()
            }
            SeedSource::File { seeds, position } => {
                let end = (*position + batch_size).min(seeds.len());
                let batch = seeds[*position..end].to_vec();
                *position = end;
                batch
            }
        }
    }
}

pub struct BatchRunner {
    options: BatchOptions,
}

impl BatchRunner {
    #[must_use]
    pub fn new(options: BatchOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Load the seed file and position the cursor at the first occurrence
    /// of `first_seed`, mirroring stream extraction: parsing stops at the
    /// first token that is not an integer.
    fn seed_source(&self) -> Result<SeedSource, String> {
        let Some(path) = &self.options.seed_file_path else {
            return Ok(SeedSource::Range { next: self.options.first_seed });
        };
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to open seed file {}: {e}", path.display()))?;
        let seeds: Vec<u64> = text
            .split_whitespace()
            .map_while(|token| token.parse().ok())
            .collect();
        let position = seeds
            .iter()
            .position(|&s| s == self.options.first_seed)
            .ok_or_else(|| {
                format!(
                    "Seed {} not present in seed file {}",
                    self.options.first_seed,
                    path.display()
                )
            })?;
        Ok(SeedSource::File { seeds, position })
    }

    fn print_options(&self, num_solvers: usize) {
        let o = &self.options;
        println!("Running batches with options:");
        print!("First seed: {:>10}", o.first_seed);
        if o.num_batches > 0 && o.seed_file_path.is_none() {
            print!(
                " (last seed: {})",
                o.first_seed + u64::from(o.batch_size) * u64::from(o.num_batches) - 1
            );
        }
        println!();
        print!("Batches:    {:>10}", o.num_batches);
        if o.num_batches == 0 {
            print!(" (infinite)");
        }
        println!();
        println!("Batch Size: {:>10}", o.batch_size);
        print!("Max States: {:>10}", o.max_states);
        if o.max_states == 0 {
            print!(" (infinite)");
        }
        println!();
        print!("Solvers:    {:>10}", o.num_solvers);
        if o.num_solvers == 0 {
            print!(" (deduced to {num_solvers})");
        }
        println!();
        println!("Results directory: {}", o.output_directory.display());
        if o.write_game_solutions {
            println!("Writing out game solutions.");
        } else {
            println!("Not writing out game solutions.");
        }
        if let Some(path) = &o.seed_file_path {
            println!("Running from seed file: {}", path.display());
        }
        println!();
    }

    /// Run every batch to completion. Returns the final rolling stats.
    pub fn run(&self) -> Result<BatchStats, String> {
        ensure_output_dirs(&self.options.output_directory)?;

        let num_solvers = if self.options.num_solvers > 0 {
            self.options.num_solvers
        } else {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        };
        let num_batches = if self.options.num_batches > 0 {
            self.options.num_batches
        } else {
            u32::MAX
        };

        self.print_options(num_solvers);

        // The DFS recurses one frame per move on the path; give workers
        // room well beyond the default.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_solvers)
            .stack_size(16 * 1024 * 1024)
            .build()
            .map_err(|e| format!("Failed to build solver pool: {e}"))?;

        let mut source = self.seed_source()?;
        let mut stats = BatchStats::new(self.options.first_seed);
        let seeds_run = AtomicU64::new(0);
        let time_start = Instant::now();

        let limits = SearchLimits {
            max_states: self.options.max_states,
            ..SearchLimits::default()
        };

        for batch_index in 1..=num_batches {
            let seeds = source.next_batch(self.options.batch_size as usize);
            if seeds.is_empty() {
                break;
            }
            if let Some(&last) = seeds.last() {
                stats.end_seed = last;
            }

            let progress = ProgressBar::new(seeds.len() as u64);
            progress.set_style(
                ProgressStyle::with_template(
                    "[{elapsed_precise}] seeds {bar:40.cyan/blue} {pos}/{len} ({per_sec})",
                )
                .map_err(|e| format!("Progress template error: {e}"))?
                .progress_chars("=>-"),
            );

            let mut results: Vec<GameResult> = pool.install(|| {
                seeds
                    .par_iter()
                    .map_init(
                        || KlondikeSolver::new(limits),
                        |solver, &seed| {
                            let result = solver.solve_seed(seed);
                            seeds_run.fetch_add(1, Ordering::Relaxed);
                            progress.inc(1);
                            result
                        },
                    )
                    .collect()
            });
            progress.finish_and_clear();

            // Seed-ordered output within the batch regardless of which
            // worker finished first.
            results.sort_by_key(|r| r.seed);

            append_results(
                &self.options.output_directory,
                &results,
                self.options.write_game_solutions,
            )?;
            stats.update(&results);
            stats.run_time_secs = time_start.elapsed().as_secs();
            append_stats(&self.options.output_directory, &stats)?;

            println!(
                "Batch {batch_index} done ({} seeds run). Writing results.",
                seeds_run.load(Ordering::Relaxed)
            );
        }

        println!("All batches completed.");
        println!("Time: {} seconds", stats.run_time_secs);
        Ok(stats)
    }

    /// Generate and append the deck for every seed in the seed file.
    pub fn write_decks(&self, numeric: bool) -> Result<(), String> {
        ensure_output_dirs(&self.options.output_directory)?;
        let Some(path) = &self.options.seed_file_path else {
            return Err("Seed file must be set to write decks.".to_string());
        };
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to open seed file {}: {e}", path.display()))?;
        let seeds: Vec<u64> = text
            .split_whitespace()
            .map_while(|token| token.parse().ok())
            .collect();
        append_decks(&self.options.output_directory, &seeds, numeric)
    }
}
