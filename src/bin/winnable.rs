use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use winnable::{BatchOptions, BatchRunner};

/// Attempts to determine if Klondike games are winnable or not.
#[derive(Debug, Parser)]
#[command(name = "winnable", disable_help_flag = true)]
struct Args {
    /// The seed to start from.
    #[arg(short = 'f', long = "first", default_value_t = 0)]
    first: u64,

    /// How many batches to run. Output files are updated between batches.
    /// 0 for infinite.
    #[arg(short = 'n', long = "num-batches", default_value_t = 100)]
    num_batches: u32,

    /// How many seeds to run per batch.
    #[arg(short = 'b', long = "batch-size", default_value_t = 1000)]
    batch_size: u32,

    /// Maximum number of states to try before giving up. 0 for infinite.
    /// Correlates to ram usage.
    #[arg(short = 's', long = "max-states", default_value_t = 10_000_000)]
    max_states: u64,

    /// How many solvers to run. Solvers run on separate threads. 0 to
    /// auto-deduce.
    #[arg(short = 't', long = "num-solvers", default_value_t = 0)]
    num_solvers: usize,

    /// Write out the winning game solutions to files.
    #[arg(long = "write-game-solutions", action = ArgAction::SetTrue)]
    write_game_solutions: bool,

    /// Relative path to save output to.
    #[arg(short = 'o', long = "output-dir", default_value = "./results/")]
    output_dir: PathBuf,

    /// Relative path to seed file. If set, first seed is the seed to start
    /// from in the file.
    #[arg(short = 'F', long = "seed-file")]
    seed_file: Option<PathBuf>,

    /// Generate decks for all seeds in a seed file, and write them out to a
    /// deck file.
    #[arg(long = "write-decks", action = ArgAction::SetTrue)]
    write_decks: bool,

    /// Write decks as space-separated numeric card codes instead of
    /// rank-suit strings.
    #[arg(long = "numeric-decks", action = ArgAction::SetTrue, requires = "write_decks")]
    numeric_decks: bool,

    /// Prints this help message.
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    help: Option<bool>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.write_decks && args.seed_file.is_none() {
        eprintln!("Seed file must be set to write decks.");
        return ExitCode::from(1);
    }

    let options = BatchOptions {
        first_seed: args.first,
        num_batches: args.num_batches,
        batch_size: args.batch_size,
        max_states: args.max_states,
        num_solvers: args.num_solvers,
        write_game_solutions: args.write_game_solutions,
        output_directory: args.output_dir,
        seed_file_path: args.seed_file,
    };

    let runner = BatchRunner::new(options);
    let outcome = if args.write_decks {
        runner.write_decks(args.numeric_decks)
    } else {
        runner.run().map(|_| ())
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::from(1)
        }
    }
}
