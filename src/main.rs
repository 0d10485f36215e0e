//! # varsudoku
//!
//! Command-line front end for the variant sudoku solving engine. It reads a
//! givens file, enumerates every solution of the puzzle, and reports what it
//! found.
//!
//! ## Givens file format
//!
//! Nine non-empty lines of nine symbols each (whitespace between symbols is
//! ignored, lines starting with `#` are skipped). Digits `1`-`9` are givens;
//! `0` or `.` marks a blank cell.
//!
//! ```text
//! .2...6.8.
//! .96.15..2
//! 5.7.3.4..
//! .3.5....4
//! 2.14.89.3
//! 8....9.1.
//! ..5.9.2.8
//! 9..18.35.
//! .6.2...9.
//! ```
//!
//! ## Usage
//!
//! ```sh
//! # Solve a single puzzle
//! varsudoku puzzle.sudoku
//! varsudoku solve --path puzzle.sudoku --print-solutions
//!
//! # Split the search across worker threads
//! varsudoku solve --path puzzle.sudoku --parallel --tasks 50
//!
//! # Solve every givens file under a directory
//! varsudoku batch --dir puzzles/
//!
//! # Generate shell completions
//! varsudoku completions zsh
//! ```
//!
//! Variant rules beyond classic sudoku are a library concern; the binary
//! solves the classic rule set over the given grid. Logging is controlled
//! through `RUST_LOG` (see `env_logger`).

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use varsudoku::engine::render;
use varsudoku::{DEFAULT_TASK_TARGET, Puzzle, SearchStats, SolutionSet, solve_parallel};
use walkdir::WalkDir;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// statistics in the report table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Command-line interface of the solver.
#[derive(Parser, Debug)]
#[command(
    name = "varsudoku",
    version,
    about = "A variant sudoku solver that finds every solution"
)]
struct Cli {
    /// An optional path argument. If provided without a subcommand, it is
    /// treated as the path of a givens file to solve.
    path: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    common: CommonOptions,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve one givens file.
    Solve {
        /// Path of the givens file.
        #[arg(short, long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every givens file under a directory.
    Batch {
        /// Directory to walk; every regular file in it is treated as a
        /// givens file.
        #[arg(short, long)]
        dir: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completions.
    Completions {
        /// The shell to generate completions for.
        shell: Shell,
    },
}

/// Options shared by the solving subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Split the search across worker threads.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Rough number of independent search tasks to aim for when parallel.
    #[arg(long, default_value_t = DEFAULT_TASK_TARGET)]
    tasks: usize,

    /// Print each solution grid.
    #[arg(short, long, default_value_t = false)]
    print_solutions: bool,

    /// Print solving statistics.
    #[arg(short, long, default_value_t = true)]
    stats: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // A bare path without a subcommand solves that file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            run_solve(&path, &cli.common);
            return;
        }
    }

    match cli.command {
        Some(Commands::Solve { path, common }) => run_solve(&path, &common),
        Some(Commands::Batch { dir, common }) => run_batch(&dir, &common),
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "varsudoku", &mut std::io::stdout());
        }
        None => {
            eprintln!("No command provided. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

fn run_solve(path: &Path, common: &CommonOptions) {
    if let Err(message) = solve_file(path, common) {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

fn run_batch(dir: &Path, common: &CommonOptions) {
    let mut solved = 0usize;
    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        match solve_file(entry.path(), common) {
            Ok(()) => solved += 1,
            Err(message) => eprintln!("{}: {message}", entry.path().display()),
        }
    }
    println!("\nBatch finished: {solved} puzzles solved.");
}

fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let mut puzzle = parse_givens(&text)?;
    let parse_time = time.elapsed();

    println!("Solving: {}", path.display());
    epoch::advance().unwrap();
    let time = Instant::now();
    let solutions: SolutionSet = if common.parallel {
        solve_parallel(&mut puzzle, common.tasks).clone()
    } else {
        puzzle.solve().clone()
    };
    let elapsed = time.elapsed();

    epoch::advance().unwrap();
    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    match solutions.len() {
        0 => println!("No solution."),
        1 => println!("Unique solution."),
        n => println!("{n} solutions."),
    }

    if common.print_solutions {
        for solution in &solutions {
            println!("\n{solution}");
        }
    }
    if !solutions.is_empty() {
        println!("\nCombined candidates across all solutions:");
        println!("{}", combined_grid(&solutions));
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            puzzle.search_stats(),
            solutions.len(),
            allocated_mib,
            resident_mib,
        );
    }
    Ok(())
}

/// Builds a puzzle from the nine-line givens format.
fn parse_givens(text: &str) -> Result<Puzzle, String> {
    let rows: Vec<Vec<char>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect())
        .collect();
    if rows.len() != 9 {
        return Err(format!("expected 9 rows of givens, found {}", rows.len()));
    }

    let mut puzzle = Puzzle::new();
    for (i, row) in rows.iter().enumerate() {
        if row.len() != 9 {
            return Err(format!(
                "expected 9 symbols in row {}, found {}",
                i + 1,
                row.len()
            ));
        }
        for (j, &symbol) in row.iter().enumerate() {
            let digit = match symbol {
                '0' | '.' => continue,
                '1'..='9' => symbol as u8 - b'0',
                other => {
                    return Err(format!("unexpected symbol {other:?} in row {}", i + 1));
                }
            };
            puzzle
                .set_digit(i as u8 + 1, j as u8 + 1, digit)
                .map_err(|c| format!("given at R{}C{} is inconsistent: {c}", i + 1, j + 1))?;
        }
    }
    Ok(puzzle)
}

/// The bitwise union of every solution's candidates, drawn as one grid.
/// Cells that agree across all solutions show a single digit.
fn combined_grid(solutions: &SolutionSet) -> String {
    render::grid(|i| solutions.iter().any(|s| s.is_possible(i)))
}

/// Helper to print one statistic line as a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {:<28} {:>18}  |", label, value);
}

fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    search: SearchStats,
    solutions: usize,
    allocated: f64,
    resident: f64,
) {
    println!("\n========================[ Solve Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Solve time (s)", format!("{:.3}", elapsed.as_secs_f64()));
    stat_line("Solutions", solutions);
    stat_line("Branch points", search.branch_points);
    stat_line("Candidates tried", search.candidates_tried);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    println!("====================================================================");
}
