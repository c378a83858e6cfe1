//! Command-line adapter for the gridlock engine.
//!
//! Three subcommands wrap the library crates:
//!
//! - `gridlock solve` reads a problem and prints its solution (or all
//!   solutions with `--multiple`)
//! - `gridlock generate` prints a fresh puzzle with a unique solution;
//!   `--seed` reproduces a previous run
//! - `gridlock display` reformats a grid without solving it
//!
//! Problems are read from an argument, a file, or stdin, as one line of 81
//! characters or nine lines of nine, with `_`, `.`, or space for empty
//! cells.

use std::{
    error::Error,
    fs,
    io::{self, Read as _, Write as _},
    process,
    str::FromStr as _,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use gridlock_core::Grid;
use gridlock_generator::{Seed, generate, generate_with_seed};
use gridlock_solver::{SolutionLimit, solve};

#[derive(Debug, Parser)]
#[command(name = "gridlock", version, about = "solve or generate Sudoku grids")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a Sudoku problem.
    Solve(SolveArgs),
    /// Generate a new problem with a unique solution.
    Generate(GenerateArgs),
    /// Reformat a grid without solving it.
    Display(DisplayArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Human-friendly table with row separators.
    Console,
    /// Nine lines of nine characters.
    Grid,
    /// One line of 81 characters.
    Line,
}

impl Format {
    fn render(self, grid: &Grid) -> String {
        match self {
            Format::Console => grid.to_console(),
            Format::Grid => grid.to_grid_string(),
            Format::Line => {
                let mut line = grid.to_line();
                line.push('\n');
                line
            }
        }
    }
}

#[derive(Debug, Args)]
struct SolveArgs {
    /// Print a difficulty estimate on stderr.
    #[arg(short, long)]
    estimate: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "console")]
    format: Format,

    /// Read the problem from this file (- for stdin).
    #[arg(short, long, default_value = "-", value_name = "FILE")]
    input: String,

    /// Write solutions to this file (- for stdout).
    #[arg(short, long, default_value = "-", value_name = "FILE")]
    output: String,

    /// Print every solution instead of requiring a unique one.
    #[arg(short, long)]
    multiple: bool,

    /// Problem as an 81-character string.
    problem: Option<String>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Print the difficulty estimate and seed on stderr.
    #[arg(short, long)]
    estimate: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "console")]
    format: Format,

    /// Write the problem to this file (- for stdout).
    #[arg(short, long, default_value = "-", value_name = "FILE")]
    output: String,

    /// Reproduce a previous run: 64 hex characters or an arbitrary phrase.
    #[arg(long, value_name = "SEED")]
    seed: Option<String>,
}

#[derive(Debug, Args)]
struct DisplayArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value = "console")]
    format: Format,

    /// Read the problem from this file (- for stdin).
    #[arg(short, long, default_value = "-", value_name = "FILE")]
    input: String,

    /// Write the problem to this file (- for stdout).
    #[arg(short, long, default_value = "-", value_name = "FILE")]
    output: String,

    /// Problem as an 81-character string.
    problem: Option<String>,
}

fn main() {
    if cfg!(debug_assertions) {
        better_panic::install();
    }
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("gridlock: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Solve(args) => solve_cmd(&args),
        Command::Generate(args) => generate_cmd(&args),
        Command::Display(args) => display_cmd(&args),
    }
}

fn solve_cmd(args: &SolveArgs) -> Result<(), Box<dyn Error>> {
    let grid: Grid = read_problem(&args.input, args.problem.as_deref())?.parse()?;
    let limit = if args.multiple {
        SolutionLimit::All
    } else {
        SolutionLimit::Unique
    };

    let report = solve(&grid, limit)?;
    log::debug!(
        "{} solution(s), difficulty {:.2}",
        report.solutions.len(),
        report.difficulty
    );

    if report.solutions.is_empty() {
        return Err("no solution found".into());
    }
    if !args.multiple && report.solutions.len() > 1 {
        return Err("the problem has more than one solution; pass --multiple to print them".into());
    }

    let mut rendered = String::new();
    for solution in &report.solutions {
        rendered.push_str(&args.format.render(solution));
    }
    write_output(&args.output, &rendered)?;

    if args.estimate {
        eprintln!("difficulty: {:.2}", report.difficulty);
    }
    Ok(())
}

fn generate_cmd(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let puzzle = match &args.seed {
        Some(text) => generate_with_seed(parse_seed(text)),
        None => generate(),
    }?;

    write_output(&args.output, &args.format.render(&puzzle.problem))?;

    if args.estimate {
        eprintln!("difficulty: {:.2}", puzzle.difficulty);
        eprintln!("seed: {}", puzzle.seed);
    }
    Ok(())
}

fn display_cmd(args: &DisplayArgs) -> Result<(), Box<dyn Error>> {
    let grid: Grid = read_problem(&args.input, args.problem.as_deref())?.parse()?;
    write_output(&args.output, &args.format.render(&grid))
}

/// A seed argument is either the 64-hex form a previous run printed or an
/// arbitrary phrase to hash into a seed.
fn parse_seed(text: &str) -> Seed {
    Seed::from_str(text).unwrap_or_else(|_| Seed::from_phrase(text))
}

fn read_problem(input: &str, problem: Option<&str>) -> Result<String, Box<dyn Error>> {
    match problem {
        Some(text) => {
            if input != "-" {
                return Err("--input is not allowed together with a problem argument".into());
            }
            Ok(text.to_owned())
        }
        None if input == "-" => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        None => Ok(fs::read_to_string(input)?),
    }
}

fn write_output(output: &str, text: &str) -> Result<(), Box<dyn Error>> {
    if output == "-" {
        io::stdout().write_all(text.as_bytes())?;
    } else {
        fs::write(output, text)?;
    }
    Ok(())
}
