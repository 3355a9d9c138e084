//! Command-line front end.
//!
//! ```text
//! queens-ga N_QUEENS POPULATION_SIZE STEPS [MAX_SOLUTIONS] [-v] [--seed S]
//! ```
//!
//! [`run`] parses the arguments, runs the GA and writes the report to any
//! [`Write`] sink, so the binary and the tests share one code path.

use crate::error::GaError;
use crate::ga::{GaConfig, GaResult, GaRunner, GenerationObserver, GenerationStats, Termination};
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::io::{self, Write};
use thiserror::Error;

const RULE: &str = "-----------------------------------------------";

/// Positional arguments of the solver.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "queens-ga",
    about = "Solve the N-queens problem using a genetic algorithm"
)]
pub struct Cli {
    /// Number of queens; must be even
    #[arg(value_name = "N_QUEENS")]
    pub n_queens: usize,

    /// Number of individuals in the population
    #[arg(value_name = "POPULATION_SIZE")]
    pub population_size: usize,

    /// Maximum number of generations
    #[arg(value_name = "STEPS")]
    pub steps: usize,

    /// Stop after finding this many solutions
    #[arg(value_name = "MAX_SOLUTIONS")]
    pub max_solutions: Option<usize>,

    /// Pass `-v` to print progress for every generation
    #[arg(value_name = "VERBOSE", allow_hyphen_values = true)]
    pub verbose: Option<String>,

    /// Seed for the random number generator
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Turns the parsed arguments into run parameters.
    pub fn to_config(&self) -> Result<GaConfig, CliError> {
        let verbose = match self.verbose.as_deref() {
            None => false,
            Some("-v") => true,
            Some(other) => return Err(CliError::UnexpectedArgument(other.to_string())),
        };
        let mut config = GaConfig::default()
            .with_board_size(self.n_queens)
            .with_population_size(self.population_size)
            .with_max_generations(self.steps)
            .with_max_solutions(self.max_solutions.unwrap_or(1))
            .with_verbose(verbose);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

/// Errors that stop the command line before or during a run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Args(#[from] clap::Error),

    #[error("unexpected argument '{0}', only -v is accepted after MAX_SOLUTIONS")]
    UnexpectedArgument(String),

    #[error(transparent)]
    Ga(#[from] GaError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code: 2 for invalid input, 1 for runtime failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Args(_) | CliError::UnexpectedArgument(_) => 2,
            CliError::Ga(GaError::InvalidConfig(_)) => 2,
            CliError::Ga(_) | CliError::Io(_) => 1,
        }
    }
}

/// What the command line ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Too few arguments; the usage line was printed.
    Usage,
    /// `--help` was requested.
    Help,
    /// Odd board size; nothing was run.
    OddBoard,
    /// The run ended with the given termination.
    Finished(Termination),
}

/// Parses `args` (program name first), runs the GA and reports to `out`.
pub fn run<I, T, W>(args: I, out: &mut W) -> Result<Outcome, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "queens-ga".to_string());

    let wants_help = args
        .iter()
        .skip(1)
        .any(|a| a == "-h" || a == "--help");
    if !wants_help && positional_count(&args) < 3 {
        write_usage(out, &program)?;
        return Ok(Outcome::Usage);
    }

    let cli = match Cli::try_parse_from(args.iter().cloned()) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::MissingRequiredArgument => {
                write_usage(out, &program)?;
                return Ok(Outcome::Usage);
            }
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                write!(out, "{}", err.render())?;
                return Ok(Outcome::Help);
            }
            _ => return Err(err.into()),
        },
    };

    if cli.n_queens % 2 != 0 {
        writeln!(out, "\nNUM_QUEENS must be an even number.")?;
        return Ok(Outcome::OddBoard);
    }

    let config = cli.to_config()?;
    config.validate()?;

    write_banner(out, &config)?;
    let mut printer = ProgressPrinter::new(&mut *out);
    let result = GaRunner::run_with_observer(&config, &mut printer);
    printer.finish()?;
    let result = result?;

    write_report(out, &config, &result)?;
    writeln!(out)?;
    Ok(Outcome::Finished(result.termination))
}

/// Counts the arguments after the program name that are not `--seed` or
/// its value.
fn positional_count(args: &[OsString]) -> usize {
    let mut count = 0;
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        let arg = arg.to_string_lossy();
        if arg == "--seed" {
            rest.next();
        } else if !arg.starts_with("--seed=") {
            count += 1;
        }
    }
    count
}

fn write_usage<W: Write>(out: &mut W, program: &str) -> io::Result<()> {
    write!(
        out,
        "\n\nInvalid parameters. Use: {program} N_QUEENS POPULATION_SIZE STEPS MAX_SOLUTIONS\n\n"
    )
}

/// Echoes the run parameters.
pub fn write_banner<W: Write>(out: &mut W, config: &GaConfig) -> io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "Solving {} queens problem.", config.board_size)?;
    writeln!(out, "Population size: {}", config.population_size)?;
    writeln!(out, "Max number of generation(s): {}", config.max_generations)?;
    writeln!(
        out,
        "Will stop after finding {} solution(s)",
        config.max_solutions
    )?;
    writeln!(out, "{RULE}")
}

/// Prints the solutions of a finished run.
///
/// An exhausted run always says so, and names the best placement when no
/// solution was found at all.
pub fn write_report<W: Write>(out: &mut W, config: &GaConfig, result: &GaResult) -> io::Result<()> {
    match result.termination {
        Termination::Solved => {
            writeln!(out, "Population #{}.", result.generations)?;
        }
        Termination::Exhausted => {
            writeln!(
                out,
                "Generation budget exhausted after {} generation(s): found {} of {} solution(s).",
                result.generations,
                result.solutions.len(),
                config.max_solutions
            )?;
            if result.solutions.is_empty() {
                writeln!(out, "No solution found. Best: {}", result.best)?;
            }
        }
    }
    for (i, solution) in result.solutions.iter().enumerate() {
        writeln!(out, "Solution {}: {}", i + 1, solution)?;
    }
    Ok(())
}

/// Writes one progress line per generation.
///
/// The first write error is kept and returned by [`finish`](Self::finish);
/// later lines are skipped.
pub struct ProgressPrinter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> ProgressPrinter<W> {
    /// Wraps `out`; nothing is written until the first generation.
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Returns the first write error, if any.
    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<W: Write> GenerationObserver for ProgressPrinter<W> {
    fn on_generation(&mut self, stats: &GenerationStats) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = writeln!(
            self.out,
            "Building population {}: copied: {} born: {} mutation: {:.2}% best: {}",
            stats.generation,
            stats.copied,
            stats.born,
            stats.mutation_percent(),
            stats.best
        ) {
            self.error = Some(err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Individual;

    #[test]
    fn test_to_config_defaults() {
        let cli = Cli::try_parse_from(["queens-ga", "8", "100", "50"]).unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.board_size, 8);
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 50);
        assert_eq!(config.max_solutions, 1);
        assert!(!config.verbose);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_to_config_all_arguments() {
        let cli =
            Cli::try_parse_from(["queens-ga", "10", "300", "900", "4", "-v", "--seed", "12"])
                .unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.board_size, 10);
        assert_eq!(config.max_solutions, 4);
        assert!(config.verbose);
        assert_eq!(config.seed, Some(12));
    }

    #[test]
    fn test_fifth_argument_must_be_v() {
        let cli = Cli::try_parse_from(["queens-ga", "8", "100", "50", "2", "-x"]).unwrap();
        let err = cli.to_config().unwrap_err();
        assert!(matches!(err, CliError::UnexpectedArgument(ref a) if a == "-x"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_positional_count_skips_seed() {
        let args = |a: &[&str]| a.iter().map(OsString::from).collect::<Vec<_>>();
        assert_eq!(positional_count(&args(&["queens-ga"])), 0);
        assert_eq!(positional_count(&args(&["queens-ga", "abc", "100"])), 2);
        assert_eq!(positional_count(&args(&["queens-ga", "8", "--seed", "4", "100"])), 2);
        assert_eq!(positional_count(&args(&["queens-ga", "8", "--seed=4", "100", "9"])), 3);
        assert_eq!(positional_count(&args(&["queens-ga", "8", "1", "2", "3", "-v"])), 5);
    }

    #[test]
    fn test_banner() {
        let config = GaConfig::default()
            .with_board_size(8)
            .with_population_size(100)
            .with_max_generations(50)
            .with_max_solutions(2);
        let mut out = Vec::new();
        write_banner(&mut out, &config).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            format!(
                "{RULE}\nSolving 8 queens problem.\nPopulation size: 100\n\
                 Max number of generation(s): 50\nWill stop after finding 2 solution(s)\n{RULE}\n"
            )
        );
    }

    #[test]
    fn test_progress_line() {
        let stats = GenerationStats {
            generation: 0,
            copied: 180,
            born: 20,
            mutated: 1,
            fallbacks: 0,
            best: Individual::new(vec![1, 3, 0, 2]),
        };
        let mut out = Vec::new();
        let mut printer = ProgressPrinter::new(&mut out);
        printer.on_generation(&stats);
        printer.finish().unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Building population 0: copied: 180 born: 20 mutation: 0.50% best: [1,3,0,2] fitness = 0\n"
        );
    }

    #[test]
    fn test_report_exhausted_without_solution() {
        let config = GaConfig::default().with_board_size(4).with_max_solutions(2);
        let result = GaResult {
            solutions: vec![],
            best: Individual::new(vec![0, 2, 0, 2]),
            generations: 10,
            termination: Termination::Exhausted,
            seed: 1,
            fitness_history: vec![-4; 11],
            fallbacks: 0,
        };
        let mut out = Vec::new();
        write_report(&mut out, &config, &result).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Generation budget exhausted after 10 generation(s): found 0 of 2 solution(s).\n\
             No solution found. Best: [0,2,0,2] fitness = -4\n"
        );
    }

    #[test]
    fn test_report_solved() {
        let config = GaConfig::default().with_board_size(4).with_max_solutions(2);
        let result = GaResult {
            solutions: vec![
                Individual::new(vec![1, 3, 0, 2]),
                Individual::new(vec![2, 0, 3, 1]),
            ],
            best: Individual::new(vec![1, 3, 0, 2]),
            generations: 7,
            termination: Termination::Solved,
            seed: 1,
            fitness_history: vec![0; 7],
            fallbacks: 0,
        };
        let mut out = Vec::new();
        write_report(&mut out, &config, &result).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Population #7.\nSolution 1: [1,3,0,2] fitness = 0\nSolution 2: [2,0,3,1] fitness = 0\n"
        );
    }
}
