mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::evaluation::{EvaluateArgs, MemoArgs};
use commands::scoring::{ClassifyArgs, ScoreArgs};

/// MTF-Z trade finance credit scoring
#[derive(Parser)]
#[command(
    name = "tfe",
    version,
    about = "MTF-Z trade finance credit scoring and application evaluation",
    long_about = "A CLI for scoring trade finance applicants with the MTF-Z model \
                  using decimal precision. Computes the eight financial and behavioural \
                  ratios, the weighted score and its risk band, and derives evaluation \
                  progress, decisions and text memos from stored evaluations."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset (e.g. "warn", "tradefin_eval_core=debug")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the MTF-Z score from scoring factors
    Score(ScoreArgs),
    /// Classify an MTF-Z score into its risk band
    Classify(ClassifyArgs),
    /// Load an evaluation and print its derived progress, decision and submission
    Evaluate(EvaluateArgs),
    /// Render the plain-text evaluation memo
    Memo(MemoArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Score(args) => commands::scoring::run_score(args),
        Commands::Classify(args) => commands::scoring::run_classify(args),
        Commands::Evaluate(args) => commands::evaluation::run_evaluate(args),
        Commands::Memo(args) => match commands::evaluation::run_memo(args) {
            Ok(memo) => {
                output::print_memo(&cli.output, &memo);
                process::exit(0);
            }
            Err(e) => Err(e),
        },
        Commands::Version => {
            println!("tfe {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
