//! `lexis`: word counts, frequency tables, lexical diversity and grouping
//! from the command line.
//!
//! Text is read from the given files (concatenated) or from stdin.
//! Results go to stdout; logs go to stderr (`RUST_LOG=debug lexis ...`).

mod commands;
mod config;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lexis_types::AnalysisConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lexis",
    about = "Word frequency, lexical diversity and classroom text tools",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count words and sentences
    Count(InputArgs),
    /// Replace every run of line breaks with one space
    Unbreak(InputArgs),
    /// Print a word frequency table
    Freq(FreqArgs),
    /// Print lexical diversity statistics (N, V, TTR, Root TTR, CTTR, Log TTR)
    Diversity(AnalysisArgs),
    /// Split a course roster into groups
    Group(GroupArgs),
}

#[derive(clap::Args)]
struct InputArgs {
    /// Files to read (stdin if none)
    files: Vec<PathBuf>,
}

/// Output encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Aligned plain text
    #[default]
    Table,
    /// Comma-separated values
    Csv,
    /// Pretty-printed JSON
    Json,
}

#[derive(clap::Args)]
struct AnalysisArgs {
    #[command(flatten)]
    input: InputArgs,

    /// TOML file with `mode`, `top_n`, `min_count`, `order`
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated stopwords, e.g. "the, a, an, and, of, to"
    #[arg(long, short = 's', default_value = "")]
    stopwords: String,

    /// Tokenizer mode: word_chars or alphabetic_with_apostrophe
    #[arg(long)]
    mode: Option<String>,

    /// Keep only the first N rows (0 = all)
    #[arg(long)]
    top_n: Option<usize>,

    /// Drop rows with a count below this
    #[arg(long)]
    min_count: Option<u32>,

    /// Which filter runs first: min_count_first or top_n_first
    #[arg(long)]
    order: Option<String>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t)]
    format: Format,
}

#[derive(clap::Args)]
struct FreqArgs {
    #[command(flatten)]
    analysis: AnalysisArgs,

    /// Also print the first K rows as a bar chart (table output only)
    #[arg(long, value_name = "K")]
    chart: Option<usize>,
}

#[derive(clap::Args)]
struct GroupArgs {
    /// Roster CSV with `Course` and `Name_ori` columns
    roster: PathBuf,

    /// Course to group; lists available courses if omitted
    #[arg(long, short = 'c')]
    course: Option<String>,

    /// Number of 3-member groups
    #[arg(long, default_value_t = 0)]
    threes: usize,

    /// Number of 4-member groups
    #[arg(long, default_value_t = 0)]
    fours: usize,

    /// Explicit plan, e.g. "3x3,4x2" (overrides --threes/--fours)
    #[arg(long)]
    plan: Option<String>,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Keep roster order instead of shuffling
    #[arg(long)]
    no_shuffle: bool,

    /// Read columns by position when the headers are missing
    #[arg(long)]
    positional: bool,
}

fn read_input(args: &InputArgs) -> Result<String> {
    if args.files.is_empty() {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        return Ok(input);
    }

    let mut input = String::new();
    for path in &args.files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if !input.is_empty() {
            input.push('\n');
        }
        input.push_str(&text);
    }
    Ok(input)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Count(args) => commands::count(&read_input(&args)?, &mut out),
        Command::Unbreak(args) => commands::unbreak(&read_input(&args)?, &mut out),
        Command::Freq(args) => {
            let analysis = &args.analysis;
            let text = read_input(&analysis.input)?;
            let cfg = config::resolve(analysis, AnalysisConfig::word_frequency())?;
            commands::freq(
                &text,
                &cfg,
                &analysis.stopwords,
                analysis.format,
                args.chart,
                &mut out,
            )
        }
        Command::Diversity(args) => {
            let text = read_input(&args.input)?;
            let cfg = config::resolve(&args, AnalysisConfig::lexical_diversity())?;
            commands::diversity(&text, &cfg, &args.stopwords, args.format, &mut out)
        }
        Command::Group(args) => commands::group(&args, &mut out),
    }
}
