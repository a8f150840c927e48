//! Corpus benchmark for the analysis pipeline.
//!
//! Runs three workloads over one large text file and prints one row each:
//!
//! - `tokenize`: streaming tokenization only
//! - `count`: tokenization, stopword check and frequency counting
//! - `analyze`: the full pipeline, including sorting, row filters and summary
//!
//! Each row reports the median of several timed runs, MiB/s, tokens/s, the
//! number of distinct types and the share of tokens removed as stopwords.
//!
//! ```bash
//! ./target/release/corpus_bench /path/to/corpus.txt
//! ./target/release/corpus_bench /path/to/corpus.txt alpha "the,a,an,of,to"
//! ```
//!
//! ```text
//! corpus: 100.0 MiB, mode word_chars, 5 stopwords
//! stage       median ms      MiB/s     Mtok/s      types  stopword %
//! tokenize        398.2      251.1       43.9          -           -
//! count           611.7      163.5       28.6    412_907        27.3
//! analyze         640.0      156.2       27.3    412_907        27.3
//! ```

use std::env;
use std::fs;
use std::time::{Duration, Instant};

use lexis_core::analyzer::stopwords::StopwordSet;
use lexis_core::analyzer::tokenizer::Tokenizer;
use lexis_core::pipeline::{Analysis, Analyzer};
use lexis_types::{AnalysisConfig, TokenMode};

const RUNS: usize = 5;

/// What one timed run observed.
#[derive(Debug, Clone, Copy, Default)]
struct Sample {
    elapsed: Duration,
    tokens: usize,
    kept: Option<usize>,
    types: Option<usize>,
}

fn main() -> std::io::Result<()> {
    let mut args = env::args().skip(1);

    let Some(path) = args.next() else {
        eprintln!("Usage: corpus_bench <path> [word|alpha] [stopwords]");
        std::process::exit(1);
    };

    let mode: TokenMode = match args.next() {
        Some(name) => match name.parse() {
            Ok(mode) => mode,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
        None => TokenMode::WordChars,
    };
    let stopwords = args.next().map(|s| StopwordSet::parse(&s)).unwrap_or_default();

    let input = fs::read_to_string(&path)?;
    println!(
        "corpus: {:.1} MiB, mode {}, {} stopwords",
        mib(input.len()),
        mode,
        stopwords.len()
    );
    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>10} {:>11}",
        "stage", "median ms", "MiB/s", "Mtok/s", "types", "stopword %"
    );

    let tokenizer = Tokenizer::new(mode);
    report("tokenize", input.len(), median(|| {
        let start = Instant::now();
        let mut tokens = 0usize;
        tokenizer.tokenize(&input, |_| tokens += 1);
        Sample {
            elapsed: start.elapsed(),
            tokens: std::hint::black_box(tokens),
            ..Sample::default()
        }
    }));

    let counter = Analyzer::new(AnalysisConfig {
        mode,
        ..AnalysisConfig::default()
    });
    report("count", input.len(), median(|| {
        let start = Instant::now();
        let (table, raw) = counter.count(&input, &stopwords);
        let elapsed = start.elapsed();
        Sample {
            elapsed,
            tokens: raw,
            kept: Some(table.total()),
            types: Some(std::hint::black_box(table).len()),
        }
    }));

    let analyzer = Analyzer::new(AnalysisConfig {
        mode,
        ..AnalysisConfig::lexical_diversity()
    });
    report("analyze", input.len(), median(|| {
        let start = Instant::now();
        let analysis = analyzer.analyze(&input, &stopwords);
        let elapsed = start.elapsed();
        match std::hint::black_box(analysis) {
            Analysis::Report(r) => Sample {
                elapsed,
                tokens: r.raw_tokens,
                kept: Some(r.filtered_tokens),
                types: Some(r.summary.types),
            },
            Analysis::NoTokens(_) => Sample {
                elapsed,
                ..Sample::default()
            },
        }
    }));

    Ok(())
}

/// One untimed warmup, then the run with the median elapsed time.
fn median<F: FnMut() -> Sample>(mut run: F) -> Sample {
    run();
    let mut samples: Vec<Sample> = (0..RUNS).map(|_| run()).collect();
    samples.sort_unstable_by_key(|s| s.elapsed);
    samples[RUNS / 2]
}

fn report(stage: &str, bytes: usize, s: Sample) {
    let secs = s.elapsed.as_secs_f64().max(f64::EPSILON);
    let types = s.types.map_or_else(|| "-".to_owned(), group_digits);
    let dropped = match s.kept {
        Some(kept) if s.tokens > 0 => {
            format!("{:.1}", 100.0 * (s.tokens - kept) as f64 / s.tokens as f64)
        }
        _ => "-".to_owned(),
    };

    println!(
        "{:<10} {:>10.1} {:>10.1} {:>10.1} {:>10} {:>11}",
        stage,
        secs * 1e3,
        mib(bytes) / secs,
        s.tokens as f64 / secs / 1e6,
        types,
        dropped
    );
}

fn mib(bytes: usize) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

fn group_digits(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }
    out
}
