//! fuzzrank - fuzzy match a query against candidates read line by line
//!
//! Usage:
//!     fuzzrank "new york" --choices cities.txt --limit 3
//!     cat names.txt | fuzzrank "jon smith" --scorer token_sort --one
//!
//! Each match is printed as one JSON object per line on stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fuzzrank::config::FuzzrankConfig;
use fuzzrank::MatchResult;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "fuzzrank")]
#[command(about = "Rank candidate strings by similarity to a query")]
#[command(version)]
struct Args {
    /// Text to match
    query: String,

    /// File with one candidate per line (default: stdin)
    #[arg(short, long)]
    choices: Option<PathBuf>,

    /// Number of matches to print; zero or negative prints nothing
    #[arg(short, long, allow_negative_numbers = true)]
    limit: Option<i64>,

    /// Scorer: ratio, partial, token_sort, token_set, weighted
    #[arg(short, long)]
    scorer: Option<String>,

    /// Print only the best match
    #[arg(long)]
    one: bool,

    /// Compare inputs as given, without trim + lowercase
    #[arg(long)]
    no_process: bool,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn read_choices(path: Option<&PathBuf>) -> io::Result<Vec<String>> {
    let reader: Box<dyn BufRead> = match path {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    reader.lines().collect()
}

fn main() -> ExitCode {
    let args = Args::parse();
    fuzzrank::tracing::init_with_filter(&args.log_level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fuzzrank: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = FuzzrankConfig::load(args.config.as_deref())?;
    if let Some(scorer) = &args.scorer {
        config.scorer = scorer.parse()?;
    }
    if args.no_process {
        config.process = false;
    }

    let limit = match args.limit {
        Some(limit) if limit <= 0 => {
            debug!(limit, "non-positive limit, nothing to do");
            return Ok(());
        }
        Some(limit) => usize::try_from(limit)?,
        None => config.limit,
    };

    let scorer = config.builder().build()?;
    let choices = read_choices(args.choices.as_ref())?;
    info!(
        candidates = choices.len(),
        scorer = %scorer.kind(),
        limit,
        one = args.one,
        "matching"
    );

    let matches: Vec<MatchResult> = if args.one {
        scorer
            .extract_one(&args.query, &choices)?
            .into_iter()
            .collect()
    } else {
        scorer.extract(&args.query, &choices, limit)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for m in &matches {
        writeln!(out, "{}", serde_json::to_string(m)?)?;
    }

    if let Some(stats) = scorer.stats() {
        debug!(calls = stats.calls, "scoring done");
    }
    Ok(())
}
