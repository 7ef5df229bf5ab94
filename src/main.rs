use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueEnum};
use log::{LevelFilter, debug};
use std::path::PathBuf;
use std::time::Duration;

mod error;
mod fingerprint;
mod search;
mod verify;
mod wordlist;

use error::SolveError;
use search::{Encoding, ParallelConfig, SearchConfig, solve};
use verify::{ControlDigests, DEFAULT_CONTROL_DIGESTS, DigestAlgorithm};

/// Phrase the default control digests were computed from an anagram of
const DEFAULT_PHRASE: &str = "poultry outwits ants";

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "anagram-hunter")]
#[command(about = "Find the word combination anagramming a phrase whose digest is known")]
#[command(version)]
struct Args {
    /// Word list, one word per line
    wordlist: PathBuf,
    /// Number of words in the phrase
    max_len: usize,

    /// Phrase to find anagrams of
    #[arg(long, default_value = DEFAULT_PHRASE)]
    phrase: String,
    /// Control digest in hex (repeatable; defaults to the built-in set)
    #[arg(long = "digest")]
    digests: Vec<String>,
    /// Hash function the control digests were made with
    #[arg(long, value_enum, default_value = "md5")]
    algorithm: CliAlgorithm,
    /// Letter-multiset encoding used by the search
    #[arg(long, value_enum, default_value = "primes")]
    encoding: CliEncoding,

    // --- Parallel options ---
    /// Number of search worker threads (defaults to the number of CPUs)
    #[arg(long, short = 'j')]
    search_workers: Option<usize>,
    /// Number of verification worker threads
    #[arg(long, default_value = "1")]
    verify_workers: usize,
    /// Bound the verification queue to this many pending combinations
    #[arg(long)]
    queue_capacity: Option<usize>,

    // --- Run control ---
    /// Give up after this many seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Keep searching after a solution has been found
    #[arg(long)]
    exhaustive: bool,
    /// Search words in file order instead of likelihood order
    #[arg(long)]
    no_order: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short, action = ArgAction::Count)]
    verbose: u8,
}

/// CLI digest algorithm selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliAlgorithm {
    Md5,
    Sha256,
}

impl From<CliAlgorithm> for DigestAlgorithm {
    fn from(cli: CliAlgorithm) -> Self {
        match cli {
            CliAlgorithm::Md5 => DigestAlgorithm::Md5,
            CliAlgorithm::Sha256 => DigestAlgorithm::Sha256,
        }
    }
}

/// CLI encoding selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliEncoding {
    /// Product of per-letter primes
    Primes,
    /// Per-letter occurrence counts
    Counts,
}

impl From<CliEncoding> for Encoding {
    fn from(cli: CliEncoding) -> Self {
        match cli {
            CliEncoding::Primes => Encoding::Primes,
            CliEncoding::Counts => Encoding::Counts,
        }
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn control_digests(args: &Args) -> Result<ControlDigests, SolveError> {
    let algorithm = DigestAlgorithm::from(args.algorithm);
    if args.digests.is_empty() {
        if algorithm != DigestAlgorithm::Md5 {
            return Err(error::ConfigError::new(format!(
                "--digest is required with --algorithm {}",
                algorithm
            ))
            .into());
        }
        return Ok(ControlDigests::new(algorithm, DEFAULT_CONTROL_DIGESTS)?);
    }
    Ok(ControlDigests::new(algorithm, &args.digests)?)
}

fn parallel_config(args: &Args) -> Result<ParallelConfig, SolveError> {
    let mut config = ParallelConfig::default().with_verify_workers(args.verify_workers);
    if let Some(workers) = args.search_workers {
        config = config.with_search_workers(workers);
    }
    if let Some(capacity) = args.queue_capacity {
        config = config.with_queue_capacity(capacity);
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), SolveError> {
    let digests = control_digests(args)?;
    let parallel_config = parallel_config(args)?;
    debug!(
        "{} {} control digest(s) loaded",
        digests.len(),
        digests.algorithm()
    );

    let words = wordlist::read_wordlist(&args.wordlist)?;
    let words = wordlist::filter_words(&words, &args.phrase);
    let words = if args.no_order {
        words
    } else {
        wordlist::order_by_likelihood(words, &args.phrase)
    };
    debug!("{} candidate words after filtering", words.len());

    let mut search_config = SearchConfig::default()
        .with_max_len(args.max_len)
        .with_encoding(args.encoding.into());
    if let Some(secs) = args.timeout {
        search_config = search_config.with_timeout(Duration::from_secs(secs));
    }
    if args.exhaustive {
        search_config = search_config.exhaustive();
    }

    println!(
        "Searching {} candidates for {}-word anagrams of {:?}",
        words.len(),
        args.max_len,
        args.phrase
    );

    let result = solve(&words, &args.phrase, digests, &search_config, &parallel_config)?;

    for (worker_id, stats) in &result.worker_statistics {
        debug!(
            "search worker {}: {} frames expanded, {} pruned, {} emitted{}",
            worker_id,
            stats.frames_expanded,
            stats.branches_pruned,
            stats.combinations_emitted,
            if stats.interrupted { " (interrupted)" } else { "" }
        );
    }

    print!("{}", result.outcome);
    println!("\nSearch Statistics:");
    for line in result.outcome.statistics.format_summary().lines() {
        println!("  {}", line);
    }
    Ok(())
}

// --- Main Function ---
fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
