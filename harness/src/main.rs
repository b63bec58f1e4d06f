use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use harness::{load_bytes, validate, write_report};
use matchers::{
    Automaton, Kmp, PatternSearch, Positions, RabinKarp, RkConfig, RkParams, SearchError,
};

#[derive(Debug, Clone, clap::ValueEnum)]
enum Algorithm {
    Automaton,
    Kmp,
    RabinKarp,
    Validate,
}

/// Example:
/// cargo run --release -- -t data/mobydick.txt --pattern "the" -a validate
/// cargo run --release -- -t data/mobydick.txt --pattern "the" -a kmp --measure-time
#[derive(Debug, clap::Parser)]
#[command(
    name = "stringsearch",
    about = "Run exact substring matchers on one pattern and one or more texts, or cross-validate all three"
)]
struct Cli {
    #[arg(short, long, value_enum, default_value = "validate")]
    algo: Algorithm,

    #[arg(short = 't', long = "text", value_name = "TEXT", required = true)]
    texts: Vec<PathBuf>,

    #[arg(
        long,
        conflicts_with = "pattern_file",
        required_unless_present = "pattern_file"
    )]
    pattern: Option<String>,

    #[arg(
        long = "pattern-file",
        value_name = "PATTERN_FILE",
        conflicts_with = "pattern",
        required_unless_present = "pattern"
    )]
    pattern_file: Option<PathBuf>,

    /// Rabin-Karp hash base
    #[arg(long = "rk-base", default_value_t = 33)]
    rk_base: u64,

    /// Rabin-Karp hash modulus
    #[arg(long = "rk-modulus", default_value_t = 1_000_000_007)]
    rk_modulus: u64,

    /// Optional output file; if omitted, results are written to stdout
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Measure and print execution time for the search algorithm
    #[arg(long)]
    measure_time: bool,

    /// In validate mode, also print the agreed match offsets
    #[arg(long)]
    print_positions: bool,
}

/// Per-pattern state built once and reused across every `-t` text.
enum Matcher {
    Automaton(<Automaton as PatternSearch>::State),
    Kmp(<Kmp as PatternSearch>::State),
    RabinKarp(<RabinKarp as PatternSearch>::State),
}

impl Matcher {
    fn build(
        algo: &Algorithm,
        pattern: &[u8],
        params: RkParams,
    ) -> Result<Option<Self>, SearchError> {
        Ok(Some(match algo {
            Algorithm::Automaton => Matcher::Automaton(Automaton::build(pattern.to_vec())?),
            Algorithm::Kmp => Matcher::Kmp(Kmp::build(pattern.to_vec())?),
            Algorithm::RabinKarp => Matcher::RabinKarp(RabinKarp::build(RkConfig {
                pattern: pattern.to_vec(),
                params,
            })?),
            Algorithm::Validate => return Ok(None),
        }))
    }

    fn find_all(&self, text: &[u8]) -> Result<Positions, SearchError> {
        match self {
            Matcher::Automaton(state) => Automaton::find_all_bytes(state, text),
            Matcher::Kmp(state) => Kmp::find_all_bytes(state, text),
            Matcher::RabinKarp(state) => RabinKarp::find_all_bytes(state, text),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let pattern = load_pattern(&cli)?;
    if pattern.is_empty() {
        return Err("Pattern must not be empty".into());
    }

    let params = RkParams {
        base: cli.rk_base,
        modulus: cli.rk_modulus,
    };

    let matcher = Matcher::build(&cli.algo, &pattern, params)?;

    let mut out: Box<dyn Write> = match cli.output {
        Some(ref path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    writeln!(
        out,
        "# algorithm={:?}, pattern-length={}",
        cli.algo,
        pattern.len()
    )?;

    for text_path in cli.texts.iter() {
        let text = load_bytes(text_path)?;
        writeln!(out, "text={:?}", text_path)?;

        match matcher {
            Some(ref matcher) => run_single(&cli, &mut out, matcher, &text)?,
            None => run_validation(&cli, &mut out, &text, &pattern, params)?,
        }

        writeln!(out)?;
    }

    Ok(())
}

fn run_single(
    cli: &Cli,
    out: &mut dyn Write,
    matcher: &Matcher,
    text: &[u8],
) -> Result<(), Box<dyn std::error::Error>> {
    let start = cli.measure_time.then(Instant::now);
    let positions = matcher.find_all(text)?;
    let duration = start.map(|s| s.elapsed());

    if let Some(d) = duration {
        writeln!(out, "execution_time: {}ns", d.as_nanos())?;
    }

    writeln!(out, "matches: {:?}", positions.as_slice())?;

    Ok(())
}

fn run_validation(
    cli: &Cli,
    out: &mut dyn Write,
    text: &[u8],
    pattern: &[u8],
    params: RkParams,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = validate(text, pattern, params)?;
    write_report(out, &report, cli.print_positions)?;
    Ok(())
}

fn load_pattern(cli: &Cli) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if let Some(ref pat) = cli.pattern {
        Ok(pat.clone().into_bytes())
    } else if let Some(ref path) = cli.pattern_file {
        Ok(load_bytes(path)?)
    } else {
        Err("Either --pattern or --pattern-file must be provided".into())
    }
}
