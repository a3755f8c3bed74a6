//! guesswork - password strength estimation CLI
//!
//! Evaluate passwords against the same patterns attackers try first:
//! wordlists, keyboard walks, dates, repeats, and sequences.

use anyhow::Result;
use clap::Parser;
use guesswork::{estimate_with_options, Error, Estimate, EstimateOptions, MatchKind};
use std::io::{self, BufRead, IsTerminal};

#[derive(Parser, Debug)]
#[command(name = "guesswork")]
#[command(
    author,
    version,
    about = "Password strength estimation through pattern matching"
)]
#[command(long_about = "
guesswork estimates how many guesses a realistic attacker needs to crack
a password, by tiling it with dictionary words, keyboard walks, dates,
repeats, and sequences, and scoring the weakest decomposition.

EXAMPLES:
    guesswork 'Tr0ub4dour&3'             # evaluate one password
    guesswork -u alice -u acme 'alice99' # with user context
    guesswork --json 'correct horse'     # JSON output for tooling
    cat candidates.txt | guesswork       # one password per line
")]
struct Cli {
    /// Password to evaluate; reads stdin line by line when omitted
    password: Option<String>,

    /// User-specific context (name, email, company); repeatable
    #[arg(short = 'u', long = "user-input")]
    user_inputs: Vec<String>,

    /// Maximum password length evaluated; longer input is truncated
    #[arg(long, default_value = "72")]
    max_length: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Minimal output: score and guesses_log10 only
    #[arg(long)]
    simple: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

// ANSI color codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const GREEN: &str = "\x1b[32m";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let opts = EstimateOptions::new()
        .with_user_inputs(cli.user_inputs.iter().cloned())
        .with_max_length(cli.max_length);

    let use_color = !cli.no_color && !cli.json && io::stdout().is_terminal();

    match &cli.password {
        Some(password) => {
            let result = estimate_with_options(password, &opts)?;
            print_result(&cli, &result, use_color)?;
        }
        None => {
            let stdin = io::stdin();
            let mut raw = Vec::new();
            let mut handle = stdin.lock();
            loop {
                raw.clear();
                let n = handle.read_until(b'\n', &mut raw)?;
                if n == 0 {
                    break;
                }
                let line = std::str::from_utf8(&raw)
                    .map_err(|_| Error::InvalidInput)?
                    .trim_end_matches(['\r', '\n']);
                let result = estimate_with_options(line, &opts)?;
                print_result(&cli, &result, use_color)?;
            }
        }
    }

    Ok(())
}

fn print_result(cli: &Cli, result: &Estimate, use_color: bool) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else if cli.simple {
        println!("{}\t{:.4}", result.score, result.guesses_log10);
    } else {
        print_report(result, use_color);
    }
    Ok(())
}

fn score_color(score: u8) -> &'static str {
    match score {
        0 | 1 => RED,
        2 => YELLOW,
        _ => GREEN,
    }
}

fn print_report(result: &Estimate, use_color: bool) {
    let (bold, dim, reset) = if use_color {
        (BOLD, DIM, RESET)
    } else {
        ("", "", "")
    };
    let color = if use_color {
        score_color(result.score)
    } else {
        ""
    };

    println!(
        "{}{}{}{} · score {}{}/4{} · ~10^{:.1} guesses · {:?}",
        bold,
        result.password,
        reset,
        dim,
        color,
        result.score,
        reset,
        result.guesses_log10,
        result.calc_time,
    );

    println!("{}── crack times ──{}", dim, reset);
    let times = &result.crack_times_display;
    println!("  online, throttled (100/h):   {}", times.online_throttling_100_per_hour);
    println!("  online, unthrottled (10/s):  {}", times.online_no_throttling_10_per_second);
    println!("  offline, slow hash (1e4/s):  {}", times.offline_slow_hashing_1e4_per_second);
    println!("  offline, fast hash (1e10/s): {}", times.offline_fast_hashing_1e10_per_second);

    if !result.sequence.is_empty() {
        println!("{}── matches ──{}", dim, reset);
        for m in &result.sequence {
            let detail = match &m.kind {
                MatchKind::Dictionary {
                    dictionary_name,
                    rank,
                    reversed,
                    l33t,
                    ..
                } => {
                    let mut parts = format!("{} rank {}", dictionary_name, rank);
                    if *reversed {
                        parts.push_str(", reversed");
                    }
                    if *l33t {
                        parts.push_str(", l33t");
                    }
                    parts
                }
                MatchKind::Spatial { graph, turns, .. } => {
                    format!("{}, {} turn(s)", graph, turns)
                }
                MatchKind::Repeat {
                    base_token,
                    repeat_count,
                    ..
                } => format!("'{}' x{}", base_token, repeat_count),
                MatchKind::Sequence { sequence_name, .. } => sequence_name.to_string(),
                MatchKind::Regex { regex_name } => regex_name.to_string(),
                MatchKind::Date {
                    year, month, day, ..
                } => format!("{}-{}-{}", year, month, day),
                MatchKind::Bruteforce => String::new(),
            };
            println!(
                "  {:<12} {:<11} {:<22} ~10^{:.1}",
                format!("'{}'", m.token),
                m.kind.pattern_name(),
                detail,
                m.guesses_log10.unwrap_or(0.0),
            );
        }
    }

    if !result.feedback.warning.is_empty() || !result.feedback.suggestions.is_empty() {
        println!("{}── feedback ──{}", dim, reset);
        if !result.feedback.warning.is_empty() {
            println!("  {}{}{}", color, result.feedback.warning, reset);
        }
        for suggestion in &result.feedback.suggestions {
            println!("  {}", suggestion);
        }
    }
}
