//! # guesswork - password strength estimation
//!
//! This library estimates how many guesses a realistic attacker would need
//! to crack a password. Unlike naive entropy meters, it searches the
//! password for the structure attackers actually exploit - dictionary
//! words (straight, reversed, or with l33t substitutions), keyboard walks,
//! dates, repeats, and sequences - then finds the decomposition with the
//! fewest total guesses and scores it on a 0-4 scale with actionable
//! feedback.
//!
//! ## Background
//!
//! Attackers don't enumerate the full character space. They run ranked
//! wordlists with cheap mangling rules, so "Tr0ub4dour&3" falls orders of
//! magnitude faster than its charset entropy suggests. The guess model
//! here assigns each matched pattern the size of the search space an
//! attacker would cover before reaching it, and a dynamic-programming
//! search picks the weakest explanation of the whole password.
//!
//! ## Usage
//!
//! ```
//! let result = guesswork::estimate("Tr0ub4dour&3").unwrap();
//! println!("score {}/4, ~10^{:.1} guesses", result.score, result.guesses_log10);
//! ```

pub mod data;
pub mod date;
pub mod dictionary;
pub mod feedback;
pub mod guesses;
pub mod instance;
pub mod l33t;
pub mod matching;
pub mod regexes;
pub mod repeat;
pub mod scoring;
pub mod sequence;
pub mod spatial;
pub mod times;
mod types;

pub use data::{
    load_adjacency_graphs, load_dictionaries, AdjacencyGraph, AdjacencyGraphs, RankedDict,
    RankedDictionaries,
};
pub use feedback::Translate;
pub use instance::Estimator;
pub use matching::MatchContext;
pub use scoring::guesses_to_score;
pub use types::{
    CrackTimesDisplay, CrackTimesSeconds, Estimate, Feedback, Match, MatchKind,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default cap on evaluated password length, in characters
pub const DEFAULT_MAX_LENGTH: usize = 72;

/// Error types
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("input is not valid UTF-8")]
        InvalidInput,

        #[error("password length {length} exceeds maximum of {max_length}")]
        LengthExceeded { length: usize, max_length: usize },

        #[error("reference data unavailable: {0}")]
        ReferenceData(&'static str),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

pub use error::Error;

/// Options for password evaluation.
#[derive(Debug, Clone)]
pub struct EstimateOptions {
    /// Host-supplied context strings (names, emails, company); rank is
    /// insertion order, first = most likely
    pub user_inputs: Vec<String>,
    /// Passwords longer than this are truncated (or rejected, see
    /// `truncate`)
    pub max_length: usize,
    /// When false, over-length passwords yield `Error::LengthExceeded`
    /// instead of being truncated
    pub truncate: bool,
    /// Message-id to localized-string lookup for feedback text
    pub translator: Translate,
}

impl Default for EstimateOptions {
    fn default() -> Self {
        EstimateOptions {
            user_inputs: Vec::new(),
            max_length: DEFAULT_MAX_LENGTH,
            truncate: true,
            translator: feedback::identity,
        }
    }
}

impl EstimateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_inputs<I, S>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_inputs = inputs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_truncation(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    pub fn with_translator(mut self, translator: Translate) -> Self {
        self.translator = translator;
        self
    }
}

/// Estimate the strength of a password with default options.
///
/// This is the main entry point. See [`estimate_with_options`] for
/// user-input context, translator injection, and truncation control.
pub fn estimate(password: &str) -> error::Result<Estimate> {
    estimate_with_options(password, &EstimateOptions::default())
}

/// Estimate the strength of a password.
///
/// The evaluator is a pure function of the password, the options, and the
/// frozen reference data: identical inputs produce identical results
/// (excluding `calc_time`). Passwords longer than `opts.max_length`
/// characters are truncated first unless truncation is disabled.
pub fn estimate_with_options(
    password: &str,
    opts: &EstimateOptions,
) -> error::Result<Estimate> {
    let start = std::time::Instant::now();

    let char_len = password.chars().count();
    let password: String = if char_len > opts.max_length {
        if !opts.truncate {
            return Err(Error::LengthExceeded {
                length: char_len,
                max_length: opts.max_length,
            });
        }
        password.chars().take(opts.max_length).collect()
    } else {
        password.to_string()
    };

    let ctx = MatchContext::new(&opts.user_inputs)?;
    let matches = matching::omnimatch(&password, &ctx);
    let scored = scoring::most_guessable_match_sequence(&password, matches, &ctx);
    let score = guesses_to_score(scored.guesses);
    tracing::info!(
        "Estimated {}-char password: 10^{:.1} guesses, score {}/4, {} chunks",
        password.chars().count(),
        scored.guesses_log10,
        score,
        scored.sequence.len()
    );
    let (crack_times_seconds, crack_times_display) =
        times::estimate_attack_times(scored.guesses);
    let feedback = feedback::get_feedback(score, &scored.sequence, opts.translator);

    Ok(Estimate {
        password,
        guesses: scored.guesses,
        guesses_log10: scored.guesses_log10,
        score,
        sequence: scored.sequence,
        crack_times_seconds,
        crack_times_display,
        feedback,
        calc_time: start.elapsed(),
    })
}
