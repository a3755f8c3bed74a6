//! Core types for password analysis.
//!
//! This module defines the fundamental data structures produced by the
//! matchers, the search, and the estimator.

use serde::Serialize;
use std::collections::BTreeMap;

/// A weakness pattern explaining one span of the password.
///
/// Each variant carries the pattern-specific detail the estimator needs to
/// assign a guess count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum MatchKind {
    /// Token found in a ranked dictionary, possibly reversed or de-l33ted
    Dictionary {
        dictionary_name: &'static str,
        matched_word: String,
        rank: usize,
        reversed: bool,
        l33t: bool,
        /// Active substitutions restricted to characters in the token
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        sub: BTreeMap<char, char>,
        #[serde(skip_serializing_if = "Option::is_none")]
        sub_display: Option<String>,
    },
    /// Run of physically adjacent keys on one keyboard layout
    Spatial {
        graph: &'static str,
        turns: usize,
        shifted_count: usize,
    },
    /// A base token repeated two or more times
    Repeat {
        base_token: String,
        base_guesses: f64,
        repeat_count: usize,
    },
    /// Arithmetic progression in code-point space
    Sequence {
        sequence_name: &'static str,
        sequence_space: u32,
        ascending: bool,
    },
    /// Hit from the fixed regex catalog (currently recent_year)
    Regex { regex_name: &'static str },
    /// Calendar date, with or without a separator
    Date {
        #[serde(skip_serializing_if = "Option::is_none")]
        separator: Option<char>,
        year: i32,
        month: i32,
        day: i32,
    },
    /// Gap filler: every character guessed independently
    Bruteforce,
}

impl MatchKind {
    /// Get the pattern discriminant as a string
    pub fn pattern_name(&self) -> &'static str {
        match self {
            MatchKind::Dictionary { .. } => "dictionary",
            MatchKind::Spatial { .. } => "spatial",
            MatchKind::Repeat { .. } => "repeat",
            MatchKind::Sequence { .. } => "sequence",
            MatchKind::Regex { .. } => "regex",
            MatchKind::Date { .. } => "date",
            MatchKind::Bruteforce => "bruteforce",
        }
    }
}

/// One matched interval `[i, j]` of the password.
///
/// `token` always equals the password characters at `i..=j`. The `guesses`
/// fields are filled in by the estimator during the search; matches fresh
/// out of a matcher carry `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub i: usize,
    pub j: usize,
    pub token: String,
    #[serde(flatten)]
    pub kind: MatchKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guesses: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guesses_log10: Option<f64>,
}

impl Match {
    pub fn new(i: usize, j: usize, token: String, kind: MatchKind) -> Self {
        Match {
            i,
            j,
            token,
            kind,
            guesses: None,
            guesses_log10: None,
        }
    }

    /// Token length in characters (not bytes)
    pub fn token_len(&self) -> usize {
        self.token.chars().count()
    }
}

/// Estimated seconds to crack under four fixed attacker profiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CrackTimesSeconds {
    pub online_throttling_100_per_hour: f64,
    pub online_no_throttling_10_per_second: f64,
    pub offline_slow_hashing_1e4_per_second: f64,
    pub offline_fast_hashing_1e10_per_second: f64,
}

/// Humanized counterparts of [`CrackTimesSeconds`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrackTimesDisplay {
    pub online_throttling_100_per_hour: String,
    pub online_no_throttling_10_per_second: String,
    pub offline_slow_hashing_1e4_per_second: String,
    pub offline_fast_hashing_1e10_per_second: String,
}

/// Actionable feedback for weak passwords.
///
/// `warning` is empty when no single warning applies. Both fields are empty
/// for passwords scoring 3 or better.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Feedback {
    pub warning: String,
    pub suggestions: Vec<String>,
}

/// The full result of one password evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate {
    /// The evaluated password (after any truncation)
    pub password: String,
    /// Estimated guesses an optimal attacker needs
    pub guesses: f64,
    pub guesses_log10: f64,
    /// Strength score in 0..=4
    pub score: u8,
    /// The optimal tiling of the password by matches
    pub sequence: Vec<Match>,
    pub crack_times_seconds: CrackTimesSeconds,
    pub crack_times_display: CrackTimesDisplay,
    pub feedback: Feedback,
    /// Wall-clock evaluation time; excluded from serialization and from
    /// the determinism contract
    #[serde(skip)]
    pub calc_time: std::time::Duration,
}
