//! Per-class guess estimation.
//!
//! Each match class gets a guess count from its own combinatorics: the
//! size of the search space an attacker covers before reaching the token.
//! All arithmetic is f64; overflow saturates rather than wrapping, so a
//! pathological product still scores as "very strong" instead of
//! panicking.

use crate::matching::MatchContext;
use crate::types::{Match, MatchKind};

pub const BRUTEFORCE_CARDINALITY: f64 = 10.0;
pub const MIN_GUESSES_BEFORE_GROWING_SEQUENCE: f64 = 10_000.0;
pub const MIN_SUBMATCH_GUESSES_SINGLE_CHAR: f64 = 10.0;
pub const MIN_SUBMATCH_GUESSES_MULTI_CHAR: f64 = 50.0;
pub const MIN_YEAR_SPACE: i32 = 20;
pub const REFERENCE_YEAR: i32 = 2000;

/// Estimate guesses for one match and memoize the result on it.
///
/// The submatch floors apply only when the token is a proper substring of
/// the password; a match covering the whole password keeps its raw
/// estimate.
pub fn estimate_guesses(m: &mut Match, password_len: usize, ctx: &MatchContext) -> f64 {
    if let Some(g) = m.guesses {
        return g;
    }
    let token_len = m.token_len();
    let min_guesses = if token_len < password_len {
        if token_len == 1 {
            MIN_SUBMATCH_GUESSES_SINGLE_CHAR
        } else {
            MIN_SUBMATCH_GUESSES_MULTI_CHAR
        }
    } else {
        1.0
    };
    let raw = match &m.kind {
        MatchKind::Dictionary { .. } => dictionary_guesses(m),
        MatchKind::Spatial { .. } => spatial_guesses(m, ctx),
        MatchKind::Repeat {
            base_guesses,
            repeat_count,
            ..
        } => base_guesses * *repeat_count as f64,
        MatchKind::Sequence { .. } => sequence_guesses(m),
        MatchKind::Regex { .. } => regex_guesses(m),
        MatchKind::Date { .. } => date_guesses(m),
        MatchKind::Bruteforce => bruteforce_guesses(m),
    };
    let mut guesses = raw.max(min_guesses);
    if !guesses.is_finite() {
        guesses = f64::MAX;
    }
    m.guesses = Some(guesses);
    m.guesses_log10 = Some(guesses.log10());
    guesses
}

fn bruteforce_guesses(m: &Match) -> f64 {
    let len = m.token_len();
    let mut guesses = BRUTEFORCE_CARDINALITY.powi(len as i32);
    if !guesses.is_finite() {
        guesses = f64::MAX;
    }
    // +1 so dedicated matchers win ties against a bruteforce fill
    let min_guesses = if len == 1 {
        MIN_SUBMATCH_GUESSES_SINGLE_CHAR + 1.0
    } else {
        MIN_SUBMATCH_GUESSES_MULTI_CHAR + 1.0
    };
    guesses.max(min_guesses)
}

fn dictionary_guesses(m: &Match) -> f64 {
    let MatchKind::Dictionary {
        rank,
        reversed,
        l33t,
        sub,
        ..
    } = &m.kind
    else {
        return 1.0;
    };
    let base_guesses = *rank as f64;
    let uppercase = uppercase_variations(&m.token);
    let l33t_vars = if *l33t {
        l33t_variations(&m.token, sub)
    } else {
        1.0
    };
    let reversed_vars = if *reversed { 2.0 } else { 1.0 };
    base_guesses * uppercase * l33t_vars * reversed_vars
}

/// Count case patterns an attacker would try before this capitalization.
pub(crate) fn uppercase_variations(token: &str) -> f64 {
    if token.chars().all(|c| !c.is_ascii_uppercase()) || token.to_lowercase() == token {
        return 1.0;
    }
    // a capitalized first letter, a capitalized last letter, and all-caps
    // are each one extra variant
    if starts_upper(token) || ends_upper(token) || all_upper(token) {
        return 2.0;
    }
    let upper = token.chars().filter(|c| c.is_uppercase()).count();
    let lower = token.chars().filter(|c| c.is_lowercase()).count();
    let mut variations = 0.0;
    for i in 1..=upper.min(lower) {
        variations += n_ck(upper + lower, i);
    }
    variations
}

/// Count substitution patterns an attacker would try before this one.
pub(crate) fn l33t_variations(
    token: &str,
    sub: &std::collections::BTreeMap<char, char>,
) -> f64 {
    let lower = token.to_lowercase();
    let mut variations = 1.0;
    for (&subbed, &unsubbed) in sub {
        let s = lower.chars().filter(|&c| c == subbed).count();
        let u = lower.chars().filter(|&c| c == unsubbed).count();
        if s == 0 || u == 0 {
            variations *= 2.0;
        } else {
            let mut possibilities = 0.0;
            for i in 1..=s.min(u) {
                possibilities += n_ck(s + u, i);
            }
            variations *= possibilities;
        }
    }
    variations
}

fn spatial_guesses(m: &Match, ctx: &MatchContext) -> f64 {
    let MatchKind::Spatial {
        graph,
        turns,
        shifted_count,
    } = &m.kind
    else {
        return 1.0;
    };
    let (starts, degree) = match ctx.graphs().by_name(graph) {
        Some(g) => (g.key_count() as f64, g.average_degree()),
        None => return 1.0,
    };
    let length = m.token_len();
    let turns = *turns;
    let mut guesses = 0.0;

    // sum over run lengths and turn counts an attacker would cover first
    for i in 2..=length {
        let possible_turns = turns.min(i - 1);
        for j in 1..=possible_turns {
            guesses += n_ck(i - 1, j - 1) * starts * degree.powi(j as i32);
        }
    }

    if *shifted_count > 0 {
        let shifted = *shifted_count;
        let unshifted = length - shifted;
        if unshifted == 0 {
            guesses *= 2.0;
        } else {
            let mut variations = 0.0;
            for i in 1..=shifted.min(unshifted) {
                variations += n_ck(shifted + unshifted, i);
            }
            guesses *= variations;
        }
    }
    guesses
}

fn sequence_guesses(m: &Match) -> f64 {
    let MatchKind::Sequence { ascending, .. } = &m.kind else {
        return 1.0;
    };
    let first = m.token.chars().next();
    let mut base = match first {
        // obvious starting points
        Some('a' | 'A' | 'z' | 'Z' | '0' | '1' | '9') => 4.0,
        Some(c) if c.is_ascii_digit() => 10.0,
        _ => 26.0,
    };
    if !*ascending {
        base *= 2.0;
    }
    base * m.token_len() as f64
}

fn regex_guesses(m: &Match) -> f64 {
    let MatchKind::Regex { regex_name } = &m.kind else {
        return 1.0;
    };
    match *regex_name {
        "recent_year" => {
            let year = m.token.parse::<i32>().unwrap_or(REFERENCE_YEAR);
            let year_space = (year - REFERENCE_YEAR).abs().max(MIN_YEAR_SPACE);
            year_space as f64
        }
        _ => 1.0,
    }
}

fn date_guesses(m: &Match) -> f64 {
    let MatchKind::Date {
        separator, year, ..
    } = &m.kind
    else {
        return 1.0;
    };
    let year_space = (year - REFERENCE_YEAR).abs().max(MIN_YEAR_SPACE) as f64;
    let mut guesses = year_space * 365.0;
    if separator.is_some() {
        guesses *= 4.0;
    }
    guesses
}

fn starts_upper(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest: Vec<char> = chars.collect();
    first.is_ascii_uppercase()
        && !rest.is_empty()
        && rest.iter().all(|c| !c.is_ascii_uppercase())
}

fn ends_upper(token: &str) -> bool {
    let chars: Vec<char> = token.chars().collect();
    let Some((&last, head)) = chars.split_last() else {
        return false;
    };
    last.is_ascii_uppercase()
        && !head.is_empty()
        && head.iter().all(|c| !c.is_ascii_uppercase())
}

fn all_upper(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| !c.is_ascii_lowercase())
}

/// Binomial coefficient, computed in floating point.
pub(crate) fn n_ck(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    if k == 0 {
        return 1.0;
    }
    let mut result = 1.0;
    let mut n = n as f64;
    for d in 1..=k {
        result *= n;
        result /= d as f64;
        n -= 1.0;
    }
    result
}

/// `l!` as a float; saturates instead of overflowing.
pub(crate) fn factorial(l: usize) -> f64 {
    let mut result = 1.0f64;
    for i in 2..=l {
        result *= i as f64;
        if !result.is_finite() {
            return f64::MAX;
        }
    }
    result
}
