//! Sequence matcher: arithmetic progressions in code-point space.

use crate::types::{Match, MatchKind};

/// Largest code-point step still considered a sequence.
const MAX_DELTA: i32 = 5;

/// Find maximal runs with a constant code-point delta.
///
/// Runs of three or more characters match for any delta up to
/// [`MAX_DELTA`]; two-character runs match only for |delta| = 1
/// ("ab", "21").
pub fn sequence_match(password: &str) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let n = chars.len();
    if n <= 1 {
        return Vec::new();
    }

    let mut matches = Vec::new();
    let mut i = 0usize;
    let mut last_delta: Option<i32> = None;

    for k in 1..n {
        let delta = chars[k] as i32 - chars[k - 1] as i32;
        if last_delta.is_none() {
            last_delta = Some(delta);
        }
        if last_delta == Some(delta) {
            continue;
        }
        let j = k - 1;
        update(&chars, i, j, last_delta.unwrap_or(0), &mut matches);
        i = j;
        last_delta = Some(delta);
    }
    update(&chars, i, n - 1, last_delta.unwrap_or(0), &mut matches);
    matches
}

fn update(chars: &[char], i: usize, j: usize, delta: i32, out: &mut Vec<Match>) {
    if !(j - i > 1 || delta.abs() == 1) {
        return;
    }
    if delta == 0 || delta.abs() > MAX_DELTA {
        return;
    }
    let token: String = chars[i..=j].iter().collect();
    let (sequence_name, sequence_space) = classify(&token);
    out.push(Match::new(
        i,
        j,
        token,
        MatchKind::Sequence {
            sequence_name,
            sequence_space,
            ascending: delta > 0,
        },
    ));
}

fn classify(token: &str) -> (&'static str, u32) {
    if token.chars().all(|c| c.is_ascii_lowercase()) {
        ("lower", 26)
    } else if token.chars().all(|c| c.is_ascii_uppercase()) {
        ("upper", 26)
    } else if token.chars().all(|c| c.is_ascii_digit()) {
        ("digits", 10)
    } else {
        // conservative default for anything else
        ("unicode", 26)
    }
}
