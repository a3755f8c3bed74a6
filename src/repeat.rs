//! Repeat matcher: maximal `base^k` runs with `k >= 2`.
//!
//! The base token's own guess count comes from running the full evaluator
//! on it, supplied here as an injected function to keep the recursion out
//! of this module.

use crate::types::{Match, MatchKind};

/// Find every maximal repeated run in the password.
pub fn repeat_match(password: &str, evaluate_base: &dyn Fn(&str) -> f64) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let n = chars.len();
    let mut matches = Vec::new();

    let mut i = 0;
    while i < n {
        let Some(total) = longest_repeat_at(&chars, i) else {
            i += 1;
            continue;
        };
        let run = &chars[i..i + total];
        let base_len = shortest_period(run);
        let base_token: String = run[..base_len].iter().collect();
        let base_guesses = evaluate_base(&base_token);
        tracing::debug!(
            "repeat scan: {}-char unit repeated {} times at position {}",
            base_len,
            total / base_len,
            i
        );
        matches.push(Match::new(
            i,
            i + total - 1,
            run.iter().collect(),
            MatchKind::Repeat {
                base_token,
                base_guesses,
                repeat_count: total / base_len,
            },
        ));
        i += total;
    }
    matches
}

/// Longest run starting at `start` made of a unit repeated at least twice.
///
/// Tries every unit length and greedily extends each; returns the longest
/// total extent, or `None` if nothing repeats here.
fn longest_repeat_at(chars: &[char], start: usize) -> Option<usize> {
    let remaining = chars.len() - start;
    let mut best: Option<usize> = None;
    for unit in 1..=remaining / 2 {
        let mut copies = 1;
        while start + (copies + 1) * unit <= chars.len()
            && chars[start..start + unit]
                == chars[start + copies * unit..start + (copies + 1) * unit]
        {
            copies += 1;
        }
        if copies >= 2 {
            let total = unit * copies;
            if best.is_none_or(|b| total > b) {
                best = Some(total);
            }
        }
    }
    best
}

/// Length of the shortest unit that exactly tiles the run.
fn shortest_period(run: &[char]) -> usize {
    for period in 1..=run.len() / 2 {
        if run.len() % period != 0 {
            continue;
        }
        if run.chunks(period).all(|chunk| chunk == &run[..period]) {
            return period;
        }
    }
    run.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval_stub(_base: &str) -> f64 {
        1.0
    }

    fn repeat_fields(m: &Match) -> (&str, usize) {
        match &m.kind {
            MatchKind::Repeat {
                base_token,
                repeat_count,
                ..
            } => (base_token.as_str(), *repeat_count),
            other => panic!("not a repeat: {:?}", other),
        }
    }

    #[test]
    fn test_single_char_repeat() {
        let matches = repeat_match("aaa", &eval_stub);
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (0, 2));
        assert_eq!(repeat_fields(&matches[0]), ("a", 3));
    }

    #[test]
    fn test_multi_char_repeat() {
        let matches = repeat_match("abcabcabc", &eval_stub);
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (0, 8));
        assert_eq!(repeat_fields(&matches[0]), ("abc", 3));
    }

    #[test]
    fn test_longest_unit_wins_over_short_prefix() {
        // "aab" repeated beats the leading "aa"
        let matches = repeat_match("aabaab", &eval_stub);
        assert_eq!(matches.len(), 1);
        assert_eq!(repeat_fields(&matches[0]), ("aab", 2));
    }

    #[test]
    fn test_base_is_shortest_period() {
        // unit "abab" also tiles this, but the base must be "ab"
        let matches = repeat_match("abababab", &eval_stub);
        assert_eq!(matches.len(), 1);
        assert_eq!(repeat_fields(&matches[0]), ("ab", 4));
    }

    #[test]
    fn test_embedded_repeat() {
        let matches = repeat_match("xyaaaayx", &eval_stub);
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].i, matches[0].j), (2, 5));
        assert_eq!(repeat_fields(&matches[0]), ("a", 4));
    }

    #[test]
    fn test_adjacent_runs_found_separately() {
        let matches = repeat_match("aabb", &eval_stub);
        assert_eq!(matches.len(), 2);
        assert_eq!(repeat_fields(&matches[0]), ("a", 2));
        assert_eq!(repeat_fields(&matches[1]), ("b", 2));
    }

    #[test]
    fn test_no_repeat() {
        assert!(repeat_match("abcdef", &eval_stub).is_empty());
    }

    #[test]
    fn test_base_guesses_come_from_evaluator() {
        let matches = repeat_match("zzz", &|_base| 42.0);
        match &matches[0].kind {
            MatchKind::Repeat { base_guesses, .. } => assert_eq!(*base_guesses, 42.0),
            _ => unreachable!(),
        }
    }
}
