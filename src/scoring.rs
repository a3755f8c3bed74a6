//! Optimal tiling search.
//!
//! Among all ways to cover the password with candidate matches (filling
//! gaps with bruteforce), find the one an attacker would exhaust soonest.
//! The cost of a decomposition into `l` chunks is
//! `l! * product(guesses)` plus a length penalty that keeps the search
//! from favoring many tiny chunks.

use crate::guesses::{self, MIN_GUESSES_BEFORE_GROWING_SEQUENCE};
use crate::matching::MatchContext;
use crate::types::{Match, MatchKind};
use std::collections::BTreeMap;

/// Result of the search: minimal guesses and the tiling that achieves it.
#[derive(Debug, Clone)]
pub struct ScoredSequence {
    pub guesses: f64,
    pub guesses_log10: f64,
    pub sequence: Vec<Match>,
}

/// Per-position DP state, keyed by decomposition length `l`.
struct Optimal {
    /// best match ending at position k for a length-l decomposition
    m: Vec<BTreeMap<usize, Match>>,
    /// product of guesses for that decomposition
    pi: Vec<BTreeMap<usize, f64>>,
    /// full cost including the factorial and the length penalty
    g: Vec<BTreeMap<usize, f64>>,
}

impl Optimal {
    fn new(n: usize) -> Self {
        Optimal {
            m: vec![BTreeMap::new(); n],
            pi: vec![BTreeMap::new(); n],
            g: vec![BTreeMap::new(); n],
        }
    }

    /// Consider a decomposition of length `l` ending with match `m`.
    fn update(&mut self, mut m: Match, l: usize, n: usize, ctx: &MatchContext) {
        let k = m.j;
        let mut pi = guesses::estimate_guesses(&mut m, n, ctx);
        if l > 1 {
            // extend the best (l-1)-decomposition of the prefix
            let Some(&prev_pi) = self.pi[m.i - 1].get(&(l - 1)) else {
                return;
            };
            pi *= prev_pi;
        }
        if !pi.is_finite() {
            pi = f64::MAX;
        }
        let mut g = guesses::factorial(l) * pi;
        if !g.is_finite() {
            g = f64::MAX;
        }
        g += MIN_GUESSES_BEFORE_GROWING_SEQUENCE.powi(l as i32 - 1);
        if !g.is_finite() {
            g = f64::MAX;
        }
        // a shorter-or-equal decomposition that is already cheaper wins
        for (&competing_l, &competing_g) in &self.g[k] {
            if competing_l > l {
                continue;
            }
            if competing_g <= g {
                return;
            }
        }
        self.g[k].insert(l, g);
        self.m[k].insert(l, m);
        self.pi[k].insert(l, pi);
    }

    /// Try bruteforce fills over every suffix `[i, k]`.
    fn bruteforce_update(&mut self, k: usize, chars: &[char], n: usize, ctx: &MatchContext) {
        self.update(make_bruteforce_match(chars, 0, k), 1, n, ctx);
        for i in 1..=k {
            let m = make_bruteforce_match(chars, i, k);
            // never extend a bruteforce chunk with another bruteforce
            // chunk; a single wider fill is always cheaper
            let lengths: Vec<usize> = self.m[i - 1]
                .iter()
                .filter(|(_, prev)| !matches!(prev.kind, MatchKind::Bruteforce))
                .map(|(&l, _)| l)
                .collect();
            for l in lengths {
                self.update(m.clone(), l + 1, n, ctx);
            }
        }
    }
}

fn make_bruteforce_match(chars: &[char], i: usize, j: usize) -> Match {
    Match::new(i, j, chars[i..=j].iter().collect(), MatchKind::Bruteforce)
}

/// Search for the minimum-guesses tiling of the password.
pub fn most_guessable_match_sequence(
    password: &str,
    matches: Vec<Match>,
    ctx: &MatchContext,
) -> ScoredSequence {
    let chars: Vec<char> = password.chars().collect();
    let n = chars.len();
    if n == 0 {
        return ScoredSequence {
            guesses: 1.0,
            guesses_log10: 0.0,
            sequence: Vec::new(),
        };
    }

    let mut matches_by_j: Vec<Vec<Match>> = vec![Vec::new(); n];
    for m in matches {
        if m.j < n {
            matches_by_j[m.j].push(m);
        }
    }
    for group in &mut matches_by_j {
        group.sort_by_key(|m| m.i);
    }

    let mut optimal = Optimal::new(n);
    for k in 0..n {
        for m in matches_by_j[k].clone() {
            if m.i > 0 {
                let lengths: Vec<usize> = optimal.m[m.i - 1].keys().copied().collect();
                for l in lengths {
                    optimal.update(m.clone(), l + 1, n, ctx);
                }
            } else {
                optimal.update(m.clone(), 1, n, ctx);
            }
        }
        optimal.bruteforce_update(k, &chars, n, ctx);
    }

    // pick the cheapest decomposition length at the final position
    let mut best_l = 1;
    let mut best_g = f64::INFINITY;
    for (&l, &g) in &optimal.g[n - 1] {
        if g < best_g {
            best_l = l;
            best_g = g;
        }
    }

    // unwind via the stored matches
    let mut sequence = Vec::new();
    let mut l = best_l;
    let mut k = n as isize - 1;
    while k >= 0 && l > 0 {
        let Some(m) = optimal.m[k as usize].get(&l) else {
            break;
        };
        sequence.push(m.clone());
        k = m.i as isize - 1;
        l -= 1;
    }
    sequence.reverse();

    let guesses = if best_g.is_finite() { best_g } else { f64::MAX };
    ScoredSequence {
        guesses,
        guesses_log10: guesses.log10(),
        sequence,
    }
}

/// Map a guess count onto the 0-4 score scale.
///
/// The +5 delta keeps boundary values from flapping between scores across
/// implementations.
pub fn guesses_to_score(guesses: f64) -> u8 {
    const DELTA: f64 = 5.0;
    if guesses < 1e3 + DELTA {
        0
    } else if guesses < 1e6 + DELTA {
        1
    } else if guesses < 1e8 + DELTA {
        2
    } else if guesses < 1e10 + DELTA {
        3
    } else {
        4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{self, MatchContext};

    fn ctx() -> MatchContext {
        MatchContext::new(&[]).unwrap()
    }

    fn search(password: &str) -> ScoredSequence {
        let ctx = ctx();
        let matches = matching::omnimatch(password, &ctx);
        most_guessable_match_sequence(password, matches, &ctx)
    }

    #[test]
    fn test_empty_password() {
        let result = most_guessable_match_sequence("", Vec::new(), &ctx());
        assert_eq!(result.guesses, 1.0);
        assert!(result.sequence.is_empty());
    }

    #[test]
    fn test_single_dictionary_match_cost() {
        // rank 1 covering everything: 1! * 1 + 10000^0 = 2
        let result = search("password");
        assert_eq!(result.guesses, 2.0);
        assert_eq!(result.sequence.len(), 1);
    }

    #[test]
    fn test_bruteforce_only() {
        // no pattern applies: 10^3 + 1
        let result = search("x$9");
        assert_eq!(result.guesses, 1001.0);
        assert_eq!(result.sequence.len(), 1);
        assert!(matches!(result.sequence[0].kind, MatchKind::Bruteforce));
    }

    #[test]
    fn test_sequence_tiles_password_exactly() {
        for password in ["Tr0ub4dour&3", "p4ssword1991", "x$9horse", "11/11/2011zz"] {
            let result = search(password);
            let n = password.chars().count();
            assert!(!result.sequence.is_empty());
            assert_eq!(result.sequence[0].i, 0, "{}", password);
            assert_eq!(result.sequence[result.sequence.len() - 1].j, n - 1);
            for pair in result.sequence.windows(2) {
                assert_eq!(pair[1].i, pair[0].j + 1, "gap or overlap in {}", password);
            }
        }
    }

    #[test]
    fn test_guesses_filled_on_sequence() {
        let result = search("x$9horse");
        for m in &result.sequence {
            let g = m.guesses.expect("scored match must carry guesses");
            assert!(g >= 1.0);
            let log = m.guesses_log10.expect("and its log10");
            assert!((log - g.log10()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_word_beats_bruteforce() {
        let result = search("horse");
        assert_eq!(result.sequence.len(), 1);
        assert!(matches!(
            result.sequence[0].kind,
            MatchKind::Dictionary { .. }
        ));
    }

    #[test]
    fn test_appending_never_helps_bruteforce() {
        // pure bruteforce passwords: guesses grow with each character
        let mut previous = 0.0;
        for password in ["x", "x$", "x$9", "x$9#", "x$9#x"] {
            let guesses = search(password).guesses;
            assert!(guesses > previous, "{} weakened the password", password);
            previous = guesses;
        }
    }

    #[test]
    fn test_guesses_to_score_thresholds() {
        assert_eq!(guesses_to_score(1.0), 0);
        assert_eq!(guesses_to_score(1e3 + 4.0), 0);
        assert_eq!(guesses_to_score(1e3 + 5.0), 1);
        assert_eq!(guesses_to_score(1e6 + 4.0), 1);
        assert_eq!(guesses_to_score(1e6 + 5.0), 2);
        assert_eq!(guesses_to_score(1e8 + 5.0), 3);
        assert_eq!(guesses_to_score(1e10 + 5.0), 4);
        assert_eq!(guesses_to_score(f64::MAX), 4);
    }

    #[test]
    fn test_determinism() {
        let a = search("Tr0ub4dour&3");
        let b = search("Tr0ub4dour&3");
        assert_eq!(a.guesses, b.guesses);
        assert_eq!(a.sequence, b.sequence);
    }
}
