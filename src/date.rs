//! Date matcher.
//!
//! Recognizes dates written as 4-8 bare digits or as three digit groups
//! joined by one repeated separator. Every (day, month, year) reading
//! consistent with the digits is considered; the one closest to the
//! reference year wins. Dates fully contained inside a longer date match
//! are pruned.

use crate::guesses::REFERENCE_YEAR;
use crate::types::{Match, MatchKind};
use regex::Regex;
use std::sync::OnceLock;

const DATE_MIN_YEAR: i32 = 1000;
const DATE_MAX_YEAR: i32 = 2050;

/// Accepted split points of a bare digit run into three groups, by length.
fn date_splits(len: usize) -> &'static [(usize, usize)] {
    match len {
        4 => &[(1, 2), (2, 3)],
        5 => &[(1, 3), (2, 3)],
        6 => &[(1, 2), (2, 4), (4, 5)],
        7 => &[(1, 3), (2, 3), (4, 5), (4, 6)],
        8 => &[(2, 4), (4, 6)],
        _ => &[],
    }
}

fn separator_rx() -> Option<&'static Regex> {
    static RX: OnceLock<Option<Regex>> = OnceLock::new();
    RX.get_or_init(|| Regex::new(r"^(\d{1,4})([/\\_.,-])(\d{1,2})([/\\_.,-])(\d{1,4})$").ok())
        .as_ref()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Dmy {
    day: i32,
    month: i32,
    year: i32,
}

/// Find every date reading of the password.
pub fn date_match(password: &str) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let n = chars.len();
    let mut matches = Vec::new();

    // bare digit runs, 4 to 8 characters
    for i in 0..n.saturating_sub(3) {
        for j in (i + 3)..=(i + 7).min(n.saturating_sub(1)) {
            let token: String = chars[i..=j].iter().collect();
            if !token.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let mut candidates = Vec::new();
            for &(k, l) in date_splits(token.len()) {
                let parsed = (
                    token[..k].parse::<i32>(),
                    token[k..l].parse::<i32>(),
                    token[l..].parse::<i32>(),
                );
                let (Ok(a), Ok(b), Ok(c)) = parsed else { continue };
                if let Some(dmy) = map_ints_to_dmy([a, b, c]) {
                    candidates.push(dmy);
                }
            }
            let Some(best) = candidates
                .into_iter()
                .min_by_key(|c| (c.year - REFERENCE_YEAR).abs())
            else {
                continue;
            };
            matches.push(Match::new(
                i,
                j,
                token,
                MatchKind::Date {
                    separator: None,
                    year: best.year,
                    month: best.month,
                    day: best.day,
                },
            ));
        }
    }

    // separated variant, 6 to 10 characters
    for i in 0..n.saturating_sub(5) {
        for j in (i + 5)..=(i + 9).min(n.saturating_sub(1)) {
            let token: String = chars[i..=j].iter().collect();
            let Some(rx) = separator_rx() else { break };
            let Some(caps) = rx.captures(&token) else {
                continue;
            };
            if caps[2] != caps[4] {
                continue;
            }
            let parsed = (
                caps[1].parse::<i32>(),
                caps[3].parse::<i32>(),
                caps[5].parse::<i32>(),
            );
            let (Ok(a), Ok(b), Ok(c)) = parsed else { continue };
            let Some(dmy) = map_ints_to_dmy([a, b, c]) else {
                continue;
            };
            matches.push(Match::new(
                i,
                j,
                token.clone(),
                MatchKind::Date {
                    separator: caps[2].chars().next(),
                    year: dmy.year,
                    month: dmy.month,
                    day: dmy.day,
                },
            ));
        }
    }

    // prune dates strictly contained within another date match
    let candidates = matches.len();
    let keep: Vec<bool> = (0..matches.len())
        .map(|a| {
            !matches.iter().enumerate().any(|(b, other)| {
                b != a && other.i <= matches[a].i && other.j >= matches[a].j
            })
        })
        .collect();
    let matches: Vec<Match> = matches
        .into_iter()
        .zip(keep)
        .filter_map(|(m, k)| k.then_some(m))
        .collect();
    if candidates > 0 {
        tracing::debug!(
            "date scan: {} candidate reading(s), {} after pruning",
            candidates,
            matches.len()
        );
    }
    matches
}

/// Map three integers to a plausible (day, month, year), or reject.
///
/// At most one value may exceed 31, at most two may exceed 12, and at most
/// one may be non-positive. The year is taken from the last or first
/// position, preferring four-digit years in range; two-digit years promote
/// to the 1900s above 50 and the 2000s otherwise.
fn map_ints_to_dmy(ints: [i32; 3]) -> Option<Dmy> {
    if ints[1] > 31 || ints[1] <= 0 {
        return None;
    }
    let mut over_12 = 0;
    let mut over_31 = 0;
    let mut under_1 = 0;
    for &int in &ints {
        if (100..DATE_MIN_YEAR).contains(&int) || int > DATE_MAX_YEAR {
            return None;
        }
        if int > 31 {
            over_31 += 1;
        }
        if int > 12 {
            over_12 += 1;
        }
        if int <= 0 {
            under_1 += 1;
        }
    }
    if over_31 >= 2 || over_12 == 3 || under_1 >= 2 {
        return None;
    }

    let year_splits = [(ints[2], [ints[0], ints[1]]), (ints[0], [ints[1], ints[2]])];

    for &(year, rest) in &year_splits {
        if (DATE_MIN_YEAR..=DATE_MAX_YEAR).contains(&year) {
            return map_ints_to_dm(rest).map(|(day, month)| Dmy { day, month, year });
        }
    }
    for &(year, rest) in &year_splits {
        if let Some((day, month)) = map_ints_to_dm(rest) {
            return Some(Dmy {
                day,
                month,
                year: two_to_four_digit_year(year),
            });
        }
    }
    None
}

fn map_ints_to_dm(ints: [i32; 2]) -> Option<(i32, i32)> {
    for (day, month) in [(ints[0], ints[1]), (ints[1], ints[0])] {
        if (1..=31).contains(&day) && (1..=12).contains(&month) {
            return Some((day, month));
        }
    }
    None
}

fn two_to_four_digit_year(year: i32) -> i32 {
    if year > 99 {
        year
    } else if year > 50 {
        year + 1900
    } else {
        year + 2000
    }
}
