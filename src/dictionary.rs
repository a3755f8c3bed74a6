//! Dictionary matchers: straight, reversed, and l33t-substituted lookups.
//!
//! Every substring of the password is checked against every ranked
//! dictionary. The reverse matcher consults the reversed-token view, and
//! the l33t matcher re-runs the scan once per candidate substitution map.

use crate::l33t;
use crate::matching::MatchContext;
use crate::types::{Match, MatchKind};
use std::collections::{BTreeMap, HashSet};

/// Per-character lowercasing that preserves string length.
fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Find every substring present in a ranked dictionary.
pub fn dictionary_match(password: &str, ctx: &MatchContext) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let lower: Vec<char> = chars.iter().map(|&c| simple_lower(c)).collect();
    let n = chars.len();
    let mut matches = Vec::new();

    for i in 0..n {
        for j in i..n {
            let token_lower: String = lower[i..=j].iter().collect();
            for dict in ctx.dictionaries() {
                if let Some(rank) = dict.rank(&token_lower) {
                    let token: String = chars[i..=j].iter().collect();
                    matches.push(Match::new(
                        i,
                        j,
                        token,
                        MatchKind::Dictionary {
                            dictionary_name: dict.name(),
                            matched_word: token_lower.clone(),
                            rank,
                            reversed: false,
                            l33t: false,
                            sub: BTreeMap::new(),
                            sub_display: None,
                        },
                    ));
                }
            }
        }
    }
    matches
}

/// Find every substring whose reversal is a dictionary word.
pub fn reverse_dictionary_match(password: &str, ctx: &MatchContext) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let lower: Vec<char> = chars.iter().map(|&c| simple_lower(c)).collect();
    let n = chars.len();
    let mut matches = Vec::new();

    for i in 0..n {
        for j in i..n {
            let token_lower: String = lower[i..=j].iter().collect();
            for dict in ctx.dictionaries() {
                if let Some(rank) = dict.rank_reversed(&token_lower) {
                    let token: String = chars[i..=j].iter().collect();
                    let matched_word: String = token_lower.chars().rev().collect();
                    matches.push(Match::new(
                        i,
                        j,
                        token,
                        MatchKind::Dictionary {
                            dictionary_name: dict.name(),
                            matched_word,
                            rank,
                            reversed: true,
                            l33t: false,
                            sub: BTreeMap::new(),
                            sub_display: None,
                        },
                    ));
                }
            }
        }
    }
    matches
}

/// Find dictionary words hidden behind l33t substitutions.
///
/// Each non-empty substitution map produces a de-l33ted password which is
/// scanned with the plain matcher; a hit counts only if at least one
/// substitution was actually used inside the matched range. Single
/// characters are too ambiguous to count as l33t matches.
pub fn l33t_match(password: &str, ctx: &MatchContext) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let mut matches = Vec::new();
    let mut seen: HashSet<(usize, usize, &'static str, String, BTreeMap<char, char>)> =
        HashSet::new();

    let subs = l33t::enumerate_subs(&l33t::relevant_subs(password));
    if !subs.is_empty() {
        tracing::debug!("l33t scan: trying {} substitution maps", subs.len());
    }

    for sub in subs {
        let translated = l33t::translate(password, &sub);
        for hit in dictionary_match(&translated, ctx) {
            let (dictionary_name, matched_word, rank) = match &hit.kind {
                MatchKind::Dictionary {
                    dictionary_name,
                    matched_word,
                    rank,
                    ..
                } => (*dictionary_name, matched_word.clone(), *rank),
                _ => continue,
            };
            if hit.j - hit.i < 1 {
                continue;
            }
            let token: String = chars[hit.i..=hit.j].iter().collect();
            let token_lower: String = token.chars().map(simple_lower).collect();
            // only count the hit if a substitution was used inside it
            if token_lower == matched_word {
                continue;
            }
            let match_sub: BTreeMap<char, char> = sub
                .iter()
                .filter(|(s, _)| token.contains(**s))
                .map(|(s, l)| (*s, *l))
                .collect();
            if match_sub.is_empty() {
                continue;
            }
            let key = (
                hit.i,
                hit.j,
                dictionary_name,
                matched_word.clone(),
                match_sub.clone(),
            );
            if !seen.insert(key) {
                continue;
            }
            let display = l33t::sub_display(&match_sub);
            matches.push(Match::new(
                hit.i,
                hit.j,
                token,
                MatchKind::Dictionary {
                    dictionary_name,
                    matched_word,
                    rank,
                    reversed: false,
                    l33t: true,
                    sub: match_sub,
                    sub_display: Some(display),
                },
            ));
        }
    }
    if !matches.is_empty() {
        tracing::debug!("l33t scan: found {} substituted words", matches.len());
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> MatchContext {
        MatchContext::new(&[]).unwrap()
    }

    fn dict_fields(m: &Match) -> (&'static str, &str, usize, bool, bool) {
        match &m.kind {
            MatchKind::Dictionary {
                dictionary_name,
                matched_word,
                rank,
                reversed,
                l33t,
                ..
            } => (dictionary_name, matched_word.as_str(), *rank, *reversed, *l33t),
            other => panic!("not a dictionary match: {:?}", other),
        }
    }

    #[test]
    fn test_whole_word_match() {
        let ctx = ctx();
        let matches = dictionary_match("password", &ctx);
        let full = matches
            .iter()
            .find(|m| m.i == 0 && m.j == 7)
            .expect("full-span match");
        let (name, word, rank, reversed, l33t) = dict_fields(full);
        assert_eq!(name, "passwords");
        assert_eq!(word, "password");
        assert_eq!(rank, 1);
        assert!(!reversed);
        assert!(!l33t);
    }

    #[test]
    fn test_embedded_word_coordinates() {
        let ctx = ctx();
        let matches = dictionary_match("xxhorsexx", &ctx);
        let horse = matches
            .iter()
            .find(|m| dict_fields(m).1 == "horse")
            .expect("embedded match");
        assert_eq!((horse.i, horse.j), (2, 6));
        assert_eq!(horse.token, "horse");
    }

    #[test]
    fn test_case_insensitive() {
        let ctx = ctx();
        let matches = dictionary_match("HoRsE", &ctx);
        let horse = matches.iter().find(|m| dict_fields(m).1 == "horse").unwrap();
        assert_eq!(horse.token, "HoRsE");
    }

    #[test]
    fn test_reverse_match() {
        let ctx = ctx();
        let matches = reverse_dictionary_match("esroh", &ctx);
        let horse = matches
            .iter()
            .find(|m| m.i == 0 && m.j == 4)
            .expect("reversed match");
        let (_, word, _, reversed, _) = dict_fields(horse);
        assert_eq!(word, "horse");
        assert!(reversed);
        assert_eq!(horse.token, "esroh");
    }

    #[test]
    fn test_l33t_basic() {
        let ctx = ctx();
        let matches = l33t_match("p@ssword", &ctx);
        let hit = matches.iter().find(|m| m.i == 0 && m.j == 7).unwrap();
        let (name, word, rank, _, l33t) = dict_fields(hit);
        assert_eq!(name, "passwords");
        assert_eq!(word, "password");
        assert_eq!(rank, 1);
        assert!(l33t);
        match &hit.kind {
            MatchKind::Dictionary { sub, sub_display, .. } => {
                assert_eq!(sub.get(&'@'), Some(&'a'));
                assert_eq!(sub_display.as_deref(), Some("@ -> a"));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_l33t_requires_substitution_in_range() {
        let ctx = ctx();
        // plain word: nothing substituted, so no l33t matches at all
        assert!(l33t_match("password", &ctx).is_empty());
    }

    #[test]
    fn test_l33t_skips_single_characters() {
        let ctx = ctx();
        // '4' de-l33ts to 'a', which is an english word, but single-char
        // tokens are not emitted
        assert!(l33t_match("4", &ctx).is_empty());
    }
}
