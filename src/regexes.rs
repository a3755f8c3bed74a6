//! Fixed regex catalog matcher.
//!
//! Currently the catalog holds only `recent_year`: four consecutive digits
//! naming a year between 1900 and 2050. New patterns may be added but must
//! not shift the coordinates of existing matches.

use crate::types::{Match, MatchKind};
use regex::Regex;
use std::sync::OnceLock;

fn catalog() -> &'static [(&'static str, Regex)] {
    static CATALOG: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let mut patterns = Vec::new();
        if let Ok(re) = Regex::new(r"19\d\d|20[0-4]\d|2050") {
            patterns.push(("recent_year", re));
        }
        patterns
    })
}

/// Match every catalog pattern against the password.
pub fn regex_match(password: &str) -> Vec<Match> {
    let mut matches = Vec::new();
    for &(name, ref re) in catalog() {
        for found in re.find_iter(password) {
            let i = password[..found.start()].chars().count();
            let j = i + found.as_str().chars().count() - 1;
            matches.push(Match::new(
                i,
                j,
                found.as_str().to_string(),
                MatchKind::Regex { regex_name: name },
            ));
        }
    }
    matches
}
