//! Feedback catalog: one warning plus suggestions for weak passwords.
//!
//! Feedback keys off the longest match in the optimal sequence. All text
//! flows through an injected translator; the message IDs below are the
//! English strings themselves, so the default identity translator yields
//! English output.

use crate::types::{Feedback, Match, MatchKind};

/// Message-id to localized-string lookup.
pub type Translate = fn(&str) -> String;

/// The default translator: message IDs pass through unchanged.
pub fn identity(msg_id: &str) -> String {
    msg_id.to_string()
}

pub mod messages {
    pub const USE_A_FEW_WORDS: &str = "Use a few words, avoid common phrases.";
    pub const NO_NEED_FOR_SYMBOLS: &str =
        "No need for symbols, digits, or uppercase letters.";
    pub const ADD_ANOTHER_WORD: &str =
        "Add another word or two. Uncommon words are better.";
    pub const STRAIGHT_ROWS: &str = "Straight rows of keys are easy to guess";
    pub const SHORT_KEYBOARD_PATTERNS: &str =
        "Short keyboard patterns are easy to guess";
    pub const LONGER_KEYBOARD_PATTERN: &str =
        "Use a longer keyboard pattern with more turns";
    pub const REPEATED_CHARS: &str = "Repeats like \"aaa\" are easy to guess";
    pub const REPEATED_WORDS: &str =
        "Repeats like \"abcabcabc\" are only slightly harder to guess than \"abc\"";
    pub const AVOID_REPEATS: &str = "Avoid repeated words and characters";
    pub const SEQUENCES: &str = "Sequences like abc or 6543 are easy to guess";
    pub const AVOID_SEQUENCES: &str = "Avoid sequences";
    pub const RECENT_YEARS: &str = "Recent years are easy to guess";
    pub const AVOID_RECENT_YEARS: &str = "Avoid recent years";
    pub const AVOID_ASSOCIATED_YEARS: &str =
        "Avoid years that are associated with you";
    pub const DATES: &str = "Dates are often easy to guess";
    pub const AVOID_ASSOCIATED_DATES: &str =
        "Avoid dates and years that are associated with you";
    pub const TOP_10_PASSWORD: &str = "This is a top-10 common password";
    pub const TOP_100_PASSWORD: &str = "This is a top-100 common password";
    pub const VERY_COMMON_PASSWORD: &str = "This is a very common password";
    pub const SIMILAR_TO_COMMON: &str =
        "This is similar to a commonly used password";
    pub const WORD_BY_ITSELF: &str = "A word by itself is easy to guess";
    pub const NAMES_BY_THEMSELVES: &str =
        "Names and surnames by themselves are easy to guess";
    pub const COMMON_NAMES: &str = "Common names and surnames are easy to guess";
    pub const CAPITALIZATION: &str = "Capitalization doesn't help very much";
    pub const ALL_UPPERCASE: &str =
        "All-uppercase is almost as easy to guess as all-lowercase";
    pub const REVERSED_WORDS: &str = "Reversed words aren't much harder to guess";
    pub const PREDICTABLE_SUBSTITUTIONS: &str =
        "Predictable substitutions like '@' for 'a' don't help very much";
}

/// Produce feedback for a scored sequence.
///
/// Strong passwords (score 3 or better) get none. An empty sequence gets
/// the generic starter advice.
pub fn get_feedback(score: u8, sequence: &[Match], t: Translate) -> Feedback {
    if sequence.is_empty() {
        return Feedback {
            warning: String::new(),
            suggestions: vec![
                t(messages::USE_A_FEW_WORDS),
                t(messages::NO_NEED_FOR_SYMBOLS),
            ],
        };
    }
    if score > 2 {
        return Feedback::default();
    }

    let mut longest = &sequence[0];
    for m in &sequence[1..] {
        if m.token_len() > longest.token_len() {
            longest = m;
        }
    }

    let mut feedback =
        match_feedback(longest, sequence.len() == 1, t).unwrap_or_default();
    feedback
        .suggestions
        .insert(0, t(messages::ADD_ANOTHER_WORD));
    feedback
}

fn match_feedback(m: &Match, is_sole_match: bool, t: Translate) -> Option<Feedback> {
    match &m.kind {
        MatchKind::Dictionary { .. } => Some(dictionary_feedback(m, is_sole_match, t)),
        MatchKind::Spatial { turns, .. } => Some(Feedback {
            warning: if *turns == 1 {
                t(messages::STRAIGHT_ROWS)
            } else {
                t(messages::SHORT_KEYBOARD_PATTERNS)
            },
            suggestions: vec![t(messages::LONGER_KEYBOARD_PATTERN)],
        }),
        MatchKind::Repeat { base_token, .. } => Some(Feedback {
            warning: if base_token.chars().count() == 1 {
                t(messages::REPEATED_CHARS)
            } else {
                t(messages::REPEATED_WORDS)
            },
            suggestions: vec![t(messages::AVOID_REPEATS)],
        }),
        MatchKind::Sequence { .. } => Some(Feedback {
            warning: t(messages::SEQUENCES),
            suggestions: vec![t(messages::AVOID_SEQUENCES)],
        }),
        MatchKind::Regex { regex_name } => {
            if *regex_name == "recent_year" {
                Some(Feedback {
                    warning: t(messages::RECENT_YEARS),
                    suggestions: vec![
                        t(messages::AVOID_RECENT_YEARS),
                        t(messages::AVOID_ASSOCIATED_YEARS),
                    ],
                })
            } else {
                None
            }
        }
        MatchKind::Date { .. } => Some(Feedback {
            warning: t(messages::DATES),
            suggestions: vec![t(messages::AVOID_ASSOCIATED_DATES)],
        }),
        MatchKind::Bruteforce => None,
    }
}

fn dictionary_feedback(m: &Match, is_sole_match: bool, t: Translate) -> Feedback {
    let MatchKind::Dictionary {
        dictionary_name,
        rank,
        reversed,
        l33t,
        ..
    } = &m.kind
    else {
        return Feedback::default();
    };

    let warning = match *dictionary_name {
        "passwords" => {
            if is_sole_match && !*l33t && !*reversed {
                if *rank <= 10 {
                    t(messages::TOP_10_PASSWORD)
                } else if *rank <= 100 {
                    t(messages::TOP_100_PASSWORD)
                } else {
                    t(messages::VERY_COMMON_PASSWORD)
                }
            } else if m.guesses_log10.unwrap_or(0.0) <= 4.0 {
                t(messages::SIMILAR_TO_COMMON)
            } else {
                String::new()
            }
        }
        "english" => {
            if is_sole_match {
                t(messages::WORD_BY_ITSELF)
            } else {
                String::new()
            }
        }
        "surnames" | "male_names" | "female_names" => {
            if is_sole_match {
                t(messages::NAMES_BY_THEMSELVES)
            } else {
                t(messages::COMMON_NAMES)
            }
        }
        _ => String::new(),
    };

    let mut suggestions = Vec::new();
    if starts_upper(&m.token) {
        suggestions.push(t(messages::CAPITALIZATION));
    } else if all_upper(&m.token) && m.token.to_lowercase() != m.token {
        suggestions.push(t(messages::ALL_UPPERCASE));
    }
    if *reversed && m.token_len() >= 4 {
        suggestions.push(t(messages::REVERSED_WORDS));
    }
    if *l33t {
        suggestions.push(t(messages::PREDICTABLE_SUBSTITUTIONS));
    }

    Feedback {
        warning,
        suggestions,
    }
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

fn all_upper(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| !c.is_ascii_lowercase())
}
