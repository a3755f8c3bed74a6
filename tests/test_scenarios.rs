//! End-to-end scenarios: well-known weak passwords and their dominant
//! explanations.

use guesswork::{estimate, load_dictionaries, MatchKind};

// ===== Trivial inputs =====

#[test]
fn test_empty_password() {
    let result = estimate("").unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.guesses, 1.0);
    assert_eq!(result.guesses_log10, 0.0);
    assert!(result.sequence.is_empty());
    assert_eq!(result.feedback.suggestions.len(), 2);
}

#[test]
fn test_top_password() {
    let result = estimate("password").unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.guesses, 2.0);
    assert_eq!(result.sequence.len(), 1);
    match &result.sequence[0].kind {
        MatchKind::Dictionary {
            dictionary_name,
            rank,
            ..
        } => {
            assert_eq!(*dictionary_name, "passwords");
            assert_eq!(*rank, 1);
        }
        other => panic!("expected dictionary match, got {:?}", other),
    }
    assert_eq!(result.feedback.warning, "This is a top-10 common password");
}

// ===== L33t =====

#[test]
fn test_l33t_password() {
    let result = estimate("p@ssword").unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.guesses, 3.0);
    assert_eq!(result.sequence.len(), 1);
    match &result.sequence[0].kind {
        MatchKind::Dictionary {
            l33t,
            rank,
            matched_word,
            ..
        } => {
            assert!(*l33t);
            assert_eq!(*rank, 1);
            assert_eq!(matched_word, "password");
        }
        other => panic!("expected l33t dictionary match, got {:?}", other),
    }
    assert!(result
        .feedback
        .suggestions
        .iter()
        .any(|s| s.contains("Predictable substitutions")));
}

#[test]
fn test_troubadour() {
    let result = estimate("Tr0ub4dour&3").unwrap();
    assert_eq!(result.sequence.len(), 2);
    match &result.sequence[0].kind {
        MatchKind::Dictionary {
            l33t, matched_word, ..
        } => {
            assert!(*l33t);
            assert_eq!(matched_word, "troubadour");
        }
        other => panic!("expected l33t dictionary match, got {:?}", other),
    }
    assert!(matches!(result.sequence[1].kind, MatchKind::Bruteforce));

    // 2! * (rank * 2 capitalization * 4 substitution variants) * 10^2
    // bruteforce, plus the two-chunk length penalty
    let rank = load_dictionaries()
        .unwrap()
        .by_name("english")
        .unwrap()
        .rank("troubadour")
        .unwrap() as f64;
    let expected = 2.0 * (100.0 * (rank * 2.0 * 4.0)) + 10_000.0;
    assert_eq!(result.guesses, expected);
    assert_eq!(result.score, 1);
}

// ===== Spatial =====

#[test]
fn test_qwerty_walk() {
    let result = estimate("qwerty").unwrap();
    assert_eq!(result.sequence.len(), 1);
    match result.sequence[0].kind {
        MatchKind::Spatial {
            graph,
            turns,
            shifted_count,
        } => {
            assert_eq!(graph, "qwerty");
            assert_eq!(turns, 1);
            assert_eq!(shifted_count, 0);
        }
        ref other => panic!("expected spatial match, got {:?}", other),
    }
    let graphs = guesswork::load_adjacency_graphs().unwrap();
    let s = graphs.qwerty.key_count() as f64;
    let d = graphs.qwerty.average_degree();
    let expected = 5.0 * (s * d) + 1.0;
    assert!((result.guesses - expected).abs() < 1e-6);
    assert_eq!(result.feedback.warning, "Straight rows of keys are easy to guess");
}

// ===== Sequence =====

#[test]
fn test_lowercase_sequence() {
    let result = estimate("abcdefghijk").unwrap();
    assert_eq!(result.guesses, 45.0);
    assert_eq!(result.score, 0);
    assert_eq!(result.sequence.len(), 1);
    match result.sequence[0].kind {
        MatchKind::Sequence {
            sequence_name,
            ascending,
            ..
        } => {
            assert_eq!(sequence_name, "lower");
            assert!(ascending);
        }
        ref other => panic!("expected sequence match, got {:?}", other),
    }
}

// ===== Dates =====

#[test]
fn test_slashed_date() {
    let result = estimate("11/11/2011").unwrap();
    assert_eq!(result.guesses, 29_201.0);
    assert_eq!(result.score, 1);
    assert_eq!(result.sequence.len(), 1);
    match result.sequence[0].kind {
        MatchKind::Date {
            separator,
            year,
            month,
            day,
        } => {
            assert_eq!(separator, Some('/'));
            assert_eq!((year, month, day), (2011, 11, 11));
        }
        ref other => panic!("expected date match, got {:?}", other),
    }
    assert_eq!(result.feedback.warning, "Dates are often easy to guess");
}

// ===== Passphrases =====

#[test]
fn test_correct_horse_battery_staple() {
    let result = estimate("correcthorsebatterystaple").unwrap();
    assert!(result.score >= 3, "score was {}", result.score);
    assert_eq!(result.sequence.len(), 4);
    let words: Vec<&str> = result
        .sequence
        .iter()
        .map(|m| m.token.as_str())
        .collect();
    assert_eq!(words, vec!["correct", "horse", "battery", "staple"]);
    for m in &result.sequence {
        assert!(matches!(m.kind, MatchKind::Dictionary { .. }));
    }
    assert!(result.feedback.warning.is_empty());
    assert!(result.feedback.suggestions.is_empty());
}

// ===== Repeats =====

#[test]
fn test_dog_with_dot_padding() {
    let result = estimate("D0g...................").unwrap();
    assert_eq!(result.sequence.len(), 2);
    match &result.sequence[0].kind {
        MatchKind::Dictionary {
            l33t, matched_word, ..
        } => {
            assert!(*l33t);
            assert_eq!(matched_word, "dog");
        }
        other => panic!("expected l33t dictionary match, got {:?}", other),
    }
    match &result.sequence[1].kind {
        MatchKind::Repeat {
            base_token,
            repeat_count,
            ..
        } => {
            assert_eq!(base_token, ".");
            assert_eq!(*repeat_count, 19);
        }
        other => panic!("expected repeat match, got {:?}", other),
    }

    let rank = load_dictionaries()
        .unwrap()
        .by_name("english")
        .unwrap()
        .rank("dog")
        .unwrap() as f64;
    // repeat chunk: base "." evaluates to 12 guesses, times 19 copies
    let expected = 2.0 * (228.0 * (rank * 2.0 * 2.0)) + 10_000.0;
    assert_eq!(result.guesses, expected);
}

#[test]
fn test_plain_repeat() {
    let result = estimate("abcabcabc").unwrap();
    let repeat = result
        .sequence
        .iter()
        .find(|m| matches!(m.kind, MatchKind::Repeat { .. }))
        .expect("repeat should dominate");
    match &repeat.kind {
        MatchKind::Repeat {
            base_token,
            repeat_count,
            ..
        } => {
            assert_eq!(base_token, "abc");
            assert_eq!(*repeat_count, 3);
        }
        _ => unreachable!(),
    }
}

// ===== Bruteforce =====

#[test]
fn test_structureless_password() {
    let result = estimate("x$9").unwrap();
    assert_eq!(result.guesses, 1001.0);
    assert_eq!(result.score, 0);
    assert_eq!(result.sequence.len(), 1);
    assert!(matches!(result.sequence[0].kind, MatchKind::Bruteforce));
}
