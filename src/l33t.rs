//! L33t substitution table and substitution-map enumeration.

use std::collections::BTreeMap;

/// The fixed substitution table: original letter to visually similar
/// characters. This table is part of the compatibility contract and must
/// not change.
pub const L33T_TABLE: &[(char, &[char])] = &[
    ('a', &['4', '@']),
    ('b', &['8']),
    ('c', &['(', '{', '[', '<']),
    ('e', &['3']),
    ('g', &['6', '9']),
    ('i', &['1', '!']),
    ('l', &['1', '|', '7']),
    ('o', &['0']),
    ('s', &['$', '5']),
    ('t', &['+', '7']),
    ('x', &['%']),
    ('z', &['2']),
];

/// Upper bound on distinct substitute characters considered per password.
/// Beyond this the map enumeration would grow geometrically for no
/// realistic gain.
const MAX_L33T_CHARS: usize = 10;

/// Collect (substitute, letter) pairs whose substitute character appears
/// in the password, in table order. A character standing for several
/// letters ('1' for 'i' or 'l') contributes one pair per letter.
pub(crate) fn relevant_subs(password: &str) -> Vec<(char, char)> {
    let mut pairs = Vec::new();
    for &(letter, subs) in L33T_TABLE {
        for &sub in subs {
            if password.contains(sub) {
                pairs.push((sub, letter));
            }
        }
    }
    pairs
}

/// Enumerate every non-empty substitution map over the given pairs.
///
/// Each map assigns some subset of the substitute characters to one of
/// their candidate letters; a character never maps to two letters at once.
pub(crate) fn enumerate_subs(pairs: &[(char, char)]) -> Vec<BTreeMap<char, char>> {
    // group candidate letters per substitute character, preserving order
    let mut grouped: Vec<(char, Vec<char>)> = Vec::new();
    for &(sub, letter) in pairs {
        match grouped.iter_mut().find(|(s, _)| *s == sub) {
            Some((_, letters)) => letters.push(letter),
            None => grouped.push((sub, vec![letter])),
        }
    }
    grouped.truncate(MAX_L33T_CHARS);

    let mut maps: Vec<BTreeMap<char, char>> = vec![BTreeMap::new()];
    for (sub, letters) in grouped {
        let mut next = Vec::with_capacity(maps.len() * (letters.len() + 1));
        for map in &maps {
            // leave this substitute character untouched
            next.push(map.clone());
            for &letter in &letters {
                let mut extended = map.clone();
                extended.insert(sub, letter);
                next.push(extended);
            }
        }
        maps = next;
    }
    maps.retain(|m| !m.is_empty());
    maps
}

/// Apply a substitution map to the password.
pub(crate) fn translate(password: &str, sub: &BTreeMap<char, char>) -> String {
    password
        .chars()
        .map(|c| sub.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Render a map as the canonical `"x -> y"` comma-joined listing.
pub(crate) fn sub_display(sub: &BTreeMap<char, char>) -> String {
    sub.iter()
        .map(|(s, l)| format!("{} -> {}", s, l))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevant_subs() {
        let pairs = relevant_subs("p4ssw0rd");
        assert_eq!(pairs, vec![('4', 'a'), ('0', 'o')]);
    }

    #[test]
    fn test_ambiguous_substitute() {
        // '1' can stand for 'i' or 'l'
        let pairs = relevant_subs("w1n");
        assert_eq!(pairs, vec![('1', 'i'), ('1', 'l')]);
    }

    #[test]
    fn test_enumerate_single() {
        let maps = enumerate_subs(&[('4', 'a')]);
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].get(&'4'), Some(&'a'));
    }

    #[test]
    fn test_enumerate_subsets() {
        // two independent substitutes: each alone, plus both together
        let maps = enumerate_subs(&[('4', 'a'), ('0', 'o')]);
        assert_eq!(maps.len(), 3);
    }

    #[test]
    fn test_enumerate_never_maps_one_char_twice() {
        let maps = enumerate_subs(&[('1', 'i'), ('1', 'l')]);
        assert_eq!(maps.len(), 2);
        for map in &maps {
            assert_eq!(map.len(), 1);
        }
    }

    #[test]
    fn test_translate() {
        let mut sub = BTreeMap::new();
        sub.insert('4', 'a');
        sub.insert('0', 'o');
        assert_eq!(translate("p4ssw0rd", &sub), "password");
    }

    #[test]
    fn test_sub_display() {
        let mut sub = BTreeMap::new();
        sub.insert('@', 'a');
        sub.insert('0', 'o');
        assert_eq!(sub_display(&sub), "0 -> o, @ -> a");
    }
}
