//! Frozen reference data: ranked dictionaries and keyboard adjacency graphs.
//!
//! Dictionaries ship as line-oriented assets embedded at compile time; rank
//! is the 1-based line number. Adjacency graphs are built once from layout
//! strings, where indentation encodes the physical key positions. Both are
//! loaded lazily and cached for the life of the process.

use crate::error::Error;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A named token-to-rank mapping with a reversed-token view.
#[derive(Debug, Clone)]
pub struct RankedDict {
    name: &'static str,
    ranks: HashMap<String, usize>,
    reversed: HashMap<String, usize>,
}

impl RankedDict {
    /// Build from newline-separated tokens, rank = line number.
    ///
    /// Returns an error message if the asset contains no tokens.
    fn from_lines(name: &'static str, text: &str) -> Result<Self, &'static str> {
        let mut dict = RankedDict {
            name,
            ranks: HashMap::new(),
            reversed: HashMap::new(),
        };
        for line in text.lines() {
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            dict.insert(token.to_string());
        }
        if dict.ranks.is_empty() {
            return Err("empty frequency list asset");
        }
        Ok(dict)
    }

    /// Build the ad-hoc user-inputs dictionary, rank = insertion order.
    pub fn from_user_inputs(inputs: &[String]) -> Self {
        let mut dict = RankedDict {
            name: "user_inputs",
            ranks: HashMap::new(),
            reversed: HashMap::new(),
        };
        for input in inputs {
            dict.insert(input.to_lowercase());
        }
        dict
    }

    fn insert(&mut self, token: String) {
        let rank = self.ranks.len() + 1;
        if self.ranks.contains_key(&token) {
            return;
        }
        let rev: String = token.chars().rev().collect();
        self.ranks.insert(token, rank);
        self.reversed.entry(rev).or_insert(rank);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Rank of a lowercase token, 1 = most common
    pub fn rank(&self, token: &str) -> Option<usize> {
        self.ranks.get(token).copied()
    }

    /// Rank of the dictionary word whose reversal equals `token`
    pub fn rank_reversed(&self, token: &str) -> Option<usize> {
        self.reversed.get(token).copied()
    }
}

/// The frozen dictionary set, in matcher iteration order.
#[derive(Debug)]
pub struct RankedDictionaries {
    dicts: Vec<RankedDict>,
}

impl RankedDictionaries {
    pub fn iter(&self) -> impl Iterator<Item = &RankedDict> {
        self.dicts.iter()
    }

    pub fn by_name(&self, name: &str) -> Option<&RankedDict> {
        self.dicts.iter().find(|d| d.name == name)
    }
}

/// A keyboard layout expressed as a neighbor map per key.
///
/// Neighbor ordering encodes physical position (for slanted keyboards:
/// left, upper-left, upper-right, right, lower-right, lower-left). A `None`
/// entry means no key in that direction.
#[derive(Debug)]
pub struct AdjacencyGraph {
    name: &'static str,
    neighbors: HashMap<char, Vec<Option<String>>>,
    average_degree: f64,
    shifted_keys: bool,
}

impl AdjacencyGraph {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of distinct keys (shifted and unshifted count separately)
    pub fn key_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Mean number of populated neighbors per key
    pub fn average_degree(&self) -> f64 {
        self.average_degree
    }

    /// Whether this layout has shifted variants (true for keyboards,
    /// false for keypads)
    pub fn has_shifted_keys(&self) -> bool {
        self.shifted_keys
    }

    pub fn neighbors_of(&self, key: char) -> Option<&[Option<String>]> {
        self.neighbors.get(&key).map(|v| v.as_slice())
    }
}

/// All four frozen adjacency graphs.
#[derive(Debug)]
pub struct AdjacencyGraphs {
    pub qwerty: AdjacencyGraph,
    pub dvorak: AdjacencyGraph,
    pub keypad: AdjacencyGraph,
    pub mac_keypad: AdjacencyGraph,
}

impl AdjacencyGraphs {
    pub fn iter(&self) -> [&AdjacencyGraph; 4] {
        [&self.qwerty, &self.dvorak, &self.keypad, &self.mac_keypad]
    }

    pub fn by_name(&self, name: &str) -> Option<&AdjacencyGraph> {
        self.iter().into_iter().find(|g| g.name == name)
    }
}

// Layout strings. Token columns encode x positions; keyboard rows are
// slanted (each row shifts right relative to the one above), keypad rows
// are aligned. Two-character tokens are unshifted + shifted.
const QWERTY_LAYOUT: &str = r#"`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) -_ =+
    qQ wW eE rR tT yY uU iI oO pP [{ ]} \|
     aA sS dD fF gG hH jJ kK lL ;: '"
      zZ xX cC vV bB nN mM ,< .> /?"#;

const DVORAK_LAYOUT: &str = r#"`~ 1! 2@ 3# 4$ 5% 6^ 7& 8* 9( 0) [{ ]}
    '" ,< .> pP yY fF gG cC rR lL /? =+ \|
     aA oO eE uU iI dD hH tT nN sS -_
      ;: qQ jJ kK xX bB mM wW vV zZ"#;

const KEYPAD_LAYOUT: &str = r#"  / * -
7 8 9 +
4 5 6
1 2 3
  0 ."#;

const MAC_KEYPAD_LAYOUT: &str = r#"  = / *
7 8 9 -
4 5 6 +
1 2 3
  0 ."#;

/// Build one adjacency graph from a layout string.
fn build_graph(
    name: &'static str,
    layout: &str,
    slanted: bool,
) -> Result<AdjacencyGraph, &'static str> {
    let token_size = layout
        .split_whitespace()
        .next()
        .map(str::len)
        .ok_or("empty keyboard layout")?;
    let x_unit = (token_size + 1) as i32;

    let mut position_table: HashMap<(i32, i32), &str> = HashMap::new();
    for (row, line) in layout.lines().enumerate() {
        let y = row as i32 + 1;
        let slant = if slanted { y - 1 } else { 0 };
        let bytes = line.as_bytes();
        let mut idx = 0usize;
        while idx < bytes.len() {
            if bytes[idx] == b' ' {
                idx += 1;
                continue;
            }
            let start = idx;
            while idx < bytes.len() && bytes[idx] != b' ' {
                idx += 1;
            }
            let token = &line[start..idx];
            if token.len() != token_size {
                return Err("keyboard layout token size mismatch");
            }
            let offset = start as i32 - slant;
            if offset % x_unit != 0 {
                return Err("misaligned keyboard layout token");
            }
            position_table.insert((offset / x_unit, y), token);
        }
    }

    let mut neighbors: HashMap<char, Vec<Option<String>>> = HashMap::new();
    for (&(x, y), token) in &position_table {
        let coords: Vec<(i32, i32)> = if slanted {
            vec![
                (x - 1, y),
                (x, y - 1),
                (x + 1, y - 1),
                (x + 1, y),
                (x, y + 1),
                (x - 1, y + 1),
            ]
        } else {
            vec![
                (x - 1, y),
                (x - 1, y - 1),
                (x, y - 1),
                (x + 1, y - 1),
                (x + 1, y),
                (x + 1, y + 1),
                (x, y + 1),
                (x - 1, y + 1),
            ]
        };
        for key in token.chars() {
            let adjacent: Vec<Option<String>> = coords
                .iter()
                .map(|c| position_table.get(c).map(|t| (*t).to_string()))
                .collect();
            neighbors.insert(key, adjacent);
        }
    }

    if neighbors.is_empty() {
        return Err("empty keyboard layout");
    }
    let total_degree: usize = neighbors.values().map(|v| v.iter().flatten().count()).sum();
    let average_degree = total_degree as f64 / neighbors.len() as f64;

    Ok(AdjacencyGraph {
        name,
        neighbors,
        average_degree,
        shifted_keys: token_size == 2,
    })
}

fn build_dictionaries() -> Result<RankedDictionaries, &'static str> {
    let dicts = vec![
        RankedDict::from_lines("passwords", include_str!("../data/passwords.txt"))?,
        RankedDict::from_lines("english", include_str!("../data/english.txt"))?,
        RankedDict::from_lines("surnames", include_str!("../data/surnames.txt"))?,
        RankedDict::from_lines("male_names", include_str!("../data/male_names.txt"))?,
        RankedDict::from_lines("female_names", include_str!("../data/female_names.txt"))?,
    ];
    Ok(RankedDictionaries { dicts })
}

fn build_adjacency_graphs() -> Result<AdjacencyGraphs, &'static str> {
    Ok(AdjacencyGraphs {
        qwerty: build_graph("qwerty", QWERTY_LAYOUT, true)?,
        dvorak: build_graph("dvorak", DVORAK_LAYOUT, true)?,
        keypad: build_graph("keypad", KEYPAD_LAYOUT, false)?,
        mac_keypad: build_graph("mac_keypad", MAC_KEYPAD_LAYOUT, false)?,
    })
}

/// Load and cache the frozen dictionary set.
pub fn load_dictionaries() -> Result<&'static RankedDictionaries, Error> {
    static CACHE: OnceLock<Result<RankedDictionaries, &'static str>> = OnceLock::new();
    CACHE
        .get_or_init(build_dictionaries)
        .as_ref()
        .map_err(|&msg| Error::ReferenceData(msg))
}

/// Load and cache the frozen adjacency graphs.
pub fn load_adjacency_graphs() -> Result<&'static AdjacencyGraphs, Error> {
    static CACHE: OnceLock<Result<AdjacencyGraphs, &'static str>> = OnceLock::new();
    CACHE
        .get_or_init(build_adjacency_graphs)
        .as_ref()
        .map_err(|&msg| Error::ReferenceData(msg))
}
