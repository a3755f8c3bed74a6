//! Keyboard-adjacency matcher.
//!
//! Scans for runs where each character is a physical neighbor of the
//! previous one on some keyboard layout, tracking direction changes and
//! shifted keys.

use crate::data::AdjacencyGraph;
use crate::matching::MatchContext;
use crate::types::{Match, MatchKind};

/// Characters that require shift on a standard US keyboard.
const SHIFTED_CHARS: &str = "~!@#$%^&*()_+QWERTYUIOP{}|ASDFGHJKL:\"ZXCVBNM<>?";

/// Find adjacency walks on every known layout.
pub fn spatial_match(password: &str, ctx: &MatchContext) -> Vec<Match> {
    let chars: Vec<char> = password.chars().collect();
    let mut matches = Vec::new();
    for graph in ctx.graphs().iter() {
        let before = matches.len();
        spatial_match_helper(&chars, graph, &mut matches);
        let found = matches.len() - before;
        if found > 0 {
            tracing::debug!("spatial scan: {} walk(s) on {}", found, graph.name());
        }
    }
    matches
}

fn spatial_match_helper(chars: &[char], graph: &AdjacencyGraph, out: &mut Vec<Match>) {
    let n = chars.len();
    let mut i = 0;
    while i + 1 < n {
        let mut j = i + 1;
        let mut last_direction: Option<usize> = None;
        let mut turns = 0usize;
        let mut shifted_count =
            usize::from(graph.has_shifted_keys() && SHIFTED_CHARS.contains(chars[i]));

        loop {
            let prev = chars[j - 1];
            let mut found = false;
            if j < n {
                let cur = chars[j];
                if let Some(adjacents) = graph.neighbors_of(prev) {
                    for (direction, adj) in adjacents.iter().enumerate() {
                        let Some(adj) = adj else { continue };
                        if let Some(pos) = adj.chars().position(|c| c == cur) {
                            found = true;
                            // position 1 in a two-char token is the
                            // shifted variant
                            if pos == 1 {
                                shifted_count += 1;
                            }
                            if last_direction != Some(direction) {
                                turns += 1;
                                last_direction = Some(direction);
                            }
                            break;
                        }
                    }
                }
            }
            if found {
                j += 1;
            } else {
                // don't consider length 1 or 2 chains
                if j - i > 2 {
                    out.push(Match::new(
                        i,
                        j - 1,
                        chars[i..j].iter().collect(),
                        MatchKind::Spatial {
                            graph: graph.name(),
                            turns,
                            shifted_count,
                        },
                    ));
                }
                i = j;
                break;
            }
        }
    }
}
