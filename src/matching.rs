//! Matcher orchestration.
//!
//! [`omnimatch`] fans the password out to every matcher and returns the
//! combined candidate list sorted by position. [`MatchContext`] bundles
//! the frozen reference data with the per-evaluation user-inputs
//! dictionary.

use crate::data::{self, AdjacencyGraphs, RankedDict, RankedDictionaries};
use crate::error::Error;
use crate::types::Match;
use crate::{date, dictionary, regexes, repeat, scoring, sequence, spatial};

/// Reference data plus per-evaluation context for the matchers.
pub struct MatchContext {
    dicts: &'static RankedDictionaries,
    graphs: &'static AdjacencyGraphs,
    user_inputs: Option<RankedDict>,
}

impl MatchContext {
    /// Load reference data and build the ad-hoc user-inputs dictionary.
    pub fn new(user_inputs: &[String]) -> Result<Self, Error> {
        let dicts = data::load_dictionaries()?;
        let graphs = data::load_adjacency_graphs()?;
        let user_inputs = if user_inputs.is_empty() {
            None
        } else {
            Some(RankedDict::from_user_inputs(user_inputs))
        };
        Ok(MatchContext {
            dicts,
            graphs,
            user_inputs,
        })
    }

    /// Every dictionary in matcher order: frozen sets, then user inputs.
    pub fn dictionaries(&self) -> impl Iterator<Item = &RankedDict> {
        self.dicts.iter().chain(self.user_inputs.iter())
    }

    pub fn graphs(&self) -> &'static AdjacencyGraphs {
        self.graphs
    }
}

/// Run every matcher and collect candidate matches sorted by `(i, j)`.
pub fn omnimatch(password: &str, ctx: &MatchContext) -> Vec<Match> {
    let dictionary = dictionary::dictionary_match(password, ctx);
    let reversed = dictionary::reverse_dictionary_match(password, ctx);
    let l33t = dictionary::l33t_match(password, ctx);
    let spatial = spatial::spatial_match(password, ctx);

    // the repeat matcher scores its base token by running the full
    // evaluator on it
    let evaluate_base = |base: &str| -> f64 {
        let base_matches = omnimatch(base, ctx);
        scoring::most_guessable_match_sequence(base, base_matches, ctx).guesses
    };
    let repeat = repeat::repeat_match(password, &evaluate_base);

    let sequence = sequence::sequence_match(password);
    let regex = regexes::regex_match(password);
    let date = date::date_match(password);

    tracing::debug!(
        "omnimatch: {} dictionary, {} reversed, {} l33t, {} spatial, {} repeat, {} sequence, {} regex, {} date",
        dictionary.len(),
        reversed.len(),
        l33t.len(),
        spatial.len(),
        repeat.len(),
        sequence.len(),
        regex.len(),
        date.len()
    );

    let mut matches = Vec::new();
    matches.extend(dictionary);
    matches.extend(reversed);
    matches.extend(l33t);
    matches.extend(spatial);
    matches.extend(repeat);
    matches.extend(sequence);
    matches.extend(regex);
    matches.extend(date);

    matches.sort_by_key(|m| (m.i, m.j));
    matches
}
