//! Fuzzy search, ranking and suggestions over contact lists.
//!
//! Everything in this module is a pure function of its inputs.

pub mod fuzzy_search;
pub mod highlight;

pub use fuzzy_search::{
    levenshtein_distance, rank, score_contact, search, similarity, suggest, MatchType,
    SearchOptions, SearchResult, DEFAULT_MAX_SUGGESTIONS,
};
pub use highlight::highlight_matches;
