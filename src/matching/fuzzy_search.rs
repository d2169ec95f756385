//! Fuzzy contact search and ranking.
//!
//! Every contact is classified against the trimmed query with a fixed rule
//! precedence:
//! - Case-insensitive substring of name (1.0), email (0.9) or phone (0.85)
//! - A name word starting with the query (0.8), when enabled
//! - Otherwise normalized Levenshtein similarity over name, email and phone
//!
//! Results are ordered by match type first and score second. The functions
//! here are pure: they never mutate the contacts and keep no state between
//! calls.

use crate::models::Contact;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

static WORD_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile word separator regex"));

const NAME_SUBSTRING_SCORE: f64 = 1.0;
const EMAIL_SUBSTRING_SCORE: f64 = 0.9;
const PHONE_SUBSTRING_SCORE: f64 = 0.85;
const STARTS_WITH_SCORE: f64 = 0.8;
const EMAIL_SIMILARITY_WEIGHT: f64 = 0.8;
const PHONE_SIMILARITY_WEIGHT: f64 = 0.7;

/// Default number of autocomplete suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Tuning knobs for [`search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// Minimum score a contact needs to be returned
    pub threshold: f64,

    /// Hard cap on the number of returned contacts
    pub max_results: usize,

    /// Rank a name word starting with the query above fuzzy matches
    pub prioritize_starts_with: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            max_results: 50,
            prioritize_starts_with: true,
        }
    }
}

/// How a contact matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchType {
    /// Query is a substring of name, email or phone
    Exact,

    /// A word of the name starts with the query
    StartsWith,

    /// Scored by edit-distance similarity
    Fuzzy,

    /// No query was applied
    None,
}

impl MatchType {
    /// Sort priority; higher ranks come first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Exact => 3,
            Self::StartsWith => 2,
            Self::Fuzzy => 1,
            Self::None => 0,
        }
    }

    /// Lowercase name used in tool output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::StartsWith => "startsWith",
            Self::Fuzzy => "fuzzy",
            Self::None => "none",
        }
    }
}

/// A contact paired with its score for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult<'a> {
    /// The matched contact
    pub contact: &'a Contact,

    /// Relevance score in `[0, 1]`
    pub score: f64,

    /// Rule that produced the score
    pub match_type: MatchType,
}

/// Search `contacts` for `query`, returning matches in relevance order.
///
/// An empty or whitespace-only query returns every contact untouched, in
/// input order and without truncation.
pub fn search<'a>(
    contacts: &'a [Contact],
    query: &str,
    options: &SearchOptions,
) -> Vec<&'a Contact> {
    rank(contacts, query, options)
        .into_iter()
        .map(|result| result.contact)
        .collect()
}

/// Scored form of [`search`].
///
/// Filtering, ordering and truncation are identical. For an empty query every
/// contact is returned with [`MatchType::None`] and a score of 0.
pub fn rank<'a>(
    contacts: &'a [Contact],
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchResult<'a>> {
    let query = query.trim();
    if query.is_empty() {
        return contacts
            .iter()
            .map(|contact| SearchResult {
                contact,
                score: 0.0,
                match_type: MatchType::None,
            })
            .collect();
    }

    let mut results: Vec<SearchResult<'a>> = contacts
        .iter()
        .map(|contact| {
            let (score, match_type) =
                score_contact(contact, query, options.prioritize_starts_with);
            SearchResult {
                contact,
                score,
                match_type,
            }
        })
        .filter(|result| result.score >= options.threshold)
        .collect();

    // `sort_by` is stable, so equal type and score keep input order.
    results.sort_by(|a, b| {
        b.match_type
            .rank()
            .cmp(&a.match_type.rank())
            .then_with(|| b.score.total_cmp(&a.score))
    });

    results.truncate(options.max_results);
    results
}

/// Classify one contact against an already-trimmed query.
///
/// Rules are evaluated in order and the first one that fires wins.
pub fn score_contact(
    contact: &Contact,
    query: &str,
    prioritize_starts_with: bool,
) -> (f64, MatchType) {
    let query_lower = query.to_lowercase();

    if contains_ignore_case(&contact.name, &query_lower) {
        return (NAME_SUBSTRING_SCORE, MatchType::Exact);
    }
    if contains_ignore_case(&contact.email, &query_lower) {
        return (EMAIL_SUBSTRING_SCORE, MatchType::Exact);
    }
    if contains_ignore_case(&contact.phone, &query_lower) {
        return (PHONE_SUBSTRING_SCORE, MatchType::Exact);
    }
    if prioritize_starts_with && any_word_starts_with(&contact.name, &query_lower) {
        return (STARTS_WITH_SCORE, MatchType::StartsWith);
    }

    let name_similarity = similarity(&contact.name, query);
    let email_similarity = similarity(&contact.email, query) * EMAIL_SIMILARITY_WEIGHT;
    let phone_similarity = similarity(&contact.phone, query) * PHONE_SIMILARITY_WEIGHT;

    let score = name_similarity.max(email_similarity).max(phone_similarity);
    (score, MatchType::Fuzzy)
}

/// Autocomplete candidates for a partially typed query.
///
/// Collects name words and whole emails that start with `query`
/// (case-insensitive) and are strictly longer than it. Duplicates are
/// dropped, first-seen order is kept, and at most `max_suggestions` are
/// returned. Queries shorter than two characters yield nothing.
pub fn suggest(contacts: &[Contact], query: &str, max_suggestions: usize) -> Vec<String> {
    let query_len = query.chars().count();
    if query_len < 2 {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut suggestions: Vec<&str> = Vec::new();

    for contact in contacts {
        for word in WORD_SEPARATOR.split(&contact.name) {
            if is_suggestion(word, &query_lower, query_len) && seen.insert(word) {
                suggestions.push(word);
            }
        }

        let email = contact.email.as_str();
        if is_suggestion(email, &query_lower, query_len) && seen.insert(email) {
            suggestions.push(email);
        }
    }

    suggestions
        .into_iter()
        .take(max_suggestions)
        .map(str::to_string)
        .collect()
}

fn is_suggestion(candidate: &str, query_lower: &str, query_len: usize) -> bool {
    candidate.chars().count() > query_len && candidate.to_lowercase().starts_with(query_lower)
}

fn contains_ignore_case(text: &str, query_lower: &str) -> bool {
    text.to_lowercase().contains(query_lower)
}

fn any_word_starts_with(text: &str, query_lower: &str) -> bool {
    let text_lower = text.to_lowercase();
    WORD_SEPARATOR
        .split(&text_lower)
        .any(|word| word.starts_with(query_lower))
}

/// Normalized similarity, where 1 means identical.
///
/// The edit distance is taken between the lower-cased strings but divided by
/// the longer length *before* lower-casing. For code points whose lower-case
/// form is longer (`İ`) the score can fall below 0. Two empty strings are
/// identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let distance = levenshtein_chars(&a, &b);
    1.0 - (distance as f64 / max_len as f64)
}

/// Levenshtein edit distance between two strings, counted in code points.
///
/// This is case-sensitive; [`similarity`] lower-cases before calling into it.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    levenshtein_chars(&s1_chars, &s2_chars)
}

fn levenshtein_chars(s1: &[char], s2: &[char]) -> usize {
    let len1 = s1.len();
    let len2 = s2.len();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix: Vec<Vec<usize>> = vec![vec![0; len2 + 1]; len1 + 1];

    // Initialize first column
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    // Initialize first row
    for (j, cell) in matrix[0].iter_mut().enumerate() {
        *cell = j;
    }

    for (i, c1) in s1.iter().enumerate() {
        for (j, c2) in s2.iter().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            matrix[i + 1][j + 1] = (matrix[i][j + 1] + 1)
                .min(matrix[i + 1][j] + 1)
                .min(matrix[i][j] + cost);
        }
    }

    matrix[len1][len2]
}
