//! Fuzzy search tools.
//!
//! Loads the current contact list, narrows it by tag and hands it to the
//! matching engine. Nothing is cached between calls; every query sees the
//! store as it is.

use crate::error::StoreResult;
use crate::matching::{highlight_matches, rank, suggest, MatchType, SearchOptions};
use crate::models::Contact;
use crate::observability::{MetricsTracker, Timer};
use crate::repositories::ContactRepository;
use serde::Serialize;
use std::sync::Arc;

/// Parameters for a contact search.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    /// Free-text query; blank returns every contact
    pub query: String,

    /// Tag ids; when non-empty only contacts carrying at least one are searched
    pub tags: Vec<String>,

    /// Override for the configured result cap
    pub max_results: Option<usize>,
}

/// One ranked contact.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub contact: Contact,
    pub score: f64,
    pub match_type: MatchType,

    /// Contact name with query occurrences wrapped in `<mark>`
    pub highlighted_name: String,
}

/// Response from a contact search.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,

    /// Number of contacts considered after tag filtering
    pub searched: usize,

    pub results: Vec<SearchHit>,
}

/// Keep the contacts carrying any of `tags`; an empty filter keeps everything.
pub fn filter_by_tags(contacts: Vec<Contact>, tags: &[String]) -> Vec<Contact> {
    if tags.is_empty() {
        return contacts;
    }
    contacts.into_iter().filter(|c| c.has_any_tag(tags)).collect()
}

/// Search tools backed by a contact repository.
#[derive(Clone)]
pub struct SearchTools {
    contact_repo: Arc<dyn ContactRepository>,
    options: SearchOptions,
    max_suggestions: usize,
    metrics: MetricsTracker,
}

impl SearchTools {
    /// Create new search tools.
    ///
    /// # Arguments
    /// * `contact_repo` - ContactRepository for contact data access
    /// * `options` - Default threshold, cap and prefix preference
    /// * `max_suggestions` - Cap for [`SearchTools::suggest`]
    /// * `metrics` - Shared tracker that records each query
    pub fn new(
        contact_repo: Arc<dyn ContactRepository>,
        options: SearchOptions,
        max_suggestions: usize,
        metrics: MetricsTracker,
    ) -> Self {
        Self {
            contact_repo,
            options,
            max_suggestions,
            metrics,
        }
    }

    /// The default search options.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Search contacts, best match first.
    pub async fn search_contacts(&self, params: SearchParams) -> StoreResult<SearchResponse> {
        let timer = Timer::new("search_contacts");

        let contacts = filter_by_tags(self.contact_repo.list().await?, &params.tags);
        let mut options = self.options;
        if let Some(max_results) = params.max_results {
            options.max_results = max_results;
        }

        let query = params.query.trim();
        let results: Vec<SearchHit> = rank(&contacts, query, &options)
            .into_iter()
            .map(|result| SearchHit {
                highlighted_name: highlight_matches(&result.contact.name, query),
                contact: result.contact.clone(),
                score: result.score,
                match_type: result.match_type,
            })
            .collect();

        self.metrics.track_search_query(timer.finish(), results.len());

        Ok(SearchResponse {
            query: query.to_string(),
            searched: contacts.len(),
            results,
        })
    }

    /// Type-ahead suggestions for `query`.
    pub async fn suggest(&self, query: &str) -> StoreResult<Vec<String>> {
        let timer = Timer::new("suggest_contacts");

        let contacts = self.contact_repo.list().await?;
        let suggestions = suggest(&contacts, query, self.max_suggestions);

        self.metrics
            .track_search_query(timer.finish(), suggestions.len());
        Ok(suggestions)
    }
}
