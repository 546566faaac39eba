//! In-memory browsing session.
//!
//! Holds the completed question ids and the currently rendered list. Nothing
//! here touches the network or the DOM, so the page and the tests drive the
//! same state transitions.

use tracing::debug;

use crate::api::{ListQuery, QuestionPage, RecommendRequest, RecommendationResult};
use crate::error::BrowserError;

/// Message the server sends once every question has been completed.
pub const COMPLETION_MESSAGE: &str = "Good job!";

/// Question ids marked complete, in the order they were toggled on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedSet {
    ids: Vec<i64>,
}

impl CompletedSet {
    /// Add `id` if absent, remove it if present. Returns whether it is now present.
    pub fn toggle(&mut self, id: i64) -> bool {
        if self.contains(id) {
            self.ids.retain(|&item| item != id);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Turn a question name into its problem page slug.
///
/// Each whitespace run becomes a single `-` and the result is lowercased.
/// Nothing else is escaped.
pub fn problem_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    slug
}

/// Link to the external problem page for `name`, including the trailing slash.
pub fn problem_url(problem_base: &str, name: &str) -> String {
    format!(
        "{}/{}/",
        problem_base.trim_end_matches('/'),
        problem_slug(name)
    )
}

/// One rendered row of the question list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEntry {
    pub id: i64,
    pub name: String,
    pub href: String,
    pub difficulty: Option<String>,
    pub tags: Vec<String>,
}

/// Filters typed by the user, kept as entered.
///
/// They belong to the company currently shown and are cleared when another
/// company's list replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilters {
    /// Substring of the name or the id.
    pub search: String,
    /// Comma-separated tags; an entry must carry all of them.
    pub tag: String,
    /// Comma-separated difficulties; an entry must match one of them.
    pub difficulty: String,
}

fn split_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Comma list with blanks dropped, case kept for the server's exact match.
fn join_terms(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

impl ListFilters {
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && split_terms(&self.tag).is_empty()
            && split_terms(&self.difficulty).is_empty()
    }

    pub fn matches(&self, entry: &QuestionEntry) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty()
            && !entry.name.to_lowercase().contains(&search)
            && !entry.id.to_string().contains(&search)
        {
            return false;
        }

        let tags = split_terms(&self.tag);
        if !tags
            .iter()
            .all(|t| entry.tags.iter().any(|et| et.to_lowercase() == *t))
        {
            return false;
        }

        let difficulties = split_terms(&self.difficulty);
        difficulties.is_empty()
            || entry
                .difficulty
                .as_deref()
                .map(|d| difficulties.contains(&d.to_lowercase()))
                .unwrap_or(false)
    }
}

/// What the user is told after asking for a recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    /// No questions remain; progress was cleared.
    Completed { message: String },
    /// The server suggested this question next.
    Next { name: String },
    /// A message that is not the completion sentinel.
    Notice { message: String },
}

impl Recommendation {
    pub fn notification_text(&self) -> String {
        match self {
            Recommendation::Completed { message } => message.clone(),
            Recommendation::Next { name } => format!("Try this one next: {}", name),
            Recommendation::Notice { message } => message.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    completed: CompletedSet,
    entries: Vec<QuestionEntry>,
    company: Option<String>,
    current_page: u32,
    total_pages: u32,
    filters: ListFilters,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // -- List --

    /// Replace the rendered list with `page`. Completed ids are kept; filters
    /// are dropped when the list belongs to a different company.
    pub fn replace_questions(
        &mut self,
        company: &str,
        page: QuestionPage,
        problem_base: &str,
    ) -> usize {
        if !self.filters_apply_to(company) {
            self.filters = ListFilters::default();
        }
        self.entries = page
            .questions
            .into_iter()
            .map(|q| QuestionEntry {
                href: problem_url(problem_base, &q.name),
                id: q.id,
                name: q.name,
                difficulty: q.difficulty,
                tags: q.tags,
            })
            .collect();
        self.company = Some(company.to_string());
        self.current_page = page.current_page;
        self.total_pages = page.total_pages;
        debug!(
            "Rendered {} questions for {} (page {}/{})",
            self.entries.len(),
            company,
            self.current_page,
            self.total_pages
        );
        self.entries.len()
    }

    pub fn is_loaded(&self) -> bool {
        self.company.is_some()
    }

    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn entries(&self) -> &[QuestionEntry] {
        &self.entries
    }

    /// Current page and page count, once a list has been loaded.
    pub fn page_info(&self) -> Option<(u32, u32)> {
        self.is_loaded()
            .then_some((self.current_page, self.total_pages))
    }

    // -- Filters --

    /// Filters set before the first load carry over to it.
    fn filters_apply_to(&self, company: &str) -> bool {
        self.company.as_deref().map_or(true, |c| c == company)
    }

    pub fn filters(&self) -> &ListFilters {
        &self.filters
    }

    /// Set the name/number search, leaving the other filters alone.
    pub fn set_filter(&mut self, query: &str) {
        self.filters.search = query.to_string();
    }

    pub fn set_filters(&mut self, filters: ListFilters) {
        self.filters = filters;
    }

    /// Query parameters for fetching `page` of `company` under the current filters.
    pub fn list_query(&self, company: &str, page: Option<u32>) -> ListQuery {
        let mut query = ListQuery {
            page,
            ..Default::default()
        };
        if self.filters_apply_to(company) {
            query.search = self.filters.search.trim().to_lowercase();
            query.tag = join_terms(&self.filters.tag);
            query.difficulty = join_terms(&self.filters.difficulty);
        }
        query
    }

    /// Loaded entries that pass the filters.
    ///
    /// Servers that ignore the filter parameters get the same result locally.
    pub fn visible_entries(&self) -> Vec<QuestionEntry> {
        if self.filters.is_empty() {
            return self.entries.clone();
        }
        self.entries
            .iter()
            .filter(|e| self.filters.matches(e))
            .cloned()
            .collect()
    }

    // -- Progress --

    pub fn completed(&self) -> &CompletedSet {
        &self.completed
    }

    pub fn is_completed(&self, id: i64) -> bool {
        self.completed.contains(id)
    }

    pub fn toggle_completion(&mut self, id: i64) -> bool {
        self.completed.toggle(id)
    }

    pub fn reset_progress(&mut self) {
        self.completed.clear();
    }

    pub fn recommend_request(&self) -> RecommendRequest {
        RecommendRequest {
            completed_ids: self.completed.ids().to_vec(),
        }
    }

    /// Interpret a recommendation; the completion sentinel clears progress.
    pub fn apply_recommendation(
        &mut self,
        result: RecommendationResult,
    ) -> Result<Recommendation, BrowserError> {
        match result {
            RecommendationResult {
                message: Some(message),
                ..
            } if message == COMPLETION_MESSAGE => {
                self.reset_progress();
                Ok(Recommendation::Completed { message })
            }
            RecommendationResult {
                name: Some(name), ..
            } => Ok(Recommendation::Next { name }),
            RecommendationResult {
                message: Some(message),
                name: None,
            } => Ok(Recommendation::Notice { message }),
            RecommendationResult {
                message: None,
                name: None,
            } => Err(BrowserError::Decode(
                "recommendation has neither a name nor a message".to_string(),
            )),
        }
    }
}
