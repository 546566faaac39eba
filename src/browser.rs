//! The question browser: network operations bound to one session.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use tracing::{info, warn};

use crate::api::QuestionApi;
use crate::error::BrowserError;
use crate::session::{ListFilters, Recommendation, Session};

/// Where a [`Session`] lives.
///
/// The page keeps it in a reactive signal; tests keep it in a plain cell.
/// Access is scoped to a closure so no borrow outlives a network await.
pub trait SessionStore {
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> Result<R, BrowserError>;
    fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Result<R, BrowserError>;
}

impl SessionStore for RwSignal<Session> {
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> Result<R, BrowserError> {
        self.try_with_untracked(f).ok_or(BrowserError::SessionClosed)
    }

    fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Result<R, BrowserError> {
        self.try_update(f).ok_or(BrowserError::SessionClosed)
    }
}

impl SessionStore for Rc<RefCell<Session>> {
    fn read<R>(&self, f: impl FnOnce(&Session) -> R) -> Result<R, BrowserError> {
        Ok(f(&self.borrow()))
    }

    fn write<R>(&self, f: impl FnOnce(&mut Session) -> R) -> Result<R, BrowserError> {
        Ok(f(&mut self.borrow_mut()))
    }
}

#[derive(Debug, Clone)]
pub struct QuestionBrowser<A, S> {
    api: A,
    session: S,
    problem_base: String,
}

impl<A: QuestionApi, S: SessionStore> QuestionBrowser<A, S> {
    pub fn new(api: A, session: S, problem_base: impl Into<String>) -> Self {
        Self {
            api,
            session,
            problem_base: problem_base.into(),
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Load the first page of questions for `company`, replacing the list.
    pub async fn load_questions(&self, company: &str) -> Result<usize, BrowserError> {
        self.load_page(company, None).await
    }

    /// Load a specific page of questions for `company`, replacing the list.
    ///
    /// The session's filters go along when they belong to `company`.
    /// Overlapping loads are not ordered: the last response to arrive wins.
    pub async fn load_page(&self, company: &str, page: Option<u32>) -> Result<usize, BrowserError> {
        let query = self.session.read(|s| s.list_query(company, page))?;
        let listing = self.api.list_questions(company, &query).await.map_err(|e| {
            warn!("Failed to load questions for {}: {}", company, e);
            e
        })?;

        let count = self.session.write(|s| {
            s.replace_questions(company, listing.into_page(), &self.problem_base)
        })?;
        info!("Loaded {} questions for {}", count, company);
        Ok(count)
    }

    /// Replace the filters and reload the first page of `company` with them.
    pub async fn apply_filters(
        &self,
        company: &str,
        filters: ListFilters,
    ) -> Result<usize, BrowserError> {
        self.session.write(|s| s.set_filters(filters))?;
        self.load_page(company, None).await
    }

    /// Flip `id` in the completed set. Returns whether it is now completed.
    pub fn toggle_completion(&self, id: i64) -> Result<bool, BrowserError> {
        self.session.write(|s| s.toggle_completion(id))
    }

    /// Ask the server for the next question given current progress.
    pub async fn get_random_question(&self) -> Result<Recommendation, BrowserError> {
        let request = self.session.read(|s| s.recommend_request())?;
        let result = self.api.recommend(&request).await.map_err(|e| {
            warn!("Failed to get a recommendation: {}", e);
            e
        })?;

        let recommendation = self.session.write(|s| s.apply_recommendation(result))??;
        match &recommendation {
            Recommendation::Completed { .. } => {
                info!("All questions completed, progress cleared")
            }
            Recommendation::Next { name } => info!("Recommended next question: {}", name),
            Recommendation::Notice { message } => info!("Recommendation notice: {}", message),
        }
        Ok(recommendation)
    }

    pub fn reset_progress(&self) -> Result<(), BrowserError> {
        self.session.write(|s| s.reset_progress())?;
        info!("Progress reset");
        Ok(())
    }
}
