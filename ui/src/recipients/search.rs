use crate::components::validation_patterns::{PageSizeError, PageSizeValidator};
use crate::validation::Validator;
use mailroom_server::api::ApiError;
use mailroom_server::model::{Recipient, UserSearchParams};
use std::time::{Duration, Instant};

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub const EMPTY_QUERY_PROMPT: &str = "Enter a search query to find users";
pub const NO_RESULTS_MESSAGE: &str = "No users found";
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search users";

/// Identity of one search request.
///
/// A response is applied only while its key is still the controller's
/// current key; anything older is stale and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKey {
    pub generation: u64,
    pub query: String,
    pub page: u32,
    pub page_size: u32,
}

impl SearchKey {
    pub fn params(&self) -> UserSearchParams {
        UserSearchParams::for_page(self.query.clone(), self.page, self.page_size)
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub key: SearchKey,
    pub rows: Vec<Recipient>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchState {
    /// No query entered yet; the table shows a prompt
    NotSearched,
    Loading(SearchKey),
    Loaded(SearchPage),
    NoResults,
    Failed(String),
}

/// Debounced, paginated user search.
///
/// Time is passed in explicitly: [`set_query`](Self::set_query) arms the
/// quiet period and [`poll`](Self::poll) fires once it has elapsed. Every
/// change that invalidates the visible page (debounced query, page, page
/// size) bumps the generation, so late responses for earlier keys are
/// ignored. In-flight requests are never cancelled.
#[derive(Debug, Clone)]
pub struct SearchController {
    debounce: Duration,
    input: String,
    deadline: Option<Instant>,
    query: String,
    page: u32,
    page_size: u32,
    generation: u64,
    current_key: Option<SearchKey>,
    state: SearchState,
}

impl SearchController {
    pub fn new(page_size: u32, debounce: Duration) -> Self {
        Self {
            debounce,
            input: String::new(),
            deadline: None,
            query: String::new(),
            page: 0,
            page_size,
            generation: 0,
            current_key: None,
            state: SearchState::NotSearched,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_debouncing(&self) -> bool {
        self.deadline.is_some()
    }

    /// Rows of the visible page; empty unless a page is loaded.
    pub fn rows(&self) -> &[Recipient] {
        match &self.state {
            SearchState::Loaded(page) => &page.rows,
            _ => &[],
        }
    }

    /// Records new input text and restarts the quiet period.
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) {
        self.input = text.into();
        self.deadline = Some(now + self.debounce);
    }

    /// Fires the debounced query once the quiet period has elapsed.
    ///
    /// Returns the request to issue, if any. An empty query issues nothing
    /// and resets the table to its prompt.
    pub fn poll(&mut self, now: Instant) -> Option<SearchKey> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.query = self.input.trim().to_string();
                self.page = 0;
                self.refresh()
            }
            _ => None,
        }
    }

    /// Applies `text` immediately, skipping the quiet period.
    pub fn search_now(&mut self, text: impl Into<String>) -> Option<SearchKey> {
        self.input = text.into();
        self.deadline = None;
        self.query = self.input.trim().to_string();
        self.page = 0;
        self.refresh()
    }

    /// Pages past [`last_page`](Self::last_page) are clamped to it.
    pub fn set_page(&mut self, page: u32) -> Option<SearchKey> {
        let last = self.last_page();
        if page > last {
            log::warn!("Page {page} is past the last addressable page {last}");
        }
        self.page = page.min(last);
        self.refresh()
    }

    /// Highest page whose rows all have an offset representable in the request.
    pub fn last_page(&self) -> u32 {
        (u32::MAX / self.page_size.max(1)).saturating_sub(1)
    }

    pub fn next_page(&mut self) -> Option<SearchKey> {
        if !self.has_next_page() {
            return None;
        }
        self.set_page(self.page + 1)
    }

    pub fn previous_page(&mut self) -> Option<SearchKey> {
        if self.page == 0 {
            return None;
        }
        self.set_page(self.page - 1)
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<Option<SearchKey>, PageSizeError> {
        PageSizeValidator.validate(&page_size)?;
        self.page_size = page_size;
        self.page = 0;
        Ok(self.refresh())
    }

    /// Starts a new generation for the current query, page and size.
    pub fn refresh(&mut self) -> Option<SearchKey> {
        self.generation += 1;

        if self.query.is_empty() {
            self.current_key = None;
            self.state = SearchState::NotSearched;
            return None;
        }

        let key = SearchKey {
            generation: self.generation,
            query: self.query.clone(),
            page: self.page,
            page_size: self.page_size,
        };
        log::debug!(
            "Searching users: query='{}', page={}, size={}, generation={}",
            key.query,
            key.page,
            key.page_size,
            key.generation
        );
        self.current_key = Some(key.clone());
        self.state = SearchState::Loading(key.clone());
        Some(key)
    }

    /// Applies a response; returns `false` when it was stale and dropped.
    pub fn apply_response(
        &mut self,
        key: &SearchKey,
        result: Result<Vec<Recipient>, ApiError>,
    ) -> bool {
        if self.current_key.as_ref() != Some(key) {
            log::debug!(
                "Dropping stale search response for generation {} (current {})",
                key.generation,
                self.generation
            );
            return false;
        }

        self.state = match result {
            Ok(rows) if rows.is_empty() => SearchState::NoResults,
            Ok(rows) => SearchState::Loaded(SearchPage {
                key: key.clone(),
                rows,
            }),
            Err(e) => {
                log::warn!("User search failed: {e}");
                SearchState::Failed(SEARCH_FAILED_MESSAGE.to_string())
            }
        };
        true
    }

    /// Status text shown in place of the table, if any.
    pub fn status_message(&self) -> Option<&str> {
        match &self.state {
            SearchState::NotSearched => Some(EMPTY_QUERY_PROMPT),
            SearchState::NoResults => Some(NO_RESULTS_MESSAGE),
            SearchState::Failed(message) => Some(message.as_str()),
            SearchState::Loading(_) | SearchState::Loaded(_) => None,
        }
    }

    /// A full page may be followed by more rows; a short one ends the results.
    pub fn has_next_page(&self) -> bool {
        match &self.state {
            SearchState::Loaded(page) => {
                page.rows.len() as u32 == page.key.page_size && page.key.page < self.last_page()
            }
            _ => false,
        }
    }

    /// Row range label for the loaded page.
    ///
    /// The endpoint returns no total, so a full page reads
    /// `"21-40 of more than 40"` and a short page reports its last row as
    /// the total.
    pub fn pagination_label(&self) -> Option<String> {
        let SearchState::Loaded(page) = &self.state else {
            return None;
        };
        let page_size = u64::from(page.key.page_size);
        let from = u64::from(page.key.page) * page_size + 1;
        let to = (u64::from(page.key.page) + 1) * page_size;
        let len = page.rows.len() as u64;

        if len < page_size {
            Some(format!("{from}-{to} of {}", from + len - 1))
        } else {
            Some(format!("{from}-{to} of more than {to}"))
        }
    }
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(crate::config::limits::DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE)
    }
}
