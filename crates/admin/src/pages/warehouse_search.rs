//! Incremental warehouse loader behind the warehouse choice list.

use crate::components::Choice;
use crate::saleor::{Page, WarehouseRef};

/// Search query, loaded results and pagination state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarehouseSearch {
    query: String,
    results: Vec<WarehouseRef>,
    end_cursor: Option<String>,
    has_more: bool,
    loading: bool,
}

impl WarehouseSearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a "load more" request may start now.
    #[must_use]
    pub const fn can_fetch_more(&self) -> bool {
        self.has_more && !self.loading
    }

    /// Start a new search, dropping loaded results.
    pub fn begin_search(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.results.clear();
        self.end_cursor = None;
        self.has_more = false;
        self.loading = true;
    }

    /// Start loading the next page; returns the cursor to request after.
    ///
    /// Returns `None` while a request is already in flight or when there is
    /// nothing more to load.
    pub fn begin_fetch_more(&mut self) -> Option<Option<String>> {
        if !self.can_fetch_more() {
            return None;
        }
        self.loading = true;
        Some(self.end_cursor.clone())
    }

    /// Append a loaded page.
    pub fn finish(&mut self, page: Page<WarehouseRef>) {
        for warehouse in page.items {
            if !self.results.iter().any(|w| w.id == warehouse.id) {
                self.results.push(warehouse);
            }
        }
        self.end_cursor = page.page_info.end_cursor;
        self.has_more = page.page_info.has_next_page;
        self.loading = false;
    }

    /// The request failed; allow another attempt.
    pub fn fail(&mut self) {
        self.loading = false;
    }

    /// Put a warehouse at the top of the results (e.g., one just created).
    pub fn insert_first(&mut self, warehouse: WarehouseRef) {
        self.results.retain(|w| w.id != warehouse.id);
        self.results.insert(0, warehouse);
    }

    /// Loaded warehouses as choices, in load order.
    #[must_use]
    pub fn choices(&self) -> Vec<Choice> {
        self.results
            .iter()
            .map(|w| Choice::new(w.name.clone(), w.id.to_string()))
            .collect()
    }
}
