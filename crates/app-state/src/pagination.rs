//! List pagination controller
//!
//! Infinite scroll, pull-to-refresh, and filter/search composition over a
//! page-fetching collaborator. Marketplace and Wardrobe both drive their
//! lists through [`Paginator`] rather than duplicating the state machine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::async_op::{AsyncController, AsyncState, AsyncStatus, FetchMode, RunOutcome};
use crate::error::ErrorInfo;

/// Page size used across the app's lists
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Search and category filters applied to a list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilters {
    /// Free-text search over item names
    pub search: Option<String>,

    /// Exact category filter
    pub category: Option<String>,
}

impl ListFilters {
    /// Filters with only a search term
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            category: None,
        }
    }
}

/// One page of results from the fetch collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Total number of items matching the filters
    pub total_count: usize,
}

/// The backend collaborator the pagination controller requires
///
/// The real backend is not defined here; anything that can produce pages of
/// items in this shape plugs in.
#[async_trait]
pub trait PageFetcher<T: Clone + Send + Sync>: Send + Sync {
    /// Fetch one page (1-based) of items matching the filters
    async fn fetch_page(&self, filters: &ListFilters, page: u32) -> Result<Page<T>, ErrorInfo>;

    /// Number of items per page
    fn page_size(&self) -> usize {
        DEFAULT_PAGE_SIZE
    }
}

/// Pagination state machine for one list screen
pub struct Paginator<T, F> {
    fetcher: Arc<F>,
    controller: AsyncController<Vec<T>>,
    filters: Mutex<ListFilters>,
}

impl<T, F> Paginator<T, F>
where
    T: Clone + Send + Sync,
    F: PageFetcher<T>,
{
    /// Create a paginator over a fetch collaborator
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            controller: AsyncController::new(),
            filters: Mutex::new(ListFilters::default()),
        }
    }

    /// Snapshot of the list state
    pub fn state(&self) -> AsyncState<Vec<T>> {
        self.controller.state()
    }

    /// Currently applied filters
    pub fn filters(&self) -> ListFilters {
        self.filters.lock().clone()
    }

    /// Mark the owning screen as unmounted
    pub fn detach(&self) {
        self.controller.detach();
    }

    /// First load of page 1
    pub async fn load_initial(&self) -> RunOutcome {
        self.fetch(FetchMode::Initial, 1).await
    }

    /// Pull-to-refresh: re-issue page 1 with current filters, replacing the
    /// result set
    pub async fn refresh(&self) -> RunOutcome {
        self.fetch(FetchMode::Refresh, 1).await
    }

    /// Fetch the next page and append it
    ///
    /// No-op unless the list is in `Success` with more pages available and
    /// nothing already in flight.
    pub async fn load_more(&self) -> RunOutcome {
        let state = self.controller.state();
        if state.status != AsyncStatus::Success || !state.has_more {
            return RunOutcome::Ignored;
        }
        self.fetch(FetchMode::LoadMore, state.page + 1).await
    }

    /// Change the search term; resets to page 1 and refetches
    pub async fn set_search(&self, search: Option<String>) -> RunOutcome {
        self.set_filters(ListFilters {
            search,
            ..self.filters()
        })
        .await
    }

    /// Change the category filter; resets to page 1 and refetches
    pub async fn set_category(&self, category: Option<String>) -> RunOutcome {
        self.set_filters(ListFilters {
            category,
            ..self.filters()
        })
        .await
    }

    /// Replace the filters wholesale
    ///
    /// An unchanged filter set is a no-op. Otherwise accumulated results and
    /// `has_more` are cleared before the new fetch, so result sets from
    /// different filter generations never mix.
    pub async fn set_filters(&self, filters: ListFilters) -> RunOutcome {
        {
            let mut current = self.filters.lock();
            if *current == filters {
                return RunOutcome::Ignored;
            }
            tracing::debug!(?filters, "filters changed, resetting list");
            *current = filters;
        }
        self.controller.hard_reset();
        self.fetch(FetchMode::Initial, 1).await
    }

    async fn fetch(&self, mode: FetchMode, page: u32) -> RunOutcome {
        let filters = self.filters();
        let fetcher = Arc::clone(&self.fetcher);
        let page_size = self.fetcher.page_size();

        self.controller
            .run_with(
                mode,
                async move { fetcher.fetch_page(&filters, page).await },
                move |state, fetched: Page<T>| {
                    apply_page(state, fetched, mode, page, page_size);
                },
            )
            .await
    }
}

/// Fold a fetched page into list state under the controller lock
fn apply_page<T>(
    state: &mut AsyncState<Vec<T>>,
    fetched: Page<T>,
    mode: FetchMode,
    page: u32,
    page_size: usize,
) {
    let fetched_len = fetched.items.len();

    match mode {
        FetchMode::Initial | FetchMode::Refresh => state.data = Some(fetched.items),
        FetchMode::LoadMore => state
            .data
            .get_or_insert_with(Vec::new)
            .extend(fetched.items),
    }
    state.page = page;

    // A page is last when it comes back short, or when the cumulative count
    // reaches the total. Both checks are needed: exact-multiple totals
    // produce a full final page.
    let cumulative = state.data.as_ref().map(Vec::len).unwrap_or(0);
    state.has_more = fetched_len >= page_size && cumulative < fetched.total_count;
}
