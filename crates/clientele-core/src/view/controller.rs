//! View-state controller.
//!
//! [`Roster`] owns the loaded collection and the mutable view parameters, and
//! recomputes a [`ViewSnapshot`] wholesale after every action, so an observer
//! never sees a half-updated view. Invariant after every transition:
//! `1 <= page <= total_pages` for the current filtered result.

use crate::model::customer::Customer;
use crate::source::LoadOutcome;
use crate::view::filter::{FilterState, ZoneFilter};
use crate::view::{page, sort, zones};
use std::num::NonZeroUsize;

/// What the presentation layer should show for the current view.
///
/// `NoMatches` is a valid, non-error state: the collection loaded fine but
/// zero records pass the current filters (or the collection itself is empty).
/// It requires its own user-visible message, never a silently blank table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// No data yet: the initial load (or a reload) is in flight.
    Loading,
    /// The last load attempt failed; recoverable only by another load.
    Failed(String),
    /// Loaded, but nothing passes the current filters.
    NoMatches,
    /// Loaded with at least one matching record.
    Ready,
}

/// The fully recomputed derived view, replaced as a unit on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    /// Distinct zones in the collection, collation-sorted ("" = unspecified).
    pub zones: Vec<String>,
    /// All records passing the filters, in display order.
    pub matches: Vec<Customer>,
    /// Page count for `matches`; at least 1.
    pub total_pages: usize,
    /// Current 1-based page, already clamped.
    pub page: usize,
    /// The records of the current page (at most one page size worth).
    pub page_items: Vec<Customer>,
    /// What the presentation layer should show.
    pub status: ViewStatus,
}

/// Ties a load completion to the request that started it.
///
/// `finish_load` only applies an outcome whose ticket is still current, so a
/// superseded late response can never overwrite a newer load's result.
#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadPhase {
    Loading,
    Ready,
    Failed(String),
}

/// The customer roster and its view parameters.
pub struct Roster {
    customers: Vec<Customer>,
    filter: FilterState,
    page: usize,
    page_size: NonZeroUsize,
    phase: LoadPhase,
    load_generation: u64,
    view: ViewSnapshot,
}

impl Roster {
    /// A roster with no data yet, reporting [`ViewStatus::Loading`].
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        let mut roster = Self {
            customers: Vec::new(),
            filter: FilterState::default(),
            page: 1,
            page_size,
            phase: LoadPhase::Loading,
            load_generation: 0,
            view: ViewSnapshot {
                zones: Vec::new(),
                matches: Vec::new(),
                total_pages: 1,
                page: 1,
                page_items: Vec::new(),
                status: ViewStatus::Loading,
            },
        };
        roster.refresh();
        roster
    }

    /// The current derived view.
    #[must_use]
    pub const fn view(&self) -> &ViewSnapshot {
        &self.view
    }

    /// The active filter criteria.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// Start a load, returning the ticket the completion must present.
    /// Any outcome for an earlier ticket becomes stale immediately.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.phase = LoadPhase::Loading;
        self.refresh();
        LoadTicket {
            generation: self.load_generation,
        }
    }

    /// Apply a load outcome.
    ///
    /// Success replaces the collection wholesale and resets to page 1 (the
    /// page count may have changed; the old index is meaningless). Failure
    /// keeps the previous collection untouched. A stale ticket is ignored and
    /// `false` is returned.
    pub fn finish_load(&mut self, ticket: LoadTicket, outcome: LoadOutcome) -> bool {
        if ticket.generation != self.load_generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.load_generation,
                "ignoring superseded load result"
            );
            return false;
        }
        match outcome {
            Ok(customers) => {
                tracing::debug!(count = customers.len(), "customer collection replaced");
                self.customers = customers;
                self.phase = LoadPhase::Ready;
                self.page = 1;
            }
            Err(err) => {
                tracing::warn!(error = %err, "customer load failed");
                self.phase = LoadPhase::Failed(err.to_string());
            }
        }
        self.refresh();
        true
    }

    /// Select a zone (or all zones). Always resets to page 1: the previous
    /// page index is meaningless against a new result set.
    pub fn set_zone(&mut self, zone: ZoneFilter) {
        self.filter.zone = zone;
        self.page = 1;
        self.refresh();
    }

    /// Replace the search text. Always resets to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.page = 1;
        self.refresh();
    }

    /// Advance one page, saturating at the last page.
    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
        self.refresh();
    }

    /// Go back one page, saturating at page 1.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
        self.refresh();
    }

    /// Jump to a specific page, clamped into range.
    pub fn set_page(&mut self, requested: usize) {
        self.page = requested;
        self.refresh();
    }

    /// Drop all filter criteria, back to page 1.
    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        self.page = 1;
        self.refresh();
    }

    /// Recompute the derived view from the collection and view parameters.
    /// Also where the page-bounds invariant is enforced.
    fn refresh(&mut self) {
        let zones = zones::zone_index(&self.customers);
        let matches = sort::sorted(&self.filter.apply(&self.customers));
        let total_pages = page::total_pages(matches.len(), self.page_size);
        self.page = page::clamp(self.page, total_pages);
        let page_items = page::slice(&matches, self.page_size, self.page).to_vec();
        let status = match &self.phase {
            LoadPhase::Loading => ViewStatus::Loading,
            LoadPhase::Failed(reason) => ViewStatus::Failed(reason.clone()),
            LoadPhase::Ready if matches.is_empty() => ViewStatus::NoMatches,
            LoadPhase::Ready => ViewStatus::Ready,
        };
        self.view = ViewSnapshot {
            zones,
            matches,
            total_pages,
            page: self.page,
            page_items,
            status,
        };
    }
}
