//! Zone and free-text filtering.

use crate::model::customer::Customer;

/// Zone selection: everything, or one exact zone value.
///
/// The empty string is a legitimate zone value (records with no zone), so
/// "all" is a distinct variant rather than a sentinel string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ZoneFilter {
    #[default]
    All,
    Zone(String),
}

impl ZoneFilter {
    /// Returns `true` if the given (already trimmed) zone passes the filter.
    /// Exact, case-sensitive comparison.
    #[must_use]
    pub fn matches(&self, zone: &str) -> bool {
        match self {
            Self::All => true,
            Self::Zone(selected) => selected == zone,
        }
    }

    /// Returns `true` when no specific zone is selected.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Filter criteria applied to the customer collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Zone selection (exact match when active).
    pub zone: ZoneFilter,
    /// Free-text query; case-insensitive substring over name or email.
    pub search: String,
}

impl FilterState {
    /// Returns `true` if no filter criteria are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zone.is_all() && self.search.trim().is_empty()
    }

    /// Returns `true` if the customer satisfies all active criteria.
    #[must_use]
    pub fn matches(&self, customer: &Customer) -> bool {
        if !self.zone.matches(&customer.zone) {
            return false;
        }
        let needle = self.search.trim();
        if !needle.is_empty() {
            let needle = needle.to_lowercase();
            if !customer.full_name.to_lowercase().contains(&needle)
                && !customer.email.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// Apply this filter, preserving the input's relative order.
    #[must_use]
    pub fn apply(&self, customers: &[Customer]) -> Vec<Customer> {
        customers
            .iter()
            .filter(|customer| self.matches(customer))
            .cloned()
            .collect()
    }
}
