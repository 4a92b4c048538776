//! Stable ordering of the filtered collection.

use crate::collate;
use crate::model::customer::Customer;
use std::cmp::Ordering;

/// Comparator: zone first (collation order), then signup date ascending.
/// Unknown signup dates order last within their zone.
#[must_use]
pub fn compare(a: &Customer, b: &Customer) -> Ordering {
    collate::compare(&a.zone, &b.zone).then_with(|| a.signup.cmp(&b.signup))
}

/// Return a sorted copy; the input is untouched.
///
/// `sort_by` is stable, so records comparing equal keep their input order and
/// recomputation is deterministic for identical inputs.
#[must_use]
pub fn sorted(customers: &[Customer]) -> Vec<Customer> {
    let mut out = customers.to_vec();
    out.sort_by(compare);
    out
}
