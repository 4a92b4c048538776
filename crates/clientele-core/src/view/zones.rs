//! Distinct zone index for the zone selector.

use crate::collate;
use crate::model::customer::Customer;

/// Distinct zone values present in the collection, in collation order.
///
/// The empty string stays in as the "unspecified" entry when any record has no
/// zone; how to label it is the presentation layer's call.
#[must_use]
pub fn zone_index(customers: &[Customer]) -> Vec<String> {
    let mut zones: Vec<String> = customers.iter().map(|c| c.zone.clone()).collect();
    zones.sort_by(|a, b| collate::compare(a, b));
    zones.dedup();
    zones
}
