//! Client-side destination search.
//!
//! The full list is fetched once (ordered by rating) and filtered locally as
//! the user types. Matching is a case-insensitive substring test against the
//! name, or the location when one is set.

use crate::model::Destination;

/// Whether `destination` matches `query`. An empty query matches everything.
#[must_use]
pub fn matches(destination: &Destination, query: &str) -> bool {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    destination.name.to_lowercase().contains(&needle)
        || destination
            .location
            .as_deref()
            .is_some_and(|location| location.to_lowercase().contains(&needle))
}

/// Keep the destinations matching `query`, preserving order.
#[must_use]
pub fn filter_destinations<'a, I>(destinations: I, query: &str) -> Vec<Destination>
where
    I: IntoIterator<Item = &'a Destination>,
{
    destinations
        .into_iter()
        .filter(|d| matches(d, query))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
