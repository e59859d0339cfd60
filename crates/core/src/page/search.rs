//! Case-insensitive list filter.

use serde::{Deserialize, Serialize};

/// Whether a list item stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Shown,
    Hidden,
}

/// Decide visibility for each item given the search bar contents.
///
/// An item is shown when its text contains the query, ignoring case. An
/// empty query shows everything.
pub fn filter_visibility<S: AsRef<str>>(items: &[S], query: &str) -> Vec<Visibility> {
    let needle = query.to_lowercase();
    items
        .iter()
        .map(|item| {
            if item.as_ref().to_lowercase().contains(&needle) { Visibility::Shown } else { Visibility::Hidden }
        })
        .collect()
}
