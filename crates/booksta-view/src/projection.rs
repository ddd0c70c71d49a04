//! Pure helpers for deriving a visible list from raw state.
//!
//! Nothing here mutates its input. Sorting is always stable so equal keys
//! keep source order.

use std::cmp::Ordering;

/// Case-insensitive substring match of `query` against any haystack.
/// Only the empty query matches everything; whitespace is significant.
pub fn matches_search<'a>(query: &str, haystacks: impl IntoIterator<Item = &'a str>) -> bool {
    let query = query.to_lowercase();
    if query.is_empty() {
        return true;
    }
    haystacks
        .into_iter()
        .any(|haystack| haystack.to_lowercase().contains(&query))
}

/// Inclusive range check. An unset bound is open; a missing value fails
/// any set bound.
pub fn in_range(value: Option<i64>, min: Option<i64>, max: Option<i64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(value) = value else {
        return false;
    };
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Orders prices with missing values last regardless of direction.
pub fn compare_price(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Ascending => a.total_cmp(&b),
            SortDirection::Descending => b.total_cmp(&a),
        },
    }
}

/// Lexicographic, ignoring case.
pub fn compare_title(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Filters then stable-sorts, borrowing from `items`.
pub fn project<'a, E>(
    items: &'a [E],
    mut keep: impl FnMut(&E) -> bool,
    compare: impl Fn(&E, &E) -> Ordering,
) -> Vec<&'a E> {
    let mut visible: Vec<&E> = items.iter().filter(|item| keep(item)).collect();
    visible.sort_by(|a, b| compare(a, b));
    visible
}
