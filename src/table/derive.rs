//! Pure filter, sort, and paginate steps
//!
//! Each step works on indices into the caller's row slice, so a derived
//! view is always a subset of the input rows by identity.

use super::row::Row;
use super::state::{total_pages, SortDirection, SortState};
use super::value::compare_values;
use std::cmp::Ordering;
use std::ops::Range;

/// Indices of the rows where some non-null field contains `term`,
/// case-insensitively. An empty term keeps every row in order.
pub fn filter_indices(rows: &[Row], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return (0..rows.len()).collect();
    }

    let needle = term.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row_matches(row, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// `needle` must already be lowercase
fn row_matches(row: &Row, needle: &str) -> bool {
    row.values()
        .filter_map(|value| value.search_text())
        .any(|text| text.to_lowercase().contains(needle))
}

/// Stable sort of `indices` by the sort key. Nulls always go last, in
/// either direction.
pub fn sort_indices(rows: &[Row], indices: &mut [usize], sort: &SortState) {
    let Some(key) = sort.key.as_deref() else {
        return;
    };

    indices.sort_by(|&a, &b| compare_rows(&rows[a], &rows[b], key, sort.direction));
}

fn compare_rows(a: &Row, b: &Row, key: &str, direction: SortDirection) -> Ordering {
    let (left, right) = (a.get(key), b.get(key));

    match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = compare_values(left, right);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

/// Where the current page sits inside the filtered, sorted rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBounds {
    /// Slice of the filtered rows shown on the page
    pub slice: Range<usize>,
    pub total_pages: usize,
    /// 1-based page number after clamping
    pub current_page: usize,
    /// 1-based inclusive display bounds, both 0 when nothing matched
    pub range_start: usize,
    pub range_end: usize,
}

/// Compute the page slice for `count` rows. `rows_per_page = None` means a
/// single unbounded page. The requested page is clamped.
pub fn paginate(count: usize, current_page: usize, rows_per_page: Option<usize>) -> PageBounds {
    let per_page = rows_per_page.unwrap_or(count).max(1);
    let total_pages = total_pages(count, per_page);
    let current_page = current_page.clamp(1, total_pages);

    let start = ((current_page - 1) * per_page).min(count);
    let end = (current_page * per_page).min(count);

    let (range_start, range_end) = if start < end {
        (start + 1, end)
    } else {
        (0, 0)
    };

    PageBounds {
        slice: start..end,
        total_pages,
        current_page,
        range_start,
        range_end,
    }
}
