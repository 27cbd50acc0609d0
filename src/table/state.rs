//! Sort and pagination state owned by a table engine

use std::fmt;

/// Default page sizes offered by list views
pub const DEFAULT_PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];

/// Default number of rows per page
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Header indicator
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Current sort. A `None` key keeps the supplied order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// Apply a header click: the same key flips direction, a new key starts
    /// ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    pub fn is_sorted_by(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }
}

/// Current page position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number
    pub current_page: usize,
    pub rows_per_page: usize,
}

impl Pagination {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            current_page: 1,
            rows_per_page,
        }
    }

    /// Pull `current_page` back into `[1, total_pages]`
    pub fn clamp(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }
}

/// Number of pages needed for `count` rows; never less than one
pub fn total_pages(count: usize, rows_per_page: usize) -> usize {
    if rows_per_page == 0 {
        return 1;
    }
    count.div_ceil(rows_per_page).max(1)
}

/// Snap a requested page size onto the allowed set: the largest allowed
/// size not above the request, or the smallest allowed size.
pub fn nearest_page_size(allowed: &[usize], requested: usize) -> Option<usize> {
    allowed
        .iter()
        .copied()
        .filter(|&size| size <= requested)
        .max()
        .or_else(|| allowed.iter().copied().min())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_toggle_same_key_flips() {
        let mut sort = SortState::default();
        sort.toggle("amt");
        assert_eq!(sort.key.as_deref(), Some("amt"));
        assert_eq!(sort.direction, SortDirection::Asc);

        sort.toggle("amt");
        assert_eq!(sort.key.as_deref(), Some("amt"));
        assert_eq!(sort.direction, SortDirection::Desc);

        sort.toggle("amt");
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_toggle_new_key_resets_to_asc() {
        let mut sort = SortState::default();
        sort.toggle("amt");
        sort.toggle("amt");
        sort.toggle("name");
        assert_eq!(
            sort,
            SortState {
                key: Some("name".to_string()),
                direction: SortDirection::Asc
            }
        );
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(23, 10), 3);
        assert_eq!(total_pages(23, 25), 1);
    }

    #[test]
    fn test_pagination_clamp() {
        let mut pagination = Pagination::new(10);
        pagination.current_page = 9;
        pagination.clamp(3);
        assert_eq!(pagination.current_page, 3);

        pagination.current_page = 0;
        pagination.clamp(3);
        assert_eq!(pagination.current_page, 1);

        pagination.current_page = 4;
        pagination.clamp(0);
        assert_eq!(pagination.current_page, 1);
    }

    #[test]
    fn test_nearest_page_size() {
        let allowed = [5, 10, 25, 50];
        assert_eq!(nearest_page_size(&allowed, 25), Some(25));
        assert_eq!(nearest_page_size(&allowed, 30), Some(25));
        assert_eq!(nearest_page_size(&allowed, 1000), Some(50));
        assert_eq!(nearest_page_size(&allowed, 2), Some(5));
        assert_eq!(nearest_page_size(&[], 10), None);
    }
}
