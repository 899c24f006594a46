//! Page window and page count arithmetic for crew member listings

use serde::{Deserialize, Serialize};

/// Offset/limit slice applied to an ordered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

/// Paging parameters as received from the caller
///
/// Either value may be absent or non-positive; the window is only applied
/// when both are positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageRequest {
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self { page, page_size }
    }

    /// No paging requested
    pub fn unpaged() -> Self {
        Self::default()
    }

    /// The slice to fetch, or `None` for the whole set
    pub fn window(&self) -> Option<PageWindow> {
        match (self.page, self.page_size) {
            (Some(page), Some(size)) if page > 0 && size > 0 => {
                let page = page as u64;
                let size = size as u64;
                Some(PageWindow {
                    offset: (page - 1).saturating_mul(size),
                    limit: size,
                })
            }
            _ => None,
        }
    }

    /// Number of pages needed to show `total` items
    ///
    /// Divides by the page size when one was given, otherwise by the total
    /// itself. A zero divisor yields zero pages.
    pub fn total_pages(&self, total: u64) -> u64 {
        let divisor = match self.page_size {
            Some(size) if size > 0 => size as u64,
            _ => total,
        };

        if divisor == 0 {
            0
        } else {
            total.div_ceil(divisor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unpaged_has_no_window() {
        assert_eq!(PageRequest::unpaged().window(), None);
        assert_eq!(PageRequest::new(Some(1), None).window(), None);
        assert_eq!(PageRequest::new(None, Some(5)).window(), None);
    }

    #[test]
    fn test_non_positive_values_disable_window() {
        assert_eq!(PageRequest::new(Some(0), Some(2)).window(), None);
        assert_eq!(PageRequest::new(Some(2), Some(-1)).window(), None);
    }

    #[test]
    fn test_window_offsets() {
        assert_eq!(
            PageRequest::new(Some(2), Some(2)).window(),
            Some(PageWindow { offset: 2, limit: 2 })
        );
        assert_eq!(
            PageRequest::new(Some(1), Some(10)).window(),
            Some(PageWindow { offset: 0, limit: 10 })
        );
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(PageRequest::unpaged().total_pages(7), 1);
        assert_eq!(PageRequest::unpaged().total_pages(0), 0);
        assert_eq!(PageRequest::new(Some(2), Some(2)).total_pages(7), 4);
        assert_eq!(PageRequest::new(None, Some(3)).total_pages(0), 0);
        assert_eq!(PageRequest::new(Some(1), Some(0)).total_pages(7), 1);
    }

    proptest! {
        #[test]
        fn prop_pages_cover_total(total in 0u64..10_000, size in 1i64..500) {
            let request = PageRequest::new(Some(1), Some(size));
            let pages = request.total_pages(total);
            let size = size as u64;
            prop_assert!(pages * size >= total);
            prop_assert!(pages == 0 || (pages - 1) * size < total);
        }

        #[test]
        fn prop_window_starts_at_previous_pages(page in 1i64..1_000, size in 1i64..1_000) {
            let window = PageRequest::new(Some(page), Some(size)).window().unwrap();
            prop_assert_eq!(window.offset, (page as u64 - 1) * size as u64);
            prop_assert_eq!(window.limit, size as u64);
        }
    }
}
