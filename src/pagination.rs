//! This modules defines the common functionality for paging data.

use serde::{Deserialize, Serialize};

/// The number of transactions shown per page when `config.json` does not say otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 7;

/// One page of a larger list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The 1-based page number actually shown, after clamping.
    pub page: usize,
    /// Always at least 1, even when there are no items.
    pub total_pages: usize,
    /// The number of items across all pages.
    pub total_items: usize,
}

/// Slices `data` into the requested page.
///
/// `total_pages` is `ceil(len / page_size)` but never less than 1. The requested `page` is clamped
/// into `[1, total_pages]` before slicing, so asking for page 0, a negative page or a page past the
/// end shows the first or last page instead of nothing. A `page_size` of 0 is treated as 1.
pub fn paginate<T: Clone>(data: &[T], page: i64, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = data.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = usize::try_from(page.max(1))
        .unwrap_or(usize::MAX)
        .min(total_pages);
    let start = (page - 1) * page_size;
    let items = data.iter().skip(start).take(page_size).cloned().collect();
    Page {
        items,
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_has_one_page() {
        let data: Vec<u32> = Vec::new();
        let got = paginate(&data, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(got.total_pages, 1);
        assert_eq!(got.page, 1);
        assert!(got.items.is_empty());
    }

    #[test]
    fn splits_into_pages() {
        let data: Vec<u32> = (1..=15).collect();
        let first = paginate(&data, 1, 7);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items, vec![1, 2, 3, 4, 5, 6, 7]);

        let last = paginate(&data, 3, 7);
        assert_eq!(last.items, vec![15]);
        assert_eq!(last.total_items, 15);
    }

    #[test]
    fn exact_multiple_has_no_empty_trailing_page() {
        let data: Vec<u32> = (1..=14).collect();
        assert_eq!(paginate(&data, 1, 7).total_pages, 2);
    }

    #[test]
    fn clamps_requested_page() {
        let data: Vec<u32> = (1..=10).collect();
        let past_end = paginate(&data, 99, 7);
        assert_eq!(past_end.page, 2);
        assert_eq!(past_end.items, vec![8, 9, 10]);

        let before_start = paginate(&data, -4, 7);
        assert_eq!(before_start.page, 1);
        assert_eq!(before_start.items.len(), 7);

        let zero = paginate(&data, 0, 7);
        assert_eq!(zero.page, 1);
    }

    #[test]
    fn total_pages_is_at_least_one_for_any_size() {
        for len in 0..30usize {
            let data: Vec<usize> = (0..len).collect();
            for size in 0..10usize {
                let got = paginate(&data, 1, size);
                assert!(got.total_pages >= 1);
                assert!(got.items.len() <= size.max(1));
            }
        }
    }
}
