use serde::Serialize;

/// Restaurants shown per page in the list screen
pub const DEFAULT_PER_PAGE: usize = 20;

/// One page of a result list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_results: usize,
    pub total_pages: usize,
}

/// Slice `items` into 1-based pages
///
/// Page 0 is treated as page 1; a page past the end is empty but still
/// reports the real totals.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_results = items.len();
    let total_pages = total_results.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page);
    let items = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        page,
        per_page,
        total_results,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_partial_page() {
        let page = paginate((0..45).collect::<Vec<_>>(), 3, DEFAULT_PER_PAGE);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![40, 41, 42, 43, 44]);
    }

    #[test]
    fn test_page_zero_is_first_page() {
        let page = paginate((0..5).collect::<Vec<_>>(), 0, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![0, 1]);
    }

    #[test]
    fn test_past_the_end() {
        let page = paginate((0..5).collect::<Vec<_>>(), 9, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.total_results, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_empty_list() {
        let page = paginate(Vec::<u8>::new(), 1, DEFAULT_PER_PAGE);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }
}
