/// Paginated response wrapper
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// An empty page. Used when no customer is authenticated: an empty
    /// listing is a valid result, not an error.
    pub fn empty(page: u32, limit: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            limit,
            total_pages: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let result = PaginatedResult::new(vec![1, 2, 3], 41, 1, 20);
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn empty_page_has_no_items() {
        let result: PaginatedResult<i32> = PaginatedResult::empty(1, 20);
        assert!(result.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 0);
    }
}
