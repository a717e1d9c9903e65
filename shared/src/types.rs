//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 20,
        }
    }
}

impl Pagination {
    /// Row offset for the current page, clamping page 0 to page 1
    pub fn offset(&self) -> i64 {
        let page = self.page.max(1);
        i64::from(page - 1) * i64::from(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(pagination: &Pagination, total_items: u64) -> Self {
        let per_page = pagination.per_page.max(1);
        let total_pages = total_items.div_ceil(u64::from(per_page)) as u32;
        Self {
            page: pagination.page.max(1),
            per_page,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_clamps_page_zero() {
        let p = Pagination {
            page: 0,
            per_page: 20,
        };
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn offset_advances_by_page_size() {
        let p = Pagination {
            page: 3,
            per_page: 25,
        };
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn meta_rounds_total_pages_up() {
        let p = Pagination {
            page: 1,
            per_page: 20,
        };
        let meta = PaginationMeta::new(&p, 41);
        assert_eq!(meta.total_pages, 3);
    }
}
