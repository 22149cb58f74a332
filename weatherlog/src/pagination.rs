use crate::model::Pagination;

/// Rows per page shown by the log page.
pub const DEFAULT_PAGE_SIZE: i64 = 96;

/// Reads the raw `page` query value. Anything that is not an integer is
/// treated as absent.
pub fn parse_page(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

impl Pagination {
    /// Resolves the requested page against the table size.
    ///
    /// The request is clamped into `[1, pages]`. An empty table has zero
    /// pages and resolves to page 0 with nothing to fetch.
    pub fn resolve(total: i64, page_size: i64, requested: Option<i64>) -> Self {
        let page_size = page_size.max(1);
        let total = total.max(0);
        let pages = total / page_size + i64::from(total % page_size != 0);

        let page = if pages == 0 {
            0
        } else {
            requested.unwrap_or(1).clamp(1, pages)
        };

        let offset = (page - 1).max(0) * page_size;
        let (first_index, last_index) = if page == 0 {
            (0, 0)
        } else {
            (offset + 1, (page * page_size).min(total))
        };

        Pagination {
            page,
            pages,
            total,
            page_size,
            offset,
            first_index,
            last_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pages == 0
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// Number of rows the page query may return.
    pub fn limit(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.page_size
        }
    }
}
