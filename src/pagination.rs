//! Pagination

/// Vehicles per listing page.
pub const PAGE_SIZE: usize = 6;

/// One page of a derived list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],

    /// 1-based page number
    pub number: usize,

    /// Number of pages, zero for an empty list
    pub total_pages: usize,

    /// Number of items across all pages
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    /// True if a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// True if a page follows this one.
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// `"Showing k of n vehicles"`
    pub fn summary(&self) -> String {
        format!("Showing {} of {} vehicles", self.items.len(), self.total_items)
    }
}

/// Number of pages needed for `total_items`.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }

    total_items.div_ceil(page_size)
}

/// Slice out page `number` (1-based) of `items`, clamping to the valid range.
pub fn paginate<T>(items: &[T], number: usize, page_size: usize) -> Page<'_, T> {
    let total_pages = total_pages(items.len(), page_size);
    let number = number.clamp(1, total_pages.max(1));
    let start = (number - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: items.get(start..end).unwrap_or_default(),
        number,
        total_pages,
        total_items: items.len(),
    }
}

/// Tracks the current listing page, returning to the first page whenever the criteria it
/// pages over change.
#[derive(Debug, Clone)]
pub struct Pager {
    page: usize,
    page_size: usize,
    revision: u64,
}

impl Pager {
    /// Pager starting on page 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            revision: 0,
        }
    }

    /// Current page number
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Reset to the first page if `revision` differs from the last one seen.
    pub fn observe(&mut self, revision: u64) {
        if revision != self.revision {
            self.revision = revision;
            self.page = 1;
        }
    }

    /// Move forward one page, stopping at the last page.
    pub fn next(&mut self, total_items: usize) {
        self.page = self.clamp(self.page.saturating_add(1), total_items);
    }

    /// Move back one page, stopping at the first.
    pub fn previous(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Jump to `page`, clamped to the pages `total_items` fill.
    pub fn go_to(&mut self, page: usize, total_items: usize) {
        self.page = self.clamp(page, total_items);
    }

    fn clamp(&self, page: usize, total_items: usize) -> usize {
        page.clamp(1, total_pages(total_items, self.page_size).max(1))
    }

    /// Slice the current page out of `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        paginate(items, self.page, self.page_size)
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}
