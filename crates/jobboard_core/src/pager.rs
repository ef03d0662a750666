use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One-based page cursor over a result list of changing length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    current: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Never less than one, even for an empty list.
    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    /// Pulls the cursor back into range after the list changed size.
    pub fn clamp(&mut self, count: usize) -> bool {
        let clamped = self.current.clamp(1, self.total_pages(count));
        let changed = clamped != self.current;
        self.current = clamped;
        changed
    }

    /// Out-of-range requests are ignored.
    pub fn go_to(&mut self, page: usize, count: usize) -> bool {
        if page < 1 || page > self.total_pages(count) || page == self.current {
            return false;
        }
        self.current = page;
        true
    }

    pub fn next(&mut self, count: usize) -> bool {
        self.go_to(self.current + 1, count)
    }

    pub fn prev(&mut self, count: usize) -> bool {
        match self.current.checked_sub(1) {
            Some(page) => self.go_to(page, count),
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    pub fn range(&self, count: usize) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(count);
        let end = (start + self.page_size).min(count);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}
