//! Page window arithmetic for client-side pagination.

use std::ops::Range;

/// Widest page-button strip rendered under a list.
pub const MAX_PAGE_BUTTONS: usize = 7;

/// One page of a list, already clamped to the list bounds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageWindow {
    pub safe_page_index: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub page_size: usize,
    /// Zero-based page indices to render as buttons.
    pub visible_page_buttons: Range<usize>,
}

/// Computes the window for `requested_page_index`.
///
/// Out-of-range requests (negative, or past the last page after a filter or
/// delete shrank the list) clamp to the nearest valid page. A page size of 0
/// is treated as 1. An empty list still has one (empty) page.
pub fn paginate(total_count: usize, page_size: usize, requested_page_index: i64) -> PageWindow {
    let page_size = page_size.max(1);
    let total_pages = total_count.div_ceil(page_size).max(1);
    let last_page = total_pages - 1;
    let safe_page_index = usize::try_from(requested_page_index)
        .unwrap_or(0)
        .min(last_page);
    let start_index = safe_page_index * page_size;
    let end_index = (start_index + page_size).min(total_count);

    PageWindow {
        safe_page_index,
        start_index,
        end_index,
        total_pages,
        total_count,
        page_size,
        visible_page_buttons: page_buttons(safe_page_index, total_pages),
    }
}

fn page_buttons(safe_page_index: usize, total_pages: usize) -> Range<usize> {
    if total_pages <= MAX_PAGE_BUTTONS {
        return 0..total_pages;
    }
    let half = MAX_PAGE_BUTTONS / 2;
    let start = safe_page_index
        .saturating_sub(half)
        .min(total_pages - MAX_PAGE_BUTTONS);
    start..start + MAX_PAGE_BUTTONS
}

impl PageWindow {
    /// The records on this page. `items` should be the list the window was
    /// computed for; a shorter list yields a shorter (possibly empty) slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end_index.min(items.len());
        let start = self.start_index.min(end);
        &items[start..end]
    }

    pub fn has_previous(&self) -> bool {
        self.safe_page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.safe_page_index + 1 < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// "Showing 7 to 12 of 13 results"
    pub fn summary(&self) -> String {
        let first = if self.is_empty() { 0 } else { self.start_index + 1 };
        format!(
            "Showing {} to {} of {} results",
            first, self.end_index, self.total_count
        )
    }

    /// "Page 2 of 3"
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.safe_page_index + 1, self.total_pages)
    }
}
