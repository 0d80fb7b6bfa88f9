//! Page window calculation
//!
//! Maps `(total_items, items_per_page, current_page)` to the page count, a
//! clamped 1-based page and the half-open item range on that page.

use std::ops::Range;

use crate::error::{CarouselError, Result};

/// Derived view of which items sit on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Total number of pages (0 when there are no items)
    pub pages: usize,
    /// Requested page clamped into `1..=max(pages, 1)`
    pub clamped_page: usize,
    /// Item indices on the clamped page
    pub slice: Range<usize>,
}

impl PageWindow {
    /// First item index on the page.
    pub fn start_index(&self) -> usize {
        self.slice.start
    }

    /// One past the last item index on the page.
    pub fn end_index(&self) -> usize {
        self.slice.end
    }

    /// Always `items_per_page` except on a partial last page.
    pub fn items_on_page(&self) -> usize {
        self.slice.len()
    }

    /// Borrow the items of `all` that fall on this page.
    pub fn items<'a, T>(&self, all: &'a [T]) -> &'a [T] {
        let end = self.slice.end.min(all.len());
        let start = self.slice.start.min(end);
        &all[start..end]
    }
}

/// Number of pages needed for `total_items`.
pub fn page_count(total_items: usize, items_per_page: usize) -> Result<usize> {
    if items_per_page == 0 {
        return Err(CarouselError::InvalidConfiguration(
            "items_per_page must be greater than zero".into(),
        ));
    }
    Ok(total_items.div_ceil(items_per_page))
}

/// Clamp a 1-based page into `1..=max(pages, 1)`.
#[inline]
pub fn clamp_page(page: usize, pages: usize) -> usize {
    page.clamp(1, pages.max(1))
}

/// Page count, clamped page and item range for `current_page`.
///
/// Out-of-range pages are clamped rather than rejected; only a zero
/// `items_per_page` is an error.
///
/// ```
/// let w = folio_core::compute_window(10, 4, 99).unwrap();
/// assert_eq!((w.pages, w.clamped_page, w.slice), (3, 3, 8..10));
/// ```
pub fn compute_window(
    total_items: usize,
    items_per_page: usize,
    current_page: usize,
) -> Result<PageWindow> {
    let pages = page_count(total_items, items_per_page)?;
    Ok(window_for(pages, total_items, items_per_page, current_page))
}

/// Window for an already validated, non-zero `items_per_page`.
pub(crate) fn window_for(
    pages: usize,
    total_items: usize,
    items_per_page: usize,
    current_page: usize,
) -> PageWindow {
    let clamped_page = clamp_page(current_page, pages);
    let start = ((clamped_page - 1) * items_per_page).min(total_items);
    let end = (clamped_page * items_per_page).min(total_items);

    PageWindow {
        pages,
        clamped_page,
        slice: start..end,
    }
}
