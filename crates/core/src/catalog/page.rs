//! Page slicing and pager link windows.

use std::num::NonZeroUsize;

use crate::types::Product;

/// Products per page on the shop listing.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(9) {
    Some(size) => size,
    None => unreachable!(),
};

/// Number of pages needed for `count` items. Zero items need zero pages.
#[must_use]
pub const fn total_pages(count: usize, page_size: NonZeroUsize) -> usize {
    count.div_ceil(page_size.get())
}

/// One page of an ordered product list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'s, 'a> {
    /// Products on this page.
    pub items: &'s [&'a Product],
    /// 1-based page number actually shown.
    pub number: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Number of products across all pages.
    pub total_count: usize,
}

impl Page<'_, '_> {
    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1 && self.total_pages > 0
    }
}

/// Slice out page `page_number` (1-based).
///
/// Page 0 is treated as page 1. A page past the end yields no items.
#[must_use]
pub fn paginate<'s, 'a>(
    sorted: &'s [&'a Product],
    page_number: usize,
    page_size: NonZeroUsize,
) -> Page<'s, 'a> {
    let number = page_number.max(1);
    let size = page_size.get();
    let start = (number - 1).saturating_mul(size);
    let end = start.saturating_add(size).min(sorted.len());
    let items = sorted.get(start..end).unwrap_or_default();

    Page {
        items,
        number,
        total_pages: total_pages(sorted.len(), page_size),
        total_count: sorted.len(),
    }
}

/// Pager links around `current`: first two pages, a window of two before
/// and four after the current page, and the last two pages. `None` marks
/// a gap.
#[must_use]
pub fn page_links(total_pages: usize, current: usize) -> Vec<Option<usize>> {
    window(total_pages, current.max(1), 2, 2, 4, 2)
}

fn window(
    last_page: usize,
    current: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    if last_page == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, last_page);
    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current.saturating_sub(left_current));
    let mid_end = current
        .saturating_add(right_current)
        .saturating_add(1)
        .min(last_page + 1);
    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);
    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}
