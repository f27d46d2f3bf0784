//! Fixed-size page arithmetic over the loaded product sequence.

use std::ops::Range;

/// Products shown per page.
pub const PAGE_SIZE: usize = 10;

/// Index range of 1-based `page` within a sequence of `len` items.
///
/// Clamped to `len`; page 0 and pages past the end are empty.
pub fn page_range(page: usize, page_size: usize, len: usize) -> Range<usize> {
    if page == 0 {
        return 0..0;
    }
    let start = (page - 1).saturating_mul(page_size).min(len);
    let end = page.saturating_mul(page_size).min(len);
    start..end
}

pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    &items[page_range(page, page_size, items.len())]
}

/// Number of non-empty pages.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size)
}
