use std::num::NonZeroUsize;

pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(size) => size,
    None => unreachable!(),
};

/// One page of a filtered set. `first_index`/`last_index` are the
/// zero-based half-open bounds of `items` within the full set.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<T> {
    pub items: Vec<T>,
    pub page_size: NonZeroUsize,
    pub current_page: usize,
    pub first_index: usize,
    pub last_index: usize,
    pub total_pages: usize,
}

impl<T> PageWindow<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1 && self.current_page <= self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.current_page >= 1 && self.current_page < self.total_pages
    }
}

pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Slices page `page` (1-indexed) out of `items`. Out-of-range pages yield
/// an empty window; callers clamp before asking.
pub fn paginate<T: Clone>(items: &[T], page_size: NonZeroUsize, page: usize) -> PageWindow<T> {
    let total_pages = total_pages(items.len(), page_size);
    let (first_index, last_index) = if page == 0 || page > total_pages {
        (0, 0)
    } else {
        let first = (page - 1) * page_size.get();
        let last = (first + page_size.get()).min(items.len());
        (first, last)
    };

    PageWindow {
        items: items[first_index..last_index].to_vec(),
        page_size,
        current_page: page,
        first_index,
        last_index,
        total_pages,
    }
}

/// Clamps a requested page into `1..=total_pages` (or 1 when there are none).
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}
