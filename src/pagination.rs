use serde::Serialize;

/// Page numbers to render around `current_page`; `None` marks a gap.
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let current_page = current_page.min(last_page);
    let mut pages = Vec::new();

    let past_last = last_page.saturating_add(1);
    let left_end = left_edge.saturating_add(1).min(past_last);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = current_page
        .saturating_add(right_current)
        .saturating_add(1)
        .min(past_last);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge).saturating_add(1));

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// One page of records plus the page window used by the list views.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            total: items.len(),
            items,
            pages,
            page: current_page,
            total_pages,
        }
    }

    /// Builds the page from the total count reported by the backend.
    pub fn from_total(items: Vec<T>, current_page: usize, per_page: usize, total: usize) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };
        Self {
            total,
            ..Self::new(items, current_page, total_pages)
        }
    }
}
