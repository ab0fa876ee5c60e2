use serde::Serialize;

/// One 1-based page of a listing result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page);
    let slice = if start >= total_items {
        Vec::new()
    } else {
        let end = (start + per_page).min(total_items);
        items[start..end].to_vec()
    };

    Page {
        items: slice,
        page,
        per_page,
        total_items,
        total_pages,
    }
}
