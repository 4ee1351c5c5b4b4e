//! Pagination metadata and navigation links for list responses.

use locatr_shared::{PageLinks, PageMeta};
use url::form_urlencoded;

use crate::infrastructure::ports::{LocationFilter, Page};

pub fn page_meta<T>(page: &Page<T>) -> PageMeta {
    PageMeta {
        total: page.total,
        count: u32::try_from(page.items.len()).unwrap_or(u32::MAX),
        per_page: page.request.per_page(),
        current_page: page.request.page(),
        total_pages: page.total_pages(),
    }
}

/// Links to the first, last, previous and next pages of `page`.
///
/// Links keep the active filters and page size; `base` is the absolute
/// endpoint URL, or just its path for relative links.
pub fn page_links<T>(base: &str, filter: &LocationFilter, page: &Page<T>) -> PageLinks {
    let current = page.request.page();
    let link = |number: u32| page_link(base, filter, page.request.per_page(), number);

    PageLinks {
        first: link(1),
        last: link(page.total_pages()),
        prev: page.has_prev().then(|| link(current - 1)),
        next: page.has_next().then(|| link(current + 1)),
    }
}

fn page_link(base: &str, filter: &LocationFilter, per_page: u32, number: u32) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(name) = filter.name() {
        query.append_pair("name", name);
    }
    if let Some(code) = filter.code() {
        query.append_pair("code", code);
    }
    query.append_pair("per_page", &per_page.to_string());
    query.append_pair("page", &number.to_string());

    format!("{base}?{}", query.finish())
}
