//! Parsing of GitHub's `Link` response header.
//!
//! GitHub paginates list endpoints and advertises the page range like:
//! `<https://api.github.com/user/42/repos?per_page=100&page=2>; rel="next", <https://api.github.com/user/42/repos?per_page=100&page=4>; rel="last"`

use crate::error::{RepoListError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn page_param() -> &'static Regex {
    static PAGE: OnceLock<Regex> = OnceLock::new();
    PAGE.get_or_init(|| Regex::new(r"[?&]page=(\d+)").expect("page pattern is valid"))
}

/// Extract the last page number from a `Link` header value.
///
/// Only the entry tagged `rel="last"` is consulted. A header without such an
/// entry, or whose URL carries no `page=<N>`, is rejected.
pub fn last_page(link_header: &str) -> Result<u32> {
    let last = link_header
        .split(',')
        .map(str::trim)
        .find(|part| {
            part.split(';')
                .skip(1)
                .any(|segment| segment.trim() == r#"rel="last""#)
        })
        .ok_or_else(|| RepoListError::MalformedPagination(link_header.to_string()))?;

    page_param()
        .captures(last)
        .and_then(|captures| captures.get(1))
        .and_then(|page| page.as_str().parse::<u32>().ok())
        .ok_or_else(|| RepoListError::MalformedPagination(link_header.to_string()))
}
