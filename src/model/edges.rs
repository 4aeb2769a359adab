//! Listing helpers shared by local content and search results.

use std::cmp::Ordering;

use chrono::NaiveDate;

use super::types::{NormalizedListItem, SimplifiedEdge, SimplifiedNode};

/// Reduce listing items to `{id, title, published_at, slug}` edges.
pub fn simplify_edges(items: &[NormalizedListItem]) -> Vec<SimplifiedEdge> {
    items
        .iter()
        .map(|item| SimplifiedEdge {
            node: SimplifiedNode {
                id: item.node.id.clone(),
                title: item.node.frontmatter.title.clone(),
                published_at: item.node.frontmatter.date.clone(),
                slug: item.node.fields.slug.clone(),
            },
        })
        .collect()
}

/// Order items by publish date, newest first.
///
/// Dates that parse as `YYYY-MM-DD` (optionally followed by a time part) are
/// compared as dates; anything else falls back to plain string ordering and
/// sorts after dated items. The sort is stable.
pub fn sort_newest_first(items: &mut [NormalizedListItem]) {
    items.sort_by(|a, b| compare_dates(&b.node.frontmatter.date, &a.node.frontmatter.date));
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

fn compare_dates(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}
