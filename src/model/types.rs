//! Normalized entity structs.

use serde::{Deserialize, Serialize};

/// One published piece of content, as fed to the indexer.
///
/// Every field is optional so that a *missing* value can be told apart from an
/// empty one; the statement generator rejects missing required fields and
/// accepts empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Free-text label, not an enum.
    pub category: Option<String>,
    /// ISO-like date string; format is up to the content author.
    pub published_date: Option<String>,
    /// Path identifier for the published page.
    pub slug: Option<String>,
    /// Raw markdown body.
    pub body: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
}

/// One hit as returned by the external search service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub published_at: String,
    pub slug: String,
    pub excerpt: String,
}

/// Wrapper shape consumed by the content-listing display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedListItem {
    pub node: ListNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNode {
    pub excerpt: String,
    pub fields: NodeFields,
    pub frontmatter: NodeFrontmatter,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFields {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFrontmatter {
    pub category: String,
    pub date: String,
    pub title: String,
}

impl NormalizedListItem {
    /// Build a listing item from a locally loaded record.
    ///
    /// Absent fields become empty strings; `id` is supplied by the caller
    /// (the source-relative path for markdown content).
    pub fn from_record(record: &ContentRecord, id: impl Into<String>) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            node: ListNode {
                excerpt: text(&record.excerpt),
                fields: NodeFields {
                    slug: text(&record.slug),
                },
                frontmatter: NodeFrontmatter {
                    category: text(&record.category),
                    date: text(&record.published_date),
                    title: text(&record.title),
                },
                id: id.into(),
            },
        }
    }
}

/// Lightweight listing edge (id, title, date and slug only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedEdge {
    pub node: SimplifiedNode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifiedNode {
    pub id: String,
    pub title: String,
    pub published_at: String,
    pub slug: String,
}
