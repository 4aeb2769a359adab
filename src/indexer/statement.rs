//! Insert statement generation for the external document table.
//!
//! Each [`ContentRecord`] becomes exactly one single-line SQL statement:
//!
//! ```sql
//! INSERT INTO documents(title, description, category, published_at, slug, body, created_at, updated_at, excerpt) VALUES('...', '...', '...', '...', '...', '...', now(), now(), '...') ON CONFLICT (title) DO NOTHING;
//! ```
//!
//! Free-text fields are sanitized by *removing* characters that could close the
//! SQL string literal or read as markdown, not by escaping them. `category`,
//! `slug` and the publish date are embedded verbatim.

use crate::model::types::ContentRecord;

use super::IndexError;

/// Target table for generated statements.
pub const DOCUMENTS_TABLE: &str = "documents";

/// Column list, in statement order.
pub const DOCUMENT_COLUMNS: &[&str] = &[
    "title",
    "description",
    "category",
    "published_at",
    "slug",
    "body",
    "created_at",
    "updated_at",
    "excerpt",
];

/// Conflict clause appended to every statement; `title` is the natural key.
pub const CONFLICT_CLAUSE: &str = "ON CONFLICT (title) DO NOTHING;";

/// Server-side timestamp expression, evaluated when the statement is loaded.
const NOW_SQL: &str = "now()";

/// Characters removed from free-text fields after line breaks are collapsed.
const STRIPPED_CHARS: &[char] = &['\'', '"', '#', '`'];

/// Borrowed view of a record whose required fields are all present.
#[derive(Debug, Clone, Copy)]
struct ValidRecord<'a> {
    title: &'a str,
    description: &'a str,
    category: &'a str,
    published_date: &'a str,
    slug: &'a str,
    body: &'a str,
    excerpt: Option<&'a str>,
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, IndexError> {
    value
        .as_deref()
        .ok_or(IndexError::InvalidRecord { field })
}

impl<'a> ValidRecord<'a> {
    fn from_record(record: &'a ContentRecord) -> Result<Self, IndexError> {
        Ok(Self {
            title: required(&record.title, "title")?,
            description: required(&record.description, "description")?,
            category: required(&record.category, "category")?,
            published_date: required(&record.published_date, "published_date")?,
            slug: required(&record.slug, "slug")?,
            body: required(&record.body, "body")?,
            excerpt: record.excerpt.as_deref(),
        })
    }
}

/// Make free text safe to embed in a single-quoted SQL literal.
///
/// Every `\r\n`, `\r` or `\n` becomes one space; afterwards every `'`, `"`,
/// `#` and backtick is removed. The order matters: a quoted multi-line span
/// ends up as one space-joined, quote-free run.
pub fn sanitize_text(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                collapsed.push(' ');
            }
            '\n' => collapsed.push(' '),
            other => collapsed.push(other),
        }
    }
    collapsed.retain(|c| !STRIPPED_CHARS.contains(&c));
    collapsed
}

fn quoted(value: &str) -> String {
    format!("'{value}'")
}

/// Generate the insert statement for one record.
///
/// Pure and deterministic: the same record always yields byte-identical output.
///
/// # Errors
///
/// [`IndexError::InvalidRecord`] when `title`, `description`, `category`,
/// `published_date`, `slug` or `body` is absent. Empty strings are accepted.
pub fn generate_insert(record: &ContentRecord) -> Result<String, IndexError> {
    let r = ValidRecord::from_record(record)?;

    let values = [
        quoted(&sanitize_text(r.title)),
        quoted(&sanitize_text(r.description)),
        quoted(r.category),
        quoted(r.published_date),
        quoted(r.slug),
        quoted(&sanitize_text(r.body)),
        NOW_SQL.to_string(),
        NOW_SQL.to_string(),
        quoted(&sanitize_text(r.excerpt.unwrap_or_default())),
    ];

    Ok(format!(
        "INSERT INTO {DOCUMENTS_TABLE}({}) VALUES({}) {CONFLICT_CLAUSE}",
        DOCUMENT_COLUMNS.join(", "),
        values.join(", ")
    ))
}
