//! Markdown files with YAML front matter.
//!
//! ```text
//! ---
//! title: My Post
//! description: A desc
//! category: rails
//! date: 2021-08-15
//! ---
//! Post body in markdown...
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use walkdir::WalkDir;

use super::excerpt::excerpt_from_markdown;
use super::{ContentSource, ScanContext, SourcedRecord, relative_id};
use crate::model::types::ContentRecord;

const FRONT_MATTER_FENCE: &str = "---";
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default, deserialize_with = "scalar_as_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    category: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    date: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    excerpt: Option<String>,
}

/// Accept strings, numbers and booleans; `null` reads as absent.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar value, found {other:?}"
        ))),
    }
}

/// Split a document into its front matter block and body.
///
/// The block must open on the very first line with `---` and close with a
/// line holding only `---`. Without a closed block the whole text is body.
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(first_nl) = text.find('\n') else {
        return (None, text);
    };
    if text[..first_nl].trim_end() != FRONT_MATTER_FENCE {
        return (None, text);
    }

    let rest = &text[first_nl + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    (None, text)
}

/// Slug for a content file: `blog/my-post.md` → `/blog/my-post/`,
/// `blog/series/index.md` → `/blog/series/`.
pub fn slug_for(relative_id: &str) -> String {
    let without_ext = match relative_id.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => stem,
        _ => relative_id,
    };
    let trimmed = without_ext
        .strip_suffix("/index")
        .or_else(|| (without_ext == "index").then_some(""))
        .unwrap_or(without_ext);
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Parse one markdown document into a record.
pub fn parse_document(text: &str, relative_id: &str) -> Result<ContentRecord> {
    let (yaml, body) = split_front_matter(text);
    let front: FrontMatter = match yaml {
        Some(y) if !y.trim().is_empty() => {
            serde_yaml::from_str(y).context("parsing front matter")?
        }
        _ => FrontMatter::default(),
    };

    let excerpt = front
        .excerpt
        .unwrap_or_else(|| excerpt_from_markdown(body));

    Ok(ContentRecord {
        title: front.title,
        description: front.description,
        category: front.category,
        published_date: front.date,
        slug: Some(slug_for(relative_id)),
        body: Some(body.to_string()),
        excerpt: Some(excerpt),
    })
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| MARKDOWN_EXTENSIONS.iter().any(|m| e.eq_ignore_ascii_case(m)))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownSource;

impl MarkdownSource {
    pub fn new() -> Self {
        Self
    }
}

impl ContentSource for MarkdownSource {
    fn scan(&self, ctx: &ScanContext) -> Result<Vec<SourcedRecord>> {
        let root = &ctx.content_root;
        if !root.is_dir() {
            anyhow::bail!("content directory {} does not exist", root.display());
        }

        let mut records = Vec::new();
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", root.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown(path) {
                continue;
            }
            let Some(rel) = relative_id(root, path) else {
                continue;
            };

            let text =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            let record = parse_document(&text, &rel)
                .with_context(|| format!("parsing {}", path.display()))?;
            tracing::debug!(path = %path.display(), slug = record.slug.as_deref(), "loaded content");

            records.push(SourcedRecord {
                source_path: path.to_path_buf(),
                relative_id: rel,
                record,
            });
        }
        Ok(records)
    }
}
