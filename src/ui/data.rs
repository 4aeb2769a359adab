use crate::model::types::NormalizedListItem;

/// Query suggested when a search comes back empty.
pub const SUGGESTED_QUERY: &str = "rails";

/// Search page state.
///
/// `Idle → Searching → (Results | NoResults)`, re-entering `Searching` whenever
/// a new query starts. There is no error state: a failed search looks exactly
/// like one with no matches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchView {
    #[default]
    Idle,
    Searching {
        query: String,
    },
    Results {
        query: String,
        items: Vec<NormalizedListItem>,
    },
    NoResults {
        query: String,
    },
}

impl SearchView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a search for `query`, discarding earlier results.
    pub fn begin(&mut self, query: impl Into<String>) {
        *self = Self::Searching {
            query: query.into(),
        };
    }

    /// Settle the in-flight search. Ignored unless a search is in progress.
    pub fn complete(&mut self, items: Vec<NormalizedListItem>) {
        let Self::Searching { query } = self else {
            tracing::debug!("search completion ignored, no search in progress");
            return;
        };
        let query = std::mem::take(query);
        *self = if items.is_empty() {
            Self::NoResults { query }
        } else {
            Self::Results { query, items }
        };
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Searching { query } | Self::Results { query, .. } | Self::NoResults { query } => {
                Some(query.as_str())
            }
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, Self::Searching { .. })
    }

    /// Terminal rendering of the current state.
    pub fn render(&self) -> Vec<String> {
        match self {
            Self::Idle => Vec::new(),
            Self::Searching { .. } => vec!["Searching...".to_string()],
            Self::Results { query, items } => {
                let mut lines = vec![format!("Search Results For: {query}"), String::new()];
                for item in items {
                    lines.extend(render_item(item));
                }
                lines
            }
            Self::NoResults { query } => vec![
                format!("No Results Found For: {query}"),
                format!("Try searching for: {SUGGESTED_QUERY}"),
            ],
        }
    }
}

fn render_item(item: &NormalizedListItem) -> Vec<String> {
    let node = &item.node;
    let mut lines = vec![
        format!("{}  [{}]", node.frontmatter.title, node.frontmatter.category),
        format!("  {}  {}", node.frontmatter.date, node.fields.slug),
    ];
    if !node.excerpt.is_empty() {
        lines.push(format!("  {}", node.excerpt));
    }
    lines.push(String::new());
    lines
}
