//! Build-time search indexing.
//!
//! Loads every content record, turns each into an insert statement and writes
//! the statements to a single artifact that an external load step feeds into
//! the search database.

pub mod sink;
pub mod statement;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::connectors::markdown::MarkdownSource;
use crate::connectors::{ContentSource, ScanContext, SourcedRecord};
use sink::{FileSink, IndexSink};
use statement::generate_insert;

#[derive(Debug, Error)]
pub enum IndexError {
    /// A required content field is missing (empty strings are fine).
    #[error("invalid record: required field `{field}` is missing")]
    InvalidRecord { field: &'static str },

    #[error("failed to write search index artifact {}: {source}", path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Root directory holding the markdown content.
    pub content_dir: PathBuf,
    /// Artifact to (re)create.
    pub output: PathBuf,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct IndexReport {
    pub records: usize,
    pub statements: usize,
    pub output: PathBuf,
    pub elapsed_ms: u128,
}

/// Write one statement per record into `sink`, in order.
///
/// Stops at the first invalid record: a partial index is worse than a failed
/// build. The sink is finished only when every record succeeded.
pub fn write_statements<S: IndexSink>(records: &[SourcedRecord], sink: &mut S) -> Result<usize> {
    let mut written = 0usize;
    for sourced in records {
        let title = sourced.record.title.as_deref().unwrap_or_default();
        tracing::info!(title, source = %sourced.source_path.display(), "indexing record");

        let sql = generate_insert(&sourced.record)
            .with_context(|| format!("generating insert for {}", sourced.source_path.display()))?;
        sink.write_statement(&sql)?;
        written += 1;
    }
    sink.finish()?;
    Ok(written)
}

/// Run a full indexing pass from the markdown content directory.
pub fn run_index(opts: &IndexOptions) -> Result<IndexReport> {
    let started = Instant::now();
    let source = MarkdownSource::new();
    let ctx = ScanContext::new(opts.content_dir.clone());

    let records = source
        .scan(&ctx)
        .with_context(|| format!("loading content from {}", opts.content_dir.display()))?;
    tracing::info!(
        count = records.len(),
        content_dir = %opts.content_dir.display(),
        "content loaded"
    );

    let mut sink = FileSink::create(&opts.output)?;
    let statements = write_statements(&records, &mut sink)?;

    let report = IndexReport {
        records: records.len(),
        statements,
        output: opts.output.clone(),
        elapsed_ms: started.elapsed().as_millis(),
    };
    tracing::info!(
        statements = report.statements,
        output = %report.output.display(),
        elapsed_ms = report.elapsed_ms as u64,
        "search index artifact written"
    );
    Ok(report)
}
