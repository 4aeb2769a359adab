//! Output sinks for generated statements.
//!
//! A sink is opened once per build pass, receives statements sequentially and is
//! finished when the pass completes. [`FileSink`] stages statements in a
//! temporary file next to the artifact and only moves it into place on
//! [`IndexSink::finish`]; dropping it earlier discards the staged output and
//! leaves any previous artifact untouched.

use std::fs;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::IndexError;

pub trait IndexSink {
    /// Append one statement followed by a newline.
    fn write_statement(&mut self, statement: &str) -> Result<(), IndexError>;

    /// Flush everything written so far; called once when the pass succeeds.
    fn finish(&mut self) -> Result<(), IndexError>;
}

/// Plain-text artifact on disk, one statement per line.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<NamedTempFile>>,
    written: usize,
}

impl FileSink {
    /// Stage a fresh artifact for `path`.
    ///
    /// Missing parent directories are created. The file at `path` is replaced
    /// only when the sink is finished.
    pub fn create(path: &Path) -> Result<Self, IndexError> {
        let sink_err = |source| IndexError::Sink {
            path: path.to_path_buf(),
            source,
        };

        if path.is_dir() {
            return Err(sink_err(io::Error::from(ErrorKind::IsADirectory)));
        }

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(sink_err)?;

        let staged = tempfile::Builder::new()
            .prefix(".search-inserts-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(sink_err)?;
        tracing::debug!(staged = %staged.path().display(), "staging artifact");

        Ok(Self {
            path: path.to_path_buf(),
            writer: Some(BufWriter::new(staged)),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of statements written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    fn err(&self, source: io::Error) -> IndexError {
        IndexError::Sink {
            path: self.path.clone(),
            source,
        }
    }

    fn closed(&self) -> IndexError {
        self.err(io::Error::other("sink already finished"))
    }
}

impl IndexSink for FileSink {
    fn write_statement(&mut self, statement: &str) -> Result<(), IndexError> {
        let Some(writer) = self.writer.as_mut() else {
            return Err(self.closed());
        };
        let res = writer
            .write_all(statement.as_bytes())
            .and_then(|()| writer.write_all(b"\n"));
        res.map_err(|e| self.err(e))?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), IndexError> {
        let Some(writer) = self.writer.take() else {
            return Err(self.closed());
        };
        let staged = writer.into_inner().map_err(|e| self.err(e.into_error()))?;
        staged.as_file().sync_all().map_err(|e| self.err(e))?;
        staged.persist(&self.path).map_err(|e| self.err(e.error))?;
        tracing::debug!(path = %self.path.display(), statements = self.written, "artifact replaced");
        Ok(())
    }
}

/// In-memory sink that keeps statements in write order.
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    pub statements: Vec<String>,
}

impl IndexSink for VecSink {
    fn write_statement(&mut self, statement: &str) -> Result<(), IndexError> {
        self.statements.push(statement.to_string());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), IndexError> {
        Ok(())
    }
}
