//! Print collaborators: where a finished document goes.

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

use tallysheet_invoicing::{InvoiceDocument, Present};

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("failed to write invoice document: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write invoice document to {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes the document to any byte sink (stdout in the binary).
#[derive(Debug)]
pub struct WriterPresenter<W> {
    writer: W,
}

impl<W: Write> WriterPresenter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Present for WriterPresenter<W> {
    type Error = PresentError;

    fn present(&mut self, document: &InvoiceDocument) -> Result<(), Self::Error> {
        self.writer.write_all(document.as_str().as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the document to a file, replacing whatever was there.
#[derive(Debug, Clone)]
pub struct FilePresenter {
    path: PathBuf,
}

impl FilePresenter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Present for FilePresenter {
    type Error = PresentError;

    fn present(&mut self, document: &InvoiceDocument) -> Result<(), Self::Error> {
        std::fs::write(&self.path, document.as_str()).map_err(|source| PresentError::File {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "invoice document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tallysheet_invoicing::{DocumentMeta, InvoiceState};

    fn document() -> InvoiceDocument {
        let meta = DocumentMeta::on(NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(), false);
        InvoiceState::default().build_document(&meta)
    }

    #[test]
    fn writer_presenter_emits_the_html() {
        let doc = document();
        let mut presenter = WriterPresenter::new(Vec::new());
        presenter.present(&doc).unwrap();

        let written = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(written, format!("{doc}\n"));
    }

    #[test]
    fn file_presenter_writes_and_reports_missing_directories() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("tallysheet-present-{}.html", std::process::id()));
        FilePresenter::new(&path).present(&document()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Sales Invoice mode: OFF"));
        let _ = std::fs::remove_file(&path);

        let missing = dir.join("tallysheet-no-such-dir").join("invoice.html");
        let err = FilePresenter::new(&missing).present(&document()).unwrap_err();
        match err {
            PresentError::File { path, .. } => assert_eq!(path, missing),
            other => panic!("Expected File error, got {other:?}"),
        }
    }
}
