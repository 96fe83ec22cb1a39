//! # Quote Exporter
//!
//! Renders every configured document for a snapshot and remembers the last
//! complete set.
//!
//! ## Flow
//! ```text
//! export(snapshot)
//!    │
//!    ├── PdfRenderer::render ──┐
//!    ├── CsvRenderer::render ──┤  all succeed?
//!    │                         │
//!    │               yes ◄─────┴─────► no
//!    │                │                 │
//!    │     replace `last` bundle     return the error,
//!    │     and return it             `last` is untouched
//! ```
//!
//! Nothing here writes to disk. The bundle holds bytes plus a suggested
//! file name and media type for each artifact.

use quotekit_core::{QuoteSnapshot, Theme};

use crate::csv_export::CsvRenderer;
use crate::error::RenderResult;
use crate::labels::DocumentLabels;
use crate::logo::Logo;
use crate::pdf::PdfRenderer;
use crate::renderer::DocumentRenderer;

/// One rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Every document rendered from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    /// Quote number the bundle was rendered for.
    pub number: String,
    pub artifacts: Vec<Artifact>,
}

impl ExportBundle {
    /// Looks an artifact up by media type.
    pub fn artifact(&self, media_type: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.media_type == media_type)
    }

    pub fn pdf(&self) -> Option<&Artifact> {
        self.artifact("application/pdf")
    }

    pub fn csv(&self) -> Option<&Artifact> {
        self.artifact("text/csv")
    }
}

/// Runs a list of renderers and keeps the last successful bundle.
pub struct QuoteExporter {
    renderers: Vec<Box<dyn DocumentRenderer>>,
    last: Option<ExportBundle>,
}

impl QuoteExporter {
    /// An exporter with no renderers; add them with [`QuoteExporter::with_renderer`].
    pub fn new() -> Self {
        QuoteExporter {
            renderers: Vec::new(),
            last: None,
        }
    }

    /// The PDF + CSV pair.
    pub fn standard(theme: Theme, labels: DocumentLabels, logo: Option<Logo>) -> Self {
        let mut pdf = PdfRenderer::new(theme, labels.clone());
        if let Some(logo) = logo {
            pdf = pdf.with_logo(logo);
        }

        QuoteExporter::new()
            .with_renderer(pdf)
            .with_renderer(CsvRenderer::new(labels))
    }

    pub fn with_renderer(mut self, renderer: impl DocumentRenderer + 'static) -> Self {
        self.renderers.push(Box::new(renderer));
        self
    }

    /// Renders all documents in memory.
    ///
    /// Only when every renderer succeeds does the result replace the last
    /// bundle; on error the previous bundle remains available.
    pub fn export(&mut self, snapshot: &QuoteSnapshot) -> RenderResult<&ExportBundle> {
        let mut artifacts = Vec::with_capacity(self.renderers.len());

        for renderer in &self.renderers {
            let bytes = renderer.render(snapshot).map_err(|e| {
                tracing::warn!(error = %e, media_type = renderer.media_type(), "Render failed");
                e
            })?;

            artifacts.push(Artifact {
                file_name: renderer.file_name(snapshot),
                media_type: renderer.media_type(),
                bytes,
            });
        }

        tracing::info!(
            number = %snapshot.header.number,
            artifacts = artifacts.len(),
            "Export bundle ready"
        );

        let bundle = self.last.insert(ExportBundle {
            number: snapshot.header.number.clone(),
            artifacts,
        });
        Ok(&*bundle)
    }

    /// The most recent successful bundle, if any.
    pub fn last(&self) -> Option<&ExportBundle> {
        self.last.as_ref()
    }
}

impl Default for QuoteExporter {
    fn default() -> Self {
        Self::standard(Theme::default(), DocumentLabels::default(), None)
    }
}
