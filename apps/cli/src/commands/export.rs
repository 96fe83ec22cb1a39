//! The `export` command: render the quote and write the files.
//!
//! ```text
//! quote.json ─► Quote ─► QuoteSnapshot ─► QuoteExporter ─► ExportBundle
//!                                                              │
//!                      out_dir/Quote_<n>.pdf ◄── write_all_atomic ─┤
//!                      out_dir/items_<n>.csv ◄── write_all_atomic ─┘
//! ```
//! Every document is rendered, and every file staged, before the first
//! target is replaced.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use quotekit_render::{CsvRenderer, Logo, PdfRenderer, QuoteExporter};

use crate::config::AppConfig;
use crate::error::{CliError, CliResult};
use crate::store;

#[derive(Debug, Default, Clone, Args)]
pub struct ExportArgs {
    /// Directory for the exported files (default from config, else ".").
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Only write the PDF.
    #[arg(long, conflicts_with = "csv_only")]
    pub pdf_only: bool,

    /// Only write the CSV.
    #[arg(long)]
    pub csv_only: bool,
}

/// Exports the quote at `path`. Returns the written files.
pub fn export(path: &Path, args: &ExportArgs, config: &AppConfig) -> CliResult<Vec<PathBuf>> {
    let quote = store::load(path)?;
    let snapshot = quote.snapshot();

    let mut exporter = build_exporter(args, config)?;
    let bundle = exporter.export(&snapshot)?;

    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| config.export.out_dir.clone());
    fs::create_dir_all(&out_dir).map_err(|source| CliError::Write {
        path: out_dir.clone(),
        source,
    })?;

    let files: Vec<(PathBuf, &[u8])> = bundle
        .artifacts
        .iter()
        .map(|artifact| (out_dir.join(&artifact.file_name), artifact.bytes.as_slice()))
        .collect();
    store::write_all_atomic(&files)?;

    for (artifact, (target, _)) in bundle.artifacts.iter().zip(&files) {
        tracing::info!(
            path = %target.display(),
            media_type = artifact.media_type,
            size = artifact.bytes.len(),
            "Wrote export"
        );
    }

    Ok(files.into_iter().map(|(target, _)| target).collect())
}

fn build_exporter(args: &ExportArgs, config: &AppConfig) -> CliResult<QuoteExporter> {
    let theme = config.theme();
    let labels = config.labels();
    let mut exporter = QuoteExporter::new();

    if !args.csv_only {
        let mut pdf = PdfRenderer::new(theme.clone(), labels.clone());
        if let Some(path) = &theme.logo_path {
            pdf = pdf.with_logo(load_logo(path)?);
        }
        exporter = exporter.with_renderer(pdf);
    }
    if !args.pdf_only {
        exporter = exporter.with_renderer(CsvRenderer::new(labels));
    }

    Ok(exporter)
}

fn load_logo(path: &Path) -> CliResult<Logo> {
    let bytes = fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Logo::decode(&bytes)?)
}
