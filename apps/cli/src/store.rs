//! # Quote Store
//!
//! The quote file is the session: every command loads it, applies one
//! action and saves it back.
//!
//! ```text
//! quote.json ──load──► Quote ──apply(action)──► Quote ──save──► quote.json
//! ```
//!
//! ## Atomic Writes
//! Every file (quote, PDF, CSV) is written to a hidden sibling first and
//! then renamed over the target, so a failed or interrupted command never
//! leaves a truncated file behind.

use std::fs;
use std::path::{Path, PathBuf};

use quotekit_core::Quote;

use crate::error::{CliError, CliResult};

/// Reads a quote file.
pub fn load(path: &Path) -> CliResult<Quote> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let quote: Quote = serde_json::from_str(&text).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), items = quote.item_count(), "Loaded quote");
    Ok(quote)
}

/// Writes a quote file as pretty-printed JSON.
pub fn save(path: &Path, quote: &Quote) -> CliResult<()> {
    let mut json = serde_json::to_vec_pretty(quote).map_err(quotekit_core::CoreError::from)?;
    json.push(b'\n');
    write_atomic(path, &json)?;

    tracing::debug!(path = %path.display(), items = quote.item_count(), "Saved quote");
    Ok(())
}

/// Writes `bytes` to `path` through a temporary sibling file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CliResult<()> {
    let tmp = temp_path(path);
    let write_err = |source| CliError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Err(source) = fs::write(&tmp, bytes) {
        // Best effort: the temp file may not even exist.
        let _ = fs::remove_file(&tmp);
        return Err(write_err(source));
    }

    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        write_err(source)
    })
}

/// Writes several files so that either all of them are replaced or none.
///
/// Every file is staged as a temporary sibling first; the renames only start
/// once all temporaries are written.
pub fn write_all_atomic(files: &[(PathBuf, &[u8])]) -> CliResult<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());

    for (path, bytes) in files {
        let tmp = temp_path(path);
        if let Err(source) = fs::write(&tmp, bytes) {
            let _ = fs::remove_file(&tmp);
            discard(&staged);
            return Err(CliError::Write {
                path: path.clone(),
                source,
            });
        }
        staged.push((tmp, path.as_path()));
    }

    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(tmp, path) {
            discard(&staged[i..]);
            return Err(CliError::Write {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    Ok(())
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        let _ = fs::remove_file(tmp);
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "quote".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.json");
        let quote = Quote::sample(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        save(&path, &quote).unwrap();
        assert_eq!(load(&path).unwrap(), quote);

        // No temp file left behind.
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("quote.json")]);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(load(&missing), Err(CliError::Read { .. })));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(load(&broken), Err(CliError::Parse { .. })));
    }

    #[test]
    fn test_load_rejects_negative_price() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.json");
        save(&path, &Quote::sample(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
        value["items"][1]["unit_price"] = serde_json::json!("-100");
        fs::write(&path, value.to_string()).unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
        assert!(err.to_string().contains("unit price"), "{}", err);
    }

    #[test]
    fn test_write_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("Quote_1.pdf");
        assert!(matches!(write_atomic(&path, b"%PDF"), Err(CliError::Write { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_all_leaves_targets_alone_when_one_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("Quote_1.pdf");
        let csv = dir.path().join("items_1.csv");
        fs::write(&pdf, b"old pdf").unwrap();
        fs::write(&csv, b"old csv").unwrap();
        // The CSV cannot be staged: its temp path is taken by a directory.
        fs::create_dir(temp_path(&csv)).unwrap();

        let files = [(pdf.clone(), &b"new pdf"[..]), (csv.clone(), &b"new csv"[..])];
        assert!(matches!(write_all_atomic(&files), Err(CliError::Write { .. })));

        assert_eq!(fs::read(&pdf).unwrap(), b"old pdf");
        assert_eq!(fs::read(&csv).unwrap(), b"old csv");
        assert!(!temp_path(&pdf).exists());
    }

    #[test]
    fn test_write_all_replaces_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("Quote_1.pdf");
        let csv = dir.path().join("items_1.csv");
        fs::write(&csv, b"old csv").unwrap();

        let files = [(pdf.clone(), &b"new pdf"[..]), (csv.clone(), &b"new csv"[..])];
        write_all_atomic(&files).unwrap();

        assert_eq!(fs::read(&pdf).unwrap(), b"new pdf");
        assert_eq!(fs::read(&csv).unwrap(), b"new csv");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        assert_eq!(
            temp_path(Path::new("/tmp/out/Quote_1.pdf")),
            PathBuf::from("/tmp/out/.Quote_1.pdf.tmp")
        );
    }
}
