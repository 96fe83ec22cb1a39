//! End-to-end runs of the `quotekit` commands against a temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use pretty_assertions::assert_eq;
use quotekit::error::ErrorCode;
use quotekit::{execute, Cli};

struct Workspace {
    dir: tempfile::TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new(config_toml: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        fs::write(&config, config_toml).unwrap();
        Self { dir, config }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run(&self, args: &[&str]) -> quotekit::error::CliResult<String> {
        let mut argv = vec!["quotekit", "--config", self.config.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();

        let mut out = Vec::new();
        execute(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }
}

fn str_of(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_new_edit_show_export() {
    let ws = Workspace::new("");
    let quote = ws.path("quote.json");
    let out_dir = ws.path("out");

    let created = ws.run(&["new", str_of(&quote), "--date", "2024-03-01"]).unwrap();
    assert!(created.contains("quote #101"));

    ws.run(&["set", str_of(&quote), "--number", "2024-07", "--tax", "21"]).unwrap();
    let added = ws
        .run(&["add-item", str_of(&quote), "-d", "Gift wrap", "-q", "3", "-p", "500"])
        .unwrap();
    assert!(added.starts_with("Added item 3."));

    let shown = ws.run(&["show", str_of(&quote)]).unwrap();
    assert!(shown.contains("Quote # 2024-07"));
    assert!(shown.contains("Gift wrap"));
    assert!(shown.contains("Tax (21.0%):"));

    let written = ws
        .run(&["export", str_of(&quote), "--out-dir", str_of(&out_dir)])
        .unwrap();
    assert_eq!(written.lines().count(), 2);

    let pdf = fs::read(out_dir.join("Quote_2024-07.pdf")).unwrap();
    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    assert!(!doc.get_pages().is_empty());

    let csv = fs::read_to_string(out_dir.join("items_2024-07.csv")).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert_eq!(csv.lines().last(), Some("Gift wrap,3,500,1500"));
}

#[test]
fn test_show_json_is_snapshot() {
    let ws = Workspace::new("");
    let quote = ws.path("quote.json");
    ws.run(&["new", str_of(&quote), "--date", "2024-03-01"]).unwrap();
    ws.run(&["clear-items", str_of(&quote)]).unwrap();

    let json = ws.run(&["show", str_of(&quote), "--json"]).unwrap();
    let snapshot = quotekit_core::QuoteSnapshot::from_json(&json).unwrap();
    assert_eq!(snapshot.item_count(), 0);
    assert!(snapshot.totals.total.is_zero());
}

#[test]
fn test_config_controls_locale_and_currency() {
    let ws = Workspace::new(
        r#"
[theme]
preset = "ocean"
currency_symbol = "$"
decimal_style = "point"

[document]
locale = "es"
"#,
    );
    let quote = ws.path("quote.json");
    ws.run(&["new", str_of(&quote), "--date", "2024-03-01"]).unwrap();

    let shown = ws.run(&["show", str_of(&quote)]).unwrap();
    assert!(shown.contains("Presupuesto # 101"));
    assert!(shown.contains("$ 28,048.30"));

    ws.run(&["export", str_of(&quote), "-o", str_of(&ws.path("out"))]).unwrap();
    assert!(ws.path("out").join("Presupuesto_101.pdf").exists());
}

#[test]
fn test_errors_map_to_exit_codes() {
    let ws = Workspace::new("");
    let quote = ws.path("quote.json");

    let missing = ws.run(&["show", str_of(&quote)]).unwrap_err();
    assert_eq!(missing.code(), ErrorCode::Io);

    ws.run(&["new", str_of(&quote)]).unwrap();
    let exists = ws.run(&["new", str_of(&quote)]).unwrap_err();
    assert_eq!(exists.code(), ErrorCode::Validation);

    let not_found = ws.run(&["remove-item", str_of(&quote), "9"]).unwrap_err();
    assert_eq!(not_found.code(), ErrorCode::NotFound);

    let bad_pct = ws.run(&["set", str_of(&quote), "--discount", "150"]).unwrap_err();
    assert_eq!(bad_pct.code(), ErrorCode::Validation);
}

#[test]
fn test_invalid_config_is_rejected() {
    let ws = Workspace::new("[theme]\npreset = \"neon\"\n");
    let err = ws.run(&["new", str_of(&ws.path("quote.json"))]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::Config);
    assert!(!ws.path("quote.json").exists());
}

#[test]
fn test_negative_item_input_counts_as_zero() {
    let ws = Workspace::new("");
    let quote = ws.path("quote.json");
    ws.run(&["new", str_of(&quote), "--date", "2024-03-01"]).unwrap();
    ws.run(&["clear-items", str_of(&quote)]).unwrap();
    ws.run(&["add-item", str_of(&quote), "-d", "Refund", "-q", "-2", "-p", "-5"]).unwrap();

    let saved = quotekit::store::load(&quote).unwrap();
    assert_eq!(saved.items[0].quantity, Some(0));
    assert!(saved.items[0].unit_price.unwrap().is_zero());
    assert!(saved.totals().total.is_zero());
}
