//! # quotekit CLI Library
//!
//! Argument parsing, configuration and command dispatch for the `quotekit`
//! binary. `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! quotekit/
//! ├── lib.rs          ◄─── You are here (parsing, logging, dispatch)
//! ├── config.rs       ◄─── Theme / locale / output settings
//! ├── store.rs        ◄─── Quote file load / save, atomic writes
//! ├── commands/
//! │   ├── quote.rs    ◄─── new, set, *-item, show
//! │   └── export.rs   ◄─── export
//! └── error.rs        ◄─── CliError + exit codes
//! ```
//!
//! ## Typical Session
//! ```text
//! $ quotekit new quote.json
//! $ quotekit set quote.json --client "Milena" --discount 15
//! $ quotekit add-item quote.json -d "Lucky mug" -q 1 -p 18999
//! $ quotekit show quote.json
//! $ quotekit export quote.json --out-dir quotes/
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod store;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExportArgs, ItemArgs, NewItemArgs, SetArgs};
use config::AppConfig;
use error::{CliError, CliResult};

/// Build quotes and export them as PDF and CSV.
#[derive(Debug, Parser)]
#[command(name = "quotekit", version, about)]
pub struct Cli {
    /// Configuration file (default: config.toml in the platform config dir).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a quote file with the sample quote.
    New {
        file: PathBuf,
        /// Issue date, YYYY-MM-DD (default: today).
        #[arg(long, value_name = "DATE")]
        date: Option<NaiveDate>,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },

    /// Change header fields, percentages, notes or terms.
    Set {
        file: PathBuf,
        #[command(flatten)]
        args: SetArgs,
    },

    /// Append a line item.
    AddItem {
        file: PathBuf,
        #[command(flatten)]
        item: NewItemArgs,
    },

    /// Change the line item at POSITION (1-based).
    UpdateItem {
        file: PathBuf,
        position: usize,
        #[command(flatten)]
        item: ItemArgs,
    },

    /// Remove the line item at POSITION (1-based).
    RemoveItem { file: PathBuf, position: usize },

    /// Remove every line item.
    ClearItems { file: PathBuf },

    /// Print the quote and its totals.
    Show {
        file: PathBuf,
        /// Print the snapshot as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Write Quote_<number>.pdf and items_<number>.csv.
    Export {
        file: PathBuf,
        #[command(flatten)]
        args: ExportArgs,
    },
}

/// Runs the CLI with the process arguments.
///
/// ## Startup Sequence
/// 1. Parse arguments (clap exits on usage errors)
/// 2. Initialize tracing
/// 3. Execute the command; map errors to exit codes
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = std::io::stdout();
    match execute(cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            eprintln!("error: {}", err);
            ExitCode::from(err.code().exit_code())
        }
    }
}

/// Executes one parsed command, writing user output to `out`.
pub fn execute(cli: Cli, out: &mut impl Write) -> CliResult<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::New { file, date, force } => {
            let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let quote = commands::quote::create(&file, today, force)?;
            print(out, format!("Created {} (quote #{})", file.display(), quote.header.number))
        }
        Command::Set { file, args } => {
            let quote = commands::quote::set(&file, args)?;
            print(out, totals_line(&quote, &config))
        }
        Command::AddItem { file, item } => {
            let quote = commands::quote::add_item(&file, item)?;
            print(out, format!("Added item {}. {}", quote.item_count(), totals_line(&quote, &config)))
        }
        Command::UpdateItem { file, position, item } => {
            let quote = commands::quote::update_item(&file, position, item)?;
            print(out, format!("Updated item {}. {}", position, totals_line(&quote, &config)))
        }
        Command::RemoveItem { file, position } => {
            let quote = commands::quote::remove_item(&file, position)?;
            print(out, format!("Removed item {}. {}", position, totals_line(&quote, &config)))
        }
        Command::ClearItems { file } => {
            let quote = commands::quote::clear_items(&file)?;
            print(out, format!("Cleared all items. {}", totals_line(&quote, &config)))
        }
        Command::Show { file, json } => {
            let quote = store::load(&file)?;
            let text = if json {
                quote.snapshot().to_json()?
            } else {
                commands::quote::summary(&quote, &config.theme(), &config.labels())
            };
            print(out, text.trim_end())
        }
        Command::Export { file, args } => {
            for path in commands::export::export(&file, &args, &config)? {
                print(out, format!("Wrote {}", path.display()))?;
            }
            Ok(())
        }
    }
}

fn totals_line(quote: &quotekit_core::Quote, config: &AppConfig) -> String {
    let total = quotekit_core::format_money(quote.totals().total, &config.theme().currency);
    format!("{} {}", config.labels().total, total)
}

fn print(out: &mut impl Write, text: impl std::fmt::Display) -> CliResult<()> {
    writeln!(out, "{}", text).map_err(|source| CliError::Write {
        path: PathBuf::from("<stdout>"),
        source,
    })
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - Default: warnings, plus `info` from quotekit crates
/// - `--verbose`: `debug` from quotekit crates
/// - `RUST_LOG` overrides both
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,quotekit=debug"
    } else {
        "warn,quotekit=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
