//! # quotekit
//!
//! Command-line entry point. Setup and dispatch live in `lib.rs` so they
//! can be tested.

use std::process::ExitCode;

fn main() -> ExitCode {
    quotekit::run()
}
