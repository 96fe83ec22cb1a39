//! # Commands
//!
//! One function per subcommand. Commands return data; printing happens in
//! [`crate::execute`].
//!
//! ## Command Categories
//! - **Quote**: `new`, `set`, `add-item`, `update-item`, `remove-item`,
//!   `clear-items`, `show`
//! - **Export**: `export`

pub mod export;
pub mod quote;

pub use export::ExportArgs;
pub use quote::{ItemArgs, NewItemArgs, SetArgs};
