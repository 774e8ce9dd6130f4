//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `get` - Fetch one path (normalized or raw)
//! - `listing` - Stream all items of a listing
//! - `by-id` - Fetch things by fullname
//! - `hours` - Hour-of-day histogram of a listing

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
