//! Presentation layer for roundtable
//!
//! This crate contains the CLI definition, output formatters and the
//! console observer that prints the discussion as it happens.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, ManagerArg, OutputFormat};
pub use output::console::{ConsoleFormatter, RunReport};
pub use progress::observer::ConsoleObserver;
