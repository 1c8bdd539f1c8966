//! CLI command handlers

pub mod commands;

pub use commands::{columns, convert, excel};
