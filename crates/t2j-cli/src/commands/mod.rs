//! CLI subcommand implementations.

pub mod upload;
