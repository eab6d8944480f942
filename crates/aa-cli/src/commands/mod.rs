//! CLI subcommand implementations.

pub mod classify;
pub mod rules;
pub mod scan;
