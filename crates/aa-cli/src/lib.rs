//! Screenshot action detector CLI library.
//!
//! This crate provides the CLI interface over `aa-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
