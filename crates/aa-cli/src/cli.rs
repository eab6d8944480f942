//! Command-line argument definitions.

use std::path::PathBuf;

use aa_core::Policy;
use clap::{Parser, Subcommand};

/// Screenshot action detector.
///
/// Reads text recognised from screenshots and suggests one action: track a
/// package, open an address, add an expiration date to the calendar, save an
/// expense, or look up an error code.
#[derive(Debug, Parser)]
#[command(name = "aa", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify OCR text from a file, or stdin when no file is given.
    Classify {
        /// Text file produced by OCR.
        file: Option<PathBuf>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Also show the action a notification would offer.
        #[arg(long)]
        action: bool,

        /// Classifier policy (strict or permissive), overriding config.
        #[arg(long)]
        policy: Option<Policy>,
    },

    /// Classify every OCR text file in a directory.
    Scan {
        /// Directory containing OCR text files.
        dir: PathBuf,

        /// Output as JSON lines.
        #[arg(long)]
        json: bool,

        /// File extension to pick up, overriding config.
        #[arg(long)]
        ext: Option<String>,

        /// Classifier policy (strict or permissive), overriding config.
        #[arg(long)]
        policy: Option<Policy>,
    },

    /// List the tracking-number rules in evaluation order.
    Rules,
}
