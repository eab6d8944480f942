//! Intent classification for screenshot OCR text.
//!
//! This crate turns free-form text into at most one actionable intent:
//! - Tracking numbers, scored across carrier rules
//! - Addresses, expiration dates, expenses and error codes
//! - Actions (links, calendar payloads) for the detected intent

mod address;
pub mod action;
pub mod calendar;
mod classifier;
pub mod config;
mod error_code;
mod expense;
pub mod intent;
pub mod scan;
pub mod source;
pub mod tracking;

pub use action::Action;
pub use calendar::parse_date;
pub use classifier::IntentClassifier;
pub use config::{ClassifierConfig, DatePolicy, Policy, UnknownPolicy};
pub use intent::{Carrier, Intent, UnknownCarrier};
pub use scan::{ScanEntry, ScanError, scan_directory};
pub use source::{
    DEFAULT_MAX_INPUT_BYTES, FileSource, ReaderSource, SourceError, TextSource, classify_source,
};
pub use tracking::{RuleKind, TrackingRule, tracking_rules};
