//! The staged intent classifier.

use chrono::{Local, NaiveDateTime};

use crate::address::detect_address;
use crate::calendar::detect_calendar_event;
use crate::config::{ClassifierConfig, Policy};
use crate::error_code::detect_error_code;
use crate::expense::detect_expense;
use crate::intent::Intent;
use crate::tracking::detect_tracking;

/// Turns OCR text into at most one [`Intent`].
///
/// Stages run in priority order and the first one that produces something
/// wins: tracking number, address, calendar date, expense, error code.
///
/// # Thread Safety
///
/// The classifier only holds immutable configuration and shares the compiled
/// patterns, so one instance can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct IntentClassifier {
    config: ClassifierConfig,
}

impl IntentClassifier {
    #[must_use]
    pub const fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn with_policy(policy: Policy) -> Self {
        Self::new(policy.into())
    }

    #[must_use]
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies `text`, judging future dates against the local clock.
    pub fn classify(&self, text: &str) -> Intent {
        self.classify_at(text, Local::now().naive_local())
    }

    /// Classifies `text` as if the local time were `now`.
    pub fn classify_at(&self, text: &str, now: NaiveDateTime) -> Intent {
        if text.trim().is_empty() {
            return Intent::None;
        }

        if let Some(found) = detect_tracking(text, &self.config) {
            return Intent::TrackPackage {
                tracking_number: found.tracking_number,
                carrier: found.carrier,
            };
        }

        if let Some(address) = detect_address(text, self.config.address_suffixes) {
            tracing::debug!(%address, "address detected");
            return Intent::OpenMap { address };
        }

        if let Some(event) = detect_calendar_event(text, &self.config, now) {
            return event;
        }

        if let Some(expense) = detect_expense(text) {
            return expense;
        }

        if let Some(error_code) = detect_error_code(text) {
            tracing::debug!(%error_code, "error code detected");
            return Intent::SearchError { error_code };
        }

        Intent::None
    }
}
