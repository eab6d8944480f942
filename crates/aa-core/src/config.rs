//! Classifier tuning and the keyword tables it consults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Words that put a bare digit run into shipping context.
///
/// Carrier names are checked separately as whole words, so they are not listed here.
pub const TRACKING_KEYWORDS: &[&str] = &["tracking", "track", "shipment", "delivery", "label"];

/// Words that mark a nearby date as an expiration or due date.
pub const EXPIRATION_KEYWORDS: &[&str] = &[
    "expires",
    "expiration",
    "exp",
    "valid until",
    "good thru",
    "due date",
];

/// Street suffixes that make a line look like a postal address.
pub const ADDRESS_SUFFIXES: &[&str] = &[
    "Street",
    "St.",
    "Avenue",
    "Ave",
    "Road",
    "Rd",
    "Boulevard",
    "Blvd",
    "Lane",
    "Ln",
    "Drive",
    "Dr",
];

/// Title given to calendar events found by the strict date policy.
pub const EXPIRATION_TITLE: &str = "Document Expiration";

/// How the date detector decides whether a date deserves a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePolicy {
    /// First date-shaped string wins, no validation.
    Permissive,
    /// The date must parse, lie in the future, and sit near an expiration keyword.
    Strict,
}

/// Tuning for [`crate::IntentClassifier`].
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Keywords that let generic-length digit runs through the context gate.
    pub tracking_keywords: &'static [&'static str],

    /// Added when the rule's carrier is named in the text.
    pub carrier_bonus: i32,

    /// Added to a 20-digit rule whose carrier is named, settling the USPS/FedEx overlap.
    pub collision_bonus: i32,

    /// Subtracted when the text names some other carrier but not this rule's.
    /// `None` disables the penalty.
    pub wrong_carrier_penalty: Option<i32>,

    /// A tracking candidate must score strictly above this to be accepted.
    /// `None` accepts any match that survived the context gate.
    pub acceptance_floor: Option<i32>,

    pub date_policy: DatePolicy,

    pub expiration_keywords: &'static [&'static str],

    /// How many characters on either side of a date to search for expiration keywords.
    pub expiration_window: usize,

    pub address_suffixes: &'static [&'static str],
}

impl ClassifierConfig {
    /// Wrong-carrier penalty, score floor, and gated dates.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            tracking_keywords: TRACKING_KEYWORDS,
            carrier_bonus: 20,
            collision_bonus: 20,
            wrong_carrier_penalty: Some(50),
            acceptance_floor: Some(5),
            date_policy: DatePolicy::Strict,
            expiration_keywords: EXPIRATION_KEYWORDS,
            expiration_window: 50,
            address_suffixes: ADDRESS_SUFFIXES,
        }
    }

    /// No penalty, no floor, and any date-shaped string becomes an event.
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            wrong_carrier_penalty: None,
            acceptance_floor: None,
            date_policy: DatePolicy::Permissive,
            ..Self::strict()
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl From<Policy> for ClassifierConfig {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Strict => Self::strict(),
            Policy::Permissive => Self::permissive(),
        }
    }
}

/// Named presets of [`ClassifierConfig`], selectable from config files and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    #[default]
    Strict,
    Permissive,
}

impl Policy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Permissive => "permissive",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Policy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// Error type for unknown policy names.
#[derive(Debug, Clone, Error)]
#[error("unknown policy: {0} (expected `strict` or `permissive`)")]
pub struct UnknownPolicy(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_keeps_shared_tables() {
        let strict = ClassifierConfig::strict();
        let permissive = ClassifierConfig::permissive();

        assert_eq!(permissive.carrier_bonus, strict.carrier_bonus);
        assert_eq!(permissive.expiration_window, 50);
        assert_eq!(permissive.wrong_carrier_penalty, None);
        assert_eq!(permissive.acceptance_floor, None);
        assert_eq!(permissive.date_policy, DatePolicy::Permissive);
    }

    #[test]
    fn policy_parses_and_displays() {
        assert_eq!("STRICT".parse::<Policy>().unwrap(), Policy::Strict);
        assert_eq!("permissive".parse::<Policy>().unwrap(), Policy::Permissive);
        assert_eq!(Policy::Permissive.to_string(), "permissive");
    }

    #[test]
    fn unknown_policy_errors() {
        let err = "lenient".parse::<Policy>().unwrap_err();
        assert!(err.to_string().starts_with("unknown policy: lenient"));
    }

    #[test]
    fn default_policy_is_strict() {
        assert_eq!(Policy::default(), Policy::Strict);
        assert_eq!(ClassifierConfig::default().date_policy, DatePolicy::Strict);
    }
}
