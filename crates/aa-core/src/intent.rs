//! Classification results.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shipping carriers the tracking detector knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Carrier {
    Ups,
    Amazon,
    Usps,
    FedEx,
    Dhl,
}

impl Carrier {
    /// Every carrier, in the order they are first registered in the rule table.
    pub const ALL: [Self; 5] = [Self::Ups, Self::Amazon, Self::Usps, Self::FedEx, Self::Dhl];

    /// Display name, also the word searched for in the text.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ups => "UPS",
            Self::Amazon => "Amazon",
            Self::Usps => "USPS",
            Self::FedEx => "FedEx",
            Self::Dhl => "DHL",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Carrier {
    type Err = UnknownCarrier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|carrier| carrier.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCarrier(s.to_string()))
    }
}

impl Serialize for Carrier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Carrier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown carrier names.
#[derive(Debug, Clone, Error)]
#[error("unknown carrier: {0}")]
pub struct UnknownCarrier(String);

/// The single best-guess action extracted from a block of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    TrackPackage {
        tracking_number: String,
        carrier: Carrier,
    },
    AddCalendarEvent {
        /// The date exactly as it appeared in the text.
        date: String,
        time: Option<String>,
        title: String,
    },
    OpenMap {
        address: String,
    },
    SaveExpense {
        amount: Decimal,
        currency: String,
        merchant: Option<String>,
    },
    SearchError {
        error_code: String,
    },
    None,
}

impl Intent {
    /// Stable snake_case name of the variant, matching the serialized `type` tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TrackPackage { .. } => "track_package",
            Self::AddCalendarEvent { .. } => "add_calendar_event",
            Self::OpenMap { .. } => "open_map",
            Self::SaveExpense { .. } => "save_expense",
            Self::SearchError { .. } => "search_error",
            Self::None => "none",
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
