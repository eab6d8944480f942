//! Mapping intents to what the caller should offer the user.
//!
//! The classifier stops at [`Intent`]. Notification layers need a concrete
//! link or calendar payload; this module builds those, keeping the URL
//! templates the carrier sites and map apps expect.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calendar::{local_midnight, parse_date};
use crate::intent::{Carrier, Intent};

const CALENDAR_DESCRIPTION: &str = "Detected auto-action";

/// A ready-to-dispatch action for a classified intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    OpenUrl {
        label: &'static str,
        url: String,
    },
    OpenMap {
        label: &'static str,
        /// `geo:` URI for native map apps.
        geo_uri: String,
        web_url: String,
    },
    InsertCalendarEvent {
        label: &'static str,
        title: String,
        description: String,
        all_day: bool,
        /// Epoch milliseconds of local midnight, when the date parses.
        begin_millis: Option<i64>,
        end_millis: Option<i64>,
    },
    SaveExpense {
        label: &'static str,
        amount: Decimal,
        currency: String,
        merchant: Option<String>,
    },
}

impl Action {
    /// Builds the action for `intent`, or `None` for [`Intent::None`].
    pub fn from_intent(intent: &Intent) -> Option<Self> {
        Self::from_intent_with(intent, parse_date)
    }

    /// Like [`Action::from_intent`], with a caller-supplied date parser.
    pub fn from_intent_with(
        intent: &Intent,
        parse: impl Fn(&str) -> Option<NaiveDate>,
    ) -> Option<Self> {
        let action = match intent {
            Intent::TrackPackage {
                tracking_number,
                carrier,
            } => Self::OpenUrl {
                label: "Track Package",
                url: tracking_url(*carrier, tracking_number),
            },
            Intent::OpenMap { address } => {
                let query = urlencoding::encode(address);
                Self::OpenMap {
                    label: "Open Maps",
                    geo_uri: format!("geo:0,0?q={query}"),
                    web_url: format!("https://www.google.com/maps/search/?api=1&query={query}"),
                }
            }
            Intent::AddCalendarEvent { date, time, title } => {
                let millis = parse(date.as_str())
                    .and_then(local_midnight)
                    .map(|dt| dt.timestamp_millis());
                let description = match time {
                    Some(time) => format!("{CALENDAR_DESCRIPTION}: {date} {time}"),
                    None => format!("{CALENDAR_DESCRIPTION}: {date}"),
                };
                Self::InsertCalendarEvent {
                    label: "Add to Calendar",
                    title: title.clone(),
                    description,
                    all_day: true,
                    begin_millis: millis,
                    end_millis: millis,
                }
            }
            Intent::SaveExpense {
                amount,
                currency,
                merchant,
            } => Self::SaveExpense {
                label: "Save Expense",
                amount: *amount,
                currency: currency.clone(),
                merchant: merchant.clone(),
            },
            Intent::SearchError { error_code } => Self::OpenUrl {
                label: "Search Error",
                url: format!(
                    "https://www.google.com/search?q={}",
                    urlencoding::encode(error_code)
                ),
            },
            Intent::None => return None,
        };
        Some(action)
    }

    /// Short button label for the action.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OpenUrl { label, .. }
            | Self::OpenMap { label, .. }
            | Self::InsertCalendarEvent { label, .. }
            | Self::SaveExpense { label, .. } => *label,
        }
    }
}

/// Carrier tracking page for `code`, falling back to a web search.
pub fn tracking_url(carrier: Carrier, code: &str) -> String {
    match carrier {
        Carrier::FedEx => format!("https://www.fedex.com/fedextrack/?trknbr={code}"),
        Carrier::Ups => format!("https://www.ups.com/track?tracknum={code}"),
        Carrier::Usps => format!("https://tools.usps.com/go/TrackConfirmAction?tLabels={code}"),
        Carrier::Amazon | Carrier::Dhl => format!(
            "https://www.google.com/search?q={}+tracking+{code}",
            carrier.name()
        ),
    }
}
