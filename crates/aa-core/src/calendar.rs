//! Date and time detection for calendar events.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use regex::Regex;

use crate::config::{ClassifierConfig, DatePolicy, EXPIRATION_TITLE};
use crate::intent::Intent;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{1,2}[/-][0-9]{1,2}[/-][0-9]{2,4}\b").unwrap());

static DATE_PARTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})([/-])([0-9]{1,2})([/-])([0-9]{2,4})$").unwrap()
});

static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b[0-9]{1,2}:[0-9]{2}\s?(?:AM|PM)?\b").unwrap());

/// A numeric month/day/year layout.
#[derive(Debug, Clone, Copy)]
struct DateFormat {
    separator: &'static str,
    /// Month and day must be written with exactly two digits.
    padded: bool,
    year_digits: usize,
}

/// `MM/dd/yyyy`, `MM-dd-yyyy`, `M/d/yyyy`, `MM/dd/yy`, tried in order.
const DATE_FORMATS: [DateFormat; 4] = [
    DateFormat {
        separator: "/",
        padded: true,
        year_digits: 4,
    },
    DateFormat {
        separator: "-",
        padded: true,
        year_digits: 4,
    },
    DateFormat {
        separator: "/",
        padded: false,
        year_digits: 4,
    },
    DateFormat {
        separator: "/",
        padded: true,
        year_digits: 2,
    },
];

/// Parses a detected date string against the supported formats.
///
/// Invalid calendar dates (month 13, February 30) are rejected rather than
/// rolled over. Two-digit years resolve relative to today.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    parse_date_relative(date, Local::now().date_naive())
}

/// Like [`parse_date`], with two-digit years resolved around `today`.
pub fn parse_date_relative(date: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = DATE_PARTS_RE.captures(date.trim())?;
    let (month, sep1, day, sep2, year) = (&caps[1], &caps[2], &caps[3], &caps[4], &caps[5]);

    DATE_FORMATS.iter().find_map(|format| {
        if sep1 != format.separator || sep2 != format.separator {
            return None;
        }
        if format.padded && (month.len() != 2 || day.len() != 2) {
            return None;
        }
        if year.len() != format.year_digits {
            return None;
        }

        let month: u32 = month.parse().ok()?;
        let day: u32 = day.parse().ok()?;
        let mut year: i32 = year.parse().ok()?;
        if format.year_digits == 2 {
            year = pivot_two_digit_year(year, today.year());
        }

        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// Places a two-digit year within 80 years before and 20 years after `current_year`.
fn pivot_two_digit_year(yy: i32, current_year: i32) -> i32 {
    let candidate = current_year - current_year.rem_euclid(100) + yy;
    if candidate > current_year + 20 {
        candidate - 100
    } else if candidate <= current_year - 80 {
        candidate + 100
    } else {
        candidate
    }
}

/// Local midnight at the start of `date`.
///
/// When midnight falls into a DST gap, 1 AM is used instead.
pub fn local_midnight(date: NaiveDate) -> Option<DateTime<Local>> {
    match Local.from_local_datetime(&date.and_time(NaiveTime::MIN)) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt),
        LocalResult::None => Local
            .from_local_datetime(&date.and_hms_opt(1, 0, 0)?)
            .earliest(),
    }
}

/// Finds a calendar-worthy date according to the configured [`DatePolicy`].
pub fn detect_calendar_event(
    text: &str,
    config: &ClassifierConfig,
    now: NaiveDateTime,
) -> Option<Intent> {
    let date = match config.date_policy {
        DatePolicy::Permissive => DATE_RE.find(text)?.as_str().to_string(),
        DatePolicy::Strict => find_expiration_date(text, config, now)?,
    };

    let time = TIME_RE.find(text).map(|m| m.as_str().trim().to_string());
    let title = match config.date_policy {
        DatePolicy::Permissive => first_non_blank_line(text).unwrap_or_default(),
        DatePolicy::Strict => EXPIRATION_TITLE.to_string(),
    };

    tracing::debug!(%date, ?time, "calendar date detected");
    Some(Intent::AddCalendarEvent { date, time, title })
}

/// First date that parses, lies after `now`, and has an expiration keyword nearby.
fn find_expiration_date(
    text: &str,
    config: &ClassifierConfig,
    now: NaiveDateTime,
) -> Option<String> {
    let lower = text.to_lowercase();

    DATE_RE.find_iter(&lower).find_map(|m| {
        let Some(date) = parse_date_relative(m.as_str(), now.date()) else {
            tracing::trace!(date = m.as_str(), "skipping unparseable date");
            return None;
        };
        if date.and_time(NaiveTime::MIN) <= now {
            tracing::trace!(date = m.as_str(), "skipping date that is not in the future");
            return None;
        }

        let window = context_window(&lower, m.start(), m.end(), config.expiration_window);
        if !config.expiration_keywords.iter().any(|k| window.contains(k)) {
            tracing::trace!(date = m.as_str(), "no expiration keyword near date");
            return None;
        }

        Some(m.as_str().to_string())
    })
}

/// Slice of `text` covering up to `radius` characters either side of `start..end`.
fn context_window(text: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = if radius == 0 {
        start
    } else {
        text[..start]
            .char_indices()
            .rev()
            .nth(radius - 1)
            .map_or(0, |(i, _)| i)
    };
    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map_or(text.len(), |(i, _)| end + i);
    &text[from..to]
}

pub(crate) fn first_non_blank_line(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(String::from)
}
