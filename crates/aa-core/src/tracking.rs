//! Tracking-number detection.
//!
//! Digit-only tracking formats overlap heavily between carriers: a bare
//! 20-digit number could be USPS or `FedEx`, a 12-digit one could be a `FedEx`
//! label or an order ID. Every rule is evaluated and scored, and the best
//! score wins.
//!
//! # Scoring
//!
//! 1. Carrier named in the text: `+carrier_bonus`.
//! 2. Otherwise a generic-length match (10, 12 or 15 digits) needs a tracking
//!    keyword or some carrier name somewhere in the text, or it is dropped.
//! 3. Otherwise, with the penalty enabled, another carrier named: `-penalty`.
//!    Specific rules are exempt since no other carrier shares their format.
//! 4. Length of the matched code.
//! 5. Contested 20-digit rule with its carrier named: `+collision_bonus`.
//!
//! Scores must beat the acceptance floor when one is configured. Ties keep the
//! earlier rule.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ClassifierConfig;
use crate::intent::Carrier;

/// How a rule's pattern relates to other carriers' patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Prefix or length unique to the carrier.
    Specific,
    /// Pure digit length shared by several carriers and by everyday numbers.
    /// Requires tracking context.
    Generic,
    /// The 20-digit length claimed by both USPS and `FedEx`.
    Contested,
}

impl RuleKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Specific => "specific",
            Self::Generic => "generic",
            Self::Contested => "contested",
        }
    }
}

/// A carrier-specific pattern for shipment identifiers.
#[derive(Debug)]
pub struct TrackingRule {
    pub carrier: Carrier,
    pub pattern: &'static str,
    pub kind: RuleKind,
    regex: Regex,
}

impl TrackingRule {
    /// Returns the first match of this rule in `text`.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex.find(text).map(|m| m.as_str())
    }
}

/// Rule table in evaluation order.
///
/// The order only matters on exact score ties, where the earlier rule wins.
/// That tie-break is arbitrary; it is kept so results stay stable.
const RULE_TABLE: &[(Carrier, &str, RuleKind)] = &[
    (Carrier::Ups, r"\b1Z[0-9A-Z]{16}\b", RuleKind::Specific),
    (Carrier::Amazon, r"\bTBA[0-9]{12}\b", RuleKind::Specific),
    (Carrier::Usps, r"\b[0-9]{22}\b", RuleKind::Specific),
    (Carrier::Usps, r"\b9[0-9]{21}\b", RuleKind::Specific),
    (Carrier::Usps, r"\b[0-9]{20}\b", RuleKind::Contested),
    (Carrier::FedEx, r"\b[0-9]{12}\b", RuleKind::Generic),
    (Carrier::FedEx, r"\b[0-9]{15}\b", RuleKind::Generic),
    (Carrier::FedEx, r"\b[0-9]{20}\b", RuleKind::Contested),
    (Carrier::Dhl, r"\b[0-9]{10}\b", RuleKind::Generic),
];

static TRACKING_RULES: LazyLock<Vec<TrackingRule>> = LazyLock::new(|| {
    RULE_TABLE
        .iter()
        .map(|&(carrier, pattern, kind)| TrackingRule {
            carrier,
            pattern,
            kind,
            regex: Regex::new(pattern).unwrap(),
        })
        .collect()
});

/// Whole-word, case-insensitive carrier name matchers.
static CARRIER_MENTIONS: LazyLock<Vec<(Carrier, Regex)>> = LazyLock::new(|| {
    Carrier::ALL
        .into_iter()
        .map(|carrier| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(carrier.name()))).unwrap();
            (carrier, re)
        })
        .collect()
});

/// Returns the compiled tracking rules in evaluation order.
pub fn tracking_rules() -> &'static [TrackingRule] {
    &TRACKING_RULES
}

/// The winning tracking match and its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingCandidate {
    pub tracking_number: String,
    pub carrier: Carrier,
    pub score: i32,
}

/// Removes runs of whitespace and hyphens that sit between two ASCII digits.
///
/// `"9434 6301-0000"` becomes `"943463010000"`, and so does a number wrapped
/// onto a second line. Separators next to anything other than a digit on
/// either side are kept.
pub fn collapse_digit_separators(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if is_separator(c) && i > 0 && chars[i - 1].is_ascii_digit() {
            let run_end = chars[i..]
                .iter()
                .position(|&ch| !is_separator(ch))
                .map_or(chars.len(), |offset| i + offset);

            if run_end < chars.len() && chars[run_end].is_ascii_digit() {
                i = run_end;
                continue;
            }
            out.extend(&chars[i..run_end]);
            i = run_end;
            continue;
        }
        out.push(c);
        i += 1;
    }

    out
}

fn is_separator(c: char) -> bool {
    c == '-' || c.is_whitespace()
}

/// Carriers named anywhere in the text, as whole words.
pub fn mentioned_carriers(text: &str) -> Vec<Carrier> {
    CARRIER_MENTIONS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(carrier, _)| *carrier)
        .collect()
}

/// Finds the best-scoring tracking number in `text`.
pub fn detect_tracking(text: &str, config: &ClassifierConfig) -> Option<TrackingCandidate> {
    let normalized = collapse_digit_separators(text);
    let lower = text.to_lowercase();
    let mentioned = mentioned_carriers(text);
    let has_context =
        !mentioned.is_empty() || config.tracking_keywords.iter().any(|k| lower.contains(k));

    let mut best: Option<TrackingCandidate> = None;

    for rule in tracking_rules() {
        // Joining lines can glue a code to the next line's leading digits,
        // so fall back to the text as written.
        let Some(number) = rule.find(&normalized).or_else(|| rule.find(text)) else {
            continue;
        };

        let Some(score) = score_match(rule, number, &mentioned, has_context, config) else {
            tracing::trace!(carrier = %rule.carrier, pattern = rule.pattern, "generic match without tracking context");
            continue;
        };

        if config.acceptance_floor.is_some_and(|floor| score <= floor) {
            tracing::trace!(carrier = %rule.carrier, score, "below acceptance floor");
            continue;
        }

        tracing::trace!(carrier = %rule.carrier, pattern = rule.pattern, score, "scored tracking match");

        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(TrackingCandidate {
                tracking_number: number.to_string(),
                carrier: rule.carrier,
                score,
            });
        }
    }

    if let Some(winner) = &best {
        tracing::debug!(carrier = %winner.carrier, score = winner.score, "tracking number detected");
    }
    best
}

/// Scores one rule's match. `None` means the match is rejected outright.
fn score_match(
    rule: &TrackingRule,
    number: &str,
    mentioned: &[Carrier],
    has_context: bool,
    config: &ClassifierConfig,
) -> Option<i32> {
    let named = mentioned.contains(&rule.carrier);
    let mut score = 0;

    if named {
        score += config.carrier_bonus;
    } else {
        if rule.kind == RuleKind::Generic && !has_context {
            return None;
        }
        if let Some(penalty) = config.wrong_carrier_penalty {
            if rule.kind != RuleKind::Specific && !mentioned.is_empty() {
                score -= penalty;
            }
        }
    }

    score += i32::try_from(number.chars().count()).unwrap_or(i32::MAX);

    if rule.kind == RuleKind::Contested && named {
        score += config.collision_bonus;
    }

    Some(score)
}
