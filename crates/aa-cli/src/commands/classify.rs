//! Classify command for a single block of OCR text.

use std::io::Write;
use std::path::PathBuf;

use aa_core::source::read_or_empty;
use aa_core::{Action, FileSource, Intent, IntentClassifier, Policy, ReaderSource, TextSource};
use anyhow::Result;
use serde::Serialize;

use crate::Config;

/// Arguments for `aa classify`.
#[derive(Debug, Clone, Default)]
pub struct ClassifyArgs {
    pub file: Option<PathBuf>,
    pub json: bool,
    pub action: bool,
    pub policy: Option<Policy>,
}

#[derive(Debug, Serialize)]
struct ClassifyOutput<'a> {
    intent: &'a Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<Action>,
}

/// Runs the classify command, reading from the file argument or stdin.
pub fn run<W: Write>(writer: &mut W, args: &ClassifyArgs, config: &Config) -> Result<()> {
    match &args.file {
        Some(path) => run_with_source(writer, &mut FileSource::new(path), args, config),
        None => {
            let stdin = std::io::stdin();
            run_with_source(
                writer,
                &mut ReaderSource::new("stdin", stdin.lock()),
                args,
                config,
            )
        }
    }
}

/// Classifies whatever `source` yields and writes the result.
pub fn run_with_source<W: Write, S: TextSource + ?Sized>(
    writer: &mut W,
    source: &mut S,
    args: &ClassifyArgs,
    config: &Config,
) -> Result<()> {
    let policy = args.policy.unwrap_or(config.policy);
    let classifier = IntentClassifier::with_policy(policy);

    let text = read_or_empty(source, config.max_input_bytes);
    let intent = classifier.classify(&text);
    tracing::debug!(%policy, kind = intent.kind(), "classified input");

    let action = if args.action {
        Action::from_intent(&intent)
    } else {
        None
    };

    if args.json {
        let output = ClassifyOutput {
            intent: &intent,
            action,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
        return Ok(());
    }

    write_intent(writer, &intent)?;
    if let Some(action) = &action {
        write_action(writer, action)?;
    }
    Ok(())
}

/// Writes a human-readable description of `intent`.
pub fn write_intent<W: Write>(writer: &mut W, intent: &Intent) -> std::io::Result<()> {
    if intent.is_none() {
        return writeln!(writer, "No action detected.");
    }

    writeln!(writer, "Intent: {}", intent.kind())?;
    match intent {
        Intent::TrackPackage {
            tracking_number,
            carrier,
        } => {
            writeln!(writer, "Carrier: {carrier}")?;
            writeln!(writer, "Tracking number: {tracking_number}")?;
        }
        Intent::AddCalendarEvent { date, time, title } => {
            writeln!(writer, "Title: {title}")?;
            writeln!(writer, "Date: {date}")?;
            if let Some(time) = time {
                writeln!(writer, "Time: {time}")?;
            }
        }
        Intent::OpenMap { address } => {
            writeln!(writer, "Address: {address}")?;
        }
        Intent::SaveExpense {
            amount,
            currency,
            merchant,
        } => {
            writeln!(writer, "Amount: {currency}{amount}")?;
            if let Some(merchant) = merchant {
                writeln!(writer, "Merchant: {merchant}")?;
            }
        }
        Intent::SearchError { error_code } => {
            writeln!(writer, "Error code: {error_code}")?;
        }
        Intent::None => {}
    }
    Ok(())
}

fn write_action<W: Write>(writer: &mut W, action: &Action) -> std::io::Result<()> {
    writeln!(writer, "Action: {}", action.label())?;
    match action {
        Action::OpenUrl { url, .. } => writeln!(writer, "URL: {url}"),
        Action::OpenMap {
            geo_uri, web_url, ..
        } => {
            writeln!(writer, "Geo: {geo_uri}")?;
            writeln!(writer, "Web: {web_url}")
        }
        Action::InsertCalendarEvent { begin_millis, .. } => match begin_millis {
            Some(millis) => writeln!(writer, "Begins (epoch ms): {millis}"),
            None => writeln!(writer, "Begins (epoch ms): unknown"),
        },
        Action::SaveExpense { .. } => Ok(()),
    }
}
