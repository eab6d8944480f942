//! Scan command for classifying a directory of OCR text files.

use std::io::Write;
use std::path::PathBuf;

use aa_core::{Intent, IntentClassifier, Policy, ScanEntry, scan_directory};
use anyhow::{Context, Result};

use crate::Config;

/// Arguments for `aa scan`.
#[derive(Debug, Clone)]
pub struct ScanArgs {
    pub dir: PathBuf,
    pub json: bool,
    pub ext: Option<String>,
    pub policy: Option<Policy>,
}

/// Runs the scan command, one line per file.
pub fn run<W: Write>(writer: &mut W, args: &ScanArgs, config: &Config) -> Result<()> {
    let policy = args.policy.unwrap_or(config.policy);
    let classifier = IntentClassifier::with_policy(policy);
    let extension = args.ext.as_deref().unwrap_or(&config.scan_extension);

    let entries = scan_directory(&args.dir, extension, &classifier, config.max_input_bytes)
        .with_context(|| format!("failed to scan {}", args.dir.display()))?;
    tracing::debug!(count = entries.len(), %policy, "scan complete");

    if args.json {
        for entry in &entries {
            writeln!(writer, "{}", serde_json::to_string(entry)?)?;
        }
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(writer, "No *.{extension} files found.")?;
        return Ok(());
    }

    for entry in &entries {
        write_entry(writer, entry)?;
    }

    let matched = entries.iter().filter(|e| !e.intent.is_none()).count();
    writeln!(writer, "{matched} of {} files matched.", entries.len())?;
    Ok(())
}

fn write_entry<W: Write>(writer: &mut W, entry: &ScanEntry) -> std::io::Result<()> {
    let name = entry
        .path
        .file_name()
        .map_or_else(|| entry.path.display().to_string(), |n| n.to_string_lossy().into_owned());
    writeln!(writer, "{name}: {}", summarize(&entry.intent))
}

/// One-line summary of an intent.
pub fn summarize(intent: &Intent) -> String {
    match intent {
        Intent::TrackPackage {
            tracking_number,
            carrier,
        } => format!("track {carrier} {tracking_number}"),
        Intent::AddCalendarEvent { date, time, title } => match time {
            Some(time) => format!("calendar {date} {time} ({title})"),
            None => format!("calendar {date} ({title})"),
        },
        Intent::OpenMap { address } => format!("map {address}"),
        Intent::SaveExpense {
            amount,
            currency,
            merchant,
        } => match merchant {
            Some(merchant) => format!("expense {currency}{amount} at {merchant}"),
            None => format!("expense {currency}{amount}"),
        },
        Intent::SearchError { error_code } => format!("search {error_code}"),
        Intent::None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    use insta::assert_snapshot;

    fn args(dir: PathBuf) -> ScanArgs {
        ScanArgs {
            dir,
            json: false,
            ext: None,
            policy: None,
        }
    }

    #[test]
    fn scan_lists_each_file() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("1.txt"), "USPS shipment 12345678901234567890").unwrap();
        fs::write(temp.path().join("2.txt"), "Corner Deli\nTotal £3,20").unwrap();
        fs::write(temp.path().join("3.txt"), "Valid until 12/31/2099").unwrap();
        fs::write(temp.path().join("4.txt"), "hello").unwrap();

        let mut output = Vec::new();
        run(&mut output, &args(temp.path().to_path_buf()), &Config::default()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        1.txt: track USPS 12345678901234567890
        2.txt: expense £3.20 at Corner Deli
        3.txt: calendar 12/31/2099 (Document Expiration)
        4.txt: none
        3 of 4 files matched.
        ");
    }

    #[test]
    fn scan_honours_extension_override() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("shot.txt"), "Error 404").unwrap();
        fs::write(temp.path().join("shot.ocr"), "Status 0x1F").unwrap();

        let mut output = Vec::new();
        let scan_args = ScanArgs {
            ext: Some("ocr".to_string()),
            ..args(temp.path().to_path_buf())
        };
        run(&mut output, &scan_args, &Config::default()).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @r"
        shot.ocr: search Status 0x1F
        1 of 1 files matched.
        ");
    }

    #[test]
    fn scan_reports_empty_directory() {
        let temp = tempfile::tempdir().unwrap();
        let mut output = Vec::new();
        run(&mut output, &args(temp.path().to_path_buf()), &Config::default()).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @"No *.txt files found.");
    }

    #[test]
    fn scan_json_emits_one_line_per_file() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), "123 Main Street").unwrap();
        fs::write(temp.path().join("b.txt"), "nothing").unwrap();

        let mut output = Vec::new();
        let scan_args = ScanArgs {
            json: true,
            ..args(temp.path().to_path_buf())
        };
        run(&mut output, &scan_args, &Config::default()).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["intent"]["type"], "open_map");
        assert_eq!(lines[1]["intent"]["type"], "none");
    }
}
