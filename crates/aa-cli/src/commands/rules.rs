//! Rules command for listing the tracking-number rule table.

use std::io::Write;

use aa_core::tracking_rules;
use anyhow::Result;

/// Prints every tracking rule in the order it is evaluated.
pub fn run<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "{:<3} {:<7} {:<10} PATTERN", "#", "CARRIER", "KIND")?;
    for (i, rule) in tracking_rules().iter().enumerate() {
        writeln!(
            writer,
            "{:<3} {:<7} {:<10} {}",
            i + 1,
            rule.carrier.name(),
            rule.kind.as_str(),
            rule.pattern
        )?;
    }
    writeln!(writer)?;
    writeln!(writer, "Equal scores keep the earlier rule.")?;
    Ok(())
}
