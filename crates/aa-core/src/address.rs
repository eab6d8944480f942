//! Street address detection.

/// Returns the first line that names a street suffix and starts with a house number.
pub fn detect_address(text: &str, suffixes: &[&str]) -> Option<String> {
    let suffixes: Vec<String> = suffixes.iter().map(|s| s.to_lowercase()).collect();

    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with(|c: char| c.is_ascii_digit()))
        .find(|line| {
            let lower = line.to_lowercase();
            suffixes.iter().any(|s| lower.contains(s.as_str()))
        })
        .map(String::from)
}
