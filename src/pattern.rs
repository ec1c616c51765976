use std::collections::HashMap;

use regex::Regex;

/// Matches `input` against `pattern` and returns each named group's text.
///
/// Only the first match is used. Named groups that did not take part in it
/// map to an empty string; unnamed groups are ignored.
///
/// An invalid pattern or an input that does not match gives an empty map
/// rather than an error, so check patterns before relying on the result.
///
/// ```
/// let groups = tfprobe::capture_named_groups(r"(?P<year>\d{4})-(?P<month>\d{2})", "2024-05");
/// assert_eq!(groups["year"], "2024");
/// assert_eq!(groups["month"], "05");
/// ```
pub fn capture_named_groups(pattern: &str, input: &str) -> HashMap<String, String> {
    let regex = match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => {
            tracing::warn!(%pattern, error = %err, "invalid capture pattern");
            return HashMap::new();
        }
    };

    let Some(captures) = regex.captures(input) else {
        return HashMap::new();
    };

    regex
        .capture_names()
        .flatten()
        .map(|name| {
            let text = captures.name(name).map_or("", |m| m.as_str());
            (name.to_string(), text.to_string())
        })
        .collect()
}
