use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::ChannelRecord;

const HEADER_MARKER: &str = "#EXTM3U";
const ENTRY_MARKER: &str = "#EXTINF";

static TVG_NAME: Lazy<Regex> = Lazy::new(|| attribute_pattern("tvg-name"));
static TVG_LOGO: Lazy<Regex> = Lazy::new(|| attribute_pattern("tvg-logo"));
static GROUP_TITLE: Lazy<Regex> = Lazy::new(|| attribute_pattern("group-title"));
static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap_or_else(|e| panic!("invalid line break pattern: {}", e)));

fn attribute_pattern(key: &str) -> Regex {
    // key="value", value without quotes; an unterminated value never matches
    Regex::new(&format!(r#"{}="([^"]+)""#, regex::escape(key)))
        .unwrap_or_else(|e| panic!("invalid attribute pattern for {}: {}", key, e))
}

fn attribute_value(pattern: &Regex, line: &str) -> String {
    pattern
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Parses playlist lines into channel records, in source order
///
/// A leading `#EXTM3U` header (any case) is skipped. Every `#EXTINF` line
/// consumes the next line as its stream URL, whatever it contains. Any other
/// line is ignored.
pub fn parse_m3u<S: AsRef<str>>(lines: &[S]) -> Vec<ChannelRecord> {
    let mut records = Vec::new();
    let mut i = 0;

    if let Some(first) = lines.first() {
        if first
            .as_ref()
            .trim()
            .to_uppercase()
            .starts_with(HEADER_MARKER)
        {
            i = 1;
        }
    }

    while i < lines.len() {
        let line = lines[i].as_ref().trim();
        if line.starts_with(ENTRY_MARKER) {
            let stream_url = lines
                .get(i + 1)
                .map(|next| next.as_ref().trim().to_string())
                .unwrap_or_default();

            records.push(ChannelRecord {
                name: attribute_value(&TVG_NAME, line),
                logo_url: attribute_value(&TVG_LOGO, line),
                group: attribute_value(&GROUP_TITLE, line),
                stream_url,
            });
            i += 2;
        } else {
            i += 1;
        }
    }

    debug!("Parsed {} channel records from {} lines", records.len(), lines.len());
    records
}

/// Parses a whole playlist document, accepting `\n`, `\r\n` and bare `\r` line endings
pub fn parse_m3u_str(text: &str) -> Vec<ChannelRecord> {
    let mut lines: Vec<&str> = LINE_BREAK.split(text).collect();
    // A terminating line break does not open another line
    if lines.last() == Some(&"") {
        lines.pop();
    }
    parse_m3u(&lines)
}
