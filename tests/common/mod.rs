//! Shared test constants and helpers for integration tests.

#![allow(dead_code)]

/// The headers recognized by default.
pub fn default_headers() -> Vec<String> {
    ["Quellen", "Sources", "Citations:"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// A typical pasted answer: body citations followed by a sources list.
pub const ANSWER: &str = "See [1] and [2].

Sources
[1] Example Site https://example.com/a
[2] https://example.com/b";

/// `ANSWER` after conversion with the default headers.
pub const ANSWER_CONVERTED: &str = "See [`[1]`](https://example.com/a) and [`[2]`](https://example.com/b).

Sources
\\[1\\] [Example Site](https://example.com/a)
\\[2\\] https://example.com/b";

/// Build a sources section from `(number, label, url)` triples.
///
/// An empty label produces a bare `[n] url` entry.
pub fn build_sources(header: &str, entries: &[(&str, &str, &str)]) -> String {
    let mut out = String::from(header);
    for (number, label, url) in entries {
        out.push('\n');
        if label.is_empty() {
            out.push_str(&format!("[{}] {}", number, url));
        } else {
            out.push_str(&format!("[{}] {} {}", number, label, url));
        }
    }
    out
}
