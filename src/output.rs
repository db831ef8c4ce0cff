//! Output generation for linked citations and reformatted reference lines.
//!
//! This module holds the two-pass rewrite: the sources section is read into a
//! [`ReferenceMap`], then every line is emitted again, either as a reformatted
//! reference entry or as a body line with its citation markers linked.

use tracing::debug;

use crate::markdown::{parse_reference_line, ReferenceLine};
use crate::refs::{contains_header, extract_references, is_header_line, ReferenceMap};

/// Result of a rewrite, with what was found along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Rewrite {
    /// The rewritten text
    pub text: String,
    /// Whether any line matched a header once trimmed
    pub header_found: bool,
    /// Whether an exact header line opened a sources section
    pub section_found: bool,
    /// The references extracted from the sources section
    pub references: ReferenceMap,
    /// Number of citation markers turned into links in body lines
    pub citations_linked: usize,
}

impl Rewrite {
    fn unchanged(text: &str) -> Self {
        Rewrite {
            text: text.to_string(),
            header_found: false,
            section_found: false,
            references: ReferenceMap::new(),
            citations_linked: 0,
        }
    }
}

/// Formats a reference entry with an escaped number marker.
///
/// With a label the URL becomes a Markdown link, otherwise it is left bare.
pub fn format_reference_line(entry: &ReferenceLine) -> String {
    match &entry.label {
        Some(label) => format!(r"\[{}\] [{}]({})", entry.number, label, entry.url),
        None => format!(r"\[{}\] {}", entry.number, entry.url),
    }
}

/// Replaces every `[n]` marker in a body line with a link to its URL.
///
/// Entries are applied in the map's order. Returns the new line and the number
/// of markers replaced.
pub fn link_citations(line: &str, refs: &ReferenceMap) -> (String, usize) {
    let mut current = line.to_string();
    let mut count = 0;

    for (number, url) in refs.iter() {
        let marker = format!("[{}]", number);
        let hits = current.matches(marker.as_str()).count();
        if hits > 0 {
            count += hits;
            current = current.replace(&marker, &format!("[`[{}]`]({})", number, url));
        }
    }

    (current, count)
}

/// Rewrites citation markers into Markdown links.
///
/// # Arguments
///
/// * `text` - The text to transform, lines separated by `\n`
/// * `headers` - Lines that mark the start of the sources section
///
/// # Returns
///
/// The rewritten text, with the same number of lines. Text without a sources
/// header is returned unchanged.
///
/// # Examples
///
/// ```
/// use cite_links::rewrite;
///
/// let headers = vec!["Sources".to_string()];
/// let text = "Fact [1].\nSources\n[1] https://example.com";
/// assert_eq!(
///     rewrite(text, &headers),
///     "Fact [`[1]`](https://example.com).\nSources\n\\[1\\] https://example.com"
/// );
/// ```
pub fn rewrite(text: &str, headers: &[String]) -> String {
    rewrite_with_summary(text, headers).text
}

/// Same as [`rewrite`], also reporting the section state and link counts.
pub fn rewrite_with_summary(text: &str, headers: &[String]) -> Rewrite {
    if text.is_empty() {
        return Rewrite::unchanged(text);
    }

    let lines: Vec<&str> = text.split('\n').collect();

    if !contains_header(&lines, headers) {
        debug!(lines = lines.len(), "no sources header found, text left unchanged");
        return Rewrite::unchanged(text);
    }

    let references = extract_references(&lines, headers);
    debug!(references = references.len(), "extracted sources section");

    let mut rewritten: Vec<String> = Vec::with_capacity(lines.len());
    let mut in_sources = false;
    let mut section_found = false;
    let mut citations_linked = 0;

    for line in &lines {
        if is_header_line(line, headers) {
            in_sources = true;
            section_found = true;
            rewritten.push(line.to_string());
            continue;
        }

        // Empty lines inside the section take the body branch; there is
        // nothing in them to link.
        if in_sources && !line.is_empty() {
            match parse_reference_line(line) {
                Some(entry) => rewritten.push(format_reference_line(&entry)),
                None => rewritten.push(line.to_string()),
            }
        } else {
            let (linked, count) = link_citations(line, &references);
            citations_linked += count;
            rewritten.push(linked);
        }
    }

    Rewrite {
        text: rewritten.join("\n"),
        header_found: true,
        section_found,
        references,
        citations_linked,
    }
}
