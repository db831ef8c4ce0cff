//! Reference map extraction.
//!
//! Locates the sources section of a text by its header line and collects the
//! citation number → URL mapping from the entries that follow it.

use std::collections::HashMap;

use tracing::debug;

use crate::markdown::{find_citation_number, find_url};

/// Citation numbers mapped to URLs.
///
/// Iteration follows the order in which each number was first recorded; a
/// later insert for the same number replaces the URL but keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` for `number`, overwriting any previous URL.
    pub fn insert(&mut self, number: &str, url: &str) {
        match self.index.get(number) {
            Some(&pos) => self.entries[pos].1 = url.to_string(),
            None => {
                self.index.insert(number.to_string(), self.entries.len());
                self.entries.push((number.to_string(), url.to_string()));
            }
        }
    }

    pub fn get(&self, number: &str) -> Option<&str> {
        self.index
            .get(number)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(number, url)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, u)| (n.as_str(), u.as_str()))
    }
}

/// Exact (untrimmed) comparison used as the section boundary.
pub fn is_header_line(line: &str, headers: &[String]) -> bool {
    headers.iter().any(|h| h == line)
}

/// Lenient probe: does any line, once trimmed, equal a header?
pub fn contains_header<S: AsRef<str>>(lines: &[S], headers: &[String]) -> bool {
    lines
        .iter()
        .any(|line| is_header_line(line.as_ref().trim(), headers))
}

/// Builds the reference map from the sources section.
///
/// Everything after the first exact header line belongs to the section; a
/// later header does not close it. Entries lacking either a bracketed number
/// or a URL are skipped.
///
/// # Examples
///
/// ```
/// use cite_links::refs::extract_references;
///
/// let lines = ["Body [1]", "Sources", "[1] https://example.com"];
/// let headers = vec!["Sources".to_string()];
/// let refs = extract_references(&lines, &headers);
/// assert_eq!(refs.get("1"), Some("https://example.com"));
/// ```
pub fn extract_references<S: AsRef<str>>(lines: &[S], headers: &[String]) -> ReferenceMap {
    let mut refs = ReferenceMap::new();
    let mut in_sources = false;

    for line in lines {
        let line = line.as_ref();

        if is_header_line(line, headers) {
            in_sources = true;
            continue;
        }

        if in_sources && !line.is_empty() {
            if let (Some(number), Some(url)) = (find_citation_number(line), find_url(line)) {
                if let Some(previous) = refs.get(number) {
                    debug!(number, previous, url, "duplicate reference number, last one wins");
                }
                refs.insert(number, url);
            }
        }
    }

    refs
}
