//! Citation marker and reference line parser.
//!
//! Recognizes numeric citation markers like `[3]` and the reference lines of a
//! sources section, e.g. `[3] Example Site https://example.com/page`.

use std::sync::LazyLock;

use regex::Regex;

/// First bracketed number in a line. ASCII digits only: `\d` would also accept
/// other Unicode decimal digits.
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]+)\]").expect("citation number regex is valid"));

/// First HTTP(S) URL in a line, up to the next whitespace.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("url regex is valid"));

/// A parsed entry from the sources section.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    /// The citation number as written (leading zeros preserved)
    pub number: String,
    /// The URL the citation points to
    pub url: String,
    /// Text between the bracketed number and the URL, if any
    pub label: Option<String>,
}

/// Finds the first bracketed citation number in a line.
///
/// # Examples
///
/// ```
/// use cite_links::markdown::find_citation_number;
///
/// assert_eq!(find_citation_number("see [12] and [3]"), Some("12"));
/// assert_eq!(find_citation_number("no markers here"), None);
/// ```
pub fn find_citation_number(line: &str) -> Option<&str> {
    NUMBER_RE
        .captures(line)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Finds the first `http://` or `https://` URL in a line.
pub fn find_url(line: &str) -> Option<&str> {
    URL_RE.find(line).map(|m| m.as_str().trim())
}

/// Parses a line from the sources section.
///
/// Returns `None` when the line lacks a citation number or a URL, or when the
/// literal `http` sits at the very start of the line so no label span exists.
/// The label is the trimmed text between the first `]` and the first `http`;
/// it is `None` when that span is empty or inverted.
///
/// # Examples
///
/// ```
/// use cite_links::markdown::parse_reference_line;
///
/// let entry = parse_reference_line("[1] Example Site https://example.com/a").unwrap();
/// assert_eq!(entry.number, "1");
/// assert_eq!(entry.url, "https://example.com/a");
/// assert_eq!(entry.label.as_deref(), Some("Example Site"));
/// ```
pub fn parse_reference_line(line: &str) -> Option<ReferenceLine> {
    let number = find_citation_number(line)?;
    let url = find_url(line)?;

    let text_start = line.find(']')? + 1;
    let text_end = line.find("http")?;
    if text_end == 0 {
        return None;
    }

    let label = if text_end > text_start {
        let text = line[text_start..text_end].trim();
        (!text.is_empty()).then(|| text.to_string())
    } else {
        None
    };

    Some(ReferenceLine {
        number: number.to_string(),
        url: url.to_string(),
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- find_citation_number ---

    #[test]
    fn test_number_simple() {
        assert_eq!(find_citation_number("[1] Example"), Some("1"));
    }

    #[test]
    fn test_number_first_occurrence_wins() {
        // Given: A line with several bracketed numbers
        let line = "text [7] more [8]";

        // When: We look for the citation number
        let number = find_citation_number(line);

        // Then: The first one is returned
        assert_eq!(number, Some("7"));
    }

    #[test]
    fn test_number_leading_zeros_preserved() {
        assert_eq!(find_citation_number("[007] Bond"), Some("007"));
    }

    #[test]
    fn test_number_ignores_non_numeric_brackets() {
        assert_eq!(find_citation_number("[a] [1b] [ 2 ]"), None);
    }

    #[test]
    fn test_number_ignores_escaped_markers() {
        // Given: An already-converted reference line
        let line = r"\[1\] [Example Site](https://example.com/a)";

        // When: We look for the citation number
        let number = find_citation_number(line);

        // Then: The escaped marker does not count
        assert_eq!(number, None);
    }

    #[test]
    fn test_number_rejects_non_ascii_digits() {
        // Arabic-Indic digits are decimal digits in Unicode, but not citation numbers
        assert_eq!(find_citation_number("[\u{0663}] text"), None);
    }

    // --- find_url ---

    #[test]
    fn test_url_https() {
        assert_eq!(
            find_url("[1] Site https://example.com/a?b=c#d tail"),
            Some("https://example.com/a?b=c#d")
        );
    }

    #[test]
    fn test_url_http() {
        assert_eq!(find_url("[2] http://example.org"), Some("http://example.org"));
    }

    #[test]
    fn test_url_missing() {
        assert_eq!(find_url("[3] Some text, no link"), None);
        assert_eq!(find_url("ftp://example.com"), None);
    }

    #[test]
    fn test_url_bare_scheme_is_not_a_url() {
        assert_eq!(find_url("see https:// for details"), None);
    }

    // --- parse_reference_line ---

    #[test]
    fn test_parse_with_label() {
        // Given: A reference line with a title before the URL
        let line = "[1] Example Site https://example.com/a";

        // When: We parse it
        let entry = parse_reference_line(line).unwrap();

        // Then: Number, URL and label are extracted
        assert_eq!(entry.number, "1");
        assert_eq!(entry.url, "https://example.com/a");
        assert_eq!(entry.label, Some("Example Site".to_string()));
    }

    #[test]
    fn test_parse_without_label() {
        let entry = parse_reference_line("[2] https://example.com/b").unwrap();
        assert_eq!(entry.number, "2");
        assert_eq!(entry.url, "https://example.com/b");
        assert_eq!(entry.label, None);
    }

    #[test]
    fn test_parse_missing_url() {
        assert_eq!(parse_reference_line("[3] Some text, no link"), None);
    }

    #[test]
    fn test_parse_missing_number() {
        assert_eq!(parse_reference_line("Example https://example.com"), None);
    }

    #[test]
    fn test_parse_url_before_number_has_no_label() {
        // Given: A line where the URL comes before the bracketed number
        let line = "- https://example.com/x [4]";

        // When: We parse it
        let entry = parse_reference_line(line).unwrap();

        // Then: The label span is inverted, so there is no label
        assert_eq!(entry.number, "4");
        assert_eq!(entry.url, "https://example.com/x");
        assert_eq!(entry.label, None);
    }

    #[test]
    fn test_parse_http_at_line_start_is_rejected() {
        assert_eq!(parse_reference_line("https://example.com/x [4]"), None);
    }

    #[test]
    fn test_parse_label_stops_at_first_http_literal() {
        // Given: A label mentioning "httpd" before the actual URL
        let line = "[5] Apache httpd docs https://httpd.apache.org";

        // When: We parse it
        let entry = parse_reference_line(line).unwrap();

        // Then: The label ends at the first "http", wherever it occurs
        assert_eq!(entry.label, Some("Apache".to_string()));
        assert_eq!(entry.url, "https://httpd.apache.org");
    }

    #[test]
    fn test_parse_label_with_unicode() {
        let entry = parse_reference_line("[6] Übersicht – Wikipédia https://de.wikipedia.org").unwrap();
        assert_eq!(entry.label, Some("Übersicht – Wikipédia".to_string()));
    }

    #[test]
    fn test_parse_list_prefix_before_number() {
        // Given: A markdown list item wrapping the reference
        let line = "1. [1] Docs https://docs.rs";

        // When: We parse it
        let entry = parse_reference_line(line).unwrap();

        // Then: The label starts after the first closing bracket
        assert_eq!(entry.number, "1");
        assert_eq!(entry.label, Some("Docs".to_string()));
    }
}
