//! Line-range selection within a document.
//!
//! The rewriter works on whatever text it is handed. This module decides what
//! that text is: an explicit range of lines, the whole document when the
//! select-all policy allows it, or nothing at all.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::output::{rewrite_with_summary, Rewrite};
use crate::settings::Settings;

/// Errors that can occur when selecting lines.
#[derive(Error, Debug, PartialEq)]
pub enum SelectionError {
    #[error("Invalid line range '{0}': expected START:END or a single line number")]
    InvalidRange(String),

    #[error("Line numbers start at 1, got {0}")]
    ZeroLine(String),

    #[error("Line range {start}:{end} ends before it starts")]
    Reversed { start: usize, end: usize },

    #[error("Line range {start}:{end} is outside the document ({lines} line(s))")]
    OutOfBounds {
        start: usize,
        end: usize,
        lines: usize,
    },
}

/// An inclusive, 1-based range of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Result<LineRange, SelectionError> {
        if start == 0 || end == 0 {
            return Err(SelectionError::ZeroLine(format!("{}:{}", start, end)));
        }
        if end < start {
            return Err(SelectionError::Reversed { start, end });
        }
        Ok(LineRange { start, end })
    }
}

impl FromStr for LineRange {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| SelectionError::InvalidRange(s.to_string()))
        };

        match s.split_once(':') {
            Some((start, end)) => LineRange::new(parse(start)?, parse(end)?),
            None => {
                let line = parse(s)?;
                LineRange::new(line, line)
            }
        }
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// The part of a document handed to the rewriter.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// The whole document
    All,
    /// Zero-based line indices `first..last` (exclusive end)
    Lines { first: usize, last: usize },
    /// Nothing selected
    Empty,
}

impl Selection {
    /// The selected text.
    pub fn text(&self, document: &str) -> String {
        match self {
            Selection::All => document.to_string(),
            Selection::Lines { first, last } => {
                let lines: Vec<&str> = document.split('\n').collect();
                lines[*first..*last].join("\n")
            }
            Selection::Empty => String::new(),
        }
    }

    /// Puts `replacement` in place of the selected text.
    ///
    /// An empty selection leaves the document untouched, as there is no place
    /// to insert the replacement.
    pub fn replace(&self, document: &str, replacement: &str) -> String {
        match self {
            Selection::All => replacement.to_string(),
            Selection::Lines { first, last } => {
                let lines: Vec<&str> = document.split('\n').collect();
                let mut out: Vec<&str> = Vec::with_capacity(lines.len());
                out.extend_from_slice(&lines[..*first]);
                out.push(replacement);
                out.extend_from_slice(&lines[*last..]);
                out.join("\n")
            }
            Selection::Empty => document.to_string(),
        }
    }
}

/// Resolves which part of `document` to rewrite.
///
/// # Errors
///
/// Returns an error if `range` reaches past the last line of the document.
pub fn select(
    document: &str,
    range: Option<LineRange>,
    auto_select_all: bool,
) -> Result<Selection, SelectionError> {
    match range {
        Some(range) => {
            let lines = document.split('\n').count();
            if range.end > lines {
                return Err(SelectionError::OutOfBounds {
                    start: range.start,
                    end: range.end,
                    lines,
                });
            }
            Ok(Selection::Lines {
                first: range.start - 1,
                last: range.end,
            })
        }
        None if auto_select_all => Ok(Selection::All),
        None => Ok(Selection::Empty),
    }
}

/// Selects, rewrites and splices the result back into the document.
///
/// The returned [`Rewrite`] carries the whole updated document as its text.
pub fn apply(
    document: &str,
    range: Option<LineRange>,
    settings: &Settings,
) -> Result<Rewrite, SelectionError> {
    let selection = select(document, range, settings.auto_select_all)?;
    debug!(?selection, "resolved selection");

    let selected = selection.text(document);
    let mut result = rewrite_with_summary(&selected, &settings.source_headers);
    result.text = selection.replace(document, &result.text);
    Ok(result)
}
