//! cite-links: turn numeric citation markers into Markdown links.
//!
//! This library provides functionality to:
//! - Find the sources section of a text by its header line
//! - Map citation numbers to URLs from the entries in that section
//! - Rewrite body markers like `[3]` into links and tidy the entries
//! - Load settings and resolve the part of a document to rewrite

pub mod markdown;
pub mod output;
pub mod refs;
pub mod selection;
pub mod settings;

pub use markdown::{find_citation_number, find_url, parse_reference_line, ReferenceLine};
pub use output::{format_reference_line, link_citations, rewrite, rewrite_with_summary, Rewrite};
pub use refs::{extract_references, ReferenceMap};
pub use selection::{apply, select, LineRange, Selection, SelectionError};
pub use settings::{parse_headers, Settings, SettingsError};
