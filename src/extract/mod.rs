// src/extract/mod.rs
// =============================================================================
// This module contains the link extraction logic.
//
// Submodules:
// - html: walks a parsed HTML document and returns same-host links
//
// Extraction is pure: it reads the document and the base URL and never
// touches the network. Fetching and crawling live in other modules.
// =============================================================================

mod html;

// Re-export public items so callers can write `extract::extract_links()`
pub use html::{extract_html_links, extract_links};
