// src/extract/html.rs
// =============================================================================
// This module extracts same-host links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a tree (DOM) of nodes
// - Is built on html5ever (Mozilla's HTML parser)
// - Lowercases tag and attribute names for us
//
// We also use the `url` crate to:
// - Resolve relative hrefs against the page URL
// - Compare hosts and strip fragments
//
// Only links that stay on the page's host survive, and links pointing at a
// fragment (`#section`) are dropped because they are not separate pages.
// =============================================================================

use scraper::{Html, Node};
use url::Url;

// Extracts same-host links from raw HTML text
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   base_url: the URL of the page (for resolving relative links)
//
// Returns: Vec<String> of absolute URLs in document order
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='https://other.com'>x</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_html_links(html: &str, base_url: &str) -> Vec<String> {
    // Parse the base URL first; without it nothing can be resolved
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Invalid base URL {}: {}", base_url, e);
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    extract_links(&document, &base)
}

// Walks an already parsed document and collects same-host anchor targets
//
// descendants() is a pre-order walk (a node, then its children left to
// right), so the output is in document order. It is iterative, so deeply
// nested documents can't blow the stack.
pub fn extract_links(document: &Html, base: &Url) -> Vec<String> {
    let mut links = Vec::new();

    for node in document.tree.root().descendants() {
        // Only element nodes can be anchors (skip text, comments, doctype)
        let element = match node.value() {
            Node::Element(element) => element,
            _ => continue,
        };

        if element.name() != "a" {
            continue;
        }

        let Some(href) = element.attr("href") else {
            continue;
        };

        // Malformed hrefs are common; skip them and keep going
        let Some(mut absolute) = resolve_link(base, href) else {
            continue;
        };

        if !same_host(&absolute, base) {
            continue;
        }

        // A non-empty fragment means "somewhere on a page", not a new page.
        // An empty one (`page#`) is just dropped from the output.
        match absolute.fragment() {
            Some(fragment) if !fragment.is_empty() => continue,
            Some(_) => absolute.set_fragment(None),
            None => {}
        }

        links.push(absolute.to_string());
    }

    tracing::debug!("Extracted {} same-host links from {}", links.len(), base);
    links
}

// Resolves a possibly-relative href against the page URL
//
// Examples (base = "https://a.com/x/y"):
//   "z"                   -> https://a.com/x/z
//   "/z"                  -> https://a.com/z
//   "https://other.com/z" -> https://other.com/z (filtered out later)
//   "http://[::1]:port"   -> None (invalid port)
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    // join() would percent-encode raw control characters; treat them as
    // malformed instead
    if href.chars().any(|c| c.is_ascii_control()) {
        tracing::debug!("Skipping href with control characters on {}: {:?}", base, href);
        return None;
    }

    match base.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Skipping href '{}' on {}: {}", href, base, e);
            None
        }
    }
}

// Two URLs are on the same host when host and explicit port match.
//
// The url crate already lowercases hosts of http/https URLs while parsing,
// so the string compare is effectively case-insensitive for web URLs.
// URLs without a host (mailto:, javascript:) never match.
pub fn same_host(link: &Url, base: &Url) -> bool {
    match (link.host_str(), base.host_str()) {
        (Some(link_host), Some(base_host)) => {
            link_host == base_host && link.port() == base.port()
        }
        _ => false,
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `let ... else`?
//    - `let Some(x) = opt else { continue; };` binds x if opt is Some
//    - Otherwise the else block runs, and it must leave the scope
//      (continue, return, break, panic)
//    - It keeps the happy path unindented
//
// 2. What does .join() do?
//    - Resolves a relative reference the way a browser does
//    - "https://a.com/x/y".join("z") = "https://a.com/x/z"
//    - Absolute hrefs replace the base entirely
//
// 3. Why match on node.value()?
//    - The tree holds different kinds of nodes (Document, Element, Text...)
//    - Node is an enum, so we pattern match to get the Element out
// -----------------------------------------------------------------------------
