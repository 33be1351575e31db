//! Source markup -> [`Document`] via html5ever.
//!
//! html5ever follows the HTML5 tree construction rules: `<script>` and
//! `<style>` contents stay raw text, and a page without `<html>`, `<head>` or
//! `<body>` gets them synthesized.

use html5ever::driver::ParseOpts;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::TreeBuilderOpts;
use thiserror::Error;

use super::{Document, RcDom};

/// Reasons a source page cannot be turned into a [`Document`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("source is not valid UTF-8")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Parse a full HTML page.
pub fn parse_document(source: &[u8]) -> Result<Document, ParseError> {
    let source = std::str::from_utf8(source)?;
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = html5ever::parse_document(RcDom::default(), opts).one(StrTendril::from_slice(source));
    Ok(Document::from_dom(dom))
}

// ============================================================================
// tests
// ============================================================================
