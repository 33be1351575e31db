//! Head builder.
//!
//! Builds a fresh `<head>` for the AMP page from the source document:
//!
//! 1. charset and viewport meta
//! 2. canonical link (when the source has one)
//! 3. title
//! 4. structured data blocks, re-encoded
//! 5. boilerplate styles, then the custom style
//! 6. analytics extension and runtime scripts
//!
//! Each step produces new nodes; the source tree is only read.

use serde_json::Value;

use crate::asset::StyleResolver;
use crate::debug;
use crate::dom::{Document, Handle, NodeExt, element};
use crate::embed::amp::{
    ANALYTICS_EXTENSION_URL, BOILERPLATE_CSS, NOSCRIPT_BOILERPLATE_CSS, RUNTIME_URL, VIEWPORT,
};
use crate::pipeline::BuildError;

const LD_JSON: &str = "application/ld+json";

/// Builds the output `<head>`.
pub struct HeadBuilder<'a> {
    source: &'a Document,
    styles: StyleResolver<'a>,
}

impl<'a> HeadBuilder<'a> {
    pub fn new(source: &'a Document, styles: StyleResolver<'a>) -> Self {
        Self { source, styles }
    }

    /// Run all steps in order. The first failing step aborts the head.
    pub fn build(self) -> Result<Handle, BuildError> {
        let head = element("head", &[]);

        head.append(charset());
        head.append(viewport());
        if let Some(link) = self.canonical() {
            head.append(link);
        }
        head.append(self.title());
        for block in self.structured_data()? {
            head.append(block);
        }

        let [visible, noscript] = boilerplate();
        head.append(visible);
        head.append(noscript);

        let css = self.styles.resolve()?;
        head.append(custom_style(&css));

        for script in loader_scripts() {
            head.append(script);
        }

        Ok(head)
    }

    /// Copy of the first `<link rel="canonical">`, keeping only `href`.
    fn canonical(&self) -> Option<Handle> {
        let link = self
            .source
            .node()
            .find(&|n| n.is_tag("link") && n.has_rel("canonical"))?;
        let href = link.attr("href")?;
        Some(element("link", &[("rel", "canonical"), ("href", &href)]))
    }

    fn title(&self) -> Handle {
        element("title", &[]).with_text(&self.source.title().unwrap_or_default())
    }

    /// Re-encode every `application/ld+json` block of the source head.
    fn structured_data(&self) -> Result<Vec<Handle>, BuildError> {
        let Some(head) = self.source.head() else {
            return Ok(Vec::new());
        };

        let blocks = head.find_all(&|n| n.is_tag("script") && n.has_type(LD_JSON));
        debug!("head"; "{} structured data block(s)", blocks.len());

        blocks
            .into_iter()
            .enumerate()
            .map(|(index, script)| {
                let value: Value = serde_json::from_str(&script.text_content())
                    .map_err(|source| BuildError::Data { index, source })?;
                Ok(json_script(LD_JSON, &value))
            })
            .collect()
    }
}

/// `<script type=..>` holding JSON, safe to embed in markup.
pub(super) fn json_script(mime: &str, value: &Value) -> Handle {
    // `</` would close the script element early
    let json = value.to_string().replace("</", "<\\/");
    element("script", &[("type", mime)]).with_text(&json)
}

fn charset() -> Handle {
    element("meta", &[("charset", "utf-8")])
}

fn viewport() -> Handle {
    element("meta", &[("name", "viewport"), ("content", VIEWPORT)])
}

/// Visible-body style, then the no-script style wrapped in `<noscript>`.
fn boilerplate() -> [Handle; 2] {
    let style = |css: &str| element("style", &[("amp-boilerplate", "")]).with_text(css);
    [
        style(BOILERPLATE_CSS),
        element("noscript", &[]).with_child(style(NOSCRIPT_BOILERPLATE_CSS)),
    ]
}

fn custom_style(css: &str) -> Handle {
    element("style", &[("amp-custom", "")]).with_text(css)
}

/// Analytics extension loader, then the runtime loader.
fn loader_scripts() -> [Handle; 2] {
    [
        element(
            "script",
            &[
                ("async", ""),
                ("custom-element", "amp-analytics"),
                ("src", ANALYTICS_EXTENSION_URL),
            ],
        ),
        element("script", &[("async", ""), ("src", RUNTIME_URL)]),
    ]
}

// ============================================================================
// tests
// ============================================================================
