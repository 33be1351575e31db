//! Final page serialization.
//!
//! Serializes the tree, runs minify-html over it and applies the text fix-ups
//! the output format needs.

use std::borrow::Cow;
use std::sync::LazyLock;

use minify_html::Cfg;
use regex::Regex;
use thiserror::Error;

use crate::config::MinifyConfig;
use crate::dom::{DOCTYPE, Document, serialize_document};

/// First empty-valued `amp` attribute.
static EMPTY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\s"'])amp="""#).expect("marker pattern is valid"));

/// Any leading doctype, whatever its case.
static LEADING_DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:<!doctype[^>]*>)").expect("doctype pattern is valid"));

#[derive(Debug, Error)]
pub enum MinifyError {
    #[error("failed to serialize page")]
    Serialize(#[from] std::io::Error),

    #[error("minifier produced invalid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Serialize and minify a document into the final page text.
pub fn serialize(doc: &Document, config: &MinifyConfig) -> Result<String, MinifyError> {
    let html = serialize_document(doc, &config.render_config())?;
    let html = if config.enable {
        minify_html(&html, config)?
    } else {
        html
    };
    let html = ensure_doctype(&html);
    Ok(collapse_marker_attr(&html).into_owned())
}

/// minify-html options for `config`.
///
/// Whitespace collapsing, boolean attribute collapsing and quote removal are
/// always on. Inline `<style>` and JSON `<script>` content pass through
/// untouched.
fn html_cfg(config: &MinifyConfig) -> Cfg {
    Cfg {
        do_not_minify_doctype: true,
        ensure_spec_compliant_unquoted_attribute_values: true,
        keep_closing_tags: !config.remove_optional_tags,
        keep_html_and_head_opening_tags: !config.remove_optional_tags,
        keep_spaces_between_attributes: true,
        keep_comments: !config.remove_comments,
        keep_input_type_text_attr: false,
        keep_ssi_comments: false,
        preserve_brace_template_syntax: false,
        preserve_chevron_percent_template_syntax: false,
        minify_css: false,
        minify_js: false,
        remove_bangs: false,
        remove_processing_instructions: true,
    }
}

/// Run minify-html over serialized markup.
pub fn minify_html(html: &str, config: &MinifyConfig) -> Result<String, MinifyError> {
    let bytes = minify_html::minify(html.as_bytes(), &html_cfg(config));
    Ok(String::from_utf8(bytes)?)
}

/// Rewrite the first `amp=""` to a bare `amp`.
///
/// Only the first occurrence is touched; the root element is serialized
/// first, so that is the root marker.
pub fn collapse_marker_attr(html: &str) -> Cow<'_, str> {
    EMPTY_MARKER.replace(html, "${1}amp")
}

/// Make sure the page starts with the literal `<!DOCTYPE html>`.
fn ensure_doctype(html: &str) -> Cow<'_, str> {
    if html.starts_with(DOCTYPE) {
        return Cow::Borrowed(html);
    }
    let rest = LEADING_DOCTYPE.replace(html, "");
    Cow::Owned(format!("{DOCTYPE}{rest}"))
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Handle, NodeData, NodeExt, element};
    use html5ever::tendril::StrTendril;
    use markup5ever_rcdom::Node;

    fn page(body: Handle) -> Document {
        let head = element("head", &[]).with_child(element("title", &[]).with_text("Hi"));
        let root = element("html", &[("lang", "en")]);
        root.set_attr("amp", "");
        Document::new(root.with_child(head).with_child(body))
    }

    fn simple_page() -> Document {
        page(element("body", &[]).with_child(element("p", &[]).with_text("x")))
    }

    #[test]
    fn test_patterns_compile() {
        LazyLock::force(&EMPTY_MARKER);
        LazyLock::force(&LEADING_DOCTYPE);
    }

    #[test]
    fn test_collapse_marker_first_only() {
        let html = r#"<html amp="" lang="en"><b amp=""></b>"#;
        assert_eq!(
            collapse_marker_attr(html),
            r#"<html amp lang="en"><b amp=""></b>"#
        );
    }

    #[test]
    fn test_collapse_marker_ignores_prefixed_names() {
        let html = r#"<style amp-custom=""></style><div data-amp=""></div>"#;
        assert_eq!(collapse_marker_attr(html), html);
    }

    #[test]
    fn test_ensure_doctype() {
        assert_eq!(ensure_doctype("<!doctype html><html>"), "<!DOCTYPE html><html>");
        assert_eq!(ensure_doctype("<html>"), "<!DOCTYPE html><html>");
        assert_eq!(ensure_doctype("<!DOCTYPE html><p>"), "<!DOCTYPE html><p>");
    }

    #[test]
    fn test_serialize_unminified() {
        let config = MinifyConfig {
            enable: false,
            ..MinifyConfig::default()
        };
        let html = serialize(&simple_page(), &config).unwrap();
        assert_eq!(
            html,
            r#"<!DOCTYPE html><html amp lang="en"><head><title>Hi</title></head><body><p>x</p></body></html>"#
        );
    }

    #[test]
    fn test_serialize_minified_marker_is_bare() {
        let html = serialize(&simple_page(), &MinifyConfig::default()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html amp"));
        assert!(!html.contains(r#"amp="""#));
        assert!(html.contains("<title>Hi</title>"));
        assert!(html.contains("<p>x</p>"));
    }

    #[test]
    fn test_comment_switch() {
        let body = element("body", &[]).with_child(element("p", &[]).with_text("x"));
        body.append(Node::new(NodeData::Comment {
            contents: StrTendril::from_slice("note"),
        }));

        let keep = MinifyConfig {
            remove_comments: false,
            ..MinifyConfig::default()
        };
        assert!(serialize(&page(body.deep_clone()), &keep).unwrap().contains("<!--note-->"));

        let html = serialize(&page(body), &MinifyConfig::default()).unwrap();
        assert!(!html.contains("note"));
    }

    #[test]
    fn test_structured_data_passes_through() {
        let json = r#"{"description":"a <b>bold<\/b> c"}"#;
        let body = element("body", &[])
            .with_child(element("script", &[("type", "application/ld+json")]).with_text(json));
        let html = serialize(&page(body), &MinifyConfig::default()).unwrap();
        assert!(html.contains(json));
    }
}
