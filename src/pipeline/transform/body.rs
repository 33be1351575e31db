//! Body builder.
//!
//! Clones the source `<body>`, strips every script and appends the single
//! `<amp-analytics>` element.

use serde_json::json;

use super::head::json_script;
use crate::config::AnalyticsConfig;
use crate::debug;
use crate::dom::{Document, Handle, NodeExt, element};

/// Builds the output `<body>`.
pub struct BodyBuilder<'a> {
    source: &'a Document,
    analytics: &'a AnalyticsConfig,
}

impl<'a> BodyBuilder<'a> {
    pub fn new(source: &'a Document, analytics: &'a AnalyticsConfig) -> Self {
        Self { source, analytics }
    }

    pub fn build(self) -> Handle {
        let body = self
            .source
            .body()
            .map(|b| b.deep_clone())
            .unwrap_or_else(|| element("body", &[]));

        // Existing amp-analytics elements go too: the page carries exactly one.
        let removed =
            body.remove_descendants(&|n| n.is_tag("script") || n.is_tag("amp-analytics"));
        debug!("body"; "removed {} script element(s)", removed);

        body.append(analytics_element(self.analytics));
        body
    }
}

/// `<amp-analytics>` with its JSON configuration.
fn analytics_element(config: &AnalyticsConfig) -> Handle {
    let payload = json!({
        "vars": { "account": config.account },
        "triggers": {
            "trackPageview": { "on": "visible", "request": "pageview" }
        }
    });
    element("amp-analytics", &[("type", config.vendor.as_str())])
        .with_child(json_script("application/json", &payload))
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    fn analytics() -> AnalyticsConfig {
        AnalyticsConfig {
            account: "UA-1234-5".into(),
            vendor: "googleanalytics".into(),
        }
    }

    fn build(source: &str) -> (Document, Handle) {
        let doc = parse_document(source.as_bytes()).unwrap();
        let config = analytics();
        let body = BodyBuilder::new(&doc, &config).build();
        (doc, body)
    }

    #[test]
    fn test_scripts_removed_at_any_depth() {
        let (doc, body) = build(
            r#"<head></head><body><p>x</p><script>alert(1)</script>
            <div><section><script src="a.js"></script></section></div></body>"#,
        );

        // Only the analytics config script remains.
        let scripts = body.find_all(&|n| n.is_tag("script"));
        assert_eq!(scripts.len(), 1);
        assert!(!body.text_content().contains("alert"));
        assert!(body.find(&|n| n.is_tag("p")).is_some());

        // Source tree untouched.
        let source_scripts = doc.body().unwrap().find_all(&|n| n.is_tag("script"));
        assert_eq!(source_scripts.len(), 2);
    }

    #[test]
    fn test_inline_script_with_markup_keeps_siblings() {
        let (_, body) = build(
            "<head></head><body><script>if (a<b) { x('</p>') }</script><p>keep</p></body>",
        );

        let p = body.find(&|n| n.is_tag("p")).unwrap();
        assert_eq!(p.text_content(), "keep");
        assert!(!body.text_content().contains("a<b"));
        assert_eq!(body.find_all(&|n| n.is_tag("script")).len(), 1);
    }

    #[test]
    fn test_exactly_one_analytics_element() {
        let (_, body) = build(
            r#"<head></head><body><amp-analytics type="x"></amp-analytics><p>y</p></body>"#,
        );
        let found = body.find_all(&|n| n.is_tag("amp-analytics"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attr("type").as_deref(), Some("googleanalytics"));

        // Appended last.
        assert!(body.elements().last().unwrap().is_tag("amp-analytics"));
    }

    #[test]
    fn test_analytics_payload_shape() {
        let (_, body) = build("<head></head><body></body>");
        let script = body.find(&|n| n.is_tag("script")).unwrap();

        assert_eq!(script.attr("type").as_deref(), Some("application/json"));
        assert_eq!(
            script.text_content(),
            r#"{"vars":{"account":"UA-1234-5"},"triggers":{"trackPageview":{"on":"visible","request":"pageview"}}}"#
        );
    }

    #[test]
    fn test_body_attributes_kept() {
        let (_, body) = build(r#"<head></head><body class="post"><p>x</p></body>"#);
        assert_eq!(body.attr("class").as_deref(), Some("post"));
    }
}
