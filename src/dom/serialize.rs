//! [`Document`] -> markup text.
//!
//! Markup is written by the html5ever serializer (escaping, void elements,
//! raw-text elements). Before that, the attribute rules that `minify-html`
//! does not cover are applied to the tree: attribute sorting, class sorting,
//! empty attribute removal and script type removal.

use std::io;

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use markup5ever_rcdom::SerializableHandle;

use super::{Document, Handle, NodeData, NodeExt};

/// Doctype written in front of every rendered page.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// Attributes dropped when their value is empty.
const EMPTY_REMOVABLE: &[&str] = &["class", "id", "style", "title", "lang", "dir"];

/// Script types that are the default and may be omitted.
const DEFAULT_SCRIPT_TYPES: &[&str] = &[
    "text/javascript",
    "application/javascript",
    "text/ecmascript",
    "application/ecmascript",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub sort_attributes: bool,
    pub sort_class_names: bool,
    pub remove_empty_attributes: bool,
    pub remove_script_type_attributes: bool,
}

/// Apply the attribute rules and serialize, prefixed with [`DOCTYPE`].
pub fn serialize_document(doc: &Document, config: &RenderConfig) -> io::Result<String> {
    apply_attribute_rules(doc.node(), config);

    let mut out = DOCTYPE.as_bytes().to_vec();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };
    serialize(&mut out, &SerializableHandle::from(doc.node().clone()), opts)?;
    String::from_utf8(out).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Rewrite attributes of every element under `node`, in place.
fn apply_attribute_rules(node: &Handle, config: &RenderConfig) {
    if let NodeData::Element { name, attrs, .. } = &node.data {
        let is_script = &*name.local == "script";
        let mut attrs = attrs.borrow_mut();

        attrs.retain(|a| {
            let (name, value) = (&*a.name.local, &*a.value);
            !(config.remove_empty_attributes && is_removable_empty(name, value))
                && !(config.remove_script_type_attributes
                    && is_script
                    && name == "type"
                    && is_default_script_type(value))
        });
        if config.sort_class_names {
            for attr in attrs.iter_mut().filter(|a| &*a.name.local == "class") {
                attr.value = sort_class_names(&attr.value).into();
            }
        }
        if config.sort_attributes {
            attrs.sort_by(|a, b| (*a.name.local).cmp(&*b.name.local));
        }
    }

    for child in node.children.borrow().iter() {
        apply_attribute_rules(child, config);
    }
}

fn is_removable_empty(name: &str, value: &str) -> bool {
    value.trim().is_empty() && (EMPTY_REMOVABLE.contains(&name) || name.starts_with("on"))
}

fn is_default_script_type(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || DEFAULT_SCRIPT_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(value))
}

fn sort_class_names(value: &str) -> String {
    let mut names: Vec<&str> = value.split_ascii_whitespace().collect();
    names.sort_unstable();
    names.dedup();
    names.join(" ")
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{element, parse_document};

    fn all_rules() -> RenderConfig {
        RenderConfig {
            sort_attributes: true,
            sort_class_names: true,
            remove_empty_attributes: true,
            remove_script_type_attributes: true,
        }
    }

    fn render(root: Handle, config: &RenderConfig) -> String {
        serialize_document(&Document::new(root), config).unwrap()
    }

    #[test]
    fn test_render_doctype_prefix() {
        let html = render(element("html", &[]), &RenderConfig::default());
        assert_eq!(html, "<!DOCTYPE html><html></html>");
    }

    #[test]
    fn test_render_void_and_empty_value() {
        let head = element("head", &[])
            .with_child(element("meta", &[("charset", "utf-8")]))
            .with_child(element("style", &[("amp-custom", "")]));
        assert_eq!(
            render(head, &RenderConfig::default()),
            r#"<!DOCTYPE html><head><meta charset="utf-8"><style amp-custom=""></style></head>"#
        );
    }

    #[test]
    fn test_render_sorts_attributes_and_classes() {
        let div = element("div", &[("id", "a"), ("class", "z b z")]);
        assert_eq!(
            render(div, &all_rules()),
            r#"<!DOCTYPE html><div class="b z" id="a"></div>"#
        );
    }

    #[test]
    fn test_render_removes_empty_and_script_type() {
        let p = element("p", &[("class", ""), ("hidden", "")]);
        assert_eq!(render(p, &all_rules()), r#"<!DOCTYPE html><p hidden=""></p>"#);

        let js = element("script", &[("type", "text/javascript")]);
        assert_eq!(render(js, &all_rules()), "<!DOCTYPE html><script></script>");

        let json = element("script", &[("type", "application/ld+json")]);
        assert_eq!(
            render(json, &all_rules()),
            r#"<!DOCTYPE html><script type="application/ld+json"></script>"#
        );
    }

    #[test]
    fn test_render_escapes_text_and_attributes() {
        let p = element("p", &[("title", r#"say "hi""#)]).with_text("a < b & c");
        assert_eq!(
            render(p, &RenderConfig::default()),
            r#"<!DOCTYPE html><p title="say &quot;hi&quot;">a &lt; b &amp; c</p>"#
        );
    }

    #[test]
    fn test_render_keeps_script_text_raw() {
        let script = element("script", &[("type", "application/ld+json")])
            .with_text(r#"{"a":"x <b>y<\/b>"}"#);
        assert_eq!(
            render(script, &RenderConfig::default()),
            r#"<!DOCTYPE html><script type="application/ld+json">{"a":"x <b>y<\/b>"}</script>"#
        );
    }

    #[test]
    fn test_parse_then_render_inline_script() {
        let doc = parse_document(b"<body><script>if (a<b) go()</script><p>keep</p></body>").unwrap();
        let html = serialize_document(&doc, &RenderConfig::default()).unwrap();
        assert!(html.contains("<script>if (a<b) go()</script><p>keep</p>"));
    }
}
