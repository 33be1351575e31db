//! Document assembly.

use crate::dom::{Document, Handle, NodeExt, element};
use crate::embed::amp::MARKER_ATTR;

/// New document: the source root's tag and attributes plus the `amp` marker,
/// with exactly `head` then `body` as children.
pub fn assemble(source: &Document, head: Handle, body: Handle) -> Document {
    let root = source
        .root()
        .map(|r| r.shallow_clone())
        .unwrap_or_else(|| element("html", &[]));
    root.set_attr(MARKER_ATTR, "");
    root.append(head);
    root.append(body);
    Document::new(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{NodeData, parse_document};

    fn attr_names(node: &Handle) -> Vec<String> {
        let NodeData::Element { attrs, .. } = &node.data else {
            return Vec::new();
        };
        attrs.borrow().iter().map(|a| a.name.local.to_string()).collect()
    }

    #[test]
    fn test_assemble_keeps_root_attributes() {
        let source = parse_document(
            br#"<html lang="en" dir="ltr"><head><title>x</title></head><body><p>y</p></body></html>"#,
        )
        .unwrap();
        let doc = assemble(&source, element("head", &[]), element("body", &[]));
        let root = doc.root().unwrap();

        assert!(root.is_tag("html"));
        assert_eq!(root.attr("lang").as_deref(), Some("en"));
        assert_eq!(root.attr("dir").as_deref(), Some("ltr"));
        assert_eq!(root.attr(MARKER_ATTR).as_deref(), Some(""));

        let tags: Vec<_> = root
            .elements()
            .iter()
            .filter_map(|e| e.tag().map(str::to_string))
            .collect();
        assert_eq!(tags, ["head", "body"]);
        assert_eq!(root.children.borrow().len(), 2);
    }

    #[test]
    fn test_assemble_replaces_existing_marker() {
        let source = parse_document(b"<html amp=\"yes\"><head></head><body></body></html>").unwrap();
        let doc = assemble(&source, element("head", &[]), element("body", &[]));
        let root = doc.root().unwrap();
        assert_eq!(root.attr(MARKER_ATTR).as_deref(), Some(""));
        assert_eq!(attr_names(&root), [MARKER_ATTR]);
    }
}
