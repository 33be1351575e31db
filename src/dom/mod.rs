//! HTML tree helpers over `markup5ever_rcdom`.
//!
//! The source page is parsed by html5ever into an [`RcDom`]; the builders read
//! it through [`NodeExt`] and create fresh nodes with [`element`] and [`text`].
//!
//! # Modules
//!
//! - `parse`: source bytes -> [`Document`] (html5ever)
//! - `serialize`: [`Document`] -> markup (html5ever serializer plus attribute rules)

mod parse;
mod serialize;

pub use markup5ever_rcdom::{Handle, NodeData, RcDom};
pub use parse::{ParseError, parse_document};
pub use serialize::{DOCTYPE, RenderConfig, serialize_document};

use std::cell::RefCell;
use std::rc::Rc;

use html5ever::tendril::StrTendril;
use html5ever::{Attribute, LocalName, Namespace, QualName};
use markup5ever_rcdom::Node;

const HTML_NS: &str = "http://www.w3.org/1999/xhtml";

// ============================================================================
// Document
// ============================================================================

/// A parsed or assembled page.
pub struct Document {
    dom: RcDom,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").finish_non_exhaustive()
    }
}

impl Document {
    /// Document holding a single root element.
    pub fn new(root: Handle) -> Self {
        let dom = RcDom::default();
        dom.document.append(root);
        Self { dom }
    }

    pub(crate) fn from_dom(dom: RcDom) -> Self {
        Self { dom }
    }

    /// The document node itself (parent of the root element).
    pub fn node(&self) -> &Handle {
        &self.dom.document
    }

    /// Root element, normally `<html>`.
    pub fn root(&self) -> Option<Handle> {
        self.dom
            .document
            .children
            .borrow()
            .iter()
            .find(|n| n.tag().is_some())
            .cloned()
    }

    pub fn head(&self) -> Option<Handle> {
        self.node().find(&|n| n.is_tag("head"))
    }

    pub fn body(&self) -> Option<Handle> {
        self.node().find(&|n| n.is_tag("body"))
    }

    /// Text of the first `<title>`.
    pub fn title(&self) -> Option<String> {
        self.node()
            .find(&|n| n.is_tag("title"))
            .map(|t| t.text_content())
    }
}

// ============================================================================
// constructors
// ============================================================================

fn qual_name(ns: &str, local: &str) -> QualName {
    QualName::new(None, Namespace::from(ns), LocalName::from(local))
}

/// New HTML element with the given attributes, in order.
pub fn element(tag: &str, attrs: &[(&str, &str)]) -> Handle {
    let attrs = attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: qual_name("", name),
            value: StrTendril::from_slice(value),
        })
        .collect();
    Node::new(NodeData::Element {
        name: qual_name(HTML_NS, tag),
        attrs: RefCell::new(attrs),
        template_contents: RefCell::new(None),
        mathml_annotation_xml_integration_point: false,
    })
}

/// New text node.
pub fn text(content: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from_slice(content)),
    })
}

// ============================================================================
// NodeExt
// ============================================================================

/// Queries and edits on rcdom handles.
pub trait NodeExt {
    /// Local tag name, `None` for non-elements.
    fn tag(&self) -> Option<&str>;
    fn is_tag(&self, tag: &str) -> bool;

    fn attr(&self, name: &str) -> Option<String>;
    fn has_attr(&self, name: &str) -> bool;
    /// Set an attribute, replacing an existing value in place.
    fn set_attr(&self, name: &str, value: &str);
    /// Whether the space-separated `rel` contains `token` (ASCII case-insensitive).
    fn has_rel(&self, token: &str) -> bool;
    /// Whether `type` equals `mime` (ASCII case-insensitive, trimmed).
    fn has_type(&self, mime: &str) -> bool;

    fn append(&self, child: Handle);
    fn with_child(self, child: Handle) -> Handle;
    fn with_text(self, content: &str) -> Handle;

    /// Direct child elements.
    fn elements(&self) -> Vec<Handle>;
    /// First node in document order (self included) matching `pred`.
    fn find(&self, pred: &impl Fn(&Handle) -> bool) -> Option<Handle>;
    /// All matching nodes (self included), in document order.
    fn find_all(&self, pred: &impl Fn(&Handle) -> bool) -> Vec<Handle>;
    /// Concatenated text of all descendant text nodes.
    fn text_content(&self) -> String;

    /// Remove every descendant matching `pred`, at any depth. Returns the
    /// number of removed subtrees.
    fn remove_descendants(&self, pred: &impl Fn(&Handle) -> bool) -> usize;
    /// Copy with attributes and no children.
    fn shallow_clone(&self) -> Handle;
    /// Independent copy of the whole subtree.
    fn deep_clone(&self) -> Handle;
}

impl NodeExt for Handle {
    fn tag(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { name, .. } => Some(&*name.local),
            _ => None,
        }
    }

    fn is_tag(&self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }

    fn attr(&self, name: &str) -> Option<String> {
        let NodeData::Element { attrs, .. } = &self.data else {
            return None;
        };
        attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    fn set_attr(&self, name: &str, value: &str) {
        let NodeData::Element { attrs, .. } = &self.data else {
            return;
        };
        let mut attrs = attrs.borrow_mut();
        let value = StrTendril::from_slice(value);
        match attrs.iter_mut().find(|a| &*a.name.local == name) {
            Some(slot) => slot.value = value,
            None => attrs.push(Attribute {
                name: qual_name("", name),
                value,
            }),
        }
    }

    fn has_rel(&self, token: &str) -> bool {
        self.attr("rel").is_some_and(|rel| {
            rel.split_ascii_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
    }

    fn has_type(&self, mime: &str) -> bool {
        self.attr("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(mime))
    }

    fn append(&self, child: Handle) {
        child.parent.set(Some(Rc::downgrade(self)));
        self.children.borrow_mut().push(child);
    }

    fn with_child(self, child: Handle) -> Handle {
        self.append(child);
        self
    }

    fn with_text(self, content: &str) -> Handle {
        self.with_child(text(content))
    }

    fn elements(&self) -> Vec<Handle> {
        self.children
            .borrow()
            .iter()
            .filter(|n| n.tag().is_some())
            .cloned()
            .collect()
    }

    fn find(&self, pred: &impl Fn(&Handle) -> bool) -> Option<Handle> {
        if pred(self) {
            return Some(self.clone());
        }
        self.children.borrow().iter().find_map(|c| c.find(pred))
    }

    fn find_all(&self, pred: &impl Fn(&Handle) -> bool) -> Vec<Handle> {
        fn walk(node: &Handle, pred: &impl Fn(&Handle) -> bool, out: &mut Vec<Handle>) {
            if pred(node) {
                out.push(node.clone());
            }
            for child in node.children.borrow().iter() {
                walk(child, pred, out);
            }
        }
        let mut found = Vec::new();
        walk(self, pred, &mut found);
        found
    }

    fn text_content(&self) -> String {
        fn walk(node: &Handle, out: &mut String) {
            if let NodeData::Text { contents } = &node.data {
                out.push_str(&contents.borrow());
            }
            for child in node.children.borrow().iter() {
                walk(child, out);
            }
        }
        let mut out = String::new();
        walk(self, &mut out);
        out
    }

    fn remove_descendants(&self, pred: &impl Fn(&Handle) -> bool) -> usize {
        let mut children = self.children.borrow_mut();
        let before = children.len();
        children.retain(|c| !pred(c));
        let mut removed = before - children.len();

        for child in children.iter() {
            removed += child.remove_descendants(pred);
        }
        removed
    }

    fn shallow_clone(&self) -> Handle {
        Node::new(clone_data(&self.data))
    }

    fn deep_clone(&self) -> Handle {
        let copy = self.shallow_clone();
        if let (
            NodeData::Element { template_contents: from, .. },
            NodeData::Element { template_contents: to, .. },
        ) = (&self.data, &copy.data)
        {
            *to.borrow_mut() = from.borrow().as_ref().map(NodeExt::deep_clone);
        }
        for child in self.children.borrow().iter() {
            copy.append(child.deep_clone());
        }
        copy
    }
}

fn clone_data(data: &NodeData) -> NodeData {
    match data {
        NodeData::Document => NodeData::Document,
        NodeData::Doctype {
            name,
            public_id,
            system_id,
        } => NodeData::Doctype {
            name: name.clone(),
            public_id: public_id.clone(),
            system_id: system_id.clone(),
        },
        NodeData::Text { contents } => NodeData::Text {
            contents: RefCell::new(contents.borrow().clone()),
        },
        NodeData::Comment { contents } => NodeData::Comment {
            contents: contents.clone(),
        },
        NodeData::Element {
            name,
            attrs,
            mathml_annotation_xml_integration_point,
            ..
        } => NodeData::Element {
            name: name.clone(),
            attrs: RefCell::new(attrs.borrow().clone()),
            template_contents: RefCell::new(None),
            mathml_annotation_xml_integration_point: *mathml_annotation_xml_integration_point,
        },
        NodeData::ProcessingInstruction { target, contents } => {
            NodeData::ProcessingInstruction {
                target: target.clone(),
                contents: contents.clone(),
            }
        }
    }
}

// ============================================================================
// tests
// ============================================================================
