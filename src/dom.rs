//! Read-only XML document model
//!
//! A thin layer over `roxmltree`: element names and attributes come out
//! namespace-resolved, internal DTD entities are expanded, and whitespace
//! text is hidden so traversal only sees elements, comments and processing
//! instructions.

use crate::error::LowerError;
use crate::types::QualifiedName;
use std::collections::HashMap;

pub use roxmltree::NodeId;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
pub const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";
pub const SODIPODI_NS: &str = "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd";

/// Parsed document with an `id` index
#[derive(Debug)]
pub struct Document<'input> {
    tree: roxmltree::Document<'input>,
    ids: HashMap<String, NodeId>,
}

/// Borrowed handle to one node of a [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    inner: roxmltree::Node<'a, 'a>,
}

impl<'input> Document<'input> {
    /// Parse an XML string into a document tree
    pub fn parse(xml: &'input str) -> Result<Document<'input>, LowerError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let tree = roxmltree::Document::parse_with_options(xml, options)
            .map_err(|e| LowerError::Xml(e.to_string()))?;

        // First element carrying an id wins
        let mut ids = HashMap::new();
        for node in tree.descendants().filter(roxmltree::Node::is_element) {
            if let Some(id) = node.attribute("id") {
                ids.entry(id.to_string()).or_insert(node.id());
            }
        }

        Ok(Document { tree, ids })
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            inner: self.tree.root_element(),
        }
    }

    /// Resolve an `id` attribute value to its element
    pub fn element_by_id(&self, id: &str) -> Option<Node<'_>> {
        let node = self.tree.get_node(*self.ids.get(id)?)?;
        Some(Node { inner: node })
    }
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        self.inner.id()
    }

    fn is_element(&self) -> bool {
        self.inner.is_element()
    }

    /// Qualified tag name; `None` for comments and processing instructions.
    pub fn tag(&self) -> Option<QualifiedName> {
        self.is_element().then(|| {
            let name = self.inner.tag_name();
            QualifiedName::new(name.namespace(), name.name())
        })
    }

    /// Attribute without namespace
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.inner.attribute(name)
    }

    /// Attribute in the given namespace
    pub fn attribute_ns(&self, namespace: &str, name: &str) -> Option<&'a str> {
        self.inner.attribute((namespace, name))
    }

    pub fn children(self) -> impl Iterator<Item = Node<'a>> + 'a {
        self.inner
            .children()
            .filter(|n| !n.is_text())
            .map(|inner| Node { inner })
    }
}
