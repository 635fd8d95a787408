//! Element registry
//!
//! Maps an element's (local name, namespace) to the kind of processing it
//! gets, and builds the entity for leaf elements.

use crate::diagnostics::{Warning, WarningSink};
use crate::dom::{Node, SODIPODI_NS, SVG_NS};
use crate::error::LowerError;
use crate::shapes::lower_shape;
use crate::transform::Transform;
use crate::types::{Entity, QualifiedName, ShapeKind};

/// How an element is handled during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<g>`: walked by the tree walker, never built here
    Group,
    /// `<use>`: resolved by the tree walker, never built here
    Reference,
    Shape(ShapeKind),
    Text,
    Ignored,
    Unsupported,
}

/// (local name, namespace, kind). `None` matches the drawing namespace or
/// no namespace at all.
const ENTITY_TABLE: &[(&str, Option<&str>, ElementKind)] = &[
    ("g", None, ElementKind::Group),
    ("use", None, ElementKind::Reference),
    ("path", None, ElementKind::Shape(ShapeKind::Path)),
    ("rect", None, ElementKind::Shape(ShapeKind::Rect)),
    ("line", None, ElementKind::Shape(ShapeKind::Line)),
    ("polyline", None, ElementKind::Shape(ShapeKind::Polyline)),
    ("polygon", None, ElementKind::Shape(ShapeKind::Polygon)),
    ("circle", None, ElementKind::Shape(ShapeKind::Circle)),
    ("ellipse", None, ElementKind::Shape(ShapeKind::Ellipse)),
    ("text", None, ElementKind::Text),
    ("pattern", None, ElementKind::Ignored),
    ("metadata", None, ElementKind::Ignored),
    ("defs", None, ElementKind::Ignored),
    ("eggbot", None, ElementKind::Ignored),
    ("title", None, ElementKind::Ignored),
    ("desc", None, ElementKind::Ignored),
    ("style", None, ElementKind::Ignored),
    ("namedview", Some(SODIPODI_NS), ElementKind::Ignored),
];

impl ElementKind {
    /// Resolve a tag against the registry.
    pub fn classify(tag: &QualifiedName) -> ElementKind {
        let in_drawing_ns = matches!(tag.namespace.as_deref(), None | Some(SVG_NS));

        ENTITY_TABLE
            .iter()
            .find(|(local, ns, _)| {
                *local == tag.local
                    && match ns {
                        Some(ns) => tag.namespace.as_deref() == Some(*ns),
                        None => in_drawing_ns,
                    }
            })
            .map_or(ElementKind::Unsupported, |(_, _, kind)| *kind)
    }
}

/// Build the entity for a leaf element.
///
/// Text and unregistered elements produce an [`Entity::Unsupported`] and a
/// warning. Groups and references belong to the walker and are reported as
/// unsupported if they end up here.
pub fn make_entity(
    kind: ElementKind,
    node: Node<'_>,
    ts: &Transform,
    tolerance: f64,
    sink: &mut dyn WarningSink,
) -> Result<Option<Entity>, LowerError> {
    let Some(tag) = node.tag() else {
        return Ok(None);
    };

    let entity = match kind {
        ElementKind::Shape(shape) => lower_shape(shape, node, ts, tolerance)?,
        ElementKind::Text => {
            sink.warn(Warning::TextNotSupported);
            Entity::Unsupported { tag }
        }
        ElementKind::Ignored => Entity::Ignored { tag },
        ElementKind::Group | ElementKind::Reference | ElementKind::Unsupported => {
            sink.warn(Warning::UnsupportedElement { tag: tag.clone() });
            Entity::Unsupported { tag }
        }
    };

    Ok(Some(entity))
}
