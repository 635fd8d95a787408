//! Document traversal
//!
//! Walks the element tree depth-first, composing transforms on the way down,
//! resolving clones in place and collecting one entity per leaf.

use crate::config::{LowerOptions, MalformedPolicy};
use crate::diagnostics::{Warning, WarningSink};
use crate::dom::{Document, INKSCAPE_NS, Node, NodeId, XLINK_NS};
use crate::error::LowerError;
use crate::registry::{ElementKind, make_entity};
use crate::shapes::optional;
use crate::transform::Transform;
use crate::types::Entity;
use crate::units::document_height_mm;
use log::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
    Collapse,
}

impl Visibility {
    /// Effective visibility of a node given its attribute value and the
    /// parent's visibility. `inherit` and unknown values inherit.
    pub fn resolve(value: Option<&str>, parent: Visibility) -> Visibility {
        match value.map(str::trim) {
            Some("visible") => Visibility::Visible,
            Some("hidden") => Visibility::Hidden,
            Some("collapse") => Visibility::Collapse,
            _ => parent,
        }
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

/// Inherited state handed from a node to its children
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversalState {
    pub transform: Transform,
    pub visibility: Visibility,
}

/// Result of [`lower_svg`]
#[derive(Debug, Clone, Default)]
pub struct Lowered {
    pub entities: Vec<Entity>,
    pub warnings: Vec<Warning>,
}

struct Walker<'a> {
    doc: &'a Document<'a>,
    options: &'a LowerOptions,
    sink: &'a mut dyn WarningSink,
    entities: Vec<Entity>,
    /// Groups, clones and clone targets on the current recursion path
    ancestors: Vec<NodeId>,
}

impl<'a> Walker<'a> {
    fn new(doc: &'a Document<'a>, options: &'a LowerOptions, sink: &'a mut dyn WarningSink) -> Self {
        Self {
            doc,
            options,
            sink,
            entities: Vec::new(),
            ancestors: Vec::new(),
        }
    }

    /// Visit a child, applying the malformed-node policy to its errors.
    fn visit_child(&mut self, node: Node<'a>, state: TraversalState) -> Result<(), LowerError> {
        match self.visit(node, state) {
            Err(e) if e.is_node_error() && self.options.on_malformed == MalformedPolicy::SkipSubtree => {
                debug!("skipping {:?}: {}", node.id(), e);
                self.sink.warn(Warning::SkippedNode {
                    message: e.to_string(),
                });
                Ok(())
            }
            other => other,
        }
    }

    fn visit(&mut self, node: Node<'a>, state: TraversalState) -> Result<(), LowerError> {
        let Some(tag) = node.tag() else {
            return Ok(());
        };
        trace!("visit: <{}> ({:?})", tag, node.id());

        let visibility = Visibility::resolve(node.attribute("visibility"), state.visibility);
        let transform = match node.attribute("transform") {
            Some(value) => {
                let local = Transform::parse(value).map_err(|reason| LowerError::MalformedGeometry {
                    tag: tag.local.clone(),
                    attribute: "transform",
                    reason,
                })?;
                Transform::compose(&state.transform, &local)
            }
            None => state.transform,
        };
        let state = TraversalState {
            transform,
            visibility,
        };

        match ElementKind::classify(&tag) {
            ElementKind::Group => self.visit_group(node, state),
            ElementKind::Reference => self.visit_reference(node, state),
            kind => {
                if self.options.prune_hidden && !visibility.is_visible() {
                    trace!("visit: <{}> is hidden, pruned", tag);
                    return Ok(());
                }
                let entity = make_entity(kind, node, &transform, self.options.tolerance, self.sink)?;
                self.entities.extend(entity);
                Ok(())
            }
        }
    }

    fn visit_group(&mut self, node: Node<'a>, state: TraversalState) -> Result<(), LowerError> {
        if node.attribute_ns(INKSCAPE_NS, "groupmode") == Some("layer") {
            if let Some(label) = node.attribute_ns(INKSCAPE_NS, "label") {
                debug!("entering layer '{}'", label);
                self.entities.push(Entity::LayerMarker {
                    name: label.to_string(),
                });
            }
        }

        self.ancestors.push(node.id());
        let result = node
            .children()
            .try_for_each(|child| self.visit_child(child, state));
        self.ancestors.pop();
        result
    }

    fn visit_reference(&mut self, node: Node<'a>, state: TraversalState) -> Result<(), LowerError> {
        let href = node
            .attribute_ns(XLINK_NS, "href")
            .or_else(|| node.attribute("href"))
            .unwrap_or("");

        let target = href
            .strip_prefix('#')
            .and_then(|id| self.doc.element_by_id(id));
        let Some(target) = target else {
            self.sink.warn(Warning::UnresolvedReference {
                href: href.to_string(),
            });
            return Ok(());
        };

        let x = optional(node, "use", "x")?;
        let y = optional(node, "use", "y")?;
        let transform = if x != 0.0 || y != 0.0 {
            Transform::compose(&state.transform, &Transform::translate(x, y))
        } else {
            state.transform
        };

        self.ancestors.push(node.id());
        if self.ancestors.contains(&target.id()) {
            self.ancestors.pop();
            return Err(LowerError::ReferenceCycle {
                id: target.attribute("id").unwrap_or_default().to_string(),
            });
        }

        let result = self.visit(target, TraversalState { transform, ..state });
        self.ancestors.pop();
        result
    }
}

/// Lower a parsed document into entities, reporting warnings to `sink`.
///
/// The page is flipped vertically about its height (from
/// [`LowerOptions::page_height`] or the root `height` attribute) so that the
/// output has a bottom-left origin.
pub fn lower_document(
    doc: &Document<'_>,
    options: &LowerOptions,
    sink: &mut dyn WarningSink,
) -> Result<Vec<Entity>, LowerError> {
    options.validate()?;

    let root = doc.root();
    let height = match options.page_height {
        Some(height) if height.is_finite() => height,
        Some(_) => return Err(LowerError::MissingPageHeight),
        None => document_height_mm(root).ok_or(LowerError::MissingPageHeight)?,
    };

    let state = TraversalState {
        transform: Transform::vertical_flip(height),
        visibility: Visibility::resolve(root.attribute("visibility"), Visibility::Visible),
    };

    let mut walker = Walker::new(doc, options, sink);
    walker.ancestors.push(root.id());
    for child in root.children() {
        walker.visit_child(child, state)?;
    }

    let entities = walker.entities;
    debug!(
        "lowered {} entities ({} drawable) from page height {}mm",
        entities.len(),
        entities.iter().filter(|e| e.is_drawable()).count(),
        height
    );
    Ok(entities)
}

/// Parse and lower a document, collecting warnings alongside the entities.
pub fn lower_svg(svg: &str, options: &LowerOptions) -> Result<Lowered, LowerError> {
    let doc = Document::parse(svg)?;
    let mut warnings = Vec::new();
    let entities = lower_document(&doc, options, &mut warnings)?;
    Ok(Lowered { entities, warnings })
}
