//! Arena-backed document tree.
//!
//! Nodes live in an [`indextree::Arena`] and are addressed by [`NodeId`], so an id
//! stays a stable handle for as long as the document exists. `<style>` elements
//! carry their own [`StyleSheet`] rule collection.

use anyhow::{Error, anyhow, bail};
use css_syntax::parse_compound_selector;
use indextree::{Arena, Node, NodeId};
use smallvec::SmallVec;

mod printing;
mod sheet;

pub use sheet::StyleSheet;

#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    #[default]
    Document,
    Element { tag: String },
    Text { text: String },
}

#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
    /// Rule collection, present exactly for `<style>` elements.
    pub sheet: Option<StyleSheet>,
}

impl DOMNode {
    fn element(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        let sheet = (tag == "style").then(StyleSheet::default);
        Self {
            kind: NodeKind::Element { tag },
            attrs: SmallVec::new(),
            sheet,
        }
    }

    /// Lowercased tag name for elements.
    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag),
            NodeKind::Document | NodeKind::Text { .. } => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

pub struct DOM {
    dom: Arena<DOMNode>,
    root: NodeId,
}

impl Default for DOM {
    fn default() -> Self {
        Self::new()
    }
}

impl DOM {
    /// A bare document with no `<html>`, `<head>` or `<body>`.
    pub fn new() -> Self {
        let mut dom = Arena::new();
        Self {
            root: dom.new_node(DOMNode::default()),
            dom,
        }
    }

    /// A document shaped like the output of parsing an empty page:
    /// `<html><head></head><body></body></html>`.
    pub fn with_skeleton() -> Self {
        let mut document = Self::new();
        let html = document.dom.new_node(DOMNode::element("html"));
        let head = document.dom.new_node(DOMNode::element("head"));
        let body = document.dom.new_node(DOMNode::element("body"));
        document.root.append(html, &mut document.dom);
        html.append(head, &mut document.dom);
        html.append(body, &mut document.dom);
        document
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> Result<&DOMNode, Error> {
        self.dom
            .get(id)
            .filter(|node| !node.is_removed())
            .map(Node::get)
            .ok_or_else(|| anyhow!("NotFoundError: unknown node {id:?}"))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut DOMNode, Error> {
        self.dom
            .get_mut(id)
            .filter(|node| !node.is_removed())
            .map(Node::get_mut)
            .ok_or_else(|| anyhow!("NotFoundError: unknown node {id:?}"))
    }

    /// Create a detached element. `style` elements start with an empty sheet.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.dom.new_node(DOMNode::element(tag))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.dom.new_node(DOMNode {
            kind: NodeKind::Text {
                text: text.to_owned(),
            },
            ..DOMNode::default()
        })
    }

    /// # Errors
    /// Fails when either node is unknown, `parent` is a text node, or `child`
    /// is an ancestor of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        self.insert_before(parent, child, None)
    }

    /// Insert `new_node` into `parent` before `reference`, or at the end when
    /// `reference` is `None`. A node that is already in the tree is moved.
    ///
    /// # Errors
    /// Fails when either node is unknown, `parent` is a text node, `reference`
    /// is not a child of `parent`, or the insertion would create a cycle.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), Error> {
        if matches!(self.node(parent)?.kind, NodeKind::Text { .. }) {
            bail!("HierarchyRequestError: text node {parent:?} cannot have children");
        }
        self.node(new_node)?;
        match reference {
            Some(reference) => {
                let reference_parent = self.dom.get(reference).and_then(Node::parent);
                if reference_parent != Some(parent) {
                    bail!("NotFoundError: node {reference:?} is not a child of {parent:?}");
                }
                if reference == new_node {
                    return Ok(());
                }
                reference
                    .checked_insert_before(new_node, &mut self.dom)
                    .map_err(|err| anyhow!("HierarchyRequestError: {err}"))?;
                log::trace!("inserted {new_node:?} into {parent:?} before {reference:?}");
                Ok(())
            }
            None => {
                parent
                    .checked_append(new_node, &mut self.dom)
                    .map_err(|err| anyhow!("HierarchyRequestError: {err}"))?;
                log::trace!("appended {new_node:?} to {parent:?}");
                Ok(())
            }
        }
    }

    /// Set an attribute on an element, replacing any previous value.
    ///
    /// # Errors
    /// Fails when `node` is unknown or is not an element.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), Error> {
        let target = self.node_mut(node)?;
        if !matches!(target.kind, NodeKind::Element { .. }) {
            bail!("InvalidNodeTypeError: attributes can only be set on elements");
        }
        let name = name.to_ascii_lowercase();
        if let Some(slot) = target.attrs.iter_mut().find(|(key, _)| *key == name) {
            value.clone_into(&mut slot.1);
        } else {
            target.attrs.push((name, value.to_owned()));
        }
        Ok(())
    }

    pub fn get_attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).ok()?.attr(name)
    }

    /// Remove an attribute, returning its previous value.
    ///
    /// # Errors
    /// Fails when `node` is unknown.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> Result<Option<String>, Error> {
        let target = self.node_mut(node)?;
        let position = target
            .attrs
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name));
        Ok(position.map(|index| target.attrs.remove(index).1))
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.node(node).ok()?.tag()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.dom.get(node)?.parent()
    }

    /// Children in document order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        if self.node(node).is_err() {
            return Vec::new();
        }
        node.children(&self.dom).collect()
    }

    /// Whether `node` is connected to the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.node(node).is_ok() && node.ancestors(&self.dom).any(|id| id == self.root)
    }

    fn first_child_element(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        parent
            .children(&self.dom)
            .find(|child| self.tag_name(*child) == Some(tag))
    }

    /// The `<head>` child of the document element, like `document.head`.
    pub fn head(&self) -> Option<NodeId> {
        let html = self.first_child_element(self.root, "html")?;
        self.first_child_element(html, "head")
    }

    /// The `<body>` child of the document element.
    pub fn body(&self) -> Option<NodeId> {
        let html = self.first_child_element(self.root, "html")?;
        self.first_child_element(html, "body")
    }

    /// Every element matching `selector`, in document order.
    ///
    /// # Errors
    /// Fails when the selector is not a supported compound selector.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, Error> {
        let compound = parse_compound_selector(selector)?;
        Ok(self
            .root
            .descendants(&self.dom)
            .filter(|id| {
                self.node(*id).is_ok_and(|node| {
                    node.tag()
                        .is_some_and(|tag| compound.matches(tag, |name| node.attr(name)))
                })
            })
            .collect())
    }

    /// First element matching `selector` in document order.
    ///
    /// # Errors
    /// Fails when the selector is not a supported compound selector.
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, Error> {
        let compound = parse_compound_selector(selector)?;
        Ok(self.root.descendants(&self.dom).find(|id| {
            self.node(*id).is_ok_and(|node| {
                node.tag()
                    .is_some_and(|tag| compound.matches(tag, |name| node.attr(name)))
            })
        }))
    }

    pub fn sheet(&self, node: NodeId) -> Option<&StyleSheet> {
        self.node(node).ok()?.sheet.as_ref()
    }

    pub fn sheet_mut(&mut self, node: NodeId) -> Option<&mut StyleSheet> {
        self.node_mut(node).ok()?.sheet.as_mut()
    }
}
