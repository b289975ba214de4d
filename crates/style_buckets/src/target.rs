//! The document surface bucket containers are placed into.

use anyhow::Error;
use core::fmt::Debug;
use html::{DOM, NodeId, StyleSheet};

/// What the resolver needs from a document.
///
/// `Element` is a cheap handle; two handles compare equal exactly when they
/// refer to the same element.
pub trait StyleTarget {
    type Element: Copy + Eq + Debug;

    /// First element in document order matching an attribute selector.
    ///
    /// # Errors
    /// Fails when the selector cannot be evaluated.
    fn query_selector(&self, selector: &str) -> Result<Option<Self::Element>, Error>;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> Self::Element;

    /// # Errors
    /// Fails when the handle does not refer to an element.
    fn set_attribute(&mut self, element: Self::Element, name: &str, value: &str)
    -> Result<(), Error>;

    fn get_attribute(&self, element: Self::Element, name: &str) -> Option<&str>;

    /// The insertion region for style containers.
    fn head(&self) -> Option<Self::Element>;

    /// Insert `node` as a child of `parent` before `reference`, or last.
    ///
    /// # Errors
    /// Fails when `reference` is not a child of `parent`.
    fn insert_before(
        &mut self,
        parent: Self::Element,
        node: Self::Element,
        reference: Option<Self::Element>,
    ) -> Result<(), Error>;

    /// Rule collection of a style container, `None` for anything else.
    fn sheet(&self, element: Self::Element) -> Option<&StyleSheet>;

    fn sheet_mut(&mut self, element: Self::Element) -> Option<&mut StyleSheet>;
}

#[allow(
    clippy::same_name_method,
    reason = "Trait methods forward to the DOM's own methods of the same name"
)]
impl StyleTarget for DOM {
    type Element = NodeId;

    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, Error> {
        Self::query_selector(self, selector)
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        Self::create_element(self, tag)
    }

    fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> Result<(), Error> {
        self.set_attr(element, name, value)
    }

    fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.get_attr(element, name)
    }

    fn head(&self) -> Option<NodeId> {
        Self::head(self)
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), Error> {
        Self::insert_before(self, parent, node, reference)
    }

    fn sheet(&self, element: NodeId) -> Option<&StyleSheet> {
        Self::sheet(self, element)
    }

    fn sheet_mut(&mut self, element: NodeId) -> Option<&mut StyleSheet> {
        Self::sheet_mut(self, element)
    }
}
