//! Generic tree model shared by both readers.
//!
//! The tree uses an index-based arena: nodes live in a `Vec` owned by the
//! `Document`, and parent links are plain indices, so back-references
//! carry no ownership. Mutation happens through `Document` during
//! parsing; `Node` is a lightweight copyable handle for read-only
//! traversal afterwards.
//!
//! # Example
//!
//! ```
//! use arbor_core::tree::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.root_id();
//! let greeting = doc.add_child(root, "greeting");
//! doc.set_value(greeting, Some("hello".into()));
//!
//! let node = doc.root().first_child().unwrap();
//! assert_eq!(node.path(), "greeting");
//! assert_eq!(node.value(), Some("hello"));
//! ```

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

// ============================================================================
// Core Types
// ============================================================================

/// Index into the document's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// An attribute on a node. Appearance order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<'a> {
    pub name: Cow<'a, str>,
    pub value: Cow<'a, str>,
}

/// Internal node storage.
#[derive(Debug)]
struct NodeData<'a> {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Absent only for the synthetic root.
    name: Option<Cow<'a, str>>,
    /// Scalar text; a node with children carries no meaningful value.
    value: Option<Cow<'a, str>>,
    attrs: Vec<Attribute<'a>>,
}

impl<'a> NodeData<'a> {
    fn new(name: Option<Cow<'a, str>>) -> Self {
        NodeData {
            parent: None,
            children: Vec::new(),
            name,
            value: None,
            attrs: Vec::new(),
        }
    }
}

// ============================================================================
// Document
// ============================================================================

/// A parsed document as a tree.
///
/// The lifetime `'a` refers to the source buffer - names and values are
/// zero-copy slices into the original input wherever possible.
///
/// Nodes detached during reconciliation stay in the arena but are
/// unreachable from the root; the arena never compacts.
#[derive(Debug)]
pub struct Document<'a> {
    nodes: Vec<NodeData<'a>>,
    root: NodeId,
}

impl<'a> Document<'a> {
    /// Create a document holding only the unnamed root.
    pub fn new() -> Self {
        Document {
            nodes: vec![NodeData::new(None)],
            root: NodeId::new(0),
        }
    }

    /// Get the root node.
    pub fn root(&self) -> Node<'_, 'a> {
        Node { doc: self, id: self.root }
    }

    /// Get the root node's ID.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<Node<'_, 'a>> {
        if id.index() < self.nodes.len() {
            Some(Node { doc: self, id })
        } else {
            None
        }
    }

    fn node_data(&self, id: NodeId) -> &NodeData<'a> {
        &self.nodes[id.index()]
    }

    fn node_data_mut(&mut self, id: NodeId) -> &mut NodeData<'a> {
        &mut self.nodes[id.index()]
    }

    // ------------------------------------------------------------------
    // Construction and mutation
    // ------------------------------------------------------------------

    /// Create a new detached named node.
    pub fn create(&mut self, name: impl Into<Cow<'a, str>>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData::new(Some(name.into())));
        id
    }

    /// Create a named node and append it to `parent`'s children.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<Cow<'a, str>>) -> NodeId {
        let child = self.create(name);
        self.attach(parent, child);
        child
    }

    /// Append an existing node to `parent`'s children and point its
    /// parent link at `parent`.
    ///
    /// Does not detach the node from a previous parent; reconciliation
    /// detaches explicitly before re-attaching.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.node_data_mut(child).parent = Some(parent);
        self.node_data_mut(parent).children.push(child);
    }

    /// Detach `child` from `parent` if it is among its children
    /// (identity match by ID). Clears the child's parent link and
    /// returns it; `None` when it was not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Option<NodeId> {
        let children = &mut self.node_data_mut(parent).children;
        let at = children.iter().position(|&c| c == child)?;
        children.remove(at);
        self.node_data_mut(child).parent = None;
        Some(child)
    }

    /// Replace the node's name. No validation is performed.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<Cow<'a, str>>) {
        self.node_data_mut(id).name = Some(name.into());
    }

    /// Replace the node's scalar value. `None` stores an absent value,
    /// distinct from the empty string.
    pub fn set_value(&mut self, id: NodeId, value: Option<Cow<'a, str>>) {
        self.node_data_mut(id).value = value;
    }

    /// Take the node's scalar value out, leaving it absent.
    pub fn take_value(&mut self, id: NodeId) -> Option<Cow<'a, str>> {
        self.node_data_mut(id).value.take()
    }

    /// Set an attribute. A duplicate key overwrites the value in place,
    /// keeping the key's original position.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<Cow<'a, str>>,
        value: impl Into<Cow<'a, str>>,
    ) {
        let name = name.into();
        let value = value.into();
        let attrs = &mut self.node_data_mut(id).attrs;
        if let Some(existing) = attrs.iter_mut().find(|a| a.name == name) {
            existing.value = value;
        } else {
            attrs.push(Attribute { name, value });
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The node's name; `None` only for the synthetic root.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node_data(id).name.as_deref()
    }

    /// The node's scalar value, if present.
    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.node_data(id).value.as_deref()
    }

    /// Whether the node has children.
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.node_data(id).children.is_empty()
    }

    /// Build a name-to-node view of the children on demand.
    ///
    /// Insertion order of first appearance is kept; when names collide
    /// the last child wins (overwrite in place). Unnamed children are
    /// skipped - only the root can be unnamed.
    pub fn children_by_name(&self, id: NodeId) -> IndexMap<Cow<'a, str>, NodeId> {
        let mut map = IndexMap::new();
        for &child in &self.node_data(id).children {
            if let Some(name) = self.node_data(child).name.clone() {
                map.insert(name, child);
            }
        }
        map
    }

    /// The node's name chain from root to self, comma-and-space
    /// separated. The synthetic root contributes nothing.
    pub fn path(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = Vec::new();
        let mut cursor = Some(id);
        while let Some(at) = cursor {
            let data = self.node_data(at);
            if let Some(name) = &data.name {
                names.push(name);
            }
            cursor = data.parent;
        }
        names.reverse();
        names.join(", ")
    }
}

impl Default for Document<'_> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Node (navigation handle)
// ============================================================================

/// A handle for navigating the document tree.
///
/// This is a lightweight reference that borrows from the document.
#[derive(Clone, Copy)]
pub struct Node<'doc, 'a: 'doc> {
    doc: &'doc Document<'a>,
    id: NodeId,
}

impl<'doc, 'a: 'doc> Node<'doc, 'a> {
    /// Get the node's ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's name; `None` only for the synthetic root.
    pub fn name(&self) -> Option<&'doc str> {
        self.doc.node_data(self.id).name.as_deref()
    }

    /// The node's scalar value, if present.
    pub fn value(&self) -> Option<&'doc str> {
        self.doc.node_data(self.id).value.as_deref()
    }

    /// The node's attributes, in appearance order.
    pub fn attributes(&self) -> &'doc [Attribute<'a>] {
        &self.doc.node_data(self.id).attrs
    }

    /// Get the parent node, if any.
    pub fn parent(&self) -> Option<Node<'doc, 'a>> {
        self.doc
            .node_data(self.id)
            .parent
            .map(|id| Node { doc: self.doc, id })
    }

    /// Iterate over child nodes.
    pub fn children(&self) -> impl Iterator<Item = Node<'doc, 'a>> + 'doc {
        let doc = self.doc;
        self.doc
            .node_data(self.id)
            .children
            .iter()
            .map(move |&id| Node { doc, id })
    }

    /// Get the first child node.
    pub fn first_child(&self) -> Option<Node<'doc, 'a>> {
        self.doc
            .node_data(self.id)
            .children
            .first()
            .map(|&id| Node { doc: self.doc, id })
    }

    /// Whether the node has children.
    pub fn has_children(&self) -> bool {
        self.doc.has_children(self.id)
    }

    /// The node's name chain from root to self.
    pub fn path(&self) -> String {
        self.doc.path(self.id)
    }
}

impl fmt::Debug for Node<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("value", &self.value())
            .finish()
    }
}

// ============================================================================
// Listing renderer
// ============================================================================

/// Renders the listing: for each named node an `Element:` header, its
/// path, its quoted value (or a literal `null` when it has neither value
/// nor children), its attributes, then every child, each block preceded
/// by a blank line. The synthetic root contributes no line of its own.
impl fmt::Display for Node<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.doc.node_data(self.id);
        if data.name.is_some() {
            writeln!(f, "Element:")?;
            writeln!(f, "path = {}", self.path())?;
            match &data.value {
                Some(value) => writeln!(f, "value = \"{value}\"")?,
                None if data.children.is_empty() => writeln!(f, "value = null")?,
                None => {}
            }
            if !data.attrs.is_empty() {
                writeln!(f, "attributes:")?;
                for attr in &data.attrs {
                    writeln!(f, "{} = \"{}\"", attr.name, attr.value)?;
                }
            }
        }
        for child in self.children() {
            writeln!(f)?;
            write!(f, "{child}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_navigate() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let a = doc.add_child(root, "a");
        let b = doc.add_child(a, "b");

        assert_eq!(doc.root().name(), None);
        let node_a = doc.root().first_child().unwrap();
        assert_eq!(node_a.name(), Some("a"));
        let node_b = node_a.first_child().unwrap();
        assert_eq!(node_b.name(), Some("b"));
        assert_eq!(node_b.parent().unwrap().id(), a);
        assert_eq!(node_b.id(), b);
        assert!(doc.root().parent().is_none());
    }

    #[test]
    fn test_path() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let a = doc.add_child(root, "a");
        let b = doc.add_child(a, "b");
        let c = doc.add_child(b, "c");

        assert_eq!(doc.path(c), "a, b, c");
        assert_eq!(doc.path(a), "a");
        // The synthetic root contributes nothing.
        assert_eq!(doc.path(root), "");
        // Recomputation after no mutation yields the same string.
        assert_eq!(doc.path(c), doc.path(c));
    }

    #[test]
    fn test_remove_child() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let a = doc.add_child(root, "a");
        let b = doc.add_child(root, "b");

        assert_eq!(doc.remove_child(root, a), Some(a));
        assert!(doc.get(a).unwrap().parent().is_none());
        let remaining: Vec<_> = doc.root().children().map(|n| n.id()).collect();
        assert_eq!(remaining, vec![b]);

        // Not a child anymore: identity match fails, no-op.
        assert_eq!(doc.remove_child(root, a), None);
        // Never was a child of `a`.
        assert_eq!(doc.remove_child(a, b), None);
    }

    #[test]
    fn test_attach_reparents() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let a = doc.add_child(root, "a");
        let b = doc.add_child(a, "b");

        assert_eq!(doc.remove_child(a, b), Some(b));
        doc.attach(root, b);
        assert_eq!(doc.get(b).unwrap().parent().unwrap().id(), root);
        assert_eq!(doc.path(b), "b");
    }

    #[test]
    fn test_attribute_overwrite_keeps_position() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let a = doc.add_child(root, "a");
        doc.set_attribute(a, "x", "1");
        doc.set_attribute(a, "y", "2");
        doc.set_attribute(a, "x", "3");

        let attrs: Vec<_> = doc
            .get(a)
            .unwrap()
            .attributes()
            .iter()
            .map(|at| (at.name.as_ref(), at.value.as_ref()))
            .collect();
        assert_eq!(attrs, vec![("x", "3"), ("y", "2")]);
    }

    #[test]
    fn test_children_by_name_last_wins() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let first = doc.add_child(root, "dup");
        let other = doc.add_child(root, "other");
        let second = doc.add_child(root, "dup");

        let map = doc.children_by_name(root);
        assert_eq!(map.len(), 2);
        // Last child with the name wins, first-seen position is kept.
        let entries: Vec<_> = map.iter().map(|(k, &v)| (k.as_ref(), v)).collect();
        assert_eq!(entries, vec![("dup", second), ("other", other)]);
        assert_ne!(map["dup"], first);
    }

    #[test]
    fn test_value_and_take() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let a = doc.add_child(root, "a");

        assert_eq!(doc.value(a), None);
        doc.set_value(a, Some("text".into()));
        assert_eq!(doc.value(a), Some("text"));
        assert_eq!(doc.take_value(a), Some("text".into()));
        assert_eq!(doc.value(a), None);
    }

    #[test]
    fn test_render_value_and_attributes() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let a = doc.add_child(root, "a");
        doc.set_value(a, Some("v".into()));
        doc.set_attribute(a, "x", "1");

        assert_eq!(
            doc.to_string(),
            "\nElement:\npath = a\nvalue = \"v\"\nattributes:\nx = \"1\"\n"
        );
    }

    #[test]
    fn test_render_null_and_nested() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let a = doc.add_child(root, "a");
        let b = doc.add_child(a, "b");
        doc.set_value(b, Some("1".into()));
        doc.add_child(a, "c");

        // `a` has children: no value line. `c` has neither value nor
        // children: literal null.
        assert_eq!(
            doc.to_string(),
            "\nElement:\npath = a\n\
             \nElement:\npath = a, b\nvalue = \"1\"\n\
             \nElement:\npath = a, c\nvalue = null\n"
        );
    }

    #[test]
    fn test_render_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.to_string(), "");
    }
}
