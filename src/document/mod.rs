/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod cursor;
mod iterators;
mod node;
mod printer;

use std::fmt::Display;
use std::str::FromStr;

use tracing::trace;

use crate::arena::Arena;
use crate::arena::ArenaStats;
use crate::arena::Index;
use crate::parser::DocumentParser;
use crate::parser::ParseError;
pub use cursor::Cursor;
pub use iterators::Attributes;
pub use iterators::Children;
pub use iterators::DescendantOrSelf;
use node::AttributeData;
use node::NodeData;
pub use node::NodeKind;
use node::Payload;
pub use printer::PrintOptions;

/// Handle of a node in a [Document].
///
/// Handles are plain values. A handle of a deleted node is stale and all
/// operations given a stale handle do nothing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(Index);

/// Handle of an attribute in a [Document].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct AttributeId(Index);

/// Where a new node goes relative to its anchor node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InsertPosition {
    /// Becomes the first child of the anchor.
    Prepend,
    /// Becomes the last child of the anchor.
    Append,
    /// Becomes the previous sibling of the anchor.
    Before,
    /// Becomes the next sibling of the anchor.
    After,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChildPosition {
    First,
    Last,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SiblingPosition {
    Before,
    After,
}

/// Slot usage of the two arenas of a [Document].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DocumentStats {
    pub nodes: ArenaStats,
    pub attributes: ArenaStats,
}

impl Display for DocumentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nodes: ({}), attributes: ({})", self.nodes, self.attributes)
    }
}

/// An XML document tree.
///
/// There is always exactly one node of the [NodeKind::Document] kind,
/// the root, which lives as long as the document. Other nodes are
/// created with the insert methods or by the parser, and are referred
/// to by [NodeId] handles.
///
/// ```
/// use xmlnode::{Document, NodeKind, PrintOptions};
///
/// let mut doc = Document::new();
/// let root = doc.root();
/// let html = doc.append_child(root, NodeKind::Normal, "html", "").unwrap();
/// let body = doc.append_child(html, NodeKind::Normal, "body", "hello").unwrap();
/// doc.add_or_update_attribute(body, "class", "main");
///
/// assert_eq!(
///     doc.render(&PrintOptions::compact()),
///     "<html><body class=\"main\">hello</body></html>"
/// );
/// ```
pub struct Document {
    nodes: Arena<NodeData>,
    attributes: Arena<AttributeData>,
    root: NodeId,
}

impl Document {
    pub fn new() -> Document {
        let mut nodes = Arena::new();
        let root = NodeId(nodes.insert(NodeData {
            parent: None,
            payload: Payload::new(NodeKind::Document, "", ""),
        }));

        Document {
            nodes,
            attributes: Arena::new(),
            root,
        }
    }

    /// Parses the XML text into this document.
    ///
    /// The document is cleared first. If the text has a syntax error, the
    /// nodes parsed up to the error are left in the document. Use the
    /// [DocumentParser] directly to get the error location.
    pub fn parse(&mut self, text: &str) -> Result<(), ParseError> {
        DocumentParser::new(text).parse_into(self)
    }

    /// Deletes every node except the root.
    ///
    /// Unbound attributes are not affected.
    pub fn clear(&mut self) {
        self.delete_children(self.root);
        trace!(stats = %self.arena_stats(), "document cleared");
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn cursor<'a>(&'a self, node: NodeId) -> Cursor<'a> {
        Cursor::new(self, Some(node))
    }

    pub fn top<'a>(&'a self) -> Cursor<'a> {
        Cursor::new(self, Some(self.root))
    }

    pub fn arena_stats(&self) -> DocumentStats {
        DocumentStats {
            nodes: self.nodes.stats(),
            attributes: self.attributes.stats(),
        }
    }

    //
    // Convenience functions to avoid typing .top() all the time
    //

    pub fn first_element<'a>(&'a self) -> Cursor<'a> {
        self.top().first_element()
    }

    pub fn find_element<'a>(&'a self, name: &str) -> Cursor<'a> {
        self.top().first_child_named(name)
    }

    //
    // Node property methods
    //

    fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.nodes.get(node.0)
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(node.0)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(node.0)
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.node(node).map(|data| data.payload.kind())
    }

    /// Name of a `Normal` or `ProcessingInstruction` node, empty otherwise.
    pub fn name(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |data| data.payload.name())
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |data| data.payload.value())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|data| data.payload.children())
            .unwrap_or_default()
    }

    fn is_named(&self, node: NodeId, name: &str) -> bool {
        self.node(node).is_some_and(|data| {
            data.payload.kind().has_name() && data.payload.name() == name
        })
    }

    /// Returns true if the name was changed.
    pub fn set_name(&mut self, node: NodeId, name: &str) -> bool {
        match self.node_mut(node).and_then(|data| data.payload.name_mut()) {
            Some(old) => {
                name.clone_into(old);
                true
            }
            None => false,
        }
    }

    /// Returns true if the value was changed.
    ///
    /// Values of `Normal`, `Comment`, and `Doctype` nodes can be changed.
    pub fn set_value(&mut self, node: NodeId, value: &str) -> bool {
        match self.node_mut(node).and_then(|data| data.payload.value_mut()) {
            Some(old) => {
                value.clone_into(old);
                true
            }
            None => false,
        }
    }

    pub fn append_value(&mut self, node: NodeId, value: &str) -> bool {
        match self.node_mut(node).and_then(|data| data.payload.value_mut()) {
            Some(old) => {
                old.push_str(value);
                true
            }
            None => false,
        }
    }

    /// Changes the kind of a node.
    ///
    /// Name, value, children, and attributes are kept if the new kind
    /// has them, and deleted otherwise. Kind of the root cannot be changed,
    /// and no other node can become a `Document`.
    pub fn set_kind(&mut self, node: NodeId, kind: NodeKind) -> bool {
        if node == self.root || kind == NodeKind::Document {
            return false;
        }
        let Some(data) = self.node_mut(node) else {
            return false;
        };
        if data.payload.kind() == kind {
            return true;
        }
        let old = std::mem::replace(&mut data.payload, Payload::new(kind, "", ""));
        let (payload, orphans, dropped) = old.convert(kind);
        data.payload = payload;
        for child in orphans {
            self.destroy_subtree(child);
        }
        for attr in dropped.into_values() {
            self.attributes.remove(attr.0);
        }
        true
    }

    //
    // Navigation methods
    //

    pub fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).first().copied()
    }

    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.children(node).last().copied()
    }

    /// First `Normal` or `ProcessingInstruction` child with the given name.
    pub fn first_child_named(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .find(|child| self.is_named(*child, name))
    }

    pub fn last_child_named(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.children(node)
            .iter()
            .rev()
            .copied()
            .find(|child| self.is_named(*child, name))
    }

    /// Returns the parent and the position of the node in its children.
    fn position(&self, node: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(node)?;
        let index = self.children(parent).iter().position(|id| *id == node)?;
        Some((parent, index))
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let (parent, index) = self.position(node)?;
        self.children(parent).get(index + 1).copied()
    }

    pub fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let (parent, index) = self.position(node)?;
        let index = index.checked_sub(1)?;
        self.children(parent).get(index).copied()
    }

    pub fn next_sibling_named(&self, node: NodeId, name: &str) -> Option<NodeId> {
        let (parent, index) = self.position(node)?;
        self.children(parent)[index + 1..]
            .iter()
            .copied()
            .find(|sibling| self.is_named(*sibling, name))
    }

    pub fn previous_sibling_named(&self, node: NodeId, name: &str) -> Option<NodeId> {
        let (parent, index) = self.position(node)?;
        self.children(parent)[..index]
            .iter()
            .rev()
            .copied()
            .find(|sibling| self.is_named(*sibling, name))
    }

    //
    // Edit methods
    //

    /// Creates a new node relative to the anchor node.
    ///
    /// Returns `None` if the anchor is stale, if the anchor cannot have
    /// children for [InsertPosition::Prepend] and [InsertPosition::Append],
    /// if the anchor has no parent for [InsertPosition::Before] and
    /// [InsertPosition::After], or if the kind is [NodeKind::Document].
    ///
    /// The name is only used for `Normal` nodes. Name of a processing
    /// instruction can be set later with [set_name](Document::set_name).
    pub fn insert(
        &mut self,
        anchor: NodeId,
        position: InsertPosition,
        kind: NodeKind,
        name: &str,
        value: &str,
    ) -> Option<NodeId> {
        if kind == NodeKind::Document {
            return None;
        }
        let anchor_kind = self.kind(anchor)?;
        let (parent, index) = match position {
            InsertPosition::Prepend | InsertPosition::Append => {
                if !anchor_kind.has_children() {
                    return None;
                }
                let index = match position {
                    InsertPosition::Prepend => 0,
                    _ => self.children(anchor).len(),
                };
                (anchor, index)
            }
            InsertPosition::Before | InsertPosition::After => {
                let (parent, index) = self.position(anchor)?;
                match position {
                    InsertPosition::Before => (parent, index),
                    _ => (parent, index + 1),
                }
            }
        };

        let node = NodeId(self.nodes.insert(NodeData {
            parent: Some(parent),
            payload: Payload::new(kind, name, value),
        }));
        if let Some(children) = self
            .node_mut(parent)
            .and_then(|data| data.payload.children_mut())
        {
            children.insert(index, node);
        }
        Some(node)
    }

    pub fn insert_child(
        &mut self,
        parent: NodeId,
        position: ChildPosition,
        kind: NodeKind,
        name: &str,
        value: &str,
    ) -> Option<NodeId> {
        let position = match position {
            ChildPosition::First => InsertPosition::Prepend,
            ChildPosition::Last => InsertPosition::Append,
        };
        self.insert(parent, position, kind, name, value)
    }

    pub fn insert_sibling(
        &mut self,
        anchor: NodeId,
        position: SiblingPosition,
        kind: NodeKind,
        name: &str,
        value: &str,
    ) -> Option<NodeId> {
        let position = match position {
            SiblingPosition::Before => InsertPosition::Before,
            SiblingPosition::After => InsertPosition::After,
        };
        self.insert(anchor, position, kind, name, value)
    }

    pub fn append_child(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        name: &str,
        value: &str,
    ) -> Option<NodeId> {
        self.insert(parent, InsertPosition::Append, kind, name, value)
    }

    /// Frees the node, its descendants, and all their attributes.
    ///
    /// Does not touch the child list of the parent.
    fn destroy_subtree(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            let Some(data) = self.nodes.remove(id.0) else {
                continue;
            };
            let (children, attributes) = data.payload.into_links();
            pending.extend(children);
            for attr in attributes.into_values() {
                self.attributes.remove(attr.0);
            }
        }
    }

    /// Deletes the node with its whole subtree.
    ///
    /// Returns false for stale handles and for the root, which can only
    /// be emptied with [clear](Document::clear).
    pub fn delete_node(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.parent(node) else {
            return false;
        };
        if let Some(children) = self
            .node_mut(parent)
            .and_then(|data| data.payload.children_mut())
        {
            children.retain(|child| *child != node);
        }
        self.destroy_subtree(node);
        true
    }

    pub fn delete_children(&mut self, node: NodeId) {
        let children = match self
            .node_mut(node)
            .and_then(|data| data.payload.children_mut())
        {
            Some(children) => std::mem::take(children),
            None => return,
        };
        for child in children {
            self.destroy_subtree(child);
        }
    }

    /// Deletes the first child, or the first one with the given name.
    ///
    /// Returns the sibling which followed the deleted node.
    pub fn delete_first_child(&mut self, parent: NodeId, name: Option<&str>) -> Option<NodeId> {
        let target = match name {
            Some(name) => self.first_child_named(parent, name),
            None => self.first_child(parent),
        }?;
        let next = self.next_sibling(target);
        self.delete_node(target);
        next
    }

    /// Deletes the last child, or the last one with the given name.
    ///
    /// Returns the sibling which preceded the deleted node.
    pub fn delete_last_child(&mut self, parent: NodeId, name: Option<&str>) -> Option<NodeId> {
        let target = match name {
            Some(name) => self.last_child_named(parent, name),
            None => self.last_child(parent),
        }?;
        let previous = self.previous_sibling(target);
        self.delete_node(target);
        previous
    }

    pub fn delete_next_sibling(&mut self, node: NodeId, name: Option<&str>) -> Option<NodeId> {
        let target = match name {
            Some(name) => self.next_sibling_named(node, name),
            None => self.next_sibling(node),
        }?;
        let next = self.next_sibling(target);
        self.delete_node(target);
        next
    }

    pub fn delete_previous_sibling(&mut self, node: NodeId, name: Option<&str>) -> Option<NodeId> {
        let target = match name {
            Some(name) => self.previous_sibling_named(node, name),
            None => self.previous_sibling(node),
        }?;
        let previous = self.previous_sibling(target);
        self.delete_node(target);
        previous
    }

    //
    // Attribute methods
    //

    pub fn find_attribute(&self, node: NodeId, name: &str) -> Option<AttributeId> {
        self.node(node)?.payload.attributes()?.get(name).copied()
    }

    /// First attribute of the node in name order.
    pub fn first_attribute(&self, node: NodeId) -> Option<AttributeId> {
        self.node(node)?.payload.attributes()?.values().next().copied()
    }

    pub fn last_attribute(&self, node: NodeId) -> Option<AttributeId> {
        self.node(node)?
            .payload
            .attributes()?
            .values()
            .next_back()
            .copied()
    }

    /// Sets the value of the named attribute, creating it if necessary.
    ///
    /// Only `Normal` and `ProcessingInstruction` nodes have attributes,
    /// `None` is returned for the other kinds.
    pub fn add_or_update_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: &str,
    ) -> Option<AttributeId> {
        let existing = self.node(node)?.payload.attributes()?.get(name).copied();
        if let Some(attr) = existing {
            self.set_attribute_value(attr, value);
            return Some(attr);
        }
        let attr = self.create_attribute(name, value);
        if self.bind_attribute(attr, node) {
            Some(attr)
        } else {
            self.attributes.remove(attr.0);
            None
        }
    }

    /// Creates an attribute which does not belong to any node yet.
    ///
    /// Use [move_attribute](Document::move_attribute) to attach it.
    pub fn create_attribute(&mut self, name: &str, value: &str) -> AttributeId {
        AttributeId(self.attributes.insert(AttributeData {
            name: name.to_string(),
            value: value.to_string(),
            owner: None,
        }))
    }

    // Attribute must be detached
    fn bind_attribute(&mut self, attr: AttributeId, node: NodeId) -> bool {
        let Some(name) = self.attributes.get(attr.0).map(|data| data.name.clone()) else {
            return false;
        };
        let Some(map) = self
            .nodes
            .get_mut(node.0)
            .and_then(|data| data.payload.attributes_mut())
        else {
            return false;
        };
        let evicted = map.insert(name, attr);
        if let Some(data) = self.attributes.get_mut(attr.0) {
            data.owner = Some(node);
        }
        if let Some(old) = evicted
            && old != attr
        {
            self.attributes.remove(old.0);
        }
        true
    }

    fn unbind_attribute(&mut self, attr: AttributeId) {
        let Some(data) = self.attributes.get_mut(attr.0) else {
            return;
        };
        let Some(owner) = data.owner.take() else {
            return;
        };
        if let Some(map) = self
            .nodes
            .get_mut(owner.0)
            .and_then(|node| node.payload.attributes_mut())
            && map.get(&data.name) == Some(&attr)
        {
            map.remove(&data.name);
        }
    }

    /// Changes the name of an attribute.
    ///
    /// A bound attribute replaces any other attribute of its owner with
    /// the same name.
    pub fn rename_attribute(&mut self, attr: AttributeId, name: &str) -> bool {
        let Some(owner) = self.attributes.get(attr.0).map(|data| data.owner) else {
            return false;
        };
        self.unbind_attribute(attr);
        if let Some(data) = self.attributes.get_mut(attr.0) {
            name.clone_into(&mut data.name);
        }
        match owner {
            Some(node) => self.bind_attribute(attr, node),
            None => true,
        }
    }

    /// Detaches the attribute from its owner and attaches it to the new one.
    ///
    /// With `None`, the attribute is just detached. Returns false if the
    /// attribute is stale or the new owner cannot have attributes, the
    /// attribute is left detached in the latter case.
    pub fn move_attribute(&mut self, attr: AttributeId, owner: Option<NodeId>) -> bool {
        if !self.attributes.contains(attr.0) {
            return false;
        }
        self.unbind_attribute(attr);
        match owner {
            Some(node) => self.bind_attribute(attr, node),
            None => true,
        }
    }

    pub fn delete_attribute(&mut self, node: NodeId, name: &str) -> bool {
        match self.find_attribute(node, name) {
            Some(attr) => self.destroy_attribute(attr),
            None => false,
        }
    }

    pub fn delete_all_attributes(&mut self, node: NodeId) {
        let map = match self
            .node_mut(node)
            .and_then(|data| data.payload.attributes_mut())
        {
            Some(map) => std::mem::take(map),
            None => return,
        };
        for attr in map.into_values() {
            self.attributes.remove(attr.0);
        }
    }

    /// Frees the attribute, detaching it from its owner first.
    pub fn destroy_attribute(&mut self, attr: AttributeId) -> bool {
        self.unbind_attribute(attr);
        self.attributes.remove(attr.0).is_some()
    }

    pub fn attribute_name(&self, attr: AttributeId) -> &str {
        self.attributes.get(attr.0).map_or("", |data| &data.name)
    }

    pub fn attribute_value(&self, attr: AttributeId) -> &str {
        self.attributes.get(attr.0).map_or("", |data| &data.value)
    }

    pub fn attribute_owner(&self, attr: AttributeId) -> Option<NodeId> {
        self.attributes.get(attr.0)?.owner
    }

    pub fn set_attribute_value(&mut self, attr: AttributeId, value: &str) -> bool {
        match self.attributes.get_mut(attr.0) {
            Some(data) => {
                value.clone_into(&mut data.value);
                true
            }
            None => false,
        }
    }

    //
    // Output methods
    //

    /// Serializes the whole document.
    pub fn render(&self, options: &PrintOptions) -> String {
        self.top().render(options)
    }

    /// Exact byte size of the [render](Document::render) output.
    pub fn render_size(&self, options: &PrintOptions) -> usize {
        self.top().render_size(options)
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.top(), f)
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut document = Document::new();
        document.parse(s)?;
        Ok(document)
    }
}


mod nocompile;
