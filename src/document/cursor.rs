/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Debug;
use std::fmt::Display;

use super::Attributes;
use super::Children;
use super::DescendantOrSelf;
use super::Document;
use super::NodeId;
use super::NodeKind;
use super::PrintOptions;
use super::printer;

/// A read-only view of a node for chained navigation.
///
/// Cursors borrow the document, so the tree cannot be modified while
/// any cursor is alive. A cursor can be null, which means it does not
/// point to any node. Navigation methods of a null cursor return null
/// cursors, and property methods return empty values.
///
/// ```
/// let doc: xmlnode::Document = "<a><b/><c x='1'/></a>".parse().unwrap();
/// let c = doc.first_element().first_child_named("c");
/// assert_eq!(c.attribute("x"), Some("1"));
/// assert!(c.next().is_null());
/// assert!(c.next().next().parent().is_null());
/// ```
#[derive(Clone, Copy)]
pub struct Cursor<'a> {
    document: &'a Document,
    node: Option<NodeId>,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(document: &'a Document, node: Option<NodeId>) -> Cursor<'a> {
        Cursor {
            document,
            node: node.filter(|id| document.contains(*id)),
        }
    }

    fn step(self, f: impl FnOnce(&'a Document, NodeId) -> Option<NodeId>) -> Cursor<'a> {
        let node = self.node.and_then(|id| f(self.document, id));
        Cursor {
            document: self.document,
            node,
        }
    }

    pub(super) fn clear(&mut self) {
        self.node = None;
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    //
    // Navigation methods
    //

    pub fn parent(self) -> Cursor<'a> {
        self.step(Document::parent)
    }

    /// Goes up to the document root.
    pub fn root(self) -> Cursor<'a> {
        self.step(|document, _| Some(document.root()))
    }

    pub fn first_child(self) -> Cursor<'a> {
        self.step(Document::first_child)
    }

    pub fn last_child(self) -> Cursor<'a> {
        self.step(Document::last_child)
    }

    pub fn first_child_named(self, name: &str) -> Cursor<'a> {
        self.step(|document, id| document.first_child_named(id, name))
    }

    pub fn last_child_named(self, name: &str) -> Cursor<'a> {
        self.step(|document, id| document.last_child_named(id, name))
    }

    pub fn next(self) -> Cursor<'a> {
        self.step(Document::next_sibling)
    }

    pub fn previous(self) -> Cursor<'a> {
        self.step(Document::previous_sibling)
    }

    pub fn next_named(self, name: &str) -> Cursor<'a> {
        self.step(|document, id| document.next_sibling_named(id, name))
    }

    pub fn previous_named(self, name: &str) -> Cursor<'a> {
        self.step(|document, id| document.previous_sibling_named(id, name))
    }

    /// First child of the `Normal` kind.
    pub fn first_element(self) -> Cursor<'a> {
        self.children()
            .find(|child| child.is_element())
            .unwrap_or(Cursor {
                document: self.document,
                node: None,
            })
    }

    pub fn next_element(self) -> Cursor<'a> {
        let mut next = self.next();
        while !next.is_null() && !next.is_element() {
            next = next.next();
        }
        next
    }

    //
    // Iterator methods
    //

    pub fn children(self) -> Children<'a> {
        Children::new(self.first_child())
    }

    pub fn attributes(self) -> Attributes<'a> {
        Attributes::new(self)
    }

    pub fn descendant_or_self(self) -> DescendantOrSelf<'a> {
        DescendantOrSelf::new(self)
    }

    //
    // Node property methods
    //

    pub fn is_null(&self) -> bool {
        self.node.is_none()
    }

    pub fn is_element(&self) -> bool {
        self.kind() == Some(NodeKind::Normal)
    }

    pub fn kind(&self) -> Option<NodeKind> {
        self.document.kind(self.node?)
    }

    pub fn name(&self) -> &'a str {
        self.node.map_or("", |id| self.document.name(id))
    }

    pub fn value(&self) -> &'a str {
        self.node.map_or("", |id| self.document.value(id))
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        let attr = self.document.find_attribute(self.node?, name)?;
        Some(self.document.attribute_value(attr))
    }

    pub fn render_size(&self, options: &PrintOptions) -> usize {
        let Some(node) = self.node else {
            return 0;
        };
        let mut size = 0;
        // Counting cannot fail
        let _ = printer::print(self.document, node, options, &mut size);
        size
    }

    /// Serializes the subtree of this node.
    pub fn render(&self, options: &PrintOptions) -> String {
        let Some(node) = self.node else {
            return String::new();
        };
        let mut buf = String::with_capacity(self.render_size(options));
        // Appending to a String cannot fail
        let _ = printer::print(self.document, node, options, &mut buf);
        buf
    }
}

impl Debug for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cursor ({:?})", self.node)
    }
}

impl Display for Cursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.node {
            Some(node) => printer::print(self.document, node, &PrintOptions::compact(), f),
            None => Ok(()),
        }
    }
}
