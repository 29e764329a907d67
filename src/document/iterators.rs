/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::btree_map;

use super::AttributeId;
use super::Cursor;
use super::Document;

/// Iterator over the `(name, value)` pairs of the attributes, in name order.
pub struct Attributes<'a> {
    document: &'a Document,
    inner: Option<btree_map::Values<'a, String, AttributeId>>,
}

impl<'a> Attributes<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        let document = cursor.document();
        let inner = cursor
            .node()
            .and_then(|id| document.nodes.get(id.0))
            .and_then(|data| data.payload.attributes())
            .map(|map| map.values());
        Attributes { document, inner }
    }
}

impl<'a> Iterator for Attributes<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let attr = self.inner.as_mut()?.next()?;
        let data = self.document.attributes.get(attr.0)?;
        Some((data.name.as_str(), data.value.as_str()))
    }
}

pub struct Children<'a> {
    current: Cursor<'a>,
}

impl<'a> Children<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Children { current: cursor }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_null() {
            return None;
        }
        let result = self.current;
        self.current = self.current.next();
        Some(result)
    }
}

/// Pre-order walk over a node and all of its descendants.
pub struct DescendantOrSelf<'a> {
    current: Cursor<'a>,
    level: usize,
    going_down: bool,
}

impl<'a> DescendantOrSelf<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        DescendantOrSelf {
            current: cursor,
            level: 0,
            going_down: true,
        }
    }
}

impl<'a> Iterator for DescendantOrSelf<'a> {
    type Item = Cursor<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_null() {
            return None;
        }
        let result = self.current;
        loop {
            if self.going_down {
                let child = self.current.first_child();
                if !child.is_null() {
                    self.current = child;
                    self.level += 1;
                    return Some(result);
                }
            }
            if self.level == 0 {
                self.current.clear();
                break;
            }
            let next = self.current.next();
            if next.is_null() {
                self.level -= 1;
                self.current = self.current.parent();
                self.going_down = false;
            } else {
                self.current = next;
                self.going_down = true;
                break;
            }
        }
        Some(result)
    }
}
