/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Formatter;
use std::fmt::Result;

use crate::entities::escape;
use crate::entities::escape_fmt;
use crate::entities::escaped_size;

use super::Document;
use super::NodeId;
use super::node::Payload;

/// Serializer settings.
///
/// Default is indented output with one tab per nesting level, where
/// every construct is followed by a newline.
///
/// ```
/// use xmlnode::{Document, PrintOptions};
///
/// let doc: Document = "<a><b/></a>".parse().unwrap();
/// let options = PrintOptions::default().with_indent_unit("  ");
/// assert_eq!(doc.render(&options), "<a>\n  <b/>\n</a>\n");
/// assert_eq!(doc.render(&PrintOptions::compact()), "<a><b/></a>");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrintOptions {
    pub indent: bool,
    pub indent_unit: String,
}

impl PrintOptions {
    /// No indentation and no newlines.
    pub fn compact() -> PrintOptions {
        PrintOptions {
            indent: false,
            indent_unit: String::new(),
        }
    }

    pub fn with_indent(mut self, indent: bool) -> PrintOptions {
        self.indent = indent;
        self
    }

    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> PrintOptions {
        self.indent_unit = unit.into();
        self
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        PrintOptions {
            indent: true,
            indent_unit: "\t".to_string(),
        }
    }
}

/// Destination of the serializer output.
pub(super) trait Output {
    fn text(&mut self, s: &str) -> Result;
    fn escaped(&mut self, s: &str) -> Result;
}

// Only counts the bytes
impl Output for usize {
    fn text(&mut self, s: &str) -> Result {
        *self += s.len();
        Ok(())
    }

    fn escaped(&mut self, s: &str) -> Result {
        *self += escaped_size(s);
        Ok(())
    }
}

impl Output for String {
    fn text(&mut self, s: &str) -> Result {
        self.push_str(s);
        Ok(())
    }

    fn escaped(&mut self, s: &str) -> Result {
        escape(s, self);
        Ok(())
    }
}

impl Output for Formatter<'_> {
    fn text(&mut self, s: &str) -> Result {
        self.write_str(s)
    }

    fn escaped(&mut self, s: &str) -> Result {
        escape_fmt(s, self)
    }
}

struct Printer<'a, O: Output + ?Sized> {
    document: &'a Document,
    options: &'a PrintOptions,
    out: &'a mut O,
}

impl<O: Output + ?Sized> Printer<'_, O> {
    fn indent(&mut self, level: usize) -> Result {
        if self.options.indent {
            for _ in 0..level {
                self.out.text(&self.options.indent_unit)?;
            }
        }
        Ok(())
    }

    fn newline(&mut self) -> Result {
        if self.options.indent {
            self.out.text("\n")?;
        }
        Ok(())
    }

    fn node(&mut self, node: NodeId, level: usize) -> Result {
        let document = self.document;
        let Some(data) = document.nodes.get(node.0) else {
            return Ok(());
        };
        match &data.payload {
            Payload::Document { children } => {
                for child in children {
                    self.node(*child, level)?;
                }
            }
            Payload::Doctype { text } => {
                self.indent(level)?;
                self.out.text("<!DOCTYPE ")?;
                self.out.text(text)?;
                self.out.text(">")?;
                self.newline()?;
            }
            Payload::Comment { text } => {
                self.indent(level)?;
                self.out.text("<!--")?;
                self.out.text(text)?;
                self.out.text("-->")?;
                self.newline()?;
            }
            Payload::ProcessingInstruction { text, .. } => {
                self.indent(level)?;
                self.out.text("<?")?;
                self.out.text(text)?;
                self.out.text("?>")?;
                self.newline()?;
            }
            Payload::Normal {
                name,
                value,
                children,
                attributes,
            } => {
                self.indent(level)?;
                self.out.text("<")?;
                self.out.text(name)?;
                for (key, attr) in attributes {
                    if key.is_empty() {
                        continue;
                    }
                    let Some(attr) = document.attributes.get(attr.0) else {
                        continue;
                    };
                    self.out.text(" ")?;
                    self.out.text(key)?;
                    self.out.text("=\"")?;
                    self.out.escaped(&attr.value)?;
                    self.out.text("\"")?;
                }
                if value.is_empty() && children.is_empty() {
                    self.out.text("/>")?;
                    self.newline()?;
                    return Ok(());
                }
                self.out.text(">")?;
                self.out.escaped(value)?;
                if !children.is_empty() {
                    self.newline()?;
                    for child in children {
                        self.node(*child, level + 1)?;
                    }
                    self.indent(level)?;
                }
                self.out.text("</")?;
                self.out.text(name)?;
                self.out.text(">")?;
                self.newline()?;
            }
        }
        Ok(())
    }
}

/// Writes the subtree of the node into the output.
pub(super) fn print<O: Output + ?Sized>(
    document: &Document,
    node: NodeId,
    options: &PrintOptions,
    out: &mut O,
) -> Result {
    let mut printer = Printer {
        document,
        options,
        out,
    };
    printer.node(node, 0)
}
