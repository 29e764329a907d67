/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;
mod location;

use tracing::debug;
use tracing::trace;

use crate::Document;
use crate::NodeId;
use crate::NodeKind;
use crate::entities::decode_reference;
pub use error::ParseError;
pub(crate) use error::description;
pub use location::Location;

macro_rules! whitespace {
    () => {
        b' ' | b'\t' | b'\r' | b'\n'
    };
}

macro_rules! xml_error {
    ($kind:ident, $desc:ident) => {
        return Err(ParseError::$kind(description::$desc))
    };
}

fn is_whitespace(c: u8) -> bool {
    matches!(c, whitespace!())
}

/// What follows a name in a tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum NameEnd {
    /// Whitespace, attributes might follow.
    Whitespace,
    /// `=`
    Equals,
    /// `>`, element content follows.
    Content,
    /// `/>`
    Empty,
    /// `?>`
    PiClose,
}

enum Construct {
    Node,
    EndTag,
}

/// Recursive descent parser which builds a [Document] from XML text.
///
/// Parsing stops at the first syntax error. Nodes created before the
/// error are kept in the document, and the [location()](DocumentParser::location)
/// method tells where the parser stopped.
///
/// ```
/// use xmlnode::{Document, DocumentParser, ParseError};
///
/// let mut doc = Document::new();
/// let mut parser = DocumentParser::new("<a>\n<b></c></a>");
/// match parser.parse_into(&mut doc) {
///     Err(ParseError::EndTagMismatch(_)) => {
///         assert_eq!(parser.location().lines, 1);
///     }
///     _ => unreachable!(),
/// }
/// // Partial tree is left behind
/// assert_eq!(doc.first_element().first_element().name(), "b");
/// ```
pub struct DocumentParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> DocumentParser<'a> {
    pub fn new(text: &'a str) -> DocumentParser<'a> {
        DocumentParser { text, pos: 0 }
    }

    /// Returns the current position of the parser in the text.
    pub fn location(&self) -> Location {
        Location::at(self.text.as_bytes(), self.pos)
    }

    /// Clears the document and fills it with the parsed nodes.
    pub fn parse_into(&mut self, document: &mut Document) -> Result<(), ParseError> {
        debug!(size = self.text.len(), "parse started");
        self.pos = 0;
        document.clear();

        let result = self.parse_document(document);
        match result {
            Ok(()) => {
                trace!(nodes = document.arena_stats().nodes.nr_live, "parse finished");
            }
            Err(err) => {
                debug!(error = %err, location = %self.location(), "parse failed");
            }
        }
        result
    }

    //
    // Cursor helpers
    //

    fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.text.as_bytes()[self.pos..].starts_with(prefix.as_bytes())
    }

    /// Byte position of the next occurrence of the pattern.
    fn find(&self, pattern: &str) -> Option<usize> {
        self.text[self.pos..]
            .find(pattern)
            .map(|index| self.pos + index)
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &self.text[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(is_whitespace);
    }

    /// Moves right after the next `<`, returns false if there is none.
    fn skip_to_tag(&mut self) -> bool {
        match self.find("<") {
            Some(pos) => {
                self.pos = pos + 1;
                true
            }
            None => {
                self.pos = self.text.len();
                false
            }
        }
    }

    /// Takes the text up to the end marker and moves past the marker.
    fn take_until(&mut self, marker: &str) -> Option<&'a str> {
        let end = self.find(marker)?;
        let text = &self.text[self.pos..end];
        self.pos = end + marker.len();
        Some(text)
    }

    //
    // Grammar
    //

    fn parse_document(&mut self, document: &mut Document) -> Result<(), ParseError> {
        let root = document.root();
        while self.skip_to_tag() {
            // End tags without an open element are skipped
            self.parse_construct(document, root)?;
        }
        Ok(())
    }

    // Called right after the '<'
    fn parse_construct(
        &mut self,
        document: &mut Document,
        parent: NodeId,
    ) -> Result<Construct, ParseError> {
        match self.peek() {
            None => xml_error!(TruncatedInput, TAG_TRUNCATED),
            Some(b'/') => {
                self.pos += 1;
                return Ok(Construct::EndTag);
            }
            Some(b'!') => {
                if self.starts_with("!--") {
                    self.pos += 3;
                    self.parse_comment(document, parent)?;
                } else if self.starts_with("!DOCTYPE") && self.peek_at(8).is_some_and(is_whitespace)
                {
                    self.pos += 9;
                    self.parse_doctype(document, parent)?;
                } else {
                    xml_error!(ForbiddenCharacter, MARKUP_UNRECOGNIZED);
                }
            }
            Some(b'?') => {
                self.pos += 1;
                self.parse_pi(document, parent)?;
            }
            Some(_) => self.parse_element(document, parent)?,
        }
        Ok(Construct::Node)
    }

    fn parse_name(&mut self) -> Result<(&'a str, NameEnd), ParseError> {
        let start = self.pos;
        loop {
            let Some(c) = self.peek() else {
                xml_error!(TruncatedInput, NAME_MISSING_END);
            };
            let (end, size) = match c {
                whitespace!() => (NameEnd::Whitespace, 1),
                b'=' => (NameEnd::Equals, 1),
                b'>' => (NameEnd::Content, 1),
                b'/' => match self.peek_at(1) {
                    Some(b'>') => (NameEnd::Empty, 2),
                    Some(_) => xml_error!(MalformedName, NAME_BAD_SLASH),
                    None => xml_error!(TruncatedInput, NAME_MISSING_END),
                },
                b'?' => match self.peek_at(1) {
                    Some(b'>') => (NameEnd::PiClose, 2),
                    Some(_) => xml_error!(MalformedName, NAME_BAD_QUESTION),
                    None => xml_error!(TruncatedInput, NAME_MISSING_END),
                },
                b';' | b':' | b',' | b'&' => xml_error!(ForbiddenCharacter, NAME_BAD_CHAR),
                _ => {
                    self.pos += 1;
                    continue;
                }
            };
            let name = &self.text[start..self.pos];
            if name.is_empty() {
                xml_error!(MalformedName, TAG_EMPTY_NAME);
            }
            self.pos += size;
            return Ok((name, end));
        }
    }

    fn parse_element(&mut self, document: &mut Document, parent: NodeId) -> Result<(), ParseError> {
        let (name, end) = self.parse_name()?;
        match end {
            NameEnd::Equals => xml_error!(MalformedName, TAG_NAME_EQUAL),
            NameEnd::PiClose => xml_error!(MalformedName, TAG_PI_END),
            _ => (),
        }
        let Some(node) = document.append_child(parent, NodeKind::Normal, name, "") else {
            xml_error!(ForbiddenCharacter, ELEMENT_BAD_PARENT);
        };

        let end = match end {
            NameEnd::Whitespace => self.parse_attributes(document, node)?,
            end => end,
        };
        if end == NameEnd::Empty {
            return Ok(());
        }

        if let Some(value) = self.parse_content()? {
            document.set_value(node, &value);
        }
        // Text between and after the children is skipped
        loop {
            match self.parse_construct(document, node)? {
                Construct::EndTag => break,
                Construct::Node => {
                    if !self.skip_to_tag() {
                        xml_error!(UnterminatedConstruct, ELEMENT_MISSING_END_TAG);
                    }
                }
            }
        }

        self.parse_end_tag(name)
    }

    /// Parses the attributes of a start tag, returns how the tag closed.
    fn parse_attributes(
        &mut self,
        document: &mut Document,
        node: NodeId,
    ) -> Result<NameEnd, ParseError> {
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => xml_error!(UnterminatedConstruct, TAG_MISSING_END),
                Some(b'>') => {
                    self.pos += 1;
                    return Ok(NameEnd::Content);
                }
                Some(b'/') => {
                    if self.peek_at(1) != Some(b'>') {
                        xml_error!(MalformedName, NAME_BAD_SLASH);
                    }
                    self.pos += 2;
                    return Ok(NameEnd::Empty);
                }
                Some(_) => (),
            }

            let (name, end) = self.parse_name()?;
            match end {
                NameEnd::Equals => (),
                NameEnd::Whitespace => {
                    self.skip_whitespace();
                    match self.peek() {
                        Some(b'=') => self.pos += 1,
                        None => xml_error!(UnterminatedConstruct, TAG_MISSING_END),
                        Some(b'>' | b'/') => xml_error!(MalformedName, ATTRIBUTE_WITHOUT_VALUE),
                        Some(_) => xml_error!(ForbiddenCharacter, ATTRIBUTE_WITHOUT_EQUAL),
                    }
                }
                NameEnd::Content | NameEnd::Empty => {
                    xml_error!(MalformedName, ATTRIBUTE_WITHOUT_VALUE)
                }
                NameEnd::PiClose => xml_error!(MalformedName, TAG_PI_END),
            }

            self.skip_whitespace();
            let quote = match self.peek() {
                Some(c @ (b'"' | b'\'')) => c,
                None => xml_error!(UnterminatedConstruct, TAG_MISSING_END),
                Some(_) => xml_error!(ForbiddenCharacter, ATTRIBUTE_WITHOUT_QUOTE),
            };
            self.pos += 1;
            let value = self.parse_attribute_value(quote)?;
            document.add_or_update_attribute(node, name, &value);
        }
    }

    fn parse_attribute_value(&mut self, quote: u8) -> Result<String, ParseError> {
        let mut value = String::new();
        loop {
            value.push_str(self.take_while(|c| c != quote && c != b'&'));
            match self.peek() {
                None => xml_error!(UnterminatedConstruct, ATTRIBUTE_VALUE_MISSING_END),
                Some(b'&') => self.pos = decode_reference(self.text, self.pos, &mut value)?,
                Some(_) => {
                    self.pos += 1;
                    return Ok(value);
                }
            }
        }
    }

    /// Collects the text before the first child or end tag.
    ///
    /// Returns `None` if there is only whitespace. Stops right after
    /// the `<` of the next construct.
    fn parse_content(&mut self) -> Result<Option<String>, ParseError> {
        let mut value = String::new();
        let mut has_value = false;
        loop {
            match self.peek() {
                None => xml_error!(UnterminatedConstruct, ELEMENT_MISSING_END_TAG),
                Some(b'<') => {
                    if !self.starts_with("<![CDATA[") {
                        self.pos += 1;
                        break;
                    }
                    self.pos += 9;
                    let Some(cdata) = self.take_until("]]>") else {
                        xml_error!(UnterminatedConstruct, CDATA_SECTION_MISSING_END);
                    };
                    value.push_str(cdata);
                    has_value = true;
                }
                Some(b'&') => {
                    self.pos = decode_reference(self.text, self.pos, &mut value)?;
                    has_value = true;
                }
                Some(_) => {
                    let text = self.take_while(|c| c != b'<' && c != b'&');
                    if !text.bytes().all(is_whitespace) {
                        has_value = true;
                    }
                    value.push_str(text);
                }
            }
        }
        Ok(has_value.then_some(value))
    }

    // Called right after the '</'
    fn parse_end_tag(&mut self, name: &str) -> Result<(), ParseError> {
        let (end_name, end) = self.parse_name()?;
        if end_name != name {
            xml_error!(EndTagMismatch, END_TAG_MISMATCH);
        }
        match end {
            NameEnd::Content => Ok(()),
            NameEnd::Whitespace => {
                self.skip_whitespace();
                match self.peek() {
                    Some(b'>') => {
                        self.pos += 1;
                        Ok(())
                    }
                    None => xml_error!(UnterminatedConstruct, END_TAG_MISSING_END),
                    Some(_) => xml_error!(ForbiddenCharacter, END_TAG_ATTRIBUTES),
                }
            }
            NameEnd::Equals | NameEnd::Empty | NameEnd::PiClose => {
                xml_error!(MalformedName, END_TAG_BAD_CLOSE)
            }
        }
    }

    fn parse_comment(&mut self, document: &mut Document, parent: NodeId) -> Result<(), ParseError> {
        let Some(text) = self.take_until("-->") else {
            xml_error!(UnterminatedConstruct, COMMENT_MISSING_END);
        };
        document.append_child(parent, NodeKind::Comment, "", text);
        Ok(())
    }

    fn parse_pi(&mut self, document: &mut Document, parent: NodeId) -> Result<(), ParseError> {
        let Some(text) = self.take_until("?>") else {
            xml_error!(UnterminatedConstruct, PI_MISSING_END);
        };
        document.append_child(parent, NodeKind::ProcessingInstruction, "", text);
        Ok(())
    }

    fn parse_doctype(&mut self, document: &mut Document, parent: NodeId) -> Result<(), ParseError> {
        let mut text = String::new();
        loop {
            match self.peek() {
                None => xml_error!(UnterminatedConstruct, DOCTYPE_MISSING_END),
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'[') => {
                    self.pos += 1;
                    let Some(subset) = self.take_until("]") else {
                        xml_error!(UnterminatedConstruct, DOCTYPE_SUBSET_MISSING_END);
                    };
                    text.push('[');
                    text.push_str(subset);
                    text.push(']');
                }
                Some(b'<' | b']' | b';' | b':' | b',' | b'&') => {
                    xml_error!(ForbiddenCharacter, DOCTYPE_BAD_CHAR)
                }
                Some(_) => {
                    text.push_str(self.take_while(|c| {
                        !matches!(c, b'>' | b'[' | b'<' | b']' | b';' | b':' | b',' | b'&')
                    }));
                }
            }
        }
        document.append_child(parent, NodeKind::Doctype, "", &text);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
