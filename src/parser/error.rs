/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// Type of the error which happened during the XML parsing.
///
/// Each category carries a short description of the actual problem,
/// which is also available via the [description()](ParseError::description)
/// method. Location of the error is available via the
/// [location()](super::DocumentParser::location) method of the parser.
///
/// Any error aborts the whole parse. Nodes created before the error are
/// left in the document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// A tag or attribute name is empty or is not terminated properly.
    MalformedName(&'static str),

    /// A character which is not allowed in the current context.
    ///
    /// Names cannot contain `;`, `:`, `,` or `&` characters, and the
    /// document type declaration has its own set of forbidden characters.
    ForbiddenCharacter(&'static str),

    /// A comment, character data section, document type declaration,
    /// processing instruction, tag, or element is missing its end marker.
    UnterminatedConstruct(&'static str),

    /// An end tag does not match the name of the currently open element.
    EndTagMismatch(&'static str),

    /// Input ended in the middle of a name or reference.
    TruncatedInput(&'static str),

    /// A numeric character reference has a bad digit or value.
    InvalidCharacterReference(&'static str),

    /// A named reference is not one of the supported predefined entities.
    ///
    /// Only `&lt;`, `&gt;`, `&amp;`, and `&quot;` are recognized. Note that
    /// `&apos;` is not.
    UnknownEntity(&'static str),
}

impl ParseError {
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::MalformedName(msg)
            | ParseError::ForbiddenCharacter(msg)
            | ParseError::UnterminatedConstruct(msg)
            | ParseError::EndTagMismatch(msg)
            | ParseError::TruncatedInput(msg)
            | ParseError::InvalidCharacterReference(msg)
            | ParseError::UnknownEntity(msg) => msg,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedName(msg) => write!(f, "malformed name: {}", msg),
            ParseError::ForbiddenCharacter(msg) => write!(f, "forbidden character: {}", msg),
            ParseError::UnterminatedConstruct(msg) => {
                write!(f, "unterminated construct: {}", msg)
            }
            ParseError::EndTagMismatch(msg) => write!(f, "end tag mismatch: {}", msg),
            ParseError::TruncatedInput(msg) => write!(f, "truncated input: {}", msg),
            ParseError::InvalidCharacterReference(msg) => {
                write!(f, "invalid character reference: {}", msg)
            }
            ParseError::UnknownEntity(msg) => write!(f, "unknown entity: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

pub(crate) mod description {
    pub(crate) const TAG_EMPTY_NAME: &str = "Tag has no name";
    pub(crate) const TAG_TRUNCATED: &str = "Document ends right after '<'";
    pub(crate) const TAG_NAME_EQUAL: &str = "Tag name cannot be followed by '='";
    pub(crate) const TAG_PI_END: &str = "Element tag cannot end with '?>'";
    pub(crate) const TAG_MISSING_END: &str = "Tag is not closed with '>' or '/>'";
    pub(crate) const NAME_BAD_CHAR: &str = "Names cannot contain ';', ':', ',' or '&'";
    pub(crate) const NAME_BAD_SLASH: &str = "The '/' in a tag must be followed by '>'";
    pub(crate) const NAME_BAD_QUESTION: &str = "The '?' in a tag must be followed by '>'";
    pub(crate) const NAME_MISSING_END: &str = "Name is not terminated";
    pub(crate) const ELEMENT_MISSING_END_TAG: &str = "Element has no end tag";
    pub(crate) const ELEMENT_BAD_PARENT: &str = "Element cannot be placed in this node";
    pub(crate) const END_TAG_MISMATCH: &str = "Start and end tags have different names";
    pub(crate) const END_TAG_BAD_CLOSE: &str = "End tag must be closed with a single '>'";
    pub(crate) const END_TAG_ATTRIBUTES: &str = "End tag cannot have attributes";
    pub(crate) const END_TAG_MISSING_END: &str = "End tag is not closed with '>'";
    pub(crate) const ATTRIBUTE_WITHOUT_VALUE: &str = "Tag attribute must have a value";
    pub(crate) const ATTRIBUTE_WITHOUT_EQUAL: &str =
        "Tag attributes must have '=' before the value";
    pub(crate) const ATTRIBUTE_WITHOUT_QUOTE: &str =
        "Tag attribute value must be in double or single quotes";
    pub(crate) const ATTRIBUTE_VALUE_MISSING_END: &str = "Tag attribute value is not terminated";
    pub(crate) const CDATA_SECTION_MISSING_END: &str = "Character data section has no ']]>' end";
    pub(crate) const COMMENT_MISSING_END: &str = "Comment has no '-->' end";
    pub(crate) const DOCTYPE_MISSING_END: &str = "Doctype has no '>' end";
    pub(crate) const DOCTYPE_SUBSET_MISSING_END: &str = "Doctype internal subset has no ']' end";
    pub(crate) const DOCTYPE_BAD_CHAR: &str =
        "Doctype cannot have '<', ']', ';', ':', ',' or '&' outside the internal subset";
    pub(crate) const PI_MISSING_END: &str = "Processing instruction has no '?>' end";
    pub(crate) const MARKUP_UNRECOGNIZED: &str =
        "Markup is not a comment or a document type declaration";
    pub(crate) const REFERENCE_MISSING_END: &str = "Reference has no ';' end";
    pub(crate) const REFERENCE_UNKNOWN_ENTITY: &str =
        "Only lt, gt, amp, and quot entity references are supported";
    pub(crate) const REFERENCE_INVALID_DECIMAL: &str = "Non digit in decimal character reference";
    pub(crate) const REFERENCE_INVALID_HEX: &str =
        "Non hex digit in hexadecimal character reference";
    pub(crate) const REFERENCE_EMPTY: &str = "Character reference has no digits";
    pub(crate) const REFERENCE_OUT_OF_RANGE: &str =
        "Character reference is not a valid Unicode character";
}
