/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;

/// A position in the parser input text.
///
/// This struct is returned from the
/// [location()](crate::DocumentParser::location) method and gives you
/// the position where the parser stopped, which is right at the
/// problem after a failed parse.
///
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Location {
    /// Byte position in the input text.
    pub bytes: usize,
    /// How many lines have been parsed. Lines are separated by the newline character.
    pub lines: usize,
    /// How many bytes after the last newline character.
    pub column: usize,
}

impl Location {
    /// Creates a new location at the beginning of the input text.
    pub fn new() -> Self {
        Location {
            bytes: 0,
            lines: 0,
            column: 0,
        }
    }

    /// Computes the location of the byte position `pos` in `text`.
    pub(super) fn at(text: &[u8], pos: usize) -> Self {
        let pos = std::cmp::min(pos, text.len());
        let mut location = Location::new();
        for &c in &text[..pos] {
            location.advance(c);
        }
        location
    }

    fn advance(&mut self, c: u8) {
        self.bytes += 1;
        if c == b'\n' {
            self.lines += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::new()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "byte: {}, line: {}, column: {}",
            self.bytes, self.lines, self.column
        )
    }
}
