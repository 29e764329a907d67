/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::ParseError;
use crate::parser::description;

pub mod predefined {
    pub const LT: &str = "&lt;";
    pub const GT: &str = "&gt;";
    pub const AMP: &str = "&amp;";
    pub const APOS: &str = "&apos;";
    pub const QUOT: &str = "&quot;";
}

pub fn escaped_size(s: &str) -> usize {
    s.bytes()
        .map(|c| entity_for(c).map_or(1, str::len))
        .sum()
}

fn entity_for(c: u8) -> Option<&'static str> {
    match c {
        b'<' => Some(predefined::LT),
        b'>' => Some(predefined::GT),
        b'&' => Some(predefined::AMP),
        b'\'' => Some(predefined::APOS),
        b'"' => Some(predefined::QUOT),
        _ => None,
    }
}

pub fn escape(s: &str, buf: &mut String) {
    let mut back = 0;
    for (pos, c) in s.bytes().enumerate() {
        if let Some(entity) = entity_for(c) {
            buf.push_str(&s[back..pos]);
            buf.push_str(entity);
            back = pos + 1;
        }
    }
    buf.push_str(&s[back..]);
}

pub fn escape_fmt(s: &str, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut back = 0;
    for (pos, c) in s.bytes().enumerate() {
        if let Some(entity) = entity_for(c) {
            if back < pos {
                f.write_str(&s[back..pos])?;
            }
            f.write_str(entity)?;
            back = pos + 1;
        }
    }
    if back < s.len() {
        f.write_str(&s[back..])?;
    }
    Ok(())
}

/// Replaces the five XML special characters with predefined entities.
///
/// This is the only escaping the serializer does, and it always uses
/// the entity forms. Note that `'` becomes `&apos;` even though the
/// parser does not accept `&apos;` back.
///
/// ```
/// assert_eq!(xmlnode::encode_text("a<'b'>&\"c\""),
///     "a&lt;&apos;b&apos;&gt;&amp;&quot;c&quot;");
/// ```
pub fn encode_text(s: &str) -> String {
    let mut buf = String::with_capacity(escaped_size(s));
    escape(s, &mut buf);
    buf
}

/// Decodes one character or entity reference.
///
/// The `pos` argument must point to the `&` byte of the reference in
/// the `text`. Decoded character is appended to the `sink`, and the
/// position just after the closing `;` is returned.
///
/// Recognized forms are `&lt;`, `&gt;`, `&amp;`, `&quot;`, decimal
/// `&#N;` and hexadecimal `&#xN;` references. The `&apos;` entity is
/// intentionally not recognized.
///
/// ```
/// let mut s = String::new();
/// let next = xmlnode::decode_reference("x&#x3042;y", 1, &mut s).unwrap();
/// assert_eq!(s, "\u{3042}");
/// assert_eq!(next, 9);
/// ```
pub fn decode_reference(text: &str, pos: usize, sink: &mut String) -> Result<usize, ParseError> {
    let bytes = text.as_bytes();
    let Some(rest) = bytes.get(pos + 1..) else {
        return Err(ParseError::TruncatedInput(description::REFERENCE_MISSING_END));
    };

    if rest.first() == Some(&b'#') {
        return decode_char_reference(bytes, pos + 2, sink);
    }

    for (name, c) in [("lt;", '<'), ("gt;", '>'), ("amp;", '&'), ("quot;", '"')] {
        if rest.starts_with(name.as_bytes()) {
            sink.push(c);
            return Ok(pos + 1 + name.len());
        }
    }
    if !rest.contains(&b';') {
        return Err(ParseError::TruncatedInput(description::REFERENCE_MISSING_END));
    }
    Err(ParseError::UnknownEntity(description::REFERENCE_UNKNOWN_ENTITY))
}

fn decode_char_reference(bytes: &[u8], pos: usize, sink: &mut String) -> Result<usize, ParseError> {
    let mut pos = pos;
    let radix = if bytes.get(pos) == Some(&b'x') {
        pos += 1;
        16
    } else {
        10
    };
    let start = pos;
    let mut value: u32 = 0;
    loop {
        let Some(&c) = bytes.get(pos) else {
            return Err(ParseError::TruncatedInput(description::REFERENCE_MISSING_END));
        };
        if c == b';' {
            break;
        }
        let Some(digit) = (c as char).to_digit(radix) else {
            if radix == 16 {
                return Err(ParseError::InvalidCharacterReference(
                    description::REFERENCE_INVALID_HEX,
                ));
            }
            return Err(ParseError::InvalidCharacterReference(
                description::REFERENCE_INVALID_DECIMAL,
            ));
        };
        value = value
            .checked_mul(radix)
            .and_then(|v| v.checked_add(digit))
            .ok_or(ParseError::InvalidCharacterReference(
                description::REFERENCE_OUT_OF_RANGE,
            ))?;
        pos += 1;
    }
    if pos == start {
        return Err(ParseError::InvalidCharacterReference(
            description::REFERENCE_EMPTY,
        ));
    }
    let Some(c) = char::from_u32(value) else {
        return Err(ParseError::InvalidCharacterReference(
            description::REFERENCE_OUT_OF_RANGE,
        ));
    };
    sink.push(c);

    Ok(pos + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(s: &str) -> Result<(String, usize), ParseError> {
        let mut sink = String::new();
        let next = decode_reference(s, 0, &mut sink)?;
        Ok((sink, next))
    }

    #[test]
    fn escape_size() {
        const NOESCAPE: &str = "abc$#@!%^*(){}[]=-+/.,;:FDSF3443";
        assert_eq!(escaped_size(NOESCAPE), NOESCAPE.len());
        assert_eq!(escaped_size("abc&def"), "abc&amp;def".len());
        assert_eq!(escaped_size("<>&'\""), "&lt;&gt;&amp;&apos;&quot;".len());
        assert_eq!(escaped_size("\u{3042}"), 3);
    }

    #[test]
    fn escaping() {
        assert_eq!(encode_text(""), "");
        assert_eq!(encode_text("lala"), "lala");
        assert_eq!(encode_text("<>&'\""), "&lt;&gt;&amp;&apos;&quot;");
        assert_eq!(encode_text("a<b>c"), "a&lt;b&gt;c");
        assert_eq!(encode_text("\u{65e5}&\u{672c}"), "\u{65e5}&amp;\u{672c}");

        struct Wrapper<'a>(&'a str);
        impl std::fmt::Display for Wrapper<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                escape_fmt(self.0, f)
            }
        }
        assert_eq!(Wrapper("x'y\"z").to_string(), "x&apos;y&quot;z");
    }

    #[test]
    fn predefined_entities() {
        assert_eq!(decode("&lt;"), Ok(("<".to_string(), 4)));
        assert_eq!(decode("&gt;"), Ok((">".to_string(), 4)));
        assert_eq!(decode("&amp;"), Ok(("&".to_string(), 5)));
        assert_eq!(decode("&quot;lala"), Ok(("\"".to_string(), 6)));
    }

    #[test]
    fn char_references() {
        assert_eq!(decode("&#65;"), Ok(("A".to_string(), 5)));
        assert_eq!(decode("&#x41;"), Ok(("A".to_string(), 6)));
        assert_eq!(decode("&#x3042;"), Ok(("\u{3042}".to_string(), 8)));
        assert_eq!(decode("&#xe9;"), Ok(("\u{e9}".to_string(), 6)));
        assert_eq!(decode("&#xE9;"), Ok(("\u{e9}".to_string(), 6)));
        assert_eq!(decode("&#128512;"), Ok(("\u{1f600}".to_string(), 9)));

        // UTF-8 lengths follow the code point ranges
        assert_eq!(decode("&#x7f;").unwrap().0.len(), 1);
        assert_eq!(decode("&#x80;").unwrap().0.len(), 2);
        assert_eq!(decode("&#x7ff;").unwrap().0.len(), 2);
        assert_eq!(decode("&#x800;").unwrap().0.len(), 3);
        assert_eq!(decode("&#xffff;").unwrap().0.len(), 3);
        assert_eq!(decode("&#x10000;").unwrap().0.len(), 4);
    }

    #[test]
    fn decode_past_the_end() {
        let mut sink = String::new();
        let truncated = Err(ParseError::TruncatedInput(description::REFERENCE_MISSING_END));
        assert_eq!(decode_reference("", 0, &mut sink), truncated);
        assert_eq!(decode_reference("&", 0, &mut sink), truncated);
        assert_eq!(decode_reference("ab", 5, &mut sink), truncated);
        assert_eq!(sink, "");
    }

    #[test]
    fn decode_in_the_middle() {
        let mut sink = String::from("x");
        assert_eq!(decode_reference("ab&amp;cd", 2, &mut sink), Ok(7));
        assert_eq!(sink, "x&");
    }

    #[test]
    fn bad_references() {
        assert_eq!(
            decode("&#6a;"),
            Err(ParseError::InvalidCharacterReference(
                description::REFERENCE_INVALID_DECIMAL
            ))
        );
        assert_eq!(
            decode("&#xfg;"),
            Err(ParseError::InvalidCharacterReference(
                description::REFERENCE_INVALID_HEX
            ))
        );
        assert_eq!(
            decode("&#;"),
            Err(ParseError::InvalidCharacterReference(
                description::REFERENCE_EMPTY
            ))
        );
        assert_eq!(
            decode("&#x;"),
            Err(ParseError::InvalidCharacterReference(
                description::REFERENCE_EMPTY
            ))
        );
        assert_eq!(
            decode("&#xd800;"),
            Err(ParseError::InvalidCharacterReference(
                description::REFERENCE_OUT_OF_RANGE
            ))
        );
        assert_eq!(
            decode("&#x110000;"),
            Err(ParseError::InvalidCharacterReference(
                description::REFERENCE_OUT_OF_RANGE
            ))
        );
        assert_eq!(
            decode("&#99999999999;"),
            Err(ParseError::InvalidCharacterReference(
                description::REFERENCE_OUT_OF_RANGE
            ))
        );
        assert_eq!(
            decode("&#12"),
            Err(ParseError::TruncatedInput(description::REFERENCE_MISSING_END))
        );
        assert_eq!(
            decode("&lt"),
            Err(ParseError::TruncatedInput(description::REFERENCE_MISSING_END))
        );
        assert_eq!(
            decode("&nbsp;"),
            Err(ParseError::UnknownEntity(description::REFERENCE_UNKNOWN_ENTITY))
        );
    }

    #[test]
    fn apos_is_not_decoded() {
        assert_eq!(
            decode("&apos;"),
            Err(ParseError::UnknownEntity(description::REFERENCE_UNKNOWN_ENTITY))
        );
        // Output side still produces it
        assert_eq!(encode_text("'"), predefined::APOS);
    }
}
