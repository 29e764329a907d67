/*
** This file is a part of xmlnode (in-memory XML document model)
** Copyright (C) 2000-2025 Gurer Ozen
**
** xmlnode is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;
use crate::PrintOptions;

fn parse(s: &str) -> Document {
    let mut doc = Document::new();
    assert_eq!(doc.parse(s), Ok(()));
    doc
}

fn compact(doc: &Document) -> String {
    doc.render(&PrintOptions::compact())
}

struct BadTester {
    bad_byte: usize,
}

impl BadTester {
    fn new(bad_byte: usize) -> BadTester {
        BadTester { bad_byte }
    }

    fn check(&self, s: &str, expected_error: ParseError) {
        let mut doc = Document::new();
        let mut parser = DocumentParser::new(s);
        assert_eq!(parser.parse_into(&mut doc), Err(expected_error));
        assert_eq!(parser.location().bytes, self.bad_byte);
    }
}

#[test]
fn scenarios() {
    let doc = parse("<a x=\"1\">hi</a>");
    let a = doc.first_element();
    assert_eq!(a.name(), "a");
    assert_eq!(a.attribute("x"), Some("1"));
    assert_eq!(a.value(), "hi");
    assert!(a.first_child().is_null());
    assert_eq!(compact(&doc), "<a x=\"1\">hi</a>");

    let doc = parse("<a/>");
    let a = doc.first_element();
    assert_eq!(a.value(), "");
    assert!(a.first_child().is_null());
    assert_eq!(compact(&doc), "<a/>");

    let doc = parse("<a>&#65;&amp;</a>");
    assert_eq!(doc.first_element().value(), "A&");
    assert_eq!(compact(&doc), "<a>A&amp;</a>");

    let mut doc = parse("<a><b/><c/></a>");
    let b = doc.find_element("a").first_child_named("b").node().unwrap();
    assert!(doc.delete_node(b));
    let a = doc.first_element();
    assert_eq!(a.children().count(), 1);
    assert_eq!(a.first_child().name(), "c");
    assert_eq!(compact(&doc), "<a><c/></a>");

    let mut doc = Document::new();
    assert_eq!(
        doc.parse("<a></b>"),
        Err(ParseError::EndTagMismatch(description::END_TAG_MISMATCH))
    );
}

#[test]
fn tags() {
    let doc = parse("   <lonely/>    ");
    assert_eq!(doc.first_element().name(), "lonely");

    let doc = parse("<a><b><c/></b><d></d></a>");
    let a = doc.first_element();
    let names: Vec<&str> = a.descendant_or_self().map(|c| c.name()).collect();
    assert_eq!(names, ["a", "b", "c", "d"]);
    assert_eq!(compact(&doc), "<a><b><c/></b><d/></a>");

    let doc = parse("<a \t></a\r\n >");
    assert_eq!(doc.first_element().name(), "a");

    let doc = parse("<a/><b/>");
    assert_eq!(doc.top().children().count(), 2);

    let doc = parse("<\u{65e5}\u{672c}>\u{8a9e}</\u{65e5}\u{672c}>");
    assert_eq!(doc.first_element().name(), "\u{65e5}\u{672c}");
    assert_eq!(doc.first_element().value(), "\u{8a9e}");
}

#[test]
fn content() {
    let doc = parse("<a>  \n\t </a>");
    assert_eq!(doc.first_element().value(), "");

    let doc = parse("<a> x </a>");
    assert_eq!(doc.first_element().value(), " x ");

    let doc = parse("<a>first<b/>second<c/>third</a>");
    let a = doc.first_element();
    assert_eq!(a.value(), "first");
    assert_eq!(a.children().count(), 2);
    assert_eq!(compact(&doc), "<a>first<b/><c/></a>");

    let doc = parse("junk <a/> more junk");
    assert_eq!(compact(&doc), "<a/>");
}

#[test]
fn cdatas() {
    let doc = parse("<a><![CDATA[<b>&amp;]]></a>");
    assert_eq!(doc.first_element().value(), "<b>&amp;");
    assert!(doc.first_element().first_child().is_null());

    let doc = parse("<a>x<![CDATA[y]]>&lt;z</a>");
    assert_eq!(doc.first_element().value(), "xy<z");

    let doc = parse("<a><![CDATA[ ]]></a>");
    assert_eq!(doc.first_element().value(), " ");

    let doc = parse("<a><![CDATA[]]]]></a>");
    assert_eq!(doc.first_element().value(), "]]");
}

#[test]
fn comments() {
    let doc = parse("<!-- hi --><a><!--inner--></a>");
    let first = doc.top().first_child();
    assert_eq!(first.kind(), Some(NodeKind::Comment));
    assert_eq!(first.value(), " hi ");
    let inner = doc.first_element().first_child();
    assert_eq!(inner.kind(), Some(NodeKind::Comment));
    assert_eq!(inner.value(), "inner");
    assert_eq!(compact(&doc), "<!-- hi --><a><!--inner--></a>");

    let doc = parse("<a><!-- <b>&lala; --></a>");
    assert_eq!(doc.first_element().first_child().value(), " <b>&lala; ");
}

#[test]
fn doctypes() {
    let doc = parse("<!DOCTYPE html><html/>");
    let doctype = doc.top().first_child();
    assert_eq!(doctype.kind(), Some(NodeKind::Doctype));
    assert_eq!(doctype.value(), "html");
    assert_eq!(compact(&doc), "<!DOCTYPE html><html/>");

    let doc = parse("<!DOCTYPE note [<!ENTITY x \"y\">]><note/>");
    let doctype = doc.top().first_child();
    assert_eq!(doctype.value(), "note [<!ENTITY x \"y\">]");
    assert_eq!(doctype.next().name(), "note");

    let doc = parse("<!DOCTYPE\nhtml PUBLIC \"-//W3C//DTD XHTML 1.0//EN\"><html/>");
    assert_eq!(
        doc.top().first_child().value(),
        "html PUBLIC \"-//W3C//DTD XHTML 1.0//EN\""
    );
}

#[test]
fn pi() {
    let doc = parse("<?xml version=\"1.0\"?><a><?app data?></a>");
    let pi = doc.top().first_child();
    assert_eq!(pi.kind(), Some(NodeKind::ProcessingInstruction));
    assert_eq!(pi.value(), "xml version=\"1.0\"");
    assert_eq!(pi.name(), "");
    assert_eq!(doc.first_element().first_child().value(), "app data");
    assert_eq!(compact(&doc), "<?xml version=\"1.0\"?><a><?app data?></a>");
}

#[test]
fn attributes() {
    let doc = parse("<a x='1\"2' y=\"3'4\"/>");
    let a = doc.first_element();
    assert_eq!(a.attribute("x"), Some("1\"2"));
    assert_eq!(a.attribute("y"), Some("3'4"));

    let doc = parse("<a x=\"1>2\"/>");
    assert_eq!(doc.first_element().attribute("x"), Some("1>2"));

    let doc = parse("<a x=\"&lt;&#x41;&quot;\"/>");
    assert_eq!(doc.first_element().attribute("x"), Some("<A\""));

    let doc = parse("<a x=\"1\" x=\"2\"/>");
    let attrs: Vec<(&str, &str)> = doc.first_element().attributes().collect();
    assert_eq!(attrs, [("x", "2")]);

    let doc = parse("<a\r\n  b = \"2\"\ta=\"1\"\n></a>");
    let attrs: Vec<(&str, &str)> = doc.first_element().attributes().collect();
    assert_eq!(attrs, [("a", "1"), ("b", "2")]);

    let doc = parse("<a x=\"\"/>");
    assert_eq!(doc.first_element().attribute("x"), Some(""));
}

#[test]
fn reparse_clears() {
    let mut doc = parse("<a><b/></a>");
    assert_eq!(doc.parse("<c/>"), Ok(()));
    assert_eq!(compact(&doc), "<c/>");
    assert_eq!(doc.arena_stats().nodes.nr_live, 2);

    assert!(doc.parse("<d></e>").is_err());
    assert_eq!(compact(&doc), "<d/>");
}

#[test]
fn partial_tree() {
    let mut doc = Document::new();
    let result = doc.parse("<a><b x=\"1\">text</b><c><!-- c --></a>");
    assert_eq!(
        result,
        Err(ParseError::EndTagMismatch(description::END_TAG_MISMATCH))
    );
    assert_eq!(
        compact(&doc),
        "<a><b x=\"1\">text</b><c><!-- c --></c></a>"
    );
}

#[test]
fn from_str() {
    let doc: Document = "<a>b</a>".parse().unwrap();
    assert_eq!(doc.first_element().value(), "b");

    let result = "<a>".parse::<Document>();
    assert_eq!(
        result.err(),
        Some(ParseError::UnterminatedConstruct(
            description::ELEMENT_MISSING_END_TAG
        ))
    );
}

#[test]
fn location() {
    let mut doc = Document::new();
    let mut parser = DocumentParser::new("<a>\n  <b>\n</a>");
    assert!(parser.parse_into(&mut doc).is_err());
    assert_eq!(
        parser.location(),
        Location {
            bytes: 14,
            lines: 2,
            column: 4
        }
    );
    assert_eq!(
        parser.location().to_string(),
        "byte: 14, line: 2, column: 4"
    );

    let mut parser = DocumentParser::new("<a/>");
    assert_eq!(parser.location(), Location::new());
    assert!(parser.parse_into(&mut doc).is_ok());
    assert_eq!(parser.location().bytes, 4);
}

#[test]
fn bad_tags() {
    use ParseError::*;

    BadTester::new(4).check("<a>< b/></a>", MalformedName(description::TAG_EMPTY_NAME));
    BadTester::new(5).check("<a><b/ ></a>", MalformedName(description::NAME_BAD_SLASH));
    BadTester::new(7).check("<a></b>", EndTagMismatch(description::END_TAG_MISMATCH));
    BadTester::new(10).check(
        "<a><b></a></b>",
        EndTagMismatch(description::END_TAG_MISMATCH),
    );
    BadTester::new(9).check(
        "<a> </a  b>",
        ForbiddenCharacter(description::END_TAG_ATTRIBUTES),
    );
    BadTester::new(8).check("<a></a/>", MalformedName(description::END_TAG_BAD_CLOSE));
    BadTester::new(7).check("<a></a ", UnterminatedConstruct(description::END_TAG_MISSING_END));
    BadTester::new(3).check("<a=b/>", MalformedName(description::TAG_NAME_EQUAL));
    BadTester::new(4).check("<a?>", MalformedName(description::TAG_PI_END));
    BadTester::new(2).check("<a;b/>", ForbiddenCharacter(description::NAME_BAD_CHAR));
    BadTester::new(2).check("<a:b/>", ForbiddenCharacter(description::NAME_BAD_CHAR));
    BadTester::new(1).check("<", TruncatedInput(description::TAG_TRUNCATED));
    BadTester::new(4).check("<abc", TruncatedInput(description::NAME_MISSING_END));
    BadTester::new(1).check("<!ELEMENT x>", ForbiddenCharacter(description::MARKUP_UNRECOGNIZED));
}

#[test]
fn stray_end_tags() {
    let doc = parse("</x><a/>");
    assert_eq!(compact(&doc), "<a/>");

    let doc = parse("<a>hi</a></b><!-- c --></a>");
    assert_eq!(compact(&doc), "<a>hi</a><!-- c -->");

    let doc = parse("</x>");
    assert!(doc.top().first_child().is_null());
}

#[test]
fn elements_need_a_container() {
    let mut doc = Document::new();
    let root = doc.root();
    let comment = doc.append_child(root, NodeKind::Comment, "", "c").unwrap();

    let mut parser = DocumentParser::new("a/>");
    assert_eq!(
        parser.parse_element(&mut doc, comment),
        Err(ParseError::ForbiddenCharacter(description::ELEMENT_BAD_PARENT))
    );
    assert!(doc.children(comment).is_empty());
    assert_eq!(doc.children(root), &[comment]);
}

#[test]
fn bad_attributes() {
    use ParseError::*;

    BadTester::new(11).check(
        "<a a='1' b></a>",
        MalformedName(description::ATTRIBUTE_WITHOUT_VALUE),
    );
    BadTester::new(12).check(
        "<a a='12' b '2'></a>",
        ForbiddenCharacter(description::ATTRIBUTE_WITHOUT_EQUAL),
    );
    BadTester::new(5).check("<a x=1/>", ForbiddenCharacter(description::ATTRIBUTE_WITHOUT_QUOTE));
    BadTester::new(17).check(
        "<a a='1' b='></a>",
        UnterminatedConstruct(description::ATTRIBUTE_VALUE_MISSING_END),
    );
    BadTester::new(3).check("<a ", UnterminatedConstruct(description::TAG_MISSING_END));
    BadTester::new(6).check(
        "<a x=\"&bad;\"/>",
        UnknownEntity(description::REFERENCE_UNKNOWN_ENTITY),
    );
}

#[test]
fn bad_unfinished() {
    use ParseError::*;

    BadTester::new(3).check("<a>", UnterminatedConstruct(description::ELEMENT_MISSING_END_TAG));
    BadTester::new(11).check(
        "<a><b/>text",
        UnterminatedConstruct(description::ELEMENT_MISSING_END_TAG),
    );
    BadTester::new(4).check("<!-- open", UnterminatedConstruct(description::COMMENT_MISSING_END));
    BadTester::new(2).check("<?xml ", UnterminatedConstruct(description::PI_MISSING_END));
    BadTester::new(12).check(
        "<a><![CDATA[x</a>",
        UnterminatedConstruct(description::CDATA_SECTION_MISSING_END),
    );
}

#[test]
fn bad_doctypes() {
    use ParseError::*;

    BadTester::new(14).check(
        "<!DOCTYPE html",
        UnterminatedConstruct(description::DOCTYPE_MISSING_END),
    );
    BadTester::new(13).check(
        "<!DOCTYPE a [x",
        UnterminatedConstruct(description::DOCTYPE_SUBSET_MISSING_END),
    );
    BadTester::new(11).check("<!DOCTYPE a&b>", ForbiddenCharacter(description::DOCTYPE_BAD_CHAR));
    BadTester::new(11).check("<!DOCTYPE a]>", ForbiddenCharacter(description::DOCTYPE_BAD_CHAR));
    BadTester::new(1).check("<!DOCTYPEhtml>", ForbiddenCharacter(description::MARKUP_UNRECOGNIZED));
}

#[test]
fn bad_cdatas() {
    use ParseError::*;

    // Character data sections are only recognized before the first child
    BadTester::new(8).check(
        "<a><b/><![CDATA[x]]></a>",
        ForbiddenCharacter(description::MARKUP_UNRECOGNIZED),
    );
    BadTester::new(1).check(
        "<![CDATA[lala]]> <a/>",
        ForbiddenCharacter(description::MARKUP_UNRECOGNIZED),
    );
}

#[test]
fn bad_references() {
    use ParseError::*;

    BadTester::new(3).check("<a>&apos;</a>", UnknownEntity(description::REFERENCE_UNKNOWN_ENTITY));
    BadTester::new(3).check(
        "<a>&#xZZ;</a>",
        InvalidCharacterReference(description::REFERENCE_INVALID_HEX),
    );
    BadTester::new(3).check(
        "<a>&#1a;</a>",
        InvalidCharacterReference(description::REFERENCE_INVALID_DECIMAL),
    );
    BadTester::new(3).check("<a>&lt</a>", TruncatedInput(description::REFERENCE_MISSING_END));
}
