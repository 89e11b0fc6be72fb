//! Integration tests for at-rules.
//!
//! Covers:
//! - Block at-rules: @media, @supports, @host, @document
//! - Declaration at-rules: @page, @font-face
//! - @keyframes with and without vendor prefix
//! - Statement at-rules: @import, @charset, @namespace, @custom-media

use cssast::{Node, NodeKind, SyntaxError, parse_stylesheet};

fn first(css: &str) -> Node {
    let sheet = parse_stylesheet(css).unwrap();
    assert_eq!(sheet.rules.len(), 1, "expected one top-level node in {css:?}");
    sheet.rules.into_iter().next().unwrap()
}

// ============================================================================
// BLOCK AT-RULES
// ============================================================================

#[test]
fn test_media_query_and_nested_rule() {
    let Node::Media(media) = first("@media (min-width: 1px) { .a { color: red } }") else {
        panic!("expected @media");
    };
    assert_eq!(media.media, "(min-width: 1px)");
    assert_eq!(media.rules.len(), 1);

    let rule = media.rules[0].as_rule().unwrap();
    assert_eq!(rule.selectors, vec![".a"]);
    let decl = rule.declarations().next().unwrap();
    assert_eq!((decl.property.as_str(), decl.value.as_str()), ("color", "red"));
}

#[test]
fn test_media_with_several_rules() {
    let Node::Media(media) =
        first("@media screen and (max-width: 600px) {\n  a { x: 1 }\n  b { y: 2 }\n}")
    else {
        panic!("expected @media");
    };
    assert_eq!(media.media, "screen and (max-width: 600px)");
    let selectors: Vec<_> = media
        .rules
        .iter()
        .map(|node| node.as_rule().unwrap().selectors.join(","))
        .collect();
    assert_eq!(selectors, vec!["a", "b"]);
}

#[test]
fn test_empty_media_block() {
    let Node::Media(media) = first("@media print {}") else {
        panic!("expected @media");
    };
    assert_eq!(media.media, "print");
    assert!(media.rules.is_empty());
}

#[test]
fn test_nested_media() {
    let Node::Media(outer) = first("@media print { @media (color) { a { b: c } } }") else {
        panic!("expected @media");
    };
    let Node::Media(inner) = &outer.rules[0] else {
        panic!("expected nested @media");
    };
    assert_eq!(inner.media, "(color)");
    assert_eq!(inner.rules[0].kind(), NodeKind::Rule);
}

#[test]
fn test_supports() {
    let Node::Supports(supports) = first("@supports (display: grid) { .g { display: grid } }")
    else {
        panic!("expected @supports");
    };
    assert_eq!(supports.supports, "(display: grid)");
    assert_eq!(supports.rules.len(), 1);
}

#[test]
fn test_host() {
    let Node::Host(host) = first("@host { :scope { display: block } }") else {
        panic!("expected @host");
    };
    assert_eq!(host.rules[0].as_rule().unwrap().selectors, vec![":scope"]);
}

#[test]
fn test_document_with_vendor_prefix() {
    let Node::Document(document) = first("@-moz-document url-prefix() { .x { color: red } }")
    else {
        panic!("expected @document");
    };
    assert_eq!(document.document, "url-prefix()");
    assert_eq!(document.vendor.as_deref(), Some("-moz-"));
    assert_eq!(document.rules.len(), 1);
}

#[test]
fn test_document_without_vendor_prefix() {
    let Node::Document(document) = first("@document url(http://a.com/) { }") else {
        panic!("expected @document");
    };
    assert_eq!(document.document, "url(http://a.com/)");
    assert_eq!(document.vendor, None);
}

// ============================================================================
// DECLARATION AT-RULES
// ============================================================================

#[test]
fn test_page_with_selector() {
    let Node::Page(page) = first("@page :first { margin: 1in; }") else {
        panic!("expected @page");
    };
    assert_eq!(page.selectors, vec![":first"]);
    assert_eq!(page.declarations.len(), 1);
    assert_eq!(page.declarations[0].as_declaration().unwrap().value, "1in");
}

#[test]
fn test_page_without_selector() {
    let Node::Page(page) = first("@page { size: A4 }") else {
        panic!("expected @page");
    };
    assert!(page.selectors.is_empty());
    assert_eq!(page.declarations[0].as_declaration().unwrap().property, "size");
}

#[test]
fn test_font_face() {
    let Node::FontFace(font_face) =
        first(r#"@font-face { font-family: "Foo"; src: url(foo.woff2) format("woff2"); }"#)
    else {
        panic!("expected @font-face");
    };
    let values: Vec<_> = font_face
        .declarations
        .iter()
        .filter_map(Node::as_declaration)
        .map(|decl| decl.value.as_str())
        .collect();
    assert_eq!(values, vec![r#""Foo""#, r#"url(foo.woff2) format("woff2")"#]);
}

// ============================================================================
// KEYFRAMES
// ============================================================================

#[test]
fn test_keyframes_from_to() {
    let Node::Keyframes(keyframes) =
        first("@keyframes spin { from { opacity: 0 } to { opacity: 1 } }")
    else {
        panic!("expected @keyframes");
    };
    assert_eq!(keyframes.name, "spin");
    assert_eq!(keyframes.vendor, None);
    assert_eq!(keyframes.keyframes.len(), 2);

    let Node::Keyframe(from) = &keyframes.keyframes[0] else {
        panic!("expected keyframe");
    };
    assert_eq!(from.values, vec!["from"]);
    let decl = from.declarations[0].as_declaration().unwrap();
    assert_eq!((decl.property.as_str(), decl.value.as_str()), ("opacity", "0"));

    let Node::Keyframe(to) = &keyframes.keyframes[1] else {
        panic!("expected keyframe");
    };
    assert_eq!(to.values, vec!["to"]);
}

#[test]
fn test_keyframes_vendor_prefix_and_percentages() {
    let Node::Keyframes(keyframes) =
        first("@-webkit-keyframes pulse { 0%, 50% { a: b } 12.5% { } 100% {} }")
    else {
        panic!("expected @keyframes");
    };
    assert_eq!(keyframes.name, "pulse");
    assert_eq!(keyframes.vendor.as_deref(), Some("-webkit-"));

    let values: Vec<Vec<String>> = keyframes
        .keyframes
        .iter()
        .map(|node| match node {
            Node::Keyframe(keyframe) => keyframe.values.clone(),
            other => panic!("unexpected {}", other.kind()),
        })
        .collect();
    assert_eq!(
        values,
        vec![
            vec!["0%".to_string(), "50%".to_string()],
            vec!["12.5%".to_string()],
            vec!["100%".to_string()],
        ]
    );
}

#[test]
fn test_keyframes_keep_comments() {
    let Node::Keyframes(keyframes) = first("@keyframes k { /* start */ from {} }") else {
        panic!("expected @keyframes");
    };
    let kinds: Vec<_> = keyframes.keyframes.iter().map(Node::kind).collect();
    assert_eq!(kinds, vec![NodeKind::Comment, NodeKind::Keyframe]);
}

#[test]
fn test_keyframes_missing_name() {
    let err = parse_stylesheet("@keyframes { from {} }").unwrap_err();
    assert_eq!(err.kind, SyntaxError::MissingKeyframesName);
    assert_eq!(err.reason(), "@keyframes missing name");
}

// ============================================================================
// STATEMENT AT-RULES
// ============================================================================

#[test]
fn test_import() {
    let Node::Import(import) = first(r#"@import url("fineprint.css") print;"#) else {
        panic!("expected @import");
    };
    assert_eq!(import.import, r#"url("fineprint.css") print"#);
}

#[test]
fn test_charset() {
    let Node::Charset(charset) = first(r#"@charset "utf-8";"#) else {
        panic!("expected @charset");
    };
    assert_eq!(charset.charset, r#""utf-8""#);
}

#[test]
fn test_namespace() {
    let Node::Namespace(namespace) = first("@namespace svg url(http://www.w3.org/2000/svg);")
    else {
        panic!("expected @namespace");
    };
    assert_eq!(namespace.namespace, "svg url(http://www.w3.org/2000/svg)");
}

#[test]
fn test_custom_media() {
    let Node::CustomMedia(custom) = first("@custom-media --small-viewport (max-width: 30em);")
    else {
        panic!("expected @custom-media");
    };
    assert_eq!(custom.name, "--small-viewport");
    assert_eq!(custom.media, "(max-width: 30em)");
}

#[test]
fn test_statements_followed_by_rules() {
    let sheet =
        parse_stylesheet("@charset \"utf-8\";\n@import 'a.css';\nbody { margin: 0 }").unwrap();
    let kinds: Vec<_> = sheet.rules.iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![NodeKind::Charset, NodeKind::Import, NodeKind::Rule]
    );
}

#[test]
fn test_unknown_at_rule_parses_as_rule() {
    let Node::Rule(rule) = first("@unknown foo { a: b }") else {
        panic!("expected a plain rule");
    };
    assert_eq!(rule.selectors, vec!["@unknown foo"]);
}
