//! Whole-tree snapshot tests.
//!
//! Each test renders the parsed tree as an indented outline, one node per
//! line with its source range, and compares it against an inline snapshot.
//! Run `cargo insta test --accept` to update the snapshots.

use cssast::{Node, Stylesheet, parse_stylesheet};
use insta::assert_snapshot;

fn label(node: &Node) -> String {
    match node {
        Node::Rule(rule) => rule.selectors.join(", "),
        Node::Declaration(decl) => format!("{}: {}", decl.property, decl.value),
        Node::Comment(comment) => format!("/*{}*/", comment.comment),
        Node::Keyframes(keyframes) => format!(
            "{}{}",
            keyframes.vendor.as_deref().unwrap_or_default(),
            keyframes.name
        ),
        Node::Keyframe(keyframe) => keyframe.values.join(", "),
        Node::Media(media) => media.media.clone(),
        Node::Supports(supports) => supports.supports.clone(),
        Node::Document(document) => document.document.clone(),
        Node::Page(page) => page.selectors.join(", "),
        Node::Host(_) | Node::FontFace(_) => String::new(),
        Node::Import(import) => import.import.clone(),
        Node::Charset(charset) => charset.charset.clone(),
        Node::Namespace(namespace) => namespace.namespace.clone(),
        Node::CustomMedia(custom) => format!("{} {}", custom.name, custom.media),
    }
}

fn outline(sheet: &Stylesheet) -> String {
    fn walk(nodes: &[Node], depth: usize, lines: &mut Vec<String>) {
        for node in nodes {
            let mut line = format!("{}{}", "  ".repeat(depth), node.kind());
            let label = label(node);
            if !label.is_empty() {
                line.push(' ');
                line.push_str(&label);
            }
            let position = node.position();
            line.push_str(&format!(" {}-{}", position.start, position.end));
            lines.push(line);
            walk(node.children(), depth + 1, lines);
        }
    }

    let mut lines = vec!["stylesheet".to_string()];
    walk(&sheet.rules, 1, &mut lines);
    lines.join("\n")
}

#[test]
fn test_outline_media() {
    let sheet = parse_stylesheet("@media (min-width: 1px){ .a{color:red} }").unwrap();
    assert_snapshot!(outline(&sheet), @r"
stylesheet
  media (min-width: 1px) 1:1-1:41
    rule .a 1:26-1:39
      declaration color: red 1:29-1:38
");
}

#[test]
fn test_outline_keyframes() {
    let sheet = parse_stylesheet("@keyframes spin{from{top:0px}to{top:200px}}").unwrap();
    assert_snapshot!(outline(&sheet), @r"
stylesheet
  keyframes spin 1:1-1:44
    keyframe from 1:17-1:30
      declaration top: 0px 1:22-1:29
    keyframe to 1:30-1:43
      declaration top: 200px 1:33-1:42
");
}

#[test]
fn test_outline_mixed_stylesheet() {
    let css = concat!(
        "/* theme */\n",
        "@import url(base.css);\n",
        ":root { --fg: #222 }\n",
        "@font-face {\n",
        "  font-family: Inter;\n",
        "}",
    );
    let sheet = parse_stylesheet(css).unwrap();
    assert_snapshot!(outline(&sheet), @r"
stylesheet
  comment /* theme */ 1:1-1:12
  import url(base.css) 2:1-2:23
  rule :root 3:1-3:21
    declaration --fg: #222 3:9-3:20
  font-face 4:1-6:2
    declaration font-family: Inter 5:3-5:21
");
}
