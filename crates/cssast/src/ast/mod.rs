//! The CSS syntax tree.
//!
//! A parse produces one [`Stylesheet`] that owns every [`Node`]. Each node
//! records the [`Position`] it was parsed from. Links from a node back to its
//! enclosing node live in a side table ([`ParentLinks`]) keyed by [`NodeId`],
//! so ownership only ever flows from parent to child.
//!
//! ## Node kinds
//!
//! - Plain rules: [`Rule`] holding [`Declaration`] and [`Comment`] nodes
//! - Block at-rules: [`Media`], [`Supports`], [`Host`], [`Document`]
//! - Declaration at-rules: [`Page`], [`FontFace`]
//! - Animation: [`Keyframes`] holding [`Keyframe`] entries
//! - Statements: [`Import`], [`Charset`], [`Namespace`], [`CustomMedia`]

mod parents;
mod position;

use std::fmt;
use std::sync::Arc;

pub use parents::{NodeId, NodeRef, ParentLinks, annotate};
pub use position::{Location, Position};

use crate::error::ParseError;

/// The root of a parsed stylesheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stylesheet {
    pub source: Option<Arc<str>>,
    /// Top-level rules, at-rules and comments in source order.
    pub rules: Vec<Node>,
    /// Errors recorded in tolerant mode. Always empty after a strict parse.
    pub parsing_errors: Vec<ParseError>,
    parents: ParentLinks,
}

impl Stylesheet {
    /// Builds a stylesheet and links every node to its parent.
    pub fn new(source: Option<Arc<str>>, rules: Vec<Node>, parsing_errors: Vec<ParseError>) -> Self {
        let mut sheet = Self {
            source,
            rules,
            parsing_errors,
            parents: ParentLinks::default(),
        };
        sheet.annotate();
        sheet
    }

    /// Rebuilds the parent links, e.g. after editing `rules` by hand.
    pub fn annotate(&mut self) {
        self.parents = annotate(self);
    }

    pub fn parent_links(&self) -> &ParentLinks {
        &self.parents
    }

    /// Looks up a node by the id the annotation pass assigned to it.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        if id == NodeId::ROOT {
            return Some(NodeRef::Stylesheet(self));
        }
        let path = self.parents.path(id)?;
        let (first, rest) = path.split_first()?;
        let mut node = self.rules.get(*first as usize)?;
        for index in rest {
            node = node.children().get(*index as usize)?;
        }
        Some(NodeRef::Node(node))
    }

    /// The nearest enclosing node of `id`; `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.parents.parent(id).and_then(|parent| self.get(parent))
    }

    /// Every node below the root in pre-order, paired with its id.
    pub fn nodes(&self) -> Vec<(NodeId, &Node)> {
        fn collect<'a>(nodes: &'a [Node], next: &mut u32, out: &mut Vec<(NodeId, &'a Node)>) {
            for node in nodes {
                out.push((NodeId(*next), node));
                *next += 1;
                collect(node.children(), next, out);
            }
        }

        let mut out = Vec::with_capacity(self.parents.len().saturating_sub(1));
        let mut next = 1;
        collect(&self.rules, &mut next, &mut out);
        out
    }
}

/// The tag of a node, spelled the way CSS tooling conventionally names it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Stylesheet,
    Rule,
    Declaration,
    Comment,
    Keyframes,
    Keyframe,
    Media,
    Supports,
    Host,
    Document,
    Page,
    FontFace,
    Import,
    Charset,
    Namespace,
    CustomMedia,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Stylesheet => "stylesheet",
            NodeKind::Rule => "rule",
            NodeKind::Declaration => "declaration",
            NodeKind::Comment => "comment",
            NodeKind::Keyframes => "keyframes",
            NodeKind::Keyframe => "keyframe",
            NodeKind::Media => "media",
            NodeKind::Supports => "supports",
            NodeKind::Host => "host",
            NodeKind::Document => "document",
            NodeKind::Page => "page",
            NodeKind::FontFace => "font-face",
            NodeKind::Import => "import",
            NodeKind::Charset => "charset",
            NodeKind::Namespace => "namespace",
            NodeKind::CustomMedia => "custom-media",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any node below the stylesheet root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Rule(Rule),
    Declaration(Declaration),
    Comment(Comment),
    Keyframes(Keyframes),
    Keyframe(Keyframe),
    Media(Media),
    Supports(Supports),
    Host(Host),
    Document(Document),
    Page(Page),
    FontFace(FontFace),
    Import(Import),
    Charset(Charset),
    Namespace(Namespace),
    CustomMedia(CustomMedia),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Rule(_) => NodeKind::Rule,
            Node::Declaration(_) => NodeKind::Declaration,
            Node::Comment(_) => NodeKind::Comment,
            Node::Keyframes(_) => NodeKind::Keyframes,
            Node::Keyframe(_) => NodeKind::Keyframe,
            Node::Media(_) => NodeKind::Media,
            Node::Supports(_) => NodeKind::Supports,
            Node::Host(_) => NodeKind::Host,
            Node::Document(_) => NodeKind::Document,
            Node::Page(_) => NodeKind::Page,
            Node::FontFace(_) => NodeKind::FontFace,
            Node::Import(_) => NodeKind::Import,
            Node::Charset(_) => NodeKind::Charset,
            Node::Namespace(_) => NodeKind::Namespace,
            Node::CustomMedia(_) => NodeKind::CustomMedia,
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Node::Rule(n) => &n.position,
            Node::Declaration(n) => &n.position,
            Node::Comment(n) => &n.position,
            Node::Keyframes(n) => &n.position,
            Node::Keyframe(n) => &n.position,
            Node::Media(n) => &n.position,
            Node::Supports(n) => &n.position,
            Node::Host(n) => &n.position,
            Node::Document(n) => &n.position,
            Node::Page(n) => &n.position,
            Node::FontFace(n) => &n.position,
            Node::Import(n) => &n.position,
            Node::Charset(n) => &n.position,
            Node::Namespace(n) => &n.position,
            Node::CustomMedia(n) => &n.position,
        }
    }

    /// The nodes this node owns, in source order.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Rule(n) => &n.declarations,
            Node::Keyframe(n) => &n.declarations,
            Node::Page(n) => &n.declarations,
            Node::FontFace(n) => &n.declarations,
            Node::Keyframes(n) => &n.keyframes,
            Node::Media(n) => &n.rules,
            Node::Supports(n) => &n.rules,
            Node::Host(n) => &n.rules,
            Node::Document(n) => &n.rules,
            Node::Declaration(_)
            | Node::Comment(_)
            | Node::Import(_)
            | Node::Charset(_)
            | Node::Namespace(_)
            | Node::CustomMedia(_) => &[],
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match self {
            Node::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match self {
            Node::Comment(comment) => Some(comment),
            _ => None,
        }
    }
}

/// A selector list followed by a declaration block, e.g. `a, b { color: red }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    /// Never empty.
    pub selectors: Vec<String>,
    /// [`Declaration`] and [`Comment`] nodes.
    pub declarations: Vec<Node>,
    pub position: Position,
}

impl Rule {
    /// The declarations of this rule, skipping comments.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter().filter_map(Node::as_declaration)
    }
}

/// A `property: value` pair. `value` is empty when nothing follows the colon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub position: Position,
}

/// The text between `/*` and `*/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub comment: String,
    pub position: Position,
}

/// `@keyframes name { ... }`, optionally vendor prefixed (`@-webkit-keyframes`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keyframes {
    pub name: String,
    pub vendor: Option<String>,
    /// [`Keyframe`] and [`Comment`] nodes.
    pub keyframes: Vec<Node>,
    pub position: Position,
}

/// One `from`/`to`/percentage entry of a `@keyframes` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keyframe {
    /// Never empty.
    pub values: Vec<String>,
    pub declarations: Vec<Node>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Media {
    pub media: String,
    pub rules: Vec<Node>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Supports {
    pub supports: String,
    pub rules: Vec<Node>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Host {
    pub rules: Vec<Node>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub document: String,
    pub vendor: Option<String>,
    pub rules: Vec<Node>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Page selectors such as `:first`; empty when none were given.
    pub selectors: Vec<String>,
    pub declarations: Vec<Node>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontFace {
    pub declarations: Vec<Node>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    pub import: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Charset {
    pub charset: String,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Namespace {
    pub namespace: String,
    pub position: Position,
}

/// `@custom-media --name <media query>;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomMedia {
    pub name: String,
    pub media: String,
    pub position: Position,
}
