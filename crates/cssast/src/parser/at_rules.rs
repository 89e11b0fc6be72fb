//! At-rules.
//!
//! [`Parser::at_rule`] tries one recognizer per at-rule family in a fixed
//! order. The first recognizer whose opening pattern matches owns the input
//! from then on: if the rest of that at-rule is malformed, the at-rule fails
//! rather than falling through to the next recognizer. In tolerant mode the
//! rules loop then tries a plain rule from where the at-rule stopped.
//!
//! | Family        | At-rules                                  |
//! |---------------|-------------------------------------------|
//! | Block         | `@media`, `@supports`, `@host`, `@document` |
//! | Declarations  | `@page`, `@font-face`                     |
//! | Statement     | `@import`, `@charset`, `@namespace`, `@custom-media` |
//! | Animation     | `@keyframes`                              |

use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_till1, take_while, take_while1};
use nom::character::complete::{char, digit1};
use nom::combinator::{opt, recognize};
use nom::error::{Error, ErrorKind};
use nom::sequence::{pair, preceded, terminated, tuple};

use crate::ast::{
    Charset, CustomMedia, Document, FontFace, Host, Import, Keyframe, Keyframes, Media, Namespace,
    Node, Page, Supports,
};
use crate::error::{Construct, SyntaxError};
use crate::parser::cursor::whitespace;
use crate::parser::{Halt, Parser, Step, settle};

type Recognizer<'a> = fn(&mut Parser<'a>) -> Step<Node>;

impl<'a> Parser<'a> {
    /// Parses the at-rule at the cursor, if there is one.
    ///
    /// The recognizer order matters: `@keyframes` and `@document` accept a
    /// vendor prefix, so they must get a chance before anything else can
    /// claim the input.
    pub(crate) fn at_rule(&mut self) -> Step<Node> {
        if !self.cursor.starts_with("@") {
            return Ok(None);
        }

        let recognizers: [(&str, Recognizer<'a>); 11] = [
            ("keyframes", Self::at_keyframes),
            ("media", Self::at_media),
            ("custom-media", Self::at_custom_media),
            ("supports", Self::at_supports),
            ("import", Self::at_import),
            ("charset", Self::at_charset),
            ("namespace", Self::at_namespace),
            ("document", Self::at_document),
            ("page", Self::at_page),
            ("host", Self::at_host),
            ("font-face", Self::at_font_face),
        ];

        for (name, recognizer) in recognizers {
            if let Some(node) = recognizer(self)? {
                log::trace!("@{name} at {}", node.position().start);
                return Ok(Some(node));
            }
        }

        Ok(None)
    }

    fn at_keyframes(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();
        let Some(vendor) = self
            .cursor
            .matches(terminated(vendor_keyword("keyframes"), whitespace))
        else {
            return Ok(None);
        };

        let Some(name) = self.cursor.matches(terminated(ident, whitespace)) else {
            return self.fail(SyntaxError::MissingKeyframesName);
        };

        let construct = Construct::AtRule("keyframes");
        if !self.open_brace() {
            return self.fail(SyntaxError::MissingOpenBrace(construct));
        }

        let mut keyframes = Vec::new();
        settle(self.collect_keyframes(&mut keyframes))?;

        if !self.close_brace() {
            return self.fail(SyntaxError::MissingCloseBrace(construct));
        }

        Ok(Some(Node::Keyframes(Keyframes {
            name: name.to_string(),
            vendor: vendor.map(str::to_string),
            keyframes,
            position: self.span(mark),
        })))
    }

    fn collect_keyframes(&mut self, out: &mut Vec<Node>) -> Result<(), Halt> {
        self.comments(out)?;
        while let Some(keyframe) = self.keyframe()? {
            out.push(keyframe);
            self.comments(out)?;
        }
        Ok(())
    }

    /// One `from, 50% { ... }` entry.
    fn keyframe(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();

        let mut values = Vec::new();
        while let Some(value) = self.cursor.matches(keyframe_selector) {
            values.push(value.to_string());
            self.cursor.matches(comma);
        }
        if values.is_empty() {
            return Ok(None);
        }

        let declarations = self.declarations()?;
        Ok(Some(Node::Keyframe(Keyframe {
            values,
            declarations,
            position: self.span(mark),
        })))
    }

    fn at_media(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();
        let Some(media) = self.cursor.matches(prelude("@media")) else {
            return Ok(None);
        };
        let rules = self.block_body("media")?;

        Ok(Some(Node::Media(Media {
            media: media.trim().to_string(),
            rules,
            position: self.span(mark),
        })))
    }

    fn at_custom_media(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();
        let Some((name, media)) = self.cursor.matches(custom_media) else {
            return Ok(None);
        };

        Ok(Some(Node::CustomMedia(CustomMedia {
            name: name.trim().to_string(),
            media: media.trim().to_string(),
            position: self.span(mark),
        })))
    }

    fn at_supports(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();
        let Some(supports) = self.cursor.matches(prelude("@supports")) else {
            return Ok(None);
        };
        let rules = self.block_body("supports")?;

        Ok(Some(Node::Supports(Supports {
            supports: supports.trim().to_string(),
            rules,
            position: self.span(mark),
        })))
    }

    fn at_import(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();
        let Some(import) = self.cursor.matches(statement("@import")) else {
            return Ok(None);
        };
        Ok(Some(Node::Import(Import {
            import: import.trim().to_string(),
            position: self.span(mark),
        })))
    }

    fn at_charset(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();
        let Some(charset) = self.cursor.matches(statement("@charset")) else {
            return Ok(None);
        };
        Ok(Some(Node::Charset(Charset {
            charset: charset.trim().to_string(),
            position: self.span(mark),
        })))
    }

    fn at_namespace(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();
        let Some(namespace) = self.cursor.matches(statement("@namespace")) else {
            return Ok(None);
        };
        Ok(Some(Node::Namespace(Namespace {
            namespace: namespace.trim().to_string(),
            position: self.span(mark),
        })))
    }

    fn at_document(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();
        let Some((vendor, document)) = self
            .cursor
            .matches(pair(vendor_keyword("document"), is_not("{")))
        else {
            return Ok(None);
        };
        let rules = self.block_body("document")?;

        Ok(Some(Node::Document(Document {
            document: document.trim().to_string(),
            vendor: vendor.map(|vendor| vendor.trim().to_string()),
            rules,
            position: self.span(mark),
        })))
    }

    fn at_page(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();
        if self
            .cursor
            .matches(terminated(tag("@page"), take_while(|c: char| c == ' ')))
            .is_none()
        {
            return Ok(None);
        }

        let selectors = self.selector().unwrap_or_default();
        let declarations = self.declaration_body("page")?;

        Ok(Some(Node::Page(Page {
            selectors,
            declarations,
            position: self.span(mark),
        })))
    }

    fn at_host(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();
        if self
            .cursor
            .matches(terminated(tag("@host"), whitespace))
            .is_none()
        {
            return Ok(None);
        }
        let rules = self.block_body("host")?;

        Ok(Some(Node::Host(Host {
            rules,
            position: self.span(mark),
        })))
    }

    fn at_font_face(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();
        if self
            .cursor
            .matches(terminated(tag("@font-face"), whitespace))
            .is_none()
        {
            return Ok(None);
        }
        let declarations = self.declaration_body("font-face")?;

        Ok(Some(Node::FontFace(FontFace {
            declarations,
            position: self.span(mark),
        })))
    }

    /// `{ rules }` of a block at-rule.
    fn block_body(&mut self, name: &'static str) -> Result<Vec<Node>, Halt> {
        let construct = Construct::AtRule(name);
        if !self.open_brace() {
            return self.fail(SyntaxError::MissingOpenBrace(construct));
        }

        let rules = self.rules()?;

        if !self.close_brace() {
            return self.fail(SyntaxError::MissingCloseBrace(construct));
        }
        Ok(rules)
    }

    /// `{ declarations }` of `@page` and `@font-face`.
    fn declaration_body(&mut self, name: &'static str) -> Result<Vec<Node>, Halt> {
        let construct = Construct::AtRule(name);
        if !self.open_brace() {
            return self.fail(SyntaxError::MissingOpenBrace(construct));
        }

        let declarations = self.declaration_list()?;

        if !self.close_brace() {
            return self.fail(SyntaxError::MissingCloseBrace(construct));
        }
        Ok(declarations)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(is_ident_char)(input)
}

/// `@` followed by `keyword`, optionally vendor prefixed (`@-moz-document`).
///
/// The prefix is whatever identifier text precedes the last occurrence of
/// `keyword` in the at-keyword, so `@-webkit-keyframes` yields
/// `Some("-webkit-")` and `@keyframes` yields `None`.
fn vendor_keyword<'a>(
    keyword: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, Option<&'a str>> {
    move |input: &'a str| {
        let (_, word) = at_keyword(input)?;
        let Some(start) = word.rfind(keyword) else {
            return Err(nom::Err::Error(Error::new(input, ErrorKind::Tag)));
        };
        let vendor = &word[..start];
        let rest = &input[1 + start + keyword.len()..];
        Ok((rest, (!vendor.is_empty()).then_some(vendor)))
    }
}

/// `@` and the identifier after it, e.g. `@-webkit-keyframes`.
fn at_keyword(input: &str) -> IResult<&str, &str> {
    preceded(char('@'), take_while(is_ident_char))(input)
}

/// `keyword` and everything up to the next `{`.
fn prelude<'a>(keyword: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(tag(keyword), is_not("{"))
}

/// `keyword payload;` with a non-empty payload.
fn statement<'a>(keyword: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(tag(keyword), terminated(is_not(";"), char(';')))
}

/// `@custom-media --name query;`
///
/// The name runs to the next whitespace but gives characters back when
/// that is the only way for the query that follows to end in `;` before any
/// `{`.
fn custom_media(input: &str) -> IResult<&str, (&str, &str)> {
    let (after_keyword, _) = custom_media_keyword(input)?;
    let (_, name_run) = custom_property_name(after_keyword)?;

    let name_ends = std::iter::once(name_run.len())
        .chain(name_run.char_indices().rev().map(|(index, _)| index))
        .filter(|&end| end > 2);

    for end in name_ends {
        let tail = &after_keyword[end..];
        if let Some(stop) = tail.find(['{', ';']) {
            if stop > 0 && tail[stop..].starts_with(';') {
                return Ok((&tail[stop + 1..], (&name_run[..end], &tail[..stop])));
            }
        }
    }

    Err(nom::Err::Error(Error::new(input, ErrorKind::Verify)))
}

fn custom_media_keyword(input: &str) -> IResult<&str, (&str, &str)> {
    pair(tag("@custom-media"), take_while1(char::is_whitespace))(input)
}

/// `--` and every character up to the next whitespace.
fn custom_property_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("--"), take_till1(char::is_whitespace)))(input)
}

/// A keyframe offset: `50%`, `12.5%`, `.5`, or a keyword such as `from`.
fn keyframe_selector(input: &str) -> IResult<&str, &str> {
    let number = alt((
        recognize(tuple((digit1, char('.'), digit1))),
        recognize(pair(char('.'), digit1)),
        digit1,
    ));
    terminated(
        alt((
            recognize(pair(number, opt(char('%')))),
            take_while1(|c: char| c.is_ascii_lowercase()),
        )),
        whitespace,
    )(input)
}

fn comma(input: &str) -> IResult<&str, char> {
    terminated(char(','), whitespace)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_keyword_without_prefix() {
        let mut keyframes = vendor_keyword("keyframes");
        assert_eq!(keyframes("@keyframes spin"), Ok((" spin", None)));
    }

    #[test]
    fn vendor_keyword_with_prefix() {
        let mut keyframes = vendor_keyword("keyframes");
        assert_eq!(
            keyframes("@-webkit-keyframes spin"),
            Ok((" spin", Some("-webkit-")))
        );
    }

    #[test]
    fn vendor_keyword_rejects_other_at_rules() {
        let mut document = vendor_keyword("document");
        assert!(document("@media screen").is_err());
        assert_eq!(
            document("@-moz-document url(x)"),
            Ok((" url(x)", Some("-moz-")))
        );
    }

    #[test]
    fn keyframe_selector_forms() {
        assert_eq!(keyframe_selector("from {"), Ok(("{", "from")));
        assert_eq!(keyframe_selector("12.5% {"), Ok(("{", "12.5%")));
        assert_eq!(keyframe_selector(".5%,"), Ok((",", ".5%")));
        assert_eq!(keyframe_selector("100%{"), Ok(("{", "100%")));
        assert!(keyframe_selector("{").is_err());
    }

    #[test]
    fn custom_media_splits_name_and_query() {
        assert_eq!(
            custom_media("@custom-media --small (max-width: 30em);"),
            Ok(("", ("--small", " (max-width: 30em)")))
        );
    }

    #[test]
    fn custom_media_name_gives_back_characters() {
        assert_eq!(
            custom_media("@custom-media --a(min-width:1px);"),
            Ok(("", ("--a(min-width:1px", ")")))
        );
    }

    #[test]
    fn custom_media_requires_semicolon_before_brace() {
        assert!(custom_media("@custom-media --a screen { }").is_err());
    }

    #[test]
    fn statement_payload_must_not_be_empty() {
        assert!(statement("@import")("@import;").is_err());
        assert_eq!(
            statement("@import")("@import url(a.css);b"),
            Ok(("b", " url(a.css)"))
        );
    }
}
