//! Plain rules and the stylesheet loop.

use crate::ast::{Node, Rule};
use crate::error::{ParseError, SyntaxError};
use crate::parser::{Halt, Parser, Step, settle};

impl<'a> Parser<'a> {
    /// Parses rules, at-rules and comments until the input runs out, a `}`
    /// closes the enclosing block, or a plain rule fails.
    ///
    /// The same loop parses the top level and the body of every block
    /// at-rule.
    pub(crate) fn rules(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut rules = Vec::new();
        self.cursor.skip_whitespace();
        settle(self.collect_rules(&mut rules))?;
        Ok(rules)
    }

    fn collect_rules(&mut self, out: &mut Vec<Node>) -> Result<(), Halt> {
        self.comments(out)?;
        while !self.cursor.is_eof() && !self.cursor.starts_with("}") {
            let Some(node) = self.rule_or_at_rule()? else {
                break;
            };
            out.push(node);
            self.comments(out)?;
        }
        Ok(())
    }

    /// Tries the at-rule table, then a plain rule.
    ///
    /// A recorded at-rule error does not end the list: the plain rule parser
    /// picks up from wherever the at-rule stopped.
    fn rule_or_at_rule(&mut self) -> Step<Node> {
        match self.at_rule() {
            Ok(Some(at_rule)) => return Ok(Some(at_rule)),
            Ok(None) | Err(Halt::Recorded) => {}
            Err(raised) => return Err(raised),
        }
        self.rule()
    }

    /// Parses `selectors { declarations }`.
    pub(crate) fn rule(&mut self) -> Step<Node> {
        let mark = self.cursor.mark();

        let Some(selectors) = self.selector() else {
            return self.fail(SyntaxError::MissingSelector);
        };
        // Comments between the selector and `{` are dropped.
        self.comments(&mut Vec::new())?;
        let declarations = self.declarations()?;

        Ok(Some(Node::Rule(Rule {
            selectors,
            declarations,
            position: self.span(mark),
        })))
    }
}
