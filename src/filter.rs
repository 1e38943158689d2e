use std::fmt;

use crate::errors::ParseError;
use crate::node::Node;
use crate::parser::Parser;

/// `@.field == 'literal'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub literal: String,
}

impl Filter {
    /// True when `candidate` is a mapping with a direct `field` entry whose
    /// scalar value equals the literal. Anything else is simply unsatisfied.
    pub fn evaluate(&self, candidate: &Node) -> bool {
        match candidate {
            Node::Mapping(m) => m
                .get(&self.field)
                .any(|entry| entry.value.as_scalar() == Some(self.literal.as_str())),
            Node::Sequence(_) | Node::Scalar(_) => false,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@.{} == '{}'", self.field, escape(&self.literal))
    }
}

pub(crate) fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

const UNSUPPORTED_OPERATORS: [&str; 7] = ["!=", "<=", ">=", "=~", "<", ">", "="];

/// Parses the body of `[?( ... )]`, leaving the parser on the closing `)`.
pub(crate) fn parse_filter(parser: &mut Parser) -> Result<Filter, ParseError> {
    parser.skip_ws();
    parser.expect('@', "`@` to open a predicate field")?;
    parser.expect('.', "`.` after `@`")?;
    let field = parser.parse_name()?;

    if parser.peek_char() == Some('.') || parser.peek_char() == Some('[') {
        let rest = parser.take_while(|c| !c.is_whitespace() && !"=!<>)".contains(c));
        return Err(ParseError::UnsupportedFieldPath {
            path: format!("{field}{rest}"),
        });
    }

    parser.skip_ws();
    let op_position = parser.position();
    if !parser.consume_str("==") {
        if let Some(op) = UNSUPPORTED_OPERATORS.iter().find(|op| parser.peek_str(op)) {
            return Err(ParseError::UnsupportedOperator {
                op: (*op).to_string(),
                position: op_position,
            });
        }
        return Err(parser.unexpected("`==`"));
    }

    parser.skip_ws();
    let literal = parser.parse_quoted_string()?;
    parser.skip_ws();
    Ok(Filter { field, literal })
}
