use std::fmt;

use crate::errors::ParseError;
use crate::filter::{self, Filter};
use crate::parser::Parser;

/// A compiled path expression. Segment 0 is always [`Segment::Root`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Root,             // $
    RecursiveDescent, // ..
    Wildcard,         // .* or [*]
    Field(String),    // .name or ['name']
    Index(usize),     // [0]
    Predicate(Filter), // [?(@.field == 'literal')]
}

impl Path {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Compiles `expression` into a [`Path`].
pub fn compile(expression: &str) -> Result<Path, ParseError> {
    let path = Compiler::new(expression).parse()?;
    tracing::debug!(expression, compiled = %path, "compiled path expression");
    Ok(path)
}

struct Compiler<'a> {
    p: Parser<'a>,
}

impl<'a> Compiler<'a> {
    fn new(expression: &'a str) -> Self {
        Self {
            p: Parser::new(expression),
        }
    }

    fn parse(&mut self) -> Result<Path, ParseError> {
        self.p.skip_ws();
        match self.p.peek_char() {
            None => return Err(ParseError::Empty),
            Some('$') => {
                self.p.consume_char('$');
            }
            Some(found) => return Err(ParseError::MissingRoot { found }),
        }
        let mut segments = vec![Segment::Root];

        loop {
            self.p.skip_ws();
            if self.p.eof() {
                break;
            }
            if self.p.consume_str("..") {
                segments.push(Segment::RecursiveDescent);
                // `..` is always followed by what it descends to.
                match self.p.peek_char() {
                    Some('*') => {
                        self.p.consume_char('*');
                        segments.push(Segment::Wildcard);
                    }
                    Some('[') => {}
                    Some(c) if Parser::is_name_char(c) => {
                        segments.push(Segment::Field(self.p.parse_name()?));
                    }
                    _ => return Err(self.p.unexpected("a name, `*` or `[` after `..`")),
                }
                continue;
            }
            if self.p.consume_char('.') {
                if self.p.consume_char('*') {
                    segments.push(Segment::Wildcard);
                } else {
                    segments.push(Segment::Field(self.p.parse_name()?));
                }
                continue;
            }
            if self.p.peek_char() == Some('[') {
                segments.push(self.parse_bracket()?);
                continue;
            }
            return Err(self.p.unexpected("`.`, `..` or `[`"));
        }
        Ok(Path { segments })
    }

    fn parse_bracket(&mut self) -> Result<Segment, ParseError> {
        let open = self.p.position();
        self.p.consume_char('[');
        self.p.skip_ws();
        let segment = match self.p.peek_char() {
            None => {
                return Err(ParseError::Unterminated {
                    construct: "bracket",
                    position: open,
                })
            }
            Some('*') => {
                self.p.consume_char('*');
                Segment::Wildcard
            }
            Some('?') => {
                self.p.consume_char('?');
                self.p.expect('(', "`(` after `?`")?;
                let filter = filter::parse_filter(&mut self.p)?;
                if !self.p.consume_char(')') {
                    return Err(self.unterminated_or_unexpected("predicate", open, "`)`"));
                }
                Segment::Predicate(filter)
            }
            Some('\'' | '"') => Segment::Field(self.p.parse_quoted_string()?),
            Some(c) if c.is_ascii_digit() => Segment::Index(self.p.parse_index()?),
            Some(_) => return Err(self.p.unexpected("`*`, `?(`, an index or a quoted name")),
        };
        self.p.skip_ws();
        if !self.p.consume_char(']') {
            return Err(self.unterminated_or_unexpected("bracket", open, "`]`"));
        }
        Ok(segment)
    }

    fn unterminated_or_unexpected(
        &self,
        construct: &'static str,
        open: usize,
        expected: &'static str,
    ) -> ParseError {
        if self.p.eof() {
            ParseError::Unterminated {
                construct,
                position: open,
            }
        } else {
            self.p.unexpected(expected)
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Root => f.write_str("$"),
            Segment::RecursiveDescent => f.write_str(".."),
            Segment::Wildcard => f.write_str("[*]"),
            Segment::Field(name) => write!(f, "['{}']", filter::escape(name)),
            Segment::Index(i) => write!(f, "[{i}]"),
            Segment::Predicate(filter) => write!(f, "[?({filter})]"),
        }
    }
}

/// Normalized bracket notation; compiles back to an equal path.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.segments.iter().try_for_each(|s| write!(f, "{s}"))
    }
}
