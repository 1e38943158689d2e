// src/parser.rs
use crate::errors::ParseError;

/// Character scanner shared by the path and predicate grammars.
pub struct Parser<'a> {
    s: &'a str,
    i: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn position(&self) -> usize {
        self.i
    }

    pub fn is_name_char(c: char) -> bool {
        c == '_' || c == '-' || c.is_ascii_alphanumeric()
    }

    /// A mapping key written without quotes: `[A-Za-z0-9_-]+`.
    pub fn parse_name(&mut self) -> Result<String, ParseError> {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if Self::is_name_char(c) {
                self.i += 1;
            } else {
                break;
            }
        }
        if self.i == start {
            return Err(self.unexpected("a field name"));
        }
        Ok(self.s[start..self.i].to_string())
    }

    pub fn parse_index(&mut self) -> Result<usize, ParseError> {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.i += 1;
            } else {
                break;
            }
        }
        if self.i == start {
            return Err(self.unexpected("an index"));
        }
        let text = &self.s[start..self.i];
        text.parse::<usize>().map_err(|_| ParseError::InvalidIndex {
            text: text.to_string(),
            position: start,
        })
    }

    pub fn parse_quoted_string(&mut self) -> Result<String, ParseError> {
        let start = self.i;
        let quote = match self.peek_char() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.unexpected("a quoted string")),
        };
        self.i += 1;
        let mut out = String::new();
        while let Some(c) = self.peek_char() {
            self.i += c.len_utf8();
            if c == quote {
                return Ok(out);
            }
            if c == '\\' {
                if let Some(nc) = self.peek_char() {
                    self.i += nc.len_utf8();
                    match nc {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        '\\' => out.push('\\'),
                        '"' => out.push('"'),
                        '\'' => out.push('\''),
                        _ => {
                            out.push('\\');
                            out.push(nc);
                        }
                    }
                } else {
                    break;
                }
            } else {
                out.push(c);
            }
        }
        Err(ParseError::Unterminated {
            construct: "string literal",
            position: start,
        })
    }

    pub fn expect(&mut self, c: char, expected: &'static str) -> Result<(), ParseError> {
        if self.consume_char(c) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Error describing whatever sits at the current position.
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek_char() {
            Some(found) => ParseError::UnexpectedToken {
                found,
                position: self.i,
                expected,
            },
            None => ParseError::UnexpectedEnd { expected },
        }
    }

    pub fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn consume_str(&mut self, lit: &str) -> bool {
        if self.peek_str(lit) {
            self.i += lit.len();
            true
        } else {
            false
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    pub fn peek_str(&self, lit: &str) -> bool {
        self.s[self.i..].starts_with(lit)
    }

    /// Consumes the run of characters matching `pred` and returns it.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.i;
        while let Some(c) = self.peek_char() {
            if pred(c) {
                self.i += c.len_utf8();
            } else {
                break;
            }
        }
        &self.s[start..self.i]
    }

    pub fn skip_ws(&mut self) {
        self.take_while(char::is_whitespace);
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }
}
