use thiserror::Error;

/// Reasons a path expression fails to compile.
///
/// Positions are byte offsets into the expression text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("path expression is empty")]
    Empty,

    #[error("path must start with `$`, found `{found}`")]
    MissingRoot { found: char },

    #[error("unterminated {construct} starting at position {position}")]
    Unterminated {
        construct: &'static str,
        position: usize,
    },

    #[error("unexpected `{found}` at position {position}, expected {expected}")]
    UnexpectedToken {
        found: char,
        position: usize,
        expected: &'static str,
    },

    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unsupported predicate operator `{op}` at position {position}")]
    UnsupportedOperator { op: String, position: usize },

    #[error("nested predicate field `@.{path}` is not supported")]
    UnsupportedFieldPath { path: String },

    #[error("invalid sequence index `{text}` at position {position}")]
    InvalidIndex { text: String, position: usize },
}

/// Crate-level error for everything that can fail outside of matching.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
