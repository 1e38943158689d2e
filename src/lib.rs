//! JSONPath-style matching over YAML/JSON document trees.
//!
//! An expression is compiled once and then probed at every node a walker
//! visits: [`matches`] says whether the node is a match, [`encloses`] whether
//! descending below it can still lead to one.
//!
//! ```
//! use json_path_matcher::{select, Document, PathMatcher};
//!
//! let docs = Document::from_yaml_str("subjects:\n  - kind: User\n  - kind: ServiceAccount\n").unwrap();
//! let matcher = PathMatcher::new("$.subjects[?(@.kind == 'ServiceAccount')].kind").unwrap();
//! let hits = select(&matcher, &docs[0]);
//! assert_eq!(hits[0].location, "$.subjects[1].kind");
//! ```

pub mod context;
pub mod cursor;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod jsonpath;
pub mod matcher;
pub mod node;
pub mod walk;
mod document;
mod parser;

pub use context::{Context, InputFormat, Mode};
pub use cursor::{Cursor, Scope, Step, StepKey};
pub use engine::{query, select, select_enclosing, Hit, Report};
pub use errors::{Error, ParseError, Result};
pub use filter::Filter;
pub use jsonpath::{compile, Path, Segment};
pub use matcher::{encloses, matches, PathMatcher};
pub use node::{
    Document, Mapping, MappingEntry, Node, NodeRef, Scalar, ScalarStyle, Sequence, SequenceEntry,
};
pub use walk::{walk, Visit};
