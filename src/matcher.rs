//! Two-mode evaluation of a compiled [`Path`] against a [`Cursor`].
//!
//! Both entry points share one backtracking co-walk over the segment list
//! and the cursor's keyed steps (see [`Cursor::steps`]). `s` indexes the
//! segments and `c` the next step to consume; step 0 is the root and is
//! consumed by [`Segment::Root`].

use std::fmt;

use crate::cursor::{Cursor, Step, StepKey};
use crate::errors::ParseError;
use crate::jsonpath::{self, Path, Segment};
use crate::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Matches,
    Encloses,
}

/// True iff the node under the cursor is a terminal match for `path`.
pub fn matches(path: &Path, cursor: &Cursor) -> bool {
    if !cursor.at_step() {
        return false;
    }
    evaluate(path, cursor, Mode::Matches)
}

/// True iff the node under the cursor is a match, lies inside one, or could
/// be an ancestor of one. Whenever this is false no descendant can match.
pub fn encloses(path: &Path, cursor: &Cursor) -> bool {
    evaluate(path, cursor, Mode::Encloses)
}

fn evaluate(path: &Path, cursor: &Cursor, mode: Mode) -> bool {
    let steps = cursor.steps();
    if steps.first().map(|s| s.key) != Some(StepKey::Root) {
        return false;
    }
    let outcome = CoWalk {
        segments: path.segments(),
        steps: &steps,
        mode,
    }
    .run(0, 1);
    tracing::trace!(path = %path, location = %cursor.location(), ?mode, outcome, "evaluated cursor");
    outcome
}

struct CoWalk<'p, 's, 'a> {
    segments: &'p [Segment],
    steps: &'s [Step<'a>],
    mode: Mode,
}

impl CoWalk<'_, '_, '_> {
    fn run(&self, s: usize, c: usize) -> bool {
        let Some(segment) = self.segments.get(s) else {
            // Every segment is satisfied. A match must end on the cursor's
            // last step; anything deeper sits inside a match.
            return match self.mode {
                Mode::Matches => c == self.steps.len(),
                Mode::Encloses => true,
            };
        };
        let current = self.steps[c - 1].value;
        let next = self.steps.get(c);

        match segment {
            Segment::Root => {
                debug_assert_eq!(s, 0, "`$` past the head of a compiled path");
                s == 0 && self.run(s + 1, c)
            }
            Segment::RecursiveDescent => {
                if self.run(s + 1, c) {
                    return true;
                }
                match next {
                    Some(_) => self.run(s, c + 1),
                    None => self.extensible() && current.is_container(),
                }
            }
            Segment::Predicate(filter) => match current {
                Node::Mapping(_) => filter.evaluate(current) && self.run(s + 1, c),
                Node::Sequence(seq) => match next {
                    Some(element) => filter.evaluate(element.value) && self.run(s + 1, c + 1),
                    None => {
                        self.extensible()
                            && seq.entries.iter().any(|e| filter.evaluate(&e.value))
                    }
                },
                Node::Scalar(_) => false,
            },
            Segment::Wildcard | Segment::Field(_) | Segment::Index(_) => match next {
                Some(step) => accepts(segment, step.key) && self.run(s + 1, c + 1),
                None => self.extensible() && could_descend(segment, current),
            },
        }
    }

    /// Only `encloses` may succeed on a cursor that ran out before the path.
    fn extensible(&self) -> bool {
        self.mode == Mode::Encloses
    }
}

fn accepts(segment: &Segment, key: StepKey) -> bool {
    match (segment, key) {
        (Segment::Wildcard, StepKey::Name(_) | StepKey::Index(_) | StepKey::Detached) => true,
        (Segment::Field(name), StepKey::Name(key)) => name == key,
        (Segment::Index(i), StepKey::Index(j)) => *i == j,
        _ => false,
    }
}

/// Whether a child of `value` could satisfy `segment`.
fn could_descend(segment: &Segment, value: &Node) -> bool {
    match (segment, value) {
        (Segment::Field(name), Node::Mapping(m)) => m.get(name).next().is_some(),
        (Segment::Index(i), Node::Sequence(seq)) => *i < seq.entries.len(),
        (Segment::Wildcard, Node::Mapping(m)) => !m.entries.is_empty(),
        (Segment::Wildcard, Node::Sequence(seq)) => !seq.entries.is_empty(),
        _ => false,
    }
}

/// A compiled expression ready to be probed at every node of a walk.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    expression: String,
    path: Path,
}

impl PathMatcher {
    pub fn new(expression: &str) -> Result<Self, ParseError> {
        Ok(Self {
            expression: expression.to_string(),
            path: jsonpath::compile(expression)?,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn matches(&self, cursor: &Cursor) -> bool {
        matches(&self.path, cursor)
    }

    pub fn encloses(&self, cursor: &Cursor) -> bool {
        encloses(&self.path, cursor)
    }
}

impl fmt::Display for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}
