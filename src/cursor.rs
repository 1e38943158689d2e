//! Root-first ancestor chain handed to the matcher at every visited node.

use std::ops::{Deref, DerefMut};

use itertools::Itertools;

use crate::node::{Node, NodeRef};
use crate::parser::Parser;

/// `[root, …, parent, current]`. Consecutive elements are parent → child.
#[derive(Debug, Clone, Default)]
pub struct Cursor<'a> {
    chain: Vec<NodeRef<'a>>,
}

/// The key a step hangs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKey<'a> {
    Root,
    Name(&'a str),
    Index(usize),
    /// A sequence entry whose parent is not the preceding cursor element.
    Detached,
}

/// A keyed position in the cursor: the root, or one entry with its value.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    pub key: StepKey<'a>,
    pub value: &'a Node,
}

impl<'a> Cursor<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: NodeRef<'a>) {
        self.chain.push(node);
    }

    pub fn pop(&mut self) -> Option<NodeRef<'a>> {
        self.chain.pop()
    }

    /// Pushes `node` and returns a guard that pops it again when dropped.
    pub fn enter(&mut self, node: NodeRef<'a>) -> Scope<'_, 'a> {
        self.push(node);
        Scope { cursor: self }
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn current(&self) -> Option<NodeRef<'a>> {
        self.chain.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'a>> + '_ {
        self.chain.iter().copied()
    }

    /// True when the current element carries a key of its own: the
    /// document, a mapping entry or a sequence entry.
    pub fn at_step(&self) -> bool {
        match self.current() {
            Some(NodeRef::Document(_) | NodeRef::MappingEntry(_) | NodeRef::SequenceEntry(_)) => {
                true
            }
            Some(NodeRef::Mapping(_) | NodeRef::Sequence(_) | NodeRef::Scalar(_)) | None => false,
        }
    }

    /// Projects the chain onto its keyed positions.
    ///
    /// Step 0 is the document's root value. Each mapping or sequence entry
    /// adds one step; the container and scalar elements between them add none.
    pub fn steps(&self) -> Vec<Step<'a>> {
        let mut steps = Vec::with_capacity(self.chain.len() / 2 + 1);
        for (i, node) in self.chain.iter().enumerate() {
            let step = match *node {
                NodeRef::Document(d) => Step {
                    key: StepKey::Root,
                    value: &d.root,
                },
                NodeRef::MappingEntry(e) => Step {
                    key: StepKey::Name(&e.key),
                    value: &e.value,
                },
                NodeRef::SequenceEntry(e) => {
                    let key = match i.checked_sub(1).map(|p| self.chain[p]) {
                        Some(NodeRef::Sequence(seq)) => seq
                            .position_of(e)
                            .map_or(StepKey::Detached, StepKey::Index),
                        _ => StepKey::Detached,
                    };
                    Step {
                        key,
                        value: &e.value,
                    }
                }
                NodeRef::Mapping(_) | NodeRef::Sequence(_) | NodeRef::Scalar(_) => continue,
            };
            steps.push(step);
        }
        steps
    }

    /// Normalized location of the current step, e.g. `$.subjects[1].kind`.
    pub fn location(&self) -> String {
        self.steps()
            .iter()
            .map(|step| match step.key {
                StepKey::Root => "$".to_string(),
                StepKey::Name(name) if !name.is_empty() && name.chars().all(Parser::is_name_char) => {
                    format!(".{name}")
                }
                StepKey::Name(name) => format!("['{}']", crate::filter::escape(name)),
                StepKey::Index(i) => format!("[{i}]"),
                StepKey::Detached => "[?]".to_string(),
            })
            .join("")
    }
}

/// Scoped cursor frame: the element pushed by [`Cursor::enter`] is popped
/// when the scope ends, whichever way it ends.
pub struct Scope<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
}

impl<'a> Deref for Scope<'_, 'a> {
    type Target = Cursor<'a>;

    fn deref(&self) -> &Self::Target {
        self.cursor
    }
}

impl<'a> DerefMut for Scope<'_, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cursor
    }
}

impl Drop for Scope<'_, '_> {
    fn drop(&mut self) {
        self.cursor.pop();
    }
}
