//! Depth-first traversal that keeps a [`Cursor`] in step with the visit.

use crate::cursor::Cursor;
use crate::node::{Document, NodeRef};

/// What the visitor wants done with the children of the current node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Descend,
    Skip,
}

/// Visits every node of `document` in document order, handing the visitor
/// the ancestor chain ending at that node.
///
/// `Visit::Skip` prunes the current subtree. An `Err` stops the walk and is
/// returned as-is; the cursor is unwound either way.
pub fn walk<'a, E, F>(document: &'a Document, mut visitor: F) -> Result<(), E>
where
    F: FnMut(&Cursor<'a>) -> Result<Visit, E>,
{
    let mut cursor = Cursor::new();
    visit_node(&mut cursor, NodeRef::Document(document), &mut visitor)
}

fn visit_node<'a, E, F>(cursor: &mut Cursor<'a>, node: NodeRef<'a>, visitor: &mut F) -> Result<(), E>
where
    F: FnMut(&Cursor<'a>) -> Result<Visit, E>,
{
    let mut scope = cursor.enter(node);
    if visitor(&*scope)? == Visit::Skip {
        return Ok(());
    }
    for child in node.children() {
        visit_node(&mut *scope, child, visitor)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use pretty_assertions::assert_eq;

    fn doc() -> Document {
        Document::new(Node::mapping([
            ("a", Node::sequence([Node::scalar("1"), Node::scalar("2")])),
            ("b", Node::scalar("3")),
        ]))
    }

    #[test]
    fn visits_in_document_order() {
        let doc = doc();
        let mut seen = Vec::new();
        walk(&doc, |cursor| {
            if cursor.at_step() {
                seen.push(cursor.location());
            }
            Ok::<_, ()>(Visit::Descend)
        })
        .unwrap();
        assert_eq!(seen, vec!["$", "$.a", "$.a[0]", "$.a[1]", "$.b"]);
    }

    #[test]
    fn skip_prunes_the_subtree() {
        let doc = doc();
        let mut kinds = Vec::new();
        walk(&doc, |cursor| {
            let current = cursor.current().unwrap();
            kinds.push(current.kind());
            Ok::<_, ()>(match current {
                NodeRef::Sequence(_) => Visit::Skip,
                _ => Visit::Descend,
            })
        })
        .unwrap();
        assert_eq!(
            kinds,
            vec![
                "document",
                "mapping",
                "mapping-entry",
                "sequence",
                "mapping-entry",
                "scalar",
            ]
        );
    }

    #[test]
    fn errors_stop_the_walk() {
        let doc = doc();
        let mut depth_at_failure = 0;
        let result = walk(&doc, |cursor| {
            if matches!(cursor.current(), Some(NodeRef::SequenceEntry(_))) {
                depth_at_failure = cursor.len();
                return Err("boom");
            }
            Ok(Visit::Descend)
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(depth_at_failure, 5);
    }
}
