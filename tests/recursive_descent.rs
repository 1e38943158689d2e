use json_path_matcher as jpm;
use jpm::{select, Document, Node, PathMatcher};

fn account(kind: &str, name: &str) -> Node {
    Node::mapping([("kind", Node::scalar(kind)), ("name", Node::scalar(name))])
}

/// `depth` alternating mapping/sequence levels above one ServiceAccount,
/// with a decoy User at every level.
fn nested(depth: usize) -> Node {
    if depth == 0 {
        return Node::sequence([account("User", "u0"), account("ServiceAccount", "sa")]);
    }
    Node::mapping([
        ("kind", Node::scalar("Wrapper")),
        (
            "items",
            Node::sequence([account("User", &format!("u{depth}")), nested(depth - 1)]),
        ),
    ])
}

fn locations(expr: &str, doc: &Document) -> Vec<String> {
    let matcher = PathMatcher::new(expr).unwrap();
    select(&matcher, doc).into_iter().map(|h| h.location).collect()
}

#[test]
fn recursive_descent_finds_the_account_at_any_depth() {
    for depth in 0..8 {
        let doc = Document::new(nested(depth));
        let hits = locations("$..[?(@.kind == 'ServiceAccount')].kind", &doc);
        assert_eq!(hits.len(), 1, "depth {depth}: {hits:?}");
        assert!(hits[0].ends_with("[1].kind"), "{}", hits[0]);
    }
}

#[test]
fn recursive_descent_names_collect_every_level() {
    let doc = Document::new(nested(2));
    assert_eq!(
        locations("$..name", &doc),
        vec![
            "$.items[0].name",
            "$.items[1].items[0].name",
            "$.items[1].items[1][0].name",
            "$.items[1].items[1][1].name",
        ]
    );
}

#[test]
fn recursive_descent_into_sequences_of_sequences() {
    let doc = Document::new(Node::mapping([(
        "grid",
        Node::sequence([
            Node::sequence([account("User", "a")]),
            Node::sequence([account("User", "b"), account("ServiceAccount", "c")]),
        ]),
    )]));
    assert_eq!(
        locations("$.grid[*][?(@.kind == 'ServiceAccount')].name", &doc),
        vec!["$.grid[1][1].name"]
    );
    assert_eq!(
        locations("$..[?(@.name == 'b')].kind", &doc),
        vec!["$.grid[1][0].kind"]
    );
}

#[test]
fn consecutive_recursive_descents_do_not_duplicate_matches() {
    let doc = Document::new(nested(3));
    let hits = locations("$..items..[?(@.kind == 'ServiceAccount')].name", &doc);
    assert_eq!(hits, vec!["$.items[1].items[1].items[1][1].name"]);
}

#[test]
fn wildcard_predicate_over_a_root_sequence() {
    let doc = Document::new(nested(0));
    assert_eq!(
        locations("$[?(@.kind == 'ServiceAccount')].name", &doc),
        vec!["$[1].name"]
    );
    assert_eq!(locations("$.*.kind", &doc), vec!["$[0].kind", "$[1].kind"]);
}
