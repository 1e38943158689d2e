use json_path_matcher as jpm;
use jpm::{walk, Document, NodeRef, PathMatcher, Visit};

const SOMETHING_YAML: &str = r#"
something:
  - steps:
    - task: ABC
    - task: ZZZ
"#;

const SUBJECTS_YAML: &str = r#"
subjects:
  - kind: User
    name: some-user
  - kind: ServiceAccount
    name: monitoring-tools
"#;

const TOC_YAML: &str = r#"
toc:
  - section:
    - subsection: ABB
    - subsection: ABC
  - section:
    - subsection: AAA
    - subsection: ZZZ
"#;

const RECURSIVE_DESCENT: &str = "$..[?(@.kind == 'ServiceAccount')].kind";
const NESTED_SEQUENCES: &str = "$.something[*].steps[?(@.task == 'ABC')].task";
const SEQUENCE_KEY_BY_WILDCARD: &str = "$.*[?(@.kind == 'ServiceAccount')].kind";
const NESTED_COLLECTION_VALUES: &str = "$.toc[*].section[?(@.subsection == 'ABC')].subsection";

/// Locations of the mapping entries the matcher accepts over a full walk.
fn visit(expression: &str, yaml: &str, encloses: bool) -> Vec<String> {
    let matcher = PathMatcher::new(expression).unwrap();
    let documents = Document::from_yaml_str(yaml).unwrap();
    let mut results = Vec::new();
    for document in &documents {
        walk(document, |cursor| {
            if let Some(NodeRef::MappingEntry(_)) = cursor.current() {
                let hit = if encloses {
                    matcher.encloses(cursor)
                } else {
                    matcher.matches(cursor)
                };
                if hit {
                    results.push(cursor.location());
                }
            }
            Ok::<_, ()>(Visit::Descend)
        })
        .unwrap();
    }
    results
}

#[test]
fn finds_element_with_recursive_descent() {
    assert_eq!(
        visit(RECURSIVE_DESCENT, SUBJECTS_YAML, false),
        vec!["$.subjects[1].kind"]
    );
}

#[test]
fn finds_nested_sequences_with_predicate() {
    assert_eq!(
        visit(NESTED_SEQUENCES, SOMETHING_YAML, false),
        vec!["$.something[0].steps[0].task"]
    );
}

#[test]
fn nested_sequences_without_the_literal_match_nothing() {
    let expr = "$.something[*].steps[?(@.task == 'QQQ')].task";
    assert!(visit(expr, SOMETHING_YAML, false).is_empty());
}

#[test]
fn matches_a_sequence_via_a_wildcard() {
    assert_eq!(
        visit(SEQUENCE_KEY_BY_WILDCARD, SUBJECTS_YAML, false),
        vec!["$.subjects[1].kind"]
    );
}

#[test]
fn matches_nested_collection_values() {
    assert_eq!(
        visit(NESTED_COLLECTION_VALUES, TOC_YAML, false),
        vec!["$.toc[0].section[1].subsection"]
    );
    let absent = "$.toc[*].section[?(@.subsection == 'QQQ')].subsection";
    assert!(visit(absent, TOC_YAML, false).is_empty());
}

#[test]
fn trailing_whitespace_in_plain_scalars_is_not_part_of_the_value() {
    let expr = "$.toc[*].section[?(@.subsection == 'ZZZ')].subsection";
    assert_eq!(
        visit(expr, TOC_YAML, false),
        vec!["$.toc[1].section[1].subsection"]
    );
}

#[test]
fn encloses_keeps_only_the_route_to_the_match() {
    assert_eq!(
        visit(RECURSIVE_DESCENT, SUBJECTS_YAML, true),
        vec!["$.subjects", "$.subjects[1].kind"]
    );
    assert_eq!(
        visit(NESTED_SEQUENCES, SOMETHING_YAML, true),
        vec!["$.something", "$.something[0].steps", "$.something[0].steps[0].task"]
    );
}

#[test]
fn every_match_is_enclosed() {
    for (expr, yaml) in [
        (RECURSIVE_DESCENT, SUBJECTS_YAML),
        (NESTED_SEQUENCES, SOMETHING_YAML),
        (SEQUENCE_KEY_BY_WILDCARD, SUBJECTS_YAML),
        (NESTED_COLLECTION_VALUES, TOC_YAML),
    ] {
        let enclosed = visit(expr, yaml, true);
        for hit in visit(expr, yaml, false) {
            assert!(enclosed.contains(&hit), "{expr}: {hit} not enclosed");
        }
    }
}
