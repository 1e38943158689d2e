//! Builds [`Document`] trees from YAML and JSON text.

use serde::Deserialize;

use crate::errors::Result;
use crate::node::{Document, Mapping, MappingEntry, Node, Scalar, ScalarStyle, Sequence, SequenceEntry};

impl Document {
    /// Every document of a (possibly multi-document) YAML stream.
    pub fn from_yaml_str(text: &str) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        for de in serde_yaml::Deserializer::from_str(text) {
            let value = serde_yaml::Value::deserialize(de)?;
            documents.push(Document::new(from_yaml(value)?));
        }
        tracing::debug!(documents = documents.len(), "loaded YAML stream");
        Ok(documents)
    }

    pub fn from_json_str(text: &str) -> Result<Document> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        tracing::debug!("loaded JSON document");
        Ok(Document::new(from_json(value)))
    }
}

fn from_yaml(value: serde_yaml::Value) -> Result<Node> {
    use serde_yaml::Value;

    Ok(match value {
        Value::Mapping(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, value) in map {
                entries.push(MappingEntry {
                    key: yaml_key(key)?,
                    value: from_yaml(value)?,
                });
            }
            Node::Mapping(Mapping { entries })
        }
        Value::Sequence(items) => Node::Sequence(Sequence {
            entries: items
                .into_iter()
                .map(|value| Ok(SequenceEntry { value: from_yaml(value)? }))
                .collect::<Result<_>>()?,
        }),
        Value::Tagged(tagged) => from_yaml(tagged.value)?,
        Value::String(s) => Node::scalar(s),
        Value::Number(n) => Node::scalar(n.to_string()),
        Value::Bool(b) => Node::scalar(b.to_string()),
        Value::Null => Node::scalar("null"),
    })
}

/// Keys are matched as text; complex keys use their flow-style YAML form.
fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value;

    Ok(match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => yaml_key(tagged.value)?,
        complex @ (Value::Sequence(_) | Value::Mapping(_)) => {
            serde_yaml::to_string(&complex)?.trim_end().to_string()
        }
    })
}

fn from_json(value: serde_json::Value) -> Node {
    use serde_json::Value;

    match value {
        Value::Object(map) => Node::Mapping(Mapping {
            entries: map
                .into_iter()
                .map(|(key, value)| MappingEntry {
                    key,
                    value: from_json(value),
                })
                .collect(),
        }),
        Value::Array(items) => Node::sequence(items.into_iter().map(from_json)),
        Value::String(s) => Node::Scalar(Scalar {
            value: s,
            style: ScalarStyle::DoubleQuoted,
        }),
        Value::Number(n) => Node::scalar(n.to_string()),
        Value::Bool(b) => Node::scalar(b.to_string()),
        Value::Null => Node::scalar("null"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn yaml_keeps_mapping_order_and_scalar_text() {
        let docs = Document::from_yaml_str("b: 1\na: true\nc: ~\nd: [x, 2.5]\n").unwrap();
        assert_eq!(
            docs,
            vec![Document::new(Node::mapping([
                ("b", Node::scalar("1")),
                ("a", Node::scalar("true")),
                ("c", Node::scalar("null")),
                ("d", Node::sequence([Node::scalar("x"), Node::scalar("2.5")])),
            ]))]
        );
    }

    #[test]
    fn yaml_streams_yield_every_document() {
        let docs = Document::from_yaml_str("a: 1\n---\nb: 2\n").unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1], Document::new(Node::mapping([("b", Node::scalar("2"))])));
    }

    #[test]
    fn yaml_non_string_keys_become_text() {
        let docs = Document::from_yaml_str("1: one\ntrue: yes\n").unwrap();
        let Node::Mapping(m) = &docs[0].root else {
            unreachable!()
        };
        let keys: Vec<_> = m.entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "true"]);
    }

    #[test]
    fn tagged_values_are_unwrapped() {
        let docs = Document::from_yaml_str("a: !custom hello\n").unwrap();
        assert_eq!(
            docs[0],
            Document::new(Node::mapping([("a", Node::scalar("hello"))]))
        );
    }

    #[test]
    fn json_strings_are_double_quoted() {
        let doc = Document::from_json_str(r#"{"z": "v", "a": [1, null]}"#).unwrap();
        let Node::Mapping(m) = &doc.root else {
            unreachable!()
        };
        assert_eq!(m.entries[0].key, "z");
        assert_eq!(
            m.entries[0].value,
            Node::Scalar(Scalar {
                value: "v".into(),
                style: ScalarStyle::DoubleQuoted
            })
        );
        assert_eq!(
            m.entries[1].value,
            Node::sequence([Node::scalar("1"), Node::scalar("null")])
        );
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(Document::from_yaml_str("a: [1, 2").is_err());
        assert!(Document::from_json_str("{\"a\":").is_err());
    }
}
