use serde::Serialize;

use crate::context::{Context, InputFormat, Mode};
use crate::cursor::Cursor;
use crate::errors::Result;
use crate::matcher::PathMatcher;
use crate::node::{Document, NodeRef};
use crate::walk::{walk, Visit};

/// A node picked out by a matcher, with its normalized location.
#[derive(Debug, Clone)]
pub struct Hit<'a> {
    pub location: String,
    pub node: NodeRef<'a>,
}

/// Serializable summary of a hit, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub document: usize,
    pub location: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Hit<'_> {
    pub fn report(&self, document: usize) -> Report {
        let value = self.node.value();
        Report {
            document,
            location: self.location.clone(),
            kind: value.map_or(self.node.kind(), |v| v.kind()),
            value: value.map(|v| v.to_string()),
        }
    }
}

/// Every node of `document` the matcher matches, in document order.
///
/// Subtrees the matcher does not enclose are never entered.
pub fn select<'a>(matcher: &PathMatcher, document: &'a Document) -> Vec<Hit<'a>> {
    collect(matcher, document, Mode::Matches, None)
}

/// Every keyed node (document, mapping entry, sequence entry) the matcher
/// encloses: the matches, their ancestors and their descendants.
pub fn select_enclosing<'a>(matcher: &PathMatcher, document: &'a Document) -> Vec<Hit<'a>> {
    collect(matcher, document, Mode::Encloses, None)
}

struct LimitReached;

fn collect<'a>(
    matcher: &PathMatcher,
    document: &'a Document,
    mode: Mode,
    limit: Option<usize>,
) -> Vec<Hit<'a>> {
    let mut hits = Vec::new();
    let walked = walk(document, |cursor: &Cursor<'a>| {
        if !matcher.encloses(cursor) {
            tracing::trace!(location = %cursor.location(), "pruned");
            return Ok(Visit::Skip);
        }
        let hit = match mode {
            Mode::Matches => matcher.matches(cursor),
            Mode::Encloses => cursor.at_step(),
        };
        if let (true, Some(node)) = (hit, cursor.current()) {
            hits.push(Hit {
                location: cursor.location(),
                node,
            });
            if limit.is_some_and(|n| hits.len() >= n) {
                return Err(LimitReached);
            }
        }
        Ok(Visit::Descend)
    });
    match walked {
        Ok(()) | Err(LimitReached) => hits,
    }
}

/// Loads `source` in `format` (`Auto` reads as YAML) and runs `expression`
/// over every document it holds.
pub fn query(source: &str, expression: &str, ctx: &Context) -> Result<Vec<Report>> {
    let matcher = PathMatcher::new(expression)?;
    let documents = match ctx.format.resolve(None) {
        InputFormat::Json => vec![Document::from_json_str(source)?],
        InputFormat::Yaml | InputFormat::Auto => Document::from_yaml_str(source)?,
    };

    let mut reports = Vec::new();
    for (index, document) in documents.iter().enumerate() {
        let limit = ctx.first.then(|| 1);
        let hits = collect(&matcher, document, ctx.mode, limit);
        reports.extend(hits.iter().map(|hit| hit.report(index)));
        if ctx.first && !reports.is_empty() {
            break;
        }
    }
    tracing::debug!(
        expression = matcher.expression(),
        documents = documents.len(),
        hits = reports.len(),
        "query finished"
    );
    Ok(reports)
}
