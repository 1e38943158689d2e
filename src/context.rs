use std::path::Path;

use clap::ValueEnum;

/// Which of the two matcher questions a query asks at every node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Mode {
    /// Nodes that are terminal matches.
    #[default]
    Matches,
    /// Nodes that are, contain, or lead to a match.
    Encloses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InputFormat {
    /// JSON for `.json` files, YAML otherwise.
    #[default]
    Auto,
    Yaml,
    Json,
}

impl InputFormat {
    /// Settles `Auto` using the source's file name, when there is one.
    pub fn resolve(self, source: Option<&Path>) -> InputFormat {
        match self {
            InputFormat::Auto => match source.and_then(|p| p.extension()) {
                Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
                _ => InputFormat::Yaml,
            },
            explicit => explicit,
        }
    }
}

/// Options for one query run.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub mode: Mode,
    pub format: InputFormat,
    /// Stop at the first hit.
    pub first: bool,
}
