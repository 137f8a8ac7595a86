//! Rule sets and their loading from the compiled JSON format.
//!
//! A grammar is a map from rule name to its [`Production`] body. It is built
//! once by an external grammar builder, either programmatically with the
//! [`Production`] constructors or by emitting JSON that [`parse_rules`] reads
//! back with [`facet_json`].

mod production;

use crate::validate::{validate, ValidationError};
use std::collections::HashMap;
use thiserror::Error;

pub use production::{ConditionalNode, OptionalNode, Production, SpanNode};

/// The whole grammar: every rule name mapped to its body.
pub type RuleSet = HashMap<String, Production>;

/// Name of the mandatory entry point, always considered referenced.
pub const START_RULE: &str = "start";

/// Prefix of alternate entry points, which are exempt from the usage check.
pub const ALTERNATE_START_PREFIX: &str = "start_";

/// Returns `true` if `name` is the entry point or an alternate entry point.
#[must_use]
pub fn is_entry_point(name: &str) -> bool {
    name == START_RULE || name.starts_with(ALTERNATE_START_PREFIX)
}

/// Returns the names of all entry points defined in `rules`, sorted.
#[must_use]
pub fn entry_points(rules: &RuleSet) -> Vec<&str> {
    let mut names: Vec<&str> = rules
        .keys()
        .map(String::as_str)
        .filter(|name| is_entry_point(name))
        .collect();
    names.sort_unstable();
    names
}

/// Deserialize a JSON object of rule bodies into a [`RuleSet`].
///
/// The result is not validated; see [`load_rules`].
///
/// # Errors
///
/// Returns [`ValidationError::MalformedNode`] if the input is not a JSON
/// object whose values are all recognised production nodes.
pub fn parse_rules(json: &str) -> Result<RuleSet, ValidationError> {
    facet_json::from_str(json).map_err(|e| ValidationError::MalformedNode {
        detail: plain_message(&format!("{} at byte {}", e.message(), e.span.start())),
    })
}

/// Drops terminal colour sequences (`ESC [ ... letter`) and folds the message
/// onto one line.
fn plain_message(message: &str) -> String {
    let mut plain = String::with_capacity(message.len());
    let mut chars = message.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deserialize and validate a JSON rule set in one step.
///
/// # Errors
///
/// Returns the first [`ValidationError`] raised by [`parse_rules`] or
/// [`validate`].
pub fn load_rules(json: &str) -> Result<RuleSet, ValidationError> {
    let rules = parse_rules(json)?;
    validate(&rules)?;
    Ok(rules)
}

/// Errors raised by tooling that reads grammars from disk.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// The grammar file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the grammar file.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The grammar was read but is not well-formed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl GrammarError {
    /// Wraps an I/O failure encountered while reading `path`.
    #[must_use]
    pub fn from_io(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        GrammarError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
