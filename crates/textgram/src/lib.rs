//! Validation for the grammars that generate practice text.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// The grammar data model and its loading from JSON.
///
/// A grammar is a set of named rules whose bodies are production trees:
/// literals, sequences, alternatives, weighted optionals, references to other
/// rules, and the conditional and span wrappers consumed by the generator.
pub mod grammar;

/// Grammar validation.
///
/// Validation runs once when a grammar is loaded and protects the generator
/// from empty containers, out-of-range probabilities, dangling references and
/// dead rules.
pub mod validate;

pub use grammar::{
    entry_points, is_entry_point, load_rules, parse_rules, ConditionalNode, GrammarError,
    OptionalNode, Production, RuleSet, SpanNode,
};
pub use validate::{referenced_rules, validate, ValidationError, ViolationKind};
