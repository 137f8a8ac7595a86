//! Validation routines for practice-text grammars.
//!
//! This module performs structural checks over a [`RuleSet`]: containers must
//! not be empty, optional probabilities must lie in `[0, 1]`, every reference
//! must resolve, and every rule other than an entry point must be used
//! somewhere. It runs once per grammar load so that the generator can walk
//! the tree without re-checking it.

use crate::grammar::{
    ConditionalNode, OptionalNode, Production, RuleSet, SpanNode, ALTERNATE_START_PREFIX,
    START_RULE,
};
use log::{debug, trace};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// Represents a validation failure encountered when checking a grammar.
///
/// Validation is fail-fast: the first violation found aborts the check.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A sequence has no children.
    #[error("empty seq in rule <{rule}>")]
    EmptySequence {
        /// Rule whose body contains the sequence.
        rule: String,
    },

    /// An alternative has no children.
    #[error("empty alt in rule <{rule}>")]
    EmptyAlternative {
        /// Rule whose body contains the alternative.
        rule: String,
    },

    /// An optional's probability lies outside `[0, 1]`.
    #[error("invalid opt probability {f} in rule <{rule}>")]
    InvalidProbability {
        /// The offending probability.
        f: f64,
        /// Rule whose body contains the optional.
        rule: String,
    },

    /// A reference names a rule that does not exist.
    #[error("invalid ref <{name}> in rule <{rule}>")]
    UnresolvedReference {
        /// The missing rule name.
        name: String,
        /// Rule whose body contains the reference.
        rule: String,
    },

    /// A rule is neither an entry point nor referenced anywhere.
    #[error("unreferenced rule <{name}>")]
    UnreferencedRule {
        /// Name of the unused rule.
        name: String,
    },

    /// A node does not match any production shape.
    #[error("malformed grammar node: {detail}")]
    MalformedNode {
        /// Description of what could not be read.
        detail: String,
    },
}

/// The kind of a [`ValidationError`], without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// See [`ValidationError::EmptySequence`].
    EmptySequence,
    /// See [`ValidationError::EmptyAlternative`].
    EmptyAlternative,
    /// See [`ValidationError::InvalidProbability`].
    InvalidProbability,
    /// See [`ValidationError::UnresolvedReference`].
    UnresolvedReference,
    /// See [`ValidationError::UnreferencedRule`].
    UnreferencedRule,
    /// See [`ValidationError::MalformedNode`].
    MalformedNode,
}

impl ValidationError {
    /// Returns the kind of violation this error reports.
    #[must_use]
    pub fn kind(&self) -> ViolationKind {
        match self {
            ValidationError::EmptySequence { .. } => ViolationKind::EmptySequence,
            ValidationError::EmptyAlternative { .. } => ViolationKind::EmptyAlternative,
            ValidationError::InvalidProbability { .. } => ViolationKind::InvalidProbability,
            ValidationError::UnresolvedReference { .. } => ViolationKind::UnresolvedReference,
            ValidationError::UnreferencedRule { .. } => ViolationKind::UnreferencedRule,
            ValidationError::MalformedNode { .. } => ViolationKind::MalformedNode,
        }
    }
}

/// Checks that the given grammar is well-formed.
///
/// - Checks that there are no empty sequences or alternatives.
/// - Checks that every optional probability lies in `[0, 1]`.
/// - Checks that all references can be resolved.
/// - Checks that there are no unreferenced rules. `start` and names prefixed
///   with `start_` are entry points and need no reference.
///
/// Rules are visited in name order, so the error reported for a given input
/// is always the same. Reference cycles are allowed.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate(rules: &RuleSet) -> Result<&RuleSet, ValidationError> {
    let mut referenced = HashSet::from([START_RULE]);

    for name in sorted_names(rules) {
        trace!("visiting rule <{name}>");
        visit(&rules[name], rules, name, &mut referenced)?;
    }

    check_unreferenced(rules, &referenced)?;

    debug!(
        "validated grammar: {} rules, {} referenced",
        rules.len(),
        referenced.len()
    );
    Ok(rules)
}

/// Returns every rule name targeted by some reference, plus `start`.
///
/// Unlike [`validate`], this never fails: names that do not resolve are
/// included as-is.
#[must_use]
pub fn referenced_rules(rules: &RuleSet) -> BTreeSet<&str> {
    let mut referenced = BTreeSet::from([START_RULE]);
    for body in rules.values() {
        collect_references(body, &mut referenced);
    }
    referenced
}

fn sorted_names(rules: &RuleSet) -> Vec<&str> {
    let mut names: Vec<&str> = rules.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

fn visit<'a>(
    production: &'a Production,
    rules: &RuleSet,
    rule: &str,
    referenced: &mut HashSet<&'a str>,
) -> Result<(), ValidationError> {
    match production {
        Production::Conditional(ConditionalNode { cond: child, .. })
        | Production::Span(SpanNode { span: child, .. }) => visit(child, rules, rule, referenced),

        Production::Optional(OptionalNode { f, opt }) => {
            if !(0.0..=1.0).contains(f) {
                return Err(ValidationError::InvalidProbability {
                    f: *f,
                    rule: rule.to_string(),
                });
            }
            visit(opt, rules, rule, referenced)
        }

        Production::Sequence(children) => {
            if children.is_empty() {
                return Err(ValidationError::EmptySequence {
                    rule: rule.to_string(),
                });
            }
            children
                .iter()
                .try_for_each(|child| visit(child, rules, rule, referenced))
        }

        Production::Alternative(children) => {
            if children.is_empty() {
                return Err(ValidationError::EmptyAlternative {
                    rule: rule.to_string(),
                });
            }
            children
                .iter()
                .try_for_each(|child| visit(child, rules, rule, referenced))
        }

        Production::Reference(name) => {
            if !rules.contains_key(name) {
                return Err(ValidationError::UnresolvedReference {
                    name: name.clone(),
                    rule: rule.to_string(),
                });
            }
            referenced.insert(name);
            Ok(())
        }

        Production::Literal(_) => Ok(()),
    }
}

fn check_unreferenced(rules: &RuleSet, referenced: &HashSet<&str>) -> Result<(), ValidationError> {
    for name in sorted_names(rules) {
        if !name.starts_with(ALTERNATE_START_PREFIX) && !referenced.contains(name) {
            return Err(ValidationError::UnreferencedRule {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn collect_references<'a>(production: &'a Production, referenced: &mut BTreeSet<&'a str>) {
    if let Some(name) = production.reference_name() {
        referenced.insert(name);
    }
    for child in production.children() {
        collect_references(child, referenced);
    }
}
