//! Core types for representing grammar productions.
//!
//! This module contains the node type used to model a rule body as a tree,
//! along with the accessors and constructors that generators and grammar
//! builders use to inspect and assemble it.

use facet::Facet;

/// One node of a rule body.
///
/// Each variant corresponds to one of the tags found in the compiled grammar
/// format (`lit`, `seq`, `alt`, `opt`, `ref`, `cond`, `span`). Leaves are
/// literals and references; every other variant composes child productions.
///
/// The set of variants is closed: consumers match on it exhaustively, so a
/// new kind of production cannot be added without every consumer handling it.
#[derive(Debug, Clone, PartialEq, Facet)]
#[repr(u8)]
pub enum Production {
    /// A terminal piece of text.
    #[facet(rename = "lit")]
    Literal(String),

    /// Children that all occur, in order.
    #[facet(rename = "seq")]
    Sequence(Vec<Production>),

    /// Children of which exactly one is chosen at generation time.
    #[facet(rename = "alt")]
    Alternative(Vec<Production>),

    /// A child that is included with probability `f`.
    #[facet(rename = "opt")]
    Optional(OptionalNode),

    /// A use of another named rule.
    #[facet(rename = "ref")]
    Reference(String),

    /// A child guarded by a generator flag.
    #[facet(rename = "cond")]
    Conditional(ConditionalNode),

    /// A child marked as a sub-range for downstream styling or scoring.
    #[facet(rename = "span")]
    Span(SpanNode),
}

/// Payload of [`Production::Optional`].
#[derive(Debug, Clone, PartialEq, Facet)]
pub struct OptionalNode {
    /// Inclusion probability, expected to lie in `[0, 1]`.
    pub f: f64,
    /// The optionally included production.
    pub opt: Box<Production>,
}

/// Payload of [`Production::Conditional`].
#[derive(Debug, Clone, PartialEq, Facet)]
pub struct ConditionalNode {
    /// Name of the generator flag being tested.
    pub flag: String,
    /// Whether the flag test is inverted.
    pub inv: bool,
    /// The guarded production.
    pub cond: Box<Production>,
}

/// Payload of [`Production::Span`].
#[derive(Debug, Clone, PartialEq, Facet)]
pub struct SpanNode {
    /// Label attached to the generated range.
    pub class: String,
    /// The wrapped production.
    pub span: Box<Production>,
}

impl Production {
    /// Builds a [`Production::Literal`].
    #[must_use]
    pub fn lit(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Builds a [`Production::Sequence`].
    #[must_use]
    pub fn seq(children: Vec<Production>) -> Self {
        Self::Sequence(children)
    }

    /// Builds a [`Production::Alternative`].
    #[must_use]
    pub fn alt(children: Vec<Production>) -> Self {
        Self::Alternative(children)
    }

    /// Builds a [`Production::Optional`] included with probability `f`.
    #[must_use]
    pub fn opt(f: f64, child: Production) -> Self {
        Self::Optional(OptionalNode {
            f,
            opt: Box::new(child),
        })
    }

    /// Builds a [`Production::Reference`] to the rule called `name`.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Builds a [`Production::Conditional`] guarded by `flag`.
    #[must_use]
    pub fn cond(flag: impl Into<String>, inv: bool, child: Production) -> Self {
        Self::Conditional(ConditionalNode {
            flag: flag.into(),
            inv,
            cond: Box::new(child),
        })
    }

    /// Builds a [`Production::Span`] labelled with `class`.
    #[must_use]
    pub fn span(class: impl Into<String>, child: Production) -> Self {
        Self::Span(SpanNode {
            class: class.into(),
            span: Box::new(child),
        })
    }

    /// Returns the canonical tag of this production.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Production::Literal(_) => "lit",
            Production::Sequence(_) => "seq",
            Production::Alternative(_) => "alt",
            Production::Optional(_) => "opt",
            Production::Reference(_) => "ref",
            Production::Conditional(_) => "cond",
            Production::Span(_) => "span",
        }
    }

    /// Returns `true` if this production has no children.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Production::Literal(_) | Production::Reference(_))
    }

    /// Returns the referenced rule name, if applicable.
    #[must_use]
    pub fn reference_name(&self) -> Option<&str> {
        match self {
            Production::Reference(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Returns the literal text if this is a [`Production::Literal`].
    #[must_use]
    pub fn literal_value(&self) -> Option<&str> {
        match self {
            Production::Literal(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the direct children of this production.
    ///
    /// Wrappers (`opt`, `cond`, `span`) yield their single child; leaves yield
    /// an empty slice.
    #[must_use]
    pub fn children(&self) -> &[Production] {
        match self {
            Production::Sequence(children) | Production::Alternative(children) => children,
            Production::Optional(OptionalNode { opt: child, .. })
            | Production::Conditional(ConditionalNode { cond: child, .. })
            | Production::Span(SpanNode { span: child, .. }) => {
                std::slice::from_ref(child.as_ref())
            }
            Production::Literal(_) | Production::Reference(_) => &[],
        }
    }
}
