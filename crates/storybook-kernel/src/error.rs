//! Error types for story validation.
//!
//! Validation never short-circuits across sibling branches: every failure is
//! collected into an [`ErrorNode`] tree that mirrors the story structure
//! (story → constructor args → control → value method args). Only
//! [`StoryConfig::to_csf_params`](crate::story::StoryConfig::to_csf_params)
//! turns the tree into a returned [`ValidationError`].
//!
//! Rendering grammar:
//!
//! ```text
//! node    := violation | scope ": (" node ( ", " node )* ")"
//! ```

use std::fmt;

/// A single leaf fact. `Display` yields the exact sentence shown to users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// Fewer positional bindings than the signature requires.
    #[error("Args expected at least {min} but found {found}")]
    TooFewArgs { min: usize, found: usize },

    /// More positional bindings than the signature accepts.
    #[error("Args expected no more than {max} but found {found}")]
    TooManyArgs { max: usize, found: usize },

    /// The bound keyword set differs from the declared keyword set.
    #[error("Kwargs expected keys [{}] but found [{}]", .expected.join(", "), .found.join(", "))]
    KeywordSet {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A bound keyword the signature does not declare.
    #[error("Kwargs '{key}' is invalid")]
    UnknownKeyword { key: String },

    /// The control value is outside its allowed set.
    #[error("Default value is not included in the list")]
    ValueNotAllowed,

    /// A numeric control holds a non-numeric value.
    #[error("Default value is not a number")]
    NotANumber,

    /// A multi-valued control holds a non-array value.
    #[error("Default value is not a list")]
    NotAnArray,
}

/// The fixed label of a nested error scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// The whole story, named by its title.
    Story { title: String },
    /// The constructor bindings of a story.
    ConstructorArgs,
    /// One bound control, named by its display name.
    Control { name: String },
    /// The keyword arguments handed to a custom control's producer.
    ValueMethodArgs,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Story { title } => write!(f, "'{title}' invalid"),
            Scope::ConstructorArgs => write!(f, "Constructor args invalid"),
            Scope::Control { name } => write!(f, "Controls '{name}' is invalid"),
            Scope::ValueMethodArgs => write!(f, "Value method args invalid"),
        }
    }
}

/// One node of the validation error tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorNode {
    Violation(Violation),
    Nested { scope: Scope, children: Vec<ErrorNode> },
}

impl ErrorNode {
    /// Wrap `children` under `scope`. Returns `None` when there is nothing to wrap,
    /// so callers can push the result straight into a sibling list.
    pub fn nest(scope: Scope, children: Vec<ErrorNode>) -> Option<Self> {
        if children.is_empty() {
            None
        } else {
            Some(ErrorNode::Nested { scope, children })
        }
    }

    /// All leaf violations below this node, depth-first.
    pub fn violations(&self) -> Vec<&Violation> {
        let mut out = Vec::new();
        self.collect_violations(&mut out);
        out
    }

    fn collect_violations<'a>(&'a self, out: &mut Vec<&'a Violation>) {
        match self {
            ErrorNode::Violation(v) => out.push(v),
            ErrorNode::Nested { children, .. } => {
                for child in children {
                    child.collect_violations(out);
                }
            }
        }
    }
}

impl From<Violation> for ErrorNode {
    fn from(violation: Violation) -> Self {
        ErrorNode::Violation(violation)
    }
}

impl fmt::Display for ErrorNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorNode::Violation(v) => write!(f, "{v}"),
            ErrorNode::Nested { scope, children } => {
                write!(f, "{scope}: (")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A failed story, carrying the full error tree.
///
/// The message is the rendered tree, e.g.
/// `'Example' invalid: (Constructor args invalid: (Args expected at least 1 but found 0))`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{root}")]
pub struct ValidationError {
    root: ErrorNode,
}

impl ValidationError {
    pub fn new(root: ErrorNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &ErrorNode {
        &self.root
    }

    /// Flattened leaf violations, in render order.
    pub fn violations(&self) -> Vec<&Violation> {
        self.root.violations()
    }
}

/// A structurally malformed [`Signature`](crate::signature::Signature).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("only one rest parameter is allowed, found {count}")]
    MultipleRest { count: usize },

    #[error("rest parameter must be the last positional parameter")]
    RestNotLast,

    #[error("duplicate parameter name `{0}`")]
    DuplicateName(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_child_renders_in_parens() {
        let node = ErrorNode::nest(
            Scope::Story {
                title: "Example".into(),
            },
            vec![Violation::ValueNotAllowed.into()],
        )
        .unwrap();
        assert_eq!(
            node.to_string(),
            "'Example' invalid: (Default value is not included in the list)"
        );
    }

    #[test]
    fn siblings_are_comma_joined() {
        let node = ErrorNode::nest(
            Scope::ConstructorArgs,
            vec![
                Violation::UnknownKeyword { key: "junk".into() }.into(),
                Violation::KeywordSet {
                    expected: vec!["title".into(), "size".into()],
                    found: vec!["junk".into()],
                }
                .into(),
            ],
        )
        .unwrap();
        assert_eq!(
            node.to_string(),
            "Constructor args invalid: (Kwargs 'junk' is invalid, Kwargs expected keys [title, size] but found [junk])"
        );
    }

    #[test]
    fn empty_children_do_not_nest() {
        assert!(ErrorNode::nest(Scope::ValueMethodArgs, Vec::new()).is_none());
    }

    #[test]
    fn violations_flatten_depth_first() {
        let inner = ErrorNode::nest(
            Scope::Control {
                name: "Title".into(),
            },
            vec![Violation::NotANumber.into()],
        )
        .unwrap();
        let root = ErrorNode::nest(
            Scope::ConstructorArgs,
            vec![Violation::TooFewArgs { min: 1, found: 0 }.into(), inner],
        )
        .unwrap();
        let err = ValidationError::new(root);
        assert_eq!(
            err.violations(),
            vec![
                &Violation::TooFewArgs { min: 1, found: 0 },
                &Violation::NotANumber
            ]
        );
    }
}
