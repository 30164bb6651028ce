//! Introspectable call signatures and the signature matcher.
//!
//! A component does not expose runtime reflection; instead the host describes
//! its constructor with a [`Signature`]: an ordered positional parameter list
//! (each required, optional, or a variadic tail) plus a keyword parameter set
//! with an optional arbitrary-keyword tail.
//!
//! The matcher checks a binding set against the signature:
//!
//! - positional count must lie in `[min_positional, max_positional]`
//!   (no upper bound once a variadic tail is declared);
//! - without a keyword tail, the bound keyword set must equal the declared set.
//!   Every undeclared key is reported on its own, followed by one set mismatch.

use crate::error::{SignatureError, Violation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fallback base name for bindings that land in an anonymous variadic tail.
pub const DEFAULT_REST_NAME: &str = "items";

/// How a positional parameter accepts arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionalKind {
    Required,
    Optional,
    /// Variadic tail: accepts any number of trailing arguments.
    Rest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalParam {
    #[serde(default)]
    pub name: Option<String>,
    pub kind: PositionalKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordParam {
    pub name: String,
    #[serde(default = "default_true")]
    pub required: bool,
}

fn default_true() -> bool {
    true
}

enum Slot<'a> {
    Named(&'a str),
    Numbered(&'a str),
}

/// The constructor signature of a component (or a producer callable).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub positional: Vec<PositionalParam>,
    #[serde(default)]
    pub keywords: Vec<KeywordParam>,
    /// Accepts arbitrary keyword arguments.
    #[serde(default)]
    pub keyword_rest: bool,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.positional.push(PositionalParam {
            name: Some(name.into()),
            kind: PositionalKind::Required,
        });
        self
    }

    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.positional.push(PositionalParam {
            name: Some(name.into()),
            kind: PositionalKind::Optional,
        });
        self
    }

    /// Declare a variadic positional tail. `None` leaves it anonymous.
    pub fn rest(mut self, name: Option<&str>) -> Self {
        self.positional.push(PositionalParam {
            name: name.map(String::from),
            kind: PositionalKind::Rest,
        });
        self
    }

    pub fn keyword(mut self, name: impl Into<String>) -> Self {
        self.keywords.push(KeywordParam {
            name: name.into(),
            required: true,
        });
        self
    }

    pub fn optional_keyword(mut self, name: impl Into<String>) -> Self {
        self.keywords.push(KeywordParam {
            name: name.into(),
            required: false,
        });
        self
    }

    pub fn keyword_rest(mut self) -> Self {
        self.keyword_rest = true;
        self
    }

    /// A keyword-only signature, the shape producers declare.
    pub fn keywords_only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .fold(Self::new(), |sig, name| sig.keyword(name))
    }

    fn rest_param(&self) -> Option<&PositionalParam> {
        self.positional
            .iter()
            .find(|p| p.kind == PositionalKind::Rest)
    }

    fn named_positional(&self) -> impl Iterator<Item = &PositionalParam> {
        self.positional
            .iter()
            .filter(|p| p.kind != PositionalKind::Rest)
    }

    /// Number of required positional parameters.
    pub fn min_positional(&self) -> usize {
        self.positional
            .iter()
            .filter(|p| p.kind == PositionalKind::Required)
            .count()
    }

    /// Required + optional positional parameters, or `None` when a variadic
    /// tail lifts the upper bound.
    pub fn max_positional(&self) -> Option<usize> {
        if self.rest_param().is_some() {
            None
        } else {
            Some(self.named_positional().count())
        }
    }

    /// Declared keyword names (required and optional) in declaration order.
    pub fn keyword_names(&self) -> Vec<&str> {
        self.keywords.iter().map(|k| k.name.as_str()).collect()
    }

    /// The name a positional binding at `index` is emitted under.
    ///
    /// A named parameter keeps its name. Every other binding is numbered in
    /// binding order among the bindings sharing its base name: anonymous
    /// parameters and an anonymous tail share `items`, so `[_, *_]` binds
    /// `items0, items1`, while a tail named `rest` binds `rest0, rest1, ...`.
    pub fn positional_name(&self, index: usize) -> String {
        match self.slot(index) {
            Slot::Named(name) => name.to_string(),
            Slot::Numbered(base) => {
                let ordinal = (0..index)
                    .filter(|&i| matches!(self.slot(i), Slot::Numbered(b) if b == base))
                    .count();
                format!("{base}{ordinal}")
            }
        }
    }

    fn slot(&self, index: usize) -> Slot<'_> {
        match self.named_positional().nth(index) {
            Some(PositionalParam {
                name: Some(name), ..
            }) => Slot::Named(name.as_str()),
            Some(_) => Slot::Numbered(DEFAULT_REST_NAME),
            None => Slot::Numbered(
                self.rest_param()
                    .and_then(|p| p.name.as_deref())
                    .unwrap_or(DEFAULT_REST_NAME),
            ),
        }
    }

    /// Structural check: at most one rest parameter, placed last, and no
    /// parameter name declared twice across positional and keyword lists.
    pub fn check(&self) -> Result<(), SignatureError> {
        let rests: Vec<usize> = self
            .positional
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind == PositionalKind::Rest)
            .map(|(i, _)| i)
            .collect();
        if rests.len() > 1 {
            return Err(SignatureError::MultipleRest { count: rests.len() });
        }
        if let Some(&at) = rests.first() {
            if at + 1 != self.positional.len() {
                return Err(SignatureError::RestNotLast);
            }
        }

        let mut seen = BTreeSet::new();
        let names = self
            .positional
            .iter()
            .filter_map(|p| p.name.as_deref())
            .chain(self.keywords.iter().map(|k| k.name.as_str()));
        for name in names {
            if !seen.insert(name) {
                return Err(SignatureError::DuplicateName(name.to_string()));
            }
        }
        Ok(())
    }

    /// Positional arity check.
    pub fn check_positional(&self, count: usize) -> Vec<Violation> {
        let min = self.min_positional();
        if count < min {
            return vec![Violation::TooFewArgs { min, found: count }];
        }
        match self.max_positional() {
            Some(max) if count > max => vec![Violation::TooManyArgs { max, found: count }],
            _ => Vec::new(),
        }
    }

    /// Keyword set check. `keys` are in binding order.
    pub fn check_keywords(&self, keys: &[&str]) -> Vec<Violation> {
        if self.keyword_rest {
            return Vec::new();
        }

        let declared = self.keyword_names();
        let mut violations: Vec<Violation> = keys
            .iter()
            .filter(|key| !declared.contains(*key))
            .map(|key| Violation::UnknownKeyword {
                key: (*key).to_string(),
            })
            .collect();

        let same_set = keys.len() == declared.len() && keys.iter().all(|k| declared.contains(k));
        if !same_set {
            violations.push(Violation::KeywordSet {
                expected: declared.iter().map(|s| s.to_string()).collect(),
                found: keys.iter().map(|s| s.to_string()).collect(),
            });
        }
        violations
    }
}
